//! Answer composition
//!
//! Turns the final record lines plus the original query into prose. The
//! chat-model composer is an opaque, fallible dependency; [`ListComposer`]
//! is the deterministic offline rendering used when it is unavailable.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::search::SearchOutcome;

mod chat;

pub use chat::ChatComposer;

/// Context sent when nothing matched.
pub const NO_MATCHES: &str = "No matching jobs found.";

static QUALIFICATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)qualification|eligibility").expect("valid regex"));
static NOTIFICATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)notification|latest").expect("valid regex"));
static EXPERIENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)experience").expect("valid regex"));

/// What the user seems to care about most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFocus {
    Qualification,
    Notification,
    Experience,
}

impl ResponseFocus {
    /// First matching focus, checked in qualification, notification,
    /// experience order.
    #[must_use]
    pub fn detect(query: &str) -> Option<Self> {
        if QUALIFICATION.is_match(query) {
            Some(Self::Qualification)
        } else if NOTIFICATION.is_match(query) {
            Some(Self::Notification)
        } else if EXPERIENCE.is_match(query) {
            Some(Self::Experience)
        } else {
            None
        }
    }
}

/// Input to a composer.
#[derive(Debug, Clone, Serialize)]
pub struct ComposeRequest {
    pub query: String,
    /// Final rendered record lines, best first.
    pub lines: Vec<String>,
    pub focus: Option<ResponseFocus>,
}

impl ComposeRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, lines: Vec<String>) -> Self {
        let query = query.into();
        let focus = ResponseFocus::detect(&query);
        Self {
            query,
            lines,
            focus,
        }
    }

    #[must_use]
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self::new(outcome.query.clone(), outcome.lines())
    }

    /// Context block: one line per record, or [`NO_MATCHES`].
    #[must_use]
    pub fn context(&self) -> String {
        if self.lines.is_empty() {
            NO_MATCHES.to_string()
        } else {
            self.lines.join("\n")
        }
    }

    /// Prompt for a chat model, restricted to the context.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "You are JobYaari, a friendly and helpful job-search assistant.\n\
             Read the job data below and answer the user's query in a natural, human-like tone.\n\
             \n\
             Rules:\n\
             - ONLY use the data in the context below.\n\
             - Speak conversationally, not like a machine.\n\
             - If multiple jobs match, list them clearly with bullet points.\n\
             - If the query is about qualifications, highlight the 'Qualification' part of matching jobs.\n\
             - If it's about notifications, say \"Here are the latest notifications in XYZ...\" and then show results.\n\
             - If it's about experience, focus on the 'Experience' column.\n\
             - If nothing matches, politely say no jobs are available right now.\n\
             {focus}\
             \n\
             Context (jobs):\n\
             {context}\n\
             \n\
             User's Question:\n\
             {query}\n",
            focus = self.focus_hint(),
            context = self.context(),
            query = self.query,
        )
    }

    fn focus_hint(&self) -> &'static str {
        match self.focus {
            Some(ResponseFocus::Qualification) => "- This query is about qualifications.\n",
            Some(ResponseFocus::Notification) => "- This query is about notifications.\n",
            Some(ResponseFocus::Experience) => "- This query is about experience.\n",
            None => "",
        }
    }
}

/// Produces prose for a set of records.
pub trait Composer {
    fn compose(&self, request: &ComposeRequest) -> Result<String>;
}

/// Offline composer: a numbered list of the records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListComposer;

impl Composer for ListComposer {
    fn compose(&self, request: &ComposeRequest) -> Result<String> {
        if request.lines.is_empty() {
            return Ok("Sorry, no jobs matching your question are available right now.".to_string());
        }

        let mut out = match request.focus {
            Some(ResponseFocus::Notification) => "Here are the latest notifications:\n".to_string(),
            _ => format!("Found {} matching job(s):\n", request.lines.len()),
        };
        for (index, line) in request.lines.iter().enumerate() {
            let _ = writeln!(out, "{}. {line}", index + 1);
        }
        Ok(out.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_detection_order() {
        assert_eq!(
            ResponseFocus::detect("latest jobs and eligibility"),
            Some(ResponseFocus::Qualification)
        );
        assert_eq!(
            ResponseFocus::detect("LATEST commerce jobs"),
            Some(ResponseFocus::Notification)
        );
        assert_eq!(
            ResponseFocus::detect("how much experience for clerk"),
            Some(ResponseFocus::Experience)
        );
        assert_eq!(ResponseFocus::detect("jobs in pune"), None);
    }

    #[test]
    fn empty_context_says_no_matches() {
        let request = ComposeRequest::new("anything", Vec::new());
        assert_eq!(request.context(), NO_MATCHES);
        assert!(request.prompt().contains(NO_MATCHES));
    }

    #[test]
    fn prompt_carries_query_and_records() {
        let request = ComposeRequest::new(
            "qualification for analyst",
            vec!["Data Analyst at Acme Corp | Salary: 45000".to_string()],
        );
        let prompt = request.prompt();
        assert!(prompt.contains("Data Analyst at Acme Corp"));
        assert!(prompt.ends_with("qualification for analyst\n"));
        assert!(prompt.contains("This query is about qualifications."));
    }

    #[test]
    fn list_composer_numbers_records() {
        let request = ComposeRequest::new(
            "jobs",
            vec!["first job".to_string(), "second job".to_string()],
        );
        let answer = ListComposer.compose(&request).unwrap();
        insta::assert_snapshot!(answer, @r"
        Found 2 matching job(s):
        1. first job
        2. second job
        ");
    }

    #[test]
    fn list_composer_handles_empty_result() {
        let answer = ListComposer
            .compose(&ComposeRequest::new("jobs", Vec::new()))
            .unwrap();
        assert!(answer.contains("no jobs"));
    }
}
