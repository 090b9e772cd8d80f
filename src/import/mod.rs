//! Listing import: page flattening and the heuristic listing parser.
//!
//! # Example
//!
//! ```
//! use jobsift::import::{ListingParser, lines_from_text};
//!
//! let page = "Data Analyst\nData Analyst\nAcme Corp\n₹40,000 - ₹60,000\nB.Tech\nPune";
//! let records = ListingParser::new().parse(&lines_from_text(page));
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].organization, "Acme Corp");
//! assert_eq!(records[0].location, "Pune");
//! ```

mod flatten;
mod parser;

pub use flatten::{lines_from_html, lines_from_text};
pub use parser::{
    ListingParser, ParseSummary, ScanState, TITLE_BLOCK_ADVANCE, Transition, WINDOW_FIRST,
    WINDOW_LAST, extract_experience, extract_salary, is_salary_line,
};
