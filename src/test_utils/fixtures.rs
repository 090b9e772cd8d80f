//! Sample listing pages and records.

use crate::core::record::{Category, JobRecord};
use crate::core::store::RecordStore;

/// A flattened category page holding three listings plus page chrome.
pub const SAMPLE_LISTING_PAGE: &str = "\
JobYaari
Engineering Jobs
Data Analyst
Data Analyst
Acme Corp
Unlock Now
₹40,000 - ₹60,000
B.Tech
Pune
Site Engineer
Site Engineer
Metro Rail Corporation
Unlock Now
35000 | Fresher
Diploma in Civil
Delhi
Design Engineer
Design Engineer
Tata Motors
3+ Years
M.Tech
Bangalore
Subscribe for alerts
";

/// Build a fully populated record.
#[must_use]
pub fn record(
    title: &str,
    organization: &str,
    salary: &str,
    experience: &str,
    location: &str,
    category: Category,
) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        organization: organization.to_string(),
        salary: salary.to_string(),
        experience: experience.to_string(),
        qualification: "Graduate".to_string(),
        location: location.to_string(),
        category: Some(category),
    }
}

/// Small mixed store used across search tests.
#[must_use]
pub fn sample_store() -> RecordStore {
    RecordStore::from_records(vec![
        record("Site Engineer", "Metro Rail", "35000", "Fresher", "Delhi", Category::Engineering),
        record("Data Analyst", "Acme Corp", "₹40,000 - ₹60,000", "", "Pune", Category::Engineering),
        record("Lab Assistant", "Bio Labs", "28000", "Fresher", "Delhi", Category::Science),
        record("Accountant", "Bank of Trust", "52000", "5+ Years", "Mumbai", Category::Commerce),
        record("Lecturer", "State College", "61000", "Senior", "Jaipur", Category::Education),
    ])
}
