// Resume analysis: job-description keyword extraction and ATS scoring.
// Both are pure functions over the normalized document; no I/O here.

pub mod ats;
pub mod handlers;
pub mod keywords;
