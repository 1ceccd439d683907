mod extract;
mod relevance;
mod reviews;

pub use extract::parse_tasks;
pub use relevance::{check_relevance, RelevanceVerdict, VerdictSource};
pub use reviews::{analyze_reviews, AspectScore, ReviewAnalysis};
