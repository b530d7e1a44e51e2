//! Resume matching against a `JobAnalysis`: compatibility scoring and skills gap.

pub mod compatibility;
pub mod handlers;
pub mod skills_gap;
