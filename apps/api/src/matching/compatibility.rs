//! Compatibility scoring: how well a resume covers a parsed job posting.
//!
//! Algorithm:
//! 1. skills / keywords / qualifications = share of items found in the resume
//!    (case-insensitive substring), × 100; an empty list scores 100
//! 2. experience = 75 (no experience-level matching exists yet)
//! 3. overall = mean of the four unrounded dimensions, rounded

use crate::analysis::models::{CompatibilityScore, JobAnalysis, ScoreBreakdown};

/// Placeholder experience dimension.
pub const EXPERIENCE_SCORE: f64 = 75.0;

/// Keywords above this weight count as strengths when the resume mentions them.
const STRENGTH_WEIGHT_THRESHOLD: f64 = 0.7;
const MAX_LISTED: usize = 3;

const IMPROVEMENT_TIPS: [&str; 3] = [
    "Quantify achievements with concrete metrics (percentages, revenue, time saved)",
    "Mirror the action verbs and phrasing used in the job posting",
    "Weave the posting's key terms naturally into your summary and experience bullets",
];

pub fn score_compatibility(resume_text: &str, analysis: &JobAnalysis) -> CompatibilityScore {
    let resume_lower = resume_text.to_lowercase();
    let mentions = |term: &str| resume_lower.contains(&term.to_lowercase());

    let skills = coverage(analysis.required_skills.iter().map(|s| s.name.as_str()), &mentions);
    let keywords = coverage(analysis.keywords.iter().map(|k| k.keyword.as_str()), &mentions);
    let qualifications = coverage(analysis.qualifications.iter().map(String::as_str), &mentions);

    let overall = (skills + EXPERIENCE_SCORE + keywords + qualifications) / 4.0;

    let strong_keywords: Vec<&str> = analysis
        .keywords
        .iter()
        .filter(|k| k.weight > STRENGTH_WEIGHT_THRESHOLD && mentions(k.keyword.as_str()))
        .take(MAX_LISTED)
        .map(|k| k.keyword.as_str())
        .collect();

    let missing_required: Vec<&str> = analysis
        .required_skills
        .iter()
        .filter(|s| !mentions(s.name.as_str()))
        .take(MAX_LISTED)
        .map(|s| s.name.as_str())
        .collect();

    let mut strengths = Vec::new();
    if !strong_keywords.is_empty() {
        strengths.push(format!(
            "Strong alignment with key requirements: {}",
            strong_keywords.join(", ")
        ));
    }

    let mut gaps = Vec::new();
    if !missing_required.is_empty() {
        gaps.push(format!(
            "Missing required skills: {}",
            missing_required.join(", ")
        ));
    }

    CompatibilityScore {
        overall: to_score(overall),
        breakdown: ScoreBreakdown {
            skills: to_score(skills),
            experience: to_score(EXPERIENCE_SCORE),
            keywords: to_score(keywords),
            qualifications: to_score(qualifications),
        },
        strengths,
        gaps,
        improvements: IMPROVEMENT_TIPS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Percentage of `items` the resume mentions; 100 when there is nothing to match.
fn coverage<'a>(items: impl Iterator<Item = &'a str>, mentions: &impl Fn(&str) -> bool) -> f64 {
    let (total, found) = items.fold((0usize, 0usize), |(total, found), item| {
        (total + 1, found + usize::from(mentions(item)))
    });
    if total == 0 {
        return 100.0;
    }
    100.0 * found as f64 / total as f64
}

fn to_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}
