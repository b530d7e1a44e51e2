//! Job structure analysis: seniority, company and role signals, list sections, red flags.
//!
//! Every decision is an independent phrase heuristic over the lowercased posting.
//! Within a decision the first matching rule wins.

use crate::analysis::lexicon::{lexicon, BENEFIT_PHRASES, RED_FLAG_RULES};
use crate::analysis::models::{
    CompanySize, ExperienceLevel, RoleType, WorkArrangement, GENERAL_INDUSTRY,
};
use crate::analysis::text::{list_items, section_window};

pub const QUALIFICATION_TRIGGERS: &[&str] = &["qualifications", "requirements", "must have"];
pub const NICE_TO_HAVE_TRIGGERS: &[&str] = &["nice to have", "preferred", "bonus", "plus"];

/// Structural attributes of a posting, independent of the lexicon keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct JobStructure {
    pub experience_level: ExperienceLevel,
    pub company_size: CompanySize,
    pub role_type: RoleType,
    pub work_arrangement: WorkArrangement,
    pub industry_context: String,
    pub benefits: Vec<String>,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub red_flags: Vec<String>,
}

pub fn analyze_structure(text: &str) -> JobStructure {
    let lower = text.to_ascii_lowercase();

    JobStructure {
        experience_level: detect_experience_level(&lower),
        company_size: detect_company_size(&lower),
        role_type: detect_role_type(&lower),
        work_arrangement: detect_work_arrangement(&lower),
        industry_context: detect_industry(text),
        benefits: BENEFIT_PHRASES
            .iter()
            .filter(|phrase| lower.contains(*phrase))
            .map(|phrase| phrase.to_string())
            .collect(),
        responsibilities: list_items(text),
        qualifications: section_window(text, QUALIFICATION_TRIGGERS, NICE_TO_HAVE_TRIGGERS)
            .map(list_items)
            .unwrap_or_default(),
        nice_to_have: section_window(text, NICE_TO_HAVE_TRIGGERS, QUALIFICATION_TRIGGERS)
            .map(list_items)
            .unwrap_or_default(),
        red_flags: RED_FLAG_RULES
            .iter()
            .filter(|rule| rule.matches(&lower))
            .map(|rule| rule.label.to_string())
            .collect(),
    }
}

fn contains_any(text_lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text_lower.contains(p))
}

fn detect_experience_level(lower: &str) -> ExperienceLevel {
    if contains_any(lower, &["entry level", "junior", "0-2 years"]) {
        ExperienceLevel::Entry
    } else if contains_any(lower, &["senior", "5+ years", "lead"]) {
        ExperienceLevel::Senior
    } else if contains_any(lower, &["principal", "staff", "architect"]) {
        ExperienceLevel::Lead
    } else if contains_any(lower, &["director", "vp", "executive"]) {
        ExperienceLevel::Executive
    } else {
        ExperienceLevel::Mid
    }
}

fn detect_company_size(lower: &str) -> CompanySize {
    if contains_any(lower, &["startup", "early stage"]) {
        CompanySize::Startup
    } else if contains_any(lower, &["enterprise", "fortune 500"]) {
        CompanySize::Enterprise
    } else if contains_any(lower, &["small team", "boutique"]) {
        CompanySize::Small
    } else {
        CompanySize::Medium
    }
}

fn detect_role_type(lower: &str) -> RoleType {
    if contains_any(lower, &["manager", "director"]) {
        RoleType::Manager
    } else if contains_any(lower, &["lead", "senior"]) {
        RoleType::TeamLead
    } else if contains_any(lower, &["executive", "vp"]) {
        RoleType::Executive
    } else {
        RoleType::IndividualContributor
    }
}

fn detect_work_arrangement(lower: &str) -> WorkArrangement {
    if lower.contains("remote") {
        WorkArrangement::Remote
    } else if lower.contains("hybrid") {
        WorkArrangement::Hybrid
    } else if contains_any(lower, &["on-site", "onsite"]) {
        WorkArrangement::Onsite
    } else {
        WorkArrangement::Flexible
    }
}

fn detect_industry(text: &str) -> String {
    lexicon()
        .industry()
        .find(|term| term.is_in(text))
        .map(|term| term.keyword.clone())
        .unwrap_or_else(|| GENERAL_INDUSTRY.to_string())
}
