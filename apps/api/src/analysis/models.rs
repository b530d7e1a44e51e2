//! Data models shared by the analysis and matching engines.
//!
//! Every value here is built fresh per call and never mutated after construction.
//! Enums serialize as kebab-case literals (`team-lead`, `nice-to-have`), the same shape
//! the enrichment prompt asks the LLM to return.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Keywords
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeywordCategory {
    Technical,
    Soft,
    Industry,
    Role,
    Company,
}

/// A lexicon term found in a job posting, weighted by frequency, position and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKeyword {
    /// Normalized lowercase term.
    pub keyword: String,
    /// Always within 0.0 – 1.0.
    pub weight: f64,
    pub category: KeywordCategory,
    /// Number of whole-word occurrences in the source text (≥ 1).
    pub frequency: u32,
    /// Up to 3 sentences containing the keyword, in source order.
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillCategory {
    Technical,
    Soft,
    Industry,
    Certification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkillImportance {
    Required,
    Preferred,
    NiceToHave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    pub importance: SkillImportance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_level: Option<ProficiencyLevel>,
}

impl Skill {
    pub fn technical(name: impl Into<String>, importance: SkillImportance) -> Self {
        Self {
            name: name.into(),
            category: SkillCategory::Technical,
            importance,
            years_experience: None,
            proficiency_level: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Posting structure
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
    Executive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySize {
    Startup,
    Small,
    #[default]
    Medium,
    Large,
    Enterprise,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleType {
    #[default]
    IndividualContributor,
    TeamLead,
    Manager,
    Director,
    Executive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkArrangement {
    Remote,
    Hybrid,
    Onsite,
    #[default]
    Flexible,
}

/// Industry context used when no industry term is found in a posting.
pub const GENERAL_INDUSTRY: &str = "general";

/// Full structured analysis of one job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    /// At most 25, sorted by weight descending.
    pub keywords: Vec<WeightedKeyword>,
    pub required_skills: Vec<Skill>,
    pub preferred_skills: Vec<Skill>,
    pub experience_level: ExperienceLevel,
    pub industry_context: String,
    pub company_size: CompanySize,
    pub role_type: RoleType,
    pub work_arrangement: WorkArrangement,
    pub benefits: Vec<String>,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub red_flags: Vec<String>,
    pub matching_tips: Vec<String>,
}

impl Default for JobAnalysis {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
            experience_level: ExperienceLevel::default(),
            industry_context: GENERAL_INDUSTRY.to_string(),
            company_size: CompanySize::default(),
            role_type: RoleType::default(),
            work_arrangement: WorkArrangement::default(),
            benefits: Vec::new(),
            responsibilities: Vec::new(),
            qualifications: Vec::new(),
            nice_to_have: Vec::new(),
            red_flags: Vec::new(),
            matching_tips: Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matching output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: u32,
    pub experience: u32,
    pub keywords: u32,
    pub qualifications: u32,
}

/// Resume-vs-posting compatibility. Every score is an integer in 0 – 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub overall: u32,
    pub breakdown: ScoreBreakdown,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsGap {
    pub missing_skills: Vec<Skill>,
    pub weak_skills: Vec<Skill>,
    pub strength_skills: Vec<Skill>,
    pub recommendations: Vec<String>,
}
