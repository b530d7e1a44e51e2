//! Skills gap: which posting skills a resume covers, misses, or should strengthen.

use crate::analysis::models::{JobAnalysis, Skill, SkillsGap};

const MAX_LISTED: usize = 3;

const GENERIC_RECOMMENDATIONS: [&str; 3] = [
    "Add specific examples of projects where you applied each key skill",
    "Back your experience with quantified metrics and outcomes",
    "Tailor your professional summary to the responsibilities of this role",
];

/// Partitions the posting's skills against the resume.
///
/// Required skills land in `strength_skills` or `missing_skills`. Preferred skills the
/// resume lacks land in `weak_skills`; preferred skills it has are not reported.
pub fn identify_skills_gap(resume_text: &str, analysis: &JobAnalysis) -> SkillsGap {
    let resume_lower = resume_text.to_lowercase();
    let mentions = |skill: &Skill| resume_lower.contains(&skill.name.to_lowercase());

    let (strength_skills, missing_skills): (Vec<Skill>, Vec<Skill>) = analysis
        .required_skills
        .iter()
        .cloned()
        .partition(|s| mentions(s));

    let weak_skills: Vec<Skill> = analysis
        .preferred_skills
        .iter()
        .filter(|s| !mentions(*s))
        .cloned()
        .collect();

    let mut recommendations = Vec::new();
    if !missing_skills.is_empty() {
        recommendations.push(format!(
            "Develop or showcase these required skills: {}",
            listed(&missing_skills)
        ));
    }
    if !weak_skills.is_empty() {
        recommendations.push(format!(
            "Strengthen these preferred skills to stand out: {}",
            listed(&weak_skills)
        ));
    }
    recommendations.extend(GENERIC_RECOMMENDATIONS.iter().map(|r| r.to_string()));

    SkillsGap {
        missing_skills,
        weak_skills,
        strength_skills,
        recommendations,
    }
}

fn listed(skills: &[Skill]) -> String {
    skills
        .iter()
        .take(MAX_LISTED)
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
