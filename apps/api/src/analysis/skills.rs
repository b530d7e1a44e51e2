//! Skill classification: technical skills from the required vs preferred sections.

use std::ops::Range;

use crate::analysis::lexicon::{lexicon, LexiconTerm};
use crate::analysis::models::{Skill, SkillImportance};
use crate::analysis::text::section_range;

pub const REQUIRED_TRIGGERS: &[&str] = &["required", "must have", "essential"];
pub const PREFERRED_TRIGGERS: &[&str] = &["preferred", "nice to have", "bonus"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedSkills {
    pub required_skills: Vec<Skill>,
    pub preferred_skills: Vec<Skill>,
}

/// Classifies lexicon technical skills by the section they appear in.
///
/// A skill present in both sections is required. Skills keep the order in which they
/// first appear inside their section.
pub fn classify_skills(text: &str) -> ClassifiedSkills {
    let required_section = section_range(text, REQUIRED_TRIGGERS, PREFERRED_TRIGGERS);
    let preferred_section = section_range(text, PREFERRED_TRIGGERS, REQUIRED_TRIGGERS);

    let required_terms = required_section
        .map(|range| terms_in_order(text, range))
        .unwrap_or_default();

    let preferred_terms: Vec<&LexiconTerm> = preferred_section
        .map(|range| terms_in_order(text, range))
        .unwrap_or_default()
        .into_iter()
        .filter(|term| !required_terms.iter().any(|r| r.keyword == term.keyword))
        .collect();

    ClassifiedSkills {
        required_skills: required_terms
            .iter()
            .map(|term| Skill::technical(term.name, SkillImportance::Required))
            .collect(),
        preferred_skills: preferred_terms
            .iter()
            .map(|term| Skill::technical(term.name, SkillImportance::Preferred))
            .collect(),
    }
}

/// Technical terms wholly inside `section`, ordered by first appearance.
fn terms_in_order(text: &str, section: Range<usize>) -> Vec<&'static LexiconTerm> {
    let mut found: Vec<(usize, &'static LexiconTerm)> = lexicon()
        .technical()
        .filter_map(|term| {
            term.first_position_within(text, section.clone())
                .map(|pos| (pos, term))
        })
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, term)| term).collect()
}
