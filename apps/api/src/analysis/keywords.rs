//! Keyword extraction: scans a posting against the lexicon and weights every hit.

use crate::analysis::lexicon::lexicon;
use crate::analysis::models::{KeywordCategory, WeightedKeyword};
use crate::analysis::text::{prefix_chars, sentences};

/// Maximum keywords kept per posting.
pub const MAX_KEYWORDS: usize = 25;

/// Maximum context sentences kept per keyword.
const MAX_CONTEXT_SENTENCES: usize = 3;

/// Terms inside this many leading characters get the position boost.
const LEADING_CHARS: usize = 100;

const FREQUENCY_STEP: f64 = 0.2;
const LEADING_BOOST: f64 = 0.3;
const TECHNICAL_BOOST: f64 = 0.2;

/// Extracts weighted, deduplicated keywords from a job description.
///
/// weight = min(frequency × 0.2, 1.0) + 0.3 (term in first 100 chars)
///          + 0.2 (technical term), clamped to 0.0 – 1.0.
///
/// Sorted by weight descending (ties keep lexicon order), top 25 only.
pub fn extract_keywords(text: &str) -> Vec<WeightedKeyword> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let lexicon = lexicon();
    let leading = 0..prefix_chars(text, LEADING_CHARS).len();

    let mut keywords: Vec<WeightedKeyword> = lexicon
        .terms()
        .iter()
        .filter_map(|term| {
            let frequency = term.count_in(text) as u32;
            if frequency == 0 {
                return None;
            }

            let mut weight = (frequency as f64 * FREQUENCY_STEP).min(1.0);
            if term.first_position_within(text, leading.clone()).is_some() {
                weight += LEADING_BOOST;
            }
            if term.category == KeywordCategory::Technical {
                weight += TECHNICAL_BOOST;
            }

            let context = sentences(text)
                .filter(|s| term.is_in(s))
                .take(MAX_CONTEXT_SENTENCES)
                .map(str::to_string)
                .collect();

            Some(WeightedKeyword {
                keyword: term.keyword.clone(),
                weight: weight.clamp(0.0, 1.0),
                category: term.category,
                frequency,
                context,
                synonyms: lexicon.synonyms_for(&term.keyword),
            })
        })
        .collect();

    // Stable sort keeps lexicon order between equal weights.
    keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::{SOFT_SKILLS, TECHNICAL_SKILLS};

    fn find<'a>(keywords: &'a [WeightedKeyword], keyword: &str) -> &'a WeightedKeyword {
        keywords
            .iter()
            .find(|k| k.keyword == keyword)
            .unwrap_or_else(|| panic!("keyword {keyword} not extracted"))
    }

    #[test]
    fn test_empty_and_whitespace_text_yield_nothing() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t ").is_empty());
    }

    #[test]
    fn test_weight_formula_leading_technical() {
        // frequency 1 → 0.2, leading → +0.3, technical → +0.2
        let keywords = extract_keywords("We use Rust daily.");
        let rust = find(&keywords, "rust");
        assert_eq!(rust.frequency, 1);
        assert!((rust.weight - 0.7).abs() < 1e-9, "weight was {}", rust.weight);
        assert_eq!(rust.category, KeywordCategory::Technical);
    }

    #[test]
    fn test_weight_without_leading_boost() {
        let text = format!("{} Strong communication matters.", "x".repeat(120));
        let keywords = extract_keywords(&text);
        let communication = find(&keywords, "communication");
        assert!((communication.weight - 0.2).abs() < 1e-9);
        assert_eq!(communication.category, KeywordCategory::Soft);
    }

    #[test]
    fn test_word_cut_at_leading_edge_gets_no_boost() {
        // char 100 falls inside "JavaScript"; the only whole-word Java comes later
        let text = format!("{} JavaScript. {} We also use Java.", "x".repeat(95), "y".repeat(50));
        let keywords = extract_keywords(&text);
        let java = find(&keywords, "java");
        assert_eq!(java.frequency, 1);
        assert!((java.weight - 0.4).abs() < 1e-9, "weight was {}", java.weight);
    }

    #[test]
    fn test_weight_clamped_to_one() {
        let keywords = extract_keywords("Python python PYTHON python python python. Python!");
        let python = find(&keywords, "python");
        assert_eq!(python.frequency, 7);
        assert_eq!(python.weight, 1.0);
    }

    #[test]
    fn test_context_sentences_limited_to_three() {
        let text = "Docker one. Docker two! Docker three? Docker four. No match here.";
        let keywords = extract_keywords(text);
        let docker = find(&keywords, "docker");
        assert_eq!(
            docker.context,
            vec!["Docker one", "Docker two", "Docker three"]
        );
    }

    #[test]
    fn test_synonyms_attached() {
        let keywords = extract_keywords("Deploy to Kubernetes clusters");
        assert_eq!(find(&keywords, "kubernetes").synonyms, vec!["k8s"]);
    }

    #[test]
    fn test_industry_terms_extracted() {
        let keywords = extract_keywords("A fintech startup practicing agile delivery");
        assert_eq!(find(&keywords, "fintech").category, KeywordCategory::Industry);
        assert_eq!(find(&keywords, "startup").category, KeywordCategory::Industry);
    }

    #[test]
    fn test_sorted_and_capped() {
        let text = TECHNICAL_SKILLS
            .iter()
            .chain(SOFT_SKILLS.iter())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let keywords = extract_keywords(&text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        for pair in keywords.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
        for k in &keywords {
            assert!((0.0..=1.0).contains(&k.weight));
            assert!(k.frequency >= 1);
        }
    }

    #[test]
    fn test_no_duplicate_keywords() {
        let keywords = extract_keywords("React React. Agile agile. Leadership.");
        let mut seen: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
        let before = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), before);
    }

    #[test]
    fn test_deterministic_output() {
        let text = "Senior Rust engineer. Kubernetes, AWS, Terraform. Communication and leadership.";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }
}
