//! Lexicon: compiled-in reference vocabulary used by every analysis step.
//!
//! Built once on first use and shared read-only across requests.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::models::KeywordCategory;

pub const TECHNICAL_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Golang",
    "Rust",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Scala",
    "SQL",
    "NoSQL",
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Svelte",
    "Next.js",
    "Node.js",
    "Django",
    "Flask",
    "FastAPI",
    "Spring Boot",
    "Ruby on Rails",
    ".NET",
    "GraphQL",
    "RESTful",
    "gRPC",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Elasticsearch",
    "Kafka",
    "RabbitMQ",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Jenkins",
    "CI/CD",
    "Git",
    "Linux",
    "Microservices",
    "Machine Learning",
    "Deep Learning",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "NumPy",
    "Spark",
    "Hadoop",
    "Airflow",
    "Snowflake",
    "Tableau",
    "Figma",
    "Jira",
];

pub const SOFT_SKILLS: &[&str] = &[
    "Communication",
    "Leadership",
    "Teamwork",
    "Collaboration",
    "Problem Solving",
    "Critical Thinking",
    "Time Management",
    "Adaptability",
    "Creativity",
    "Mentoring",
    "Attention to Detail",
    "Ownership",
    "Stakeholder Management",
    "Presentation",
    "Negotiation",
    "Self-motivated",
    "Analytical",
];

/// Ordered: `industry_context` picks the first of these found in a posting.
pub const INDUSTRY_TERMS: &[&str] = &[
    "fintech",
    "healthcare",
    "e-commerce",
    "saas",
    "b2b",
    "b2c",
    "startup",
    "enterprise",
    "agile",
    "scrum",
    "kanban",
    "waterfall",
    "lean",
    "six sigma",
    "devops",
    "mlops",
];

const SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "ecmascript"]),
    ("typescript", &["ts"]),
    ("python", &["py"]),
    ("golang", &["go"]),
    ("react", &["react.js", "reactjs"]),
    ("vue", &["vue.js", "vuejs"]),
    ("node.js", &["node", "nodejs"]),
    ("postgresql", &["postgres"]),
    ("kubernetes", &["k8s"]),
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud platform", "google cloud"]),
    ("azure", &["microsoft azure"]),
    ("ci/cd", &["continuous integration", "continuous delivery"]),
    ("machine learning", &["ml"]),
    ("deep learning", &["dl"]),
    ("communication", &["verbal communication", "written communication"]),
    ("leadership", &["team leadership", "people management"]),
    ("teamwork", &["collaboration"]),
    ("problem solving", &["troubleshooting"]),
    ("e-commerce", &["ecommerce", "online retail"]),
    ("saas", &["software as a service"]),
    ("devops", &["site reliability", "sre"]),
    ("agile", &["scrum", "kanban"]),
];

pub const BENEFIT_PHRASES: &[&str] = &[
    "health insurance",
    "dental",
    "vision",
    "401k",
    "retirement",
    "vacation",
    "pto",
    "flexible hours",
    "remote work",
    "stock options",
];

/// A phrase trigger that marks a posting with a warning label.
pub struct RedFlagRule {
    pub triggers: &'static [&'static str],
    /// All triggers must co-occur instead of any one of them.
    pub require_all: bool,
    pub label: &'static str,
}

pub const RED_FLAG_RULES: &[RedFlagRule] = &[
    RedFlagRule {
        triggers: &["unpaid", "no salary"],
        require_all: false,
        label: "Unpaid position",
    },
    RedFlagRule {
        triggers: &["wear many hats", "jack of all trades"],
        require_all: false,
        label: "Potentially undefined role scope",
    },
    RedFlagRule {
        triggers: &["fast-paced", "high-pressure"],
        require_all: true,
        label: "High stress environment indicated",
    },
    RedFlagRule {
        triggers: &["rockstar", "ninja", "guru"],
        require_all: false,
        label: "Unprofessional job title terminology",
    },
];

impl RedFlagRule {
    /// `text_lower` must already be ASCII-lowercased.
    pub fn matches(&self, text_lower: &str) -> bool {
        if self.require_all {
            self.triggers.iter().all(|t| text_lower.contains(t))
        } else {
            self.triggers.iter().any(|t| text_lower.contains(t))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compiled lexicon
// ────────────────────────────────────────────────────────────────────────────

/// A lexicon entry with its case-insensitive whole-word matcher.
#[derive(Debug)]
pub struct LexiconTerm {
    /// Display form, used for skill names.
    pub name: &'static str,
    /// Lowercase form, used as the keyword.
    pub keyword: String,
    pub category: KeywordCategory,
    pattern: Regex,
}

impl LexiconTerm {
    fn new(name: &'static str, category: KeywordCategory) -> Self {
        Self {
            name,
            keyword: name.to_lowercase(),
            category,
            pattern: word_pattern(name),
        }
    }

    pub fn count_in(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    pub fn is_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Byte offset of the first whole-word occurrence lying entirely inside `range`.
    ///
    /// Matching always runs on the full text, so a word cut by the range edge is never
    /// mistaken for a shorter term.
    pub fn first_position_within(&self, text: &str, range: Range<usize>) -> Option<usize> {
        self.pattern
            .find_iter(text)
            .find(|m| m.start() >= range.start && m.end() <= range.end)
            .map(|m| m.start())
    }
}

/// Builds a case-insensitive matcher that only accepts the term as a whole word.
///
/// Word boundaries are asserted only on sides where the term itself starts or ends with
/// a word character, so `C++` and `.NET` still match.
fn word_pattern(term: &str) -> Regex {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if term.chars().next().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let trailing = if term.chars().last().is_some_and(is_word) {
        r"\b"
    } else {
        ""
    };
    let source = format!("(?i){leading}{}{trailing}", regex::escape(term));
    // NOTE: expect() is acceptable here: the source is an escaped literal, so it always compiles.
    Regex::new(&source).expect("Invalid regex: escaped lexicon term")
}

pub struct Lexicon {
    terms: Vec<LexiconTerm>,
    industry_order: Vec<usize>,
    synonyms: HashMap<&'static str, &'static [&'static str]>,
}

impl Lexicon {
    fn build() -> Self {
        let mut terms: Vec<LexiconTerm> = Vec::new();
        let lists = [
            (TECHNICAL_SKILLS, KeywordCategory::Technical),
            (SOFT_SKILLS, KeywordCategory::Soft),
            (INDUSTRY_TERMS, KeywordCategory::Industry),
        ];
        for (list, category) in lists {
            for &name in list {
                let keyword = name.to_lowercase();
                // A term listed twice keeps its first category.
                if terms.iter().any(|t| t.keyword == keyword) {
                    continue;
                }
                terms.push(LexiconTerm::new(name, category));
            }
        }

        let industry_order = INDUSTRY_TERMS
            .iter()
            .filter_map(|name| terms.iter().position(|t| t.keyword == *name))
            .collect();

        Self {
            terms,
            industry_order,
            synonyms: SYNONYMS.iter().copied().collect(),
        }
    }

    /// All terms: technical first, then soft skills, then industry terms.
    pub fn terms(&self) -> &[LexiconTerm] {
        &self.terms
    }

    pub fn technical(&self) -> impl Iterator<Item = &LexiconTerm> {
        self.terms
            .iter()
            .filter(|t| t.category == KeywordCategory::Technical)
    }

    /// Industry terms in their fixed priority order.
    pub fn industry(&self) -> impl Iterator<Item = &LexiconTerm> {
        self.industry_order.iter().map(|&i| &self.terms[i])
    }

    pub fn synonyms_for(&self, keyword: &str) -> Vec<String> {
        self.synonyms
            .get(keyword)
            .map(|list| list.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }
}

static LEXICON: LazyLock<Lexicon> = LazyLock::new(Lexicon::build);

pub fn lexicon() -> &'static Lexicon {
    &LEXICON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(name: &str) -> &'static LexiconTerm {
        lexicon()
            .terms()
            .iter()
            .find(|t| t.name == name)
            .unwrap()
    }

    #[test]
    fn test_whole_word_match_is_case_insensitive() {
        assert_eq!(term("React").count_in("react, REACT and React."), 3);
    }

    #[test]
    fn test_whole_word_rejects_embedded_term() {
        assert!(!term("Java").is_in("Senior JavaScript developer"));
        assert!(term("JavaScript").is_in("Senior JavaScript developer"));
        assert!(!term("lean").is_in("clean code"));
    }

    #[test]
    fn test_symbol_terms_match() {
        assert!(term("C++").is_in("Modern C++ and C# experience"));
        assert!(term("C#").is_in("Modern C++ and C# experience"));
        assert!(term(".NET").is_in("Built on .NET 8"));
        assert!(term("CI/CD").is_in("Own the ci/cd pipeline"));
    }

    #[test]
    fn test_position_within_ignores_words_cut_by_range() {
        let text = "Senior JavaScript engineer, some Java too";
        // "Java" prefix of "JavaScript" ends inside the range but the word does not
        assert_eq!(term("Java").first_position_within(text, 0..11), None);
        assert_eq!(term("Java").first_position_within(text, 0..text.len()), Some(33));
        assert_eq!(term("JavaScript").first_position_within(text, 0..17), Some(7));
        assert_eq!(term("JavaScript").first_position_within(text, 8..text.len()), None);
    }

    #[test]
    fn test_terms_are_unique_by_keyword() {
        let terms = lexicon().terms();
        for (i, t) in terms.iter().enumerate() {
            assert!(
                terms[i + 1..].iter().all(|o| o.keyword != t.keyword),
                "duplicate term {}",
                t.keyword
            );
        }
    }

    #[test]
    fn test_industry_order_is_preserved() {
        let names: Vec<&str> = lexicon().industry().map(|t| t.name).collect();
        assert_eq!(names, INDUSTRY_TERMS);
    }

    #[test]
    fn test_synonym_lookup() {
        assert_eq!(lexicon().synonyms_for("kubernetes"), vec!["k8s"]);
        assert!(lexicon().synonyms_for("figma").is_empty());
    }

    #[test]
    fn test_red_flag_rule_requires_all_triggers() {
        let rule = &RED_FLAG_RULES[2];
        assert!(!rule.matches("a fast-paced team"));
        assert!(rule.matches("a fast-paced, high-pressure team"));
    }
}
