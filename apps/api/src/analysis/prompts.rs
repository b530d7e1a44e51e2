// LLM prompt constants for job posting enrichment.

/// System prompt for enrichment. Enforces JSON-only output.
pub const ENRICHMENT_SYSTEM: &str =
    "You are an expert job description analyst and resume strategist. \
    Analyze a job description and extract structured information. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Enrichment prompt template. Replace `{jd_text}` before sending.
pub const ENRICHMENT_PROMPT_TEMPLATE: &str = r#"Analyze the following job description.

Return a JSON object with this schema. Omit any field you cannot determine.
{
  "keywords": [
    {
      "keyword": "kubernetes",
      "weight": 0.9,
      "category": "technical",
      "frequency": 3,
      "context": ["You will operate Kubernetes clusters"],
      "synonyms": ["k8s"]
    }
  ],
  "required_skills": [
    {"name": "Rust", "category": "technical", "importance": "required", "years_experience": 5, "proficiency_level": "advanced"}
  ],
  "preferred_skills": [
    {"name": "Kafka", "category": "technical", "importance": "preferred"}
  ],
  "experience_level": "senior",
  "industry_context": "fintech",
  "company_size": "startup",
  "role_type": "individual-contributor",
  "work_arrangement": "remote",
  "benefits": ["health insurance"],
  "responsibilities": ["Design and operate distributed systems"],
  "qualifications": ["5+ years backend experience"],
  "nice_to_have": ["Experience with Kafka"],
  "red_flags": [],
  "matching_tips": ["Lead with your distributed systems work"]
}

Allowed values:
- keyword category: "technical" | "soft" | "industry" | "role" | "company"
- skill category: "technical" | "soft" | "industry" | "certification"
- importance: "required" | "preferred" | "nice-to-have"
- proficiency_level: "beginner" | "intermediate" | "advanced" | "expert"
- experience_level: "entry" | "junior" | "mid" | "senior" | "lead" | "executive"
- company_size: "startup" | "small" | "medium" | "large" | "enterprise"
- role_type: "individual-contributor" | "team-lead" | "manager" | "director" | "executive"
- work_arrangement: "remote" | "hybrid" | "onsite" | "flexible"

Rules:
- keyword: lowercase; weight between 0.0 and 1.0; frequency at least 1; at most 25 keywords.
- red_flags: concerns a candidate should know about (unpaid work, undefined scope, burnout signals).
- matching_tips: concrete advice for tailoring a resume to this posting.

Job description:
{jd_text}"#;
