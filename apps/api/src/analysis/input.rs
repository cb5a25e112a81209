//! Input validation for analysis requests.
//!
//! All checks accumulate into one error list so the caller sees every
//! violation at once instead of fixing them one round-trip at a time.

pub const MIN_JD_LENGTH: usize = 50;

/// Below this length the keyword heuristic is skipped: a short fragment may
/// legitimately omit JD terminology.
const KEYWORD_CHECK_THRESHOLD: usize = 100;

/// Terminology expected somewhere in a real job description. Case-insensitive
/// substring match. A heuristic with accepted false positives/negatives, not
/// a classifier.
const JD_KEYWORDS: &[&str] = &[
    "experience",
    "skills",
    "qualifications",
    "requirements",
    "responsibilities",
    "developer",
    "engineer",
    "role",
    "position",
    "job",
    "hiring",
    "looking for",
    "must have",
    "should have",
    "we are seeking",
    "apply",
    "candidate",
    "role description",
    "job description",
    "career",
    "opportunity",
    "join our team",
    "about the role",
];

/// Caller-selected analysis perspective. Changes both the prompt and the
/// required response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Hr,
    Dev,
}

impl AnalysisMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hr" => Some(AnalysisMode::Hr),
            "dev" => Some(AnalysisMode::Dev),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Hr => "hr",
            AnalysisMode::Dev => "dev",
        }
    }
}

/// Validates `(text, mode)` and returns the parsed mode, or every violation
/// found.
pub fn validate_input(
    text: &str,
    mode: &str,
    max_jd_length: usize,
) -> Result<AnalysisMode, Vec<String>> {
    let mut errors = Vec::new();

    let parsed_mode = AnalysisMode::parse(mode);
    if parsed_mode.is_none() {
        errors.push("Mode must be either 'hr' or 'dev'".to_string());
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.push("Job description text is required".to_string());
    } else {
        let length = trimmed.chars().count();

        if length < MIN_JD_LENGTH {
            errors.push(format!(
                "Text is too short ({length} characters). Minimum {MIN_JD_LENGTH} characters required."
            ));
        }

        if length > max_jd_length {
            errors.push(format!(
                "Text is too long ({length} characters). Maximum {max_jd_length} characters allowed."
            ));
        }

        if length > KEYWORD_CHECK_THRESHOLD && !contains_jd_keyword(trimmed) {
            errors.push(
                "Text doesn't appear to be a job description. Missing common job description terminology."
                    .to_string(),
            );
        }
    }

    match (parsed_mode, errors.is_empty()) {
        (Some(mode), true) => Ok(mode),
        _ => Err(errors),
    }
}

fn contains_jd_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    JD_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}
