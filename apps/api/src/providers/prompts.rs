// Prompt constants for the analysis providers. The exact wording is an
// external contract with the model: both prompts demand bare JSON in the
// shape the schema validator checks, and the user prompt embeds the JD
// verbatim. Content is identical across providers so fallback does not
// change the response shape.

use crate::analysis::AnalysisMode;

/// HR mode: recruiter-facing analysis.
pub const HR_SYSTEM_PROMPT: &str = r#"You are an expert HR recruiter. Analyze the provided job description for hiring purposes and return a JSON object in this exact structure:

{
  "skills": string[],
  "salaryEstimation": string (e.g. "$100k - $130k"),
  "softSkills": string[],
  "evaluationCriteria": string[] (checklist for interviewers),
  "codingTask": {
    "title": string,
    "description": string,
    "difficulty": "beginner|intermediate|advanced",
    "requirements": string[]
  },
  "questions": {
    "technical": string[],
    "behavioral": string[]
  }
}

Focus on assessment and hiring perspective. Extract technical skills and create relevant coding challenges and interview questions.

Guidelines:
- Do NOT include any markdown, code fences, or extra commentary.
- Return ONLY valid JSON that strictly matches this schema."#;

/// Dev mode: candidate-facing analysis.
pub const DEV_SYSTEM_PROMPT: &str = r#"You are a career coach for developers. Analyze the provided job description for skill development and return a JSON object in this exact structure:

{
  "skills": string[],
  "salaryEstimation": string (e.g. "$100k - $130k"),
  "softSkills": string[],
  "resumeKeywords": string[] (ATS keywords),
  "projectSuggestion": string (brief description of a portfolio project),
  "codingTask": {
    "title": string,
    "description": string,
    "difficulty": "beginner|intermediate|advanced",
    "requirements": string[],
    "learningResources": string[]
  },
  "questions": {
    "technical": string[],
    "behavioral": string[],
    "selfAssessment": string[]
  },
  "skillGaps": string[],
  "learningPath": string[]
}

Focus on skill development and interview preparation. Identify skill gaps and provide learning guidance.

Guidelines:
- Do NOT include any markdown, code fences, or extra commentary.
- Return ONLY valid JSON that strictly matches this schema."#;

pub fn system_prompt(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Hr => HR_SYSTEM_PROMPT,
        AnalysisMode::Dev => DEV_SYSTEM_PROMPT,
    }
}

pub fn user_prompt(jd_text: &str) -> String {
    format!("Analyze this job description text exactly as given:\n\"{jd_text}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_embeds_jd_verbatim() {
        let jd = "We are hiring a Rust engineer with 5+ years experience.";
        assert!(user_prompt(jd).contains(jd));
    }

    #[test]
    fn test_system_prompts_differ_by_mode() {
        assert!(system_prompt(AnalysisMode::Dev).contains("skillGaps"));
        assert!(!system_prompt(AnalysisMode::Hr).contains("skillGaps"));
    }
}
