// All LLM prompt constants for the scoring module.
// Placeholders in braces are replaced before sending.

/// System prompt for criteria extraction.
pub const CRITERIA_SYSTEM: &str = "You are an expert in job analysis. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Criteria extraction prompt. Replace `{text}` before sending.
pub const CRITERIA_PROMPT_TEMPLATE: &str = r#"You are an expert job analyst. Extract key ranking criteria from the following job description:

{text}
---
Return the criteria as a JSON object with a single key "criteria" holding a list of short strings, for example:
{"criteria": ["5+ years of Python experience", "Bachelor's degree in Computer Science"]}"#;

/// System prompt for resume scoring.
pub const SCORE_SYSTEM: &str = "You are an AI resume evaluator. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Resume scoring prompt. Replace `{text}` and `{criteria}` before sending.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Evaluate the following resume text against the given criteria and score each criterion from 0-5.

Resume Text:
{text}

Criteria:
{criteria}

Return the scores as a JSON object with each criterion, spelled exactly as given, as a key and an integer score from 0 to 5 as its value."#;

pub fn criteria_prompt(text: &str) -> String {
    fill_template(CRITERIA_PROMPT_TEMPLATE, &[("{text}", text)])
}

pub fn score_prompt(text: &str, criteria: &[String]) -> String {
    let criteria_list = criteria
        .iter()
        .map(|c| format!("- {c}"))
        .collect::<Vec<_>>()
        .join("\n");

    fill_template(
        SCORE_PROMPT_TEMPLATE,
        &[("{text}", text), ("{criteria}", criteria_list.as_str())],
    )
}

/// Substitutes placeholders in a single left-to-right pass over the template.
/// Substituted values are never rescanned, so user text that happens to
/// contain a placeholder is copied through verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        for (placeholder, value) in values {
            if let Some(after) = tail.strip_prefix(*placeholder) {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('{');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_prompt_embeds_text() {
        let prompt = criteria_prompt("Senior Rust Engineer, 5+ years required");
        assert!(prompt.contains("Senior Rust Engineer, 5+ years required"));
        assert!(!prompt.contains("{text}"));
        assert!(prompt.contains("\"criteria\""));
    }

    #[test]
    fn test_score_prompt_embeds_text_and_criteria_in_order() {
        let criteria = vec!["Rust".to_string(), "Leadership".to_string()];
        let prompt = score_prompt("Jane Doe, 6 years Rust", &criteria);

        assert!(prompt.contains("Jane Doe, 6 years Rust"));
        let rust = prompt.find("- Rust").unwrap();
        let leadership = prompt.find("- Leadership").unwrap();
        assert!(rust < leadership);
        assert!(!prompt.contains("{criteria}"));
    }

    #[test]
    fn test_score_prompt_leaves_placeholder_text_in_criteria_alone() {
        let criteria = vec!["Writes {text} templates".to_string()];
        let prompt = score_prompt("RESUME BODY", &criteria);

        assert!(prompt.contains("- Writes {text} templates"));
        assert_eq!(prompt.matches("RESUME BODY").count(), 1);
    }

    #[test]
    fn test_fill_template_keeps_unrelated_braces() {
        let filled = fill_template(r#"{"criteria": []} {text} {other}"#, &[("{text}", "X")]);
        assert_eq!(filled, r#"{"criteria": []} X {other}"#);
    }

    #[test]
    fn test_criteria_prompt_keeps_json_example() {
        let prompt = criteria_prompt("jd");
        assert!(prompt.contains(r#"{"criteria": ["#));
    }

    #[test]
    fn test_score_prompt_leaves_placeholder_text_in_resume_alone() {
        let criteria = vec!["Rust".to_string()];
        let prompt = score_prompt("Template author: {criteria}", &criteria);
        assert!(prompt.contains("Template author: {criteria}"));
    }
}
