// Prompt template for cover-letter generation.

/// Cover letter prompt. Placeholders: {header_block}, {job_description}, {resume_text}.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are a cover letter generator. Your task is to write a professional, personalized and concise cover letter tailored to the job description and resume below.
To compose a compelling cover letter, scrutinise the job description for key qualifications.
Begin with a succinct introduction about the candidate's identity and career goals.
Highlight skills aligned with the job, underpinned by tangible examples.
Incorporate details about the company, emphasising its mission or unique aspects that align with the candidate's values.
Conclude by reaffirming the candidate's suitability, inviting further discussion.
Use job-specific terminology for a tailored and impactful letter, maintaining a professional style suitable for the role in the job description. Keep the response strictly under 300 words.
Use the header block provided exactly at the top. Header Block (place as-is, do not add labels):

{header_block}

Job Description:
{job_description}

Resume:
{resume_text}

Requirements:
- Formal, concise tone
- Clearly map the candidate's skills/experience to the job
- Assume the header block is correct; do not include placeholder fields
- End with a professional closing and the candidate's name
"#;

/// Fills the template in a single pass, so placeholder-looking text inside
/// the user's resume or job description is never substituted again.
pub fn build_prompt(header_block: &str, job_description: &str, resume_text: &str) -> String {
    let values = [
        ("{header_block}", header_block),
        ("{job_description}", job_description),
        ("{resume_text}", resume_text),
    ];

    let mut out = String::with_capacity(
        COVER_LETTER_PROMPT_TEMPLATE.len()
            + header_block.len()
            + job_description.len()
            + resume_text.len(),
    );
    let mut rest = COVER_LETTER_PROMPT_TEMPLATE;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_injects_all_sections_in_order() {
        let prompt = build_prompt("Ada Lovelace\nOctober 6, 2026", "Rust engineer", "10 years of Rust");
        let header_at = prompt.find("Ada Lovelace\nOctober 6, 2026").unwrap();
        let jd_at = prompt.find("Job Description:\nRust engineer").unwrap();
        let resume_at = prompt.find("Resume:\n10 years of Rust").unwrap();
        assert!(header_at < jd_at && jd_at < resume_at);
        assert!(!prompt.contains("{header_block}"));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_build_prompt_does_not_expand_placeholders_in_user_text() {
        let prompt = build_prompt("Header", "Mentions {resume_text} literally", "RESUME BODY");
        assert!(prompt.contains("Mentions {resume_text} literally"));
        assert_eq!(prompt.matches("RESUME BODY").count(), 1);
    }

    #[test]
    fn test_build_prompt_keeps_word_limit_instruction() {
        let prompt = build_prompt("", "jd", "resume");
        assert!(prompt.contains("under 300 words"));
        assert!(prompt.contains("End with a professional closing and the candidate's name"));
    }
}
