//! Prompt assembly.
//!
//! Pure template substitution, no hidden state: `(template, symptoms) -> text`.

/// The fixed instructional template. The `{symptoms}` marker is replaced
/// with the user's trimmed input.
pub const ADVICE_TEMPLATE: &str = "\
You are a trusted AI-powered medical assistant. Based on the following symptoms \
described by a user, analyze the case carefully using relevant past cases.

Symptoms:
{symptoms}

Please provide a detailed response that includes:
1. A possible medical condition or diagnosis based on the symptoms.
2. An explanation of why this diagnosis might be relevant.
3. Recommended over-the-counter or prescribed medications.
4. Suggested lifestyle changes or precautions.
5. A severity estimate if possible (e.g., mild, moderate, severe).
6. Whether or not the user should seek immediate medical attention.

Use clear and non-technical language, but remain medically accurate.

If insufficient information is provided, ask clarifying questions.";

/// Substitute the user's symptoms into [`ADVICE_TEMPLATE`].
pub fn build_prompt(symptoms: &str) -> String {
    ADVICE_TEMPLATE.replace("{symptoms}", symptoms)
}

/// Assemble the retrieved case context into a system message.
///
/// Returns a preamble plus the retrieved chunk texts as a numbered list, or
/// a note that no similar case was found.
pub fn build_context(chunks: &[&str]) -> String {
    if chunks.is_empty() {
        return "No similar past cases were found in the corpus.".to_string();
    }
    let mut context = String::from(
        "Use the following past cases as reference context when analyzing the symptoms:\n",
    );
    for (i, chunk) in chunks.iter().enumerate() {
        context.push_str(&format!("\n{}. {chunk}", i + 1));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_symptoms_and_all_six_parts() {
        let prompt = build_prompt("fever, cough, chest pain");
        assert!(prompt.contains("Symptoms:\nfever, cough, chest pain"));
        for part in 1..=6 {
            assert!(prompt.contains(&format!("{part}. ")), "missing part {part}");
        }
        assert!(!prompt.contains("{symptoms}"));
    }

    #[test]
    fn context_numbers_retrieved_chunks() {
        let context = build_context(&["case one text", "case two text"]);
        assert!(context.contains("1. case one text"));
        assert!(context.contains("2. case two text"));
    }

    #[test]
    fn empty_context_notes_no_matches() {
        assert!(build_context(&[]).contains("No similar past cases"));
    }
}
