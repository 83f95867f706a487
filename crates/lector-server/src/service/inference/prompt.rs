/// Builds the prompt sent to the model for a question about a document.
pub fn build_prompt(extracted_text: &str, question: &str) -> String {
    format!(
        "Based on the following document text, answer the user's question.\n\
         \n\
         --- DOCUMENT TEXT ---\n\
         {extracted_text}\n\
         ---------------------\n\
         \n\
         --- USER QUESTION ---\n\
         {question}\n\
         ---------------------"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_follows_template() {
        let prompt = build_prompt("Total: 42.00 EUR", "What is the total?");
        let expected = "Based on the following document text, answer the user's question.\n\
                        \n\
                        --- DOCUMENT TEXT ---\n\
                        Total: 42.00 EUR\n\
                        ---------------------\n\
                        \n\
                        --- USER QUESTION ---\n\
                        What is the total?\n\
                        ---------------------";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn multiline_text_is_kept_verbatim() {
        let prompt = build_prompt("line one\nline two", "Summarize");
        assert!(prompt.contains("--- DOCUMENT TEXT ---\nline one\nline two\n---"));
        assert!(prompt.ends_with("Summarize\n---------------------"));
    }
}
