//! Prompt templates for answer synthesis

/// Prompt builder for retrieval-grounded answers
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the synthesis prompt embedding the question and the retrieved
    /// context verbatim.
    ///
    /// No truncation happens here; callers bound prompt size upstream
    /// through `topK` and the chunk size.
    pub fn build_answer_prompt(question: &str, context: &str) -> String {
        format!(
            "Answer the following question based on the context below:\n\n\
             Question: {question}\n\n\
             Context:\n{context}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_question_and_context_verbatim() {
        let prompt = PromptBuilder::build_answer_prompt(
            "What is the launch date?",
            "chunk one\n\nchunk two",
        );

        assert_eq!(
            prompt,
            "Answer the following question based on the context below:\n\n\
             Question: What is the launch date?\n\n\
             Context:\nchunk one\n\nchunk two"
        );
    }
}
