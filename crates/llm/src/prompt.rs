//! The retrieval prompt: ranked chunks fenced off as search results, then
//! the question.

use nest_store::SearchHit;

/// What the model is told to say when the results do not contain the answer.
pub const NOT_FOUND_REPLY: &str = "I can't find that information in the document.";

/// Build the single user prompt sent to the model. Hits are listed in rank
/// order, each followed by a `---` line.
pub fn build_prompt(question: &str, hits: &[SearchHit]) -> String {
    let results: String = hits
        .iter()
        .map(|hit| format!("{}\n---\n", hit.chunk))
        .collect();

    format!(
        "Use the search results below. If the answer cannot be found, write \"{NOT_FOUND_REPLY}\"\n\
         \n\
         Search results:\n\
         ===\n\
         {results}\n\
         ===\n\
         \n\
         Question: {question}"
    )
}
