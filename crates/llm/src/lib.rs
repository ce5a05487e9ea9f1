pub mod answer;
pub mod prompt;
pub mod provider;
pub mod providers;

pub use answer::answer;
pub use prompt::{build_prompt, NOT_FOUND_REPLY};
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
