mod openai;
mod provider;

pub use openai::{OpenAIChatModel, OpenAIConfig};
pub use provider::{ChatPrompt, LanguageModel};

#[cfg(test)]
pub use provider::MockLanguageModel;
