use crate::llm::ChatPrompt;
use crate::models::ChatExchange;

/// Number of trailing exchanges given to the model
pub const HISTORY_WINDOW: usize = 3;

const HISTORY_PLACEHOLDER: &str = "{conversation_history}";

const SYSTEM_PROMPT_TEMPLATE: &str = "You are a knowledgeable and friendly shoe store assistant for Walknex, a UK-based online footwear store. Your goal is to help customers find the perfect shoes and provide excellent customer service.

Guidelines:
1. Be friendly and professional
2. Use British English
3. Provide specific product recommendations when appropriate
4. Ask clarifying questions when needed
5. Consider factors like intended use, foot type, and budget
6. Explain benefits and features clearly
7. All prices should be in GBP (£)

You have access to:
- Various shoe categories (casual, running, boots, sneakers)
- Different foot types and arch support needs
- Common foot problems and solutions
- Size guides and fitting recommendations

Previous conversation context: {conversation_history}
";

/// Render the last [`HISTORY_WINDOW`] exchanges, oldest first, as
/// `User: …\nAssistant: …` blocks joined by newlines.
pub fn render_history(history: &[ChatExchange]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|e| format!("User: {}\nAssistant: {}", e.user, e.assistant.text))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn system_prompt(rendered_history: &str) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace(HISTORY_PLACEHOLDER, rendered_history)
}

pub fn build_prompt(message: &str, history: &[ChatExchange]) -> ChatPrompt {
    ChatPrompt {
        system: system_prompt(&render_history(history)),
        user: message.to_string(),
    }
}
