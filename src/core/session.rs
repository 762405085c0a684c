// conversation state - every turn the model needs to keep the plan coherent

use crate::core::ai::{ChatMessage, Role};

/// Accumulated conversation. The whole history rides along on every model
/// call so follow-up prompts patch the existing project instead of
/// starting a new one.
#[derive(Debug, Default)]
pub struct Session {
    pub messages: Vec<ChatMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// First turn: template context prompts in order, then the user's
    /// request, all as user messages.
    pub fn seed(&mut self, template_prompts: &[String], user_prompt: &str) {
        for prompt in template_prompts {
            self.messages.push(ChatMessage {
                role: Role::User,
                content: prompt.clone(),
            });
        }
        self.push_user(user_prompt);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
