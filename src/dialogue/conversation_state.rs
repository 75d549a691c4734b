use serde::Serialize;

/// Phase of the scripted onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Greeting,
    AskName,
    MainMenu,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::AskName => "ask_name",
            Stage::MainMenu => "main_menu",
        }
    }
}

/// Mutable state of one chat session.
///
/// The session owner never edits it field by field: it submits a turn to
/// [`process_turn`](super::process_turn) and swaps in the returned state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    stage: Stage,
    user_name: Option<String>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub(crate) fn with_stage(&self, stage: Stage) -> Self {
        Self {
            stage,
            user_name: self.user_name.clone(),
        }
    }

    /// Records the name unless one was already captured; a name is never replaced.
    pub(crate) fn with_name(mut self, name: String) -> Self {
        if self.user_name.is_none() {
            self.user_name = Some(name);
        }
        self
    }
}
