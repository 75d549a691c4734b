//! Scripted dialogue engine.
//!
//! A session is a [`ConversationState`]. Each user turn goes through
//! [`process_turn`], which returns the bot reply together with the state the
//! session should continue from. Nothing here performs I/O.

pub mod catalog;
pub mod conversation_state;
pub mod intent;
pub mod name;

#[cfg(test)]
mod proptests;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

pub use catalog::ResponseDescriptor;
pub use conversation_state::{ConversationState, Stage};
pub use intent::{classify, Intent};

/// Words that start the name-capture flow from [`Stage::Greeting`].
pub const GREETING_KEYWORDS: &[&str] = &["hola", "buenas", "hi"];

/// How a turn was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "intent")]
pub enum Route {
    /// Greeting recognized; the bot asked for a name.
    Greeted,
    /// The turn was taken as the user's name.
    NameCaptured,
    /// The keyword router handled the turn.
    Routed(Intent),
}

/// Result of processing one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub new_state: ConversationState,
    pub response: ResponseDescriptor,
    pub route: Route,
}

impl TurnResult {
    pub fn stage(&self) -> Stage {
        self.new_state.stage()
    }
}

fn is_greeting(folded: &str) -> bool {
    GREETING_KEYWORDS.iter().any(|keyword| folded.contains(keyword))
}

/// Processes one user utterance.
///
/// At most one stage transition happens per turn. The only randomness is the
/// choice among fallback replies, drawn from `rng`.
pub fn process_turn<R: Rng + ?Sized>(
    state: &ConversationState,
    utterance: &str,
    rng: &mut R,
) -> TurnResult {
    let result = match state.stage() {
        Stage::Greeting if state.user_name().is_none() && is_greeting(&utterance.to_lowercase()) => {
            TurnResult {
                new_state: state.with_stage(Stage::AskName),
                response: catalog::ask_name(),
                route: Route::Greeted,
            }
        }
        Stage::AskName => {
            let name = name::extract_name(utterance);
            let response = catalog::greet_user(&name);
            TurnResult {
                new_state: state.with_stage(Stage::MainMenu).with_name(name),
                response,
                route: Route::NameCaptured,
            }
        }
        // Greeting without a greeting keyword is routed too, so users can
        // skip the ritual; the stage stays put.
        Stage::Greeting | Stage::MainMenu => {
            let intent = classify(utterance);
            TurnResult {
                new_state: state.clone(),
                response: catalog::respond(intent, rng),
                route: Route::Routed(intent),
            }
        }
    };

    debug!(
        from = state.stage().as_str(),
        to = result.stage().as_str(),
        route = ?result.route,
        "processed turn"
    );

    result
}
