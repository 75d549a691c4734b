//! Kodo Labs site chatbot: a scripted dialogue engine and a terminal front end.

pub mod cli;
pub mod dialogue;
