pub mod config;
pub mod pacing;
pub mod prompt;
pub mod render;

use std::io::Write;
use std::process::ExitCode;

use config::{ChatConfig, OutputMode};
use crossterm::style::{style, Stylize};
use crossterm::{cursor, execute, terminal};
use eyre::Result;
use pacing::Pacing;
use prompt::generate_prompt;
use rand::rngs::StdRng;
use render::{Renderer, Sender};
use rustyline::error::ReadlineError;
use tracing::{debug, info, warn};

use crate::dialogue::{self, catalog, ConversationState, ResponseDescriptor};

const WELCOME_TEXT: &str = "
Kodo Labs chat. Type your question, or a number to pick one of the options.

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
Kodo Labs chat

/reset        Start a new conversation
/status       Show the conversation stage and captured name
/help         Show this help dialogue
/quit         Quit the application

{number}      Send the option with that number from the last bot message
";

const TYPING_TEXT: &str = "Kodo está escribiendo...";

pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    conversation_state: ConversationState,
    renderer: Renderer,
    pacing: Box<dyn Pacing>,
    rng: StdRng,
    quick_replies: Vec<String>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        config: &ChatConfig,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            conversation_state: ConversationState::new(),
            renderer: Renderer::new(config.output),
            pacing: config.pacing(),
            rng: config.rng(),
            quick_replies: Vec::new(),
        }
    }

    pub fn conversation_state(&self) -> &ConversationState {
        &self.conversation_state
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        // Handle non-interactive mode (single turn on a fresh session)
        if let Some(input) = self.input.take() {
            self.handle_input(&input).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.print_welcome()?;
            self.open_session()?;
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        if self.renderer.mode() != OutputMode::Json {
            writeln!(self.output, "{}", WELCOME_TEXT)?;
        }
        Ok(())
    }

    /// Sends the welcome message that opens every session.
    pub fn open_session(&mut self) -> Result<()> {
        info!("chat session opened");
        self.deliver(&catalog::welcome())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(None);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        self.notice(&format!("Error: {}", e))?;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    self.notice(&format!("Error: {}", e))?;
                    break;
                }
            }
        }

        info!("chat session closed");
        Ok(())
    }

    pub async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "" => {}
            "/help" => {
                self.notice(HELP_TEXT)?;
            }
            "/reset" => {
                self.conversation_state = ConversationState::new();
                self.quick_replies.clear();
                self.notice("Conversation reset.")?;
                self.open_session()?;
            }
            "/status" => {
                let state = &self.conversation_state;
                let status = format!(
                    "stage: {} | name: {}",
                    state.stage().as_str(),
                    state.user_name().unwrap_or("-")
                );
                self.notice(&status)?;
            }
            text => match self.quick_reply(text) {
                Some(label) => {
                    self.echo(&label)?;
                    self.submit_utterance(&label).await?;
                }
                None => {
                    if self.renderer.mode() == OutputMode::Json {
                        self.echo(text)?;
                    }
                    self.submit_utterance(text).await?;
                }
            },
        }

        Ok(())
    }

    /// Runs one user turn through the engine and renders the reply.
    ///
    /// Blank text is ignored; nothing reaches the engine.
    pub async fn submit_utterance(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let turn = dialogue::process_turn(&self.conversation_state, text, &mut self.rng);
        info!(
            target: "kodo_chat::analytics",
            route = ?turn.route,
            stage = turn.stage().as_str(),
            "chatbot_interaction"
        );

        self.conversation_state = turn.new_state;
        self.quick_replies = turn.response.quick_replies.clone();

        // The turn is already applied; a broken indicator only loses the pause.
        if let Err(e) = self.show_typing().await {
            warn!("typing indicator failed: {}", e);
        }

        self.renderer
            .render_message(self.output.as_mut(), &turn.response, Sender::Bot)
    }

    /// Label of the chip the user picked by number, if `text` is one.
    ///
    /// Only plain chip numbers count: `+1` or `01` stay literal text.
    fn quick_reply(&self, text: &str) -> Option<String> {
        if text.starts_with('0') || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index = text.parse::<usize>().ok()?.checked_sub(1)?;
        self.quick_replies.get(index).cloned()
    }

    fn echo(&mut self, text: &str) -> Result<()> {
        self.renderer
            .render_message(self.output.as_mut(), &ResponseDescriptor::text(text), Sender::User)
    }

    fn deliver(&mut self, response: &ResponseDescriptor) -> Result<()> {
        self.quick_replies = response.quick_replies.clone();
        self.renderer
            .render_message(self.output.as_mut(), response, Sender::Bot)
    }

    /// Front-end notices (help, status, errors) that are not part of the dialogue.
    fn notice(&mut self, text: &str) -> Result<()> {
        self.renderer
            .render_message(self.output.as_mut(), &ResponseDescriptor::text(text), Sender::System)
    }

    async fn show_typing(&mut self) -> Result<()> {
        let delay = self.pacing.next_delay();
        if delay.is_zero() {
            return Ok(());
        }
        debug!(delay_ms = delay.as_millis() as u64, "typing");

        let indicator = self.renderer.mode() == OutputMode::Styled;
        let output = &mut self.output;
        if indicator {
            write!(output, "{}", style(TYPING_TEXT).dim().italic())?;
            output.flush()?;
        }

        tokio::time::sleep(delay).await;

        if indicator {
            execute!(
                output,
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::CurrentLine)
            )?;
        }
        Ok(())
    }
}
