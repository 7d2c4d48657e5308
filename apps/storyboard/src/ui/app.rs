//! App shell: owns the session state and both ends of the backend bridge.

use crossbeam_channel::{Receiver, RecvError, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{SubmissionId, UiEvent},
    orchestration::{dispatch_backend_command, submit_recap},
    reducer::{FormField, RecapForm, StoryboardState},
};
use crate::ui::{render::render_view, view::derive_view};

pub const INTERACTIVE_HELP: &str = "commands: repo <owner/name> | since <YYYY-MM-DD> | until <YYYY-MM-DD> | token [value] | submit | show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Edit(FormField, String),
    Submit,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl InputCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let cmd = match word {
            "repo" => Self::Edit(FormField::Repo, rest.to_string()),
            "since" => Self::Edit(FormField::Since, rest.to_string()),
            "until" => Self::Edit(FormField::Until, rest.to_string()),
            "token" => Self::Edit(FormField::GithubToken, rest.to_string()),
            "submit" | "generate" => Self::Submit,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        };
        Some(cmd)
    }
}

pub struct StoryboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: StoryboardState,
}

impl StoryboardApp {
    pub fn new(form: RecapForm, cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: StoryboardState::with_form(form),
        }
    }

    pub fn state(&self) -> &StoryboardState {
        &self.state
    }

    pub fn ui_events(&self) -> &Receiver<UiEvent> {
        &self.ui_rx
    }

    pub fn submit(&mut self) -> SubmissionId {
        submit_recap(&mut self.state, &self.cmd_tx)
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        self.state.apply(event);
    }

    /// Applies every completion that has already arrived.
    pub fn process_ui_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
            applied += 1;
        }
        applied
    }

    /// Blocks until the state leaves `Loading`. There is no timeout: a hung
    /// backend call keeps this waiting.
    pub fn wait_until_settled(&mut self) -> Result<(), RecvError> {
        while self.state.is_loading() {
            let event = self.ui_rx.recv()?;
            self.state.apply(event);
        }
        Ok(())
    }

    /// Handles one interactive command. Returns `false` when the session
    /// should end.
    pub fn handle_input(&mut self, cmd: InputCommand, out: &mut String) -> bool {
        match cmd {
            InputCommand::Edit(field, value) => self.state.edit(field, value),
            InputCommand::Submit => {
                let id = self.submit();
                out.push_str(&format!("submitted #{id}\n"));
            }
            InputCommand::Show => out.push_str(&self.render()),
            InputCommand::Help => {
                out.push_str(INTERACTIVE_HELP);
                out.push('\n');
            }
            InputCommand::Quit => return false,
            InputCommand::Unknown(word) => {
                out.push_str(&format!("unknown command '{word}'\n{INTERACTIVE_HELP}\n"));
            }
        }
        true
    }

    pub fn render(&self) -> String {
        render_view(&derive_view(&self.state))
    }

    pub fn shutdown(&self) {
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Shutdown) {
            tracing::debug!("backend already stopped: {}", err.message());
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
