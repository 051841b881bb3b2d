//! The user-facing side of the application, as seen by the core.
//!
//! Dialogs and prompts are behind [`Presentation`]. A desktop shell
//! implements it with real dialogs; [`HeadlessPresentation`] logs and gives
//! conservative answers; [`ScriptedPresentation`] replays canned answers and
//! records what was shown.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Collaborator for messages and prompts.
pub trait Presentation {
    fn show_info(&self, message: &str, title: &str);

    fn show_error(&self, message: &str);

    /// Ask a yes/no question. `None` means the user cancelled.
    fn confirm_or_cancel(&self, question: &str, title: &str) -> Option<bool>;

    /// Ask where to save something. `None` means no file was chosen.
    fn save_as(&self, title: &str, extension: &str, default: Option<&Path>) -> Option<PathBuf>;
}

/// Presentation without a user: logs messages, answers "no", picks no file.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessPresentation;

impl Presentation for HeadlessPresentation {
    fn show_info(&self, message: &str, title: &str) {
        tracing::info!("{title}: {message}");
    }

    fn show_error(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn confirm_or_cancel(&self, question: &str, _title: &str) -> Option<bool> {
        tracing::debug!("Answering 'no' to: {question}");
        Some(false)
    }

    fn save_as(&self, title: &str, _extension: &str, _default: Option<&Path>) -> Option<PathBuf> {
        tracing::debug!("No file chosen for: {title}");
        None
    }
}

/// Something shown through a [`ScriptedPresentation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shown {
    Info { title: String, message: String },
    Error(String),
    Question(String),
    SaveAs(String),
}

/// Replays queued answers and records every interaction.
///
/// When the queues run dry, confirmations answer `Some(false)` and save
/// prompts return `None`.
#[derive(Debug, Default)]
pub struct ScriptedPresentation {
    answers: RefCell<VecDeque<Option<bool>>>,
    files: RefCell<VecDeque<Option<PathBuf>>>,
    shown: RefCell<Vec<Shown>>,
}

impl ScriptedPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next confirmation.
    pub fn answer(self, answer: Option<bool>) -> Self {
        self.answers.borrow_mut().push_back(answer);
        self
    }

    /// Queue the result of the next save prompt.
    pub fn choose_file(self, file: Option<PathBuf>) -> Self {
        self.files.borrow_mut().push_back(file);
        self
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.shown.borrow().clone()
    }

    pub fn infos(&self) -> Vec<(String, String)> {
        self.shown
            .borrow()
            .iter()
            .filter_map(|s| match s {
                Shown::Info { title, message } => Some((title.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.shown
            .borrow()
            .iter()
            .filter_map(|s| match s {
                Shown::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Presentation for ScriptedPresentation {
    fn show_info(&self, message: &str, title: &str) {
        self.shown.borrow_mut().push(Shown::Info {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn show_error(&self, message: &str) {
        self.shown.borrow_mut().push(Shown::Error(message.to_string()));
    }

    fn confirm_or_cancel(&self, question: &str, _title: &str) -> Option<bool> {
        self.shown
            .borrow_mut()
            .push(Shown::Question(question.to_string()));
        self.answers.borrow_mut().pop_front().unwrap_or(Some(false))
    }

    fn save_as(&self, title: &str, _extension: &str, _default: Option<&Path>) -> Option<PathBuf> {
        self.shown.borrow_mut().push(Shown::SaveAs(title.to_string()));
        self.files.borrow_mut().pop_front().flatten()
    }
}
