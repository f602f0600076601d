use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One entry of the chat history. Only the controller can mutate a message,
/// and only to resolve its placeholder.
#[derive(Debug, Clone)]
pub struct Message {
    text: String,
    sender: Sender,
    rendered_at: DateTime<Local>,
    pending: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, false)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Assistant, false)
    }

    pub(crate) fn placeholder(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Assistant, true)
    }

    fn new(text: impl Into<String>, sender: Sender, pending: bool) -> Self {
        Self {
            text: text.into(),
            sender,
            rendered_at: Local::now(),
            pending,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn rendered_at(&self) -> DateTime<Local> {
        self.rendered_at
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns false if the message was not a pending placeholder.
    pub(crate) fn resolve(&mut self, text: impl Into<String>) -> bool {
        if !self.pending {
            return false;
        }
        self.text = text.into();
        self.pending = false;
        true
    }
}
