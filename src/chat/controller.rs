use log::{debug, warn};

use super::relay_client::PromptRelay;
use crate::models::message::Message;
use crate::models::prompt::{FailureKind, PromptResult};

pub const PLACEHOLDER_TEXT: &str = "Pensando...";
pub const SERVER_FAILURE_TEXT: &str = "Desculpe, ocorreu um erro no servidor.";
pub const COMMUNICATION_FAILURE_TEXT: &str = "Desculpe, falha na comunicação com o servidor.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    History,
}

/// Ticket for the single in-flight request. Resolving it replaces the
/// placeholder it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrompt {
    id: u64,
    placeholder: usize,
    prompt: String,
}

impl PendingPrompt {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Owns all chat UI state. Every change goes through one of the transition
/// methods below.
#[derive(Debug)]
pub struct ChatController {
    messages: Vec<Message>,
    input: String,
    /// Cursor position in chars, not bytes.
    cursor: usize,
    send_enabled: bool,
    focus: Focus,
    in_flight: Option<u64>,
    next_ticket: u64,
    scroll: u16,
    max_scroll: u16,
    follow_latest: bool,
    animation_frame: u8,
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatController {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            cursor: 0,
            send_enabled: true,
            focus: Focus::Input,
            in_flight: None,
            next_ticket: 0,
            scroll: 0,
            max_scroll: 0,
            follow_latest: true,
            animation_frame: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_send_enabled(&self) -> bool {
        self.send_enabled
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn follows_latest(&self) -> bool {
        self.follow_latest
    }

    pub fn animation_frame(&self) -> u8 {
        self.animation_frame
    }

    // Request lifecycle

    /// Sends whatever is in the input buffer.
    pub fn submit_input(&mut self) -> Option<PendingPrompt> {
        let raw = self.input.clone();
        self.begin_send(&raw)
    }

    /// Appends the user message and the placeholder, clears the input and
    /// disables sending. Returns `None` (and changes nothing) for blank input
    /// or while another request is in flight.
    pub fn begin_send(&mut self, raw_input: &str) -> Option<PendingPrompt> {
        if !self.send_enabled {
            debug!("Ignoring send while a request is in flight");
            return None;
        }

        let prompt = raw_input.trim();
        if prompt.is_empty() {
            return None;
        }

        self.messages.push(Message::user(prompt));
        self.input.clear();
        self.cursor = 0;
        self.send_enabled = false;
        self.messages.push(Message::placeholder(PLACEHOLDER_TEXT));

        let ticket = PendingPrompt {
            id: self.next_ticket,
            placeholder: self.messages.len() - 1,
            prompt: prompt.to_string(),
        };
        self.next_ticket += 1;
        self.in_flight = Some(ticket.id);
        self.animation_frame = 0;
        self.scroll_to_latest();

        Some(ticket)
    }

    /// Replaces the ticket's placeholder with the outcome and re-enables
    /// input. Stale or repeated tickets are ignored and return false.
    pub fn resolve(&mut self, ticket: &PendingPrompt, result: PromptResult) -> bool {
        if self.in_flight != Some(ticket.id) {
            warn!("Dropping result for stale request #{}", ticket.id);
            return false;
        }

        let text = match result {
            PromptResult::Success { text } => text,
            PromptResult::Failure { kind, message } => {
                warn!("Prompt failed ({:?}): {}", kind, message);
                match kind {
                    FailureKind::Transport => COMMUNICATION_FAILURE_TEXT.to_string(),
                    _ => SERVER_FAILURE_TEXT.to_string(),
                }
            }
        };

        let resolved = self
            .messages
            .get_mut(ticket.placeholder)
            .map(|message| message.resolve(text))
            .unwrap_or(false);
        if !resolved {
            warn!("Placeholder #{} was already resolved", ticket.placeholder);
        }

        self.in_flight = None;
        self.send_enabled = true;
        self.focus = Focus::Input;
        self.scroll_to_latest();
        resolved
    }

    /// Full send lifecycle against `relay`, awaiting the single call.
    pub async fn on_send<R>(&mut self, relay: &R, raw_input: &str)
    where
        R: PromptRelay + ?Sized,
    {
        if let Some(ticket) = self.begin_send(raw_input) {
            let result = relay.submit_prompt(ticket.prompt()).await;
            self.resolve(&ticket, result);
        }
    }

    // Input editing

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    // Focus and scrolling

    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::History,
            Focus::History => Focus::Input,
        };
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.focus = Focus::History;
        self.follow_latest = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.focus = Focus::History;
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
        if self.scroll == self.max_scroll {
            self.follow_latest = true;
        }
    }

    pub fn scroll_to_latest(&mut self) {
        self.follow_latest = true;
        self.scroll = self.max_scroll;
    }

    /// Called by the renderer once it knows how many lines overflow.
    pub fn update_viewport(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        if self.follow_latest {
            self.scroll = max_scroll;
        } else {
            self.scroll = self.scroll.min(max_scroll);
        }
    }

    pub fn tick(&mut self) {
        if self.is_waiting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Sender;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Relay double returning a canned result, or echoing the prompt.
    struct ScriptedRelay {
        reply: Option<PromptResult>,
        calls: AtomicUsize,
    }

    impl ScriptedRelay {
        fn echo() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn returning(reply: PromptResult) -> Self {
            Self {
                reply: Some(reply),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PromptRelay for ScriptedRelay {
        async fn submit_prompt(&self, prompt: &str) -> PromptResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .unwrap_or_else(|| PromptResult::success(prompt))
        }
    }

    fn texts(controller: &ChatController) -> Vec<(Sender, String)> {
        controller
            .messages()
            .iter()
            .map(|m| (m.sender(), m.text().to_string()))
            .collect()
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let relay = ScriptedRelay::echo();
        let mut controller = ChatController::new();

        for raw in ["", "   ", "\n\t"] {
            controller.on_send(&relay, raw).await;
        }

        assert!(controller.messages().is_empty());
        assert!(controller.is_send_enabled());
        assert_eq!(relay.calls(), 0);
    }

    #[tokio::test]
    async fn echo_round_trip_leaves_exactly_the_prompt() {
        let relay = ScriptedRelay::echo();
        let mut controller = ChatController::new();

        controller.on_send(&relay, "  X  ").await;

        assert_eq!(
            texts(&controller),
            vec![
                (Sender::User, "X".to_string()),
                (Sender::Assistant, "X".to_string())
            ]
        );
        assert_eq!(relay.calls(), 1);
        assert!(controller.messages().iter().all(|m| !m.is_pending()));
    }

    #[test]
    fn begin_send_runs_steps_in_order() {
        let mut controller = ChatController::new();
        for c in "O que é esquizofrenia?".chars() {
            controller.insert_char(c);
        }
        controller.toggle_focus();

        let ticket = controller.submit_input().unwrap();

        assert_eq!(ticket.prompt(), "O que é esquizofrenia?");
        assert_eq!(
            texts(&controller),
            vec![
                (Sender::User, "O que é esquizofrenia?".to_string()),
                (Sender::Assistant, PLACEHOLDER_TEXT.to_string())
            ]
        );
        assert!(controller.messages()[1].is_pending());
        assert_eq!(controller.input(), "");
        assert_eq!(controller.cursor(), 0);
        assert!(!controller.is_send_enabled());
        assert!(controller.is_waiting());
        assert!(controller.follows_latest());
    }

    #[test]
    fn second_send_while_waiting_is_a_no_op() {
        let mut controller = ChatController::new();
        let first = controller.begin_send("primeira").unwrap();

        assert!(controller.begin_send("segunda").is_none());
        assert_eq!(controller.messages().len(), 2);

        controller.resolve(&first, PromptResult::success("resposta"));
        assert!(controller.begin_send("segunda").is_some());
        assert_eq!(controller.messages().len(), 4);
    }

    #[test]
    fn scenario_success_restores_controls() {
        let mut controller = ChatController::new();
        let ticket = controller.begin_send("O que é esquizofrenia?").unwrap();
        controller.scroll_up(3);
        assert_eq!(controller.focus(), Focus::History);
        assert!(!controller.is_send_enabled());

        assert!(controller.resolve(
            &ticket,
            PromptResult::success("Um transtorno psicótico.\nCritério A...")
        ));

        assert_eq!(
            controller.messages()[1].text(),
            "Um transtorno psicótico.\nCritério A..."
        );
        assert!(controller.is_send_enabled());
        assert!(!controller.is_waiting());
        assert_eq!(controller.focus(), Focus::Input);
        assert!(controller.follows_latest());
    }

    #[tokio::test]
    async fn relay_failure_replaces_placeholder_with_fixed_text() {
        let relay = ScriptedRelay::returning(PromptResult::failure(
            FailureKind::Provider,
            "Erro interno na comunicação com a IA.",
        ));
        let mut controller = ChatController::new();

        controller.on_send(&relay, "pergunta").await;

        assert_eq!(controller.messages().len(), 2);
        assert_eq!(controller.messages()[1].text(), SERVER_FAILURE_TEXT);
        assert!(controller.is_send_enabled());
    }

    #[tokio::test]
    async fn transport_failure_uses_communication_text() {
        let relay = ScriptedRelay::returning(PromptResult::failure(
            FailureKind::Transport,
            "connection refused",
        ));
        let mut controller = ChatController::new();

        controller.on_send(&relay, "pergunta").await;

        assert_eq!(controller.messages()[1].text(), COMMUNICATION_FAILURE_TEXT);
        assert!(!controller
            .messages()
            .iter()
            .any(|m| m.text() == PLACEHOLDER_TEXT));
    }

    #[test]
    fn repeated_resolve_is_ignored() {
        let mut controller = ChatController::new();
        let ticket = controller.begin_send("pergunta").unwrap();

        assert!(controller.resolve(&ticket, PromptResult::success("primeira")));
        assert!(!controller.resolve(&ticket, PromptResult::success("segunda")));

        assert_eq!(controller.messages().len(), 2);
        assert_eq!(controller.messages()[1].text(), "primeira");
    }

    #[test]
    fn stale_ticket_does_not_touch_newer_placeholder() {
        let mut controller = ChatController::new();
        let old = controller.begin_send("um").unwrap();
        controller.resolve(&old, PromptResult::success("resposta um"));
        let current = controller.begin_send("dois").unwrap();

        assert!(!controller.resolve(&old, PromptResult::success("atrasada")));
        assert!(controller.messages()[3].is_pending());
        assert!(!controller.is_send_enabled());

        assert!(controller.resolve(&current, PromptResult::success("resposta dois")));
        assert_eq!(controller.messages()[1].text(), "resposta um");
        assert_eq!(controller.messages()[3].text(), "resposta dois");
    }

    #[test]
    fn input_editing_handles_multibyte_chars() {
        let mut controller = ChatController::new();
        for c in "ção".chars() {
            controller.insert_char(c);
        }
        controller.move_cursor_left();
        controller.backspace();
        assert_eq!(controller.input(), "ço");
        assert_eq!(controller.cursor(), 1);

        controller.move_cursor_home();
        controller.delete();
        assert_eq!(controller.input(), "o");

        controller.move_cursor_end();
        controller.move_cursor_right();
        assert_eq!(controller.cursor(), 1);
    }

    #[test]
    fn viewport_follows_latest_until_user_scrolls() {
        let mut controller = ChatController::new();
        controller.update_viewport(10);
        assert_eq!(controller.scroll(), 10);

        controller.scroll_up(4);
        controller.update_viewport(12);
        assert_eq!(controller.scroll(), 6);
        assert!(!controller.follows_latest());

        controller.scroll_down(100);
        assert_eq!(controller.scroll(), 12);
        assert!(controller.follows_latest());
    }

    #[test]
    fn tick_animates_only_while_waiting() {
        let mut controller = ChatController::new();
        controller.tick();
        assert_eq!(controller.animation_frame(), 0);

        controller.begin_send("pergunta").unwrap();
        controller.tick();
        controller.tick();
        assert_eq!(controller.animation_frame(), 2);
        controller.tick();
        assert_eq!(controller.animation_frame(), 0);
    }
}
