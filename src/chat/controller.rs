use super::simulator::{ReplyPicker, ResponseSimulator};
use super::{ChatError, Message, MessageLog, Role};
use crate::flight::SingleFlight;
use std::sync::Mutex;
use std::time::Duration;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Where chat messages are drawn. Rendering never fails.
pub trait MessagePanel: Send + Sync {
    fn render(&self, message: &Message);
    fn clear_input(&self);
    fn scroll_to_latest(&self);
}

pub struct ChatController<V, P> {
    panel: V,
    simulator: ResponseSimulator<P>,
    log: Mutex<MessageLog>,
    reply_delay: Duration,
    flight: SingleFlight,
}

impl<V: MessagePanel, P: ReplyPicker> ChatController<V, P> {
    pub fn new(panel: V, picker: P, reply_delay: Duration) -> Self {
        Self {
            panel,
            simulator: ResponseSimulator::new(picker),
            log: Mutex::new(MessageLog::default()),
            reply_delay,
            flight: SingleFlight::default(),
        }
    }

    /// Appends the user's message, waits out the reply delay, then appends a
    /// canned bot reply. Blank input is ignored and yields `Ok(None)`.
    pub async fn submit_user_message(&self, text: &str) -> Result<Option<Message>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let _permit = self.flight.try_begin().ok_or(ChatError::Busy)?;
        log::debug!("chat: user message ({} chars)", text.chars().count());

        let user = Message::new(Role::User, text);
        self.append(&user);
        self.panel.clear_input();
        self.panel.scroll_to_latest();

        tokio::time::sleep(self.reply_delay).await;

        let bot = Message::new(Role::Bot, self.simulator.reply_to(text));
        self.append(&bot);
        self.panel.scroll_to_latest();
        Ok(Some(bot))
    }

    pub fn history(&self) -> Vec<Message> {
        self.lock_log().messages().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock_log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_log().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    fn append(&self, message: &Message) {
        self.lock_log().push(message.clone());
        self.panel.render(message);
    }

    fn lock_log(&self) -> std::sync::MutexGuard<'_, MessageLog> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }
}
