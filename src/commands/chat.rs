use crate::chat::controller::{ChatController, MessagePanel};
use crate::chat::simulator::RandomPicker;
use crate::chat::{ChatError, Message};
use tauri::{AppHandle, Emitter, State};

pub type DesktopChat = ChatController<EventPanel, RandomPicker>;

/// Draws the chat panel by emitting events to the webview.
pub struct EventPanel {
    app: AppHandle,
}

impl EventPanel {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl MessagePanel for EventPanel {
    fn render(&self, message: &Message) {
        let _ = self.app.emit("chat://message", message);
    }

    fn clear_input(&self) {
        let _ = self.app.emit("chat://clear-input", ());
    }

    fn scroll_to_latest(&self) {
        let _ = self.app.emit("chat://scroll", ());
    }
}

#[tauri::command]
pub async fn submit_user_message(
    chat: State<'_, DesktopChat>,
    text: String,
) -> Result<Option<Message>, ChatError> {
    chat.submit_user_message(&text).await
}

#[tauri::command]
pub fn get_history(chat: State<'_, DesktopChat>) -> Vec<Message> {
    chat.history()
}
