use crate::report::controller::{ReportController, ReportView, ResultPanel};
use crate::report::{ReportError, ReportResult};
use tauri::{AppHandle, Emitter, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tauri_plugin_opener::OpenerExt;

pub type DesktopReport = ReportController<EventReportView>;

pub struct EventReportView {
    app: AppHandle,
}

impl EventReportView {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ReportView for EventReportView {
    fn alert(&self, message: &str) {
        self.app
            .dialog()
            .message(message)
            .kind(MessageDialogKind::Warning)
            .title("Research Desk")
            .show(|_| {});
    }

    fn set_submit_enabled(&self, enabled: bool) {
        let _ = self.app.emit("report://submit-enabled", enabled);
    }

    fn show_status(&self, text: &str) {
        let _ = self.app.emit("report://status", text);
    }

    fn show_result(&self, panel: &ResultPanel) {
        let _ = self.app.emit("report://result", panel);
    }

    fn clear_result(&self) {
        let _ = self.app.emit("report://result", Option::<ResultPanel>::None);
    }
}

#[tauri::command]
pub async fn submit_question(
    report: State<'_, DesktopReport>,
    question: String,
) -> Result<ReportResult, ReportError> {
    report.submit_question(&question).await
}

#[tauri::command]
pub fn open_document(app: AppHandle, url: String) -> Result<(), String> {
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| e.to_string())
}
