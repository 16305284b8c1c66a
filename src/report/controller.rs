use super::{ReportClient, ReportError, ReportResult};
use crate::flight::SingleFlight;
use serde::Serialize;
use std::sync::Mutex;

pub const PENDING_STATUS: &str = "Generating report...";

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DocumentLink {
    pub href: String,
    pub label: String,
}

/// What the result region shows after a successful request.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResultPanel {
    pub heading: String,
    pub link: DocumentLink,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_preview: Option<String>,
}

impl From<&ReportResult> for ResultPanel {
    fn from(result: &ReportResult) -> Self {
        let label = match &result.file_name {
            Some(name) => format!("Download {name}"),
            None => "Download report".to_string(),
        };
        Self {
            heading: format!("Report ready for: {}", result.question),
            link: DocumentLink {
                href: result.document_url.clone(),
                label,
            },
            generated_at: result.generated_at_utc.clone(),
            summary_preview: result.summary_preview.clone(),
        }
    }
}

/// The research form: submit control, status region, result region.
pub trait ReportView: Send + Sync {
    fn alert(&self, message: &str);
    fn set_submit_enabled(&self, enabled: bool);
    fn show_status(&self, text: &str);
    fn show_result(&self, panel: &ResultPanel);
    fn clear_result(&self);
}

/// Re-enables the submit control when dropped, including on cancellation.
/// A request dropped before it settled also clears the pending status.
struct SubmitControl<'a, V: ReportView> {
    view: &'a V,
    settled: bool,
}

impl<'a, V: ReportView> SubmitControl<'a, V> {
    fn disable(view: &'a V) -> Self {
        view.set_submit_enabled(false);
        Self {
            view,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl<V: ReportView> Drop for SubmitControl<'_, V> {
    fn drop(&mut self) {
        if !self.settled {
            self.view.show_status("");
        }
        self.view.set_submit_enabled(true);
    }
}

pub struct ReportController<V> {
    view: V,
    client: Mutex<ReportClient>,
    flight: SingleFlight,
}

impl<V: ReportView> ReportController<V> {
    pub fn new(view: V, client: ReportClient) -> Self {
        Self {
            view,
            client: Mutex::new(client),
            flight: SingleFlight::default(),
        }
    }

    /// Takes effect from the next submission.
    pub fn set_client(&self, client: ReportClient) {
        *self.client.lock().unwrap_or_else(|e| e.into_inner()) = client;
    }

    pub fn endpoint(&self) -> String {
        self.current_client().endpoint().to_string()
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    pub async fn submit_question(&self, text: &str) -> Result<ReportResult, ReportError> {
        let question = text.trim();
        if question.is_empty() {
            let err = ReportError::EmptyQuestion;
            self.view.alert(&err.to_string());
            return Err(err);
        }
        let _permit = self.flight.try_begin().ok_or(ReportError::Busy)?;
        let mut control = SubmitControl::disable(&self.view);

        self.view.clear_result();
        self.view.show_status(PENDING_STATUS);

        let client = self.current_client();
        log::debug!("report: requesting {} for {:?}", client.endpoint(), question);

        let outcome = client.generate(question).await;
        match &outcome {
            Ok(result) => {
                self.view.show_status("");
                self.view.show_result(&ResultPanel::from(result));
            }
            Err(err) => {
                if let ReportError::Status {
                    status,
                    detail: Some(detail),
                    ..
                } = err
                {
                    log::warn!("report: endpoint returned {status}: {detail}");
                } else {
                    log::warn!("report: request failed: {err}");
                }
                self.view.show_status(&format!("Error: {err}"));
            }
        }
        control.settle();
        outcome
    }

    fn current_client(&self) -> ReportClient {
        self.client.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
