//! Simulated journal analysis.
//!
//! A request immediately reports [`AnalysisStatus::Analyzing`] and switches to
//! [`AnalysisStatus::InsightReady`] with [`CANNED_INSIGHT`] once the delay has
//! elapsed. The input text only has to be non-blank; it does not influence the
//! insight.

use crate::error::{require_non_blank, Result};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const ANALYZING_PLACEHOLDER: &str = "Analyzing your thoughts... 🧠";

pub const CANNED_INSIGHT: &str = "Your feelings show you are reflective. Remember, it’s okay to feel down sometimes. Try some self-care today!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    Idle,
    Analyzing,
    InsightReady(String),
}

impl AnalysisStatus {
    /// Text shown in the insight panel. Empty while idle.
    pub fn display_text(&self) -> &str {
        match self {
            AnalysisStatus::Idle => "",
            AnalysisStatus::Analyzing => ANALYZING_PLACEHOLDER,
            AnalysisStatus::InsightReady(insight) => insight,
        }
    }

    pub fn insight(&self) -> Option<&str> {
        match self {
            AnalysisStatus::InsightReady(insight) => Some(insight),
            _ => None,
        }
    }
}

/// A pending or finished analysis. Dropping the handle cancels the timer.
pub struct AnalysisHandle {
    status: watch::Receiver<AnalysisStatus>,
    task: JoinHandle<()>,
}

/// Starts a simulated analysis of `text`. Must be called within a tokio runtime.
pub fn request_analysis(text: &str, delay: Duration) -> Result<AnalysisHandle> {
    require_non_blank("text", text)?;

    let (tx, rx) = watch::channel(AnalysisStatus::Analyzing);
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(AnalysisStatus::InsightReady(CANNED_INSIGHT.to_string())).is_err() {
            log::debug!("Analysis finished after its handle was dropped");
        }
    });
    log::debug!("Analysis requested, insight due in {:?}", delay);

    Ok(AnalysisHandle { status: rx, task })
}

impl AnalysisHandle {
    pub fn status(&self) -> AnalysisStatus {
        self.status.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.status.borrow(), AnalysisStatus::InsightReady(_))
    }

    /// Waits for the insight.
    pub async fn insight(mut self) -> Option<String> {
        let status = self
            .status
            .wait_for(|s| matches!(s, AnalysisStatus::InsightReady(_)))
            .await
            .ok()?;
        status.insight().map(str::to_string)
    }
}

impl Drop for AnalysisHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
