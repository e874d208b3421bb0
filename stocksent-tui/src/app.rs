//! Application state: single-owner, main-thread only.

use std::collections::VecDeque;

use chrono::NaiveDateTime;

use stocksent_core::{AnalysisReport, PipelineError};

pub use stocksent_core::ErrorCategory;

/// Most recent errors kept for the history overlay.
pub const ERROR_HISTORY_CAP: usize = 50;

pub const FETCHING_MESSAGE: &str = "Fetching data and analyzing sentiment…";

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub offline: bool,

    // Query
    pub input: String,
    pub pending_query: Option<String>,
    pub report: Option<AnalysisReport>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(offline: bool) -> Self {
        Self {
            running: true,
            offline,
            input: String::new(),
            pending_query: None,
            report: None,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::Welcome,
        }
    }

    /// Queue the input box contents for the next loop iteration.
    pub fn submit_query(&mut self) {
        let query = self.input.trim();
        if query.is_empty() {
            self.set_warning("Enter a stock ticker or company name");
            return;
        }
        self.pending_query = Some(query.to_string());
        self.set_status(FETCHING_MESSAGE);
    }

    pub fn take_pending(&mut self) -> Option<String> {
        self.pending_query.take()
    }

    /// Record the result of one pipeline run.
    ///
    /// A failed run leaves the previous report on screen.
    pub fn apply_outcome(&mut self, query: &str, outcome: Result<AnalysisReport, PipelineError>) {
        match outcome {
            Ok(report) => {
                let mut msg = format!(
                    "Using Ticker: {} (match {})",
                    report.resolution.ticker, report.resolution.score
                );
                if report.headlines.is_empty() {
                    msg.push_str(" | No recent news found");
                    self.set_warning(msg);
                } else {
                    self.set_status(msg);
                }
                self.report = Some(report);
            }
            Err(e) => {
                self.push_error(e.category(), e.to_string(), format!("query: {query}"));
            }
        }
    }

    /// Push an error to the history, capping at [`ERROR_HISTORY_CAP`].
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocksent_core::{AppConfig, Pipeline, ProviderMode};

    fn offline_report(query: &str) -> Result<AnalysisReport, PipelineError> {
        Pipeline::from_config(&AppConfig::default(), ProviderMode::Offline)
            .unwrap()
            .with_as_of(chrono::NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
            .run(query)
    }

    #[test]
    fn starts_with_welcome() {
        let app = AppState::new(false);
        assert_eq!(app.overlay, Overlay::Welcome);
        assert!(app.running);
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = AppState::new(false);
        for i in 0..60 {
            app.push_error(ErrorCategory::Data, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), ERROR_HISTORY_CAP);
        assert!(app.error_history[0].message.contains("59"));
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Error);
    }

    #[test]
    fn blank_submit_warns_and_queues_nothing() {
        let mut app = AppState::new(false);
        app.input = "   ".into();
        app.submit_query();
        assert!(app.take_pending().is_none());
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Warning);
    }

    #[test]
    fn submit_queues_trimmed_query() {
        let mut app = AppState::new(false);
        app.input = "  Tesla ".into();
        app.submit_query();
        assert_eq!(app.status_message.as_ref().unwrap().0, FETCHING_MESSAGE);
        assert_eq!(app.take_pending().as_deref(), Some("Tesla"));
        assert!(app.take_pending().is_none());
    }

    #[test]
    fn successful_outcome_replaces_report() {
        let mut app = AppState::new(true);
        app.apply_outcome("AAPL", offline_report("AAPL"));
        let report = app.report.as_ref().unwrap();
        assert_eq!(report.resolution.ticker.as_str(), "AAPL");
        assert!(app.status_message.as_ref().unwrap().0.contains("Using Ticker: AAPL"));
    }

    #[test]
    fn failed_outcome_keeps_previous_report() {
        let mut app = AppState::new(true);
        app.apply_outcome("AAPL", offline_report("AAPL"));
        app.apply_outcome("zzzzzz", offline_report("zzzzzz"));
        assert!(app.report.is_some());
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Match);
        assert_eq!(app.error_history[0].context, "query: zzzzzz");
    }
}
