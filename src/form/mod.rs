//! Form controller: owns the submit lifecycle.
//!
//! ## Lifecycle of one `submit()`
//!   1. Enter `Submitting`: disable the button, show the loading indicator,
//!      hide any previous error.
//!   2. Snapshot the fields and send one request through the transport.
//!   3. `success: true` → open a blank window, write the returned HTML as its
//!      whole document, close it. No window → popup blocked.
//!      `success: false` → fail with the envelope's error text.
//!   4. Settle: show the failure (if any), re-enable the button, hide the
//!      loading indicator. Settling happens for every outcome.
//!
//! The view, window opener and transport are handed in at construction so
//! each can be swapped for a test double.

pub mod fields;

use crate::error::FormError;
use crate::models::{AnalyzeRequest, ResponseEnvelope, UiState};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use self::fields::FormFields;

// ── Seams ─────────────────────────────────────────────────────────────────────

/// The visible widgets the controller toggles.
pub trait FormView {
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_loading_visible(&mut self, visible: bool);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
}

/// A freshly opened, blank browsing context.
pub trait BrowsingContext {
    fn write(&mut self, html: &str) -> Result<(), FormError>;
    /// Finalise the document. Nothing may be written afterwards.
    fn close(&mut self) -> Result<(), FormError>;
}

pub trait WindowOpener {
    type Window: BrowsingContext;

    /// `None` when the environment refuses to open a window. `title` names
    /// the window; the controller passes the ticker.
    fn open_blank(&mut self, title: &str) -> Option<Self::Window>;
}

/// Swappable request path to the analysis endpoint.
#[async_trait]
pub trait AnalyzeTransport: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<ResponseEnvelope, FormError>;
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct FormController<V, O> {
    fields: FormFields,
    view: V,
    opener: O,
    transport: Arc<dyn AnalyzeTransport>,
    state: UiState,
}

impl<V, O> FormController<V, O>
where
    V: FormView,
    O: WindowOpener,
{
    pub fn new(fields: FormFields, view: V, opener: O, transport: Arc<dyn AnalyzeTransport>) -> Self {
        Self {
            fields,
            view,
            opener,
            transport,
            state: UiState::Idle,
        }
    }

    /// Page-load hook: seeds the end date.
    pub fn on_load(&mut self, today: NaiveDate) {
        self.fields.on_load(today);
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Field access for keystroke handlers (`on_ticker_input` etc.).
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Handle one form submission.
    ///
    /// The returned error has already been shown in the view; it is handed
    /// back so callers can react (exit codes, logging).
    pub async fn submit(&mut self) -> Result<(), FormError> {
        if self.state.is_submitting() {
            warn!("Submit ignored: previous request still in flight");
            return Err(FormError::Busy);
        }

        self.enter_submitting();

        let request = self.fields.snapshot();
        info!(
            "Submitting analysis for {} (end={:?}, lookback={}, crossover={})",
            request.ticker, request.end_date, request.lookback_days, request.crossover_days
        );

        let result = self.exchange(&request).await;
        self.settle(&result);
        result
    }

    fn enter_submitting(&mut self) {
        self.state = UiState::Submitting;
        self.view.set_submit_enabled(false);
        self.view.set_loading_visible(true);
        self.view.hide_error();
    }

    async fn exchange(&mut self, request: &AnalyzeRequest) -> Result<(), FormError> {
        let envelope = self.transport.analyze(request).await?;

        if !envelope.success {
            if let Some(tb) = &envelope.traceback {
                debug!("Server traceback:\n{}", tb);
            }
            return Err(FormError::rejected(envelope.error.as_deref()));
        }

        let html = envelope.html.unwrap_or_default();
        let mut window = self
            .opener
            .open_blank(&request.ticker)
            .ok_or(FormError::PopupBlocked)?;
        window.write(&html)?;
        window.close()?;

        debug!("Rendered {} bytes into new window", html.len());
        Ok(())
    }

    fn settle(&mut self, result: &Result<(), FormError>) {
        match result {
            Ok(()) => {
                info!("Analysis opened in new window");
                self.state = UiState::Idle;
            }
            Err(e) => {
                let message = e.to_string();
                // The view is what shows it to the user.
                debug!("Analysis failed: {}", message);
                self.view.show_error(&message);
                self.state = UiState::ErrorShown(message);
            }
        }

        self.view.set_submit_enabled(true);
        self.view.set_loading_visible(false);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
