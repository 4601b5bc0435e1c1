//! The form behind the generator: input, content type, submission and result.
//!
//! A submission that passes validation does not take effect immediately. It
//! yields a [`PendingCommit`] ticket that is completed after a short delay.
//! Every submission and every type change bumps a sequence number, and a ticket
//! whose number is no longer current is discarded on commit.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::content::ContentType;
use crate::error::{ExportError, GeneratorError, RenderError, SubmitError, ValidationError};
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::render::{self, RasterSurface};
use crate::validate::validate;

/// Snapshot of a validated submission, waiting to be committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCommit {
    seq: u64,
    payload: String,
    content_type: ContentType,
}

impl PendingCommit {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Trimmed input as it was when submitted.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// The form moved on since the submission; nothing changed.
    Stale,
}

pub struct Generator {
    config: Config,
    raw_input: String,
    committed_payload: Option<String>,
    selected_type: ContentType,
    is_generating: bool,
    validation_error: Option<ValidationError>,
    seq: u64,
    surface: Option<RasterSurface>,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            raw_input: String::new(),
            committed_payload: None,
            selected_type: ContentType::default(),
            is_generating: false,
            validation_error: None,
            seq: 0,
            surface: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn committed_payload(&self) -> Option<&str> {
        self.committed_payload.as_deref()
    }

    pub fn selected_type(&self) -> ContentType {
        self.selected_type
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    /// Replaces the input text. A shown error is cleared once the field is
    /// non-empty again; validation itself waits for the next submission.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.raw_input = value.into();
        if !self.raw_input.is_empty() {
            self.validation_error = None;
        }
    }

    /// Switches the content type and resets the form.
    pub fn select_type(&mut self, content_type: ContentType) {
        debug!(from = %self.selected_type, to = %content_type, "content type changed");
        self.selected_type = content_type;
        self.raw_input.clear();
        self.committed_payload = None;
        self.surface = None;
        self.validation_error = None;
        self.is_generating = false;
        self.seq += 1;
    }

    pub fn can_submit(&self) -> bool {
        !self.raw_input.is_empty() && !self.is_generating
    }

    /// Whether a result exists to export.
    pub fn can_export(&self) -> bool {
        self.surface.is_some()
    }

    /// Whether a key press should submit: only Enter, and only for single-line
    /// content types.
    pub fn key_submits(&self, is_enter: bool) -> bool {
        is_enter && self.selected_type.submits_on_enter()
    }

    /// Validates the current input and, on success, returns the ticket to
    /// complete with [`commit`](Self::commit) once the delay has passed.
    pub fn submit(&mut self) -> Result<PendingCommit, SubmitError> {
        if self.is_generating {
            return Err(SubmitError::Busy);
        }
        if let Err(e) = validate(&self.raw_input, self.selected_type) {
            debug!(error = %e, "submission rejected");
            self.validation_error = Some(e.clone());
            return Err(e.into());
        }

        self.validation_error = None;
        self.is_generating = true;
        self.seq += 1;
        debug!(seq = self.seq, "submission accepted");
        Ok(PendingCommit {
            seq: self.seq,
            payload: self.raw_input.trim().to_string(),
            content_type: self.selected_type,
        })
    }

    /// Completes a submission. Tickets issued before the latest submission or
    /// type change are ignored.
    pub fn commit(&mut self, pending: PendingCommit) -> Result<CommitOutcome, RenderError> {
        if pending.seq != self.seq || pending.content_type != self.selected_type {
            warn!(seq = pending.seq, current = self.seq, "discarding stale commit");
            return Ok(CommitOutcome::Stale);
        }

        self.is_generating = false;
        let surface = match render::render(&pending.payload, &self.config.render) {
            Ok(surface) => surface,
            Err(e) => {
                self.committed_payload = None;
                self.surface = None;
                return Err(e);
            }
        };
        info!(
            content_type = %pending.content_type,
            chars = pending.payload.chars().count(),
            modules = surface.module_width(),
            "qr code committed"
        );
        self.committed_payload = Some(pending.payload);
        self.surface = Some(surface);
        Ok(CommitOutcome::Committed)
    }

    /// Submits, waits the configured delay and commits.
    pub async fn generate(&mut self) -> Result<CommitOutcome, GeneratorError> {
        let pending = self.submit()?;
        tokio::time::sleep(self.config.commit_delay()).await;
        Ok(self.commit(pending)?)
    }

    /// Exports the current result. `Ok(None)` when nothing has been generated.
    pub fn export(&self, format: ExportFormat, date: NaiveDate) -> Result<Option<ExportArtifact>, ExportError> {
        export::export(self.surface.as_ref(), format, &self.config.export, date)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
