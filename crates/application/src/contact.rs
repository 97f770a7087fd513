//! Contact form submission state machine.
//!
//! `Editing -> Submitting -> (submitted | failed) -> Editing`. The submit
//! control is disabled while a submission is in flight. A successful
//! submission clears the fields, unless they were edited while the message
//! was in flight, and shows a banner that expires after
//! [`SUCCESS_BANNER_TTL`]; a failed one keeps the fields and shows the
//! server's message until the next edit or submission.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use folio_domain::{ContactAcknowledgement, ContactField, ContactSubmission, DomainError};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ports::{ApiError, Clock, PortfolioApi};
use crate::render::Block;

/// How long the success banner stays visible.
pub const SUCCESS_BANNER_TTL: TimeDelta = TimeDelta::seconds(5);

/// Banner text after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

/// Banner text when the server gave no reason for a failure.
pub const GENERIC_SUBMIT_MESSAGE: &str = "Oops! Something went wrong. Please try again later.";

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Accepting edits; the submit control is enabled.
    #[default]
    Editing,
    /// A submission is in flight; the submit control is disabled.
    Submitting,
}

/// Banner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// Submission accepted.
    Success,
    /// Submission rejected or failed.
    Error,
}

/// Feedback shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Banner style.
    pub kind: BannerKind,
    /// Banner text.
    pub message: String,
    /// When the banner disappears on its own, if ever.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Banner {
    fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A field is missing or malformed; nothing was sent.
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// A submission is already in flight.
    #[error("a submission is already in progress")]
    InFlight,

    /// The API call failed.
    #[error("{0}")]
    Api(#[from] ApiError),
}

#[derive(Default)]
struct FormState {
    fields: ContactSubmission,
    phase: FormPhase,
    banner: Option<Banner>,
}

/// The contact form.
///
/// Methods take `&self` so the form can be observed while a submission is
/// awaiting the API.
pub struct ContactForm {
    api: Arc<dyn PortfolioApi>,
    clock: Arc<dyn Clock>,
    state: Mutex<FormState>,
}

impl ContactForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new(api: Arc<dyn PortfolioApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            state: Mutex::new(FormState::default()),
        }
    }

    /// Updates one field. Clears a pending error banner.
    pub fn set_field(&self, field: ContactField, value: impl Into<String>) {
        let mut state = self.state.lock();
        state.fields.set(field, value);
        if state
            .banner
            .as_ref()
            .is_some_and(|banner| banner.kind == BannerKind::Error)
        {
            state.banner = None;
        }
    }

    /// Current field values.
    #[must_use]
    pub fn fields(&self) -> ContactSubmission {
        self.state.lock().fields.clone()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.state.lock().phase
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase() == FormPhase::Submitting
    }

    /// Returns true when the submit control accepts clicks.
    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        self.phase() == FormPhase::Editing
    }

    /// The banner visible right now, if any.
    #[must_use]
    pub fn banner(&self) -> Option<Banner> {
        let now = self.clock.now();
        self.state
            .lock()
            .banner
            .as_ref()
            .filter(|banner| banner.is_visible_at(now))
            .cloned()
    }

    /// Validates and sends the form.
    ///
    /// # Errors
    ///
    /// Returns `Validation` without contacting the API when a field is
    /// missing or malformed, `InFlight` when another submission is pending,
    /// and `Api` when the call failed. In every case the form is back in
    /// `Editing` when this returns.
    pub async fn submit(&self) -> Result<ContactAcknowledgement, SubmitError> {
        let submission = {
            let mut state = self.state.lock();
            if state.phase == FormPhase::Submitting {
                return Err(SubmitError::InFlight);
            }
            state.fields.validate()?;
            state.phase = FormPhase::Submitting;
            state.banner = None;
            state.fields.clone()
        };

        let result = self.api.submit_contact(&submission).await;
        let now = self.clock.now();

        let mut state = self.state.lock();
        state.phase = FormPhase::Editing;
        match result {
            Ok(ack) => {
                info!("contact message sent");
                // Edits typed while the message was in flight survive.
                if state.fields == submission {
                    state.fields.clear();
                } else {
                    debug!("fields edited during submission, keeping them");
                }
                state.banner = Some(Banner {
                    kind: BannerKind::Success,
                    message: ack
                        .message
                        .clone()
                        .unwrap_or_else(|| SUCCESS_MESSAGE.to_string()),
                    expires_at: Some(now + SUCCESS_BANNER_TTL),
                });
                Ok(ack)
            }
            Err(error) => {
                warn!(%error, "contact submission failed");
                state.banner = Some(Banner {
                    kind: BannerKind::Error,
                    message: error
                        .server_message()
                        .unwrap_or(GENERIC_SUBMIT_MESSAGE)
                        .to_string(),
                    expires_at: None,
                });
                Err(error.into())
            }
        }
    }

    /// Renders the banner, one input per field and the submit button.
    #[must_use]
    pub fn render(&self) -> Vec<Block> {
        let banner = self.banner();
        let state = self.state.lock();

        let mut blocks = vec![Block::Heading {
            level: 1,
            text: "Contact Me".to_string(),
        }];
        if let Some(banner) = banner {
            blocks.push(Block::Banner {
                kind: banner.kind,
                text: banner.message,
            });
        }
        blocks.extend(ContactField::ALL.iter().map(|field| Block::Input {
            field: *field,
            value: state.fields.get(*field).to_string(),
        }));
        blocks.push(Block::Button {
            label: if state.phase == FormPhase::Submitting {
                "Sending...".to_string()
            } else {
                "Send Message".to_string()
            },
            enabled: state.phase == FormPhase::Editing,
        });
        blocks
    }
}
