//! Spam heuristics for contact submissions
//!
//! A detected signal does not produce an error response: the handler stores
//! the submission as spam and answers exactly as it would for a real one.

use std::fmt;

use super::ContactForm;

/// Minimum time between rendering the form and submitting it
pub const MIN_FILL_TIME_MS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamSignal {
    /// The hidden field was filled in
    Honeypot,
    /// Submitted `elapsed_ms` after the form rendered
    TooFast { elapsed_ms: i64 },
}

impl fmt::Display for SpamSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpamSignal::Honeypot => write!(f, "honeypot field filled"),
            SpamSignal::TooFast { elapsed_ms } => {
                write!(f, "submitted {}ms after render", elapsed_ms)
            }
        }
    }
}

/// Check the honeypot first, then fill time. A form without a start time
/// passes the timing check.
pub fn detect_spam(form: &ContactForm, now_ms: i64, min_fill_ms: i64) -> Option<SpamSignal> {
    if form.honeypot.as_deref().is_some_and(|h| !h.is_empty()) {
        return Some(SpamSignal::Honeypot);
    }

    let started = form.form_start_time?;
    let elapsed_ms = now_ms.saturating_sub(started);
    if elapsed_ms < min_fill_ms {
        return Some(SpamSignal::TooFast { elapsed_ms });
    }

    None
}
