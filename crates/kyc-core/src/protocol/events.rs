//! Classification of messages posted by the embedded verification flow.
//!
//! The remote frame reports progress with loosely structured JSON
//! payloads. Two generations of the shape are in the wild:
//!
//! - **Modern**: `{"name": "ocr"|"facematch"|"redirect"|"sms-confirmation",
//!   "status": "success"|"error", "url"?: string}`
//! - **Legacy**: `{"type": "success"|"error", "name": string}` and the
//!   bare `{"name": "close-modal"}` control message.
//!
//! Rather than ad hoc field-presence checks at the dispatch site, the
//! payload is deserialized leniently into [`InboundMessage`] and then
//! classified into the [`Classified`] union. A payload that matches
//! neither generation becomes [`Classified::Unrecognized`] and is safely
//! ignored by the bridge.
//!
//! # Classification priority
//!
//! A payload is a modern [`StepEvent`] only when it carries a recognized
//! `name` AND lacks the legacy `type` tag. Anything else falls through
//! to the legacy shape — including payloads that carry both a modern
//! `name` and a legacy `type`, which existing host integrations expect
//! to be handled by the legacy checks.

use serde::Deserialize;
use serde_json::Value;

// ── Typed vocabulary ──────────────────────────────────────────────────────────

/// Event names of the modern message generation.
///
/// `close-modal` is deliberately NOT part of this set: it is a control
/// message, handled on the legacy path even by current frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventName {
    /// Document capture finished (one way or the other).
    Ocr,
    /// Selfie/face-match step finished.
    Facematch,
    /// The remote flow asks the host page to navigate elsewhere.
    Redirect,
    /// SMS confirmation step finished.
    SmsConfirmation,
}

impl EventName {
    /// The wire form, also what legacy callbacks receive.
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::Ocr => "ocr",
            EventName::Facematch => "facematch",
            EventName::Redirect => "redirect",
            EventName::SmsConfirmation => "sms-confirmation",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "ocr" => Some(EventName::Ocr),
            "facematch" => Some(EventName::Facematch),
            "redirect" => Some(EventName::Redirect),
            "sms-confirmation" => Some(EventName::SmsConfirmation),
            _ => None,
        }
    }
}

/// Outcome tag carried by both message generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Error,
}

impl EventStatus {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(EventStatus::Success),
            "error" => Some(EventStatus::Error),
            _ => None,
        }
    }
}

// ── Lenient wire shape ────────────────────────────────────────────────────────

/// The raw inbound payload, deserialized with every field optional.
///
/// Unknown extra fields are ignored; a payload that is not a JSON object
/// at all yields the all-`None` message (and therefore classifies as
/// unrecognized).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundMessage {
    /// Modern event name, or a legacy control name like `close-modal`.
    #[serde(default)]
    pub name: Option<String>,
    /// Legacy outcome tag. Its mere presence forces the legacy path.
    #[serde(default, rename = "type")]
    pub legacy_type: Option<String>,
    /// Modern outcome tag.
    #[serde(default)]
    pub status: Option<String>,
    /// Navigation target for `redirect` events.
    #[serde(default)]
    pub url: Option<String>,
}

impl InboundMessage {
    /// Lenient parse: any non-conforming value collapses to the empty
    /// message instead of an error. Inbound noise is expected and must
    /// never break the bridge.
    pub fn parse(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|_| {
            tracing::trace!("inbound payload is not an object, treating as unrecognized");
            Self::default()
        })
    }

    /// Classifies the payload per the priority rule described at module
    /// level.
    pub fn classify(&self) -> Classified {
        if self.legacy_type.is_none() {
            if let Some(name) = self.name.as_deref().and_then(EventName::parse) {
                return Classified::Step(StepEvent {
                    name,
                    status: self.status.as_deref().and_then(EventStatus::parse),
                    url: self.url.clone(),
                });
            }
        }

        let kind = self.legacy_type.as_deref().and_then(EventStatus::parse);
        let is_close = self.name.as_deref() == Some("close-modal");
        if kind.is_none() && !is_close {
            return Classified::Unrecognized;
        }
        Classified::Legacy(LegacyMessage {
            kind,
            name: self.name.clone(),
        })
    }
}

// ── Classified union ──────────────────────────────────────────────────────────

/// The typed result of classifying an inbound payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// A modern progress/redirect event.
    Step(StepEvent),
    /// A legacy-shaped message; the bridge runs all legacy checks on it
    /// unconditionally (fall-through preserved for old integrations).
    Legacy(LegacyMessage),
    /// Neither shape. Dropped without logging an error — noise from
    /// other frames is expected.
    Unrecognized,
}

/// A modern event from the embedded flow.
#[derive(Debug, Clone, PartialEq)]
pub struct StepEvent {
    pub name: EventName,
    pub status: Option<EventStatus>,
    pub url: Option<String>,
}

/// The actionable fields of a legacy-shaped message.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyMessage {
    /// Parsed legacy `type` tag, when present and recognized.
    pub kind: Option<EventStatus>,
    /// The raw `name` field (legacy callbacks receive it verbatim).
    pub name: Option<String>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
