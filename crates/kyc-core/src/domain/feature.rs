//! Viewport-driven feature selection.
//!
//! The remote service exposes two sub-flows: `ocr` (the device's own
//! camera captures the document — only viable on handhelds) and
//! `qr-code` (a desktop screen shows a QR code that hands the capture
//! off to a phone). Which one the iframe loads is decided purely by the
//! viewport width at the moment the modal opens, and re-decided on every
//! resize while it is open.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Viewport width (logical pixels) at which the widget switches from the
/// handheld capture flow to the desktop QR handoff.
///
/// The initial-open decision and the resize handler MUST share this
/// constant; two thresholds would let the iframe oscillate between
/// features on widths in the gap.
pub const FEATURE_BREAKPOINT_PX: u32 = 845;

/// The remote verification sub-flow selected by device class.
///
/// The serialized form is the path segment of the iframe URL:
/// `{app_url}/{feature}/{token}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// Handheld document capture via the device camera.
    Ocr,
    /// Desktop handoff: show a QR code that moves the flow to a phone.
    QrCode,
}

impl Feature {
    /// Selects the feature for a viewport width.
    ///
    /// Widths below [`FEATURE_BREAKPOINT_PX`] get [`Feature::Ocr`];
    /// everything else gets [`Feature::QrCode`]. Boundary: 844 → `Ocr`,
    /// 845 → `QrCode`.
    pub fn for_width(width: u32) -> Self {
        if width < FEATURE_BREAKPOINT_PX {
            Feature::Ocr
        } else {
            Feature::QrCode
        }
    }

    /// The URL path segment for this feature.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Ocr => "ocr",
            Feature::QrCode => "qr-code",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_viewport_selects_ocr() {
        assert_eq!(Feature::for_width(0), Feature::Ocr);
        assert_eq!(Feature::for_width(320), Feature::Ocr);
        assert_eq!(Feature::for_width(844), Feature::Ocr);
    }

    #[test]
    fn test_wide_viewport_selects_qr_code() {
        assert_eq!(Feature::for_width(845), Feature::QrCode);
        assert_eq!(Feature::for_width(1920), Feature::QrCode);
        assert_eq!(Feature::for_width(u32::MAX), Feature::QrCode);
    }

    #[test]
    fn test_boundary_sits_exactly_at_the_breakpoint() {
        // 844 → ocr, 845 → qr-code. Both paths read the same constant.
        assert_eq!(Feature::for_width(FEATURE_BREAKPOINT_PX - 1), Feature::Ocr);
        assert_eq!(Feature::for_width(FEATURE_BREAKPOINT_PX), Feature::QrCode);
    }

    #[test]
    fn test_path_segment_strings() {
        assert_eq!(Feature::Ocr.as_str(), "ocr");
        assert_eq!(Feature::QrCode.as_str(), "qr-code");
        assert_eq!(Feature::QrCode.to_string(), "qr-code");
    }

    #[test]
    fn test_serde_uses_kebab_case_tags() {
        assert_eq!(serde_json::to_string(&Feature::QrCode).unwrap(), r#""qr-code""#);
        let f: Feature = serde_json::from_str(r#""ocr""#).unwrap();
        assert_eq!(f, Feature::Ocr);
    }
}
