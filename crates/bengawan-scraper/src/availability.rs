//! Seat availability classification.
//!
//! The booking page shows a short Indonesian phrase per listing ("Tersedia",
//! "Sisa 4 kursi", "Habis"). [`classify_seat_text`] walks [`SEAT_RULES`] top
//! to bottom and returns the outcome of the first rule that matches.

use std::sync::LazyLock;

use regex::Regex;

static SEAT_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<small class="form-text sisa-kursi">([^<]+)</small>"#)
        .expect("valid seat text regex")
});

/// Availability of the target train as shown on its listing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityStatus {
    /// Seats can be booked; carries the detail shown next to the status.
    Available(String),
    SoldOut,
    /// No recognised keyword, or no seat text at all.
    Unknown,
}

impl AvailabilityStatus {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Human-readable status used in logs and in `status_text`.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self {
            Self::Available(detail) => format!("AVAILABLE ({detail})"),
            Self::SoldOut => "Habis / Sold Out".to_string(),
            Self::Unknown => "Sold Out".to_string(),
        }
    }
}

struct SeatRule {
    matches: fn(&str) -> bool,
    outcome: fn(&str) -> AvailabilityStatus,
}

// Order is significant: "habis" beats everything, and the broad "tersedia"
// is checked before the remaining-seat count.
const SEAT_RULES: &[SeatRule] = &[
    SeatRule {
        matches: |lower| lower.contains("habis"),
        outcome: |_| AvailabilityStatus::SoldOut,
    },
    SeatRule {
        matches: |lower| lower.contains("tersedia"),
        outcome: |_| AvailabilityStatus::Available("Many Seats".to_string()),
    },
    SeatRule {
        matches: |lower| lower.contains("sisa") && lower.contains("kursi"),
        outcome: |raw| AvailabilityStatus::Available(raw.to_string()),
    },
];

/// Returns the trimmed seat-count text of a listing card, if present.
#[must_use]
pub fn seat_text(card_html: &str) -> Option<&str> {
    SEAT_TEXT_RE
        .captures(card_html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|text| !text.is_empty())
}

/// Classifies raw seat-count text; `None` means the card had no seat text.
#[must_use]
pub fn classify_seat_text(raw: Option<&str>) -> AvailabilityStatus {
    let Some(raw) = raw.map(str::trim) else {
        return AvailabilityStatus::Unknown;
    };
    let lower = raw.to_lowercase();
    SEAT_RULES
        .iter()
        .find(|rule| (rule.matches)(&lower))
        .map_or(AvailabilityStatus::Unknown, |rule| (rule.outcome)(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_seat_text_is_not_available() {
        let status = classify_seat_text(None);
        assert_eq!(status, AvailabilityStatus::Unknown);
        assert!(!status.is_available());
        assert_eq!(status.status_text(), "Sold Out");
    }

    #[test]
    fn tersedia_means_many_seats() {
        let status = classify_seat_text(Some("Tersedia"));
        assert!(status.is_available());
        assert_eq!(status.status_text(), "AVAILABLE (Many Seats)");
    }

    #[test]
    fn tersedia_wins_over_remaining_seat_count() {
        let status = classify_seat_text(Some("Tersedia, sisa 12 kursi"));
        assert_eq!(
            status,
            AvailabilityStatus::Available("Many Seats".to_string())
        );
    }

    #[test]
    fn remaining_seats_keep_raw_text() {
        let status = classify_seat_text(Some("  Sisa 4 Kursi "));
        assert_eq!(
            status,
            AvailabilityStatus::Available("Sisa 4 Kursi".to_string())
        );
        assert_eq!(status.status_text(), "AVAILABLE (Sisa 4 Kursi)");
    }

    #[test]
    fn habis_wins_over_remaining_seat_count() {
        let status = classify_seat_text(Some("Habis - sisa 0 kursi"));
        assert_eq!(status, AvailabilityStatus::SoldOut);
        assert!(!status.is_available());
        assert_eq!(status.status_text(), "Habis / Sold Out");
    }

    #[test]
    fn habis_wins_over_tersedia() {
        assert_eq!(
            classify_seat_text(Some("Tersedia: habis")),
            AvailabilityStatus::SoldOut
        );
    }

    #[test]
    fn sisa_without_kursi_is_unknown() {
        assert_eq!(
            classify_seat_text(Some("Sisa waktu 5 menit")),
            AvailabilityStatus::Unknown
        );
    }

    #[test]
    fn seat_text_is_trimmed() {
        let card = r#"<small class="form-text sisa-kursi">  Sisa 2 kursi  </small>"#;
        assert_eq!(seat_text(card), Some("Sisa 2 kursi"));
    }

    #[test]
    fn seat_text_absent_when_marker_missing() {
        assert_eq!(seat_text(r#"<small class="form-text">Tersedia</small>"#), None);
    }
}
