//! Field extraction from a single train listing card.
//!
//! Every field is looked up through [`FIELD_RULES`]: a strict pattern that
//! matches the exact markup the booking site emits, then an optional looser
//! fallback that only runs when the strict pattern missed. Rules are
//! independent, so a miss on one field never affects another.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DEPARTURE_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<div class="times time-start">\s*(\d{2}:\d{2})\s*</div>\s*<div class="station date-start">(.*?)</div>"#,
    )
    .expect("valid departure pair regex")
});
static ARRIVAL_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<div class="times time-end">\s*(\d{2}:\d{2})\s*</div>\s*<div class="station date-end">(.*?)</div>"#,
    )
    .expect("valid arrival pair regex")
});
// Some result pages put the arrival station, not the date, right after the
// arrival time; the time is still taken from either layout.
static ARRIVAL_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<div class="times time-end">\s*(\d{2}:\d{2})\s*</div>\s*<div class="station (?:date|station)-end">"#,
    )
    .expect("valid arrival time regex")
});
static DEPARTURE_STATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="station station-start">([^<]+)</div>"#)
        .expect("valid departure station regex")
});
static DEPARTURE_STATION_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="[^"]*\bstation-start\b[^"]*">([^<]+)</div>"#)
        .expect("valid loose departure station regex")
});
static ARRIVAL_STATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="station station-end">([^<]+)</div>"#)
        .expect("valid arrival station regex")
});
static ARRIVAL_STATION_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="[^"]*\bstation-end\b[^"]*">([^<]+)</div>"#)
        .expect("valid loose arrival station regex")
});
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="price">\s*(Rp\s?[\d.,]+-?)\s*</div>"#).expect("valid price regex")
});
static PRICE_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="[^"]*\bprice\b[^"]*">([^<]+)</div>"#)
        .expect("valid loose price regex")
});
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="long-time">([^<]+)</div>"#).expect("valid duration regex")
});
static DURATION_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="[^"]*\blong-time\b[^"]*">([^<]+)</div>"#)
        .expect("valid loose duration regex")
});
// The site renders the class container with an unexpanded template class.
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="[^"]*\{kelas kereta\}[^"]*">([^<]+)</div>"#)
        .expect("valid class regex")
});
static CLASS_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="[^"]*\bkelas\b[^"]*">([^<]+)</div>"#)
        .expect("valid loose class regex")
});

/// Structured fields pulled out of one listing card.
///
/// Each field is a trimmed, non-empty string or `None`. Serialized field
/// names form part of the check result wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrainDetails {
    pub departure_station: Option<String>,
    pub arrival_station: Option<String>,
    pub departure_date: Option<String>,
    pub arrival_date: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    #[serde(rename = "class")]
    pub travel_class: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    DepartureStation,
    ArrivalStation,
    DepartureDate,
    ArrivalDate,
    DepartureTime,
    ArrivalTime,
    Duration,
    TravelClass,
    Price,
}

/// A regex plus the capture group holding the value.
struct Pattern {
    regex: &'static LazyLock<Regex>,
    group: usize,
}

const fn pattern(regex: &'static LazyLock<Regex>, group: usize) -> Pattern {
    Pattern { regex, group }
}

struct FieldRule {
    field: Field,
    strict: Pattern,
    fallback: Option<Pattern>,
}

/// Why a single field produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldMiss {
    NoMatch,
    MissingGroup,
    Blank,
}

// Departure time and date share a pair regex, so they are found or missed
// together. Arrival time only needs an adjacent `-end` station element, while
// arrival date needs the `date-end` pair.
static FIELD_RULES: [FieldRule; 9] = [
    FieldRule {
        field: Field::DepartureTime,
        strict: pattern(&DEPARTURE_PAIR_RE, 1),
        fallback: None,
    },
    FieldRule {
        field: Field::DepartureDate,
        strict: pattern(&DEPARTURE_PAIR_RE, 2),
        fallback: None,
    },
    FieldRule {
        field: Field::ArrivalTime,
        strict: pattern(&ARRIVAL_TIME_RE, 1),
        fallback: None,
    },
    FieldRule {
        field: Field::ArrivalDate,
        strict: pattern(&ARRIVAL_PAIR_RE, 2),
        fallback: None,
    },
    FieldRule {
        field: Field::DepartureStation,
        strict: pattern(&DEPARTURE_STATION_RE, 1),
        fallback: Some(pattern(&DEPARTURE_STATION_LOOSE_RE, 1)),
    },
    FieldRule {
        field: Field::ArrivalStation,
        strict: pattern(&ARRIVAL_STATION_RE, 1),
        fallback: Some(pattern(&ARRIVAL_STATION_LOOSE_RE, 1)),
    },
    FieldRule {
        field: Field::Price,
        strict: pattern(&PRICE_RE, 1),
        fallback: Some(pattern(&PRICE_LOOSE_RE, 1)),
    },
    FieldRule {
        field: Field::Duration,
        strict: pattern(&DURATION_RE, 1),
        fallback: Some(pattern(&DURATION_LOOSE_RE, 1)),
    },
    FieldRule {
        field: Field::TravelClass,
        strict: pattern(&CLASS_RE, 1),
        fallback: Some(pattern(&CLASS_LOOSE_RE, 1)),
    },
];

/// Best-effort extraction of every [`TrainDetails`] field from `card_html`.
///
/// Never fails: a field whose patterns do not match, or whose captured value
/// is blank after trimming, is left as `None`.
#[must_use]
pub fn extract_train_details(card_html: &str) -> TrainDetails {
    let mut details = TrainDetails::default();
    for rule in &FIELD_RULES {
        match apply_rule(rule, card_html) {
            Ok(value) => *details.slot_mut(rule.field) = Some(value),
            Err(miss) => {
                tracing::trace!(field = ?rule.field, ?miss, "field not found in card");
            }
        }
    }
    details
}

fn apply_rule(rule: &FieldRule, html: &str) -> Result<String, FieldMiss> {
    let strict = capture(&rule.strict, html);
    match &rule.fallback {
        Some(fallback) if strict.is_err() => capture(fallback, html),
        _ => strict,
    }
}

fn capture(pattern: &Pattern, html: &str) -> Result<String, FieldMiss> {
    let caps = pattern.regex.captures(html).ok_or(FieldMiss::NoMatch)?;
    let value = caps
        .get(pattern.group)
        .ok_or(FieldMiss::MissingGroup)?
        .as_str()
        .trim();
    if value.is_empty() {
        return Err(FieldMiss::Blank);
    }
    Ok(value.to_string())
}

impl TrainDetails {
    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::DepartureStation => &mut self.departure_station,
            Field::ArrivalStation => &mut self.arrival_station,
            Field::DepartureDate => &mut self.departure_date,
            Field::ArrivalDate => &mut self.arrival_date,
            Field::DepartureTime => &mut self.departure_time,
            Field::ArrivalTime => &mut self.arrival_time,
            Field::Duration => &mut self.duration,
            Field::TravelClass => &mut self.travel_class,
            Field::Price => &mut self.price,
        }
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
