//! Entity extraction from free-form reasoner guesses.
//!
//! Phone contacts, person names and date-times arrive as natural-language
//! text. Extraction either produces a fully normalized value or reports the
//! entity as absent; partially-parsed values never escape this module.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// Markers that flag an extracted number as a landline rather than a
/// reachable messaging contact.
const LANDLINE_MARKERS: &[&str] = &["fixo", "landline", "fixed line"];

/// Date-time layouts probed in order before regex recovery kicks in.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

static DATETIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})[T\s](\d{2}:\d{2})").expect("datetime pattern is valid")
});

/// Extracts a normalized phone contact from a raw guess.
///
/// Strips every non-digit character and accepts the result only when at
/// least `min_digits` digits remain. Numbers the raw text explicitly
/// describes as a landline are rejected regardless of length.
pub fn extract_phone(raw: Option<&str>, min_digits: usize) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return None;
    }

    let lowered = raw.to_lowercase();
    if LANDLINE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return None;
    }

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= min_digits {
        Some(digits)
    } else {
        None
    }
}

/// Extracts a cleaned person name from a raw guess.
///
/// Collapses internal whitespace; the literal `null` (any case) and empty
/// strings are treated as absent.
pub fn extract_name(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return None;
    }

    let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Extracts a date-time from a raw guess.
///
/// Probes a fixed list of layouts first, then falls back to recovering a
/// `YYYY-MM-DD` plus `HH:MM` substring from noisy text. Returns `None`
/// when nothing parses.
pub fn extract_datetime(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return None;
    }

    for layout in DATETIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(parsed);
        }
    }

    let captures = DATETIME_RE.captures(raw)?;
    let recovered = format!("{} {}", &captures[1], &captures[2]);
    NaiveDateTime::parse_from_str(&recovered, "%Y-%m-%d %H:%M").ok()
}

/// Renders a date-time in the one canonical ISO-8601 form used on the wire.
pub fn to_iso(datetime: &NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod phone {
        use super::*;

        #[test]
        fn strips_formatting_to_digits() {
            assert_eq!(
                extract_phone(Some("Anota aí: 11 98765-4321"), 10),
                Some("11987654321".to_string())
            );
        }

        #[test]
        fn accepts_plain_numbers() {
            assert_eq!(
                extract_phone(Some("21988887777"), 10),
                Some("21988887777".to_string())
            );
        }

        #[test]
        fn accepts_wa_link_formats() {
            assert_eq!(
                extract_phone(Some("wa.me/5511999887766"), 10),
                Some("5511999887766".to_string())
            );
        }

        #[test]
        fn rejects_below_minimum_digits() {
            assert_eq!(extract_phone(Some("9999"), 10), None);
            assert_eq!(extract_phone(Some("ramal 123"), 10), None);
        }

        #[test]
        fn respects_configured_threshold() {
            assert_eq!(
                extract_phone(Some("12345678"), 8),
                Some("12345678".to_string())
            );
            assert_eq!(extract_phone(Some("12345678"), 10), None);
        }

        #[test]
        fn rejects_explicit_landlines() {
            assert_eq!(extract_phone(Some("fixo 1133334444"), 10), None);
            assert_eq!(extract_phone(Some("landline: 1133334444"), 10), None);
            assert_eq!(
                extract_phone(Some("our fixed line is 1133334444"), 10),
                None
            );
        }

        #[test]
        fn treats_null_and_empty_as_absent() {
            assert_eq!(extract_phone(Some("null"), 10), None);
            assert_eq!(extract_phone(Some("NULL"), 10), None);
            assert_eq!(extract_phone(Some("  "), 10), None);
            assert_eq!(extract_phone(None, 10), None);
        }
    }

    mod name {
        use super::*;

        #[test]
        fn collapses_internal_whitespace() {
            assert_eq!(
                extract_name(Some("  Dr.   Carlos   Souza ")),
                Some("Dr. Carlos Souza".to_string())
            );
        }

        #[test]
        fn keeps_single_word_names() {
            assert_eq!(extract_name(Some("Marcos")), Some("Marcos".to_string()));
        }

        #[test]
        fn treats_null_and_empty_as_absent() {
            assert_eq!(extract_name(Some("null")), None);
            assert_eq!(extract_name(Some("Null")), None);
            assert_eq!(extract_name(Some("")), None);
            assert_eq!(extract_name(None), None);
        }
    }

    mod datetime {
        use super::*;
        use chrono::NaiveDate;

        fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap()
        }

        #[test]
        fn parses_iso_with_seconds() {
            assert_eq!(
                extract_datetime(Some("2026-01-30T15:30:00")),
                Some(dt(2026, 1, 30, 15, 30, 0))
            );
        }

        #[test]
        fn parses_iso_without_seconds() {
            assert_eq!(
                extract_datetime(Some("2026-01-30T15:30")),
                Some(dt(2026, 1, 30, 15, 30, 0))
            );
        }

        #[test]
        fn parses_space_separated_forms() {
            assert_eq!(
                extract_datetime(Some("2026-01-30 15:30:00")),
                Some(dt(2026, 1, 30, 15, 30, 0))
            );
            assert_eq!(
                extract_datetime(Some("2026-01-30 15:30")),
                Some(dt(2026, 1, 30, 15, 30, 0))
            );
        }

        #[test]
        fn recovers_datetime_from_noisy_text() {
            assert_eq!(
                extract_datetime(Some("confirmed for 2026-02-03 14:00, see you!")),
                Some(dt(2026, 2, 3, 14, 0, 0))
            );
        }

        #[test]
        fn returns_absent_on_unparseable_text() {
            assert_eq!(extract_datetime(Some("tomorrow at 3pm")), None);
            assert_eq!(extract_datetime(Some("null")), None);
            assert_eq!(extract_datetime(None), None);
        }

        #[test]
        fn rejects_impossible_calendar_dates() {
            assert_eq!(extract_datetime(Some("2026-13-45 15:30")), None);
        }

        #[test]
        fn canonical_form_is_iso_with_seconds() {
            let parsed = extract_datetime(Some("2026-01-30 15:30")).unwrap();
            assert_eq!(to_iso(&parsed), "2026-01-30T15:30:00");
        }
    }
}
