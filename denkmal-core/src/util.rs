//! Small display helpers shared by the client and its consumers.

use crate::enums::Language;
use crate::geo::{round_coord, LatLng};
use chrono::format::Locale;
use chrono::NaiveDate;

/// Upper-case the first character.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Turn a snake_case identifier into display words.
pub fn humanize(value: &str) -> String {
    value.split('_').collect::<Vec<_>>().join(" ")
}

/// Render a coordinate as "lat, lng" at display precision.
pub fn humanize_position(position: &LatLng) -> String {
    format!(
        "{}, {}",
        round_coord(position.lat),
        round_coord(position.lng)
    )
}

/// Render a partially-known historical date.
///
/// A complete day renders in the long form of the given language, a bare
/// year renders as the year alone, and a known place is appended in
/// parentheses either way.
pub fn humanize_date(
    day: Option<u32>,
    month: Option<u32>,
    year: Option<i32>,
    place: Option<&str>,
    language: Language,
) -> String {
    let mut output = String::new();

    let full_date = match (year, month, day) {
        (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day),
        _ => None,
    };

    if let Some(date) = full_date {
        let formatted = match language {
            Language::En => date.format_localized("%B %-d, %Y", Locale::en_US),
            Language::De => date.format_localized("%-d. %B %Y", Locale::de_DE),
            Language::Cs => date.format_localized("%-d. %B %Y", Locale::cs_CZ),
        };
        output.push_str(&formatted.to_string());
    } else if let Some(year) = year {
        output.push_str(&year.to_string());
    }

    if let Some(place) = place {
        if !place.is_empty() {
            if !output.is_empty() {
                output.push(' ');
            }
            output.push_str(&format!("({})", place));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("discover"), "Discover");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("über"), "Über");
    }

    #[test]
    fn test_humanize_replaces_underscores() {
        assert_eq!(humanize("literary_landscape"), "literary landscape");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_humanize_position_rounds() {
        let position = LatLng {
            lat: 51.05261234,
            lng: 13.68119876,
        };
        assert_eq!(humanize_position(&position), "51.0526, 13.6812");
    }

    #[test]
    fn test_humanize_date_full_date_german() {
        let output = humanize_date(Some(10), Some(11), Some(1759), None, Language::De);
        assert_eq!(output, "10. November 1759");
    }

    #[test]
    fn test_humanize_date_full_date_english() {
        let output = humanize_date(Some(10), Some(11), Some(1759), None, Language::En);
        assert_eq!(output, "November 10, 1759");
    }

    #[test]
    fn test_humanize_date_year_only_with_place() {
        let output = humanize_date(None, None, Some(1805), Some("Weimar"), Language::De);
        assert_eq!(output, "1805 (Weimar)");
    }

    #[test]
    fn test_humanize_date_invalid_day_falls_back_to_year() {
        let output = humanize_date(Some(31), Some(2), Some(1805), None, Language::En);
        assert_eq!(output, "1805");
    }

    #[test]
    fn test_humanize_date_nothing_known() {
        assert_eq!(humanize_date(None, None, None, None, Language::En), "");
    }
}
