//! Distance string parsing.
//!
//! Venue distances arrive as presentation strings (`"300m"`, `"3.2km"`). Every
//! distance-based ordering in the crate goes through [`parse_distance_meters`]
//! so that the near-me sub-filter, the distance sort and the delivery-time
//! proxy sort can never disagree about what a string means.
//!
//! Parsing is unit-aware: `m` is meters, `km` is kilometers, and a bare number
//! is taken as meters. Anything else is malformed and sorts last.

/// Meters in one kilometer.
const METERS_PER_KILOMETER: f64 = 1000.0;

/// Parses a human-readable distance into meters.
///
/// Leading and trailing whitespace is ignored, the unit is case-insensitive,
/// and thousands separators (`1,200m`) are accepted. Returns `None` for
/// empty, negative, non-numeric or unknown-unit input.
///
/// # Examples
///
/// ```
/// use gfradar::domain::distance::parse_distance_meters;
///
/// assert_eq!(parse_distance_meters("300m"), Some(300.0));
/// assert_eq!(parse_distance_meters("1.2km"), Some(1200.0));
/// assert_eq!(parse_distance_meters("450"), Some(450.0));
/// assert_eq!(parse_distance_meters("abc"), None);
/// ```
#[must_use]
pub fn parse_distance_meters(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .collect::<String>()
        .to_ascii_lowercase();

    let split_at = cleaned
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(cleaned.len());
    let (number, unit) = cleaned.split_at(split_at);

    let magnitude: f64 = number.parse().ok()?;
    if !magnitude.is_finite() {
        return None;
    }

    let multiplier = match unit.trim() {
        "" | "m" => 1.0,
        "km" => METERS_PER_KILOMETER,
        _ => return None,
    };

    Some(magnitude * multiplier)
}

/// Sort key for ascending distance orderings.
///
/// Malformed strings map to `f64::INFINITY` so that one bad record sinks to
/// the end instead of breaking the sort.
#[must_use]
pub fn distance_sort_key(raw: &str) -> f64 {
    parse_distance_meters(raw).unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_and_kilometers() {
        assert_eq!(parse_distance_meters("50m"), Some(50.0));
        assert_eq!(parse_distance_meters("3.2km"), Some(3200.0));
        assert_eq!(parse_distance_meters("7.5 km"), Some(7500.0));
        assert_eq!(parse_distance_meters(" 0.3KM "), Some(300.0));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(parse_distance_meters("1,200m"), Some(1200.0));
    }

    #[test]
    fn test_malformed_values() {
        assert_eq!(parse_distance_meters(""), None);
        assert_eq!(parse_distance_meters("abc"), None);
        assert_eq!(parse_distance_meters("km"), None);
        assert_eq!(parse_distance_meters("5 min walk"), None);
        assert_eq!(parse_distance_meters("-3km"), None);
        assert_eq!(parse_distance_meters("1.2.3km"), None);
    }

    #[test]
    fn test_kilometers_sort_after_nearby_meters() {
        assert!(distance_sort_key("300m") < distance_sort_key("1.2km"));
        assert!(distance_sort_key("1.2km") < distance_sort_key("abc"));
        assert!(distance_sort_key("abc").is_infinite());
    }
}
