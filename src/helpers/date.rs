//! Date helper functions

use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveDateTime};

/// Parse a publication timestamp as the content API ships it.
///
/// The API usually emits RFC 3339 with a compact offset
/// (`2021-03-15T19:25:28+0000`); bare date-times and plain dates are
/// accepted as well. Returns `None` for anything else - the caller decides
/// the fallback display string.
pub fn parse_publication_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z").ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

/// Format as "dd MMM yyyy" with Portuguese (Brazil) month abbreviations,
/// e.g. "15 jan 2021". No timezone conversion: the date renders with
/// whatever offset the source timestamp carried.
pub fn format_pt_br(date: &DateTime<FixedOffset>) -> String {
    date.format_localized("%d %b %Y", Locale::pt_BR).to_string()
}

/// Parse-and-format convenience for display fields: an absent or
/// unparseable timestamp yields the caller-supplied fallback.
pub fn display_date(raw: Option<&str>, fallback: &str) -> String {
    raw.and_then(parse_publication_date)
        .map(|date| format_pt_br(&date))
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_offset() {
        let date = parse_publication_date("2021-03-15T19:25:28+0000").unwrap();
        assert_eq!(format_pt_br(&date), "15 mar 2021");
    }

    #[test]
    fn test_parse_rfc3339() {
        let date = parse_publication_date("2021-01-15T10:30:00+00:00").unwrap();
        assert_eq!(format_pt_br(&date), "15 jan 2021");
    }

    #[test]
    fn test_parse_plain_date() {
        let date = parse_publication_date("2021-12-02").unwrap();
        assert_eq!(format_pt_br(&date), "02 dez 2021");
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_publication_date("not a date").is_none());
        assert!(parse_publication_date("").is_none());
    }

    #[test]
    fn test_display_date_fallback() {
        assert_eq!(display_date(None, "data inválida"), "data inválida");
        assert_eq!(
            display_date(Some("garbage"), "data inválida"),
            "data inválida"
        );
        assert_eq!(
            display_date(Some("2021-03-15T19:25:28+0000"), "data inválida"),
            "15 mar 2021"
        );
    }
}
