//! Date helper functions

use chrono::{DateTime, Datelike, FixedOffset};

/// Parse a CMS publication timestamp
///
/// Accepts RFC 3339 (`2023-05-14T18:21:13+00:00`) as well as the compact
/// offset form the content API emits (`2023-05-14T18:21:13+0000`).
pub fn parse_publication_date(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// Format a date as two-digit day, long month name and year
///
/// # Examples
/// ```ignore
/// display_date(&date, "pt-BR") // -> "14 de maio de 2023"
/// display_date(&date, "en")    // -> "May 14, 2023"
/// ```
pub fn display_date<Tz: chrono::TimeZone>(date: &DateTime<Tz>, language: &str) -> String {
    let day = date.day();
    let year = date.year();
    let month = date.month();

    if is_portuguese(language) {
        format!("{:02} de {} de {}", day, month_name_pt(month), year)
    } else {
        format!("{} {:02}, {}", month_name_en(month), day, year)
    }
}

/// Parse and format a publication timestamp; empty when absent or malformed
pub fn display_publication_date(value: Option<&str>, language: &str) -> String {
    match value.and_then(parse_publication_date) {
        Some(date) => display_date(&date, language),
        None => {
            if let Some(raw) = value {
                tracing::debug!("Unparseable publication date: {}", raw);
            }
            String::new()
        }
    }
}

fn is_portuguese(language: &str) -> bool {
    language
        .split(['-', '_'])
        .next()
        .map(|lang| lang.eq_ignore_ascii_case("pt"))
        .unwrap_or(false)
}

fn month_name_pt(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        12 => "dezembro",
        _ => "",
    }
}

fn month_name_en(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_offset() {
        let date = parse_publication_date("2023-05-14T18:21:13+0000").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 5, 14));
    }

    #[test]
    fn test_parse_rfc3339() {
        let date = parse_publication_date("2023-01-02T08:00:00-03:00").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 1, 2));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_publication_date("yesterday").is_none());
    }

    #[test]
    fn test_display_date_pt_br() {
        let date = parse_publication_date("2023-05-04T10:00:00+0000").unwrap();
        assert_eq!(display_date(&date, "pt-BR"), "04 de maio de 2023");
        assert_eq!(display_date(&date, "pt"), "04 de maio de 2023");
    }

    #[test]
    fn test_display_date_en() {
        let date = parse_publication_date("2023-05-14T10:00:00+0000").unwrap();
        assert_eq!(display_date(&date, "en"), "May 14, 2023");
        assert_eq!(display_date(&date, "en-US"), "May 14, 2023");
    }

    #[test]
    fn test_display_publication_date_missing() {
        assert_eq!(display_publication_date(None, "pt-BR"), "");
        assert_eq!(display_publication_date(Some("garbage"), "pt-BR"), "");
    }
}
