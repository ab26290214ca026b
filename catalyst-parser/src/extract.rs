use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

macro_rules! pattern {
    ($expr:expr) => {{
        static PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new($expr).unwrap());
        &PATTERN
    }};
}

fn date_pattern() -> &'static Regex {
    pattern!(
        r"(?ix)
        (?:patent\s+expiry\s+date\s+is\s+)?
        \b(?:
            # 8 January 2036, 8th of Jan. 2036
            (?P<day>\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>[a-z]+)\.?,?\s+(?P<year>\d{4})
          |
            # January 8, 2036
            (?P<month_first>[a-z]+)\.?\s+(?P<day_second>\d{1,2})(?:st|nd|rd|th)?,\s*(?P<year_second>\d{4})
          |
            # 08/01/2036, read day first
            (?P<num_day>\d{1,2})[/.\-](?P<num_month>\d{1,2})[/.\-](?P<num_year>\d{4})
        )"
    )
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };

    Some(month)
}

fn parse_candidate(captures: &Captures) -> Option<NaiveDate> {
    let (day, month, year) = if let Some(day) = captures.name("day") {
        (
            day.as_str().parse().ok()?,
            month_from_name(captures.name("month")?.as_str())?,
            captures.name("year")?.as_str(),
        )
    } else if let Some(day) = captures.name("day_second") {
        (
            day.as_str().parse().ok()?,
            month_from_name(captures.name("month_first")?.as_str())?,
            captures.name("year_second")?.as_str(),
        )
    } else {
        (
            captures.name("num_day")?.as_str().parse().ok()?,
            captures.name("num_month")?.as_str().parse().ok()?,
            captures.name("num_year")?.as_str(),
        )
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day)
}

/// Every date found in `text`, in order of appearance.
///
/// Matches that do not form a valid calendar date (unknown month word,
/// 31st of a 30-day month, ...) are skipped without ending the scan.
pub fn extract_dates(text: &str) -> impl Iterator<Item = NaiveDate> + '_ {
    date_pattern()
        .captures_iter(text)
        .filter_map(|captures| parse_candidate(&captures))
}

/// The first date in `text` that falls into `expected_year`.
pub fn extract_expiry<S: AsRef<str>>(text: S, expected_year: i32) -> Option<NaiveDate> {
    extract_dates(text.as_ref()).find(|date| date.year() == expected_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_patent_expiry_phrase() {
        let text = "The compound is protected. Patent expiry date is 8 January 2036.";
        assert_eq!(extract_expiry(text, 2036), Some(date(2036, 1, 8)));
    }

    #[test]
    fn test_wrong_year_is_not_found() {
        assert_eq!(extract_expiry("Filed on 15 March 2030", 2036), None);
    }

    #[test]
    fn test_empty_text_is_not_found() {
        assert_eq!(extract_expiry("", 2036), None);
        assert_eq!(extract_expiry("", 1999), None);
    }

    #[test]
    fn test_scan_continues_past_other_years() {
        let text = "Priority date 15 March 2016; expiry 8 January 2036; renewal 1 June 2036";
        assert_eq!(extract_expiry(text, 2036), Some(date(2036, 1, 8)));
    }

    #[test]
    fn test_invalid_candidate_does_not_abort_scan() {
        let text = "31 February 2036 was a typo, corrected to 28 February 2036";
        assert_eq!(extract_expiry(text, 2036), Some(date(2036, 2, 28)));

        let text = "12 Widgets 2036 shipped before 3 May 2036";
        assert_eq!(extract_expiry(text, 2036), Some(date(2036, 5, 3)));
    }

    #[test]
    fn test_ordinals_and_of() {
        assert_eq!(
            extract_expiry("expires on the 1st of March, 2031", 2031),
            Some(date(2031, 3, 1))
        );
        assert_eq!(
            extract_expiry("expires 22nd Sept. 2031", 2031),
            Some(date(2031, 9, 22))
        );
    }

    #[test]
    fn test_month_first_with_comma() {
        assert_eq!(
            extract_expiry("completion expected December 3rd, 2027", 2027),
            Some(date(2027, 12, 3))
        );
    }

    #[test]
    fn test_numeric_dates_read_day_first() {
        assert_eq!(extract_expiry("expiry: 08/01/2036", 2036), Some(date(2036, 1, 8)));
        assert_eq!(extract_expiry("expiry: 12.11.2036", 2036), Some(date(2036, 11, 12)));
        assert_eq!(extract_expiry("expiry: 01/13/2036", 2036), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            extract_expiry("PATENT EXPIRY DATE IS 8 JANUARY 2036", 2036),
            Some(date(2036, 1, 8))
        );
    }

    #[test]
    fn test_pages_concatenated_without_separator() {
        let text = "Page one ends here.Patent expiry date is 8 January 2036Page two";
        assert_eq!(extract_expiry(text, 2036), Some(date(2036, 1, 8)));
    }

    #[test]
    fn test_extract_dates_keeps_document_order() {
        let dates = extract_dates("4 July 2030 then 1 Jan 2029 then 30 April 2031").collect::<Vec<_>>();
        assert_eq!(dates, vec![date(2030, 7, 4), date(2029, 1, 1), date(2031, 4, 30)]);
    }
}
