use chrono::{Datelike, NaiveDateTime};

use super::{PassEvent, PassReport};
use crate::FormatError;

pub const SATELLITE_MARKER: &str = "🛰";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Renders a report, one line per pass, ending with the satellite marker.
pub fn format_report(report: &PassReport) -> Result<String, FormatError> {
    if report.events.is_empty() {
        return Ok(format!(
            ":( No results found for **{}**{}",
            report.location_name, SATELLITE_MARKER
        ));
    }

    let mut text = format!("**{}** ({})\n", report.location_name, report.timezone);
    for event in &report.events {
        text.push_str(&format_pass(event)?);
        text.push('\n');
    }
    text.push_str(SATELLITE_MARKER);
    Ok(text)
}

/// `Wed Jan 1st, 12:00pm (5m 30s)`
pub fn format_pass(event: &PassEvent) -> Result<String, FormatError> {
    let begin = parse_timestamp(&event.begin)?;
    let end = parse_timestamp(&event.end)?;

    let seconds = (end - begin).num_seconds();
    if seconds < 0 {
        return Err(FormatError::NegativeDuration {
            begin: event.begin.clone(),
            end: event.end.clone(),
        });
    }

    Ok(format!(
        "{} {}, {} ({}m {}s)",
        begin.format("%a %b"),
        ordinal(begin.day()),
        begin.format("%I:%M%P"),
        seconds / 60,
        seconds % 60
    ))
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, FormatError> {
    if raw.len() != 14 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::Timestamp(raw.to_string()));
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| FormatError::Timestamp(raw.to_string()))
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(begin: &str, end: &str) -> PassEvent {
        PassEvent {
            begin: begin.to_string(),
            end: end.to_string(),
            timezone: "UTC".to_string(),
        }
    }

    #[test]
    fn no_passes_is_a_single_line() {
        let report = PassReport::new("Nowhereville".to_string(), Vec::new());
        assert_eq!(
            format_report(&report).unwrap(),
            ":( No results found for **Nowhereville**🛰"
        );
    }

    #[test]
    fn duration_is_minutes_and_seconds() {
        let line = format_pass(&event("20200101120000", "20200101120530")).unwrap();
        assert_eq!(line, "Wed Jan 1st, 12:00pm (5m 30s)");
    }

    #[test]
    fn report_lists_passes_in_given_order() {
        let report = PassReport::new(
            "Sydney NSW, Australia".to_string(),
            vec![
                event("20200322213015", "20200322213420"),
                event("20200302061500", "20200302062001"),
            ],
        );
        assert_eq!(
            format_report(&report).unwrap(),
            "**Sydney NSW, Australia** (UTC)\n\
             Sun Mar 22nd, 09:30pm (4m 5s)\n\
             Mon Mar 2nd, 06:15am (5m 1s)\n\
             🛰"
        );
    }

    #[test]
    fn long_passes_keep_counting_minutes() {
        let line = format_pass(&event("20200111235900", "20200112010001")).unwrap();
        assert_eq!(line, "Sat Jan 11th, 11:59pm (61m 1s)");
    }

    #[test]
    fn ordinals() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 31]
            .into_iter()
            .map(ordinal)
            .collect();
        assert_eq!(
            rendered,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "31st"]
        );
    }

    #[test]
    fn malformed_timestamps_fail() {
        assert_eq!(
            format_pass(&event("2020-01-01", "20200101120530")),
            Err(FormatError::Timestamp("2020-01-01".to_string()))
        );
        assert_eq!(
            format_pass(&event("20201301120000", "20201301120530")),
            Err(FormatError::Timestamp("20201301120000".to_string()))
        );
    }

    #[test]
    fn end_before_begin_fails() {
        assert!(matches!(
            format_pass(&event("20200101120530", "20200101120000")),
            Err(FormatError::NegativeDuration { .. })
        ));
    }
}
