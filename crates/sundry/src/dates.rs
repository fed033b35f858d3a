//! Date parsing and formatting against ordered format lists

use chrono::NaiveDate;
use sundry_core::{Error, Result};

/// Parse a date string, trying `%d.%m.%Y` and then `%Y-%m-%d`
///
/// ```
/// use chrono::NaiveDate;
/// use sundry::dates::parse_date;
///
/// assert_eq!(parse_date("2.5.2016").unwrap(), NaiveDate::from_ymd_opt(2016, 5, 2).unwrap());
/// assert_eq!(parse_date("2016-05-03").unwrap(), NaiveDate::from_ymd_opt(2016, 5, 3).unwrap());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    DateParser::new().parse(input)
}

/// A parser bound to an ordered list of accepted `strftime` formats
///
/// The preferred formats are tried first, in the given order; the
/// default formats `%d.%m.%Y` and `%Y-%m-%d` are always appended.
/// Duplicates keep their first position.
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DateParser {
    pub fn new() -> Self {
        Self::with_formats(&[])
    }

    /// A parser preferring the given formats
    ///
    /// ```
    /// use sundry::dates::DateParser;
    ///
    /// let us = DateParser::with_formats(&["%m/%d/%Y"]);
    /// let date = us.parse("5/2/2016").unwrap();
    /// assert_eq!(date.to_string(), "2016-05-02");
    /// ```
    pub fn with_formats(preferred: &[&str]) -> Self {
        let mut formats: Vec<String> = Vec::new();
        for fmt in preferred
            .iter()
            .copied()
            .chain(["%d.%m.%Y", "%Y-%m-%d"])
        {
            if !formats.iter().any(|known| known == fmt) {
                formats.push(fmt.to_string());
            }
        }
        Self { formats }
    }

    /// The first format that understands `input` wins
    pub fn parse(&self, input: &str) -> Result<NaiveDate> {
        for fmt in &self.formats {
            if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
                return Ok(date);
            }
        }
        Err(Error::date_parse(input))
    }

    /// Like [`parse`](Self::parse), answering a plain (y, m, d) triple
    pub fn parse_ymd(&self, input: &str) -> Result<(i32, u32, u32)> {
        use chrono::Datelike;
        let date = self.parse(input)?;
        Ok((date.year(), date.month(), date.day()))
    }
}

/// Formats dates, tolerating empty values
///
/// Database reads often yield optional dates; [`format_opt`]
/// (Self::format_opt) passes the absence through instead of failing.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    fmt: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DateFormatter {
    pub fn new() -> Self {
        Self::with_format("%d.%m.%Y")
    }

    pub fn with_format(fmt: &str) -> Self {
        Self {
            fmt: fmt.to_string(),
        }
    }

    /// ```
    /// use chrono::NaiveDate;
    /// use sundry::dates::DateFormatter;
    ///
    /// let f = DateFormatter::new();
    /// let date = NaiveDate::from_ymd_opt(2018, 8, 15).unwrap();
    /// assert_eq!(f.format(date), "15.08.2018");
    /// ```
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.fmt).to_string()
    }

    pub fn format_opt(&self, date: Option<NaiveDate>) -> Option<String> {
        date.map(|d| self.format(d))
    }

    /// Format a plain (y, m, d) triple
    pub fn format_ymd(&self, year: i32, month: u32, day: u32) -> Result<String> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::invalid_value("date", format!("no such date: {year}-{month}-{day}"))
        })?;
        Ok(self.format(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats() {
        assert_eq!(parse_date("2.5.2016").unwrap().to_string(), "2016-05-02");
        assert_eq!(parse_date("2016-05-03").unwrap().to_string(), "2016-05-03");
    }

    #[test]
    fn test_unparseable_input() {
        let err = parse_date("gipsnich").unwrap_err();
        assert!(matches!(err, Error::DateParse { .. }));
    }

    #[test]
    fn test_preferred_format_wins() {
        // ambiguous without preference: 2.5. vs 5/2
        let us = DateParser::with_formats(&["%m/%d/%Y"]);
        assert_eq!(us.parse("5/2/2016").unwrap().to_string(), "2016-05-02");
        assert_eq!(us.parse("2.5.2016").unwrap().to_string(), "2016-05-02");
    }

    #[test]
    fn test_duplicate_formats_collapse() {
        let parser = DateParser::with_formats(&["%d.%m.%Y", "%d.%m.%Y"]);
        assert_eq!(parser.parse_ymd("4.5.2016").unwrap(), (2016, 5, 4));
    }

    #[test]
    fn test_formatter_round_trip() {
        let f = DateFormatter::new();
        let date = parse_date("15.08.2018").unwrap();
        assert_eq!(f.format(date), "15.08.2018");
        assert_eq!(f.format_opt(None), None);
        assert_eq!(f.format_ymd(2018, 8, 14).unwrap(), "14.08.2018");
        assert!(f.format_ymd(2018, 2, 31).is_err());
    }
}
