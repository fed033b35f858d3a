//! Time span parsing and default deadline calculation

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use sundry_core::{Error, Result};

/// Parse a time span like `"1d 5m"` into seconds
///
/// A bare integer counts as seconds; fractions require one of the
/// suffixes `s`, `m`, `h` or `d`. Several parts, separated by
/// whitespace, are summed up.
///
/// ```
/// use sundry::times::parse_delta;
///
/// assert_eq!(parse_delta("90").unwrap(), 90.0);
/// assert_eq!(parse_delta("1d 5m").unwrap(), 86700.0);
/// assert_eq!(parse_delta("1.5h").unwrap(), 5400.0);
/// ```
pub fn parse_delta(val: &str) -> Result<f64> {
    let mut secs = 0.0;
    let mut seen = false;
    for part in val.split_whitespace() {
        seen = true;
        if let Ok(n) = part.parse::<i64>() {
            secs += n as f64;
            continue;
        }
        let (number, factor) = match split_suffix(part) {
            Some((head, 's')) => (head, 1.0),
            Some((head, 'm')) => (head, 60.0),
            Some((head, 'h')) => (head, 3600.0),
            Some((head, 'd')) => (head, 86400.0),
            _ => return Err(Error::delta_parse(val)),
        };
        let number: f64 = number.parse().map_err(|_| Error::delta_parse(val))?;
        secs += number * factor;
    }
    if !seen {
        return Err(Error::delta_parse(val));
    }
    Ok(secs)
}

fn split_suffix(part: &str) -> Option<(&str, char)> {
    let ch = part.chars().next_back()?;
    Some((&part[..part.len() - ch.len_utf8()], ch))
}

/// Like [`parse_delta`], scaled to days
///
/// ```
/// use sundry::times::delta_days;
///
/// assert_eq!(delta_days("1d").unwrap(), 1.0);
/// assert_eq!(delta_days("12h").unwrap(), 0.5);
/// ```
pub fn delta_days(val: &str) -> Result<f64> {
    Ok(parse_delta(val)? / 86400.0)
}

/// Calculates default deadlines, e.g. the expiration date of a TAN
///
/// The configured offsets are added to a base timestamp; out-of-range
/// months and days normalize forward, so adding a month to January 31st
/// lands in early March, like `mktime` would. With `next_month`, days
/// are then increased up to the first day of a month.
///
/// ```
/// use chrono::NaiveDate;
/// use sundry::times::Deadline;
///
/// let today = NaiveDate::from_ymd_opt(2014, 7, 31).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let expires = Deadline::new().years(1).next_month().apply(today).unwrap();
/// assert_eq!(expires.to_string(), "2015-08-01 00:00:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    years: i32,
    months: i32,
    days: i64,
    next_month: bool,
    keep_time: bool,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn years(mut self, years: i32) -> Self {
        self.years = years;
        self
    }

    #[must_use]
    pub fn months(mut self, months: i32) -> Self {
        self.months = months;
        self
    }

    #[must_use]
    pub fn days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    /// Round up to the first day of the next month, unless the result
    /// already is a first
    #[must_use]
    pub fn next_month(mut self) -> Self {
        self.next_month = true;
        self
    }

    /// Keep the time of day instead of resetting it to midnight
    #[must_use]
    pub fn keep_time(mut self) -> Self {
        self.keep_time = true;
        self
    }

    /// The deadline counted from `base`
    pub fn apply(&self, base: NaiveDateTime) -> Result<NaiveDateTime> {
        let mut date = shifted(base.date(), self.years, self.months, self.days)?;
        if self.next_month && date.day() != 1 {
            date = shifted(date.with_day(1).unwrap_or(date), 0, 1, 0)?;
        }
        let time = if self.keep_time {
            base.time()
        } else {
            chrono::NaiveTime::MIN
        };
        Ok(date.and_time(time))
    }

    /// The deadline counted from now (local time)
    pub fn from_now(&self) -> Result<NaiveDateTime> {
        self.apply(Local::now().naive_local())
    }
}

/// Add offsets to a date, normalizing overflowing months and days
fn shifted(base: NaiveDate, years: i32, months: i32, days: i64) -> Result<NaiveDate> {
    let mut year = base.year() + years;
    let month0 = base.month() as i32 - 1 + months;
    year += month0.div_euclid(12);
    let month = (month0.rem_euclid(12) + 1) as u32;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::invalid_value("date", format!("out of range: {year}-{month}")))?;
    first
        .checked_add_signed(chrono::Duration::days(base.day() as i64 - 1 + days))
        .ok_or_else(|| Error::invalid_value("date", "offset out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 7, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_delta_sums_parts() {
        assert_eq!(parse_delta("1d").unwrap(), 86400.0);
        assert_eq!(parse_delta("1d 5m").unwrap(), 86700.0);
        assert_eq!(parse_delta("300").unwrap(), 300.0);
    }

    #[test]
    fn test_parse_delta_rejects_garbage() {
        assert!(parse_delta("5x").is_err());
        assert!(parse_delta("").is_err());
        // fractions of a second require the suffix
        assert!(parse_delta("1.5").is_err());
    }

    #[test]
    fn test_delta_days() {
        assert_eq!(delta_days("1d 5m").unwrap(), 1.0034722222222223);
    }

    #[test]
    fn test_deadline_year_and_next_month() {
        let expires = Deadline::new().years(1).next_month().apply(base()).unwrap();
        assert_eq!(expires.to_string(), "2015-08-01 00:00:00");
    }

    #[test]
    fn test_deadline_day_offset() {
        let expires = Deadline::new().days(90).apply(base()).unwrap();
        assert_eq!(expires.date().to_string(), "2014-10-29");
    }

    #[test]
    fn test_deadline_keeps_time_on_request() {
        let expires = Deadline::new()
            .years(1)
            .next_month()
            .keep_time()
            .apply(base())
            .unwrap();
        assert_eq!(expires.to_string(), "2015-08-01 12:00:00");
    }

    #[test]
    fn test_deadline_month_overflow_normalizes() {
        let jan31 = NaiveDate::from_ymd_opt(2015, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let shifted = Deadline::new().months(1).apply(jan31).unwrap();
        assert_eq!(shifted.date().to_string(), "2015-03-03");
    }

    #[test]
    fn test_deadline_next_month_keeps_firsts() {
        let first = NaiveDate::from_ymd_opt(2014, 8, 1)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        let expires = Deadline::new().next_month().apply(first).unwrap();
        assert_eq!(expires.to_string(), "2014-08-01 00:00:00");
    }
}
