use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Result, TrackerError};
use crate::model::record::DATE_FORMAT;

/// Parses the day to work on, relative to `today`.
///
/// Accepts `today`, `yesterday`, `tomorrow` (and `tod`/`yes`/`tom`),
/// relative offsets `+Nd`/`-Nd`/`+Nw`/`-Nw`, or `YYYY-MM-DD`.
pub fn parse_day(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let out_of_range = || TrackerError::InvalidInput(format!("Date out of range: {}", input));

    let offset = match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => Some(Duration::days(-1)),
        "tomorrow" | "tom" => Some(Duration::days(1)),
        _ => parse_offset(input)?,
    };

    if let Some(offset) = offset {
        return today.checked_add_signed(offset).ok_or_else(out_of_range);
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| TrackerError::InvalidInput(format!("Could not parse date: {}", input)))
}

fn parse_offset(input: &str) -> Result<Option<Duration>> {
    let sign = match input.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok(None),
    };
    let invalid = || TrackerError::InvalidInput(format!("Invalid relative date: {}", input));
    let body = &input[1..];
    let (unit_at, unit) = body.char_indices().last().ok_or_else(invalid)?;
    let count = body[..unit_at]
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_mul(sign))
        .ok_or_else(invalid)?;

    let offset = match unit {
        'd' => Duration::try_days(count),
        'w' => Duration::try_weeks(count),
        _ => {
            return Err(TrackerError::InvalidInput(format!(
                "Unknown unit in relative date: {}",
                unit
            )))
        }
    };
    offset
        .map(Some)
        .ok_or_else(|| TrackerError::InvalidInput(format!("Date out of range: {}", input)))
}

/// Parses `YYYY-MM` into `(year, month)`.
pub fn parse_month(input: &str) -> Result<(i32, u32)> {
    let invalid = || TrackerError::InvalidInput(format!("Invalid month (expected YYYY-MM): {}", input));
    let (y, m) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Last day of the given month.
pub fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year.checked_add(1)?, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
}

/// The day a month-to-date report should run through: `today` inside the
/// current month, the month's last day for past months.
pub fn report_day(year: i32, month: u32, today: NaiveDate) -> Option<NaiveDate> {
    if today.year() == year && today.month() == month {
        Some(today)
    } else {
        end_of_month(year, month)
    }
}
