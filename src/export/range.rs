// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::today;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Inclusive timestamp window used by `list`, `stats` and `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Whole days from `first` to `last`, both included.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_hms_opt(23, 59, 59).unwrap_or(last.and_time(NaiveTime::MIN)),
        }
    }

    /// The last `n` days including today (`n = 7` is "this week so far").
    pub fn last_days(n: u32) -> Self {
        let end = today();
        let start = end
            .checked_sub_days(Days::new(u64::from(n.max(1) - 1)))
            .unwrap_or(NaiveDate::MIN);
        Self::days(start, end)
    }

    /// Parse a `--range` expression, see [`parse_range`].
    pub fn parse(r: &str) -> AppResult<Self> {
        let (first, last) = parse_range(r)?;
        Ok(Self::days(first, last))
    }

    /// `--range` / `--days` flags to an optional window; `all` means none.
    pub fn from_flags(range: Option<&str>, days: Option<u32>) -> AppResult<Option<Self>> {
        match (range, days) {
            (Some(r), _) if r.eq_ignore_ascii_case("all") => Ok(None),
            (Some(r), _) => Self::parse(r).map(Some),
            (None, Some(n)) => Ok(Some(Self::last_days(n))),
            (None, None) => Ok(None),
        }
    }
}

/// Parse --range (year / month / day / intervallo).
///
/// Supporta:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{r}: start and end must have the same format"
            )));
        }

        let (first, _) = period_bounds(start)?;
        let (_, last) = period_bounds(end)?;
        if first > last {
            return Err(AppError::InvalidDate(format!("{r}: start is after end")));
        }
        Ok((first, last))
    } else {
        period_bounds(r)
    }
}

/// First and last day of a single YYYY, YYYY-MM or YYYY-MM-DD period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        // YYYY-MM
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((first, month_last_day(first).ok_or_else(invalid)?))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(format!(
            "{p}: unsupported --range format"
        ))),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
