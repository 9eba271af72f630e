use regex::Regex;
use std::{fmt, sync::OnceLock};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, Month,
    OffsetDateTime, UtcOffset,
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(thiserror::Error, Debug)]
pub enum TimestampError {
    #[error("Failed to parse instant {value:?}: {source}")]
    Instant {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Timestamp {0:?} is not in \"Mon/DD/YYYY HH AM|PM\" form")]
    Format(String),
    #[error("Timestamp {value:?} has an out of range {field}")]
    Range { value: String, field: &'static str },
    #[error("Failed to parse utc offset {0:?}, expected +HH:MM or -HH:MM")]
    Offset(String),
}

/// Calendar hour used to line up the forecast and UV feeds.
///
/// `month` is zero-indexed (January is 0) and `hour` is on a 24 hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourStamp {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
}

impl HourStamp {
    pub fn new(year: i32, month: u8, day: u8, hour: u8) -> Self {
        HourStamp {
            year,
            month,
            day,
            hour,
        }
    }

    /// Short 12 hour label, e.g. `12 AM`, `2 PM`.
    pub fn label(&self) -> String {
        match self.hour {
            0 => String::from("12 AM"),
            1..=11 => format!("{} AM", self.hour),
            12 => String::from("12 PM"),
            hour => format!("{} PM", hour - 12),
        }
    }
}

impl fmt::Display for HourStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {:02}:00",
            self.year,
            self.month + 1,
            self.day,
            self.hour
        )
    }
}

impl From<OffsetDateTime> for HourStamp {
    fn from(value: OffsetDateTime) -> Self {
        HourStamp {
            year: value.year(),
            month: u8::from(value.month()) - 1,
            day: value.day(),
            hour: value.hour(),
        }
    }
}

/// Parses an RFC 3339 instant and decomposes it at the offset it was written with.
///
/// Forecast periods carry the location's own offset, daylight saving included, which is
/// the same wall clock the UV feed is stamped in.
pub fn parse_feed_hour(value: &str) -> Result<HourStamp, TimestampError> {
    let instant =
        OffsetDateTime::parse(value, &Rfc3339).map_err(|source| TimestampError::Instant {
            value: value.to_string(),
            source,
        })?;
    Ok(instant.into())
}

/// Moves instants onto the observer's wall clock for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    offset: UtcOffset,
}

impl Normalizer {
    pub fn new(offset: UtcOffset) -> Self {
        Normalizer { offset }
    }

    pub fn utc() -> Self {
        Normalizer {
            offset: UtcOffset::UTC,
        }
    }

    pub fn local(&self, instant: OffsetDateTime) -> OffsetDateTime {
        instant.to_offset(self.offset)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::utc()
    }
}

fn uv_stamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z][a-z]{2})/(\d{2})/(\d{4}) (\d{2}) (AM|PM)$")
            .expect("uv timestamp pattern compiles")
    })
}

/// Parses the EPA hourly UV timestamp, e.g. `Jan/01/2024 01 PM`.
///
/// 12 AM is midnight (hour 0) and 12 PM is noon (hour 12).
pub fn parse_uv_stamp(value: &str) -> Result<HourStamp, TimestampError> {
    let captures = uv_stamp_pattern()
        .captures(value.trim())
        .ok_or_else(|| TimestampError::Format(value.to_string()))?;
    let out_of_range = |field| TimestampError::Range {
        value: value.to_string(),
        field,
    };

    let month = MONTHS
        .iter()
        .position(|name| *name == &captures[1])
        .ok_or_else(|| out_of_range("month"))? as u8;
    let day: u8 = captures[2].parse().map_err(|_| out_of_range("day"))?;
    let year: i32 = captures[3].parse().map_err(|_| out_of_range("year"))?;
    let hour12: u8 = captures[4].parse().map_err(|_| out_of_range("hour"))?;
    if !(1..=12).contains(&hour12) {
        return Err(out_of_range("hour"));
    }

    let calendar_month = Month::try_from(month + 1).map_err(|_| out_of_range("month"))?;
    Date::from_calendar_date(year, calendar_month, day).map_err(|_| out_of_range("day"))?;

    let hour = match (hour12, &captures[5]) {
        (12, "AM") => 0,
        (12, _) => 12,
        (hour, "AM") => hour,
        (hour, _) => hour + 12,
    };
    Ok(HourStamp::new(year, month, day, hour))
}

/// Parses `+HH:MM`/`-HH:MM`, also accepting `Z` and `UTC`.
pub fn parse_offset(value: &str) -> Result<UtcOffset, TimestampError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(UtcOffset::UTC);
    }
    let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");
    UtcOffset::parse(trimmed, &format).map_err(|_| TimestampError::Offset(value.to_string()))
}
