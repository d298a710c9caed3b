//! Deadline and meeting time parsing.
//!
//! Human input uses minute precision (`YYYY-MM-DD HH:MM`) interpreted as UTC.
//! RFC 3339 timestamps are accepted as well so API clients can send offsets.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Minute-precision input format, interpreted as UTC.
pub const DEADLINE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Errors raised while parsing user-supplied timestamps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeadlineError {
    /// Neither the `YYYY-MM-DD HH:MM` form nor RFC 3339.
    #[error("unrecognised deadline '{input}'; expected YYYY-MM-DD HH:MM (UTC) or RFC 3339")]
    Unparsable { input: String },
    /// Deadline at or before the current instant.
    #[error("deadline {deadline} is not in the future")]
    NotInFuture { deadline: String },
    /// Meeting date not in `YYYY-MM-DD` form.
    #[error("unrecognised date '{input}'; expected YYYY-MM-DD")]
    BadDate { input: String },
    /// Meeting time not in `HH:MM` form.
    #[error("unrecognised time '{input}'; expected HH:MM")]
    BadTime { input: String },
}

/// Parse an optional deadline; blank input means no deadline.
///
/// # Examples
/// ```
/// use mission_board::domain::parse_deadline;
///
/// assert_eq!(parse_deadline("  ").unwrap(), None);
/// let deadline = parse_deadline("2030-01-02 03:04").unwrap().unwrap();
/// assert_eq!(deadline.to_rfc3339(), "2030-01-02T03:04:00+00:00");
/// ```
pub fn parse_deadline(raw: &str) -> Result<Option<DateTime<Utc>>, DeadlineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, DEADLINE_INPUT_FORMAT) {
        return Ok(Some(naive.and_utc()));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|_| DeadlineError::Unparsable {
            input: trimmed.to_owned(),
        })
}

/// Reject deadlines at or before `now`.
pub fn ensure_future(
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, DeadlineError> {
    if deadline <= now {
        return Err(DeadlineError::NotInFuture {
            deadline: format_deadline(deadline),
        });
    }
    Ok(deadline)
}

/// Combine separate date and time fields into a UTC instant.
pub fn parse_meeting_start(date: &str, time: &str) -> Result<DateTime<Utc>, DeadlineError> {
    let date = date.trim();
    let time = time.trim();
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| DeadlineError::BadDate {
        input: date.to_owned(),
    })?;
    let clock = NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| DeadlineError::BadTime {
        input: time.to_owned(),
    })?;
    Ok(day.and_time(clock).and_utc())
}

/// Display form used in listings and reminders.
pub fn format_deadline(deadline: DateTime<Utc>) -> String {
    format!("{} UTC", deadline.format(DEADLINE_INPUT_FORMAT))
}
