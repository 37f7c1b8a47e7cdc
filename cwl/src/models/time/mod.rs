use chrono::{DateTime, Utc};
use thiserror::Error;

pub const DEFAULT_LOOKBACK_SECS: i64 = 60;

/// Which end of the query window a time value belongs to.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Bound {
    Start,
    End,
}

#[derive(Debug, PartialEq, Clone, Error)]
#[error("invalid time expression {0:?}")]
pub struct ParseTimeError(String);

impl Bound {
    /// The literal each bound accepts besides an RFC 3339 timestamp.
    pub fn default_literal(self) -> &'static str {
        match self {
            Bound::Start => "1 minute ago",
            Bound::End => "now",
        }
    }

    pub fn default_time(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Bound::Start => now - chrono::Duration::seconds(DEFAULT_LOOKBACK_SECS),
            Bound::End => now,
        }
    }

    /// Accepts the bound's literal default or an RFC 3339 timestamp, nothing else.
    pub fn parse(self, value: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ParseTimeError> {
        if value == self.default_literal() {
            return Ok(self.default_time(now));
        }
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| ParseTimeError(value.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn literal_defaults() {
        assert_eq!(
            Bound::Start.parse("1 minute ago", now()),
            Ok(Utc.with_ymd_and_hms(2021, 6, 1, 11, 59, 0).unwrap())
        );
        assert_eq!(Bound::End.parse("now", now()), Ok(now()));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let expected = Utc.with_ymd_and_hms(2021, 6, 1, 3, 0, 0).unwrap();
        assert_eq!(
            Bound::Start.parse("2021-06-01T12:00:00+09:00", now()),
            Ok(expected)
        );
        assert_eq!(Bound::End.parse("2021-06-01T03:00:00Z", now()), Ok(expected));
    }

    #[test]
    fn literal_of_the_other_bound_is_rejected() {
        assert!(Bound::Start.parse("now", now()).is_err());
        assert!(Bound::End.parse("1 minute ago", now()).is_err());
    }

    #[test]
    fn relative_and_padded_values_are_rejected() {
        assert!(Bound::Start.parse("5m", now()).is_err());
        assert!(Bound::Start.parse("2h 30m", now()).is_err());
        assert!(Bound::Start.parse(" 2021-06-01T10:00:00Z ", now()).is_err());
        assert!(Bound::End.parse(" now", now()).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            Bound::Start.parse("not-a-date", now()),
            Err(ParseTimeError("not-a-date".to_owned()))
        );
        assert!(Bound::End.parse("yesterday", now()).is_err());
        assert!(Bound::End.parse("2021-06-01 12:00", now()).is_err());
        assert!(Bound::End.parse("", now()).is_err());
    }
}
