use chrono::{DateTime, SecondsFormat, Utc};
use structopt::clap::ErrorKind;
use thiserror::Error;

use crate::models::Bound;
use crate::option::Opt;

// FilterLogEvents accepts at most 10,000 events per call.
pub const MAX_LIMIT: i64 = 10_000;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("help requested")]
    Help,
    #[error("version requested")]
    Version,
    #[error("{0}")]
    Arguments(String),
    #[error("-{0} is required")]
    Missing(&'static str),
    #[error("Start time must be given in RFC 3339 time: {example}")]
    InvalidStart { example: String },
    #[error("End time must be given in RFC 3339 time: {example}")]
    InvalidEnd { example: String },
    #[error("-limit must be between 1 and 10000, got {0}")]
    InvalidLimit(i64),
    #[error("-refresh must be at least 1 second")]
    InvalidRefresh,
    #[error("start time {start} is after end time {end}")]
    InvertedRange { start: String, end: String },
}

impl From<structopt::clap::Error> for ResolveError {
    fn from(e: structopt::clap::Error) -> Self {
        match e.kind {
            ErrorKind::HelpDisplayed => ResolveError::Help,
            ErrorKind::VersionDisplayed => ResolveError::Version,
            // clap appends its own usage block; the full usage is printed separately.
            _ => ResolveError::Arguments(e.message.lines().next().unwrap_or_default().to_owned()),
        }
    }
}

/// A fully validated log query, built once per invocation.
#[derive(Debug, PartialEq, Clone)]
pub struct QueryDescriptor {
    pub profile: Option<String>,
    pub region: String,
    pub group: String,
    pub filter: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub limit: i32,
    pub tail: bool,
    pub refresh: std::time::Duration,
    pub interleaved: bool,
}

/// Parses `args` (program name first) into a query, resolving relative times against `now`.
pub fn resolve<I, T>(args: I, now: DateTime<Utc>) -> Result<QueryDescriptor, ResolveError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let opt = Opt::parse(args)?;
    QueryDescriptor::from_opt(opt, now)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl QueryDescriptor {
    pub fn from_env() -> Result<Self, ResolveError> {
        resolve(std::env::args(), Utc::now())
    }

    pub fn from_opt(opt: Opt, now: DateTime<Utc>) -> Result<Self, ResolveError> {
        if opt.region.is_empty() {
            return Err(ResolveError::Missing("region"));
        }
        if opt.group.is_empty() {
            return Err(ResolveError::Missing("group"));
        }

        let example = now.to_rfc3339_opts(SecondsFormat::Secs, true);

        let start = match opt.start {
            None => Bound::Start.default_time(now),
            Some(value) => Bound::Start
                .parse(&value, now)
                .map_err(|_| ResolveError::InvalidStart {
                    example: example.clone(),
                })?,
        };

        let end = match opt.end {
            None => Bound::End.default_time(now),
            Some(value) => Bound::End
                .parse(&value, now)
                .map_err(|_| ResolveError::InvalidEnd { example })?,
        };

        if opt.limit < 1 || opt.limit > MAX_LIMIT {
            return Err(ResolveError::InvalidLimit(opt.limit));
        }
        if opt.refresh == 0 {
            return Err(ResolveError::InvalidRefresh);
        }
        if start > end {
            return Err(ResolveError::InvertedRange {
                start: start.to_rfc3339_opts(SecondsFormat::Secs, true),
                end: end.to_rfc3339_opts(SecondsFormat::Secs, true),
            });
        }

        Ok(QueryDescriptor {
            profile: non_empty(opt.profile),
            region: opt.region,
            group: opt.group,
            filter: non_empty(opt.filter),
            start,
            end,
            limit: opt.limit as i32,
            tail: opt.tail,
            refresh: std::time::Duration::from_secs(opt.refresh),
            interleaved: opt.interleaved,
        })
    }
}
