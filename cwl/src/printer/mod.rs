use std::io::Write;

use anyhow::Result;
use chrono::{SecondsFormat, TimeZone, Utc};

use crate::client::LogEvent;

#[derive(Debug)]
pub struct Printer<W: Write> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print(&mut self, event: &LogEvent) -> Result<()> {
        writeln!(self.out, "{}", format_event(event))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn format_event(event: &LogEvent) -> String {
    let timestamp = match Utc.timestamp_millis_opt(event.timestamp).single() {
        Some(t) => t.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => event.timestamp.to_string(),
    };
    format!(
        "{} {} {}",
        timestamp,
        event.stream,
        event.message.trim_end_matches(&['\r', '\n'][..])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(timestamp: i64, message: &str) -> LogEvent {
        LogEvent {
            event_id: "1".to_owned(),
            timestamp,
            stream: "2021/06/01/[$LATEST]abc".to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn formats_timestamp_stream_and_message() {
        assert_eq!(
            format_event(&event(1622548800123, "START RequestId: 42\n")),
            "2021-06-01T12:00:00.123Z 2021/06/01/[$LATEST]abc START RequestId: 42"
        );
    }

    #[test]
    fn keeps_inner_newlines() {
        assert_eq!(
            format_event(&event(0, "line 1\nline 2\r\n")),
            "1970-01-01T00:00:00.000Z 2021/06/01/[$LATEST]abc line 1\nline 2"
        );
    }

    #[test]
    fn prints_one_line_per_event() {
        let mut printer = Printer::new(Vec::new());
        printer.print(&event(0, "a")).unwrap();
        printer.print(&event(1000, "b")).unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.ends_with("b\n"));
    }
}
