use chrono::{DateTime, Local, NaiveDateTime, SubsecRound, Timelike};
use std::fmt;

/// Second-resolution timestamp part of an entry name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

const EXTENSION: &str = "json";

/// Parsed name of one archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    pub view: String,
    pub timestamp: NaiveDateTime,
    /// Sub-second part, only used to keep names unique.
    pub millis: Option<u16>,
}

impl EntryName {
    pub fn for_sample(view: &str, at: DateTime<Local>) -> Self {
        let local = at.naive_local();
        // a leap second reports 1000..=1999
        let millis = (local.nanosecond() / 1_000_000).min(999) as u16;

        Self {
            view: view.to_string(),
            timestamp: local.trunc_subsecs(0),
            millis: Some(millis),
        }
    }

    /// Parse `view.ts.json` or `view.ts.mmm.json`; anything else is `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('.').collect();

        let (view, ts, millis, ext) = match parts.as_slice() {
            [view, ts, ext] => (*view, *ts, None, *ext),
            [view, ts, ms, ext] => (*view, *ts, Some(parse_millis(ms)?), *ext),
            _ => return None,
        };

        if view.is_empty() || ext != EXTENSION {
            return None;
        }

        let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;

        Some(Self {
            view: view.to_string(),
            timestamp,
            millis,
        })
    }
}

fn parse_millis(text: &str) -> Option<u16> {
    if text.len() != 3 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.view, self.timestamp.format(TIMESTAMP_FORMAT))?;
        if let Some(ms) = self.millis {
            write!(f, ".{ms:03}")?;
        }
        write!(f, ".{EXTENSION}")
    }
}
