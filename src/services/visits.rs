//! Session-backed visit counting for the home and about pages.
//!
//! The session handle is passed in explicitly. Two concurrent requests from
//! one session can both observe the same stored state and both count a
//! visit; the store does not provide atomic read-modify-write.

use std::collections::HashMap;

use actix_session::Session;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::visit::{
    LAST_VISIT_KEY, VISITS_KEY, VisitSummary, format_timestamp, parse_timestamp,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VisitError {
    /// A stored value does not have the expected shape.
    #[error("malformed session value for `{key}`: {value:?}")]
    Parse { key: &'static str, value: String },
    #[error("session storage failed: {0}")]
    Session(String),
}

/// String-keyed, string-valued per-session storage.
pub trait VisitStore {
    fn read(&self, key: &str) -> Result<Option<String>, VisitError>;
    fn write(&mut self, key: &str, value: String) -> Result<(), VisitError>;
}

impl VisitStore for HashMap<String, String> {
    fn read(&self, key: &str) -> Result<Option<String>, VisitError> {
        Ok(self.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: String) -> Result<(), VisitError> {
        self.insert(key.to_string(), value);
        Ok(())
    }
}

impl VisitStore for Session {
    fn read(&self, key: &str) -> Result<Option<String>, VisitError> {
        self.get::<String>(key)
            .map_err(|e| VisitError::Session(e.to_string()))
    }

    fn write(&mut self, key: &str, value: String) -> Result<(), VisitError> {
        self.insert(key, value)
            .map_err(|e| VisitError::Session(e.to_string()))
    }
}

fn parse_visits(raw: &str) -> Result<i32, VisitError> {
    match raw.trim().parse::<i32>() {
        Ok(visits) if visits > 0 => Ok(visits),
        _ => Err(VisitError::Parse {
            key: VISITS_KEY,
            value: raw.to_string(),
        }),
    }
}

/// Count the request observed at `now` against the session.
///
/// A session without state counts as visit 1 at `now`. The counter moves by
/// one, and `last_visit` becomes `now`, only once a whole day has elapsed
/// since the stored `last_visit`; otherwise the stored timestamp is written
/// back unchanged. Both keys are written on every call.
pub fn track<S>(session: &mut S, now: NaiveDateTime) -> Result<VisitSummary, VisitError>
where
    S: VisitStore + ?Sized,
{
    let initial = VisitSummary::first(now);

    let visits = match session.read(VISITS_KEY)? {
        Some(raw) => parse_visits(&raw)?,
        None => initial.visits,
    };

    let stored_last_visit = session.read(LAST_VISIT_KEY)?;
    let last_visit = match &stored_last_visit {
        Some(raw) => parse_timestamp(raw).map_err(|_| VisitError::Parse {
            key: LAST_VISIT_KEY,
            value: raw.clone(),
        })?,
        None => initial.last_visit,
    };

    let (summary, counted) = VisitSummary { visits, last_visit }.advance(now);

    let last_visit_raw = match stored_last_visit {
        Some(raw) if !counted => raw,
        _ => format_timestamp(summary.last_visit),
    };

    session.write(VISITS_KEY, summary.visits.to_string())?;
    session.write(LAST_VISIT_KEY, last_visit_raw)?;

    Ok(summary)
}
