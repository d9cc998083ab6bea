//! Date function family
//!
//! Actions: `now` (format the current instant), `format` (re-render a
//! date-shaped source), `shift` (signed date arithmetic). The family
//! default action is `now`.
//!
//! Date-shaped sources are strings (RFC 3339 unless the turn supplies
//! an `inFormat`) or integer epoch milliseconds, the wire encoding
//! legacy callers used for date fields. Null sources pass through as
//! null for `format` and `shift`; a source that is present but not
//! date-shaped is a value-conversion failure.
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

pub mod pattern;

use crate::access;
use crate::turn::{TurnFunction, TurnSpec};
use crate::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use std::sync::Arc;

/// Default long-form output format for the `now` action
pub const LONG_FORMAT: &str = "%B %-d, %Y %H:%M:%S %z";

/// Source of the current instant
///
/// `now` reads its timestamp through this capability so evaluations can
/// be pinned to a fixed instant under test; production engines use
/// [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Extract an optional, strictly-string format parameter
fn format_param<'a>(turn: &TurnSpec<'a>, field: &str) -> Result<Option<&'a str>> {
    match turn.field(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| {
            Error::malformed_turn(
                field,
                format!("expected a string, got {}", access::type_name(value)),
                None,
            )
        }),
    }
}

/// Parse a date-shaped source value
fn parse_datetime(source: &Value, in_format: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match source {
        Value::Number(n) => {
            let millis = n.as_i64().ok_or_else(|| {
                Error::conversion(format!("'{}' is not an integer epoch millisecond value", n))
            })?;
            DateTime::from_timestamp_millis(millis)
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| {
                    Error::conversion(format!("epoch milliseconds {} out of range", millis))
                })
        }
        Value::String(s) => match in_format {
            Some(raw) => {
                let fmt = pattern::compile("inFormat", raw)?;
                DateTime::parse_from_str(s, &fmt)
                    .or_else(|_| {
                        chrono::NaiveDateTime::parse_from_str(s, &fmt)
                            .map(|ndt| ndt.and_utc().fixed_offset())
                    })
                    .or_else(|_| {
                        NaiveDate::parse_from_str(s, &fmt)
                            .map(|d| d.and_time(NaiveTime::MIN).and_utc().fixed_offset())
                    })
                    .map_err(|e| {
                        Error::conversion_with_source(
                            format!("cannot parse '{}' with format '{}'", s, raw),
                            e,
                        )
                    })
            }
            None => DateTime::parse_from_rfc3339(s)
                .or_else(|_| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .map(|d| d.and_time(NaiveTime::MIN).and_utc().fixed_offset())
                })
                .map_err(|e| {
                    Error::conversion_with_source(
                        format!("'{}' is not an RFC 3339 timestamp or calendar date", s),
                        e,
                    )
                }),
        },
        other => Err(Error::conversion(format!(
            "expected a date-shaped string or epoch milliseconds, got {}",
            access::type_name(other)
        ))),
    }
}

fn render(dt: &DateTime<FixedOffset>, field: &str, raw: &str) -> Result<String> {
    let fmt = pattern::compile(field, raw)?;
    Ok(dt.format(&fmt).to_string())
}

/// `now`: format the current instant, ignoring the source fragment
///
/// Parameters: `outFormat` (default [`LONG_FORMAT`]).
pub struct NowFunction {
    clock: Arc<dyn Clock>,
}

impl NowFunction {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for NowFunction {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl TurnFunction for NowFunction {
    fn execute(&self, _source: &Value, turn: &TurnSpec<'_>) -> Result<Value> {
        let raw = turn.str_or("outFormat", LONG_FORMAT);
        let now = self.clock.now().fixed_offset();
        Ok(Value::String(render(&now, "outFormat", raw)?))
    }
}

/// `format`: re-render a date-shaped source
///
/// Parameters: `inFormat` (default RFC 3339 / calendar date),
/// `outFormat` (default RFC 3339). Null passes through as null.
pub struct FormatFunction;

impl TurnFunction for FormatFunction {
    fn execute(&self, source: &Value, turn: &TurnSpec<'_>) -> Result<Value> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let in_format = format_param(turn, "inFormat")?;
        let dt = parse_datetime(source, in_format)?;
        let rendered = match format_param(turn, "outFormat")? {
            Some(raw) => render(&dt, "outFormat", raw)?,
            None => dt.to_rfc3339(),
        };
        Ok(Value::String(rendered))
    }
}

/// `shift`: signed date arithmetic on a date-shaped source
///
/// Parameters: `days` / `hours` / `minutes` / `seconds` (integers,
/// default 0), `inFormat`, `outFormat` (default: `inFormat` when
/// given, RFC 3339 otherwise). Null passes through as null.
pub struct ShiftFunction;

impl ShiftFunction {
    fn delta(turn: &TurnSpec<'_>) -> Result<Duration> {
        let parts = [
            Duration::try_days(turn.i64_or("days", 0)),
            Duration::try_hours(turn.i64_or("hours", 0)),
            Duration::try_minutes(turn.i64_or("minutes", 0)),
            Duration::try_seconds(turn.i64_or("seconds", 0)),
        ];
        let mut total = Duration::zero();
        for part in parts {
            total = part
                .and_then(|p| total.checked_add(&p))
                .ok_or_else(|| {
                    Error::malformed_turn("shift", "shift amount out of range", None)
                })?;
        }
        Ok(total)
    }
}

impl TurnFunction for ShiftFunction {
    fn execute(&self, source: &Value, turn: &TurnSpec<'_>) -> Result<Value> {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let in_format = format_param(turn, "inFormat")?;
        let dt = parse_datetime(source, in_format)?;
        let shifted = dt
            .checked_add_signed(Self::delta(turn)?)
            .ok_or_else(|| Error::conversion("shifted timestamp out of range"))?;
        let rendered = match format_param(turn, "outFormat")?.or(in_format) {
            Some(raw) => render(&shifted, "outFormat", raw)?,
            None => shifted.to_rfc3339(),
        };
        Ok(Value::String(rendered))
    }
}
