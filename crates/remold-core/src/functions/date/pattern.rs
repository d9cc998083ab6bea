//! Date format pattern translation
//!
//! Turn documents are language-independent JSON, and their date formats
//! are written with the pattern tokens common to those documents
//! (`yyyy-MM-dd`, `HH:mm:ss`, quoted literals). This module translates
//! such patterns into chrono strftime strings. A format parameter that
//! already contains `%` is taken as strftime and passed through.
//!
//! Translation is table-driven per token run; an unsupported token is a
//! malformed-turn failure on the offending parameter, and the compiled
//! string is validated so formatting can never hit an invalid
//! specifier at render time.
//!
//! Copyright (c) 2026 Remold Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};

/// Translate and validate a format parameter
///
/// `field` names the parameter (`outFormat` / `inFormat`) for error
/// reporting.
pub fn compile(field: &str, pattern: &str) -> Result<String> {
    let fmt = if pattern.contains('%') {
        pattern.to_string()
    } else {
        translate(field, pattern)?
    };
    check_strftime(field, &fmt)?;
    Ok(fmt)
}

fn translate(field: &str, pattern: &str) -> Result<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            // '' is a literal quote, 'text' a quoted literal run
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            let mut closed = false;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                    } else {
                        closed = true;
                        i += 1;
                        break;
                    }
                } else {
                    out.push(chars[i]);
                    i += 1;
                }
            }
            if !closed {
                return Err(Error::malformed_turn(
                    field,
                    format!("unterminated quote in date pattern '{}'", pattern),
                    None,
                ));
            }
        } else if c.is_ascii_alphabetic() {
            let mut run = 1;
            while chars.get(i + run) == Some(&c) {
                run += 1;
            }
            out.push_str(token(field, c, run)?);
            i += run;
        } else {
            out.push(c);
            i += 1;
        }
    }

    Ok(out)
}

fn token(field: &str, letter: char, run: usize) -> Result<&'static str> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', n) if n >= 4 => "%B",
        ('M', 3) => "%b",
        ('M', 2) => "%m",
        ('M', _) => "%-m",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('S', _) => "%3f",
        ('a', _) => "%p",
        ('E', n) if n >= 4 => "%A",
        ('E', _) => "%a",
        ('X', _) => "%:z",
        ('Z', _) => "%z",
        ('z', _) => "%Z",
        _ => {
            return Err(Error::malformed_turn(
                field,
                format!(
                    "unsupported date pattern token '{}'",
                    letter.to_string().repeat(run)
                ),
                Some("tokens y M d E H h m s S a z Z X, or a strftime string".to_string()),
            ))
        }
    };
    Ok(spec)
}

fn check_strftime(field: &str, fmt: &str) -> Result<()> {
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(Error::malformed_turn(
            field,
            format!("'{}' is not a valid format string", fmt),
            None,
        ));
    }
    Ok(())
}
