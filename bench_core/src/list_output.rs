//! Parser for the client's `SET LIST ON` display format
//!
//! Each result row is rendered as one `<label> <value>` line per column,
//! rows are separated by a blank line, and the output starts with two
//! banner lines. Only the first row is read.

use once_cell::sync::Lazy;
use regex::Regex;
use snafu::{Location, Snafu};

use crate::facts::FactMap;

const HEADER_LINES: usize = 2;

static LIST_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s+(.*)$").unwrap());

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum ListParseError {
    #[snafu(display("List output has {found} line(s), expected at least {HEADER_LINES} header lines"))]
    MissingHeader {
        found: usize,
        #[snafu(implicit)]
        location: Location,
    },
}

/// Parses captured list output into an ordered fact map.
pub fn parse_list_output(output: &str) -> Result<FactMap, ListParseError> {
    parse_list_lines(output.lines())
}

pub fn parse_list_lines<'a, I>(lines: I) -> Result<FactMap, ListParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = lines.into_iter();
    for skipped in 0..HEADER_LINES {
        if lines.next().is_none() {
            return MissingHeaderSnafu { found: skipped }.fail();
        }
    }

    let mut facts = FactMap::new();
    for line in lines {
        if line.trim().is_empty() {
            break;
        }
        match LIST_LINE.captures(line) {
            Some(captures) => {
                let key = &captures[1];
                let value = captures[2].trim();
                if !facts.insert_value(key, value) {
                    tracing::debug!("Ignoring duplicate list entry for {key}");
                }
            }
            None => tracing::debug!("Skipping malformed list line: {line:?}"),
        }
    }
    Ok(facts)
}
