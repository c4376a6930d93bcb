//! Scanning of preprocessed `<krb5.h>` output.
//!
//! The probe source (see [`crate::probe_source`]) places one marker line per
//! native constant inside an `#ifdef` guard, so a marker only survives preprocessing when
//! the vendor defines the macro. Everything before the first marker is the expanded
//! vendor header, which is searched for function declarations.

use std::collections::{BTreeMap, BTreeSet};

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, space1};
use nom::combinator::{recognize, rest};
use nom::multi::many0_count;
use nom::sequence::{pair, preceded, separated_pair};
use nom::IResult;

use crate::catalog::{canaries, NATIVE_CONSTANTS};
use crate::error::ProbeError;
use crate::literal::parse_c_int;

pub const MARKER: &str = "krb5compat_native";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderScan {
    /// Marker key to native value, only for macros the vendor defines.
    pub natives: BTreeMap<String, i32>,
    /// Canary identifiers declared as functions by the vendor header.
    pub declared: BTreeSet<String>,
}

impl HeaderScan {
    pub fn native(&self, key: &str) -> Option<i32> {
        self.natives.get(key).copied()
    }

    pub fn declares(&self, api: &str) -> bool {
        self.declared.contains(api)
    }
}

pub(crate) fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn marker_line(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(pair(tag(MARKER), space1), separated_pair(identifier, space1, rest))(input)
}

pub fn scan_expanded(expanded: &str) -> Result<HeaderScan, ProbeError> {
    let mut scan = HeaderScan::default();
    let mut header_end = expanded.len();

    let mut offset = 0;
    for line in expanded.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with(MARKER) {
            header_end = header_end.min(offset);

            let (_, (key, expansion)) =
                marker_line(trimmed).map_err(|_| ProbeError::Marker(trimmed.to_string()))?;

            let Some(constant) = NATIVE_CONSTANTS.iter().find(|constant| constant.key == key) else {
                return Err(ProbeError::Marker(trimmed.to_string()));
            };

            let value = parse_c_int(constant.macro_name, expansion)?;
            scan.natives.insert(key.to_string(), value);
        }
        offset += line.len();
    }

    scan.declared = declared_functions(&expanded[..header_end]);
    Ok(scan)
}

/// Canaries that appear as `name (` anywhere in `header`.
fn declared_functions(header: &str) -> BTreeSet<String> {
    let wanted: BTreeSet<&str> = canaries().collect();
    let mut found = BTreeSet::new();

    let mut remaining = header;
    while let Some(start) = remaining.find(|c: char| c == '_' || c.is_ascii_alphabetic()) {
        let candidate = &remaining[start..];
        let (after, name) = match identifier(candidate) {
            Ok(parsed) => parsed,
            Err(_) => break,
        };

        if after.trim_start().starts_with('(') && wanted.contains(name) {
            found.insert(name.to_string());
        }

        remaining = after;
    }

    found
}
