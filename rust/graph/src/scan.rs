// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line scanning for IFC-like text.
//!
//! One logical record per physical line: `#<id> = <TYPE>(...)`. Record
//! headers are parsed with nom; reference tokens are collected with a raw
//! byte scan. Two known approximations, carried from the source semantics
//! on purpose: a `#N` token inside a string literal still counts as a
//! reference, and a record wrapped across physical lines is only scanned
//! as its first line, which can under-count edges.

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::map_res,
    sequence::{delimited, preceded, tuple},
    IResult,
};

fn ws(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ' ' || c == '\t')(input)
}

fn record_id(input: &str) -> IResult<&str, u32> {
    preceded(char('#'), map_res(digit1, |s: &str| s.parse::<u32>()))(input)
}

fn type_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')(input)
}

/// Parse a record definition header: `#<id> = <TYPE>(`.
///
/// Returns the id and type name when the line defines a record, `None`
/// otherwise (header lines, comments, attribute continuations).
pub fn parse_record_header(line: &str) -> Option<(u32, &str)> {
    let result: IResult<&str, (u32, &str)> = tuple((
        delimited(ws, record_id, ws),
        preceded(char('='), delimited(ws, type_name, ws)),
    ))(line);

    match result {
        Ok((rest, (id, name))) if rest.starts_with('(') => Some((id, name)),
        _ => None,
    }
}

/// Parse the leading `#<id>` token of a line, if any.
pub fn leading_id(line: &str) -> Option<u32> {
    let result: IResult<&str, u32> = preceded(ws, record_id)(line);
    result.ok().map(|(_, id)| id)
}

/// Collect every `#<digits>` token on the line, in order of appearance.
/// Duplicates are kept; the caller decides what counts as a reference.
pub fn reference_ids(line: &str) -> Vec<u32> {
    let bytes = line.as_bytes();
    let mut ids = Vec::new();
    let mut pos = 0;

    while let Some(hash) = memchr::memchr(b'#', &bytes[pos..]) {
        let mut i = pos + hash + 1;
        let start = i;
        let mut id: u32 = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            id = id.wrapping_mul(10).wrapping_add((bytes[i] - b'0') as u32);
            i += 1;
        }
        if i > start {
            ids.push(id);
        }
        pos = i;
    }

    ids
}
