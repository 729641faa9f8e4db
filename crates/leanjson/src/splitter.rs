//! Partitions the body of an object or array into its top-level members.
//!
//! The splitter does not parse values. It only finds the commas (and, for
//! objects, the colons) that sit outside any string and outside any nested
//! `{}` or `[]`, and records where each member starts and ends. Nested values
//! are split again when the decoder recurses into them.

use std::ops::Range;

use bstr::ByteSlice;

use crate::error::Error;

/// Byte range into the body that was split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Span {
    pub(crate) fn range(self) -> Range<usize> {
        self.start..self.end
    }

    fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

/// One top-level member. `key` excludes the surrounding quotes and is still
/// escaped; `value` is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Member {
    pub(crate) key: Option<Span>,
    pub(crate) value: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// JSON insignificant whitespace.
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Strips JSON whitespace from both ends.
pub(crate) fn trim(input: &[u8]) -> &[u8] {
    input.trim_with(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}

/// Splits the inside of `{...}` into `"key": value` members, appending them to
/// `out`. `body` must not be empty after trimming.
pub(crate) fn split_members(body: &[u8], out: &mut Vec<Member>) -> Result<(), Error> {
    split(body, Container::Object, out)
}

/// Splits the inside of `[...]` into elements, appending them to `out`.
/// `body` must not be empty after trimming.
pub(crate) fn split_elements(body: &[u8], out: &mut Vec<Member>) -> Result<(), Error> {
    split(body, Container::Array, out)
}

fn split(body: &[u8], container: Container, out: &mut Vec<Member>) -> Result<(), Error> {
    let mut in_string = false;
    let mut escaped = false;
    let mut braces = 0usize;
    let mut brackets = 0usize;
    let mut start = 0;
    let mut colon = None;

    for (i, &b) in body.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        let top_level = braces == 0 && brackets == 0;
        match b {
            b'"' => in_string = true,
            b'{' => braces += 1,
            b'[' => brackets += 1,
            b'}' => {
                braces = braces
                    .checked_sub(1)
                    .ok_or_else(|| Error::invalid_at("unexpected '}'", body))?;
            }
            b']' => {
                brackets = brackets
                    .checked_sub(1)
                    .ok_or_else(|| Error::invalid_at("unexpected ']'", body))?;
            }
            b':' if top_level && container == Container::Object && colon.is_none() => {
                colon = Some(i);
            }
            b',' if top_level => {
                push_member(body, start..i, colon.take(), container, out)?;
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_string {
        return Err(Error::invalid_at("unterminated string", body));
    }
    if braces != 0 || brackets != 0 {
        return Err(Error::invalid_at("unbalanced brackets", body));
    }
    push_member(body, start..body.len(), colon, container, out)
}

fn push_member(
    body: &[u8],
    range: Range<usize>,
    colon: Option<usize>,
    container: Container,
    out: &mut Vec<Member>,
) -> Result<(), Error> {
    let whole = trim_span(body, range.clone());
    if whole.is_empty() {
        return Err(Error::invalid_at("empty member (stray comma)", body));
    }

    let member = match container {
        Container::Array => Member {
            key: None,
            value: whole,
        },
        Container::Object => {
            let member = &body[range.clone()];
            let colon =
                colon.ok_or_else(|| Error::invalid_at("expected ':' after object key", member))?;
            let key = trim_span(body, range.start..colon);
            let value = trim_span(body, colon + 1..range.end);
            let quoted = key.end - key.start >= 2
                && body[key.start] == b'"'
                && body[key.end - 1] == b'"';
            if !quoted {
                return Err(Error::invalid_at("object key must be a string", member));
            }
            if value.is_empty() {
                return Err(Error::invalid_at("missing value after ':'", member));
            }
            Member {
                key: Some(Span {
                    start: key.start + 1,
                    end: key.end - 1,
                }),
                value,
            }
        }
    };
    out.push(member);
    Ok(())
}

fn trim_span(body: &[u8], range: Range<usize>) -> Span {
    let mut start = range.start;
    let mut end = range.end;
    while start < end && is_whitespace(body[start]) {
        start += 1;
    }
    while end > start && is_whitespace(body[end - 1]) {
        end -= 1;
    }
    Span { start, end }
}
