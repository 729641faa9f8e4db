//! Recursive-descent decode into a writable descriptor.
//!
//! Parsing is driven by the destination: the decoder looks at the kind it is
//! asked to fill and accepts only the JSON token that fits it. Object and array
//! bodies are partitioned by the splitter, and each member is decoded by
//! recursing on its byte range. Errors abort the whole call; fields written
//! before the failure keep their new values.

use bstr::ByteSlice;

use crate::{
    context::OperationContext,
    descriptor::{DescriptorMut, Scalar},
    error::Error,
    escape::unescape_into,
    kind::Kind,
    splitter::{split_elements, split_members, trim},
    type_cache::StructTypeInfo,
};

pub(crate) struct Decoder<'c> {
    ctx: &'c mut OperationContext,
    max_depth: usize,
}

impl<'c> Decoder<'c> {
    pub(crate) fn new(ctx: &'c mut OperationContext, max_depth: usize) -> Self {
        Self { ctx, max_depth }
    }

    pub(crate) fn decode(&mut self, input: &[u8], target: DescriptorMut<'_>) -> Result<(), Error> {
        self.value(input, target, 0)
    }

    fn value(
        &mut self,
        input: &[u8],
        mut target: DescriptorMut<'_>,
        depth: usize,
    ) -> Result<(), Error> {
        let input = trim(input);
        if input.is_empty() {
            return Err(Error::invalid("empty JSON"));
        }
        match target.kind() {
            Kind::String => self.string(input, &mut target),
            Kind::Int(_) => int(input, &mut target),
            Kind::Uint(_) => uint(input, &mut target),
            Kind::Float32 | Kind::Float64 => float(input, &mut target),
            Kind::Bool => boolean(input, &mut target),
            Kind::Struct => self.object(input, &mut target, depth),
            Kind::Slice => self.array(input, &mut target, depth),
            Kind::Pointer => self.pointer(input, &mut target, depth),
            Kind::Invalid => Err(Error::unsupported(format!(
                "cannot decode into {}",
                target.unsupported_type().unwrap_or("an absent value")
            ))),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize, Error> {
        if depth >= self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(depth + 1)
    }

    fn string(&mut self, input: &[u8], target: &mut DescriptorMut<'_>) -> Result<(), Error> {
        let body = strip_delimiters(input, b'"', b'"').ok_or_else(|| mismatch("string", input))?;
        unescape_into(body, &mut self.ctx.escape)?;
        let text = self
            .ctx
            .escape
            .to_str()
            .map_err(|_| Error::invalid_at("string is not valid UTF-8", input))?;
        target.write_scalar(Scalar::Str(text))
    }

    fn object(
        &mut self,
        input: &[u8],
        target: &mut DescriptorMut<'_>,
        depth: usize,
    ) -> Result<(), Error> {
        let depth = self.enter(depth)?;
        let body = strip_delimiters(input, b'{', b'}').ok_or_else(|| mismatch("object", input))?;
        let body = trim(body);
        if body.is_empty() {
            return Ok(());
        }
        let info = target.struct_info()?;

        let base = self.ctx.members.len();
        let result = self.members(body, target, &info, base, depth);
        self.ctx.members.truncate(base);
        result
    }

    fn members(
        &mut self,
        body: &[u8],
        target: &mut DescriptorMut<'_>,
        info: &StructTypeInfo,
        base: usize,
        depth: usize,
    ) -> Result<(), Error> {
        split_members(body, &mut self.ctx.members)?;
        for slot in base..self.ctx.members.len() {
            let member = self.ctx.members[slot];
            let Some(key) = member.key else {
                continue;
            };
            let value = &body[member.value.range()];
            let Some(index) = self.resolve_key(&body[key.range()], info)? else {
                self.skip(value, depth)?;
                continue;
            };
            let field = target.field_mut(index)?;
            if field.is_absent() {
                self.skip(value, depth)?;
                continue;
            }
            self.value(value, field, depth)?;
        }
        Ok(())
    }

    fn resolve_key(&mut self, raw: &[u8], info: &StructTypeInfo) -> Result<Option<usize>, Error> {
        let ctx = &mut *self.ctx;
        let key = if raw.contains(&b'\\') {
            unescape_into(raw, &mut ctx.escape)?;
            ctx.escape.to_str()
        } else {
            raw.to_str()
        }
        .map_err(|_| Error::invalid_at("object key is not valid UTF-8", raw))?;
        Ok(info.resolve(key, ctx.separator, &mut ctx.text))
    }

    fn array(
        &mut self,
        input: &[u8],
        target: &mut DescriptorMut<'_>,
        depth: usize,
    ) -> Result<(), Error> {
        let depth = self.enter(depth)?;
        let body = strip_delimiters(input, b'[', b']').ok_or_else(|| mismatch("array", input))?;
        let element = target.element_kind()?;
        if !matches!(
            element,
            Kind::String | Kind::Int(_) | Kind::Float32 | Kind::Float64 | Kind::Bool | Kind::Struct
        ) {
            return Err(Error::unsupported(format!(
                "cannot decode arrays into slices of {element}"
            )));
        }
        let body = trim(body);
        if body.is_empty() {
            return target.set_len(0);
        }

        let base = self.ctx.members.len();
        let result = self.elements(body, target, base, depth);
        self.ctx.members.truncate(base);
        result
    }

    fn elements(
        &mut self,
        body: &[u8],
        target: &mut DescriptorMut<'_>,
        base: usize,
        depth: usize,
    ) -> Result<(), Error> {
        split_elements(body, &mut self.ctx.members)?;
        target.set_len(self.ctx.members.len() - base)?;
        for (index, slot) in (base..self.ctx.members.len()).enumerate() {
            let member = self.ctx.members[slot];
            let element = target.index_mut(index)?;
            self.value(&body[member.value.range()], element, depth)?;
        }
        Ok(())
    }

    fn pointer(
        &mut self,
        input: &[u8],
        target: &mut DescriptorMut<'_>,
        depth: usize,
    ) -> Result<(), Error> {
        // `null` leaves the pointer as it is, set or not.
        if input == b"null" {
            return Ok(());
        }
        let depth = self.enter(depth)?;
        let mut pointee = target.alloc_pointee()?;
        self.value(input, pointee.descriptor_mut(), depth)?;
        target.bind_pointee(pointee)
    }

    /// Checks the syntax of a value that no field takes, without storing it.
    fn skip(&mut self, input: &[u8], depth: usize) -> Result<(), Error> {
        let input = trim(input);
        match input.first() {
            None => Err(Error::invalid("empty JSON")),
            Some(b'"') => self.skip_string(input),
            Some(&open @ (b'{' | b'[')) => {
                let depth = self.enter(depth)?;
                let close = if open == b'{' { b'}' } else { b']' };
                let body = strip_delimiters(input, open, close)
                    .ok_or_else(|| Error::invalid_at("unterminated value", input))?;
                let body = trim(body);
                if body.is_empty() {
                    return Ok(());
                }
                let base = self.ctx.members.len();
                let result = self.skip_members(body, open == b'{', base, depth);
                self.ctx.members.truncate(base);
                result
            }
            _ if matches!(input, b"true" | b"false" | b"null") || is_number(input) => Ok(()),
            _ => Err(Error::invalid_at("invalid value", input)),
        }
    }

    fn skip_members(
        &mut self,
        body: &[u8],
        object: bool,
        base: usize,
        depth: usize,
    ) -> Result<(), Error> {
        if object {
            split_members(body, &mut self.ctx.members)?;
        } else {
            split_elements(body, &mut self.ctx.members)?;
        }
        for slot in base..self.ctx.members.len() {
            let member = self.ctx.members[slot];
            if let Some(key) = member.key {
                unescape_into(&body[key.range()], &mut self.ctx.escape)?;
            }
            self.skip(&body[member.value.range()], depth)?;
        }
        Ok(())
    }

    fn skip_string(&mut self, input: &[u8]) -> Result<(), Error> {
        let body = strip_delimiters(input, b'"', b'"').ok_or_else(|| mismatch("string", input))?;
        unescape_into(body, &mut self.ctx.escape)?;
        self.ctx
            .escape
            .to_str()
            .map(|_| ())
            .map_err(|_| Error::invalid_at("string is not valid UTF-8", input))
    }
}

fn int(input: &[u8], target: &mut DescriptorMut<'_>) -> Result<(), Error> {
    let text = number(input)?;
    let value = parse_i64(text).ok_or_else(|| {
        Error::invalid_at(format!("number out of range for {}", target.kind()), input)
    })?;
    target.write_scalar(Scalar::Int(value))
}

fn uint(input: &[u8], target: &mut DescriptorMut<'_>) -> Result<(), Error> {
    let text = number(input)?;
    let value = match text.strip_prefix('-') {
        // `-0` and `-0.9` truncate to zero and are accepted.
        Some(magnitude) => match parse_u64(magnitude) {
            Some(0) => 0,
            _ => {
                return Err(Error::invalid_at(
                    format!("negative number for {}", target.kind()),
                    input,
                ));
            }
        },
        None => parse_u64(text).ok_or_else(|| {
            Error::invalid_at(format!("number out of range for {}", target.kind()), input)
        })?,
    };
    target.write_scalar(Scalar::Uint(value))
}

fn float(input: &[u8], target: &mut DescriptorMut<'_>) -> Result<(), Error> {
    let text = number(input)?;
    let invalid = |_| Error::invalid_at("invalid number", input);
    // f32 destinations are parsed at f32 precision.
    let value = if target.kind() == Kind::Float32 {
        f64::from(text.parse::<f32>().map_err(invalid)?)
    } else {
        text.parse::<f64>().map_err(invalid)?
    };
    if !value.is_finite() {
        return Err(Error::invalid_at(
            format!("number out of range for {}", target.kind()),
            input,
        ));
    }
    target.write_scalar(Scalar::Float(value))
}

fn boolean(input: &[u8], target: &mut DescriptorMut<'_>) -> Result<(), Error> {
    let value = match input {
        b"true" => true,
        b"false" => false,
        _ => return Err(mismatch("boolean", input)),
    };
    target.write_scalar(Scalar::Bool(value))
}

/// Checks that `input` is a JSON number token and returns it as text.
fn number(input: &[u8]) -> Result<&str, Error> {
    if !matches!(input.first(), Some(b'-' | b'0'..=b'9')) {
        return Err(mismatch("number", input));
    }
    if !is_number(input) {
        return Err(Error::invalid_at("invalid number", input));
    }
    input
        .to_str()
        .map_err(|_| Error::invalid_at("invalid number", input))
}

/// `-? (0 | [1-9][0-9]*) (\.[0-9]+)? ([eE][+-]?[0-9]+)?`
fn is_number(input: &[u8]) -> bool {
    let digits = |i: usize| input[i..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut i = usize::from(input.first() == Some(&b'-'));
    match input.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += digits(i),
        _ => return false,
    }
    if input.get(i) == Some(&b'.') {
        let n = digits(i + 1);
        if n == 0 {
            return false;
        }
        i += 1 + n;
    }
    if matches!(input.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(input.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = digits(i);
        if n == 0 {
            return false;
        }
        i += n;
    }
    i == input.len()
}

fn is_integral(text: &str) -> bool {
    !text.contains(['.', 'e', 'E'])
}

/// Parses a validated number, truncating any fraction toward zero.
#[allow(clippy::cast_possible_truncation)]
fn parse_i64(text: &str) -> Option<i64> {
    if is_integral(text) {
        return text.parse().ok();
    }
    let truncated = text.parse::<f64>().ok()?.trunc();
    // i64::MIN is exactly representable; i64::MAX + 1 is the first value out.
    (truncated >= -9_223_372_036_854_775_808.0 && truncated < 9_223_372_036_854_775_808.0)
        .then_some(truncated as i64)
}

/// Parses a validated, non-negative number, truncating any fraction.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_u64(text: &str) -> Option<u64> {
    if is_integral(text) {
        return text.parse().ok();
    }
    let truncated = text.parse::<f64>().ok()?.trunc();
    (truncated >= 0.0 && truncated < 18_446_744_073_709_551_616.0).then_some(truncated as u64)
}

fn strip_delimiters(input: &[u8], open: u8, close: u8) -> Option<&[u8]> {
    match input {
        [first, body @ .., last] if *first == open && *last == close => Some(body),
        _ => None,
    }
}

/// Kind mismatch between the destination and the token found.
fn mismatch(expected: &str, input: &[u8]) -> Error {
    let found = match input.first() {
        Some(b'"') => "string",
        Some(b'{') => "object",
        Some(b'[') => "array",
        Some(b'-' | b'0'..=b'9') => "number",
        _ if input == b"true" || input == b"false" => "boolean",
        _ if input == b"null" => "null",
        _ => "invalid token",
    };
    Error::invalid_at(format!("expected {expected} but got {found}"), input)
}
