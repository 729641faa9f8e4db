//! String quoting for output and unescaping for input.

use crate::error::Error;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Appends `s` to `out` as a quoted JSON string.
///
/// `"` and `\` and the control characters with short forms are written as
/// two-character escapes; every other byte below `0x20` becomes `\u00xx` with
/// lower-case hex. Everything else, including non-ASCII text, is copied as is.
pub(crate) fn write_quoted(out: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    out.reserve(bytes.len() + 2);
    out.push(b'"');
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let short: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            0x08 => b"\\b",
            0x0C => b"\\f",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x00..=0x1F => &[],
            _ => continue,
        };
        out.extend_from_slice(&bytes[start..i]);
        start = i + 1;
        if short.is_empty() {
            out.extend_from_slice(b"\\u00");
            out.push(HEX[usize::from(b >> 4)]);
            out.push(HEX[usize::from(b & 0x0F)]);
        } else {
            out.extend_from_slice(short);
        }
    }
    out.extend_from_slice(&bytes[start..]);
    out.push(b'"');
}

/// Decodes the body of a JSON string literal (without its quotes) into `out`.
///
/// `out` is cleared first. The result is not checked for UTF-8 validity.
pub(crate) fn unescape_into(raw: &[u8], out: &mut Vec<u8>) -> Result<(), Error> {
    out.clear();
    out.reserve(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let run = raw[i..]
            .iter()
            .position(|&b| b == b'\\' || b == b'"' || b < 0x20)
            .map_or(raw.len(), |p| i + p);
        out.extend_from_slice(&raw[i..run]);
        i = run;
        let Some(&b) = raw.get(i) else {
            break;
        };

        match b {
            b'"' => return Err(Error::invalid_at("unescaped quote in string", raw)),
            b'\\' => {}
            _ => return Err(Error::invalid_at("unescaped control character in string", raw)),
        }

        let Some(&escape) = raw.get(i + 1) else {
            return Err(Error::invalid_at("dangling escape at end of string", raw));
        };
        let decoded = match escape {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                let ch = unicode_escape(raw, i)?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                i += 6;
                continue;
            }
            other => {
                return Err(Error::invalid_at(
                    format!("invalid escape '\\{}'", char::from(other)),
                    raw,
                ));
            }
        };
        out.push(decoded);
        i += 2;
    }
    Ok(())
}

/// Decodes the `\uXXXX` escape starting at `raw[at]`.
fn unicode_escape(raw: &[u8], at: usize) -> Result<char, Error> {
    let digits = raw
        .get(at + 2..at + 6)
        .ok_or_else(|| Error::invalid_at("truncated \\u escape", raw))?;
    let mut code = 0u32;
    for &d in digits {
        let nibble = char::from(d)
            .to_digit(16)
            .ok_or_else(|| Error::invalid_at("invalid hex digit in \\u escape", raw))?;
        code = (code << 4) | nibble;
    }
    // Surrogate halves are never combined into pairs.
    char::from_u32(code)
        .ok_or_else(|| Error::invalid_at(format!("unsupported surrogate \\u{code:04x}"), raw))
}
