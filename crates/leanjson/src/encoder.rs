//! Descriptor walk that renders JSON.

use crate::{
    descriptor::{Descriptor, Scalar},
    error::Error,
    escape::write_quoted,
    kind::Kind,
};

/// Appends the JSON form of one value to a byte buffer.
///
/// On error the buffer holds a partial document; callers discard it.
pub(crate) struct Encoder<'o> {
    out: &'o mut Vec<u8>,
    max_depth: usize,
}

impl<'o> Encoder<'o> {
    pub(crate) fn new(out: &'o mut Vec<u8>, max_depth: usize) -> Self {
        Self { out, max_depth }
    }

    pub(crate) fn encode(&mut self, value: Descriptor<'_>) -> Result<(), Error> {
        self.value(value, 0)
    }

    fn value(&mut self, value: Descriptor<'_>, depth: usize) -> Result<(), Error> {
        match value.kind() {
            Kind::Struct => self.structure(value, depth),
            Kind::Slice => self.slice(value, depth),
            Kind::Pointer => self.pointer(value, depth),
            Kind::Invalid => Err(Error::unsupported(format!(
                "cannot encode {}",
                value.unsupported_type().unwrap_or("an absent value")
            ))),
            kind => self.scalar(kind, value.read_scalar()?),
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

    fn scalar(&mut self, kind: Kind, value: Scalar<'_>) -> Result<(), Error> {
        match value {
            Scalar::Str(s) => write_quoted(self.out, s),
            Scalar::Int(n) => self
                .out
                .extend_from_slice(itoa::Buffer::new().format(n).as_bytes()),
            Scalar::Uint(n) => self
                .out
                .extend_from_slice(itoa::Buffer::new().format(n).as_bytes()),
            Scalar::Float(n) => write_float(self.out, kind, n)?,
            Scalar::Bool(b) => self
                .out
                .extend_from_slice(if b { b"true" } else { b"false" }),
        }
        Ok(())
    }

    fn structure(&mut self, value: Descriptor<'_>, depth: usize) -> Result<(), Error> {
        let depth = self.enter(depth)?;
        let info = value.struct_info()?;
        let count = value.field_count()?;

        self.out.push(b'{');
        let mut first = true;
        for (index, field_info) in info.fields.iter().enumerate().take(count) {
            let field = value.field(index)?;
            if field.kind() == Kind::Invalid {
                if let Some(type_name) = field.unsupported_type() {
                    return Err(Error::unsupported(format!(
                        "field {}.{} has unsupported type {type_name}",
                        info.type_name, field_info.name
                    )));
                }
                continue;
            }
            if !first {
                self.out.push(b',');
            }
            first = false;
            write_quoted(self.out, field_info.name);
            self.out.push(b':');
            self.value(field, depth)?;
        }
        self.out.push(b'}');
        Ok(())
    }

    fn slice(&mut self, value: Descriptor<'_>, depth: usize) -> Result<(), Error> {
        let depth = self.enter(depth)?;
        self.out.push(b'[');
        for index in 0..value.len()? {
            if index > 0 {
                self.out.push(b',');
            }
            self.value(value.index(index)?, depth)?;
        }
        self.out.push(b']');
        Ok(())
    }

    fn pointer(&mut self, value: Descriptor<'_>, depth: usize) -> Result<(), Error> {
        if value.is_null()? {
            self.out.extend_from_slice(b"null");
            return Ok(());
        }
        let depth = self.enter(depth)?;
        self.value(value.deref()?, depth)
    }
}

/// Shortest round-trip decimal, with integral values printed without a
/// fraction and both zeros as `0`.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn write_float(out: &mut Vec<u8>, kind: Kind, n: f64) -> Result<(), Error> {
    if !n.is_finite() {
        return Err(Error::unsupported(format!(
            "{kind} value {n} has no JSON representation"
        )));
    }
    if n == 0.0 {
        out.push(b'0');
        return Ok(());
    }
    let mut buf = ryu::Buffer::new();
    let text = if kind == Kind::Float32 {
        buf.format_finite(n as f32)
    } else {
        buf.format_finite(n)
    };
    out.extend_from_slice(text.strip_suffix(".0").unwrap_or(text).as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;
    use crate::{Reflect, error::ErrorKind, reflect_struct};

    fn encode(value: &dyn Reflect, max_depth: usize) -> Result<String, Error> {
        let mut out = Vec::new();
        Encoder::new(&mut out, max_depth).encode(value.descriptor())?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[rstest]
    #[case(0.0, "0")]
    #[case(-0.0, "0")]
    #[case(1.0, "1")]
    #[case(-2.5, "-2.5")]
    #[case(0.1, "0.1")]
    #[case(123_456_789.0, "123456789")]
    #[case(1e21, "1e21")]
    #[case(1.5e-7, "1.5e-7")]
    fn formats_f64(#[case] n: f64, #[case] expected: &str) {
        assert_eq!(encode(&n, 32).unwrap(), expected);
    }

    #[test]
    fn formats_f32_in_its_own_precision() {
        assert_eq!(encode(&0.1f32, 32).unwrap(), "0.1");
        assert_eq!(encode(&3.0f32, 32).unwrap(), "3");
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn rejects_non_finite(#[case] n: f64) {
        assert_eq!(encode(&n, 32).unwrap_err().kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn formats_integers() {
        assert_eq!(encode(&i64::MIN, 32).unwrap(), "-9223372036854775808");
        assert_eq!(encode(&u64::MAX, 32).unwrap(), "18446744073709551615");
        assert_eq!(encode(&0u8, 32).unwrap(), "0");
        assert_eq!(encode(&-7i16, 32).unwrap(), "-7");
    }

    #[derive(Default)]
    struct Node {
        name: String,
        child: Option<Box<Node>>,
    }
    reflect_struct!(Node { name, child });

    fn chain(levels: usize) -> Node {
        let mut node = Node::default();
        for _ in 1..levels {
            node = Node {
                name: String::new(),
                child: Some(Box::new(node)),
            };
        }
        node
    }

    #[test]
    fn null_pointer_encodes_as_null() {
        assert_eq!(encode(&Node::default(), 32).unwrap(), r#"{"name":"","child":null}"#);
    }

    #[test]
    fn depth_limit_counts_structs_and_pointers() {
        // Each extra node adds a pointer level and a struct level.
        assert!(encode(&chain(2), 3).is_ok());
        let err = encode(&chain(3), 3).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { limit: 3 }));
    }

    #[derive(Default)]
    struct WithMap {
        id: u32,
        extra: HashMap<String, String>,
    }
    reflect_struct!(WithMap { id, extra });

    #[test]
    fn map_field_fails_whole_encode() {
        let err = encode(&WithMap::default(), 32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert!(err.to_string().contains("extra"), "{err}");
    }

    #[derive(Default)]
    struct WithMarker {
        id: u32,
        marker: (),
        tail: bool,
    }
    reflect_struct!(WithMarker { id, marker, tail });

    #[test]
    fn absent_field_is_skipped() {
        assert_eq!(encode(&WithMarker::default(), 32).unwrap(), r#"{"id":0,"tail":false}"#);
    }

    #[test]
    fn absent_top_level_value_fails() {
        assert_eq!(encode(&(), 32).unwrap_err().kind(), ErrorKind::UnsupportedType);
    }
}
