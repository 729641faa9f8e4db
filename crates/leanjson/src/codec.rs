use std::io;

use crate::{
    context::POOL, decoder::Decoder, descriptor::Reflect, encoder::Encoder, error::Error,
    options::CodecOptions,
};

/// Initial capacity of a freshly encoded document.
const OUTPUT_CAPACITY: usize = 128;

/// Encoder and decoder bound to one set of [`CodecOptions`].
///
/// A `Codec` holds no mutable state and can be shared freely between threads;
/// scratch buffers are checked out of a process-wide pool for each call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    options: CodecOptions,
}

impl Codec {
    /// A codec with the given options.
    #[must_use]
    pub const fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// The options this codec was built with.
    #[must_use]
    pub const fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Encodes `value` into a new buffer.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] when the value or one of its fields cannot
    /// be represented, [`Error::DepthExceeded`] when it nests too deeply. No
    /// partial output is returned.
    pub fn encode<T: Reflect + ?Sized>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(OUTPUT_CAPACITY);
        Encoder::new(&mut out, self.options.max_depth).encode(value.descriptor())?;
        Ok(out)
    }

    /// Encodes `value` into `sink`.
    ///
    /// The document is staged in pooled scratch space and written with a
    /// single `write_all`, so nothing reaches the sink when encoding fails.
    ///
    /// # Errors
    ///
    /// As [`encode`](Self::encode), plus [`Error::Sink`] when writing fails.
    pub fn encode_to<T: Reflect + ?Sized, W: io::Write>(
        &self,
        value: &T,
        mut sink: W,
    ) -> Result<(), Error> {
        let mut ctx = POOL.acquire(self.options.separator);
        Encoder::new(&mut ctx.escape, self.options.max_depth).encode(value.descriptor())?;
        sink.write_all(&ctx.escape)?;
        Ok(())
    }

    /// Decodes `input` into `target`.
    ///
    /// Unknown keys are ignored and fields missing from the input keep their
    /// current values.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidJson`] for malformed input or a token that does not fit
    /// its destination, [`Error::UnsupportedType`] for destinations the codec
    /// cannot fill, [`Error::DepthExceeded`] for overly deep input. Fields
    /// written before the error keep their new values.
    pub fn decode<T: Reflect + ?Sized>(
        &self,
        input: impl AsRef<[u8]>,
        target: &mut T,
    ) -> Result<(), Error> {
        let mut ctx = POOL.acquire(self.options.separator);
        Decoder::new(&mut ctx, self.options.max_depth)
            .decode(input.as_ref(), target.descriptor_mut())
    }

    /// Decodes into a target chosen at run time.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidJson`] when `target` is `None`; otherwise as
    /// [`decode`](Self::decode).
    pub fn decode_dyn(
        &self,
        input: impl AsRef<[u8]>,
        target: Option<&mut dyn Reflect>,
    ) -> Result<(), Error> {
        let target = target.ok_or_else(|| Error::invalid("target cannot be nil"))?;
        self.decode(input, target)
    }
}

/// Encodes `value` with default options.
///
/// # Errors
///
/// See [`Codec::encode`].
pub fn encode<T: Reflect + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    Codec::default().encode(value)
}

/// Encodes `value` into `sink` with default options.
///
/// # Errors
///
/// See [`Codec::encode_to`].
pub fn encode_to<T: Reflect + ?Sized, W: io::Write>(value: &T, sink: W) -> Result<(), Error> {
    Codec::default().encode_to(value, sink)
}

/// Decodes `input` into `target` with default options.
///
/// # Errors
///
/// See [`Codec::decode`].
pub fn decode<T: Reflect + ?Sized>(input: impl AsRef<[u8]>, target: &mut T) -> Result<(), Error> {
    Codec::default().decode(input, target)
}

/// Decodes into a target chosen at run time, with default options.
///
/// # Errors
///
/// See [`Codec::decode_dyn`].
pub fn decode_dyn(input: impl AsRef<[u8]>, target: Option<&mut dyn Reflect>) -> Result<(), Error> {
    Codec::default().decode_dyn(input, target)
}
