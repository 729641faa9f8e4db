/// Separator used to join words of a field name when matching keys.
pub const DEFAULT_SEPARATOR: char = '_';

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration for a [`Codec`](crate::Codec).
///
/// Output is not affected by any option: keys are always the declared field
/// names and there is no pretty printing.
///
/// # Default
///
/// `separator` is `'_'`, `max_depth` is 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Word separator of the lower-case fallback used to match object keys
    /// against field names while decoding.
    ///
    /// A field declared `CreatedAt` matches the key `created_at` with the
    /// default separator, and `created-at` with `'-'`. Alias and exact name
    /// matches take priority regardless.
    ///
    /// # Default
    ///
    /// `'_'`
    pub separator: char,

    /// Deepest nesting of structs, slices and pointers that encode or decode
    /// will walk before failing with
    /// [`Error::DepthExceeded`](crate::Error::DepthExceeded).
    ///
    /// The top-level value counts as the first level. Scalars do not count.
    ///
    /// # Default
    ///
    /// `32`
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
