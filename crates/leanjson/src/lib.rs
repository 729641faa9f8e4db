//! A small-footprint JSON codec driven by a minimal value-introspection layer.
//!
//! Types opt in by implementing [`Reflect`], usually through
//! [`reflect_struct!`]; the codec then walks them generically through
//! [`Descriptor`]s, without per-type generated serialization code.
//!
//! ```rust
//! use leanjson::reflect_struct;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     id: String,
//!     name: String,
//!     tags: Vec<String>,
//!     manager: Option<Box<User>>,
//! }
//!
//! reflect_struct!(User { id => "user_id", name, tags, manager });
//!
//! let user = User {
//!     id: "u1".into(),
//!     name: "Ada".into(),
//!     tags: vec!["admin".into()],
//!     manager: None,
//! };
//! let json = leanjson::encode(&user)?;
//! assert_eq!(json, br#"{"id":"u1","name":"Ada","tags":["admin"],"manager":null}"#);
//!
//! let mut decoded = User::default();
//! leanjson::decode(r#"{"user_id": "u1", "name": "Ada", "tags": ["admin"]}"#, &mut decoded)?;
//! assert_eq!(decoded, user);
//! # Ok::<(), leanjson::Error>(())
//! ```
//!
//! Output keys are always the declared field names. On input a key matches a
//! field's alias, then its declared name, then its lower-case form with words
//! joined by [`CodecOptions::separator`]. Unknown keys are ignored.

mod codec;
mod context;
mod decoder;
mod descriptor;
mod encoder;
mod error;
mod escape;
mod kind;
mod options;
mod splitter;
mod type_cache;


pub use codec::{Codec, decode, decode_dyn, encode, encode_to};
pub use context::{ContextPool, MAX_IDLE, MAX_RETAINED_CAPACITY, OperationContext, PooledContext};
pub use descriptor::{
    Descriptor, DescriptorMut, FieldDecl, PointerValue, Reflect, Scalar, SliceValue, Slot,
    StructValue,
};
pub use error::{Error, ErrorKind};
pub use kind::{Kind, Width};
pub use options::{CodecOptions, DEFAULT_MAX_DEPTH, DEFAULT_SEPARATOR};
#[cfg(any(test, feature = "testing"))]
pub use type_cache::{cached_type_count, clear_type_cache};
pub use type_cache::{FieldInfo, StructTypeInfo, struct_info};

/// Implements [`Reflect`] and [`StructValue`] for a struct with named fields.
///
/// List the fields to expose in declaration order. A field may carry an alias
/// tag, `"alias[,option...]"`, which takes priority when matching keys on
/// decode; options after the comma are ignored and `"-"` means no alias.
/// Fields left out of the list are neither encoded nor decoded.
///
/// Every listed field must itself implement [`Reflect`].
///
/// ```rust
/// use leanjson::reflect_struct;
///
/// #[derive(Default)]
/// struct Address {
///     street: String,
///     postal_code: String,
///     coordinates: Option<Vec<f64>>,
/// }
///
/// reflect_struct!(Address {
///     street,
///     postal_code => "zip,omitempty",
///     coordinates,
/// });
///
/// let mut address = Address::default();
/// leanjson::decode(r#"{"street": "Main St", "zip": "12345"}"#, &mut address)?;
/// assert_eq!(address.postal_code, "12345");
/// # Ok::<(), leanjson::Error>(())
/// ```
#[macro_export]
macro_rules! reflect_struct {
    ($ty:ty { $( $field:ident $( => $tag:literal )? ),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn descriptor(&self) -> $crate::Descriptor<'_> {
                $crate::Descriptor::structure(self)
            }

            fn descriptor_mut(&mut self) -> $crate::DescriptorMut<'_> {
                $crate::DescriptorMut::structure(self)
            }

            fn static_kind() -> $crate::Kind {
                $crate::Kind::Struct
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }
        }

        impl $crate::StructValue for $ty {
            fn type_key(&self) -> ::core::any::TypeId {
                ::core::any::TypeId::of::<Self>()
            }

            fn type_name(&self) -> &'static str {
                ::core::any::type_name::<Self>()
            }

            fn declared_fields(&self) -> &'static [$crate::FieldDecl] {
                const FIELDS: &[$crate::FieldDecl] = &[$(
                    $crate::FieldDecl::new(
                        ::core::stringify!($field),
                        $crate::__field_tag!($($tag)?),
                    )
                ),*];
                FIELDS
            }

            fn field(
                &self,
                index: usize,
            ) -> ::core::option::Option<&dyn $crate::Reflect> {
                let mut fields = ::core::iter::empty::<&dyn $crate::Reflect>()
                    $( .chain(::core::iter::once(&self.$field as &dyn $crate::Reflect)) )*;
                fields.nth(index)
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn $crate::Reflect> {
                let mut fields = ::core::iter::empty::<&mut dyn $crate::Reflect>()
                    $( .chain(::core::iter::once(&mut self.$field as &mut dyn $crate::Reflect)) )*;
                fields.nth(index)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_tag {
    () => {
        ""
    };
    ($tag:literal) => {
        $tag
    };
}
