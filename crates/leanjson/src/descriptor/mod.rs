//! Minimal runtime introspection used to drive the codec.
//!
//! Every type the codec can walk implements [`Reflect`], which hands out a
//! read-only [`Descriptor`] (for encoding) or a writable [`DescriptorMut`]
//! (for decoding). A descriptor is a small tagged handle: it is either a
//! scalar that can be read and written through a [`Scalar`] carrier, or a
//! composite (struct, slice, pointer) that can be navigated, never both.
//! Calling an accessor that does not fit the descriptor's [`Kind`] is a
//! contract violation reported as [`Error::UnsupportedType`].
//!
//! Structs opt in through [`reflect_struct!`](crate::reflect_struct), slices
//! are `Vec<T>`, pointers are `Option<T>` (with `Box<T>` transparent), and the
//! usual integer, float, `bool` and `String` types are scalars.

mod impls;

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

use crate::{
    error::Error,
    kind::{Kind, Width},
    type_cache::{self, StructTypeInfo},
};

/// A type the codec can encode from and decode into.
pub trait Reflect: Any {
    /// Read-only view used by the encoder.
    fn descriptor(&self) -> Descriptor<'_>;

    /// Writable view used by the decoder.
    fn descriptor_mut(&mut self) -> DescriptorMut<'_>;

    /// Kind of this type, known without an instance.
    fn static_kind() -> Kind
    where
        Self: Sized;

    /// Erases the concrete type so a freshly decoded pointee can be
    /// downcast back into place.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Kind of this value.
    fn kind(&self) -> Kind {
        self.descriptor().kind()
    }
}

/// One declared field of a struct, as written by the type's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name in the source, possibly a raw identifier (`r#type`).
    pub name: &'static str,
    /// Alias tag, `"alias[,option...]"`; empty or `-` means no alias.
    pub tag: &'static str,
}

impl FieldDecl {
    /// Declares a field.
    #[must_use]
    pub const fn new(name: &'static str, tag: &'static str) -> Self {
        Self { name, tag }
    }
}

/// Field access for a struct, in declaration order.
pub trait StructValue {
    /// Identity used as the type cache key.
    fn type_key(&self) -> TypeId;

    /// Human readable type name for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Fields in declaration order. Index `i` here is field `i` below.
    fn declared_fields(&self) -> &'static [FieldDecl];

    /// Field `index`, or `None` past the end.
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutable field `index`, or `None` past the end.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// Element access for a growable sequence.
pub trait SliceValue {
    /// Number of elements.
    fn len(&self) -> usize;

    /// `true` when there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `index`, or `None` past the end.
    fn index(&self, index: usize) -> Option<&dyn Reflect>;

    /// Mutable element `index`, or `None` past the end.
    fn index_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Kind of the element type.
    fn element_kind(&self) -> Kind;

    /// Replaces the contents with `len` default elements, keeping capacity.
    fn set_len(&mut self, len: usize);
}

/// Access to an optional, owned pointee.
pub trait PointerValue {
    /// The pointee, or `None` when null.
    fn pointee(&self) -> Option<&dyn Reflect>;

    /// `true` when there is no pointee.
    fn is_null(&self) -> bool {
        self.pointee().is_none()
    }

    /// Kind of the pointee type.
    fn pointee_kind(&self) -> Kind;

    /// Drops the pointee.
    fn set_null(&mut self);

    /// Allocates a default-initialised pointee, not yet bound.
    fn alloc_pointee(&self) -> Box<dyn Reflect>;

    /// Binds a pointee obtained from [`alloc_pointee`](Self::alloc_pointee).
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] when `pointee` is of another type.
    fn bind(&mut self, pointee: Box<dyn Reflect>) -> Result<(), Error>;
}

/// A scalar normalised to its 64-bit carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// Text.
    Str(&'a str),
    /// Any signed integer.
    Int(i64),
    /// Any unsigned integer.
    Uint(u64),
    /// Any float.
    Float(f64),
    /// A boolean.
    Bool(bool),
}

#[derive(Clone, Copy)]
enum Repr<'a> {
    Scalar(Kind, Scalar<'a>),
    Struct(&'a dyn StructValue),
    Slice(&'a dyn SliceValue),
    Pointer(&'a dyn PointerValue),
    Absent,
    Unsupported(&'static str),
}

/// Read-only handle on a value.
#[derive(Clone, Copy)]
pub struct Descriptor<'a> {
    repr: Repr<'a>,
}

impl<'a> Descriptor<'a> {
    /// A scalar of the given kind.
    #[must_use]
    pub fn scalar(kind: Kind, value: Scalar<'a>) -> Self {
        debug_assert!(kind.is_scalar(), "{kind} is not a scalar kind");
        Self {
            repr: Repr::Scalar(kind, value),
        }
    }

    /// A struct.
    #[must_use]
    pub fn structure(value: &'a dyn StructValue) -> Self {
        Self {
            repr: Repr::Struct(value),
        }
    }

    /// A slice.
    #[must_use]
    pub fn slice(value: &'a dyn SliceValue) -> Self {
        Self {
            repr: Repr::Slice(value),
        }
    }

    /// A pointer.
    #[must_use]
    pub fn pointer(value: &'a dyn PointerValue) -> Self {
        Self {
            repr: Repr::Pointer(value),
        }
    }

    /// A value that is not there. Struct fields with this descriptor are
    /// skipped by the encoder.
    #[must_use]
    pub const fn absent() -> Self {
        Self { repr: Repr::Absent }
    }

    /// A value of a type the codec cannot walk, such as a map.
    #[must_use]
    pub const fn unsupported(type_name: &'static str) -> Self {
        Self {
            repr: Repr::Unsupported(type_name),
        }
    }

    /// The kind tag.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.repr {
            Repr::Scalar(kind, _) => kind,
            Repr::Struct(_) => Kind::Struct,
            Repr::Slice(_) => Kind::Slice,
            Repr::Pointer(_) => Kind::Pointer,
            Repr::Absent | Repr::Unsupported(_) => Kind::Invalid,
        }
    }

    /// For an unsupported value, the name of its type.
    #[must_use]
    pub fn unsupported_type(&self) -> Option<&'static str> {
        match self.repr {
            Repr::Unsupported(name) => Some(name),
            _ => None,
        }
    }

    /// Reads a scalar.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a scalar.
    pub fn read_scalar(&self) -> Result<Scalar<'a>, Error> {
        match self.repr {
            Repr::Scalar(_, value) => Ok(value),
            _ => Err(misuse("read_scalar", self.kind())),
        }
    }

    /// Number of struct fields.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a struct.
    pub fn field_count(&self) -> Result<usize, Error> {
        match self.repr {
            Repr::Struct(value) => Ok(value.declared_fields().len()),
            _ => Err(misuse("field_count", self.kind())),
        }
    }

    /// Struct field `index`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a struct with such a field.
    pub fn field(&self, index: usize) -> Result<Descriptor<'a>, Error> {
        match self.repr {
            Repr::Struct(value) => value
                .field(index)
                .map(Reflect::descriptor)
                .ok_or_else(|| out_of_range("field", index, value.type_name())),
            _ => Err(misuse("field", self.kind())),
        }
    }

    /// Cached field metadata of a struct.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a struct.
    pub fn struct_info(&self) -> Result<Arc<StructTypeInfo>, Error> {
        match self.repr {
            Repr::Struct(value) => Ok(type_cache::struct_info(value)),
            _ => Err(misuse("struct_info", self.kind())),
        }
    }

    /// Number of slice elements.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a slice.
    pub fn len(&self) -> Result<usize, Error> {
        match self.repr {
            Repr::Slice(value) => Ok(value.len()),
            _ => Err(misuse("len", self.kind())),
        }
    }

    /// Slice element `index`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a slice with such an element.
    pub fn index(&self, index: usize) -> Result<Descriptor<'a>, Error> {
        match self.repr {
            Repr::Slice(value) => value
                .index(index)
                .map(Reflect::descriptor)
                .ok_or_else(|| out_of_range("element", index, "slice")),
            _ => Err(misuse("index", self.kind())),
        }
    }

    /// Whether a pointer is null.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a pointer.
    pub fn is_null(&self) -> Result<bool, Error> {
        match self.repr {
            Repr::Pointer(value) => Ok(value.is_null()),
            _ => Err(misuse("is_null", self.kind())),
        }
    }

    /// The pointee of a pointer; [`absent`](Self::absent) when null.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a pointer.
    pub fn deref(&self) -> Result<Descriptor<'a>, Error> {
        match self.repr {
            Repr::Pointer(value) => Ok(value
                .pointee()
                .map_or_else(Descriptor::absent, Reflect::descriptor)),
            _ => Err(misuse("deref", self.kind())),
        }
    }
}

impl fmt::Debug for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            Repr::Scalar(kind, value) => f.debug_tuple("Scalar").field(&kind).field(&value).finish(),
            Repr::Struct(value) => f.debug_tuple("Struct").field(&value.type_name()).finish(),
            Repr::Slice(value) => f.debug_tuple("Slice").field(&value.len()).finish(),
            Repr::Pointer(value) => f
                .debug_tuple("Pointer")
                .field(&value.pointee().map(|_| "..."))
                .finish(),
            Repr::Absent => f.write_str("Absent"),
            Repr::Unsupported(name) => f.debug_tuple("Unsupported").field(&name).finish(),
        }
    }
}

/// A writable scalar location.
#[derive(Debug)]
pub enum Slot<'a> {
    /// `String`
    String(&'a mut String),
    /// `i8`
    I8(&'a mut i8),
    /// `i16`
    I16(&'a mut i16),
    /// `i32`
    I32(&'a mut i32),
    /// `i64`
    I64(&'a mut i64),
    /// `isize`
    Isize(&'a mut isize),
    /// `u8`
    U8(&'a mut u8),
    /// `u16`
    U16(&'a mut u16),
    /// `u32`
    U32(&'a mut u32),
    /// `u64`
    U64(&'a mut u64),
    /// `usize`
    Usize(&'a mut usize),
    /// `f32`
    F32(&'a mut f32),
    /// `f64`
    F64(&'a mut f64),
    /// `bool`
    Bool(&'a mut bool),
}

macro_rules! narrow {
    ($slot:expr, $value:expr, $kind:expr) => {{
        let value = $value;
        *$slot = value
            .try_into()
            .map_err(|_| Error::invalid(format!("number {value} out of range for {}", $kind)))?;
    }};
}

impl Slot<'_> {
    /// Kind of the location.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::String(_) => Kind::String,
            Self::I8(_) => Kind::Int(Width::W8),
            Self::I16(_) => Kind::Int(Width::W16),
            Self::I32(_) => Kind::Int(Width::W32),
            Self::I64(_) => Kind::Int(Width::W64),
            Self::Isize(_) => Kind::Int(Width::pointer()),
            Self::U8(_) => Kind::Uint(Width::W8),
            Self::U16(_) => Kind::Uint(Width::W16),
            Self::U32(_) => Kind::Uint(Width::W32),
            Self::U64(_) => Kind::Uint(Width::W64),
            Self::Usize(_) => Kind::Uint(Width::pointer()),
            Self::F32(_) => Kind::Float32,
            Self::F64(_) => Kind::Float64,
            Self::Bool(_) => Kind::Bool,
        }
    }

    /// Current value, widened to its carrier.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn read(&self) -> Scalar<'_> {
        match self {
            Self::String(v) => Scalar::Str(v.as_str()),
            Self::I8(v) => Scalar::Int(i64::from(**v)),
            Self::I16(v) => Scalar::Int(i64::from(**v)),
            Self::I32(v) => Scalar::Int(i64::from(**v)),
            Self::I64(v) => Scalar::Int(**v),
            Self::Isize(v) => Scalar::Int(**v as i64),
            Self::U8(v) => Scalar::Uint(u64::from(**v)),
            Self::U16(v) => Scalar::Uint(u64::from(**v)),
            Self::U32(v) => Scalar::Uint(u64::from(**v)),
            Self::U64(v) => Scalar::Uint(**v),
            Self::Usize(v) => Scalar::Uint(**v as u64),
            Self::F32(v) => Scalar::Float(f64::from(**v)),
            Self::F64(v) => Scalar::Float(**v),
            Self::Bool(v) => Scalar::Bool(**v),
        }
    }

    /// Stores `value`, narrowing it to the location's width.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidJson`] when a number does not fit, and
    /// [`Error::UnsupportedType`] when the carrier does not match the kind.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write(&mut self, value: Scalar<'_>) -> Result<(), Error> {
        let kind = self.kind();
        match (self, value) {
            (Self::String(slot), Scalar::Str(v)) => {
                slot.clear();
                slot.push_str(v);
            }
            (Self::I8(slot), Scalar::Int(v)) => narrow!(*slot, v, kind),
            (Self::I16(slot), Scalar::Int(v)) => narrow!(*slot, v, kind),
            (Self::I32(slot), Scalar::Int(v)) => narrow!(*slot, v, kind),
            (Self::I64(slot), Scalar::Int(v)) => **slot = v,
            (Self::Isize(slot), Scalar::Int(v)) => narrow!(*slot, v, kind),
            (Self::U8(slot), Scalar::Uint(v)) => narrow!(*slot, v, kind),
            (Self::U16(slot), Scalar::Uint(v)) => narrow!(*slot, v, kind),
            (Self::U32(slot), Scalar::Uint(v)) => narrow!(*slot, v, kind),
            (Self::U64(slot), Scalar::Uint(v)) => **slot = v,
            (Self::Usize(slot), Scalar::Uint(v)) => narrow!(*slot, v, kind),
            (Self::F32(slot), Scalar::Float(v)) => {
                let narrowed = v as f32;
                if narrowed.is_infinite() && v.is_finite() {
                    return Err(Error::invalid(format!(
                        "number {v} out of range for {kind}"
                    )));
                }
                **slot = narrowed;
            }
            (Self::F64(slot), Scalar::Float(v)) => **slot = v,
            (Self::Bool(slot), Scalar::Bool(v)) => **slot = v,
            (_, value) => {
                return Err(Error::unsupported(format!(
                    "cannot store {value:?} in a {kind} location"
                )));
            }
        }
        Ok(())
    }
}

enum ReprMut<'a> {
    Scalar(Slot<'a>),
    Struct(&'a mut dyn StructValue),
    Slice(&'a mut dyn SliceValue),
    Pointer(&'a mut dyn PointerValue),
    Absent,
    Unsupported(&'static str),
}

/// Writable handle on a value.
pub struct DescriptorMut<'a> {
    repr: ReprMut<'a>,
}

impl<'a> DescriptorMut<'a> {
    /// A scalar location.
    #[must_use]
    pub fn scalar(slot: Slot<'a>) -> Self {
        Self {
            repr: ReprMut::Scalar(slot),
        }
    }

    /// A struct.
    #[must_use]
    pub fn structure(value: &'a mut dyn StructValue) -> Self {
        Self {
            repr: ReprMut::Struct(value),
        }
    }

    /// A slice.
    #[must_use]
    pub fn slice(value: &'a mut dyn SliceValue) -> Self {
        Self {
            repr: ReprMut::Slice(value),
        }
    }

    /// A pointer.
    #[must_use]
    pub fn pointer(value: &'a mut dyn PointerValue) -> Self {
        Self {
            repr: ReprMut::Pointer(value),
        }
    }

    /// A value that is not there; the decoder leaves it alone.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            repr: ReprMut::Absent,
        }
    }

    /// A value of a type the codec cannot walk.
    #[must_use]
    pub const fn unsupported(type_name: &'static str) -> Self {
        Self {
            repr: ReprMut::Unsupported(type_name),
        }
    }

    /// The kind tag.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match &self.repr {
            ReprMut::Scalar(slot) => slot.kind(),
            ReprMut::Struct(_) => Kind::Struct,
            ReprMut::Slice(_) => Kind::Slice,
            ReprMut::Pointer(_) => Kind::Pointer,
            ReprMut::Absent | ReprMut::Unsupported(_) => Kind::Invalid,
        }
    }

    /// `true` for an [`absent`](Self::absent) value.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self.repr, ReprMut::Absent)
    }

    /// For an unsupported value, the name of its type.
    #[must_use]
    pub fn unsupported_type(&self) -> Option<&'static str> {
        match self.repr {
            ReprMut::Unsupported(name) => Some(name),
            _ => None,
        }
    }

    /// Reads the current scalar.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a scalar.
    pub fn read_scalar(&self) -> Result<Scalar<'_>, Error> {
        match &self.repr {
            ReprMut::Scalar(slot) => Ok(slot.read()),
            _ => Err(misuse("read_scalar", self.kind())),
        }
    }

    /// Writes a scalar. See [`Slot::write`].
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a scalar of a matching kind,
    /// [`Error::InvalidJson`] when the value does not fit.
    pub fn write_scalar(&mut self, value: Scalar<'_>) -> Result<(), Error> {
        match &mut self.repr {
            ReprMut::Scalar(slot) => slot.write(value),
            _ => Err(misuse("write_scalar", self.kind())),
        }
    }

    /// Number of struct fields.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a struct.
    pub fn field_count(&self) -> Result<usize, Error> {
        match &self.repr {
            ReprMut::Struct(value) => Ok(value.declared_fields().len()),
            _ => Err(misuse("field_count", self.kind())),
        }
    }

    /// Mutable struct field `index`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a struct with such a field.
    pub fn field_mut(&mut self, index: usize) -> Result<DescriptorMut<'_>, Error> {
        let kind = self.kind();
        match &mut self.repr {
            ReprMut::Struct(value) => {
                let type_name = value.type_name();
                value
                    .field_mut(index)
                    .map(Reflect::descriptor_mut)
                    .ok_or_else(|| out_of_range("field", index, type_name))
            }
            _ => Err(misuse("field_mut", kind)),
        }
    }

    /// Cached field metadata of a struct.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a struct.
    pub fn struct_info(&self) -> Result<Arc<StructTypeInfo>, Error> {
        match &self.repr {
            ReprMut::Struct(value) => Ok(type_cache::struct_info(&**value)),
            _ => Err(misuse("struct_info", self.kind())),
        }
    }

    /// Number of slice elements.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a slice.
    pub fn len(&self) -> Result<usize, Error> {
        match &self.repr {
            ReprMut::Slice(value) => Ok(value.len()),
            _ => Err(misuse("len", self.kind())),
        }
    }

    /// Kind of a slice's elements.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a slice.
    pub fn element_kind(&self) -> Result<Kind, Error> {
        match &self.repr {
            ReprMut::Slice(value) => Ok(value.element_kind()),
            _ => Err(misuse("element_kind", self.kind())),
        }
    }

    /// Replaces a slice with `len` fresh default elements.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a slice.
    pub fn set_len(&mut self, len: usize) -> Result<(), Error> {
        let kind = self.kind();
        match &mut self.repr {
            ReprMut::Slice(value) => {
                value.set_len(len);
                Ok(())
            }
            _ => Err(misuse("set_len", kind)),
        }
    }

    /// Mutable slice element `index`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a slice with such an element.
    pub fn index_mut(&mut self, index: usize) -> Result<DescriptorMut<'_>, Error> {
        let kind = self.kind();
        match &mut self.repr {
            ReprMut::Slice(value) => value
                .index_mut(index)
                .map(Reflect::descriptor_mut)
                .ok_or_else(|| out_of_range("element", index, "slice")),
            _ => Err(misuse("index_mut", kind)),
        }
    }

    /// Whether a pointer is null.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a pointer.
    pub fn is_null(&self) -> Result<bool, Error> {
        match &self.repr {
            ReprMut::Pointer(value) => Ok(value.is_null()),
            _ => Err(misuse("is_null", self.kind())),
        }
    }

    /// Makes a pointer null.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a pointer.
    pub fn set_null(&mut self) -> Result<(), Error> {
        let kind = self.kind();
        match &mut self.repr {
            ReprMut::Pointer(value) => {
                value.set_null();
                Ok(())
            }
            _ => Err(misuse("set_null", kind)),
        }
    }

    /// Allocates a default-initialised pointee for a pointer without binding
    /// it. Decode into it, then hand it to
    /// [`bind_pointee`](Self::bind_pointee).
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a pointer.
    pub fn alloc_pointee(&self) -> Result<Box<dyn Reflect>, Error> {
        match &self.repr {
            ReprMut::Pointer(value) => Ok(value.alloc_pointee()),
            _ => Err(misuse("alloc_pointee", self.kind())),
        }
    }

    /// Points a pointer at `pointee`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] unless this is a pointer whose pointee type
    /// matches.
    pub fn bind_pointee(&mut self, pointee: Box<dyn Reflect>) -> Result<(), Error> {
        let kind = self.kind();
        match &mut self.repr {
            ReprMut::Pointer(value) => value.bind(pointee),
            _ => Err(misuse("bind_pointee", kind)),
        }
    }
}

impl fmt::Debug for DescriptorMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            ReprMut::Scalar(slot) => f.debug_tuple("Scalar").field(slot).finish(),
            ReprMut::Struct(value) => f.debug_tuple("Struct").field(&value.type_name()).finish(),
            ReprMut::Slice(value) => f.debug_tuple("Slice").field(&value.len()).finish(),
            ReprMut::Pointer(value) => f
                .debug_tuple("Pointer")
                .field(&value.pointee_kind())
                .finish(),
            ReprMut::Absent => f.write_str("Absent"),
            ReprMut::Unsupported(name) => f.debug_tuple("Unsupported").field(name).finish(),
        }
    }
}

fn misuse(accessor: &str, kind: Kind) -> Error {
    Error::unsupported(format!("{accessor} called on a {kind} descriptor"))
}

fn out_of_range(what: &str, index: usize, owner: &str) -> Error {
    Error::unsupported(format!("{what} {index} out of range for {owner}"))
}
