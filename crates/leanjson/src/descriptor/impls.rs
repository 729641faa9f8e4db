use std::{
    any::{Any, type_name},
    collections::{BTreeMap, HashMap},
    marker::PhantomData,
};

use super::{Descriptor, DescriptorMut, PointerValue, Reflect, Scalar, SliceValue, Slot};
use crate::{
    error::Error,
    kind::{Kind, Width},
};

macro_rules! reflect_scalar {
    ($($ty:ty => $slot:ident, $kind:expr, |$v:ident| $read:expr;)*) => {$(
        impl Reflect for $ty {
            fn descriptor(&self) -> Descriptor<'_> {
                let $v = self;
                Descriptor::scalar($kind, $read)
            }

            fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
                DescriptorMut::scalar(Slot::$slot(self))
            }

            fn static_kind() -> Kind {
                $kind
            }

            fn into_any(self: Box<Self>) -> Box<dyn Any> {
                self
            }
        }
    )*};
}

reflect_scalar! {
    String => String, Kind::String, |v| Scalar::Str(v.as_str());
    bool => Bool, Kind::Bool, |v| Scalar::Bool(*v);
    i8 => I8, Kind::Int(Width::W8), |v| Scalar::Int(i64::from(*v));
    i16 => I16, Kind::Int(Width::W16), |v| Scalar::Int(i64::from(*v));
    i32 => I32, Kind::Int(Width::W32), |v| Scalar::Int(i64::from(*v));
    i64 => I64, Kind::Int(Width::W64), |v| Scalar::Int(*v);
    u8 => U8, Kind::Uint(Width::W8), |v| Scalar::Uint(u64::from(*v));
    u16 => U16, Kind::Uint(Width::W16), |v| Scalar::Uint(u64::from(*v));
    u32 => U32, Kind::Uint(Width::W32), |v| Scalar::Uint(u64::from(*v));
    u64 => U64, Kind::Uint(Width::W64), |v| Scalar::Uint(*v);
    f32 => F32, Kind::Float32, |v| Scalar::Float(f64::from(*v));
    f64 => F64, Kind::Float64, |v| Scalar::Float(*v);
}

// `isize`/`usize` are at most 64 bits wide on every supported target.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
mod pointer_sized {
    use super::*;

    reflect_scalar! {
        isize => Isize, Kind::Int(Width::pointer()), |v| Scalar::Int(*v as i64);
        usize => Usize, Kind::Uint(Width::pointer()), |v| Scalar::Uint(*v as u64);
    }
}

impl<T: Reflect + Default> Reflect for Vec<T> {
    fn descriptor(&self) -> Descriptor<'_> {
        Descriptor::slice(self)
    }

    fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
        DescriptorMut::slice(self)
    }

    fn static_kind() -> Kind {
        Kind::Slice
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<T: Reflect + Default> SliceValue for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn index(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|v| v as &dyn Reflect)
    }

    fn index_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.get_mut(index).map(|v| v as &mut dyn Reflect)
    }

    fn element_kind(&self) -> Kind {
        T::static_kind()
    }

    fn set_len(&mut self, len: usize) {
        self.clear();
        self.resize_with(len, T::default);
    }
}

impl<T: Reflect + Default> Reflect for Option<T> {
    fn descriptor(&self) -> Descriptor<'_> {
        Descriptor::pointer(self)
    }

    fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
        DescriptorMut::pointer(self)
    }

    fn static_kind() -> Kind {
        Kind::Pointer
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<T: Reflect + Default> PointerValue for Option<T> {
    fn pointee(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }

    fn pointee_kind(&self) -> Kind {
        T::static_kind()
    }

    fn set_null(&mut self) {
        *self = None;
    }

    fn alloc_pointee(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }

    fn bind(&mut self, pointee: Box<dyn Reflect>) -> Result<(), Error> {
        let value = pointee.into_any().downcast::<T>().map_err(|_| {
            Error::unsupported(format!("pointee is not a {}", type_name::<T>()))
        })?;
        *self = Some(*value);
        Ok(())
    }
}

// A box is just storage; it reflects as whatever it holds.
impl<T: Reflect> Reflect for Box<T> {
    fn descriptor(&self) -> Descriptor<'_> {
        (**self).descriptor()
    }

    fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
        (**self).descriptor_mut()
    }

    fn static_kind() -> Kind {
        T::static_kind()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Reflect for () {
    fn descriptor(&self) -> Descriptor<'_> {
        Descriptor::absent()
    }

    fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
        DescriptorMut::absent()
    }

    fn static_kind() -> Kind {
        Kind::Invalid
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<T: ?Sized + 'static> Reflect for PhantomData<T> {
    fn descriptor(&self) -> Descriptor<'_> {
        Descriptor::absent()
    }

    fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
        DescriptorMut::absent()
    }

    fn static_kind() -> Kind {
        Kind::Invalid
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

const MAP: &str = "map";

impl<K: 'static, V: 'static, S: 'static> Reflect for HashMap<K, V, S> {
    fn descriptor(&self) -> Descriptor<'_> {
        Descriptor::unsupported(MAP)
    }

    fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
        DescriptorMut::unsupported(MAP)
    }

    fn static_kind() -> Kind {
        Kind::Invalid
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<K: 'static, V: 'static> Reflect for BTreeMap<K, V> {
    fn descriptor(&self) -> Descriptor<'_> {
        Descriptor::unsupported(MAP)
    }

    fn descriptor_mut(&mut self) -> DescriptorMut<'_> {
        DescriptorMut::unsupported(MAP)
    }

    fn static_kind() -> Kind {
        Kind::Invalid
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
