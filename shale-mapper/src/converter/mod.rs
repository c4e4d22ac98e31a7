/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The converter resolution engine.
//!
//! A [`ConverterRegistry`] is an ordered chain of [`ConverterProvider`]s.
//! Resolving a [`TypeDescriptor`] walks the chain and takes the first match;
//! providers registered by the caller sit ahead of the built-in catalogue, so
//! registering a custom converter for an already-covered descriptor overrides
//! the built-in for every later resolution. Resolution is deterministic and
//! side-effect-free.
//!
//! Container shapes (`Vec<V>`, `HashMap<String, V>`, `Option<V>`) are not
//! enumerated in the catalogue. When the chain has no entry for, say,
//! `list<uuid>`, typed resolution recurses: the element converter is resolved
//! through the same chain (so inner overrides apply) and composed into a list
//! converter on the fly.

mod descriptor;
mod provider;

pub mod binary;
pub mod collection;
pub mod net;
pub mod number;
pub mod string;
pub mod time;

pub use descriptor::TypeDescriptor;
pub use provider::DefaultConverterProvider;

use crate::error::{ConversionError, Error};
use shale_types::AttributeValue;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Bidirectional mapping between a native type and a wire attribute value.
///
/// `to_attribute` is total: it must succeed for every well-formed value of
/// `V`. `from_attribute` is partial: it fails when the wire value's shape or
/// text does not satisfy `V`'s grammar. Converters are stateless and safe to
/// share across concurrent callers.
pub trait AttributeConverter<V>: Send + Sync + 'static {
    /// The descriptor this converter answers for.
    fn descriptor(&self) -> TypeDescriptor;

    /// Renders a native value to its wire form.
    fn to_attribute(&self, value: &V) -> AttributeValue;

    /// Reads a native value back from its wire form.
    fn from_attribute(&self, attr: &AttributeValue) -> Result<V, ConversionError>;
}

/// Object-safe face of a converter with the native type erased.
trait ErasedConverter: Send + Sync {
    fn descriptor(&self) -> TypeDescriptor;
    fn native_type(&self) -> TypeId;
    fn to_attribute_erased(&self, value: &dyn Any) -> AttributeValue;
    fn from_attribute_erased(
        &self,
        attr: &AttributeValue,
    ) -> Result<Box<dyn Any + Send>, ConversionError>;
}

struct Erased<V, C> {
    converter: C,
    _native: PhantomData<fn() -> V>,
}

impl<V, C> ErasedConverter for Erased<V, C>
where
    V: Send + 'static,
    C: AttributeConverter<V>,
{
    fn descriptor(&self) -> TypeDescriptor {
        self.converter.descriptor()
    }

    fn native_type(&self) -> TypeId {
        TypeId::of::<V>()
    }

    fn to_attribute_erased(&self, value: &dyn Any) -> AttributeValue {
        let value = value
            .downcast_ref::<V>()
            .expect("typed handle guarantees the native type");
        self.converter.to_attribute(value)
    }

    fn from_attribute_erased(
        &self,
        attr: &AttributeValue,
    ) -> Result<Box<dyn Any + Send>, ConversionError> {
        Ok(Box::new(self.converter.from_attribute(attr)?))
    }
}

/// A converter with its native type erased, as stored by providers.
///
/// `DynConverter` is what a [`ConverterProvider`] hands back; it is only
/// invoked through the checked [`SharedConverter`] handle.
#[derive(Clone)]
pub struct DynConverter {
    inner: Arc<dyn ErasedConverter>,
}

impl fmt::Debug for DynConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynConverter<{}>", self.inner.descriptor())
    }
}

impl DynConverter {
    /// Erases a typed converter.
    pub fn new<V, C>(converter: C) -> Self
    where
        V: Send + 'static,
        C: AttributeConverter<V>,
    {
        DynConverter {
            inner: Arc::new(Erased {
                converter,
                _native: PhantomData,
            }),
        }
    }

    /// The descriptor this converter answers for.
    pub fn descriptor(&self) -> TypeDescriptor {
        self.inner.descriptor()
    }
}

/// Cheaply cloneable typed handle to a resolved converter.
pub struct SharedConverter<V> {
    inner: Arc<dyn ErasedConverter>,
    _native: PhantomData<fn() -> V>,
}

impl<V> Clone for SharedConverter<V> {
    fn clone(&self) -> Self {
        SharedConverter {
            inner: self.inner.clone(),
            _native: PhantomData,
        }
    }
}

impl<V> fmt::Debug for SharedConverter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedConverter<{}>", self.inner.descriptor())
    }
}

impl<V> SharedConverter<V>
where
    V: Send + 'static,
{
    /// Wraps a concrete converter in a shared handle.
    pub fn new<C>(converter: C) -> Self
    where
        C: AttributeConverter<V>,
    {
        SharedConverter {
            inner: Arc::new(Erased {
                converter,
                _native: PhantomData,
            }),
            _native: PhantomData,
        }
    }

    fn from_dyn(converter: DynConverter) -> Result<Self, Error> {
        if converter.inner.native_type() != TypeId::of::<V>() {
            return Err(Error::ConverterTypeMismatch {
                descriptor: converter.descriptor(),
                expected: std::any::type_name::<V>(),
            });
        }
        Ok(SharedConverter {
            inner: converter.inner,
            _native: PhantomData,
        })
    }
}

impl<V> AttributeConverter<V> for SharedConverter<V>
where
    V: Send + 'static,
{
    fn descriptor(&self) -> TypeDescriptor {
        self.inner.descriptor()
    }

    fn to_attribute(&self, value: &V) -> AttributeValue {
        self.inner.to_attribute_erased(value)
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<V, ConversionError> {
        let boxed = self.inner.from_attribute_erased(attr)?;
        Ok(*boxed
            .downcast::<V>()
            .expect("construction checked the native type"))
    }
}

/// One link of the resolution chain.
pub trait ConverterProvider: Send + Sync {
    /// Returns the converter registered for `descriptor`, if this provider
    /// carries one.
    fn converter_for(&self, descriptor: &TypeDescriptor) -> Option<DynConverter>;
}

/// Native types that can be resolved through a [`ConverterRegistry`].
///
/// Implemented for every type with a built-in converter and for the container
/// shapes. Custom entity field types implement it to name their descriptor;
/// [`compose`](ConvertibleType::compose) only needs overriding for new
/// container-like shapes.
pub trait ConvertibleType: Sized + Send + 'static {
    /// Structural descriptor used as the registry key.
    fn type_descriptor() -> TypeDescriptor;

    /// Fallback used when no provider in the chain claims the descriptor.
    ///
    /// Container shapes build themselves from their element converters here;
    /// scalar types report that no converter exists.
    fn compose(registry: &ConverterRegistry) -> Result<SharedConverter<Self>, Error> {
        let _ = registry;
        Err(Error::no_converter(Self::type_descriptor()))
    }
}

/// Ordered, overridable chain resolving type descriptors to converters.
#[derive(Clone)]
pub struct ConverterRegistry {
    providers: Arc<[Arc<dyn ConverterProvider>]>,
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConverterRegistry({} providers)", self.providers.len())
    }
}

impl Default for ConverterRegistry {
    /// A registry with only the built-in catalogue.
    fn default() -> Self {
        ConverterRegistry::builder().build()
    }
}

impl ConverterRegistry {
    /// Creates a builder for `ConverterRegistry`.
    pub fn builder() -> ConverterRegistryBuilder {
        ConverterRegistryBuilder::default()
    }

    /// Resolves a descriptor through the provider chain; first match wins.
    pub fn resolve_descriptor(&self, descriptor: &TypeDescriptor) -> Result<DynConverter, Error> {
        self.lookup(descriptor)
            .ok_or_else(|| Error::no_converter(descriptor.clone()))
    }

    /// Resolves the converter for `V`.
    ///
    /// The chain is consulted with `V`'s descriptor first; when it has no
    /// entry, container shapes compose recursively and scalars fail with
    /// [`Error::NoConverterAvailable`].
    pub fn resolve<V: ConvertibleType>(&self) -> Result<SharedConverter<V>, Error> {
        match self.lookup(&V::type_descriptor()) {
            Some(found) => SharedConverter::from_dyn(found),
            None => V::compose(self),
        }
    }

    fn lookup(&self, descriptor: &TypeDescriptor) -> Option<DynConverter> {
        self.providers
            .iter()
            .find_map(|provider| provider.converter_for(descriptor))
    }
}

/// Builder for [`ConverterRegistry`].
///
/// Providers are consulted in registration order, and every registered
/// provider is consulted before the built-in catalogue.
#[derive(Default)]
pub struct ConverterRegistryBuilder {
    providers: Vec<Arc<dyn ConverterProvider>>,
}

impl fmt::Debug for ConverterRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConverterRegistryBuilder({} providers)",
            self.providers.len()
        )
    }
}

impl ConverterRegistryBuilder {
    /// Adds a provider ahead of the built-ins.
    pub fn provider(mut self, provider: impl ConverterProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Registers a single converter ahead of the built-ins.
    pub fn converter<V, C>(self, converter: C) -> Self
    where
        V: Send + 'static,
        C: AttributeConverter<V>,
    {
        struct Single(DynConverter);
        impl ConverterProvider for Single {
            fn converter_for(&self, descriptor: &TypeDescriptor) -> Option<DynConverter> {
                (self.0.descriptor() == *descriptor).then(|| self.0.clone())
            }
        }
        self.provider(Single(DynConverter::new(converter)))
    }

    /// Builds the registry, appending the built-in catalogue as the final
    /// link of the chain.
    pub fn build(mut self) -> ConverterRegistry {
        self.providers
            .push(Arc::new(DefaultConverterProvider::new()));
        ConverterRegistry {
            providers: self.providers.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::string::StringConverter;
    use super::{
        AttributeConverter, ConverterRegistry, ConvertibleType, TypeDescriptor,
    };
    use crate::error::{ConversionError, Error};
    use shale_types::AttributeValue;

    /// Converter that shouts, for exercising override behavior.
    #[derive(Debug, Clone, Copy)]
    struct UppercaseStringConverter;

    impl AttributeConverter<String> for UppercaseStringConverter {
        fn descriptor(&self) -> TypeDescriptor {
            TypeDescriptor::named("string")
        }

        fn to_attribute(&self, value: &String) -> AttributeValue {
            AttributeValue::S(value.to_uppercase())
        }

        fn from_attribute(&self, attr: &AttributeValue) -> Result<String, ConversionError> {
            StringConverter
                .from_attribute(attr)
                .map(|text| text.to_uppercase())
        }
    }

    #[test]
    fn built_ins_resolve_by_descriptor() {
        let registry = ConverterRegistry::default();
        let converter = registry.resolve::<String>().unwrap();
        assert_eq!(
            AttributeValue::S("foo".to_owned()),
            converter.to_attribute(&"foo".to_owned())
        );
    }

    #[test]
    fn caller_registration_overrides_the_built_in() {
        let registry = ConverterRegistry::builder()
            .converter::<String, _>(UppercaseStringConverter)
            .build();
        let converter = registry.resolve::<String>().unwrap();
        assert_eq!(
            AttributeValue::S("FOO".to_owned()),
            converter.to_attribute(&"foo".to_owned())
        );
        // every subsequent resolution sees the override as well
        let again = registry.resolve::<String>().unwrap();
        assert_eq!(
            "FOO",
            again
                .from_attribute(&AttributeValue::S("foo".to_owned()))
                .unwrap()
        );
    }

    #[test]
    fn overrides_apply_inside_composed_containers() {
        let registry = ConverterRegistry::builder()
            .converter::<String, _>(UppercaseStringConverter)
            .build();
        let converter = registry.resolve::<Vec<String>>().unwrap();
        assert_eq!(
            AttributeValue::L(vec![AttributeValue::S("A".to_owned())]),
            converter.to_attribute(&vec!["a".to_owned()])
        );
    }

    #[test]
    fn unknown_descriptors_fail_resolution() {
        struct Unmapped;
        impl ConvertibleType for Unmapped {
            fn type_descriptor() -> TypeDescriptor {
                TypeDescriptor::named("unmapped")
            }
        }
        let registry = ConverterRegistry::default();
        let err = registry.resolve::<Unmapped>().unwrap_err();
        assert!(matches!(err, Error::NoConverterAvailable { .. }));
    }

    #[test]
    fn misregistered_native_type_is_reported() {
        // claims the `i64` descriptor but produces `String`
        #[derive(Debug, Clone, Copy)]
        struct Lying;
        impl AttributeConverter<String> for Lying {
            fn descriptor(&self) -> TypeDescriptor {
                TypeDescriptor::named("i64")
            }
            fn to_attribute(&self, value: &String) -> AttributeValue {
                AttributeValue::S(value.clone())
            }
            fn from_attribute(&self, _attr: &AttributeValue) -> Result<String, ConversionError> {
                Ok(String::new())
            }
        }
        let registry = ConverterRegistry::builder()
            .converter::<String, _>(Lying)
            .build();
        let err = registry.resolve::<i64>().unwrap_err();
        assert!(matches!(err, Error::ConverterTypeMismatch { .. }));
    }

    #[test]
    fn resolution_is_deterministic_across_calls() {
        let registry = ConverterRegistry::default();
        let descriptor = TypeDescriptor::named("string");
        let first = registry.resolve_descriptor(&descriptor).unwrap();
        let second = registry.resolve_descriptor(&descriptor).unwrap();
        assert_eq!(first.descriptor(), second.descriptor());
    }
}
