/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Converters composed over container shapes, plus the set converters.
//!
//! Containers are not enumerated in the built-in catalogue; they build
//! themselves out of their element converters during typed resolution, so a
//! `Vec<Vec<Uuid>>` or a caller-overridden `Vec<String>` needs no dedicated
//! registration.

use crate::converter::{
    AttributeConverter, ConverterRegistry, ConvertibleType, SharedConverter, TypeDescriptor,
};
use crate::error::{ConversionError, Error};
use shale_types::{AttributeMap, AttributeValue, Blob, Set};
use std::collections::HashMap;
use std::fmt;

/// Converts `Vec<V>` through the element converter as a wire list.
pub struct VecConverter<V> {
    element: SharedConverter<V>,
}

impl<V: Send + 'static> fmt::Debug for VecConverter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VecConverter<{}>", self.element.descriptor())
    }
}

impl<V: Send + 'static> VecConverter<V> {
    /// Composes a list converter over `element`.
    pub fn new(element: SharedConverter<V>) -> Self {
        VecConverter { element }
    }
}

impl<V: Send + 'static> AttributeConverter<Vec<V>> for VecConverter<V> {
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::list(self.element.descriptor())
    }

    fn to_attribute(&self, value: &Vec<V>) -> AttributeValue {
        AttributeValue::L(
            value
                .iter()
                .map(|element| self.element.to_attribute(element))
                .collect(),
        )
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Vec<V>, ConversionError> {
        match attr {
            AttributeValue::L(items) => items
                .iter()
                .map(|item| self.element.from_attribute(item))
                .collect(),
            other => Err(ConversionError::new(
                self.descriptor(),
                format!("expected a list attribute, found `{}`", other.tag()),
            )),
        }
    }
}

impl<V: ConvertibleType> ConvertibleType for Vec<V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::list(V::type_descriptor())
    }

    fn compose(registry: &ConverterRegistry) -> Result<SharedConverter<Self>, Error> {
        let element = registry.resolve::<V>()?;
        Ok(SharedConverter::new(VecConverter::new(element)))
    }
}

/// Converts `HashMap<String, V>` through the value converter as a wire map.
pub struct MapConverter<V> {
    value: SharedConverter<V>,
}

impl<V: Send + 'static> fmt::Debug for MapConverter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapConverter<{}>", self.value.descriptor())
    }
}

impl<V: Send + 'static> MapConverter<V> {
    /// Composes a map converter over `value`.
    pub fn new(value: SharedConverter<V>) -> Self {
        MapConverter { value }
    }
}

impl<V: Send + 'static> AttributeConverter<HashMap<String, V>> for MapConverter<V> {
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::map(self.value.descriptor())
    }

    fn to_attribute(&self, value: &HashMap<String, V>) -> AttributeValue {
        AttributeValue::M(
            value
                .iter()
                .map(|(key, entry)| (key.clone(), self.value.to_attribute(entry)))
                .collect::<AttributeMap>(),
        )
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<HashMap<String, V>, ConversionError> {
        match attr {
            AttributeValue::M(map) => map
                .iter()
                .map(|(key, entry)| Ok((key.clone(), self.value.from_attribute(entry)?)))
                .collect(),
            other => Err(ConversionError::new(
                self.descriptor(),
                format!("expected a map attribute, found `{}`", other.tag()),
            )),
        }
    }
}

impl<V: ConvertibleType> ConvertibleType for HashMap<String, V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map(V::type_descriptor())
    }

    fn compose(registry: &ConverterRegistry) -> Result<SharedConverter<Self>, Error> {
        let value = registry.resolve::<V>()?;
        Ok(SharedConverter::new(MapConverter::new(value)))
    }
}

/// Converts `Option<V>`: `None` is the explicit null value.
pub struct OptionConverter<V> {
    inner: SharedConverter<V>,
}

impl<V: Send + 'static> fmt::Debug for OptionConverter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionConverter<{}>", self.inner.descriptor())
    }
}

impl<V: Send + 'static> OptionConverter<V> {
    /// Composes an optional converter over `inner`.
    pub fn new(inner: SharedConverter<V>) -> Self {
        OptionConverter { inner }
    }
}

impl<V: Send + 'static> AttributeConverter<Option<V>> for OptionConverter<V> {
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::option(self.inner.descriptor())
    }

    fn to_attribute(&self, value: &Option<V>) -> AttributeValue {
        match value {
            Some(inner) => self.inner.to_attribute(inner),
            None => AttributeValue::Null,
        }
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Option<V>, ConversionError> {
        match attr {
            AttributeValue::Null => Ok(None),
            other => Ok(Some(self.inner.from_attribute(other)?)),
        }
    }
}

impl<V: ConvertibleType> ConvertibleType for Option<V> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::option(V::type_descriptor())
    }

    fn compose(registry: &ConverterRegistry) -> Result<SharedConverter<Self>, Error> {
        let inner = registry.resolve::<V>()?;
        Ok(SharedConverter::new(OptionConverter::new(inner)))
    }
}

/// Converter for `Set<String>` as the `SS` variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSetConverter;

impl AttributeConverter<Set<String>> for StringSetConverter {
    fn descriptor(&self) -> TypeDescriptor {
        <Set<String>>::type_descriptor()
    }

    fn to_attribute(&self, value: &Set<String>) -> AttributeValue {
        AttributeValue::Ss(value.clone())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Set<String>, ConversionError> {
        match attr {
            AttributeValue::Ss(set) => Ok(set.clone()),
            other => Err(ConversionError::new(
                <Set<String>>::type_descriptor(),
                format!("expected a string set attribute, found `{}`", other.tag()),
            )),
        }
    }
}

impl ConvertibleType for Set<String> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::generic("set", vec![TypeDescriptor::named("string")])
    }
}

/// Converter for `Set<Blob>` as the `BS` variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobSetConverter;

impl AttributeConverter<Set<Blob>> for BlobSetConverter {
    fn descriptor(&self) -> TypeDescriptor {
        <Set<Blob>>::type_descriptor()
    }

    fn to_attribute(&self, value: &Set<Blob>) -> AttributeValue {
        AttributeValue::Bs(value.clone())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Set<Blob>, ConversionError> {
        match attr {
            AttributeValue::Bs(set) => Ok(set.clone()),
            other => Err(ConversionError::new(
                <Set<Blob>>::type_descriptor(),
                format!("expected a binary set attribute, found `{}`", other.tag()),
            )),
        }
    }
}

impl ConvertibleType for Set<Blob> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::generic("set", vec![TypeDescriptor::named("blob")])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nested_containers_compose_through_the_registry() {
        let registry = ConverterRegistry::default();
        let converter = registry.resolve::<Vec<Vec<i64>>>().unwrap();
        let native = vec![vec![1, 2], vec![3]];
        let wire = converter.to_attribute(&native);
        assert_eq!(
            AttributeValue::L(vec![
                AttributeValue::L(vec![
                    AttributeValue::N("1".to_owned()),
                    AttributeValue::N("2".to_owned()),
                ]),
                AttributeValue::L(vec![AttributeValue::N("3".to_owned())]),
            ]),
            wire
        );
        assert_eq!(native, converter.from_attribute(&wire).unwrap());
    }

    #[test]
    fn maps_round_trip_values_by_key() {
        let registry = ConverterRegistry::default();
        let converter = registry.resolve::<HashMap<String, i32>>().unwrap();
        let mut native = HashMap::new();
        native.insert("a".to_owned(), 1);
        native.insert("b".to_owned(), 2);
        let wire = converter.to_attribute(&native);
        assert_eq!(native, converter.from_attribute(&wire).unwrap());
    }

    #[test]
    fn options_read_null_as_none() {
        let registry = ConverterRegistry::default();
        let converter = registry.resolve::<Option<String>>().unwrap();
        assert_eq!(AttributeValue::Null, converter.to_attribute(&None));
        assert_eq!(
            None::<String>,
            converter.from_attribute(&AttributeValue::Null).unwrap()
        );
        assert_eq!(
            Some("x".to_owned()),
            converter
                .from_attribute(&AttributeValue::S("x".to_owned()))
                .unwrap()
        );
    }

    #[test]
    fn list_shape_mismatch_fails_conversion() {
        let registry = ConverterRegistry::default();
        let converter = registry.resolve::<Vec<i64>>().unwrap();
        assert!(converter
            .from_attribute(&AttributeValue::S("nope".to_owned()))
            .is_err());
    }

    #[test]
    fn sets_round_trip_their_variants() {
        let registry = ConverterRegistry::default();

        let strings = registry.resolve::<Set<String>>().unwrap();
        let native = Set::from(["a".to_owned(), "b".to_owned()]);
        assert_eq!(
            AttributeValue::Ss(native.clone()),
            strings.to_attribute(&native)
        );
        assert_eq!(
            native,
            strings
                .from_attribute(&AttributeValue::Ss(native.clone()))
                .unwrap()
        );

        let blobs = registry.resolve::<Set<Blob>>().unwrap();
        let native = Set::from([Blob::from("a")]);
        assert_eq!(AttributeValue::Bs(native.clone()), blobs.to_attribute(&native));
    }
}
