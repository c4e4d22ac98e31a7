/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The built-in converter catalogue.

use crate::converter::binary::BlobConverter;
use crate::converter::collection::{BlobSetConverter, StringSetConverter};
use crate::converter::net::{HttpUriConverter, UriRefConverter, UuidConverter};
use crate::converter::number::{
    BoolConverter, F32Converter, F64Converter, I16Converter, I32Converter, I64Converter,
    I8Converter, U16Converter, U32Converter, U64Converter, U8Converter,
};
use crate::converter::string::{
    ArcStrConverter, BoxStrConverter, CharConverter, CharVecConverter, CowStrConverter,
    StringConverter,
};
use crate::converter::time::{FixedOffsetConverter, PeriodConverter, TzConverter};
use crate::converter::{ConverterProvider, DynConverter, TypeDescriptor};
use std::collections::HashMap;
use std::fmt;

/// Provider carrying the built-in converters.
///
/// Appended as the final link of every registry chain, so caller
/// registrations always win. Container shapes (`Vec`, `HashMap`, `Option`)
/// are deliberately absent: they compose recursively during typed resolution.
/// The one exception is `Vec<char>`, which has a dedicated converter because
/// a character array is contiguous text on the wire, not a list.
pub struct DefaultConverterProvider {
    converters: HashMap<TypeDescriptor, DynConverter>,
}

impl fmt::Debug for DefaultConverterProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DefaultConverterProvider({} converters)",
            self.converters.len()
        )
    }
}

impl DefaultConverterProvider {
    /// Creates the catalogue.
    pub fn new() -> Self {
        let converters = [
            // character-sequence family
            DynConverter::new(StringConverter),
            DynConverter::new(CharConverter),
            DynConverter::new(CharVecConverter),
            DynConverter::new(BoxStrConverter),
            DynConverter::new(CowStrConverter),
            DynConverter::new(ArcStrConverter),
            // numbers and booleans
            DynConverter::new(I8Converter),
            DynConverter::new(I16Converter),
            DynConverter::new(I32Converter),
            DynConverter::new(I64Converter),
            DynConverter::new(U8Converter),
            DynConverter::new(U16Converter),
            DynConverter::new(U32Converter),
            DynConverter::new(U64Converter),
            DynConverter::new(F32Converter),
            DynConverter::new(F64Converter),
            DynConverter::new(BoolConverter),
            // temporal types
            DynConverter::new(PeriodConverter),
            DynConverter::new(FixedOffsetConverter),
            DynConverter::new(TzConverter),
            // locators and identifiers
            DynConverter::new(UriRefConverter),
            DynConverter::new(HttpUriConverter),
            DynConverter::new(UuidConverter),
            // binary payloads and sets
            DynConverter::new(BlobConverter),
            DynConverter::new(StringSetConverter),
            DynConverter::new(BlobSetConverter),
        ]
        .into_iter()
        .map(|converter| (converter.descriptor(), converter))
        .collect();
        DefaultConverterProvider { converters }
    }
}

impl Default for DefaultConverterProvider {
    fn default() -> Self {
        DefaultConverterProvider::new()
    }
}

impl ConverterProvider for DefaultConverterProvider {
    fn converter_for(&self, descriptor: &TypeDescriptor) -> Option<DynConverter> {
        self.converters.get(descriptor).cloned()
    }
}

#[cfg(test)]
mod test {
    use super::DefaultConverterProvider;
    use crate::converter::{ConverterProvider, TypeDescriptor};

    #[test]
    fn catalogue_answers_for_its_descriptors_only() {
        let provider = DefaultConverterProvider::new();
        assert!(provider
            .converter_for(&TypeDescriptor::named("string"))
            .is_some());
        assert!(provider
            .converter_for(&TypeDescriptor::list(TypeDescriptor::named("char")))
            .is_some());
        assert!(provider
            .converter_for(&TypeDescriptor::named("no-such-type"))
            .is_none());
        assert!(provider
            .converter_for(&TypeDescriptor::list(TypeDescriptor::named("string")))
            .is_none());
    }
}
