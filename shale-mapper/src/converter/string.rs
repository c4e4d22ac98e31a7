/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Converters for character-sequence targets.
//!
//! The whole family renders to a plain `S` attribute and accepts both `S` and
//! `N` on the way back — a number's decimal text is perfectly good source
//! text. The `String` converter goes further: it is the catch-all that can
//! render *any* attribute variant to a deterministic textual form, which is
//! what makes "store it as text" and debugging output work for containers.

use crate::converter::{AttributeConverter, ConvertibleType, TypeDescriptor};
use crate::error::ConversionError;
use shale_types::{base64, AttributeValue};
use std::borrow::Cow;
use std::sync::Arc;

/// Renders any attribute value to its canonical text form.
///
/// Lists and string/number sets render as `[a, b]`; maps render as
/// `{k=v, k2=v2}`; binary sets render as base64 tokens joined by a bare
/// comma. The two set separators really do differ — downstream consumers
/// depend on the exact text, so both conventions are preserved.
pub(crate) fn render_text(attr: &AttributeValue) -> String {
    match attr {
        AttributeValue::S(text) => text.clone(),
        AttributeValue::N(text) => text.clone(),
        AttributeValue::B(blob) => base64::encode(blob),
        AttributeValue::Bool(value) => value.to_string(),
        AttributeValue::Null => "null".to_owned(),
        AttributeValue::L(items) => {
            let rendered: Vec<String> = items.iter().map(render_text).collect();
            format!("[{}]", rendered.join(", "))
        }
        AttributeValue::M(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{key}={}", render_text(value)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        AttributeValue::Ss(set) | AttributeValue::Ns(set) => {
            let rendered: Vec<&str> = set.iter().map(String::as_str).collect();
            format!("[{}]", rendered.join(", "))
        }
        AttributeValue::Bs(set) => {
            let rendered: Vec<String> = set.iter().map(base64::encode).collect();
            format!("[{}]", rendered.join(","))
        }
    }
}

/// Extracts textual source — `S` or `N` — or reports the shape mismatch.
fn source_text<'a>(
    attr: &'a AttributeValue,
    descriptor: fn() -> TypeDescriptor,
) -> Result<&'a str, ConversionError> {
    match attr {
        AttributeValue::S(text) | AttributeValue::N(text) => Ok(text),
        other => Err(ConversionError::new(
            descriptor(),
            format!("expected a string or number attribute, found `{}`", other.tag()),
        )),
    }
}

/// Converter for `String`; doubles as the generic catch-all.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl AttributeConverter<String> for StringConverter {
    fn descriptor(&self) -> TypeDescriptor {
        String::type_descriptor()
    }

    fn to_attribute(&self, value: &String) -> AttributeValue {
        AttributeValue::S(value.clone())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<String, ConversionError> {
        Ok(render_text(attr))
    }
}

impl ConvertibleType for String {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("string")
    }
}

/// Converter for a single `char`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharConverter;

impl AttributeConverter<char> for CharConverter {
    fn descriptor(&self) -> TypeDescriptor {
        char::type_descriptor()
    }

    fn to_attribute(&self, value: &char) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<char, ConversionError> {
        let text = source_text(attr, char::type_descriptor)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(only), None) => Ok(only),
            _ => Err(ConversionError::new(
                char::type_descriptor(),
                format!("expected exactly one character, found {:?}", text),
            )),
        }
    }
}

impl ConvertibleType for char {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("char")
    }
}

/// Converter for `Vec<char>`, rendered as contiguous text rather than a list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharVecConverter;

impl AttributeConverter<Vec<char>> for CharVecConverter {
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::list(TypeDescriptor::named("char"))
    }

    fn to_attribute(&self, value: &Vec<char>) -> AttributeValue {
        AttributeValue::S(value.iter().collect())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Vec<char>, ConversionError> {
        let text = source_text(attr, || TypeDescriptor::list(TypeDescriptor::named("char")))?;
        Ok(text.chars().collect())
    }
}

/// Converter for `Box<str>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxStrConverter;

impl AttributeConverter<Box<str>> for BoxStrConverter {
    fn descriptor(&self) -> TypeDescriptor {
        <Box<str>>::type_descriptor()
    }

    fn to_attribute(&self, value: &Box<str>) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Box<str>, ConversionError> {
        source_text(attr, <Box<str>>::type_descriptor).map(Box::from)
    }
}

impl ConvertibleType for Box<str> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("boxed-str")
    }
}

/// Converter for `Cow<'static, str>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CowStrConverter;

impl AttributeConverter<Cow<'static, str>> for CowStrConverter {
    fn descriptor(&self) -> TypeDescriptor {
        <Cow<'static, str>>::type_descriptor()
    }

    fn to_attribute(&self, value: &Cow<'static, str>) -> AttributeValue {
        AttributeValue::S(value.clone().into_owned())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Cow<'static, str>, ConversionError> {
        source_text(attr, <Cow<'static, str>>::type_descriptor)
            .map(|text| Cow::Owned(text.to_owned()))
    }
}

impl ConvertibleType for Cow<'static, str> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("cow-str")
    }
}

/// Converter for `Arc<str>`, the cheaply shared immutable string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcStrConverter;

impl AttributeConverter<Arc<str>> for ArcStrConverter {
    fn descriptor(&self) -> TypeDescriptor {
        <Arc<str>>::type_descriptor()
    }

    fn to_attribute(&self, value: &Arc<str>) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Arc<str>, ConversionError> {
        source_text(attr, <Arc<str>>::type_descriptor).map(Arc::from)
    }
}

impl ConvertibleType for Arc<str> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("arc-str")
    }
}
