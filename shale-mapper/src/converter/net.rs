/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Converters for network locators and identifiers.

use crate::converter::{AttributeConverter, ConvertibleType, TypeDescriptor};
use crate::error::ConversionError;
use http::Uri;
use shale_types::{AttributeValue, UriRef};
use uuid::Uuid;

fn source_text<'a>(
    attr: &'a AttributeValue,
    descriptor: fn() -> TypeDescriptor,
) -> Result<&'a str, ConversionError> {
    match attr {
        AttributeValue::S(text) => Ok(text),
        other => Err(ConversionError::new(
            descriptor(),
            format!("expected a string attribute, found `{}`", other.tag()),
        )),
    }
}

/// Converter for [`UriRef`].
///
/// Covers every URI-reference form — absolute, relative, fragment-bearing —
/// and round-trips the exact text. Malformed input surfaces the underlying
/// parse error as the conversion source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriRefConverter;

impl AttributeConverter<UriRef> for UriRefConverter {
    fn descriptor(&self) -> TypeDescriptor {
        UriRef::type_descriptor()
    }

    fn to_attribute(&self, value: &UriRef) -> AttributeValue {
        AttributeValue::S(value.as_str().to_owned())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<UriRef, ConversionError> {
        let text = source_text(attr, UriRef::type_descriptor)?;
        UriRef::parse(text).map_err(|err| {
            ConversionError::with_source(
                UriRef::type_descriptor(),
                format!("invalid URI reference {:?}", text),
                err,
            )
        })
    }
}

impl ConvertibleType for UriRef {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("uri")
    }
}

/// Converter for [`http::Uri`], the strict scheme-ful locator of the HTTP
/// stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpUriConverter;

impl AttributeConverter<Uri> for HttpUriConverter {
    fn descriptor(&self) -> TypeDescriptor {
        Uri::type_descriptor()
    }

    fn to_attribute(&self, value: &Uri) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Uri, ConversionError> {
        let text = source_text(attr, Uri::type_descriptor)?;
        text.parse::<Uri>().map_err(|err| {
            ConversionError::with_source(
                Uri::type_descriptor(),
                format!("invalid URI {:?}", text),
                err,
            )
        })
    }
}

impl ConvertibleType for Uri {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("http-uri")
    }
}

/// Converter for [`Uuid`], via the canonical hyphenated text form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidConverter;

impl AttributeConverter<Uuid> for UuidConverter {
    fn descriptor(&self) -> TypeDescriptor {
        Uuid::type_descriptor()
    }

    fn to_attribute(&self, value: &Uuid) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Uuid, ConversionError> {
        let text = source_text(attr, Uuid::type_descriptor)?;
        Uuid::parse_str(text).map_err(|err| {
            ConversionError::with_source(
                Uuid::type_descriptor(),
                format!("invalid identifier {:?}", text),
                err,
            )
        })
    }
}

impl ConvertibleType for Uuid {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("uuid")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn s(text: &str) -> AttributeValue {
        AttributeValue::S(text.to_owned())
    }

    #[test]
    fn uri_references_round_trip_exactly() {
        let converter = UriRefConverter;
        for text in [
            "http://example.com/languages/rust/",
            "sample/a/index.html#28",
            "../../demo/b/index.html",
            "file:///~/calendar",
        ] {
            let parsed = converter.from_attribute(&s(text)).unwrap();
            assert_eq!(s(text), converter.to_attribute(&parsed));
        }
        assert!(converter.from_attribute(&s("http://exa mple.com")).is_err());
    }

    #[test]
    fn uri_parse_failures_carry_a_distinct_source() {
        let err = UriRefConverter
            .from_attribute(&s("http://example.com/a b"))
            .unwrap_err();
        let source = std::error::Error::source(&err).expect("parse error attached");
        assert!(source.downcast_ref::<shale_types::uri::UriParseError>().is_some());
    }

    #[test]
    fn http_uris_round_trip() {
        let converter = HttpUriConverter;
        let parsed = converter
            .from_attribute(&s("http://example.com/languages/rust/"))
            .unwrap();
        assert_eq!(
            s("http://example.com/languages/rust/"),
            converter.to_attribute(&parsed)
        );
        assert!(converter.from_attribute(&s("http://exa mple.com/")).is_err());
    }

    #[test]
    fn uuids_round_trip_canonical_text() {
        let converter = UuidConverter;
        let id = Uuid::parse_str("f81d4fae-7dec-11d0-a765-00a0c91e6bf6").unwrap();
        assert_eq!(
            s("f81d4fae-7dec-11d0-a765-00a0c91e6bf6"),
            converter.to_attribute(&id)
        );
        assert_eq!(
            id,
            converter
                .from_attribute(&s("f81d4fae-7dec-11d0-a765-00a0c91e6bf6"))
                .unwrap()
        );
        assert!(converter.from_attribute(&s("not-a-uuid")).is_err());
    }
}
