/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Converter for binary payloads.

use crate::converter::{AttributeConverter, ConvertibleType, TypeDescriptor};
use crate::error::ConversionError;
use shale_types::{base64, AttributeValue, Blob};

/// Converter for [`Blob`].
///
/// Reads the `B` variant directly; also accepts base64 text from an `S`
/// attribute, the form binary payloads take on textual transports.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobConverter;

impl AttributeConverter<Blob> for BlobConverter {
    fn descriptor(&self) -> TypeDescriptor {
        Blob::type_descriptor()
    }

    fn to_attribute(&self, value: &Blob) -> AttributeValue {
        AttributeValue::B(value.clone())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Blob, ConversionError> {
        match attr {
            AttributeValue::B(blob) => Ok(blob.clone()),
            AttributeValue::S(text) => base64::decode(text).map(Blob::new).map_err(|err| {
                ConversionError::with_source(
                    Blob::type_descriptor(),
                    format!("invalid base64 text {:?}", text),
                    err,
                )
            }),
            other => Err(ConversionError::new(
                Blob::type_descriptor(),
                format!("expected a binary attribute, found `{}`", other.tag()),
            )),
        }
    }
}

impl ConvertibleType for Blob {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("blob")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blobs_round_trip_and_accept_base64_text() {
        let converter = BlobConverter;
        let blob = Blob::from("d");
        assert_eq!(AttributeValue::B(blob.clone()), converter.to_attribute(&blob));
        assert_eq!(
            blob,
            converter
                .from_attribute(&AttributeValue::B(Blob::from("d")))
                .unwrap()
        );
        assert_eq!(
            blob,
            converter
                .from_attribute(&AttributeValue::S("ZA==".to_owned()))
                .unwrap()
        );
        assert!(converter
            .from_attribute(&AttributeValue::S("!!".to_owned()))
            .is_err());
        assert!(converter.from_attribute(&AttributeValue::Null).is_err());
    }
}
