/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Error types emitted by `shale-mapper`.

use crate::converter::TypeDescriptor;
use crate::store::BoxError;

/// Failures surfaced by converter resolution, schema construction, item
/// conversion, and paginated operations.
///
/// Conversion and resolution failures are permanent — they mean the data and
/// the schema/converter configuration disagree — so nothing in this crate
/// retries them. Transport failures from the store client pass through
/// untouched inside [`Error::Store`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No provider in the registry chain matched the requested type.
    #[error("no converter available for `{descriptor}`")]
    NoConverterAvailable {
        /// The descriptor that failed to resolve.
        descriptor: TypeDescriptor,
    },

    /// A provider returned a converter whose native type is not the one the
    /// descriptor was resolved for.
    #[error("converter registered for `{descriptor}` does not produce `{expected}`")]
    ConverterTypeMismatch {
        /// The descriptor that was resolved.
        descriptor: TypeDescriptor,
        /// The native type the caller asked for.
        expected: &'static str,
    },

    /// A wire value could not be read back as its native type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// An entity schema was assembled inconsistently.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// An item's attribute map does not line up with the entity schema.
    #[error("schema mismatch on attribute `{attribute}`: {reason}")]
    SchemaMismatch {
        /// The attribute that failed to line up.
        attribute: String,
        /// Why it failed.
        reason: String,
    },

    /// The high-level request was malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The store client failed. The original error is preserved untouched
    /// and can be recovered with [`std::error::Error::source`] or downcast.
    #[error("store request failed")]
    Store(#[source] BoxError),
}

impl Error {
    pub(crate) fn no_converter(descriptor: TypeDescriptor) -> Self {
        Error::NoConverterAvailable { descriptor }
    }

    pub(crate) fn schema_mismatch(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn store(source: BoxError) -> Self {
        Error::Store(source)
    }
}

/// A wire value's shape or textual content does not satisfy the target
/// type's accepted grammar.
///
/// Raised only when reading values back; rendering a well-formed native
/// value never fails.
#[derive(Debug, thiserror::Error)]
#[error("cannot read `{descriptor}` from attribute value: {message}")]
pub struct ConversionError {
    descriptor: TypeDescriptor,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ConversionError {
    /// A conversion failure with no underlying parser error.
    pub fn new(descriptor: TypeDescriptor, message: impl Into<String>) -> Self {
        ConversionError {
            descriptor,
            message: message.into(),
            source: None,
        }
    }

    /// A conversion failure caused by a dedicated parser.
    ///
    /// Keeping the parse error as the source lets callers distinguish, say, a
    /// malformed locator from a wrong-shape attribute.
    pub fn with_source(
        descriptor: TypeDescriptor,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConversionError {
            descriptor,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The descriptor of the type the value failed to convert into.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}
