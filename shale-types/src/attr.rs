/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The tagged attribute value of the store's item format.

use crate::{Blob, Set};
use indexmap::IndexMap;

/// A string-keyed attribute collection.
///
/// Items, `M` attribute payloads, and continuation keys all share this shape.
/// Iteration preserves insertion order (so renderings are deterministic)
/// while equality ignores it.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// One attribute in the store's item format.
///
/// Exactly one variant is present per attribute. Numbers travel as decimal
/// text so arbitrary precision survives the trip; binary payloads are base64
/// on any textual transport. The set variants (`Ss`/`Ns`/`Bs`) must be
/// non-empty on the wire — the store rejects empty sets, and nothing in this
/// workspace manufactures them.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A string value.
    S(String),
    /// A number, kept as its decimal text form.
    N(String),
    /// A binary value.
    B(Blob),
    /// A boolean value.
    Bool(bool),
    /// The explicit null value.
    Null,
    /// An ordered list of attribute values.
    L(Vec<AttributeValue>),
    /// A string-keyed map of attribute values.
    M(AttributeMap),
    /// A set of unique strings.
    Ss(Set<String>),
    /// A set of unique numbers, kept as their decimal text forms.
    Ns(Set<String>),
    /// A set of unique binary values.
    Bs(Set<Blob>),
}

impl AttributeValue {
    /// Returns the string payload, or `Err(self)` for any other variant.
    pub fn as_s(&self) -> Result<&str, &Self> {
        match self {
            AttributeValue::S(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns the decimal text of a number, or `Err(self)` for any other variant.
    pub fn as_n(&self) -> Result<&str, &Self> {
        match self {
            AttributeValue::N(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns the binary payload, or `Err(self)` for any other variant.
    pub fn as_b(&self) -> Result<&Blob, &Self> {
        match self {
            AttributeValue::B(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns the boolean payload, or `Err(self)` for any other variant.
    pub fn as_bool(&self) -> Result<bool, &Self> {
        match self {
            AttributeValue::Bool(value) => Ok(*value),
            other => Err(other),
        }
    }

    /// Returns the list payload, or `Err(self)` for any other variant.
    pub fn as_l(&self) -> Result<&[AttributeValue], &Self> {
        match self {
            AttributeValue::L(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns the map payload, or `Err(self)` for any other variant.
    pub fn as_m(&self) -> Result<&AttributeMap, &Self> {
        match self {
            AttributeValue::M(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns the string-set payload, or `Err(self)` for any other variant.
    pub fn as_ss(&self) -> Result<&Set<String>, &Self> {
        match self {
            AttributeValue::Ss(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns the number-set payload, or `Err(self)` for any other variant.
    pub fn as_ns(&self) -> Result<&Set<String>, &Self> {
        match self {
            AttributeValue::Ns(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns the binary-set payload, or `Err(self)` for any other variant.
    pub fn as_bs(&self) -> Result<&Set<Blob>, &Self> {
        match self {
            AttributeValue::Bs(value) => Ok(value),
            other => Err(other),
        }
    }

    /// Returns `true` for the explicit null value.
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// The wire tag of this variant (`S`, `N`, `B`, `BOOL`, `NULL`, `L`, `M`,
    /// `SS`, `NS`, `BS`), useful in diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null => "NULL",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::S(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::S(value.to_owned())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<Blob> for AttributeValue {
    fn from(value: Blob) -> Self {
        AttributeValue::B(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(values: Vec<AttributeValue>) -> Self {
        AttributeValue::L(values)
    }
}

impl From<AttributeMap> for AttributeValue {
    fn from(values: AttributeMap) -> Self {
        AttributeValue::M(values)
    }
}
