/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Structural identity for convertible types.

use std::borrow::Cow;
use std::fmt;

/// Structural identity of a possibly-generic native type.
///
/// A descriptor is a name tag plus the ordered descriptors of any generic
/// parameters — `list<string>`, `map<string, i64>` — and is the key converter
/// providers are consulted with. Equality and hashing are structural: two
/// descriptors built independently for the same shape compare equal. Built
/// once per distinct shape and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    params: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Descriptor for a non-generic type.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        TypeDescriptor {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Descriptor for a generic type with ordered parameters.
    pub fn generic(name: impl Into<Cow<'static, str>>, params: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor {
            name: name.into(),
            params,
        }
    }

    /// Descriptor for a list of `element`.
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::generic("list", vec![element])
    }

    /// Descriptor for a string-keyed map of `value`.
    pub fn map(value: TypeDescriptor) -> Self {
        TypeDescriptor::generic("map", vec![TypeDescriptor::named("string"), value])
    }

    /// Descriptor for an optional `inner`.
    pub fn option(inner: TypeDescriptor) -> Self {
        TypeDescriptor::generic("option", vec![inner])
    }

    /// The name tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered generic parameters; empty for non-generic types.
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            f.write_str("<")?;
            for (index, param) in self.params.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                fmt::Display::fmt(param, f)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
