/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The collaborator boundary: wire-level request/response shapes and the
//! client traits this crate drives.
//!
//! The low-level service client — transport, retries, throttling, endpoint
//! and credential configuration — lives behind [`ScanStore`] and
//! [`AsyncScanStore`]. Each trait call performs exactly one page round trip;
//! the paginators in this crate chain calls together using the echoed
//! continuation key.

use shale_types::{AttributeMap, AttributeValue};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// Errors produced by a store client, propagated to callers unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Boxed future returned by async store clients.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A blocking client capable of one scan round trip per call.
pub trait ScanStore: Send + Sync {
    /// Fetches a single page of results.
    fn scan(&self, input: ScanInput) -> Result<ScanOutput, BoxError>;
}

/// A non-blocking client capable of one scan round trip per call.
pub trait AsyncScanStore: Send + Sync {
    /// Fetches a single page of results.
    fn scan(&self, input: ScanInput) -> BoxFuture<'_, Result<ScanOutput, BoxError>>;
}

/// A wire request for one page of a table or index enumeration.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct ScanInput {
    /// The table to enumerate.
    pub table_name: Option<String>,
    /// The secondary index to enumerate instead of the table itself. Absent
    /// means the table's own (primary) ordering.
    pub index_name: Option<String>,
    /// Upper bound on the number of items evaluated for this page.
    pub limit: Option<i32>,
    /// Resume key: the `last_evaluated_key` of the previous page, echoed
    /// verbatim.
    pub exclusive_start_key: Option<AttributeMap>,
    /// Request a strongly consistent read.
    pub consistent_read: Option<bool>,
    /// Filter applied by the store before returning items. Present only
    /// together with its placeholder maps below.
    pub filter_expression: Option<String>,
    /// Substitutions for `#name` placeholders in the filter.
    pub expression_attribute_names: Option<HashMap<String, String>>,
    /// Substitutions for `:value` placeholders in the filter.
    pub expression_attribute_values: Option<HashMap<String, AttributeValue>>,
}

impl ScanInput {
    /// Creates a builder for `ScanInput`.
    pub fn builder() -> ScanInputBuilder {
        ScanInputBuilder::default()
    }
}

/// Builder for [`ScanInput`].
#[derive(Debug, Default)]
pub struct ScanInputBuilder {
    inner: ScanInput,
}

impl ScanInputBuilder {
    /// Sets the table to enumerate.
    pub fn table_name(mut self, input: impl Into<String>) -> Self {
        self.inner.table_name = Some(input.into());
        self
    }

    /// Sets the secondary index to enumerate.
    pub fn index_name(mut self, input: impl Into<String>) -> Self {
        self.inner.index_name = Some(input.into());
        self
    }

    /// Sets the page size limit.
    pub fn limit(mut self, input: i32) -> Self {
        self.inner.limit = Some(input);
        self
    }

    /// Sets the resume key.
    pub fn exclusive_start_key(mut self, input: AttributeMap) -> Self {
        self.inner.exclusive_start_key = Some(input);
        self
    }

    /// Requests a strongly consistent read.
    pub fn consistent_read(mut self, input: bool) -> Self {
        self.inner.consistent_read = Some(input);
        self
    }

    /// Sets the filter expression text.
    pub fn filter_expression(mut self, input: impl Into<String>) -> Self {
        self.inner.filter_expression = Some(input.into());
        self
    }

    /// Sets the name-placeholder substitutions.
    pub fn expression_attribute_names(mut self, input: HashMap<String, String>) -> Self {
        self.inner.expression_attribute_names = Some(input);
        self
    }

    /// Sets the value-placeholder substitutions.
    pub fn expression_attribute_values(mut self, input: HashMap<String, AttributeValue>) -> Self {
        self.inner.expression_attribute_values = Some(input);
        self
    }

    /// Builds the `ScanInput`.
    pub fn build(self) -> ScanInput {
        self.inner
    }
}

/// One wire response page.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct ScanOutput {
    /// Raw items, in the order the store returned them.
    pub items: Vec<AttributeMap>,
    /// Continuation key for the next page. Its absence is the sole terminal
    /// signal.
    pub last_evaluated_key: Option<AttributeMap>,
}

impl ScanOutput {
    /// Creates a builder for `ScanOutput`.
    pub fn builder() -> ScanOutputBuilder {
        ScanOutputBuilder::default()
    }
}

/// Builder for [`ScanOutput`].
#[derive(Debug, Default)]
pub struct ScanOutputBuilder {
    inner: ScanOutput,
}

impl ScanOutputBuilder {
    /// Appends one raw item.
    pub fn item(mut self, input: AttributeMap) -> Self {
        self.inner.items.push(input);
        self
    }

    /// Sets all raw items at once.
    pub fn items(mut self, input: Vec<AttributeMap>) -> Self {
        self.inner.items = input;
        self
    }

    /// Sets the continuation key.
    pub fn last_evaluated_key(mut self, input: AttributeMap) -> Self {
        self.inner.last_evaluated_key = Some(input);
        self
    }

    /// Builds the `ScanOutput`.
    pub fn build(self) -> ScanOutput {
        self.inner
    }
}
