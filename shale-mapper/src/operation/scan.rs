/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The scan operation: full enumeration of a table or secondary index.

use super::{
    AsyncOperation, AsyncServiceCall, OperationContext, Page, PaginatedOperation, ResponseIter,
    ServiceCall, SyncOperation,
};
use crate::error::Error;
use crate::extension::ClientExtension;
use crate::schema::EntitySchema;
use crate::store::{AsyncScanStore, ScanInput, ScanOutput, ScanStore};
use shale_async::PageStream;
use shale_types::{AttributeMap, AttributeValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A filter expression with its placeholder substitutions.
///
/// The expression text references values as `:placeholder` and attribute
/// names as `#placeholder`; the maps supply the substitutions. Whether every
/// referenced placeholder is bound is checked when the wire request is
/// generated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Expression {
    /// Creates a builder for `Expression`.
    pub fn builder() -> ExpressionBuilder {
        ExpressionBuilder::default()
    }

    /// The expression text.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The `#name` substitutions.
    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    /// The `:value` substitutions.
    pub fn values(&self) -> &HashMap<String, AttributeValue> {
        &self.values
    }

    /// Checks that every placeholder referenced by the text is bound.
    fn check_placeholders(&self) -> Result<(), Error> {
        for placeholder in placeholders(&self.expression, ':') {
            if !self.values.contains_key(&placeholder) {
                return Err(Error::InvalidRequest(format!(
                    "filter references unbound value placeholder `{placeholder}`"
                )));
            }
        }
        for placeholder in placeholders(&self.expression, '#') {
            if !self.names.contains_key(&placeholder) {
                return Err(Error::InvalidRequest(format!(
                    "filter references unbound name placeholder `{placeholder}`"
                )));
            }
        }
        Ok(())
    }
}

/// Extracts `<sigil>identifier` tokens from expression text.
fn placeholders(text: &str, sigil: char) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find(sigil) {
        let tail = &rest[start + sigil.len_utf8()..];
        let end = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        if end > 0 {
            found.push(format!("{sigil}{}", &tail[..end]));
        }
        rest = &tail[end..];
    }
    found
}

/// Builder for [`Expression`].
#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    inner: Expression,
}

impl ExpressionBuilder {
    /// Sets the expression text.
    pub fn expression(mut self, input: impl Into<String>) -> Self {
        self.inner.expression = input.into();
        self
    }

    /// Binds a `#placeholder` to an attribute name.
    pub fn name(mut self, placeholder: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.inner.names.insert(placeholder.into(), attribute.into());
        self
    }

    /// Binds a `:placeholder` to a value.
    pub fn value(mut self, placeholder: impl Into<String>, value: AttributeValue) -> Self {
        self.inner.values.insert(placeholder.into(), value);
        self
    }

    /// Builds the `Expression`.
    pub fn build(self) -> Expression {
        self.inner
    }
}

/// High-level scan request.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub struct ScanRequest {
    /// Upper bound on items evaluated per page; must be positive.
    pub limit: Option<i32>,
    /// Resume enumeration from a previously returned continuation key.
    pub exclusive_start_key: Option<AttributeMap>,
    /// Request strongly consistent reads.
    pub consistent_read: Option<bool>,
    /// Server-side filter.
    pub filter: Option<Expression>,
}

impl ScanRequest {
    /// Creates a builder for `ScanRequest`.
    pub fn builder() -> ScanRequestBuilder {
        ScanRequestBuilder::default()
    }
}

/// Builder for [`ScanRequest`].
#[derive(Debug, Default)]
pub struct ScanRequestBuilder {
    inner: ScanRequest,
}

impl ScanRequestBuilder {
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

    /// Requests strongly consistent reads.
    pub fn consistent_read(mut self, input: bool) -> Self {
        self.inner.consistent_read = Some(input);
        self
    }

    /// Sets the server-side filter.
    pub fn filter(mut self, input: Expression) -> Self {
        self.inner.filter = Some(input);
        self
    }

    /// Builds the `ScanRequest`.
    pub fn build(self) -> ScanRequest {
        self.inner
    }
}

/// Scan strategy for the paginated operation framework.
///
/// The same operation value serves the table and any of its secondary
/// indexes; the target is read off the [`OperationContext`] at request
/// generation time. Operation values are immutable and freely reusable
/// across threads and invocations.
#[derive(Debug, Clone, Default)]
pub struct ScanOperation {
    request: ScanRequest,
}

impl ScanOperation {
    /// Creates the operation for one high-level request.
    pub fn new(request: ScanRequest) -> Self {
        ScanOperation { request }
    }
}

impl<T> PaginatedOperation<T> for ScanOperation {
    type Request = ScanInput;
    type Response = ScanOutput;

    fn generate_request(
        &self,
        _schema: &EntitySchema<T>,
        context: &OperationContext,
        _extension: Option<&dyn ClientExtension>,
    ) -> Result<ScanInput, Error> {
        if let Some(limit) = self.request.limit {
            if limit <= 0 {
                return Err(Error::InvalidRequest(format!(
                    "limit must be positive, got {limit}"
                )));
            }
        }

        let mut builder = ScanInput::builder().table_name(context.table_name());
        if !context.is_primary() {
            builder = builder.index_name(context.index_name());
        }
        if let Some(limit) = self.request.limit {
            builder = builder.limit(limit);
        }
        if let Some(key) = &self.request.exclusive_start_key {
            builder = builder.exclusive_start_key(key.clone());
        }
        if let Some(consistent) = self.request.consistent_read {
            builder = builder.consistent_read(consistent);
        }
        if let Some(filter) = &self.request.filter {
            filter.check_placeholders()?;
            builder = builder.filter_expression(filter.expression());
            if !filter.names().is_empty() {
                builder = builder.expression_attribute_names(filter.names().clone());
            }
            if !filter.values().is_empty() {
                builder = builder.expression_attribute_values(filter.values().clone());
            }
        }
        Ok(builder.build())
    }

    fn transform_response(
        &self,
        response: ScanOutput,
        schema: &EntitySchema<T>,
        context: &OperationContext,
        extension: Option<&dyn ClientExtension>,
    ) -> Result<Page<T>, Error> {
        let mut items = Vec::with_capacity(response.items.len());
        for raw in response.items {
            let gated = match extension {
                Some(extension) => extension.after_read(raw, context)?,
                None => raw,
            };
            items.push(schema.item_from_attributes(&gated)?);
        }
        tracing::trace!(
            table = context.table_name(),
            items = items.len(),
            has_more = response.last_evaluated_key.is_some(),
            "transformed scan page"
        );
        Ok(Page::new(items, response.last_evaluated_key))
    }
}

impl<T, S> SyncOperation<T, S> for ScanOperation
where
    S: ScanStore + ?Sized,
{
    fn service_call<'a>(&self, store: &'a S) -> ServiceCall<'a, ScanInput, ScanOutput> {
        Box::new(move |input| Box::new(ScanPages::new(store, input)) as ResponseIter<'a, ScanOutput>)
    }
}

impl<T, S> AsyncOperation<T, S> for ScanOperation
where
    S: AsyncScanStore + ?Sized + 'static,
{
    fn async_service_call(&self, store: Arc<S>) -> AsyncServiceCall<ScanInput, ScanOutput> {
        Box::new(move |input| scan_page_stream(store, input))
    }
}

/// Blocking scan paginator.
///
/// Each `next` performs exactly one store round trip. The continuation key of
/// every response becomes the next request's start key; once a response
/// arrives without one — or the store fails — no further request is issued.
pub struct ScanPages<'a, S: ?Sized> {
    store: &'a S,
    next_input: Option<ScanInput>,
}

impl<S: ?Sized> fmt::Debug for ScanPages<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScanPages(pending = {})", self.next_input.is_some())
    }
}

impl<'a, S: ScanStore + ?Sized> ScanPages<'a, S> {
    /// Starts a fresh enumeration from `input`.
    pub fn new(store: &'a S, input: ScanInput) -> Self {
        ScanPages {
            store,
            next_input: Some(input),
        }
    }
}

impl<'a, S: ScanStore + ?Sized> Iterator for ScanPages<'a, S> {
    type Item = Result<ScanOutput, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.next_input.take()?;
        match self.store.scan(input.clone()) {
            Ok(output) => {
                if let Some(key) = &output.last_evaluated_key {
                    let mut next = input;
                    next.exclusive_start_key = Some(key.clone());
                    self.next_input = Some(next);
                }
                tracing::trace!(
                    items = output.items.len(),
                    has_more = output.last_evaluated_key.is_some(),
                    "fetched scan page"
                );
                Some(Ok(output))
            }
            Err(err) => {
                tracing::debug!(error = %err, "scan page fetch failed");
                Some(Err(Error::store(err)))
            }
        }
    }
}

/// Push scan paginator with the same continuation semantics as [`ScanPages`].
///
/// The rendezvous channel keeps the producer one demand unit behind the
/// consumer: the fetch for page N+1 does not start until the consumer polls
/// past page N, and dropping the stream stops the producer at its next send.
fn scan_page_stream<S>(store: Arc<S>, input: ScanInput) -> PageStream<Result<ScanOutput, Error>>
where
    S: AsyncScanStore + ?Sized + 'static,
{
    PageStream::new(move |tx| {
        Box::pin(async move {
            let mut input = input;
            loop {
                match store.scan(input.clone()).await {
                    Ok(output) => {
                        let next_key = output.last_evaluated_key.clone();
                        if tx.send(Ok(output)).await.is_err() {
                            return;
                        }
                        match next_key {
                            Some(key) => input.exclusive_start_key = Some(key),
                            None => return,
                        }
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "scan page fetch failed");
                        let _ = tx.send(Err(Error::store(err))).await;
                        return;
                    }
                }
            }
        })
    })
}
