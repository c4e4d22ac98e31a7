/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The generic paginated operation framework.
//!
//! An operation is a strategy with four capabilities: build the wire request,
//! obtain a lazy (pull) or push sequence of wire responses, and fold each
//! response into a typed [`Page`]. The executors here wire those capabilities
//! together; which table or secondary index the traffic targets is purely a
//! property of the [`OperationContext`], never of the operation type.
//!
//! Continuation is the critical invariant: request N carries response N−1's
//! continuation key verbatim, the first request carries none, and the
//! sequence ends exactly when a response carries none. The service-call
//! sequences returned by operations advance the key internally, never fetch
//! past a terminal response, and never fabricate a key.

pub mod scan;

use crate::error::Error;
use crate::extension::ClientExtension;
use crate::schema::EntitySchema;
use shale_async::PageStream;
use shale_types::AttributeMap;
use std::fmt;
use std::sync::Arc;

/// Index sentinel meaning "the table itself, no secondary-index qualifier".
pub const PRIMARY_INDEX: &str = "primary";

/// Identifies the table — and optionally the secondary index — an operation
/// targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    table_name: String,
    index_name: String,
}

impl OperationContext {
    /// Context targeting the table itself.
    pub fn primary(table_name: impl Into<String>) -> Self {
        OperationContext {
            table_name: table_name.into(),
            index_name: PRIMARY_INDEX.to_owned(),
        }
    }

    /// Context targeting a named secondary index.
    pub fn index(table_name: impl Into<String>, index_name: impl Into<String>) -> Self {
        OperationContext {
            table_name: table_name.into(),
            index_name: index_name.into(),
        }
    }

    /// The target table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The target index name; [`PRIMARY_INDEX`] when none applies.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// `true` when no secondary-index qualifier applies.
    pub fn is_primary(&self) -> bool {
        self.index_name == PRIMARY_INDEX
    }
}

/// One batch of materialized results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    last_evaluated_key: Option<AttributeMap>,
}

impl<T> Page<T> {
    /// Assembles a page.
    pub fn new(items: Vec<T>, last_evaluated_key: Option<AttributeMap>) -> Self {
        Page {
            items,
            last_evaluated_key,
        }
    }

    /// The materialized items, in store order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, returning its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The continuation key carried forward from the wire response. Absent
    /// means no further pages exist.
    pub fn last_evaluated_key(&self) -> Option<&AttributeMap> {
        self.last_evaluated_key.as_ref()
    }
}

/// Strategy turning a high-level request into wire traffic and typed pages.
pub trait PaginatedOperation<T>: Send + Sync {
    /// Wire-level request this operation produces.
    type Request: Send + 'static;
    /// Wire-level response this operation consumes.
    type Response: Send + 'static;

    /// Builds the wire request for one invocation.
    ///
    /// Fails fast on a malformed high-level request or schema problem;
    /// failures here are never retried.
    fn generate_request(
        &self,
        schema: &EntitySchema<T>,
        context: &OperationContext,
        extension: Option<&dyn ClientExtension>,
    ) -> Result<Self::Request, Error>;

    /// Folds one wire response into a typed page.
    ///
    /// Each raw item passes through the extension (when present) and then
    /// the schema's converters; any failure fails the whole page — partial
    /// pages are never produced. The response's continuation key is carried
    /// into the page unchanged.
    fn transform_response(
        &self,
        response: Self::Response,
        schema: &EntitySchema<T>,
        context: &OperationContext,
        extension: Option<&dyn ClientExtension>,
    ) -> Result<Page<T>, Error>;
}

/// Lazy sequence of wire responses produced by one pull service call.
pub type ResponseIter<'a, Resp> = Box<dyn Iterator<Item = Result<Resp, Error>> + Send + 'a>;

/// Pull-based service call bound to a store reference.
///
/// Every invocation starts a fresh, restartable sequence.
pub type ServiceCall<'a, Req, Resp> = Box<dyn Fn(Req) -> ResponseIter<'a, Resp> + Send + 'a>;

/// Push-based service call bound to a shared store handle.
pub type AsyncServiceCall<Req, Resp> = Box<dyn FnOnce(Req) -> PageStream<Result<Resp, Error>> + Send>;

/// Pull flavor of [`PaginatedOperation`], bound to a blocking client type.
pub trait SyncOperation<T, S: ?Sized>: PaginatedOperation<T> {
    /// Returns the call that turns one wire request into a lazy response
    /// sequence, advancing the continuation key internally between elements.
    fn service_call<'a>(&self, store: &'a S) -> ServiceCall<'a, Self::Request, Self::Response>;
}

/// Push flavor of [`PaginatedOperation`], bound to an async client type.
pub trait AsyncOperation<T, S: ?Sized>: PaginatedOperation<T> {
    /// Returns the call that turns one wire request into a push response
    /// sequence with the same continuation semantics as the pull flavor.
    fn async_service_call(&self, store: Arc<S>) -> AsyncServiceCall<Self::Request, Self::Response>;
}

/// Drives an operation against a blocking store, returning the lazy page
/// sequence.
///
/// Nothing is fetched until the returned iterator is advanced; each `next`
/// performs at most one store round trip.
pub fn execute<'a, T, S, O>(
    operation: O,
    store: &'a S,
    schema: &'a EntitySchema<T>,
    context: &'a OperationContext,
    extension: Option<&'a dyn ClientExtension>,
) -> Result<Pages<'a, T, O>, Error>
where
    S: ?Sized,
    O: SyncOperation<T, S>,
{
    let request = operation.generate_request(schema, context, extension)?;
    let responses = (operation.service_call(store))(request);
    Ok(Pages {
        operation,
        responses,
        schema,
        context,
        extension,
        errored: false,
    })
}

/// Blocking iterator of typed pages.
///
/// The iterator fuses after yielding an error: conversion failures are
/// permanent and transport failures already terminated the wire sequence.
pub struct Pages<'a, T, O: PaginatedOperation<T>> {
    operation: O,
    responses: ResponseIter<'a, O::Response>,
    schema: &'a EntitySchema<T>,
    context: &'a OperationContext,
    extension: Option<&'a dyn ClientExtension>,
    errored: bool,
}

impl<T, O: PaginatedOperation<T>> fmt::Debug for Pages<'_, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pages(table = {})", self.context.table_name())
    }
}

impl<'a, T, O: PaginatedOperation<T>> Iterator for Pages<'a, T, O> {
    type Item = Result<Page<T>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored {
            return None;
        }
        let response = self.responses.next()?;
        let page = response.and_then(|response| {
            self.operation
                .transform_response(response, self.schema, self.context, self.extension)
        });
        self.errored = page.is_err();
        Some(page)
    }
}

impl<'a, T: 'a, O: PaginatedOperation<T> + 'a> Pages<'a, T, O> {
    /// Flattens the page sequence into its items.
    pub fn items(self) -> impl Iterator<Item = Result<T, Error>> + 'a {
        self.flat_map(|page| match page {
            Ok(page) => page
                .into_items()
                .into_iter()
                .map(Ok)
                .collect::<Vec<_>>()
                .into_iter(),
            Err(err) => vec![Err(err)].into_iter(),
        })
    }
}

/// Drives an operation against a shared async store, returning the push page
/// sequence.
///
/// The producer fetches a page only after the consumer has granted demand;
/// dropping the stream cancels the producer before its next fetch.
pub fn execute_async<T, S, O>(
    operation: O,
    store: Arc<S>,
    schema: Arc<EntitySchema<T>>,
    context: OperationContext,
    extension: Option<Arc<dyn ClientExtension>>,
) -> Result<PageStream<Result<Page<T>, Error>>, Error>
where
    T: Send + 'static,
    S: ?Sized + Send + Sync + 'static,
    O: AsyncOperation<T, S> + 'static,
{
    let request = operation.generate_request(&schema, &context, extension.as_deref())?;
    let mut responses = (operation.async_service_call(store))(request);
    Ok(PageStream::new(move |tx| {
        Box::pin(async move {
            while let Some(response) = responses.next().await {
                let page = response.and_then(|response| {
                    operation.transform_response(
                        response,
                        &schema,
                        &context,
                        extension.as_deref(),
                    )
                });
                let failed = page.is_err();
                if tx.send(page).await.is_err() {
                    return;
                }
                if failed {
                    return;
                }
            }
        })
    }))
}
