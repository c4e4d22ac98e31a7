/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! High-level client handles binding a store, entity schemas, and extensions.

use crate::error::Error;
use crate::extension::ClientExtension;
use crate::operation::scan::{ScanOperation, ScanRequest};
use crate::operation::{self, OperationContext, Page, Pages};
use crate::schema::EntitySchema;
use crate::store::{AsyncScanStore, ScanStore};
use shale_async::PageStream;
use std::fmt;
use std::sync::Arc;

/// Entry point for blocking access to mapped tables.
pub struct MapperClient<S: ?Sized> {
    store: Arc<S>,
    extension: Option<Arc<dyn ClientExtension>>,
}

impl<S: ?Sized> Clone for MapperClient<S> {
    fn clone(&self) -> Self {
        MapperClient {
            store: self.store.clone(),
            extension: self.extension.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for MapperClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapperClient")
    }
}

impl<S: ?Sized> MapperClient<S> {
    /// Wraps a blocking store client.
    pub fn new(store: Arc<S>) -> Self {
        MapperClient {
            store,
            extension: None,
        }
    }

    /// Installs an extension invoked around every item materialization.
    pub fn with_extension(mut self, extension: Arc<dyn ClientExtension>) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Binds an entity schema to a table name.
    pub fn table<T>(
        &self,
        table_name: impl Into<String>,
        schema: Arc<EntitySchema<T>>,
    ) -> MappedTable<T, S> {
        MappedTable {
            store: self.store.clone(),
            extension: self.extension.clone(),
            schema,
            context: OperationContext::primary(table_name),
        }
    }
}

/// A table — or one of its secondary indexes — bound to an entity schema.
///
/// Handles are cheap to clone and safe to share; every call builds its own
/// per-invocation state.
pub struct MappedTable<T, S: ?Sized> {
    store: Arc<S>,
    extension: Option<Arc<dyn ClientExtension>>,
    schema: Arc<EntitySchema<T>>,
    context: OperationContext,
}

impl<T, S: ?Sized> Clone for MappedTable<T, S> {
    fn clone(&self) -> Self {
        MappedTable {
            store: self.store.clone(),
            extension: self.extension.clone(),
            schema: self.schema.clone(),
            context: self.context.clone(),
        }
    }
}

impl<T, S: ?Sized> fmt::Debug for MappedTable<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MappedTable(table = {}, index = {})",
            self.context.table_name(),
            self.context.index_name()
        )
    }
}

impl<T, S: ?Sized> MappedTable<T, S> {
    /// Returns a handle scoped to a secondary index.
    ///
    /// Operations through the returned handle differ from table operations
    /// only by their [`OperationContext`].
    pub fn index(&self, index_name: impl Into<String>) -> Self {
        MappedTable {
            store: self.store.clone(),
            extension: self.extension.clone(),
            schema: self.schema.clone(),
            context: OperationContext::index(self.context.table_name(), index_name),
        }
    }

    /// The table this handle targets.
    pub fn table_name(&self) -> &str {
        self.context.table_name()
    }
}

impl<T, S: ScanStore + ?Sized> MappedTable<T, S> {
    /// Enumerates the table or index, returning the blocking page sequence.
    ///
    /// Nothing is fetched until the iterator is advanced; each page is one
    /// store round trip, chained by the continuation key.
    pub fn scan(&self, request: ScanRequest) -> Result<Pages<'_, T, ScanOperation>, Error> {
        operation::execute(
            ScanOperation::new(request),
            self.store.as_ref(),
            self.schema.as_ref(),
            &self.context,
            self.extension.as_deref(),
        )
    }
}

/// Entry point for async access to mapped tables.
pub struct AsyncMapperClient<S: ?Sized> {
    store: Arc<S>,
    extension: Option<Arc<dyn ClientExtension>>,
}

impl<S: ?Sized> Clone for AsyncMapperClient<S> {
    fn clone(&self) -> Self {
        AsyncMapperClient {
            store: self.store.clone(),
            extension: self.extension.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for AsyncMapperClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncMapperClient")
    }
}

impl<S: ?Sized> AsyncMapperClient<S> {
    /// Wraps an async store client.
    pub fn new(store: Arc<S>) -> Self {
        AsyncMapperClient {
            store,
            extension: None,
        }
    }

    /// Installs an extension invoked around every item materialization.
    pub fn with_extension(mut self, extension: Arc<dyn ClientExtension>) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Binds an entity schema to a table name.
    pub fn table<T>(
        &self,
        table_name: impl Into<String>,
        schema: Arc<EntitySchema<T>>,
    ) -> AsyncMappedTable<T, S> {
        AsyncMappedTable {
            store: self.store.clone(),
            extension: self.extension.clone(),
            schema,
            context: OperationContext::primary(table_name),
        }
    }
}

/// Async counterpart of [`MappedTable`].
pub struct AsyncMappedTable<T, S: ?Sized> {
    store: Arc<S>,
    extension: Option<Arc<dyn ClientExtension>>,
    schema: Arc<EntitySchema<T>>,
    context: OperationContext,
}

impl<T, S: ?Sized> Clone for AsyncMappedTable<T, S> {
    fn clone(&self) -> Self {
        AsyncMappedTable {
            store: self.store.clone(),
            extension: self.extension.clone(),
            schema: self.schema.clone(),
            context: self.context.clone(),
        }
    }
}

impl<T, S: ?Sized> fmt::Debug for AsyncMappedTable<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AsyncMappedTable(table = {}, index = {})",
            self.context.table_name(),
            self.context.index_name()
        )
    }
}

impl<T, S: ?Sized> AsyncMappedTable<T, S> {
    /// Returns a handle scoped to a secondary index.
    pub fn index(&self, index_name: impl Into<String>) -> Self {
        AsyncMappedTable {
            store: self.store.clone(),
            extension: self.extension.clone(),
            schema: self.schema.clone(),
            context: OperationContext::index(self.context.table_name(), index_name),
        }
    }

    /// The table this handle targets.
    pub fn table_name(&self) -> &str {
        self.context.table_name()
    }
}

impl<T, S> AsyncMappedTable<T, S>
where
    T: Send + 'static,
    S: AsyncScanStore + ?Sized + 'static,
{
    /// Enumerates the table or index, returning the push page sequence.
    ///
    /// The producer fetches a page only after the consumer polls for it, and
    /// dropping the stream stops the producer before its next fetch.
    pub fn scan(&self, request: ScanRequest) -> Result<PageStream<Result<Page<T>, Error>>, Error> {
        operation::execute_async(
            ScanOperation::new(request),
            self.store.clone(),
            self.schema.clone(),
            self.context.clone(),
            self.extension.clone(),
        )
    }
}
