/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![allow(clippy::derive_partial_eq_without_eq)]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

//! High-level object mapping client for the Shale key-value store.
//!
//! Shale items are schema-less maps of tagged attribute values. This crate
//! maps them to and from strongly typed application values and drives
//! paginated read operations against the store, behind either a blocking
//! (pull) or an async, backpressured (push) interface:
//!
//! - the **converter engine** ([`converter`]) resolves a structural
//!   [`TypeDescriptor`] to a bidirectional converter through an ordered,
//!   overridable provider chain, with built-ins for textual, numeric,
//!   temporal, locator, and container shapes;
//! - **entity schemas** ([`schema`]) bind entity fields to named attributes
//!   with converters resolved up front, plus primary-key and index metadata;
//! - the **operation framework** ([`operation`]) turns a high-level request
//!   into wire traffic, chains pages by their continuation keys, and folds
//!   every response into a typed [`Page`].
//!
//! The low-level service client — transport, retries, throttling — is an
//! external collaborator behind the [`store`] traits.
//!
//! ```no_run
//! use shale_mapper::operation::scan::ScanRequest;
//! use shale_mapper::schema::EntitySchema;
//! use shale_mapper::store::{BoxError, ScanInput, ScanOutput, ScanStore};
//! use shale_mapper::{ConverterRegistry, MapperClient};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default)]
//! struct Order {
//!     id: String,
//!     version: i64,
//! }
//!
//! struct Client;
//! impl ScanStore for Client {
//!     fn scan(&self, _input: ScanInput) -> Result<ScanOutput, BoxError> {
//!         // one wire round trip per call
//!         unimplemented!()
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ConverterRegistry::default();
//!     let schema = Arc::new(
//!         EntitySchema::builder(&registry)
//!             .new_item(Order::default)
//!             .attribute("id", |o: &Order| o.id.clone(), |o, v| o.id = v)?
//!             .attribute("version", |o: &Order| o.version, |o, v| o.version = v)?
//!             .partition_key("id")
//!             .build()?,
//!     );
//!
//!     let orders = MapperClient::new(Arc::new(Client)).table("orders", schema);
//!     for page in orders.scan(ScanRequest::builder().limit(25).build())? {
//!         for order in page?.items() {
//!             println!("{order:?}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod converter;
pub mod error;
pub mod extension;
pub mod operation;
pub mod schema;
pub mod store;

pub use client::{AsyncMappedTable, AsyncMapperClient, MappedTable, MapperClient};
pub use converter::{
    AttributeConverter, ConverterProvider, ConverterRegistry, ConvertibleType, SharedConverter,
    TypeDescriptor,
};
pub use error::{ConversionError, Error};
pub use extension::ClientExtension;
pub use operation::{OperationContext, Page, PRIMARY_INDEX};
pub use schema::EntitySchema;

pub use shale_types::{AttributeMap, AttributeValue, Blob};
