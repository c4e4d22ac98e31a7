/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rust_2018_idioms,
    unreachable_pub
)]

//! Demand-driven async primitives for Shale page delivery.
//!
//! Pagination against the store is inherently sequential: each request needs
//! the previous response's continuation key. The [`PageStream`] here delivers
//! pages by push while keeping the producer strictly behind consumer demand —
//! the generator cannot fetch page N+1 until the consumer has asked for it —
//! which is exactly the backpressure contract paginated operations need.

pub mod page_stream;
pub mod rendezvous;

pub use page_stream::PageStream;
