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

//! Protocol-agnostic value types for the Shale object mapper.
//!
//! Everything in this crate models data at rest: the tagged attribute value
//! used by the store's item format, the binary and set payloads it carries,
//! and the textual value types (periods, URI references) whose wire form is a
//! plain string with a grammar of its own. Nothing here talks to the network.

pub mod attr;
pub mod base64;
pub mod period;
pub mod primitive;
pub mod set;
pub mod uri;

mod blob;

pub use attr::{AttributeMap, AttributeValue};
pub use blob::Blob;
pub use period::Period;
pub use set::Set;
pub use uri::UriRef;
