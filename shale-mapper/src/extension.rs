/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Hooks invoked around raw item materialization.

use crate::error::Error;
use crate::operation::OperationContext;
use shale_types::AttributeMap;

/// Extension point applied to every raw item before schema conversion.
///
/// Implementations can rewrite the attribute map — decrypt fields, strip
/// bookkeeping attributes, record metrics on their own — or reject an item
/// outright by returning an error, which fails the whole page. The default
/// implementation passes items through untouched.
pub trait ClientExtension: Send + Sync {
    /// Called with each raw item read from the store.
    fn after_read(
        &self,
        item: AttributeMap,
        context: &OperationContext,
    ) -> Result<AttributeMap, Error> {
        let _ = context;
        Ok(item)
    }
}

/// Extension that leaves every item untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExtension;

impl ClientExtension for NoopExtension {}
