/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Scripted in-memory store for end-to-end pagination tests.

#![allow(dead_code)]

use shale_mapper::store::{AsyncScanStore, BoxError, BoxFuture, ScanInput, ScanOutput, ScanStore};
use shale_types::{AttributeMap, AttributeValue};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Store stub that replays scripted responses and records every request.
///
/// Panics when a request arrives after the script is exhausted — a scan that
/// keeps fetching past its terminal page is exactly the bug the script is
/// there to catch.
pub struct TestStore {
    responses: Mutex<VecDeque<Result<ScanOutput, String>>>,
    requests: Mutex<Vec<ScanInput>>,
}

impl TestStore {
    pub fn new(responses: Vec<Result<ScanOutput, String>>) -> Self {
        TestStore {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request seen so far, in arrival order.
    pub fn requests(&self) -> Vec<ScanInput> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, input: ScanInput) -> Result<ScanOutput, BoxError> {
        self.requests.lock().unwrap().push(input);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(output)) => Ok(output),
            Some(Err(message)) => Err(message.into()),
            None => panic!("request arrived after the scripted responses were exhausted"),
        }
    }
}

impl ScanStore for TestStore {
    fn scan(&self, input: ScanInput) -> Result<ScanOutput, BoxError> {
        self.next_response(input)
    }
}

impl AsyncScanStore for TestStore {
    fn scan(&self, input: ScanInput) -> BoxFuture<'_, Result<ScanOutput, BoxError>> {
        Box::pin(async move { self.next_response(input) })
    }
}

/// A raw order item.
pub fn order_item(id: &str, version: i64) -> AttributeMap {
    let mut attrs = AttributeMap::new();
    attrs.insert("id".to_owned(), AttributeValue::S(id.to_owned()));
    attrs.insert("version".to_owned(), AttributeValue::N(version.to_string()));
    attrs
}

/// A continuation key pointing at `id`.
pub fn key_of(id: &str) -> AttributeMap {
    let mut key = AttributeMap::new();
    key.insert("id".to_owned(), AttributeValue::S(id.to_owned()));
    key
}
