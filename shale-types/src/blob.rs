/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Binary data stored in a `B` attribute or a binary set element.
///
/// `Blob` owns its bytes. It is `Ord` and `Hash` so binary payloads can live
/// in sets and be used as map keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Blob {
    inner: Vec<u8>,
}

impl Blob {
    /// Creates a new blob from the given bytes.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Blob {
            inner: input.into(),
        }
    }

    /// Consumes the blob and returns the underlying bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.inner
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for Blob {
    fn from(value: Vec<u8>) -> Self {
        Blob { inner: value }
    }
}

impl From<&str> for Blob {
    fn from(value: &str) -> Self {
        Blob {
            inner: value.as_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Blob;

    #[test]
    fn blob_round_trips_bytes() {
        let blob = Blob::new("shale");
        assert_eq!(b"shale", blob.as_ref());
        assert_eq!(b"shale".to_vec(), blob.into_inner());
    }
}
