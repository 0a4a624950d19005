//! Board delta stream handed to the presentation layer
//!
//! Deltas are produced eagerly while a pass resolves, then handed over as a
//! one-shot iterator: once a delta is consumed it cannot be read again.

use serde::{Serialize, Serializer};

use crate::types::BoardDelta;

#[derive(Debug, Clone, Default)]
pub struct DeltaStream {
    inner: std::vec::IntoIter<BoardDelta>,
}

impl DeltaStream {
    pub fn new(deltas: Vec<BoardDelta>) -> Self {
        Self {
            inner: deltas.into_iter(),
        }
    }

    /// Deltas not yet consumed.
    pub fn remaining(&self) -> &[BoardDelta] {
        self.inner.as_slice()
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.as_slice().is_empty()
    }
}

impl Iterator for DeltaStream {
    type Item = BoardDelta;

    fn next(&mut self) -> Option<BoardDelta> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for DeltaStream {}

impl Serialize for DeltaStream {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.remaining())
    }
}
