// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Deduplicated POSIX rule strings in first-seen order.

use fxhash::FxHashMap;

/// Outcome of [`RulePool::intern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interned {
    /// Index of the rule in the pool
    pub index: usize,
    /// True when this call added the rule
    pub fresh: bool,
}

/// Maps each distinct rule string to a dense index, starting at 0.
#[derive(Debug, Default)]
pub struct RulePool {
    indices: FxHashMap<Vec<u8>, usize>,
    rules: Vec<Vec<u8>>,
}

impl RulePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `rule`, appending it if it has not been seen.
    ///
    /// Rules are compared byte for byte; any sequence, including the empty
    /// one, is a valid rule.
    pub fn intern(&mut self, rule: &[u8]) -> Interned {
        if let Some(&index) = self.indices.get(rule) {
            return Interned {
                index,
                fresh: false,
            };
        }
        let index = self.rules.len();
        self.rules.push(rule.to_vec());
        self.indices.insert(rule.to_vec(), index);
        Interned { index, fresh: true }
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.rules.get(index).map(Vec::as_slice)
    }

    pub fn index_of(&self, rule: &[u8]) -> Option<usize> {
        self.indices.get(rule).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in index order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.rules.iter().map(Vec::as_slice)
    }
}
