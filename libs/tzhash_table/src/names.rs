// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Zone name hash table with a minimal low-bit uniqueness mask.
//!
//! Every recorded name is hashed with [`fnv1a`]. The table keeps a single
//! mask of the form `2^k - 1`, starting at `1`, and widens it one bit at a
//! time whenever a new name's masked hash equals the masked hash of a name
//! already recorded. Widening only adds bits, so names that were distinct
//! under a narrower mask stay distinct; each insertion therefore only has to
//! check the new name against the current set.
//!
//! The final mask depends on insertion order. Any order gives a correct
//! table, but only a fixed order gives a reproducible one.

use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    error::TableError,
    hash::{fnv1a, widen},
};

/// The mask every table starts from.
pub const INITIAL_MASK: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    /// Relative path of the zone file, e.g. "America/New_York"
    pub name: String,
    /// FNV-1a of `name`; masked only once the table is finalized
    pub hash: u32,
    /// Index of the zone's rule in the rule pool
    pub posix: usize,
}

#[derive(Debug)]
pub struct NameTable {
    entries: Vec<NameEntry>,
    mask: u32,
    /// Masked hash -> position in `entries`, valid for the current mask.
    by_masked: FxHashMap<u32, usize>,
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            mask: INITIAL_MASK,
            by_masked: FxHashMap::default(),
        }
    }

    /// Record a zone name, widening the mask until its masked hash is unique.
    ///
    /// The mask grows exactly as a linear scan over all prior entries would
    /// grow it; the index only makes the collision check cheap.
    pub fn record(&mut self, name: impl Into<String>, posix: usize) -> Result<(), TableError> {
        let name = name.into();
        let hash = fnv1a(name.as_bytes());

        while let Some(&pos) = self.by_masked.get(&(hash & self.mask)) {
            let existing = &self.entries[pos];
            if existing.name == name {
                return Err(TableError::DuplicateName { name });
            }
            if existing.hash == hash {
                return Err(TableError::HashCollision {
                    name,
                    existing: existing.name.clone(),
                    hash,
                });
            }
            self.widen_mask();
            debug!(
                "Widened mask to 0x{:x} for \"{}\" (collided with \"{}\")",
                self.mask, name, self.entries[pos].name
            );
        }

        self.by_masked.insert(hash & self.mask, self.entries.len());
        self.entries.push(NameEntry { name, hash, posix });
        Ok(())
    }

    fn widen_mask(&mut self) {
        self.mask = widen(self.mask);
        self.by_masked.clear();
        for (pos, entry) in self.entries.iter().enumerate() {
            let previous = self.by_masked.insert(entry.hash & self.mask, pos);
            debug_assert!(previous.is_none(), "mask lost uniqueness");
        }
    }

    /// Resolve `name` the way the generated table would: hash, mask, probe.
    ///
    /// Unknown names may resolve to another zone's rule, since names are not
    /// stored in the emitted table.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.by_masked
            .get(&(fnv1a(name.as_bytes()) & self.mask))
            .map(|&pos| self.entries[pos].posix)
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order, with unmasked hashes.
    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    /// Mask every hash with the final mask and sort ascending by masked hash.
    pub fn finalize(self) -> FinalTable {
        let mask = self.mask;
        let mut entries = self.entries;
        for entry in entries.iter_mut() {
            entry.hash &= mask;
        }
        entries.sort_by_key(|entry| entry.hash);
        FinalTable { mask, entries }
    }
}

/// A finalized table: masked hashes, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalTable {
    pub mask: u32,
    pub entries: Vec<NameEntry>,
}

impl FinalTable {
    /// Binary search for the masked hash of `name`.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        let hash = fnv1a(name.as_bytes()) & self.mask;
        self.entries
            .binary_search_by_key(&hash, |entry| entry.hash)
            .ok()
            .map(|idx| self.entries[idx].posix)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
