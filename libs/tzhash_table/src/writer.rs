// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Emits the rule pool and the zone hash table as C source.
//!
//! Output layout:
//!
//! ```text
//! const char *posix[] = {
//!   /*   0 */ "EST5EDT,M3.2.0,M11.1.0",
//!   /*   1 */ "GMT0BST,M3.5.0/1,M10.5.0",
//! };
//!
//! const uint32_t mask = 0x3;
//!
//! const struct {uint32_t hash:24; uint8_t posix:8;} zones[] = {
//!   {      0,   0}, // America/New_York
//!   {      2,   1}, // Europe/London
//! };
//! ```
//!
//! Pool rows are written the moment a rule is first seen, so the writer must
//! be created before the first zone is added.

use std::io::Write;

use tracing::trace;

use crate::{
    error::TableError,
    names::{FinalTable, NameEntry, NameTable},
    pool::RulePool,
    MAX_MASK, MAX_RULES,
};

const POOL_OPEN: &[u8] = b"const char *posix[] = {\n";
const ZONES_OPEN: &[u8] = b"\nconst struct {uint32_t hash:24; uint8_t posix:8;} zones[] = {\n";
const CLOSE: &[u8] = b"};\n";

pub fn write_rule_row<W: Write>(out: &mut W, index: usize, rule: &[u8]) -> std::io::Result<()> {
    write!(out, "  /* {:3} */ \"", index)?;
    out.write_all(rule)?;
    out.write_all(b"\",\n")
}

pub fn write_zone_row<W: Write>(out: &mut W, entry: &NameEntry) -> std::io::Result<()> {
    writeln!(
        out,
        "  {{{:7}, {:3}}}, // {}",
        entry.hash, entry.posix, entry.name
    )
}

/// Counts reported once a table has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub zones: usize,
    pub rules: usize,
    pub mask: u32,
}

/// Owns the rule pool, the name table and the output for one generator run.
pub struct TableBuilder<W: Write> {
    out: W,
    pool: RulePool,
    names: NameTable,
}

impl<W: Write> TableBuilder<W> {
    /// Start a table, writing the opening of the pool array.
    pub fn new(mut out: W) -> Result<Self, TableError> {
        out.write_all(POOL_OPEN)?;
        Ok(Self {
            out,
            pool: RulePool::new(),
            names: NameTable::new(),
        })
    }

    /// Intern a rule, streaming its pool row on first sight.
    pub fn intern(&mut self, rule: &[u8]) -> Result<usize, TableError> {
        let interned = self.pool.intern(rule);
        if interned.fresh {
            trace!(
                "New rule {}: {}",
                interned.index,
                String::from_utf8_lossy(rule)
            );
            write_rule_row(&mut self.out, interned.index, rule)?;
        }
        Ok(interned.index)
    }

    pub fn record(&mut self, name: impl Into<String>, posix: usize) -> Result<(), TableError> {
        self.names.record(name, posix)
    }

    /// Intern `rule` and record `name` against it.
    pub fn add(&mut self, name: impl Into<String>, rule: &[u8]) -> Result<usize, TableError> {
        let index = self.intern(rule)?;
        self.record(name, index)?;
        Ok(index)
    }

    pub fn pool(&self) -> &RulePool {
        &self.pool
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Close the pool, then write the mask and the sorted zone rows.
    ///
    /// Fails without writing the zone table if the mask or the pool outgrow
    /// the `hash:24` / `posix:8` bit-fields.
    pub fn finish(mut self) -> Result<Finished<W>, TableError> {
        self.out.write_all(CLOSE)?;

        if self.pool.len() > MAX_RULES {
            return Err(TableError::PoolOverflow {
                len: self.pool.len(),
            });
        }
        let table = self.names.finalize();
        if table.mask > MAX_MASK {
            return Err(TableError::MaskOverflow { mask: table.mask });
        }

        writeln!(self.out, "\nconst uint32_t mask = 0x{:x};", table.mask)?;
        self.out.write_all(ZONES_OPEN)?;
        for entry in &table.entries {
            write_zone_row(&mut self.out, entry)?;
        }
        self.out.write_all(CLOSE)?;
        self.out.flush()?;

        Ok(Finished {
            out: self.out,
            pool: self.pool,
            table,
        })
    }
}

/// Everything a finished run produced.
pub struct Finished<W> {
    pub out: W,
    pub pool: RulePool,
    pub table: FinalTable,
}

impl<W> Finished<W> {
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            zones: self.table.len(),
            rules: self.pool.len(),
            mask: self.table.mask,
        }
    }
}
