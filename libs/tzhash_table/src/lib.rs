// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Build-time zone table generation.
//!
//! Takes `(zone name, POSIX rule)` pairs and produces two C tables:
//!
//! 1. **Rule pool** - every distinct POSIX rule string once, indexed in the
//!    order it was first seen.
//! 2. **Zone table** - one `{hash, posix}` row per zone, sorted by hash. The
//!    hash is the zone name's FNV-1a masked down to the fewest low bits that
//!    still keep every zone distinct, so the runtime can binary-search it
//!    without storing any zone names.
//!
//! # Example
//!
//! ```
//! use tzhash_table::TableBuilder;
//!
//! let mut builder = TableBuilder::new(Vec::new()).unwrap();
//! builder.add("America/New_York", b"EST5EDT,M3.2.0,M11.1.0").unwrap();
//! builder.add("Europe/London", b"GMT0BST,M3.5.0/1,M10.5.0").unwrap();
//! builder.add("America/Detroit", b"EST5EDT,M3.2.0,M11.1.0").unwrap();
//!
//! let finished = builder.finish().unwrap();
//! assert_eq!(finished.pool.len(), 2);
//! assert_eq!(finished.table.lookup("America/Detroit"), Some(0));
//! assert_eq!(finished.table.lookup("Europe/London"), Some(1));
//! ```

mod error;
mod hash;
mod names;
mod pool;
mod writer;

pub use error::TableError;
pub use hash::{fnv1a, FNV_OFFSET_BASIS, FNV_PRIME};
pub use names::{FinalTable, NameEntry, NameTable, INITIAL_MASK};
pub use pool::{Interned, RulePool};
pub use writer::{write_rule_row, write_zone_row, Finished, TableBuilder, TableSummary};

/// Largest mask the `hash:24` field can hold.
pub const MAX_MASK: u32 = 0x00ff_ffff;

/// Number of rules the `posix:8` field can address.
pub const MAX_RULES: usize = 256;
