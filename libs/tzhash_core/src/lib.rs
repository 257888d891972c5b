// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Walks a zoneinfo tree and feeds each zone's POSIX rule into a
//! [`tzhash_table::TableBuilder`].
//!
//! Only regular files starting with `TZif` and ending in a footer line take
//! part; directories, symlinks and everything else are skipped. The walk is
//! lexicographic so a given tree always produces the same table.

pub mod environment;
mod generate;
pub mod tzif;
mod walker;

pub use generate::{generate, relative_name, GenerateError, ZoneFile, ZoneScanner};
pub use tzhash_table::{Finished, TableSummary};
pub use walker::DirectoryWalker;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
