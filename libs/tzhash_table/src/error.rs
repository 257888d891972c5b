// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{fmt, io};

use crate::{MAX_MASK, MAX_RULES};

#[derive(Debug)]
pub enum TableError {
    /// The same relative path was recorded twice.
    DuplicateName { name: String },
    /// Two names share all 32 hash bits, so no mask can tell them apart.
    HashCollision {
        name: String,
        existing: String,
        hash: u32,
    },
    /// The final mask does not fit the 24-bit hash field.
    MaskOverflow { mask: u32 },
    /// More distinct rules than the 8-bit index field can address.
    PoolOverflow { len: usize },
    Io(io::Error),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::DuplicateName { name } => write!(f, "zone \"{}\" recorded twice", name),
            TableError::HashCollision {
                name,
                existing,
                hash,
            } => write!(
                f,
                "\"{}\" and \"{}\" share the full hash 0x{:08x}",
                name, existing, hash
            ),
            TableError::MaskOverflow { mask } => write!(
                f,
                "mask 0x{:x} exceeds the 24-bit hash field (max 0x{:x})",
                mask, MAX_MASK
            ),
            TableError::PoolOverflow { len } => write!(
                f,
                "{} distinct rules exceed the 8-bit index field (max {})",
                len, MAX_RULES
            ),
            TableError::Io(err) => write!(f, "write failed: {}", err),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TableError {
    fn from(err: io::Error) -> Self {
        TableError::Io(err)
    }
}
