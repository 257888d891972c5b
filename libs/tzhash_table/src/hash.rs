// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! 32-bit FNV-1a, the hash the consuming runtime uses to key its zone table.

pub const FNV_OFFSET_BASIS: u32 = 2166136261;
pub const FNV_PRIME: u32 = 16777619;

/// Hash `bytes` with 32-bit FNV-1a (xor, then multiply, wrapping).
#[inline]
pub fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= *byte as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Widen a low-bit mask by one bit. Saturates at `u32::MAX`.
#[inline]
pub fn widen(mask: u32) -> u32 {
    (mask << 1) | 1
}
