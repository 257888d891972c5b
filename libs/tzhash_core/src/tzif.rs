// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Just enough TZif handling to pull out the POSIX rule footer.
//!
//! Version 2+ TZif files end with `\n<posix rule>\n`. No other part of the
//! file is inspected.

/// Magic bytes every compiled zone file starts with.
pub const TZIF_MAGIC: &[u8; 4] = b"TZif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneData<'a> {
    /// Too short, or missing the `TZif` magic
    NotTzif,
    /// No newline before the final byte, so no footer line
    NoFooter,
    /// The footer line, without its newline
    Rule(&'a [u8]),
}

pub fn is_tzif(data: &[u8]) -> bool {
    data.starts_with(TZIF_MAGIC)
}

/// The bytes between the last newline before the final byte and the final
/// byte itself.
///
/// The final byte is dropped whatever it is; in a well formed file it is the
/// footer's terminating newline.
pub fn posix_footer(data: &[u8]) -> Option<&[u8]> {
    let (_, body) = data.split_last()?;
    let newline = body.iter().rposition(|&byte| byte == b'\n')?;
    Some(&body[newline + 1..])
}

pub fn sniff(data: &[u8]) -> ZoneData<'_> {
    if !is_tzif(data) {
        return ZoneData::NotTzif;
    }
    match posix_footer(data) {
        Some(rule) => ZoneData::Rule(rule),
        None => ZoneData::NoFooter,
    }
}
