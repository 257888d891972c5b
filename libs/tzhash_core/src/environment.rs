// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{env, path::PathBuf};

//log
pub const ENV_TZHASH_LOG: &str = "TZHASH_LOG";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

//zoneinfo
pub const ENV_TZHASH_ZONEINFO: &str = "TZHASH_ZONEINFO";
pub const DEFAULT_ZONEINFO_DIR: &str = "/usr/share/zoneinfo";

/// The zoneinfo root: the CLI argument, else `TZHASH_ZONEINFO`, else the
/// system default.
pub fn zoneinfo_dir(arg: Option<&str>) -> PathBuf {
    if let Some(dir) = arg {
        return PathBuf::from(dir);
    }
    match env::var(ENV_TZHASH_ZONEINFO) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_ZONEINFO_DIR),
    }
}

/// The log filter: `TZHASH_LOG`, falling back to `RUST_LOG`.
pub fn log_filter() -> Option<String> {
    env::var(ENV_TZHASH_LOG)
        .or_else(|_| env::var(ENV_RUST_LOG))
        .ok()
}
