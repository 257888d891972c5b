// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{
    fmt, io,
    io::Write,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::trace;
use tzhash_table::{Finished, TableBuilder, TableError};

use crate::{
    tzif::{sniff, ZoneData},
    walker::DirectoryWalker,
};

#[derive(Debug)]
pub enum GenerateError {
    NotADirectory(PathBuf),
    Walk(io::Error),
    Read { path: PathBuf, source: io::Error },
    Table(TableError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NotADirectory(path) => {
                write!(f, "\"{}\" is not an existing directory", path.display())
            },
            GenerateError::Walk(err) => write!(f, "walk failed: {}", err),
            GenerateError::Read { path, source } => {
                write!(f, "unable to read {}: {}", path.display(), source)
            },
            GenerateError::Table(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::NotADirectory(_) => None,
            GenerateError::Walk(err) => Some(err),
            GenerateError::Read { source, .. } => Some(source),
            GenerateError::Table(err) => Some(err),
        }
    }
}

impl From<TableError> for GenerateError {
    fn from(err: TableError) -> Self {
        GenerateError::Table(err)
    }
}

/// A compiled zone file with a POSIX rule footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFile {
    /// Path relative to the root, `/`-separated
    pub name: String,
    pub rule: Vec<u8>,
}

/// Yields every TZif file with a footer under a root, in walk order.
pub struct ZoneScanner {
    root: PathBuf,
    walker: DirectoryWalker,
}

impl ZoneScanner {
    pub fn new(root: PathBuf) -> Self {
        let mut walker = DirectoryWalker::new(root.clone());
        walker.set_recursive(true);
        Self { root, walker }
    }

    pub async fn next_zone(&mut self) -> Result<Option<ZoneFile>, GenerateError> {
        while let Some((path, metadata)) = self.walker.walk().await.map_err(GenerateError::Walk)? {
            if !metadata.file_type().is_file() {
                continue;
            }
            let data = fs::read(&path)
                .await
                .map_err(|source| GenerateError::Read {
                    path: path.clone(),
                    source,
                })?;
            let name = relative_name(&self.root, &path);
            match sniff(&data) {
                ZoneData::NotTzif => trace!("Skipping {}: not TZif", name),
                ZoneData::NoFooter => trace!("Skipping {}: no POSIX footer", name),
                ZoneData::Rule(rule) => {
                    return Ok(Some(ZoneFile {
                        name,
                        rule: rule.to_vec(),
                    }))
                },
            }
        }
        Ok(None)
    }
}

/// `path` relative to `root`, joined with `/` on every platform.
pub fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut name = String::new();
    for component in relative.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

/// Scan `root` and write the complete table to `out`.
///
/// The first I/O or table error aborts the run; whatever was streamed to
/// `out` before that point stays written.
pub async fn generate<W: Write>(root: &Path, out: W) -> Result<Finished<W>, GenerateError> {
    match fs::metadata(root).await {
        Ok(metadata) if metadata.is_dir() => {},
        _ => return Err(GenerateError::NotADirectory(root.to_path_buf())),
    }

    let mut builder = TableBuilder::new(out)?;
    let mut scanner = ZoneScanner::new(root.to_path_buf());
    while let Some(zone) = scanner.next_zone().await? {
        builder.add(zone.name, &zone.rule)?;
    }
    Ok(builder.finish()?)
}
