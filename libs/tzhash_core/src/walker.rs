// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{
    fs::Metadata,
    io,
    path::{Path, PathBuf},
};

use tokio::fs::{self};

/// Depth-first directory walk in byte-wise lexicographic order.
///
/// Each directory is yielded before its children. Entries are described by
/// `symlink_metadata`, so links are reported as links and never followed.
pub struct DirectoryWalker {
    stack: Vec<(PathBuf, Option<Metadata>)>,
    recursive: bool,
    eat_root: bool,
}

impl DirectoryWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            stack: vec![(root, None)],
            recursive: false,
            eat_root: true,
        }
    }

    pub fn set_recursive(&mut self, recursive: bool) {
        self.recursive = recursive;
    }

    pub async fn walk(&mut self) -> io::Result<Option<(PathBuf, Metadata)>> {
        if self.eat_root {
            self.eat_root = false;
            if let Some((root, _)) = self.stack.pop() {
                self.append_stack(&root).await?;
            }
        }
        while let Some((entry, metadata)) = self.stack.pop() {
            let Some(metadata) = metadata else {
                continue;
            };
            if self.recursive && metadata.is_dir() {
                self.append_stack(&entry).await?;
            }

            return Ok(Some((entry, metadata)));
        }
        Ok(None)
    }

    async fn append_stack(&mut self, dir: &Path) -> io::Result<()> {
        let mut stream = fs::read_dir(dir).await.map_err(|err| with_path(dir, err))?;

        let mut entries = Vec::new();
        while let Some(entry) = stream
            .next_entry()
            .await
            .map_err(|err| with_path(dir, err))?
        {
            let entry_path = entry.path();
            let metadata = fs::symlink_metadata(&entry_path)
                .await
                .map_err(|err| with_path(&entry_path, err))?;
            entries.push((entry.file_name(), entry_path, metadata));
        }

        // Popped from the back, so push in descending order
        entries.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        self.stack.extend(
            entries
                .into_iter()
                .map(|(_, path, metadata)| (path, Some(metadata))),
        );
        Ok(())
    }
}

fn with_path(path: &Path, err: io::Error) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {}", path.display(), err))
}
