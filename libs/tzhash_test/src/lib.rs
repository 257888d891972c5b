// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::path::{Path, PathBuf};

/// A throwaway zoneinfo tree under the system temp dir, removed on drop.
pub struct ZoneinfoDir {
    root: PathBuf,
}

impl ZoneinfoDir {
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub async fn write(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.unwrap();
        }
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    pub async fn mkdir(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        tokio::fs::create_dir_all(&path).await.unwrap();
        path
    }

    #[cfg(unix)]
    pub async fn symlink(&self, target: &str, link: &str) -> PathBuf {
        let path = self.root.join(link);
        tokio::fs::symlink(self.root.join(target), &path)
            .await
            .unwrap();
        path
    }
}

impl Drop for ZoneinfoDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

pub async fn given_zoneinfo(files: &[(&str, Vec<u8>)]) -> ZoneinfoDir {
    let root = std::env::temp_dir().join(format!("tzhash-{}", nanoid::nanoid!()));
    tokio::fs::create_dir_all(&root).await.unwrap();
    let dir = ZoneinfoDir { root };
    for (name, content) in files {
        dir.write(name, content).await;
    }
    dir
}

/// A minimal v2 TZif file: header, a few body bytes containing a stray
/// newline, then the `\n<rule>\n` footer.
pub fn tzif_bytes(rule: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(64 + rule.len());
    data.extend_from_slice(b"TZif2");
    data.extend_from_slice(&[0; 15]);
    data.extend_from_slice(&[0, 0, 0, 1, b'\n', 0x7f, 0xff]);
    data.push(b'\n');
    data.extend_from_slice(rule.as_bytes());
    data.push(b'\n');
    data
}
