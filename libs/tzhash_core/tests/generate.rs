// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::collections::HashSet;

use tzhash_core::{generate, GenerateError, ZoneFile, ZoneScanner};
use tzhash_table::{TableBuilder, TableError};
use tzhash_test::{given_zoneinfo, tzif_bytes, ZoneinfoDir};

const NEW_YORK: &str = "EST5EDT,M3.2.0,M11.1.0";
const LONDON: &str = "GMT0BST,M3.5.0/1,M10.5.0";
const TOKYO: &str = "JST-9";
const PARIS: &str = "CET-1CEST,M3.5.0,M10.5.0/3";
const UTC: &str = "UTC0";

async fn given_sample_tree() -> ZoneinfoDir {
    let dir = given_zoneinfo(&[
        ("US/Eastern", tzif_bytes(NEW_YORK)),
        ("Europe/Paris", tzif_bytes(PARIS)),
        ("Europe/London", tzif_bytes(LONDON)),
        ("Europe/Berlin", tzif_bytes(PARIS)),
        ("Etc/UTC", tzif_bytes(UTC)),
        ("Etc/Broken", b"TZifx".to_vec()),
        ("Asia/Tokyo", tzif_bytes(TOKYO)),
        ("America/New_York", tzif_bytes(NEW_YORK)),
        ("America/Detroit", tzif_bytes(NEW_YORK)),
        ("zone.tab", b"#country-code\tcoordinates\tTZ\nUS\t+404251-0740023\tAmerica/New_York\n".to_vec()),
    ])
    .await;
    dir.mkdir("Empty").await;
    dir
}

async fn scan_all(dir: &ZoneinfoDir) -> Vec<ZoneFile> {
    let mut scanner = ZoneScanner::new(dir.path().to_path_buf());
    let mut zones = Vec::new();
    while let Some(zone) = scanner.next_zone().await.unwrap() {
        zones.push(zone);
    }
    zones
}

#[tokio::test]
async fn test_scan_is_lexicographic_and_filtered() {
    let dir = given_sample_tree().await;
    let zones = scan_all(&dir).await;
    let names: Vec<&str> = zones.iter().map(|zone| zone.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "America/Detroit",
            "America/New_York",
            "Asia/Tokyo",
            "Etc/UTC",
            "Europe/Berlin",
            "Europe/London",
            "Europe/Paris",
            "US/Eastern",
        ]
    );
    assert_eq!(zones[3].rule, UTC.as_bytes());
}

#[tokio::test]
async fn test_generate_output() {
    let dir = given_sample_tree().await;
    let finished = generate(dir.path(), Vec::new()).await.unwrap();

    let summary = finished.summary();
    assert_eq!(summary.zones, 8);
    assert_eq!(summary.rules, 5);
    assert_eq!(summary.mask, 0x1f);

    let expected = r#"const char *posix[] = {
  /*   0 */ "EST5EDT,M3.2.0,M11.1.0",
  /*   1 */ "JST-9",
  /*   2 */ "UTC0",
  /*   3 */ "CET-1CEST,M3.5.0,M10.5.0/3",
  /*   4 */ "GMT0BST,M3.5.0/1,M10.5.0",
};

const uint32_t mask = 0x1f;

const struct {uint32_t hash:24; uint8_t posix:8;} zones[] = {
  {      2,   0}, // US/Eastern
  {     12,   2}, // Etc/UTC
  {     14,   4}, // Europe/London
  {     15,   3}, // Europe/Paris
  {     20,   3}, // Europe/Berlin
  {     23,   0}, // America/Detroit
  {     28,   0}, // America/New_York
  {     30,   1}, // Asia/Tokyo
};
"#;
    assert_eq!(String::from_utf8(finished.out).unwrap(), expected);
}

#[tokio::test]
async fn test_generate_is_reproducible() {
    let dir = given_sample_tree().await;
    let first = generate(dir.path(), Vec::new()).await.unwrap().out;
    let second = generate(dir.path(), Vec::new()).await.unwrap().out;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_reversed_order_still_correct() {
    let dir = given_sample_tree().await;
    let zones = scan_all(&dir).await;

    let mut builder = TableBuilder::new(Vec::new()).unwrap();
    for zone in zones.iter().rev() {
        builder.add(zone.name.as_str(), &zone.rule).unwrap();
    }
    let finished = builder.finish().unwrap();

    let hashes: HashSet<u32> = finished.table.entries.iter().map(|e| e.hash).collect();
    assert_eq!(hashes.len(), zones.len());
    for zone in &zones {
        let posix = finished.table.lookup(&zone.name).unwrap();
        assert_eq!(finished.pool.get(posix), Some(zone.rule.as_slice()));
    }
}

#[tokio::test]
async fn test_magic_plus_one_byte_is_skipped() {
    let dir = given_zoneinfo(&[("Etc/Short", b"TZif\n".to_vec())]).await;
    let finished = generate(dir.path(), Vec::new()).await.unwrap();
    assert_eq!(finished.table.len(), 0);
    assert_eq!(finished.pool.len(), 0);
}

#[tokio::test]
async fn test_identical_footers_share_one_rule() {
    let dir = given_zoneinfo(&[
        ("Asia/Tokyo", tzif_bytes(TOKYO)),
        ("Japan", tzif_bytes(TOKYO)),
    ])
    .await;
    let finished = generate(dir.path(), Vec::new()).await.unwrap();
    assert_eq!(finished.pool.len(), 1);
    assert_eq!(finished.table.len(), 2);
    assert!(finished.table.entries.iter().all(|entry| entry.posix == 0));
}

#[tokio::test]
async fn test_short_and_empty_files_are_skipped() {
    let dir = given_zoneinfo(&[
        ("empty", b"".to_vec()),
        ("tiny", b"TZ".to_vec()),
        ("UTC", tzif_bytes(UTC)),
    ])
    .await;
    let zones = scan_all(&dir).await;
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].name, "UTC");
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinks_are_skipped() {
    let dir = given_zoneinfo(&[("Etc/UTC", tzif_bytes(UTC))]).await;
    dir.symlink("Etc/UTC", "UTC").await;
    dir.symlink("Etc", "Link").await;

    let zones = scan_all(&dir).await;
    let names: Vec<&str> = zones.iter().map(|zone| zone.name.as_str()).collect();
    assert_eq!(names, vec!["Etc/UTC"]);
}

#[tokio::test]
async fn test_missing_root_fails() {
    let dir = given_zoneinfo(&[]).await;
    let missing = dir.path().join("nope");
    match generate(&missing, Vec::new()).await {
        Err(GenerateError::NotADirectory(path)) => assert_eq!(path, missing),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected failure"),
    }
}

#[tokio::test]
async fn test_file_root_fails() {
    let dir = given_zoneinfo(&[("UTC", tzif_bytes(UTC))]).await;
    let file = dir.path().join("UTC");
    assert!(matches!(
        generate(&file, Vec::new()).await,
        Err(GenerateError::NotADirectory(_))
    ));
}

#[tokio::test]
async fn test_mask_overflow_aborts_after_pool() {
    let dir = given_zoneinfo(&[
        ("Zone/2308", tzif_bytes(UTC)),
        ("Zone/57162", tzif_bytes(UTC)),
    ])
    .await;
    let mut out = Vec::new();
    match generate(dir.path(), &mut out).await {
        Err(GenerateError::Table(TableError::MaskOverflow { mask })) => {
            assert_eq!(mask, 0x0fff_ffff)
        },
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected mask overflow"),
    }
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "const char *posix[] = {\n  /*   0 */ \"UTC0\",\n};\n"
    );
}
