//! Archival pipeline integration tests
//!
//! Exercise the full scan → mirror → diff → snapshot path against real
//! temporary directory trees: mirror fidelity, bootstrap, idempotence,
//! and deletion manifests.

use seisarc_archive::{ArchiveError, Archiver, StationSource};
use seisarc_core::{layout, Category, Roots, StationCode};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RAW_STATION: &str = "452.020-P-08";
const CODE: &str = "P0008";

fn roots(base: &Path) -> Roots {
    Roots::from_base(base)
}

fn write_exports(station_dir: &Path, created: &str) {
    fs::write(
        station_dir.join(layout::GEO_EXPORT),
        format!(
            "#dataset: station timing and location\n\
             #created: {created}\n\
             MethodIdentifier,DataQuality,TimeCorrection\n"
        ),
    )
    .unwrap();
    fs::write(
        station_dir.join(layout::CONVERSION_EXPORT),
        "network,station,scale\n",
    )
    .unwrap();
    fs::write(
        station_dir.join(layout::PIPELINE_EXPORT),
        "#filename,TimeCorrection\n",
    )
    .unwrap();
}

/// A station source with waveform/secondary pairs nested one level deep.
fn seed_station(base: &Path, created: &str, stems: &[&str]) -> StationSource {
    let dir = base.join("processed").join(RAW_STATION);
    for (i, stem) in stems.iter().enumerate() {
        let sub = dir.join(format!("dive{i:02}"));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("{stem}_DET.mseed")), stem.as_bytes()).unwrap();
        fs::write(sub.join(format!("{stem}_DET.sac")), stem.as_bytes()).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    write_exports(&dir, created);
    StationSource {
        code: StationCode::from_canonical(CODE).unwrap(),
        dir,
    }
}

fn basenames(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_str().unwrap().to_string())
        .collect()
}

#[test]
fn mirror_equals_source_detection_set() {
    let tmp = TempDir::new().unwrap();
    let station = seed_station(tmp.path(), "2021-05-25T17:52:38Z", &["a1", "b1"]);
    // Noise the mirror must exclude.
    fs::write(station.dir.join("dive00/c1_DET.prelim.mseed"), b"c1").unwrap();
    fs::write(station.dir.join("dive00/d1_REQ.mseed"), b"d1").unwrap();

    let roots = roots(tmp.path());
    Archiver::new(roots.clone()).archive_station(&station).unwrap();

    let mirror_waveforms = basenames(&roots.mirror_dir(&station.code).join("waveform"));
    let expected: BTreeSet<String> = ["a1_DET.mseed", "b1_DET.mseed"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(mirror_waveforms, expected);

    let meta = basenames(&roots.mirror_dir(&station.code).join("meta"));
    assert_eq!(meta.len(), 3);
}

#[test]
fn mirror_is_rebuilt_wholesale() {
    let tmp = TempDir::new().unwrap();
    let station = seed_station(tmp.path(), "2021-05-25T17:52:38Z", &["a1", "b1"]);
    let roots = roots(tmp.path());
    let archiver = Archiver::new(roots.clone());
    archiver.archive_station(&station).unwrap();

    // Drop b1 from the source; the rebuilt mirror must not retain it.
    fs::remove_file(station.dir.join("dive01/b1_DET.mseed")).unwrap();
    fs::remove_file(station.dir.join("dive01/b1_DET.sac")).unwrap();
    archiver.archive_station(&station).unwrap();

    let mirror_waveforms = basenames(&roots.mirror_dir(&station.code).join("waveform"));
    assert_eq!(mirror_waveforms.len(), 1);
    assert!(mirror_waveforms.contains("a1_DET.mseed"));
}

#[test]
fn bootstrap_snapshot_holds_everything() {
    let tmp = TempDir::new().unwrap();
    let station = seed_station(tmp.path(), "2021-05-25T17:52:38Z", &["a1", "b1"]);
    let outcome = Archiver::new(roots(tmp.path()))
        .archive_station(&station)
        .unwrap();

    assert_eq!(
        outcome.changes.waveform.new,
        vec!["a1_DET.mseed", "b1_DET.mseed"]
    );
    assert!(outcome.changes.waveform.deleted.is_empty());
    assert!(outcome.snapshot_dir.ends_with("P0008:2021-05-25T17:52:38Z"));

    // Manifests exist and are empty on bootstrap.
    for category in Category::ALL {
        let manifest = outcome.snapshot_dir.join(category.manifest_name());
        assert_eq!(fs::read_to_string(manifest).unwrap(), "");
    }

    // Metadata copies are key-prefixed.
    let meta = basenames(&outcome.snapshot_dir.join("meta"));
    assert!(meta.contains(&format!("P0008:2021-05-25T17:52:38Z-{}", layout::GEO_EXPORT)));
}

#[test]
fn rerun_against_unchanged_source_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let station = seed_station(tmp.path(), "2021-05-25T17:52:38Z", &["a1", "b1"]);
    let archiver = Archiver::new(roots(tmp.path()));

    let first = archiver.archive_station(&station).unwrap();
    let before = basenames(&first.snapshot_dir.join("waveform"));

    let second = archiver.archive_station(&station).unwrap();
    assert_eq!(second.snapshot_dir, first.snapshot_dir);
    assert!(second.changes.is_empty());
    assert_eq!(basenames(&first.snapshot_dir.join("waveform")), before);
}

#[test]
fn second_snapshot_tracks_additions_and_deletions() {
    let tmp = TempDir::new().unwrap();
    let station = seed_station(tmp.path(), "2021-05-25T17:52:38Z", &["a1", "b1"]);
    let archiver = Archiver::new(roots(tmp.path()));
    archiver.archive_station(&station).unwrap();

    // Source now holds {a1, c1}: b1 removed, c1 newly final.
    fs::remove_file(station.dir.join("dive01/b1_DET.mseed")).unwrap();
    fs::remove_file(station.dir.join("dive01/b1_DET.sac")).unwrap();
    fs::write(station.dir.join("dive00/c1_DET.mseed"), b"c1").unwrap();
    fs::write(station.dir.join("dive00/c1_DET.sac"), b"c1").unwrap();
    write_exports(&station.dir, "2021-06-30T08:00:00Z");

    let outcome = archiver.archive_station(&station).unwrap();
    assert!(outcome.snapshot_dir.ends_with("P0008:2021-06-30T08:00:00Z"));
    assert_eq!(outcome.changes.waveform.new, vec!["c1_DET.mseed"]);
    assert_eq!(outcome.changes.waveform.deleted, vec!["b1_DET.mseed"]);

    // Only the new file lands in the second snapshot.
    let archived = basenames(&outcome.snapshot_dir.join("waveform"));
    assert_eq!(archived.len(), 1);
    assert!(archived.contains("c1_DET.mseed"));

    let manifest = outcome
        .snapshot_dir
        .join(Category::Waveform.manifest_name());
    assert_eq!(fs::read_to_string(manifest).unwrap(), "b1_DET.mseed\n");
}

#[test]
fn missing_export_aborts_before_any_snapshot() {
    let tmp = TempDir::new().unwrap();
    let station = seed_station(tmp.path(), "2021-05-25T17:52:38Z", &["a1"]);
    fs::remove_file(station.dir.join(layout::PIPELINE_EXPORT)).unwrap();

    let roots = roots(tmp.path());
    let err = Archiver::new(roots.clone())
        .archive_station(&station)
        .unwrap_err();
    assert!(matches!(err, ArchiveError::MissingExport(_)));
    assert!(!roots.archive_dir(&station.code).exists() || {
        // Archive dir may exist from create_dir_all ordering, but must hold
        // no snapshot.
        fs::read_dir(roots.archive_dir(&station.code))
            .map(|mut it| it.next().is_none())
            .unwrap_or(true)
    });
}

#[test]
fn run_discovers_and_archives_each_station() {
    let tmp = TempDir::new().unwrap();
    seed_station(tmp.path(), "2021-05-25T17:52:38Z", &["a1"]);

    let second = tmp.path().join("processed").join("452.112-N-1");
    fs::create_dir_all(&second).unwrap();
    fs::write(second.join("x1_DET.mseed"), b"x1").unwrap();
    fs::write(second.join("x1_DET.sac"), b"x1").unwrap();
    write_exports(&second, "2021-05-26T00:00:00Z");

    let outcomes = Archiver::new(roots(tmp.path())).run().unwrap();
    let codes: Vec<_> = outcomes.iter().map(|o| o.code.as_str()).collect();
    assert_eq!(codes, vec!["N0001", "P0008"]);
}
