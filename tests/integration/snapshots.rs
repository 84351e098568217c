//! Snapshot and configuration loading

use std::fs;
use std::path::PathBuf;

use holocron_foundation::{EntityKind, ErrorKind};
use holocron_runtime::serialize::{from_bytes, save_snapshot, to_bytes};
use holocron_runtime::{RuntimeConfig, Session};
use holocron_storage::seed::BUNDLED_SEED;

const REPORT: &str = "{ people { name homeworld { name } starships { name } } films { title } }";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("holocron_it_{}_{name}", std::process::id()))
}

#[test]
fn snapshot_answers_like_the_seed() {
    let bundled = Session::bundled().unwrap();
    let path = temp_path("catalog.msgpack");
    save_snapshot(bundled.repository(), &path).unwrap();

    let restored = Session::from_config(&RuntimeConfig::default().with_snapshot_path(&path)).unwrap();
    assert_eq!(
        restored.query_json(REPORT, false).unwrap(),
        bundled.query_json(REPORT, false).unwrap()
    );
    assert_eq!(restored.stats().edges, bundled.stats().edges);

    let _ = fs::remove_file(&path);
}

#[test]
fn snapshot_bytes_are_stable() {
    let session = Session::bundled().unwrap();
    let bytes = to_bytes(session.repository()).unwrap();
    let again = to_bytes(&from_bytes(&bytes).unwrap()).unwrap();
    assert_eq!(bytes, again);
}

#[test]
fn config_file_selects_the_seed() {
    let seed = temp_path("seed.json");
    fs::write(&seed, BUNDLED_SEED).unwrap();
    let config_path = temp_path("holocron.toml");
    fs::write(
        &config_path,
        format!(
            "data_path = {:?}\npretty = true\n\n[engine]\nmax_depth = 2\n",
            seed.display().to_string()
        ),
    )
    .unwrap();

    let config = RuntimeConfig::load(&config_path).unwrap();
    assert!(config.pretty);
    let session = Session::from_config(&config).unwrap();
    assert_eq!(session.repository().len(EntityKind::Person), 10);

    let err = session
        .query("people { homeworld { residents { name } } }")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));

    let _ = fs::remove_file(&seed);
    let _ = fs::remove_file(&config_path);
}

#[test]
fn missing_snapshot_is_reported() {
    let config = RuntimeConfig::default().with_snapshot_path(temp_path("missing.msgpack"));
    assert!(matches!(
        Session::from_config(&config).unwrap_err().kind,
        ErrorKind::IoError(_)
    ));
}
