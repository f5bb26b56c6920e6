use std::fs;
use tempfile::tempdir;

use irpulse_cli::{CodeStore, StoreError, StoredCode};
use irpulse_core::encoder::FrameBuilder;
use irpulse_core::{EdgeSequence, Protocol};

fn sample_code() -> StoredCode {
    let train = FrameBuilder::new(Protocol::Aeha).byte(0xA5).build().unwrap();
    StoredCode::Pulses {
        protocol: Protocol::Aeha,
        train,
    }
}

#[test]
fn missing_store_is_empty() {
    let td = tempdir().unwrap();
    let store = CodeStore::load(&td.path().join("codes.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn save_and_reload() {
    let td = tempdir().unwrap();
    let path = td.path().join("codes.json");

    let mut store = CodeStore::new();
    store.insert("fan", sample_code());
    store.insert(
        "tv",
        StoredCode::Raw {
            edges: EdgeSequence::from_pulse_train(&sample_code().to_pulse_train()),
        },
    );
    store.save(&path).unwrap();

    // Pretty printed
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"fan\""));

    let reloaded = CodeStore::load(&path).unwrap();
    assert_eq!(reloaded, store);
    assert_eq!(reloaded.names().collect::<Vec<_>>(), vec!["fan", "tv"]);
}

#[test]
fn malformed_store_is_reported_distinctly() {
    let td = tempdir().unwrap();
    let path = td.path().join("codes.json");
    fs::write(&path, "{ \"fan\": 12 ").unwrap();

    let err = CodeStore::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
    assert!(err.to_string().contains("malformed"));

    // Callers carry on with nothing loaded
    assert!(CodeStore::load_or_empty(&path).is_empty());
}

#[test]
fn unreadable_store_is_an_io_error() {
    let td = tempdir().unwrap();

    // A directory cannot be read as a file
    let err = CodeStore::load(td.path()).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn failed_save_is_reported() {
    let td = tempdir().unwrap();
    let path = td.path().join("no_such_dir").join("codes.json");

    let mut store = CodeStore::new();
    store.insert("fan", sample_code());
    let err = store.save(&path).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}
