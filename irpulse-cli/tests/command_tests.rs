use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

use irpulse_cli::commands::{dec, del, enc, list, rec, send};
use irpulse_cli::{CodeStore, Settings, StoredCode};
use irpulse_core::device::sim::{Disconnected, LoopbackTransmitter, ScriptedLine};
use irpulse_core::encoder::FrameBuilder;
use irpulse_core::export::ExportFile;
use irpulse_core::{EdgeSequence, Level, Protocol, RawEdge};

/// An AEHA transmission as a receiver sees it, closed by a long gap
fn aeha_capture(bytes: &[u8]) -> EdgeSequence {
    let train = FrameBuilder::new(Protocol::Aeha).bytes(bytes).build().unwrap();
    let mut edges = EdgeSequence::from_pulse_train(&train);
    edges.push(RawEdge::new(50_000, Level::Low));
    edges
}

fn settings(dir: &Path) -> Settings {
    let mut settings = Settings::new(dir.join("codes.json")).with_wait(Duration::ZERO);
    settings.capture_timeout_ms = 300;
    settings
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn write_export(path: &Path, json: &str) -> String {
    fs::write(path, json).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn rec_stores_each_name() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());
    let mut line = ScriptedLine::new(aeha_capture(&[0x23, 0xCB]));

    let saved = rec::execute(&settings, &mut line, &names(&["tv", "fan"])).unwrap();
    assert_eq!(saved, 2);
    assert_eq!(line.listen_count(), 2);

    let store = CodeStore::load(&settings.store_path).unwrap();
    assert!(matches!(store.get("tv"), Some(StoredCode::Raw { .. })));
    assert_eq!(store.get("tv"), store.get("fan"));
}

#[test]
fn rec_moves_on_after_empty_capture() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());
    let mut line = ScriptedLine::new(EdgeSequence::new());

    let saved = rec::execute(&settings, &mut line, &names(&["a", "b"])).unwrap();
    assert_eq!(saved, 0);
    assert_eq!(line.listen_count(), 2);
    assert!(!settings.store_path.exists());
}

#[test]
fn rec_aborts_without_hardware() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());

    let result = rec::execute(&settings, &mut Disconnected, &names(&["a", "b"]));
    assert!(result.is_err());
    assert!(!settings.store_path.exists());
}

#[test]
fn send_skips_unknown_names() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());

    let mut line = ScriptedLine::new(aeha_capture(&[0x01]));
    rec::execute(&settings, &mut line, &names(&["one"])).unwrap();

    let mut tx = LoopbackTransmitter::new().with_busy_polls(3);
    let sent = send::execute(&settings, &mut tx, &names(&["one", "missing", "one"])).unwrap();

    assert_eq!(sent, 2);
    assert_eq!(tx.sent().len(), 2);
    assert_eq!(tx.sent()[0].0, 13);
    assert_eq!(tx.sent()[0].1.len(), 8);
    assert_eq!(tx.live_waves(), 0);
}

#[test]
fn send_aborts_without_hardware() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());

    let mut store = CodeStore::new();
    store.insert(
        "one",
        StoredCode::Raw {
            edges: aeha_capture(&[0x01]),
        },
    );
    store.save(&settings.store_path).unwrap();

    assert!(send::execute(&settings, &mut Disconnected, &names(&["one", "one"])).is_err());
}

#[test]
fn enc_then_dec() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());
    let input = write_export(
        &td.path().join("in.json"),
        r#"{ "format": 1, "data": [1, 0, 1, 0, 0, 1, 0, 1] }"#,
    );
    let output = td.path().join("out.json");

    enc::execute(&settings, &input, "fan").unwrap();
    let store = CodeStore::load(&settings.store_path).unwrap();
    let Some(StoredCode::Pulses { protocol, train }) = store.get("fan") else {
        panic!("expected a pulse train");
    };
    assert_eq!(*protocol, Protocol::Aeha);
    assert_eq!(train.len(), 8);

    dec::execute(&settings, output.to_str().unwrap(), "fan").unwrap();
    let export: ExportFile = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(export.format, 1);
    assert_eq!(export.data, vec![1, 0, 1, 0, 0, 1, 0, 1]);
}

#[test]
fn enc_then_dec_keeps_nec_and_sony() {
    // Both protocols share timing windows with their neighbours
    let td = tempdir().unwrap();
    let settings = settings(td.path());

    for format in [2, 3] {
        let input = write_export(
            &td.path().join(format!("in{}.json", format)),
            &format!(r#"{{ "format": {}, "data": [1, 0, 1, 0, 0, 1, 0, 1] }}"#, format),
        );
        let output = td.path().join(format!("out{}.json", format));

        enc::execute(&settings, &input, "code").unwrap();
        dec::execute(&settings, output.to_str().unwrap(), "code").unwrap();

        let export: ExportFile =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(export.format, format);
        assert_eq!(export.data, vec![1, 0, 1, 0, 0, 1, 0, 1]);
    }
}

#[test]
fn dec_of_recorded_capture() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());
    let output = td.path().join("out.json");

    let mut line = ScriptedLine::new(aeha_capture(&[0xA5]));
    rec::execute(&settings, &mut line, &names(&["tv"])).unwrap();

    dec::execute(&settings, output.to_str().unwrap(), "tv").unwrap();
    let export: ExportFile = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(export.to_frame().unwrap().to_bytes(), vec![0xA5]);
}

#[test]
fn dec_of_unknown_code_writes_nothing() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());
    let output = td.path().join("out.json");

    let mut store = CodeStore::new();
    store.insert(
        "odd",
        StoredCode::Raw {
            edges: EdgeSequence::from_edges(vec![
                RawEdge::new(0, Level::Low),
                RawEdge::new(3_000, Level::High),
                RawEdge::new(1_500, Level::Low),
                RawEdge::new(3_000, Level::High),
                RawEdge::new(20_000, Level::Low),
            ]),
        },
    );
    store.save(&settings.store_path).unwrap();

    dec::execute(&settings, output.to_str().unwrap(), "odd").unwrap();
    assert!(!output.exists());

    assert!(dec::execute(&settings, output.to_str().unwrap(), "missing").is_err());
}

#[test]
fn enc_rejects_bad_input_without_touching_store() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());

    let good = write_export(&td.path().join("good.json"), r#"{ "format": 3, "data": [1, 1, 0] }"#);
    enc::execute(&settings, &good, "keep").unwrap();
    let before = fs::read_to_string(&settings.store_path).unwrap();

    for (file, json) in [
        ("format.json", r#"{ "format": 9, "data": [1, 0] }"#),
        ("bit.json", r#"{ "format": 1, "data": [1, 2] }"#),
        ("empty.json", r#"{ "format": 2, "data": [] }"#),
        ("shape.json", r#"{ "data": [1] }"#),
    ] {
        let path = write_export(&td.path().join(file), json);
        assert!(enc::execute(&settings, &path, "new").is_err(), "{} accepted", file);
    }

    assert_eq!(fs::read_to_string(&settings.store_path).unwrap(), before);
    assert!(enc::execute(&settings, "/nonexistent/in.json", "new").is_err());
}

#[test]
fn del_and_list() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());

    list::execute(&settings).unwrap();

    let input = write_export(&td.path().join("in.json"), r#"{ "format": 1, "data": [1] }"#);
    enc::execute(&settings, &input, "a").unwrap();
    enc::execute(&settings, &input, "b").unwrap();
    list::execute(&settings).unwrap();

    let removed = del::execute(&settings, &names(&["a", "missing"])).unwrap();
    assert_eq!(removed, 1);

    let store = CodeStore::load(&settings.store_path).unwrap();
    assert_eq!(store.names().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn malformed_store_is_never_overwritten() {
    let td = tempdir().unwrap();
    let settings = settings(td.path());
    fs::write(&settings.store_path, "{ broken").unwrap();

    let input = write_export(&td.path().join("in.json"), r#"{ "format": 1, "data": [1] }"#);
    assert!(enc::execute(&settings, &input, "a").is_err());
    assert!(del::execute(&settings, &names(&["a"])).is_err());

    let mut line = ScriptedLine::new(aeha_capture(&[0x01]));
    assert!(rec::execute(&settings, &mut line, &names(&["a"])).is_err());
    assert_eq!(line.listen_count(), 0);

    // Read-only commands carry on with nothing stored
    list::execute(&settings).unwrap();
    let mut tx = LoopbackTransmitter::new();
    assert_eq!(send::execute(&settings, &mut tx, &names(&["a"])).unwrap(), 0);

    assert_eq!(fs::read_to_string(&settings.store_path).unwrap(), "{ broken");
}
