use anyhow::{Context, Result};
use irpulse_core::encoder::encode_frame;
use irpulse_core::export::ExportFile;
use std::fs;
use tracing::info;

use super::ok;
use crate::settings::Settings;
use crate::store::{CodeStore, StoredCode};

/// Generate a pulse train from an export file and store it under `name`.
///
/// The store is only touched once the file has been validated and encoded.
pub fn execute(settings: &Settings, file: &str, name: &str) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read input file: {}", file))?;

    let export: ExportFile = serde_json::from_str(&content)
        .with_context(|| format!("No format and data found in {}", file))?;

    let frame = export
        .to_frame()
        .with_context(|| format!("Invalid contents in {}", file))?;

    let train = encode_frame(&frame).context("Encoding failed")?;
    info!("Encoded {} as {} pulses", frame, train.len());

    let code = StoredCode::Pulses {
        protocol: frame.protocol,
        train,
    };
    println!("Encoded \"{}\"\n", file);
    println!("{}\n", code);

    let mut store = CodeStore::load(&settings.store_path)
        .context("Refusing to overwrite an unreadable code store")?;
    store.insert(name, code);
    store
        .save(&settings.store_path)
        .with_context(|| format!("Failed to save \"{}\"", name))?;

    ok(format!("Saved \"{}\"", name));
    Ok(())
}
