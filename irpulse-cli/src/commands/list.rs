use anyhow::Result;

use crate::settings::Settings;
use crate::store::CodeStore;

/// Print stored code names
pub fn execute(settings: &Settings) -> Result<()> {
    let store = CodeStore::load_or_empty(&settings.store_path);

    if store.is_empty() {
        println!("No codes stored.");
        return Ok(());
    }

    println!("Stored codes ({})", store.len());
    for name in store.names() {
        println!("{}", name);
    }

    Ok(())
}
