use anyhow::{Context, Result};

use super::{fail, ok};
use crate::settings::Settings;
use crate::store::CodeStore;

/// Remove codes by name; unknown names are reported and skipped
pub fn execute(settings: &Settings, names: &[String]) -> Result<usize> {
    let mut store = CodeStore::load(&settings.store_path)
        .context("Refusing to overwrite an unreadable code store")?;
    let mut removed = 0;

    for name in names {
        if store.remove(name).is_some() {
            ok(format!("Deleted \"{}\"", name));
            removed += 1;
        } else {
            fail(format!("No code named \"{}\"", name));
        }
    }

    if removed > 0 {
        store
            .save(&settings.store_path)
            .context("Failed to save code store")?;
    }

    Ok(removed)
}
