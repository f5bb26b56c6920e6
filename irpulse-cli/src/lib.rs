//! Library entry for irpulse-cli used by integration tests and embedding.

pub mod backend;
pub mod commands;
pub mod settings;
pub mod store;

pub use backend::Backend;
pub use settings::Settings;
pub use store::{CodeStore, StoreError, StoredCode};
