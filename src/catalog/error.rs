use thiserror::Error;

/// Errors raised while navigating the catalog or driving a screen.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("No catalog entry '{path}' (run `casestudies list`)")]
    UnknownEntry { path: String },

    #[error("Unknown command '{command}'; expected one of: {usage}")]
    UnknownCommand { command: String, usage: String },
}
