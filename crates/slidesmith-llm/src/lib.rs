mod client;
mod layout;
mod outline;
mod prompt;
mod repair;
mod types;

#[cfg(test)]
mod tests;

pub use client::{CompletionBackend, CompletionClient, CompletionConfig, CompletionError};
pub use layout::{QuotaExhausted, generate_layout};
pub use outline::generate_outline;
pub use repair::repair_json;
pub use types::*;
