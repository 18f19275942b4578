pub mod images;
mod orchestrator;
mod store;


pub use orchestrator::{BatchConfig, generate_all, generate_deck};
pub use store::{ProjectStore, StoreError, generate_for_project};
