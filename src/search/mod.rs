pub mod handlers;
pub mod models;
mod service;

pub use models::LocationSuggestion;
pub use service::SearchService;
