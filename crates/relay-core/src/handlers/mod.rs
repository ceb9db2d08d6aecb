// Handlers module - API endpoint handlers

pub mod chat;
pub mod health;
pub mod images;

pub use chat::handle_chat;
pub use health::{health_check, version_info};
pub use images::handle_generate_image;
