mod health;
mod models;
mod session;

pub use health::health_handler;
pub use models::models_handler;
pub use session::{ask_handler, get_session_handler, summarize_handler};
