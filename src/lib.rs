pub mod app;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod streak;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::TaskStore;
