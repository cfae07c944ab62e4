pub mod server;
pub mod state;

pub use server::{create_router, start_server};
pub use state::AppState;
