pub mod session_client;

pub use session_client::{FormSession, SessionClient};
