//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request id)
//!     → handlers.rs (pick channel, emit, build payload)
//!     → response.rs (ApiError → status + JSON detail)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod payload;
pub mod request;
pub mod response;
pub mod server;

pub use payload::{LogMessage, UserData};
pub use request::{RequestUuid, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
