// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between a front end (the CLI) and the services
// - Translates form input into domain requests and entities into DTOs
// - Owns per-view state: submit guards and fetch generations

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;
pub mod view_state;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, TransitionFailure};
pub use state::{AppState, Backends};
pub use view_state::{SubmitGuard, ViewGeneration};
