// src/integrations/mod.rs
//
// External Integrations Module
//
// The portal REST backend is the only external system this crate talks to.

pub mod backend;

pub use backend::client::{BackendClient, LoginOutcome};
