// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Implementation details that support the domain but are not part of it.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod session_store;

pub use session_store::SessionStore;
