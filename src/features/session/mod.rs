//! Session state shared through Leptos and its provider-backed sync.

pub mod client;
pub mod state;

pub use state::{use_auth, AuthContext, AuthProvider, ContextSessionSync};
