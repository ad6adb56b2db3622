//! Login and registration pages driven by an Ory Kratos compatible
//! self-service API.
//!
//! The provider owns the hard parts: flow issuance, CSRF validation,
//! credential checking, and session issuance. This crate fetches a flow
//! descriptor, renders whatever fields and messages it carries, forwards the
//! completed form back to the provider, and reconciles local session state.
//!
//! The [`flow`] core is platform independent and natively testable; the
//! Leptos views and the browser HTTP client only compile for wasm.

pub mod app_lib;
pub mod flow;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
pub mod features;
#[cfg(target_arch = "wasm32")]
pub mod routes;
