//! Shared frontend utilities: HTTP helpers, configuration, and build
//! metadata. The helpers do not store secrets; the provider's flow and
//! session cookies are attached by the browser.

#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod config;

/// Git commit the app was built from, embedded by `build.rs`.
pub const GIT_COMMIT: &str = match option_env!("AUTH_UI_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};
