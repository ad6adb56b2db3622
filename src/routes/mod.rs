mod home;
mod login;
mod not_found;
mod register;

pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;

use crate::flow::params::FlowParams;
use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/register") view=RegisterPage />
            <Route path=path!("/*any") view=NotFoundPage />
        </Routes>
    }
}

/// Parameters from the current page URL.
pub(crate) fn current_params() -> FlowParams {
    let query = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    FlowParams::from_query(&query)
}

/// Full page navigation, discarding the component instance. Used for flow
/// restarts so the provider issues a fresh flow on the way back in.
pub(crate) fn hard_navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}
