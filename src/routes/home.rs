//! Authenticated landing page. Intentionally minimal; the interesting pages
//! are the flow-driven ones.

use crate::components::AppShell;
use crate::features::session::use_auth;
use leptos::prelude::*;

/// Renders the landing page shell with the signed-in identity, when known.
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;

    view! {
        <AppShell>
            <h1 class="text-2xl font-semibold text-gray-900">"Home"</h1>
            {move || {
                session
                    .get()
                    .map(|session| {
                        let email = session.email().unwrap_or("unknown").to_string();
                        view! {
                            <p class="mt-2 text-sm text-gray-600">
                                {format!("Signed in as {email}")}
                            </p>
                        }
                    })
            }}
        </AppShell>
    }
}
