//! Shared layout wrapper with the header and content container, so routes
//! can focus on content. Navigation is client-side only; access control
//! lives with the identity provider.

use crate::app_lib::GIT_COMMIT;
use crate::features::session::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;

/// Wraps routes with a header and main content container.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;
    let session = auth.session;

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200">
                <div class="max-w-screen-md flex items-center justify-between mx-auto p-4">
                    <A href="/" {..} class="font-semibold text-gray-900">
                        "Account"
                    </A>
                    <nav class="flex items-center gap-4 text-sm">
                        <Show
                            when=move || is_authenticated.get()
                            fallback=move || {
                                view! {
                                    <A href="/login" {..} class="text-gray-700 hover:text-blue-700">
                                        "Sign in"
                                    </A>
                                    <A
                                        href="/register"
                                        {..}
                                        class="text-gray-700 hover:text-blue-700"
                                    >
                                        "Create account"
                                    </A>
                                }
                            }
                        >
                            <span class="text-gray-500">
                                {move || {
                                    session
                                        .get()
                                        .and_then(|session| session.email().map(str::to_string))
                                        .unwrap_or_else(|| "Signed in".to_string())
                                }}
                            </span>
                        </Show>
                    </nav>
                </div>
            </header>
            <main class="flex-1">
                <div class="container max-w-screen-md mx-auto p-4 mt-6">{children()}</div>
            </main>
            <footer class="p-4 text-center text-xs text-gray-400">
                {format!("build {GIT_COMMIT}")}
            </footer>
        </div>
    }
}
