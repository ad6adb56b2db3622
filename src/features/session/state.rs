//! Auth session state and context for the frontend. The provider hydrates
//! the session once on mount using cookie-based calls and exposes derived
//! signals for the shell and routes. Only non-sensitive session metadata is
//! kept in memory; the session cookie stays `HttpOnly`.

use crate::features::session::client;
use crate::flow::controller::SessionSync;
use crate::flow::error::FlowError;
use crate::flow::types::Session;
use async_trait::async_trait;
use leptos::{prelude::*, task::spawn_local};

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub session: RwSignal<Option<Session>>,
    pub is_authenticated: Signal<bool>,
}

impl AuthContext {
    /// Builds a context around the provided session signal.
    fn new(session: RwSignal<Option<Session>>) -> Self {
        let is_authenticated = Signal::derive(move || session.get().is_some());
        Self {
            session,
            is_authenticated,
        }
    }

    /// Updates the in-memory session after a completed flow.
    pub fn set_session(&self, session: Session) {
        self.session.set(Some(session));
    }

    /// Clears the in-memory session.
    pub fn clear_session(&self) {
        self.session.set(None);
    }
}

/// Session sync backed by the auth context: refetches the provider session
/// and hydrates the context. A missing session after a completed flow is a
/// sync failure.
#[derive(Clone, Copy)]
pub struct ContextSessionSync {
    auth: AuthContext,
}

impl ContextSessionSync {
    pub fn new(auth: AuthContext) -> Self {
        Self { auth }
    }
}

#[async_trait(?Send)]
impl SessionSync for ContextSessionSync {
    async fn sync_session(&self) -> Result<(), FlowError> {
        match client::fetch_session().await? {
            Some(session) => {
                self.auth.set_session(session);
                Ok(())
            }
            None => Err(FlowError::SessionSync(
                "No session returned by the provider.".to_string(),
            )),
        }
    }
}

/// Provides auth context and hydrates the session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = RwSignal::new(None);
    let auth = AuthContext::new(session);
    provide_context(auth);

    spawn_local(async move {
        if let Ok(Some(session)) = client::fetch_session().await {
            auth.set_session(session);
        }
    });

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        let session = RwSignal::new(None);
        AuthContext::new(session)
    })
}
