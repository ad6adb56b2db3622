//! Drives a single page's flow lifecycle: acquire a flow record, submit the
//! completed form, and tell the page how to react to the provider's verdict.
//!
//! The transport and the session sync are trait seams so the same controller
//! drives both pages in the browser and runs against mocks natively.

use crate::flow::error::FlowError;
use crate::flow::params::FlowParams;
use crate::flow::payload::SubmissionPayload;
use crate::flow::types::{CompletedFlow, FlowRecord};
use async_trait::async_trait;

/// Which self-service flow a page drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    Login,
    Registration,
}

impl FlowKind {
    /// Page path a recoverable error falls back to, forcing a fresh flow.
    pub fn entry_path(self) -> &'static str {
        match self {
            FlowKind::Login => "/login",
            FlowKind::Registration => "/register",
        }
    }

    /// Path segment used by the provider's self-service endpoints.
    pub fn api_segment(self) -> &'static str {
        match self {
            FlowKind::Login => "login",
            FlowKind::Registration => "registration",
        }
    }
}

/// Transport seam for the provider's flow endpoints. All calls carry the
/// browser's cookies.
#[async_trait(?Send)]
pub trait FlowTransport {
    /// Fetches an existing flow by id.
    async fn fetch_flow(&self, kind: FlowKind, id: &str) -> Result<FlowRecord, FlowError>;

    /// Initializes a new flow, forwarding refresh, assurance level, and
    /// return-to parameters.
    async fn create_flow(&self, kind: FlowKind, params: &FlowParams)
        -> Result<FlowRecord, FlowError>;

    /// Submits a completed form against the flow.
    async fn submit_flow(
        &self,
        kind: FlowKind,
        id: &str,
        payload: &SubmissionPayload,
    ) -> Result<CompletedFlow, FlowError>;
}

/// Reconciles client-held session state with the provider after a
/// successful submission.
#[async_trait(?Send)]
pub trait SessionSync {
    async fn sync_session(&self) -> Result<(), FlowError>;
}

/// What the page should do after an acquisition attempt.
#[derive(Clone, Debug)]
pub enum AcquireOutcome {
    /// A flow record is held; render the form.
    Ready,
    /// State was cleared; hard-navigate to the entry path for a fresh flow.
    Restart,
    /// A session already exists; go to the authenticated home.
    NavigateHome,
    /// Not recoverable here; surface on the page.
    Failed(FlowError),
}

/// What the page should do after a submission attempt.
#[derive(Clone, Debug)]
pub enum SubmitOutcome {
    /// Credentials accepted and the local session is synchronized.
    NavigateHome,
    /// The provider returned an updated flow with field messages;
    /// re-render, no navigation.
    FieldErrors,
    /// State was cleared; hard-navigate to the entry path for a fresh flow.
    Restart,
    /// Registration completed without a session. Logged and not surfaced;
    /// the user stays on the page.
    // TODO: show user feedback for this case once the desired UX is decided.
    NoSession,
    /// Not recoverable here; surface on the page.
    Failed(FlowError),
}

/// Per-page flow lifecycle. Holds at most one active record and replaces it
/// atomically on every provider response.
pub struct FlowController<T, S> {
    kind: FlowKind,
    transport: T,
    session: S,
    flow: Option<FlowRecord>,
}

impl<T: FlowTransport, S: SessionSync> FlowController<T, S> {
    pub fn new(kind: FlowKind, transport: T, session: S) -> Self {
        Self {
            kind,
            transport,
            session,
            flow: None,
        }
    }

    /// Seeds the controller with pre-fetched flow data, skipping the
    /// acquisition call.
    pub fn with_flow(mut self, flow: FlowRecord) -> Self {
        self.flow = Some(flow);
        self
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    /// The currently held flow record, if any.
    pub fn flow(&self) -> Option<&FlowRecord> {
        self.flow.as_ref()
    }

    /// Drops the held record so the next acquisition starts fresh.
    pub fn reset(&mut self) {
        self.flow = None;
    }

    /// Fetches the flow named in `params` or initializes a new one. A no-op
    /// when a record is already held, so a mount acquires at most once.
    pub async fn acquire(&mut self, params: &FlowParams) -> AcquireOutcome {
        if self.flow.is_some() {
            return AcquireOutcome::Ready;
        }

        let result = match &params.flow_id {
            Some(id) => self.transport.fetch_flow(self.kind, id).await,
            None => self.transport.create_flow(self.kind, params).await,
        };

        match result {
            Ok(flow) => {
                self.flow = Some(flow);
                AcquireOutcome::Ready
            }
            Err(FlowError::Restart | FlowError::Validation(_)) => {
                log::warn!("{} flow is unusable, restarting", self.kind.api_segment());
                self.flow = None;
                AcquireOutcome::Restart
            }
            Err(FlowError::AlreadyAuthenticated) => {
                self.flow = None;
                AcquireOutcome::NavigateHome
            }
            Err(err) => AcquireOutcome::Failed(err),
        }
    }

    /// Submits form values against the held flow and classifies the result.
    pub async fn submit(&mut self, payload: SubmissionPayload) -> SubmitOutcome {
        let Some(flow_id) = self.flow.as_ref().map(|flow| flow.id.clone()) else {
            return SubmitOutcome::Failed(FlowError::Config(
                "No active flow to submit.".to_string(),
            ));
        };

        match self.transport.submit_flow(self.kind, &flow_id, &payload).await {
            Ok(completed) => self.finish(completed).await,
            Err(FlowError::Validation(flow)) => {
                self.flow = Some(*flow);
                SubmitOutcome::FieldErrors
            }
            Err(FlowError::Restart) => {
                log::warn!("{} flow rejected, restarting", self.kind.api_segment());
                self.flow = None;
                SubmitOutcome::Restart
            }
            Err(FlowError::AlreadyAuthenticated) => {
                self.flow = None;
                SubmitOutcome::NavigateHome
            }
            Err(err) => SubmitOutcome::Failed(err),
        }
    }

    /// Success path. Registration must carry a session before the local
    /// session is synchronized; login relies on the session cookie alone.
    async fn finish(&mut self, completed: CompletedFlow) -> SubmitOutcome {
        if self.kind == FlowKind::Registration && completed.session.is_none() {
            log::error!("registration completed without a session");
            return SubmitOutcome::NoSession;
        }

        match self.session.sync_session().await {
            Ok(()) => SubmitOutcome::NavigateHome,
            Err(err) => SubmitOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::types::{FlowUi, MessageKind, Session, UiMessage, UiNode, UiNodeAttributes};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    fn sample_flow(id: &str) -> FlowRecord {
        FlowRecord {
            id: id.to_string(),
            ui: FlowUi {
                action: format!("https://kratos.example/self-service/login?flow={id}"),
                method: "POST".to_string(),
                nodes: vec![UiNode {
                    node_type: "input".to_string(),
                    group: "default".to_string(),
                    attributes: UiNodeAttributes {
                        name: "csrf_token".to_string(),
                        field_type: "hidden".to_string(),
                        value: Some("token-123".into()),
                        required: true,
                        disabled: false,
                    },
                    messages: Vec::new(),
                }],
                messages: Vec::new(),
            },
            return_to: None,
        }
    }

    fn flow_with_message(id: &str, text: &str) -> FlowRecord {
        let mut flow = sample_flow(id);
        flow.ui.messages = vec![UiMessage {
            id: 4000006,
            text: text.to_string(),
            kind: MessageKind::Error,
        }];
        flow
    }

    fn session() -> Session {
        Session {
            id: "s-1".to_string(),
            identity: None,
        }
    }

    fn login_payload(identifier: &str) -> SubmissionPayload {
        SubmissionPayload::login(
            "token-123".to_string(),
            identifier.to_string(),
            "hunter22hunter22".to_string(),
        )
    }

    #[derive(Default)]
    struct RecordingTransport {
        fetches: RefCell<Vec<(FlowKind, String)>>,
        creates: RefCell<Vec<FlowParams>>,
        submissions: RefCell<Vec<(String, String)>>,
        flow_results: RefCell<VecDeque<Result<FlowRecord, FlowError>>>,
        submit_results: RefCell<VecDeque<Result<CompletedFlow, FlowError>>>,
    }

    impl RecordingTransport {
        fn queue_flow(&self, result: Result<FlowRecord, FlowError>) {
            self.flow_results.borrow_mut().push_back(result);
        }

        fn queue_submit(&self, result: Result<CompletedFlow, FlowError>) {
            self.submit_results.borrow_mut().push_back(result);
        }
    }

    #[async_trait(?Send)]
    impl FlowTransport for &RecordingTransport {
        async fn fetch_flow(&self, kind: FlowKind, id: &str) -> Result<FlowRecord, FlowError> {
            self.fetches.borrow_mut().push((kind, id.to_string()));
            self.flow_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected fetch_flow call")
        }

        async fn create_flow(
            &self,
            _kind: FlowKind,
            params: &FlowParams,
        ) -> Result<FlowRecord, FlowError> {
            self.creates.borrow_mut().push(params.clone());
            self.flow_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected create_flow call")
        }

        async fn submit_flow(
            &self,
            _kind: FlowKind,
            id: &str,
            payload: &SubmissionPayload,
        ) -> Result<CompletedFlow, FlowError> {
            let encoded = serde_json::to_string(payload).expect("payload should encode");
            self.submissions.borrow_mut().push((id.to_string(), encoded));
            self.submit_results
                .borrow_mut()
                .pop_front()
                .expect("unexpected submit_flow call")
        }
    }

    #[derive(Default)]
    struct RecordingSync {
        calls: RefCell<usize>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl SessionSync for &RecordingSync {
        async fn sync_session(&self) -> Result<(), FlowError> {
            *self.calls.borrow_mut() += 1;
            if self.fail {
                Err(FlowError::SessionSync("whoami failed".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn acquire_fetches_the_exact_flow_named_in_the_url() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_flow(Ok(sample_flow("abc-123")));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync);

        let params = FlowParams {
            flow_id: Some("abc-123".to_string()),
            ..FlowParams::default()
        };
        let outcome = controller.acquire(&params).await;

        assert!(matches!(outcome, AcquireOutcome::Ready));
        assert_eq!(
            *transport.fetches.borrow(),
            vec![(FlowKind::Login, "abc-123".to_string())]
        );
        assert!(transport.creates.borrow().is_empty());
        assert_eq!(controller.flow().map(|flow| flow.id.as_str()), Some("abc-123"));
    }

    #[tokio::test]
    async fn acquire_initializes_once_and_forwards_parameters() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_flow(Ok(sample_flow("fresh-1")));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync);

        let params = FlowParams {
            flow_id: None,
            return_to: Some("https://app.example/home".to_string()),
            refresh: true,
            aal: Some("aal1".to_string()),
        };
        assert!(matches!(controller.acquire(&params).await, AcquireOutcome::Ready));
        // A second acquisition on the same instance must not hit the network.
        assert!(matches!(controller.acquire(&params).await, AcquireOutcome::Ready));

        assert_eq!(*transport.creates.borrow(), vec![params]);
        assert!(transport.fetches.borrow().is_empty());
    }

    #[tokio::test]
    async fn acquire_restarts_when_the_provider_rejects_the_flow() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_flow(Err(FlowError::Restart));
        let mut controller = FlowController::new(FlowKind::Registration, &transport, &sync);

        let outcome = controller.acquire(&FlowParams::default()).await;

        assert!(matches!(outcome, AcquireOutcome::Restart));
        assert!(controller.flow().is_none());
    }

    #[tokio::test]
    async fn acquire_surfaces_network_failures() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_flow(Err(FlowError::Network("connection refused".to_string())));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync);

        let outcome = controller.acquire(&FlowParams::default()).await;

        assert!(matches!(
            outcome,
            AcquireOutcome::Failed(FlowError::Network(_))
        ));
    }

    #[tokio::test]
    async fn login_success_syncs_the_session_and_navigates_home() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_submit(Ok(CompletedFlow {
            session: Some(session()),
        }));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync)
            .with_flow(sample_flow("flow-1"));

        let outcome = controller.submit(login_payload("user@example.com")).await;

        assert!(matches!(outcome, SubmitOutcome::NavigateHome));
        assert_eq!(*sync.calls.borrow(), 1);
        let submissions = transport.submissions.borrow();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].0, "flow-1");
        assert!(submissions[0].1.contains("\"method\":\"password\""));
    }

    #[tokio::test]
    async fn validation_failure_replaces_the_flow_and_stays_on_the_page() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_submit(Err(FlowError::Validation(Box::new(flow_with_message(
            "flow-1",
            "Invalid credentials.",
        )))));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync)
            .with_flow(sample_flow("flow-1"));

        let outcome = controller.submit(login_payload("user@example.com")).await;

        assert!(matches!(outcome, SubmitOutcome::FieldErrors));
        assert_eq!(*sync.calls.borrow(), 0);
        let held = controller.flow().expect("flow should still be held");
        assert_eq!(held.ui.messages[0].text, "Invalid credentials.");
    }

    #[tokio::test]
    async fn resubmission_after_validation_uses_the_new_values() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_submit(Err(FlowError::Validation(Box::new(flow_with_message(
            "flow-1",
            "Invalid credentials.",
        )))));
        transport.queue_submit(Ok(CompletedFlow {
            session: Some(session()),
        }));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync)
            .with_flow(sample_flow("flow-1"));

        assert!(matches!(
            controller.submit(login_payload("typo@example.com")).await,
            SubmitOutcome::FieldErrors
        ));
        assert!(matches!(
            controller.submit(login_payload("user@example.com")).await,
            SubmitOutcome::NavigateHome
        ));

        let submissions = transport.submissions.borrow();
        assert_eq!(submissions.len(), 2);
        assert!(submissions[0].1.contains("typo@example.com"));
        assert!(submissions[1].1.contains("user@example.com"));
        assert_eq!(*sync.calls.borrow(), 1);
    }

    #[tokio::test]
    async fn provider_errors_clear_state_and_restart() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_submit(Err(FlowError::Restart));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync)
            .with_flow(sample_flow("flow-1"));

        let outcome = controller.submit(login_payload("user@example.com")).await;

        assert!(matches!(outcome, SubmitOutcome::Restart));
        assert!(controller.flow().is_none());
        assert_eq!(*sync.calls.borrow(), 0);
    }

    #[tokio::test]
    async fn registration_without_a_session_is_logged_and_swallowed() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        transport.queue_submit(Ok(CompletedFlow { session: None }));
        let mut controller = FlowController::new(FlowKind::Registration, &transport, &sync)
            .with_flow(sample_flow("flow-1"));

        let payload = SubmissionPayload::registration(
            "token-123".to_string(),
            "user@example.com".to_string(),
            "hunter22hunter22".to_string(),
        );
        let outcome = controller.submit(payload).await;

        assert!(matches!(outcome, SubmitOutcome::NoSession));
        assert_eq!(*sync.calls.borrow(), 0);
        // The page neither navigates nor surfaces an error for this outcome.
        assert!(controller.flow().is_some());
    }

    #[tokio::test]
    async fn sync_failure_surfaces_without_navigating() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync {
            fail: true,
            ..RecordingSync::default()
        };
        transport.queue_submit(Ok(CompletedFlow {
            session: Some(session()),
        }));
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync)
            .with_flow(sample_flow("flow-1"));

        let outcome = controller.submit(login_payload("user@example.com")).await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(FlowError::SessionSync(_))
        ));
    }

    #[tokio::test]
    async fn submitting_without_a_flow_fails() {
        let transport = RecordingTransport::default();
        let sync = RecordingSync::default();
        let mut controller = FlowController::new(FlowKind::Login, &transport, &sync);

        let outcome = controller.submit(login_payload("user@example.com")).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(FlowError::Config(_))));
        assert!(transport.submissions.borrow().is_empty());
    }
}
