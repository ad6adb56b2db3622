//! Serde models for the subset of the provider's self-service API consumed
//! by the pages. A record is replaced wholesale on every fetch or submit
//! response; nothing in here is partially mutated.

use serde::{Deserialize, Serialize};

/// A self-service flow as issued by the provider. Short-lived; the id is
/// echoed back on submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlowRecord {
    pub id: String,
    pub ui: FlowUi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

/// Form description carried by a flow: where to post and what to render.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlowUi {
    pub action: String,
    pub method: String,
    #[serde(default)]
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub messages: Vec<UiMessage>,
}

/// One field or element inside a flow's UI description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UiNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub attributes: UiNodeAttributes,
    #[serde(default)]
    pub messages: Vec<UiMessage>,
}

/// Input attributes of a node. Non-input nodes (images, scripts, anchors)
/// deserialize with an empty name and are skipped by the projection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UiNodeAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
}

/// A validation or informational message attached to a node or to the form
/// as a whole.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UiMessage {
    pub id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

/// Message severity as reported by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Error,
    Success,
}

/// Response of a successful flow submission. Login relies on the session
/// cookie; registration is expected to carry the session explicitly.
#[derive(Clone, Debug, Deserialize)]
pub struct CompletedFlow {
    #[serde(default)]
    pub session: Option<Session>,
}

/// Minimal view of a provider session, as returned by submission responses
/// and the whoami endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl Session {
    /// Email trait of the session's identity, when present.
    pub fn email(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .and_then(|identity| identity.traits.get("email"))
            .and_then(|value| value.as_str())
    }
}

/// Identity attached to a session. Traits are schema-defined by the
/// provider, so they stay untyped here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub traits: serde_json::Value,
}
