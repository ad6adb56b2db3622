//! Projection of a flow's UI nodes into a name-keyed view for rendering.
//! Derived on demand from the current record and thrown away after use.

use crate::flow::types::{FlowRecord, UiMessage};
use std::collections::HashMap;

/// Hidden anti-forgery field echoed back on submission.
pub const CSRF_TOKEN: &str = "csrf_token";
/// Login identifier field.
pub const IDENTIFIER: &str = "identifier";
/// Password field, shared by both pages.
pub const PASSWORD: &str = "password";
/// Registration email trait field.
pub const TRAITS_EMAIL: &str = "traits.email";

/// Rendering view of one named input: its current value and its messages.
#[derive(Clone, Debug, Default)]
pub struct NodeView {
    pub value: Option<String>,
    pub messages: Vec<UiMessage>,
}

/// Name-keyed projection of a flow's input nodes.
#[derive(Clone, Debug, Default)]
pub struct FlowNodes {
    nodes: HashMap<String, NodeView>,
}

impl FlowNodes {
    /// Projects the record's nodes, keyed by `attributes.name`. Nodes
    /// without a name are not inputs and are skipped.
    pub fn project(flow: &FlowRecord) -> Self {
        let mut nodes = HashMap::new();
        for node in &flow.ui.nodes {
            if node.attributes.name.is_empty() {
                continue;
            }
            nodes.insert(
                node.attributes.name.clone(),
                NodeView {
                    value: node.attributes.value.as_ref().and_then(value_as_string),
                    messages: node.messages.clone(),
                },
            );
        }
        Self { nodes }
    }

    /// Current value of the named input, used to prefill form fields.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.nodes.get(name).and_then(|node| node.value.as_deref())
    }

    /// Messages attached to the named input.
    pub fn messages_of(&self, name: &str) -> &[UiMessage] {
        self.nodes
            .get(name)
            .map(|node| node.messages.as_slice())
            .unwrap_or(&[])
    }
}

/// Node values arrive as JSON; strings stay as-is, other scalars are
/// printed, containers are not renderable.
fn value_as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::types::{FlowUi, MessageKind, UiMessage, UiNode, UiNodeAttributes};

    fn record_with_nodes(nodes: Vec<UiNode>) -> FlowRecord {
        FlowRecord {
            id: "flow-1".to_string(),
            ui: FlowUi {
                action: "https://kratos.example/self-service/login?flow=flow-1".to_string(),
                method: "POST".to_string(),
                nodes,
                messages: Vec::new(),
            },
            return_to: None,
        }
    }

    fn input(name: &str, value: Option<serde_json::Value>, messages: Vec<UiMessage>) -> UiNode {
        UiNode {
            node_type: "input".to_string(),
            group: "default".to_string(),
            attributes: UiNodeAttributes {
                name: name.to_string(),
                field_type: "text".to_string(),
                value,
                required: true,
                disabled: false,
            },
            messages,
        }
    }

    #[test]
    fn projects_values_and_messages_by_name() {
        let record = record_with_nodes(vec![
            input(CSRF_TOKEN, Some("token-123".into()), Vec::new()),
            input(
                IDENTIFIER,
                Some("user@example.com".into()),
                vec![UiMessage {
                    id: 4000006,
                    text: "Invalid credentials.".to_string(),
                    kind: MessageKind::Error,
                }],
            ),
        ]);

        let projected = FlowNodes::project(&record);
        assert_eq!(projected.value_of(CSRF_TOKEN), Some("token-123"));
        assert_eq!(projected.value_of(IDENTIFIER), Some("user@example.com"));
        assert_eq!(projected.messages_of(IDENTIFIER).len(), 1);
        assert!(projected.messages_of(PASSWORD).is_empty());
        assert_eq!(projected.value_of(PASSWORD), None);
    }

    #[test]
    fn skips_nodes_without_a_name() {
        let mut anchor = input("", None, Vec::new());
        anchor.node_type = "a".to_string();
        let record = record_with_nodes(vec![anchor]);

        let projected = FlowNodes::project(&record);
        assert!(projected.value_of("").is_none());
    }

    #[test]
    fn stringifies_scalar_values() {
        let record = record_with_nodes(vec![
            input("count", Some(serde_json::json!(3)), Vec::new()),
            input("flag", Some(serde_json::json!(true)), Vec::new()),
            input("object", Some(serde_json::json!({"nested": 1})), Vec::new()),
        ]);

        let projected = FlowNodes::project(&record);
        assert_eq!(projected.value_of("count"), Some("3"));
        assert_eq!(projected.value_of("flag"), Some("true"));
        assert_eq!(projected.value_of("object"), None);
    }
}
