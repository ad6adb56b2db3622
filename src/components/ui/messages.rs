//! Inline rendering of provider messages attached to a field or to the form
//! as a whole.

use crate::flow::types::{MessageKind, UiMessage};
use leptos::prelude::*;

/// Renders flow messages in order, styled by severity. Renders nothing for
/// an empty list.
#[component]
pub fn Messages(messages: Vec<UiMessage>) -> impl IntoView {
    view! {
        {messages
            .into_iter()
            .map(|message| {
                let class = match message.kind {
                    MessageKind::Error => "mt-1 text-sm text-red-600",
                    MessageKind::Success => "mt-1 text-sm text-emerald-600",
                    MessageKind::Info => "mt-1 text-sm text-gray-500",
                };
                view! { <p class=class>{message.text}</p> }
            })
            .collect_view()}
    }
}
