//! gloo-net backed flow transport against a Kratos compatible self-service
//! API. The configured base URL is kept as-is so relative bases (same-origin
//! deployments behind a proxy) keep working.

use crate::app_lib::api::{get_json_with_credentials, post_json_with_credentials};
use crate::flow::controller::{FlowKind, FlowTransport};
use crate::flow::error::FlowError;
use crate::flow::params::FlowParams;
use crate::flow::payload::SubmissionPayload;
use crate::flow::types::{CompletedFlow, FlowRecord};
use async_trait::async_trait;
use url::form_urlencoded::Serializer;

/// HTTP client for one provider deployment.
#[derive(Clone)]
pub struct KratosClient {
    base_url: String,
}

impl KratosClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{path}", self.base_url)
        } else {
            format!("{}/{path}?{query}", self.base_url)
        }
    }
}

#[async_trait(?Send)]
impl FlowTransport for KratosClient {
    async fn fetch_flow(&self, kind: FlowKind, id: &str) -> Result<FlowRecord, FlowError> {
        let query = Serializer::new(String::new()).append_pair("id", id).finish();
        let url = self.url(&format!("self-service/{}/flows", kind.api_segment()), &query);
        get_json_with_credentials(&url).await
    }

    async fn create_flow(
        &self,
        kind: FlowKind,
        params: &FlowParams,
    ) -> Result<FlowRecord, FlowError> {
        let mut query = Serializer::new(String::new());
        if params.refresh {
            query.append_pair("refresh", "true");
        }
        if let Some(aal) = &params.aal {
            query.append_pair("aal", aal);
        }
        if let Some(return_to) = &params.return_to {
            query.append_pair("return_to", return_to);
        }

        let url = self.url(
            &format!("self-service/{}/browser", kind.api_segment()),
            &query.finish(),
        );
        get_json_with_credentials(&url).await
    }

    async fn submit_flow(
        &self,
        kind: FlowKind,
        id: &str,
        payload: &SubmissionPayload,
    ) -> Result<CompletedFlow, FlowError> {
        let query = Serializer::new(String::new())
            .append_pair("flow", id)
            .finish();
        let url = self.url(&format!("self-service/{}", kind.api_segment()), &query);
        post_json_with_credentials(&url, payload).await
    }
}
