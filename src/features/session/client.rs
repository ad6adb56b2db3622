//! whoami lookups against the provider. Cookie based; a missing session is a
//! normal answer, not an error.

use crate::app_lib::api::get_optional_json_with_credentials;
use crate::app_lib::config::AppConfig;
use crate::flow::error::FlowError;
use crate::flow::types::Session;

/// Fetches the current provider session, if any.
pub async fn fetch_session() -> Result<Option<Session>, FlowError> {
    let config = AppConfig::load();
    let base = config.kratos_browser_url.trim_end_matches('/').to_string();
    let url = format!("{base}/sessions/whoami");
    get_optional_json_with_credentials(&url).await
}
