//! Query parameters recognized by the flow pages.

use url::form_urlencoded;

/// Parameters read from the page URL when acquiring a flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowParams {
    /// Existing flow to fetch instead of initializing a new one.
    pub flow_id: Option<String>,
    /// Where the provider should send the browser once the flow completes.
    pub return_to: Option<String>,
    /// Ask the provider to re-authenticate an already active session.
    pub refresh: bool,
    /// Requested authenticator assurance level.
    pub aal: Option<String>,
}

impl FlowParams {
    /// Parses a query string, with or without the leading `?`.
    ///
    /// `refresh` is presence based: any non-empty value counts, matching the
    /// pages this replaces. Both `aal` and the legacy `all` spelling are
    /// accepted for the assurance level.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut params = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "flow" => params.flow_id = non_empty(value),
                "return_to" => params.return_to = non_empty(value),
                "refresh" => params.refresh = !value.is_empty(),
                "aal" => params.aal = non_empty(value),
                "all" => {
                    if params.aal.is_none() {
                        params.aal = non_empty(value);
                    }
                }
                _ => {}
            }
        }

        params
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::FlowParams;

    #[test]
    fn parses_flow_id_and_return_to() {
        let params =
            FlowParams::from_query("?flow=abc-123&return_to=https%3A%2F%2Fapp.example%2Fhome");
        assert_eq!(params.flow_id.as_deref(), Some("abc-123"));
        assert_eq!(params.return_to.as_deref(), Some("https://app.example/home"));
        assert!(!params.refresh);
        assert_eq!(params.aal, None);
    }

    #[test]
    fn refresh_is_presence_based() {
        assert!(FlowParams::from_query("refresh=true").refresh);
        assert!(FlowParams::from_query("refresh=false").refresh);
        assert!(!FlowParams::from_query("refresh=").refresh);
        assert!(!FlowParams::from_query("flow=abc").refresh);
    }

    #[test]
    fn accepts_aal_and_legacy_spelling() {
        assert_eq!(
            FlowParams::from_query("aal=aal2").aal.as_deref(),
            Some("aal2")
        );
        assert_eq!(
            FlowParams::from_query("all=aal2").aal.as_deref(),
            Some("aal2")
        );
        // The canonical spelling wins when both are present.
        assert_eq!(
            FlowParams::from_query("aal=aal2&all=aal1").aal.as_deref(),
            Some("aal2")
        );
    }

    #[test]
    fn empty_values_are_dropped() {
        let params = FlowParams::from_query("flow=&return_to=&aal=");
        assert_eq!(params, FlowParams::default());
    }
}
