//! Build-time configuration for the identity provider endpoint with an
//! optional runtime override. The runtime config is read from
//! `window.AUTH_UI_CONFIG` (if present) so static deployments can point at a
//! different provider without rebuilding. Values here are public; never
//! store secrets in them.

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the provider's browser-facing self-service API. May be
    /// empty for same-origin deployments behind a reverse proxy.
    pub kratos_browser_url: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies
    /// runtime overrides.
    pub fn load() -> Self {
        let kratos_browser_url = option_env!("AUTH_UI_KRATOS_URL").unwrap_or("");

        let mut config = Self {
            kratos_browser_url: kratos_browser_url.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    kratos_browser_url: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.kratos_browser_url {
        config.kratos_browser_url = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("AUTH_UI_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        kratos_browser_url: read_runtime_value(&object, "kratos_browser_url"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_runtime_overrides, normalize_runtime_value, AppConfig, RuntimeConfig};

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://kratos.example "),
            Some("https://kratos.example".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = AppConfig {
            kratos_browser_url: "https://kratos.default".to_string(),
        };
        let runtime = RuntimeConfig {
            kratos_browser_url: normalize_runtime_value("  "),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.kratos_browser_url, "https://kratos.default");
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig {
            kratos_browser_url: "https://kratos.default".to_string(),
        };
        let runtime = RuntimeConfig {
            kratos_browser_url: normalize_runtime_value("https://kratos.override"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.kratos_browser_url, "https://kratos.override");
    }
}
