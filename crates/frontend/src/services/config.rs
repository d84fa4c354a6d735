//! Provider configuration baked in at build time

use authscreen_core::{OAuthClients, ProviderConfig};

/// Path the OAuth popup is redirected to
pub const OAUTH_CALLBACK_PATH: &str = "/oauth/callback";

fn build_var(value: Option<&'static str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Settings from the `AUTHSCREEN_*` variables present when the bundle was built
pub fn provider_config() -> ProviderConfig {
    ProviderConfig {
        api_key: option_env!("AUTHSCREEN_API_KEY")
            .unwrap_or_default()
            .to_string(),
        auth_domain: build_var(option_env!("AUTHSCREEN_AUTH_DOMAIN")),
        project_id: build_var(option_env!("AUTHSCREEN_PROJECT_ID")),
        storage_bucket: build_var(option_env!("AUTHSCREEN_STORAGE_BUCKET")),
        messaging_sender_id: build_var(option_env!("AUTHSCREEN_MESSAGING_SENDER_ID")),
        app_id: build_var(option_env!("AUTHSCREEN_APP_ID")),
        measurement_id: build_var(option_env!("AUTHSCREEN_MEASUREMENT_ID")),
        endpoint: build_var(option_env!("AUTHSCREEN_ENDPOINT"))
            .unwrap_or_else(|| ProviderConfig::DEFAULT_ENDPOINT.to_string()),
        redirect_uri: build_var(option_env!("AUTHSCREEN_REDIRECT_URI")).or_else(callback_url),
        oauth: OAuthClients {
            google: build_var(option_env!("AUTHSCREEN_OAUTH__GOOGLE")),
            facebook: build_var(option_env!("AUTHSCREEN_OAUTH__FACEBOOK")),
            github: build_var(option_env!("AUTHSCREEN_OAUTH__GITHUB")),
        },
        ..ProviderConfig::default()
    }
}

/// Origin of the page the app is served from
pub fn current_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

fn callback_url() -> Option<String> {
    current_origin().map(|origin| format!("{origin}{OAUTH_CALLBACK_PATH}"))
}
