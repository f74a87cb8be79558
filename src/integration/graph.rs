use std::sync::Arc;

const API_VERSION: &str = "v23.0";

const AUTHORIZE_URL: &str = "https://www.instagram.com/oauth/authorize";
const TOKEN_URL: &str = "https://api.instagram.com/oauth/access_token";
const API_BASE_URL: &str = "https://graph.instagram.com";

/// Scopes requested when connecting an Instagram business account.
const SCOPES: &[&str] = &[
    "instagram_business_basic",
    "instagram_business_manage_messages",
    "instagram_business_manage_comments",
    "instagram_business_content_publish",
    "instagram_business_manage_insights",
];

#[derive(Clone)]
pub struct Config {
    client_id: String,
    client_secret: String,
    app_url: String,
    redirect_url: String,
    authorize_url: String,
    token_url: String,
    api_url: String,
    verify_token: Arc<str>,
}

impl Config {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        app_url: impl Into<String>,
        verify_token: impl Into<String>,
    ) -> Self {
        let app_url = app_url.into();
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: format!("{app_url}/api/auth/instagram/callback"),
            app_url,
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            api_url: format!("{API_BASE_URL}/{API_VERSION}"),
            verify_token: verify_token.into().into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Versioned base for Graph API resource paths.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn verify_token(&self) -> &str {
        &self.verify_token
    }

    pub fn authorize_url(&self) -> String {
        format!(
            "{}?enable_fb_login=0&force_authentication=1&client_id={}&redirect_uri={}&response_type=code&scope={}",
            self.authorize_url,
            self.client_id,
            self.redirect_url,
            SCOPES.join("%2C")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_urls_from_app_url() {
        let cfg = Config::new("client", "secret", "https://pilot.example", "verify");

        assert_eq!(
            cfg.redirect_url(),
            "https://pilot.example/api/auth/instagram/callback"
        );
        assert_eq!(cfg.api_url(), "https://graph.instagram.com/v23.0");

        let authorize = cfg.authorize_url();
        assert!(authorize.starts_with("https://www.instagram.com/oauth/authorize?"));
        assert!(authorize.contains("client_id=client"));
        assert!(authorize.contains("instagram_business_manage_messages"));
    }
}
