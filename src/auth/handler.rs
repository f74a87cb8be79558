pub(super) mod api {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::response::{IntoResponse, Redirect};
    use axum::{Extension, Json};
    use axum_extra::extract::cookie::{self, Cookie};
    use axum_extra::extract::{CookieJar, Query};
    use log::{debug, error};
    use serde::Deserialize;

    use crate::auth::{self, Code, ConnectionStatus, Token};
    use crate::integration::{Config, Env};

    pub async fn connect(auth_service: State<auth::Service>) -> impl IntoResponse {
        Redirect::to(&auth_service.authorize())
    }

    #[derive(Deserialize)]
    pub struct CallbackParams {
        code: Option<Code>,
        error: Option<String>,
    }

    /// Completes the OAuth dance. Every failure lands the user back on
    /// the settings page with an error marker instead of a bare 5xx.
    pub async fn callback(
        Query(params): Query<CallbackParams>,
        auth_service: State<auth::Service>,
        config: State<Arc<Config>>,
        jar: CookieJar,
    ) -> (CookieJar, Redirect) {
        let app_url = config.graph.app_url().to_owned();
        let settings = move |outcome: &str| Redirect::to(&format!("{app_url}/settings?{outcome}"));

        if let Some(e) = params.error {
            error!("Instagram authorization rejected: {e}");
            return (jar, settings(&format!("error={e}")));
        }

        let Some(code) = params.code else {
            error!("No code provided in Instagram callback");
            return (jar, settings("error=no_code"));
        };

        let token = match auth_service.exchange_code(code).await {
            Ok(token) => token,
            Err(e) => {
                error!("Code exchange failed: {e}");
                return (jar, settings("error=auth_failed"));
            }
        };

        let account = match auth_service.account(&token).await {
            Ok(account) => account,
            Err(e) => {
                error!("Profile lookup failed after exchange: {e}");
                return (jar, settings("error=auth_failed"));
            }
        };

        debug!("Instagram connected for '{}'", account.username);

        let token = {
            let mut token = Cookie::from(token);
            token.set_path("/");
            token.set_secure(matches!(config.env, Env::Production));
            token.set_http_only(true);
            token.set_same_site(cookie::SameSite::Lax);
            token
        };

        (jar.add(token), settings("success=instagram_connected"))
    }

    pub async fn status(
        token: Option<Extension<Token>>,
        auth_service: State<auth::Service>,
    ) -> Json<ConnectionStatus> {
        let Some(Extension(token)) = token else {
            return Json(ConnectionStatus {
                connected: false,
                username: None,
            });
        };

        match auth_service.account(&token).await {
            Ok(account) => Json(ConnectionStatus {
                connected: true,
                username: Some(account.username),
            }),
            Err(e) => {
                debug!("Status probe failed: {e}");
                Json(ConnectionStatus {
                    connected: false,
                    username: None,
                })
            }
        }
    }

    pub async fn me(
        token: Option<Extension<Token>>,
        auth_service: State<auth::Service>,
    ) -> crate::Result<Json<auth::Account>> {
        let Some(Extension(token)) = token else {
            return Err(auth::Error::NotAuthenticated.into());
        };

        let account = auth_service.account(&token).await?;
        Ok(Json(account))
    }

    pub async fn disconnect(jar: CookieJar) -> impl IntoResponse {
        debug!("Clearing Instagram session cookie");

        let mut cookie = Cookie::from(Token::COOKIE);
        cookie.set_path("/");

        (
            jar.remove(cookie),
            Json(serde_json::json!({ "success": true })),
        )
    }
}
