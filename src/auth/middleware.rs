use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use log::debug;

use super::Token;

/// Copies the token cookie, when present, into request extensions so
/// downstream handlers see an explicit session value instead of reading
/// ambient cookie state themselves.
pub async fn extract_token(jar: CookieJar, mut req: Request, next: Next) -> Response {
    if let Some(cookie) = jar.get(Token::COOKIE) {
        let token = Token::from(cookie);
        debug!("Active Instagram session: {token:?}");
        req.extensions_mut().insert(token);
    }

    next.run(req).await
}

/// Rejects requests that reached a Graph-backed route without a token,
/// before any upstream call is attempted.
pub async fn require_token(req: Request, next: Next) -> crate::Result<Response> {
    if req.extensions().get::<Token>().is_none() {
        return Err(super::Error::NotAuthenticated.into());
    }

    Ok(next.run(req).await)
}
