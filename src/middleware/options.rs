use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Answer every OPTIONS request with an empty 200.
///
/// CORS preflights are already handled by `CorsLayer`; this covers plain
/// OPTIONS requests that would otherwise fall through to a 405.
pub async fn options_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}
