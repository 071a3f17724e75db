use actix_web::dev::Payload;
use actix_web::{error::ErrorUnauthorized, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

/// Authenticated caller identity. Session verification happens upstream;
/// the trusted identity provider forwards the resolved user id in the
/// `X-User-Id` header. Requests without it are rejected with 401.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: String,
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get("X-User-Id")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        ready(match user_id {
            Some(user_id) => Ok(Caller { user_id }),
            None => Err(ErrorUnauthorized(
                serde_json::json!({"error": "Unauthorized."}),
            )),
        })
    }
}
