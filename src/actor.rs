use std::{ops::Deref, str::FromStr};

use actix_web::{dev, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::consts::ACTOR_HEADER;

/// Identity of whoever drives a state-changing request
///
/// Authentication sits in front of this service, which forwards the resolved user id in the
/// `X-Actor-Id` header. This extractor only trusts and parses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub Uuid);

impl Deref for Actor {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Actor {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Some(Ok(value)) = req.headers()
                .get(ACTOR_HEADER)
                .map(|v| v.to_str())
            else {
                return Err(actix_web::error::ErrorUnauthorized("missing actor"))
            };

            let Ok(id) = Uuid::from_str(value.trim()) else {
                return Err(actix_web::error::ErrorUnauthorized("invalid actor"))
            };

            Ok(Self(id))
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{get, http::StatusCode, test, App, Responder};

    use super::*;

    #[actix_web::test]
    async fn test_extractor() {
        #[get("/")]
        async fn test_handler(actor: Actor) -> impl Responder {
            actor.to_string()
        }

        let app = test::init_service(
            App::new()
                .service(test_handler)
        ).await;

        {
            let unauthorized_req = test::TestRequest::default()
                .uri("/")
                .to_request();

            let response = test::call_service(&app, unauthorized_req).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        {
            let malformed_req = test::TestRequest::default()
                .uri("/")
                .insert_header((ACTOR_HEADER, "not-a-uuid"))
                .to_request();

            let response = test::call_service(&app, malformed_req).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        {
            let id = Uuid::new_v4();

            let req = test::TestRequest::default()
                .uri("/")
                .insert_header((ACTOR_HEADER, id.to_string()))
                .to_request();

            let body = test::call_and_read_body(&app, req).await;
            assert_eq!(body, id.to_string());
        }
    }
}
