use actix_web::{
    cookie::Cookie,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::utils::{CurrentSession, SessionStore, SESSION_COOKIE};

/// Resolves the session cookie into a `CurrentSession` request extension.
///
/// Handlers read it with `Option<web::ReqData<CurrentSession>>`. A cookie
/// whose session is gone (expired, logged out, server restarted) is
/// cleared on the response.
pub struct SessionLoader {
    store: web::Data<SessionStore>,
}

impl SessionLoader {
    pub fn new(store: web::Data<SessionStore>) -> Self {
        Self { store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionLoader
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionLoaderService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionLoaderService {
            service,
            store: self.store.clone(),
        }))
    }
}

pub struct SessionLoaderService<S> {
    service: S,
    store: web::Data<SessionStore>,
}

impl<S, B> Service<ServiceRequest> for SessionLoaderService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        let stale = match token {
            Some(token) => match self.store.get(&token) {
                Some(entry) => {
                    req.extensions_mut().insert(CurrentSession { token, entry });
                    false
                }
                None => {
                    log::debug!("🍪 Session cookie without live session, clearing it");
                    true
                }
            },
            None => false,
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            // Handlers that set a new session cookie win over the removal
            let handler_set_cookie = res
                .response()
                .cookies()
                .any(|c| c.name() == SESSION_COOKIE);

            if stale && !handler_set_cookie {
                let removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
                if let Err(e) = res.response_mut().add_removal_cookie(&removal) {
                    log::warn!("⚠️  Failed to clear stale session cookie: {}", e);
                }
            }

            Ok(res)
        })
    }
}
