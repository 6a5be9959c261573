//! JWT authentication middleware.
//!
//! [`JwtAuth`] holds the resolved configuration and runs the
//! extract → verify → attach pipeline. It can decorate a plain handler
//! ([`JwtAuth::decorate`]) or wrap a tower service ([`JwtLayer`]).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::Request;
use tower::{Layer, Service};

use crate::{AuthError, ConfigError, JwtConfig, RequestContext, ResolvedConfig, VerifyError};

/// JWT authentication middleware. Cheap to clone; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct JwtAuth {
    config: Arc<ResolvedConfig>,
}

impl JwtAuth {
    /// Middleware with default settings and the given signing key.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        Self::with_config(JwtConfig::with_key(key))
    }

    /// Middleware from a full configuration.
    pub fn with_config(config: JwtConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Arc::new(config.resolve()?),
        })
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Authenticate `ctx`, attaching the verified token under the context key.
    pub fn authenticate<C: RequestContext + ?Sized>(&self, ctx: &mut C) -> Result<(), AuthError> {
        let raw = self.config.extractor.extract(&*ctx).map_err(|err| {
            log::debug!("Credential extraction failed: {err}");
            AuthError::BadRequest(err)
        })?;

        let token = self
            .config
            .verifier
            .verify(&raw)
            .and_then(|token| {
                if token.valid {
                    Ok(token)
                } else {
                    Err(VerifyError::Invalid)
                }
            })
            .map_err(|err| {
                log::warn!("Authentication failed: {err}");
                AuthError::Unauthorized(err)
            })?;

        ctx.attach(&self.config.context_key, token);
        Ok(())
    }

    /// Wrap `next` so it only runs for authenticated requests.
    ///
    /// Rejections are converted into `E`; errors from `next` pass through untouched.
    pub fn decorate<C, H, R, E>(
        &self,
        next: H,
    ) -> impl Fn(&mut C) -> Result<R, E> + Clone + use<C, H, R, E>
    where
        C: RequestContext + ?Sized,
        H: Fn(&mut C) -> Result<R, E> + Clone,
        E: From<AuthError>,
    {
        let auth = self.clone();
        move |ctx: &mut C| {
            auth.authenticate(ctx)?;
            next(ctx)
        }
    }

    /// Tower layer running this middleware in front of a service.
    pub fn layer(&self) -> JwtLayer {
        JwtLayer { auth: self.clone() }
    }
}

/// Tower `Layer` that wraps services with JWT authentication.
#[derive(Debug, Clone)]
pub struct JwtLayer {
    auth: JwtAuth,
}

impl JwtLayer {
    /// Create a new layer for the given middleware.
    pub fn new(auth: JwtAuth) -> Self {
        Self { auth }
    }
}

impl<S> Layer<S> for JwtLayer {
    type Service = JwtService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        JwtService {
            inner,
            auth: self.auth.clone(),
        }
    }
}

/// Tower `Service` that authenticates requests before forwarding them.
///
/// On success the request carries an [`Attachments`](crate::Attachments)
/// extension holding the token under the configured context key.
#[derive(Debug, Clone)]
pub struct JwtService<S> {
    inner: S,
    auth: JwtAuth,
}

impl<S> Service<Request<Body>> for JwtService<S>
where
    S: Service<Request<Body>> + 'static,
    S::Response: IntoResponse,
    S::Error: Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        match self.auth.authenticate(&mut req) {
            Ok(()) => {
                let fut = self.inner.call(req);
                Box::pin(async move { fut.await.map(IntoResponse::into_response) })
            }
            Err(rejection) => Box::pin(async move { Ok(rejection.into_response()) }),
        }
    }
}
