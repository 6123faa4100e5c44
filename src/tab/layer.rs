//! Tower layer that binds a request tab into every request.

use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::cache::{CacheValue, SharedCache};
use crate::tab::{RequestTab, TabContext};

/// Creates the layer that gives every request a tab on `cache`.
///
/// # Example
/// ```ignore
/// let cache: SharedCache<String> = open_tab(None, Some(Duration::from_secs(1)));
/// let app = Router::new()
///     .route("/hello", get(|tab: TabContext<String>| async move { tab.get("hello").await }))
///     .layer(new_tab(cache));
/// ```
pub fn new_tab<V: CacheValue>(cache: SharedCache<V>) -> TabLayer<V> {
    TabLayer { cache }
}

/// Layer returned by [`new_tab`].
#[derive(Clone)]
pub struct TabLayer<V> {
    cache: SharedCache<V>,
}

impl<S, V: CacheValue> Layer<S> for TabLayer<V> {
    type Service = TabService<S, V>;

    fn layer(&self, inner: S) -> Self::Service {
        TabService {
            inner,
            cache: self.cache.clone(),
        }
    }
}

/// Service that inserts a [`TabContext`] into request extensions before
/// calling the inner service.
#[derive(Clone)]
pub struct TabService<S, V> {
    inner: S,
    cache: SharedCache<V>,
}

impl<S, V, B> Service<Request<B>> for TabService<S, V>
where
    S: Service<Request<B>>,
    V: CacheValue,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let tab = RequestTab::new(self.cache.clone(), req.method().clone(), req.uri().clone());
        req.extensions_mut().insert(TabContext::new(tab));
        self.inner.call(req)
    }
}
