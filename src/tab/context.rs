//! Extractor giving handlers the tab bound to their request.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::cache::CacheValue;
use crate::error::CacheError;
use crate::tab::Tab;

/// The [`Tab`] bound to the current request.
///
/// Inserted by [`TabLayer`](crate::tab::TabLayer); extracting it from a
/// request that did not pass through the layer fails with
/// [`CacheError::MissingTab`].
pub struct TabContext<V> {
    tab: Arc<dyn Tab<V>>,
}

impl<V: CacheValue> TabContext<V> {
    pub fn new(tab: impl Tab<V> + 'static) -> Self {
        Self { tab: Arc::new(tab) }
    }
}

impl<V> Clone for TabContext<V> {
    fn clone(&self) -> Self {
        Self {
            tab: Arc::clone(&self.tab),
        }
    }
}

impl<V> Deref for TabContext<V> {
    type Target = dyn Tab<V>;

    fn deref(&self) -> &Self::Target {
        self.tab.as_ref()
    }
}

#[async_trait]
impl<S, V> FromRequestParts<S> for TabContext<V>
where
    S: Send + Sync,
    V: CacheValue,
{
    type Rejection = CacheError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TabContext<V>>()
            .cloned()
            .ok_or(CacheError::MissingTab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Request, Uri};

    use crate::cache::{open_tab, SharedCache, Ttl};
    use crate::tab::RequestTab;

    #[tokio::test]
    async fn test_extract_from_extensions() {
        let cache: SharedCache<u32> = open_tab(None, None);
        cache.set("n", 5, Ttl::Never).await;

        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(TabContext::new(RequestTab::new(
            cache,
            Method::GET,
            Uri::from_static("/n"),
        )));

        let tab = TabContext::<u32>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(tab.get("n").await, Some(5));
    }

    #[tokio::test]
    async fn test_missing_layer_rejected() {
        let (mut parts, _) = Request::new(()).into_parts();

        let result = TabContext::<u32>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(CacheError::MissingTab)));
    }

    #[tokio::test]
    async fn test_wrong_value_type_rejected() {
        let cache: SharedCache<String> = open_tab(None, None);
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(TabContext::new(RequestTab::new(
            cache,
            Method::GET,
            Uri::from_static("/"),
        )));

        let result = TabContext::<u32>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(CacheError::MissingTab)));
    }
}
