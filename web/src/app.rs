//! Application wiring for the views.
//!
//! # Design
//! `AppContext` is the one place the route table and the API client meet.
//! The client is created once and handed out as `Arc` clones, so every view
//! talks to the same instance with the same interceptors. Views get it from
//! the context rather than from a global.

use std::sync::Arc;

use inventory_core::{ApiClient, ClientConfig, Transport, UreqTransport};

use crate::router::RouterTable;
use crate::views::View;

/// What views are handed when they mount: the route table and the one shared
/// API client.
pub struct AppContext<T> {
    router: RouterTable,
    api: Arc<ApiClient<T>>,
}

impl AppContext<UreqTransport> {
    /// The build-time route table and a `ureq` client configured from the
    /// environment.
    pub fn from_env() -> Self {
        let api = ApiClient::new(ClientConfig::from_env(), UreqTransport::new());
        Self::new(RouterTable::app(), Arc::new(api))
    }
}

impl<T: Transport> AppContext<T> {
    pub fn new(router: RouterTable, api: Arc<ApiClient<T>>) -> Self {
        tracing::debug!(
            base = router.history().base(),
            routes = router.routes().len(),
            api = %api.config().base_url,
            "application context ready"
        );
        Self { router, api }
    }

    pub fn router(&self) -> &RouterTable {
        &self.router
    }

    pub fn api(&self) -> Arc<ApiClient<T>> {
        Arc::clone(&self.api)
    }

    /// The view to mount for `location`, if any route matches.
    pub fn view_for(&self, location: &str) -> Option<View> {
        self.router.resolve(location).map(|route| route.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::{HttpRequest, HttpResponse, TransportError};

    struct Offline;

    impl Transport for Offline {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(200, "[]"))
        }
    }

    fn context() -> AppContext<Offline> {
        let api = ApiClient::new(ClientConfig::default(), Offline);
        AppContext::new(RouterTable::with_base("/"), Arc::new(api))
    }

    #[test]
    fn views_resolve_through_context() {
        let ctx = context();
        assert_eq!(ctx.view_for("/"), Some(View::Dashboard));
        assert_eq!(ctx.view_for("/inventory"), Some(View::Inventory));
        assert_eq!(ctx.view_for("/shipments"), Some(View::Shipments));
        assert_eq!(ctx.view_for("/missing"), None);
    }

    #[test]
    fn every_consumer_shares_one_client() {
        let ctx = context();
        let a = ctx.api();
        let b = ctx.api();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.config().base_url, "http://localhost:3000");
    }
}
