//! The HTTP server object: route table plus injected store dependency.

use std::net::SocketAddr;
use std::sync::Arc;

use adapters::StoreAdapter;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::report::routes::report_router;
use crate::config::Settings;
use crate::services::reports::ReportService;

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub reports: ReportService,
}

impl AppState {
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self {
            reports: ReportService::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    report_router().with_state(state)
}

pub struct Server {
    addr: SocketAddr,
    router: Router,
}

impl Server {
    pub fn new(settings: &Settings, store: Arc<dyn StoreAdapter>) -> Self {
        Self {
            addr: settings.bind_addr,
            router: router(AppState::new(store)),
        }
    }

    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        info!(addr = %listener.local_addr()?, "brewasis listening");
        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{brewery, seeded_store};
    use adapters::{AdapterError, Row, Statement};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    /// A store that cannot be reached.
    struct DownStore;

    #[async_trait]
    impl StoreAdapter for DownStore {
        async fn fetch_all(&self, _statement: &Statement) -> Result<Vec<Row>, AdapterError> {
            Err(AdapterError::Connection("connection refused".into()))
        }

        async fn execute(&self, _statement: &Statement) -> Result<u64, AdapterError> {
            Err(AdapterError::Connection("connection refused".into()))
        }
    }

    async fn app() -> (TempDir, Router) {
        let (dir, store) = seeded_store(&[
            brewery("Boston Beer Co", "MA", Some(20_000_000.0)),
            brewery("D. G. Yuengling and Son Inc", "PA", Some(12_000_000.0)),
            brewery("Hops & <Barley>", "OR", None),
        ])
        .await;
        (dir, router(AppState::new(Arc::new(store))))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn landing_page_is_served() {
        let (_dir, app) = app().await;
        let (status, body) = send(app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("href=\"/top\""));
    }

    #[tokio::test]
    async fn top_page_embeds_ranked_chart_data() {
        let (_dir, app) = app().await;
        let (status, body) = send(app, get("/top")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"["2017","2016","2015""#));

        let boston = body.find("Boston Beer Co").unwrap();
        let yuengling = body.find("D. G. Yuengling and Son Inc").unwrap();
        assert!(boston < yuengling);
        assert!(body.contains(r#"Hops \u0026 \u003cBarley\u003e"#));
        assert!(!body.contains("<Barley>"));
    }

    #[tokio::test]
    async fn company_defaults_to_boston_beer() {
        let (_dir, app) = app().await;
        let (status, body) = send(app, get("/company")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<option value="Boston Beer Co" selected>"#));
    }

    #[tokio::test]
    async fn company_can_be_posted_from_the_form() {
        let (_dir, app) = app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/company")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("company=D.+G.+Yuengling+and+Son+Inc"))
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<option value="D. G. Yuengling and Son Inc" selected>"#));
    }

    #[tokio::test]
    async fn unknown_company_is_404() {
        let (_dir, app) = app().await;
        let (status, body) = send(app, get("/company?company=Nobody+Brewing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Nobody Brewing"));
    }

    #[tokio::test]
    async fn craft_listing_escapes_company_names() {
        let (_dir, app) = app().await;
        let (status, body) = send(app, get("/craft")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches(r#"<table class="craft">"#).count(), 3);
        assert!(body.contains("Hops &amp; &lt;Barley&gt;"));
        assert!(!body.contains("<Barley>"));
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let app = router(AppState::new(Arc::new(DownStore)));
        let (status, body) = send(app, get("/top")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("connection refused"));
    }
}
