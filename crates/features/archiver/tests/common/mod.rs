#![allow(dead_code)]

//! In-process stand-in for the target site's `archiver.php`.

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use relay_domain::config::RelayConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const CANARY_GID: &str = "3325056";
pub const COOKIE: &str = "ipb_member_id=7; ipb_pass_hash=feedface";
pub const USER_AGENT: &str = "relay-test-agent/1.0";
pub const DOWNLOAD_URL: &str = "https://abcd.hath.network/archive/123/0f1e2d/3c4b5a/0";

pub fn cost_page(cost: &str) -> String {
    format!(
        r#"<div id="db"><div style="float:left"><p>Download Cost: <strong>{cost}</strong></p></div>
        <div style="float:right"><p>Estimated Size: <strong>120.4 MiB</strong></p></div></div>"#
    )
}

pub fn redirect_page(url: &str) -> String {
    format!(r#"<script type="text/javascript">document.location = "{url}";</script>"#)
}

/// What the stub answers. The canary gallery gets its own cost page.
#[derive(Debug, Clone)]
pub struct StubPages {
    pub cost: String,
    pub canary: String,
    pub download: String,
    pub invalidate_status: StatusCode,
    pub delay: Duration,
}

impl Default for StubPages {
    fn default() -> Self {
        Self {
            cost: cost_page("Free!"),
            canary: cost_page("Free!"),
            download: redirect_page(&format!("{DOWNLOAD_URL}?autostart=1")),
            invalidate_status: StatusCode::OK,
            delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Default)]
pub struct Hits {
    pub cost: AtomicUsize,
    pub canary: AtomicUsize,
    pub download: AtomicUsize,
    pub invalidate: AtomicUsize,
    /// Requests missing the configured cookie or user agent.
    pub unauthenticated: AtomicUsize,
    /// POSTs whose form matched neither known body.
    pub unknown_form: AtomicUsize,
}

impl Hits {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct Stub {
    pages: StubPages,
    hits: Arc<Hits>,
}

#[derive(Debug, Deserialize)]
struct GalleryQuery {
    gid: String,
    #[allow(dead_code)]
    token: String,
}

#[derive(Debug)]
pub struct StubSite {
    pub base_url: String,
    pub hits: Arc<Hits>,
}

impl StubSite {
    pub async fn start(pages: StubPages) -> Self {
        let hits = Arc::new(Hits::default());
        let stub = Arc::new(Stub { pages, hits: hits.clone() });

        let app = Router::new()
            .route("/archiver.php", get(archiver_get).post(archiver_post))
            .with_state(stub);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub site");
        let address = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub site crashed");
        });

        Self { base_url: format!("http://{address}"), hits }
    }

    pub fn config(&self) -> RelayConfig {
        relay_config(&self.base_url)
    }
}

pub fn relay_config(base_url: &str) -> RelayConfig {
    let mut cfg = RelayConfig::default();
    cfg.target.base_url = base_url.to_owned();
    cfg.target.cookie = COOKIE.to_owned();
    cfg.target.user_agent = USER_AGENT.to_owned();
    cfg.target.timeout_secs = 5;
    cfg
}

fn record_auth(stub: &Stub, headers: &HeaderMap) {
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    let agent = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok());
    if cookie != Some(COOKIE) || agent != Some(USER_AGENT) {
        stub.hits.unauthenticated.fetch_add(1, Ordering::SeqCst);
    }
}

async fn archiver_get(
    State(stub): State<Arc<Stub>>,
    Query(query): Query<GalleryQuery>,
    headers: HeaderMap,
) -> Response {
    record_auth(&stub, &headers);
    tokio::time::sleep(stub.pages.delay).await;

    if query.gid == CANARY_GID {
        stub.hits.canary.fetch_add(1, Ordering::SeqCst);
        Html(stub.pages.canary.clone()).into_response()
    } else {
        stub.hits.cost.fetch_add(1, Ordering::SeqCst);
        Html(stub.pages.cost.clone()).into_response()
    }
}

async fn archiver_post(
    State(stub): State<Arc<Stub>>,
    Query(_query): Query<GalleryQuery>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    record_auth(&stub, &headers);
    tokio::time::sleep(stub.pages.delay).await;

    let field = |name: &str| form.get(name).map(String::as_str);

    if field("invalidate_sessions") == Some("1") {
        stub.hits.invalidate.fetch_add(1, Ordering::SeqCst);
        return stub.pages.invalidate_status.into_response();
    }

    if field("dltype") == Some("org") && field("dlcheck") == Some("Download Original Archive") {
        stub.hits.download.fetch_add(1, Ordering::SeqCst);
        return Html(stub.pages.download.clone()).into_response();
    }

    stub.hits.unknown_form.fetch_add(1, Ordering::SeqCst);
    StatusCode::BAD_REQUEST.into_response()
}
