use crate::error::{ArchiverError, ArchiverErrorExt};
use crate::models::GalleryRef;
use crate::scrape::{extract_cost_text, extract_download_url, parse_cost};
use relay_domain::config::TargetConfig;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Proxy, RequestBuilder, StatusCode};
use tracing::debug;

const ARCHIVER_PATH: &str = "archiver.php";
const DOWNLOAD_FORM: [(&str, &str); 2] = [("dltype", "org"), ("dlcheck", "Download Original Archive")];
const INVALIDATE_FORM: [(&str, &str); 1] = [("invalidate_sessions", "1")];

/// Authenticated client for the target site's archiver endpoint.
///
/// Every request carries the configured cookie and user agent and is bounded by the
/// configured timeout. Nothing is retried.
#[derive(Debug, Clone)]
pub struct TargetSite {
    http: Client,
    endpoint: String,
}

impl TargetSite {
    /// Builds the pooled HTTP client from the target configuration.
    ///
    /// # Errors
    /// Returns [`ArchiverError::Config`] if the timeout is zero, the cookie is not a valid
    /// header value, the proxy URL is invalid, or the TLS backend cannot be initialized.
    pub fn from_config(cfg: &TargetConfig) -> Result<Self, ArchiverError> {
        // A zero timeout fails every call before it is sent.
        if cfg.timeout_secs == 0 {
            return Err(ArchiverError::Config {
                message: "timeout_secs must be greater than zero".into(),
                context: Some("target".into()),
            });
        }

        let mut headers = HeaderMap::new();
        if !cfg.cookie.is_empty() {
            let mut cookie = HeaderValue::from_str(&cfg.cookie).map_err(|e| ArchiverError::Config {
                message: e.to_string().into(),
                context: Some("Cookie is not a valid header value".into()),
            })?;
            cookie.set_sensitive(true);
            headers.insert(COOKIE, cookie);
        }

        let mut builder = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .default_headers(headers)
            .timeout(cfg.timeout());

        if let Some(proxy) = &cfg.proxy {
            let proxy = Proxy::all(proxy).map_err(|e| ArchiverError::Config {
                message: e.to_string().into(),
                context: Some(format!("Invalid proxy: {proxy}").into()),
            })?;
            builder = builder.proxy(proxy);
        }

        let http = builder.build().map_err(|e| ArchiverError::Config {
            message: e.to_string().into(),
            context: Some("Failed to build target site client".into()),
        })?;

        Ok(Self { http, endpoint: format!("{}/{ARCHIVER_PATH}", cfg.base_url.trim_end_matches('/')) })
    }

    /// GP cost of downloading the original archive of `gallery`.
    ///
    /// # Errors
    /// * [`ArchiverError::Network`] on timeout or transport failure.
    /// * [`ArchiverError::ExtractionFailed`] when the page has no cost, typically an invalid
    ///   cookie or a redirect away from the archiver.
    /// * [`ArchiverError::ParseFailed`] when the cost text holds no number.
    pub async fn cost(&self, gallery: &GalleryRef) -> Result<u64, ArchiverError> {
        let page = fetch_text(self.http.get(&self.endpoint), gallery).await?;

        let text = extract_cost_text(&page).ok_or_else(|| ArchiverError::ExtractionFailed {
            message: "no cost on the archiver page, the cookie may be invalid or the request was redirected".into(),
            context: Some(format!("gid {}", gallery.gid).into()),
        })?;

        parse_cost(text).ok_or_else(|| ArchiverError::ParseFailed {
            message: format!("cost text {text:?} is not a number").into(),
            context: Some(format!("gid {}", gallery.gid).into()),
        })
    }

    /// Requests the original archive and returns the direct download URL, if the page offers one.
    ///
    /// # Errors
    /// Returns [`ArchiverError::Network`] on timeout or transport failure.
    pub async fn download_url(&self, gallery: &GalleryRef) -> Result<Option<String>, ArchiverError> {
        let page =
            fetch_text(self.http.post(&self.endpoint).form(&DOWNLOAD_FORM), gallery).await?;
        Ok(extract_download_url(&page))
    }

    /// Revokes previously issued download sessions for `gallery`.
    ///
    /// # Errors
    /// Returns [`ArchiverError::Network`] on timeout or transport failure.
    pub async fn invalidate_sessions(&self, gallery: &GalleryRef) -> Result<StatusCode, ArchiverError> {
        let response = with_gallery(self.http.post(&self.endpoint).form(&INVALIDATE_FORM), gallery)
            .send()
            .await
            .context("Session invalidation failed")?;
        Ok(response.status())
    }
}

/// Appends `?gid=..&token=..` to an archiver request.
fn with_gallery(builder: RequestBuilder, gallery: &GalleryRef) -> RequestBuilder {
    builder.query(&[("gid", gallery.gid.as_str()), ("token", gallery.token.as_str())])
}

async fn fetch_text(builder: RequestBuilder, gallery: &GalleryRef) -> Result<String, ArchiverError> {
    let response = with_gallery(builder, gallery).send().await.context("Archiver request failed")?;
    debug!(gid = %gallery.gid, status = %response.status(), "Archiver page received");
    response.text().await.context("Failed to read archiver page")
}
