use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level relay configuration. Read-only once the server is built.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfigInner {
    pub server: ServerConfig,
    pub target: TargetConfig,
    pub resolver: ResolverConfig,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(flatten, default)]
    inner: Arc<RelayConfigInner>,
}

impl Deref for RelayConfig {
    type Target = RelayConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for RelayConfig {
    fn deref_mut(&mut self) -> &mut RelayConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
    /// Mounts the `OpenAPI` viewer under `/api`.
    pub docs: bool,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// The archive site every outbound call goes to.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub base_url: String,
    /// Raw `Cookie` header value, e.g. `ipb_member_id=...; ipb_pass_hash=...`.
    pub cookie: String,
    pub user_agent: String,
    /// Optional upstream proxy (`http://`, `https://` or `socks5://`).
    pub proxy: Option<String>,
    pub timeout_secs: u64,
}

impl TargetConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// The cookie is a credential, keep it out of logs.
impl std::fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetConfig")
            .field("base_url", &self.base_url)
            .field("cookie", &if self.cookie.is_empty() { "<empty>" } else { "<redacted>" })
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Resolution policy and the canary gallery used by the status probe.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Allow downloads that cost GP.
    pub enable_gp_cost: bool,
    pub canary_gid: String,
    pub canary_token: String,
}

/// Logging sinks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level directive, overridden by `RUST_LOG`.
    pub level: String,
    pub console: bool,
    /// Directory for daily-rolling log files. Files are disabled when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4655, ssl: None, docs: false }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://exhentai.org".to_owned(),
            cookie: String::new(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         Chrome/135.0.0.0 Safari/537.36"
                .to_owned(),
            proxy: None,
            timeout_secs: 60,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enable_gp_cost: true,
            canary_gid: "3325056".to_owned(),
            canary_token: "928605fbbd".to_owned(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, path: None, json: false, max_files: 10 }
    }
}
