//! Archiver feature slice: resolves galleries to direct archive download URLs.
//!
//! One resolution is a fixed sequence against the target site's `archiver.php`:
//! read the GP cost, optionally request the original archive, then revoke older
//! download sessions. Every reply also carries a fresh probe of a canary gallery.
//!
//! ```rust,ignore
//! let archiver = relay_archiver::init(&config)?;
//! let reply = archiver.resolve(br#"{"gid": 3325056, "token": "928605fbbd", "username": "alice"}"#).await;
//! ```

mod error;
pub mod models;
mod resolver;
pub mod scrape;
#[cfg(feature = "server")]
pub mod server;
mod site;
mod status;

pub use crate::error::{ArchiverError, ArchiverErrorExt};
pub use crate::site::TargetSite;

use crate::models::GalleryRef;
use relay_domain::config::RelayConfig;
use std::ops::Deref;
use std::sync::Arc;

/// Archiver slice state. Immutable after [`init`].
#[derive(Debug)]
pub struct ArchiverInner {
    site: TargetSite,
    canary: GalleryRef,
    enable_gp_cost: bool,
}

impl ArchiverInner {
    #[must_use]
    pub const fn canary(&self) -> &GalleryRef {
        &self.canary
    }
}

/// Cheaply clonable handle shared by every request.
#[derive(Debug, Clone)]
pub struct Archiver {
    inner: Arc<ArchiverInner>,
}

impl Archiver {
    fn new(inner: ArchiverInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Archiver {
    type Target = ArchiverInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Initialize the archiver slice from the relay configuration.
///
/// # Errors
/// Returns [`ArchiverError::Config`] if the target site client cannot be built.
pub fn init(config: &RelayConfig) -> Result<Archiver, ArchiverError> {
    let site = TargetSite::from_config(&config.target)?;
    let canary = GalleryRef::new(config.resolver.canary_gid.as_str(), config.resolver.canary_token.as_str());

    tracing::info!(
        target_site = %config.target.base_url,
        enable_gp_cost = config.resolver.enable_gp_cost,
        proxy = config.target.proxy.is_some(),
        "Archiver slice initialized"
    );

    Ok(Archiver::new(ArchiverInner { site, canary, enable_gp_cost: config.resolver.enable_gp_cost }))
}
