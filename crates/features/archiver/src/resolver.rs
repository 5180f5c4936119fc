use crate::Archiver;
use crate::error::{ArchiverError, ArchiverErrorExt};
use crate::models::{
    DestroyReply, DestroyRequest, FailedReply, GalleryRef, ResolveMessage, ResolveOutcome,
    ResolveReply, ResolveRequest,
};
use tracing::{error, info, warn};

/// What the workflow learned before the status probe is attached.
#[derive(Debug)]
struct Resolution {
    msg: ResolveMessage,
    require_gp: Option<u64>,
    d_url: Option<String>,
}

impl Resolution {
    const fn failed(require_gp: Option<u64>) -> Self {
        Self { msg: ResolveMessage::ResolutionFailed, require_gp, d_url: None }
    }
}

impl Archiver {
    /// Resolves a raw `/resolve` body.
    ///
    /// An undecodable body yields the bare `Failed` reply; anything past decoding is
    /// reported through [`ResolveOutcome::msg`]. Both carry a fresh status probe.
    pub async fn resolve(&self, body: &[u8]) -> ResolveReply {
        match serde_json::from_slice::<ResolveRequest>(body).context("Decoding resolve request") {
            Ok(request) => ResolveReply::Resolved(self.resolve_request(&request).await),
            Err(e) => {
                error!("Resolve request rejected: {e:?}");
                ResolveReply::Failed(FailedReply::new(self.status().await))
            },
        }
    }

    /// Runs the cost gate, the download URL query and session invalidation for one gallery.
    pub async fn resolve_request(&self, request: &ResolveRequest) -> ResolveOutcome {
        let gallery = request.gallery();
        let Resolution { msg, require_gp, d_url } = self.run(&gallery).await;
        let status = self.status().await;

        info!(
            username = %request.username,
            gid = %gallery.gid,
            require_gp = ?require_gp,
            msg = %msg,
            "Archive resolution"
        );

        ResolveOutcome { msg, d_url, require_gp, status }
    }

    async fn run(&self, gallery: &GalleryRef) -> Resolution {
        let cost = match self.site.cost(gallery).await {
            Ok(cost) => cost,
            Err(e) => {
                error!(gid = %gallery.gid, timeout = e.is_timeout(), "Cost gate failed: {e:?}");
                return Resolution::failed(None);
            },
        };

        if cost > 0 && !self.enable_gp_cost {
            return Resolution { msg: ResolveMessage::Rejected, require_gp: Some(cost), d_url: None };
        }

        let d_url = match self.site.download_url(gallery).await {
            Ok(url) => url,
            Err(e) => {
                error!(gid = %gallery.gid, timeout = e.is_timeout(), "Download URL query failed: {e:?}");
                return Resolution::failed(Some(cost));
            },
        };

        // Best effort: the outcome is already decided.
        if let Err(e) = self.site.invalidate_sessions(gallery).await {
            warn!(gid = %gallery.gid, "Session invalidation ignored: {e}");
        }

        Resolution { msg: ResolveMessage::Success, require_gp: Some(cost), d_url }
    }

    /// Revokes the download sessions of the gallery named in a raw `/destroy` body.
    pub async fn destroy(&self, body: &[u8]) -> DestroyReply {
        match self.try_destroy(body).await {
            Ok(gallery) => {
                info!(gid = %gallery.gid, "Download sessions destroyed");
                DestroyReply { msg: ResolveMessage::Success }
            },
            Err(e) => {
                error!("Destroy failed: {e:?}");
                DestroyReply { msg: ResolveMessage::Failed }
            },
        }
    }

    async fn try_destroy(&self, body: &[u8]) -> Result<GalleryRef, ArchiverError> {
        let gallery =
            serde_json::from_slice::<DestroyRequest>(body).context("Decoding destroy request")?.gallery();

        let status = self.site.invalidate_sessions(&gallery).await?;
        if !status.is_success() {
            return Err(ArchiverError::Internal {
                message: format!("target site answered {status}").into(),
                context: Some(format!("gid {}", gallery.gid).into()),
            });
        }

        Ok(gallery)
    }
}
