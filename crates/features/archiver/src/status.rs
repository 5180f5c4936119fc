use crate::Archiver;
use crate::models::{ProbeState, StatusSnapshot};
use tracing::{debug, error};

impl Archiver {
    /// Probes the canary gallery and reports whether scraping still works.
    ///
    /// Never fails and never caches: every call hits the target site.
    pub async fn status(&self) -> StatusSnapshot {
        let msg = match self.site.cost(&self.canary).await {
            Ok(0) => ProbeState::Normal,
            Ok(cost) => {
                debug!(gid = %self.canary.gid, cost, "Canary is not free");
                ProbeState::NoFreeQuota
            },
            Err(e) => {
                error!(gid = %self.canary.gid, timeout = e.is_timeout(), "Status probe failed: {e:?}");
                ProbeState::Broken
            },
        };

        StatusSnapshot { msg, enable_gp_cost: self.enable_gp_cost }
    }
}
