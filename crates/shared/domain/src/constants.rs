//! Wire strings shared by the relay and its consumers.
//!
//! The localized values are compared verbatim by existing bot deployments, so they must not change.

pub const SYSTEM_TAG: &str = "System";
pub const ARCHIVE_TAG: &str = "Archive";

pub const MSG_SUCCESS: &str = "Success";
pub const MSG_REJECTED: &str = "Rejected";
pub const MSG_FAILED: &str = "Failed";
/// "Resolution failed".
pub const MSG_RESOLUTION_FAILED: &str = "解析失败";

/// "Normal".
pub const PROBE_NORMAL: &str = "正常";
/// "No free quota".
pub const PROBE_NO_FREE_QUOTA: &str = "无免费额度";
/// "Scraping is broken".
pub const PROBE_BROKEN: &str = "解析功能异常";

pub const NOT_FOUND: &str = "Not Found";
