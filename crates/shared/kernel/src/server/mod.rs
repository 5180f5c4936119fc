//! HTTP plumbing shared by every slice router.

pub mod response;
pub mod router;
