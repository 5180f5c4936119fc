//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports the domain crate and provides config loading
//! plus the HTTP plumbing every slice router is wrapped in.
//!
//! ## Config loading
//! ```rust,ignore
//! use relay_kernel::config::load_config;
//! use relay_kernel::domain::config::RelayConfig;
//!
//! let cfg: RelayConfig = load_config(None::<&str>).unwrap();
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use relay_domain as domain;
