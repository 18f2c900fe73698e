//! Host-side plumbing around the case view functions.
//!
//! The view functions in `casedocs-views` are pure and per-document. This
//! crate supplies the pieces a host wraps them in:
//! - [`ViewIndex`]: an in-memory, sorted materialisation of a map view,
//!   queryable by exact key or by `(kind, domain)` prefix
//! - [`ChangeListener`]: consumes a change stream through a change filter,
//!   tracking the last seen sequence number
//! - [`CaseAccess`]: checks a fetched case against the configured domain
//!   and deleted-case policy
//! - [`IndexConfig`]: TOML configuration for the above
//!
//! Nothing here is durable or shared across threads; callers own the state.

mod access;
mod change;
mod config;
mod error;
mod view_index;

pub use access::CaseAccess;
pub use change::{Change, ChangeListener};
pub use config::{IndexConfig, LookupConfig};
pub use error::{AccessError, ConfigError, IndexError, IndexResult};
pub use view_index::{ViewIndex, ViewRow};
