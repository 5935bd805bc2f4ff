//! Repository detection from the local Git checkout.
//!
//! When `--repository` is not given, the slug comes from `GH_REPO` or from
//! the remotes of the checkout containing the current directory.
//!
//! ```no_run
//! use std::path::Path;
//! use gong::local::discover_repository;
//!
//! let local = discover_repository(Path::new(".")).expect("inside a checkout");
//! assert!(local.slug().contains('/'));
//! ```

mod discovery;
mod error;
mod remote;

pub use discovery::{
    LocalRepository, REPOSITORY_OVERRIDE_VAR, current_repository, discover_repository,
};
pub use error::LocalDiscoveryError;
pub use remote::{RemoteSlug, parse_remote_url};

#[cfg(test)]
mod tests;
