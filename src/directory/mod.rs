//! Directory: read-only access to public profiles and groups.
//!
//! Browse screens depend only on the [`Directory`] trait. Two backends are
//! provided: [`MemoryDirectory`] over the built-in fixtures, and
//! [`SupabaseDirectory`] over a hosted PostgREST project.

pub mod fixtures;
pub mod memory;
pub mod model;
pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AppConfig, DirectoryBackend};
use crate::error::{ConfigError, DirectoryError};

pub use memory::MemoryDirectory;
pub use model::{Group, GroupScope, Profile, ProfileKind};
pub use supabase::SupabaseDirectory;

/// Backend-agnostic source of listings.
///
/// Implementations return publicly visible rows only; fine-grained
/// filtering and sorting happen in [`crate::browse`].
#[async_trait]
pub trait Directory: Send + Sync {
    /// Public profiles, optionally restricted to one marketplace.
    async fn list_profiles(&self, kind: Option<ProfileKind>) -> Result<Vec<Profile>, DirectoryError>;

    /// Public groups.
    async fn list_groups(&self) -> Result<Vec<Group>, DirectoryError>;
}

/// Build the directory selected by the configuration.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn Directory>, ConfigError> {
    match config.backend {
        DirectoryBackend::Memory => Ok(Arc::new(MemoryDirectory::with_fixtures())),
        DirectoryBackend::Supabase => {
            let supabase = config
                .supabase
                .clone()
                .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_URL".to_string()))?;
            let directory = SupabaseDirectory::new(supabase, config.request_timeout).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "SUPABASE_URL".to_string(),
                    message: e.to_string(),
                }
            })?;
            Ok(Arc::new(directory))
        }
    }
}
