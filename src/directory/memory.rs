//! In-memory directory over a fixed dataset.

use async_trait::async_trait;

use super::model::{Group, Profile, ProfileKind};
use super::{fixtures, Directory};
use crate::error::DirectoryError;

/// Fixture-backed directory. Private rows are kept but never returned.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    profiles: Vec<Profile>,
    groups: Vec<Group>,
}

impl MemoryDirectory {
    pub fn new(profiles: Vec<Profile>, groups: Vec<Group>) -> Self {
        Self { profiles, groups }
    }

    /// The built-in sample dataset.
    pub fn with_fixtures() -> Self {
        Self::new(fixtures::profiles(), fixtures::groups())
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn list_profiles(&self, kind: Option<ProfileKind>) -> Result<Vec<Profile>, DirectoryError> {
        Ok(self
            .profiles
            .iter()
            .filter(|p| p.is_public)
            .filter(|p| kind.is_none_or(|k| p.kind == k))
            .cloned()
            .collect())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, DirectoryError> {
        Ok(self.groups.iter().filter(|g| g.is_public).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn filters_by_kind_and_visibility() {
        let directory = MemoryDirectory::with_fixtures();

        let freelancers = directory
            .list_profiles(Some(ProfileKind::Freelancer))
            .await
            .unwrap();
        assert!(!freelancers.is_empty());
        assert!(freelancers.iter().all(|p| p.kind == ProfileKind::Freelancer));
        assert!(freelancers.iter().all(|p| p.is_public));
        assert!(!freelancers.iter().any(|p| p.id == "fl-hidden"));

        let all = directory.list_profiles(None).await.unwrap();
        assert!(all.len() > freelancers.len());
    }

    #[tokio::test]
    async fn private_groups_hidden() {
        let directory = MemoryDirectory::with_fixtures();
        let groups = directory.list_groups().await.unwrap();
        assert!(!groups.is_empty());
        assert!(!groups.iter().any(|g| g.id == "grp-private-board"));
    }

    #[tokio::test]
    async fn empty_directory() {
        let directory = MemoryDirectory::default();
        assert!(directory.list_profiles(None).await.unwrap().is_empty());
        assert!(directory.list_groups().await.unwrap().is_empty());
    }
}
