//! Browse feed: loads a listing from the directory and keeps only the
//! newest result.
//!
//! Every load takes a generation number. A load that resolves after a newer
//! one has started is discarded instead of overwriting fresher results, so
//! rapid filter changes cannot race each other. A failed load is kept as a
//! recoverable `Failed` state that [`BrowseFeed::retry`] re-issues.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::directory::model::{Group, Profile, ProfileKind};
use crate::directory::Directory;
use crate::error::DirectoryError;
use crate::wizard::BrowseFilter;

/// What a feed load asks the directory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FeedRequest {
    Profiles { kind: Option<ProfileKind> },
    Groups,
}

impl FeedRequest {
    /// The request the browse screen issues for a wizard browse filter.
    pub fn for_browse_filter(filter: BrowseFilter) -> Self {
        match filter {
            BrowseFilter::Groups => Self::Groups,
            other => Self::Profiles {
                kind: ProfileKind::for_browse_filter(other),
            },
        }
    }

    fn table(&self) -> &'static str {
        match self {
            Self::Profiles { .. } => "user_profiles",
            Self::Groups => "groups",
        }
    }
}

/// Rows returned by a successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum FeedItems {
    Profiles(Vec<Profile>),
    Groups(Vec<Group>),
}

impl FeedItems {
    pub fn len(&self) -> usize {
        match self {
            Self::Profiles(items) => items.len(),
            Self::Groups(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedState {
    #[default]
    Idle,
    Loading {
        request: FeedRequest,
    },
    Loaded {
        request: FeedRequest,
        items: FeedItems,
    },
    /// The load failed; the screen offers a retry instead of an empty list.
    Failed {
        request: FeedRequest,
        message: String,
    },
}

/// Whether a finished load was applied to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load started first; this result was dropped.
    Superseded,
}

pub struct BrowseFeed {
    directory: Arc<dyn Directory>,
    timeout: Duration,
    generation: AtomicU64,
    state: RwLock<FeedState>,
    last_request: RwLock<Option<FeedRequest>>,
}

impl BrowseFeed {
    pub fn new(directory: Arc<dyn Directory>, timeout: Duration) -> Self {
        Self {
            directory,
            timeout,
            generation: AtomicU64::new(0),
            state: RwLock::new(FeedState::Idle),
            last_request: RwLock::new(None),
        }
    }

    pub async fn state(&self) -> FeedState {
        self.state.read().await.clone()
    }

    /// Load `request`, superseding any load still in flight.
    pub async fn load(&self, request: FeedRequest) -> LoadOutcome {
        match self.load_state(request).await {
            Some(_) => LoadOutcome::Applied,
            None => LoadOutcome::Superseded,
        }
    }

    /// Like [`BrowseFeed::load`], but hands back the state this load applied.
    /// `None` when a newer load started before this one finished.
    pub async fn load_state(&self, request: FeedRequest) -> Option<FeedState> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            if self.generation.load(Ordering::SeqCst) == generation {
                *state = FeedState::Loading { request };
            }
        }
        *self.last_request.write().await = Some(request);

        let result = match tokio::time::timeout(self.timeout, self.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(DirectoryError::Timeout {
                table: request.table().to_string(),
                timeout: self.timeout,
            }),
        };

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            warn!(generation, request = ?request, "Dropping superseded browse load");
            return None;
        }

        *state = match result {
            Ok(items) => {
                info!(generation, request = ?request, count = items.len(), "Browse load finished");
                FeedState::Loaded { request, items }
            }
            Err(e) => {
                warn!(generation, request = ?request, error = %e, "Browse load failed");
                FeedState::Failed {
                    request,
                    message: e.to_string(),
                }
            }
        };
        Some(state.clone())
    }

    /// Re-issue the most recent request. `None` if nothing was loaded yet.
    pub async fn retry(&self) -> Option<LoadOutcome> {
        let request = (*self.last_request.read().await)?;
        Some(self.load(request).await)
    }

    /// Re-issue the most recent request and return what it applied. The
    /// outer `None` means nothing was loaded yet, the inner one that a newer
    /// load won.
    pub async fn retry_state(&self) -> Option<Option<FeedState>> {
        let request = (*self.last_request.read().await)?;
        Some(self.load_state(request).await)
    }

    async fn fetch(&self, request: FeedRequest) -> Result<FeedItems, DirectoryError> {
        match request {
            FeedRequest::Profiles { kind } => {
                self.directory.list_profiles(kind).await.map(FeedItems::Profiles)
            }
            FeedRequest::Groups => self.directory.list_groups().await.map(FeedItems::Groups),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;

    use super::*;
    use crate::directory::{fixtures, MemoryDirectory};

    /// Freelancer queries are slow; everything else answers immediately.
    struct SlowFreelancers;

    #[async_trait]
    impl Directory for SlowFreelancers {
        async fn list_profiles(
            &self,
            kind: Option<ProfileKind>,
        ) -> Result<Vec<Profile>, DirectoryError> {
            if kind == Some(ProfileKind::Freelancer) {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            MemoryDirectory::with_fixtures().list_profiles(kind).await
        }

        async fn list_groups(&self) -> Result<Vec<Group>, DirectoryError> {
            Ok(fixtures::groups())
        }
    }

    /// Fails the first call, then succeeds.
    struct Flaky {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Directory for Flaky {
        async fn list_profiles(&self, _kind: Option<ProfileKind>) -> Result<Vec<Profile>, DirectoryError> {
            Ok(Vec::new())
        }

        async fn list_groups(&self) -> Result<Vec<Group>, DirectoryError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(DirectoryError::Status {
                    table: "groups".into(),
                    status: 503,
                    body: "unavailable".into(),
                });
            }
            Ok(fixtures::groups())
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        let feed = BrowseFeed::new(Arc::new(MemoryDirectory::with_fixtures()), Duration::from_secs(1));
        assert_eq!(feed.state().await, FeedState::Idle);
        assert!(feed.retry().await.is_none());
    }

    #[tokio::test]
    async fn loads_profiles() {
        let feed = BrowseFeed::new(Arc::new(MemoryDirectory::with_fixtures()), Duration::from_secs(1));
        let request = FeedRequest::Profiles {
            kind: Some(ProfileKind::Business),
        };
        assert_eq!(feed.load(request).await, LoadOutcome::Applied);

        match feed.state().await {
            FeedState::Loaded {
                request: loaded,
                items: FeedItems::Profiles(items),
            } => {
                assert_eq!(loaded, request);
                assert!(items.iter().all(|p| p.kind == ProfileKind::Business));
            }
            other => panic!("Expected loaded profiles, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn stale_load_does_not_overwrite_newer() {
        let feed = Arc::new(BrowseFeed::new(Arc::new(SlowFreelancers), Duration::from_secs(2)));

        let slow = {
            let feed = Arc::clone(&feed);
            tokio::spawn(async move {
                feed.load(FeedRequest::Profiles {
                    kind: Some(ProfileKind::Freelancer),
                })
                .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast = feed
            .load(FeedRequest::Profiles {
                kind: Some(ProfileKind::Business),
            })
            .await;
        assert_eq!(fast, LoadOutcome::Applied);
        assert_eq!(slow.await.unwrap(), LoadOutcome::Superseded);

        match feed.state().await {
            FeedState::Loaded {
                items: FeedItems::Profiles(items),
                ..
            } => assert!(items.iter().all(|p| p.kind == ProfileKind::Business)),
            other => panic!("Expected business listings, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_is_recoverable() {
        let feed = BrowseFeed::new(
            Arc::new(Flaky {
                calls: AtomicUsize::new(0),
            }),
            Duration::from_secs(1),
        );

        assert_eq!(feed.load(FeedRequest::Groups).await, LoadOutcome::Applied);
        match feed.state().await {
            FeedState::Failed { message, .. } => assert!(message.contains("503")),
            other => panic!("Expected failure, got {other:?}"),
        }

        assert_eq!(feed.retry().await, Some(LoadOutcome::Applied));
        match feed.state().await {
            FeedState::Loaded { items, .. } => assert!(!items.is_empty()),
            other => panic!("Expected loaded groups, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let feed = BrowseFeed::new(Arc::new(SlowFreelancers), Duration::from_millis(50));
        feed.load(FeedRequest::Profiles {
            kind: Some(ProfileKind::Freelancer),
        })
        .await;
        match feed.state().await {
            FeedState::Failed { message, .. } => assert!(message.contains("timed out")),
            other => panic!("Expected timeout, got {other:?}"),
        }
    }
}
