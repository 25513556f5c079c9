//! WizardManager: keeps one dispatcher and one browse feed per wizard
//! session.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use super::dispatcher::{WizardDispatcher, WizardEvent, WizardSnapshot};
use super::step::Step;
use crate::browse::{BrowseFeed, FeedRequest};
use crate::directory::Directory;
use crate::error::WizardError;

/// How often the idle sweep runs.
const SWEEP_INTERVAL_SECS: u64 = 60;

struct Session {
    wizard: WizardDispatcher,
    /// Lives as long as the session so overlapping loads can supersede
    /// each other and a failed load can be retried.
    feed: Arc<BrowseFeed>,
    touched: Instant,
}

impl Session {
    fn touch(&mut self) {
        self.touched = Instant::now();
    }
}

/// In-memory registry of wizard sessions. Nothing is persisted; sessions go
/// away on [`WizardManager::remove`] or after sitting idle past the sweep
/// limit.
pub struct WizardManager {
    sessions: RwLock<HashMap<Uuid, Session>>,
    directory: Arc<dyn Directory>,
    request_timeout: Duration,
}

impl WizardManager {
    pub fn new(directory: Arc<dyn Directory>, request_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            directory,
            request_timeout,
        }
    }

    /// Open a session on the welcome step.
    pub async fn create(&self) -> (Uuid, WizardSnapshot) {
        let id = Uuid::new_v4();
        let wizard = WizardDispatcher::with_id(id);
        let snapshot = wizard.snapshot();
        let session = Session {
            wizard,
            feed: Arc::new(BrowseFeed::new(self.directory.clone(), self.request_timeout)),
            touched: Instant::now(),
        };
        self.sessions.write().await.insert(id, session);
        info!(session_id = %id, "Wizard session created");
        (id, snapshot)
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<WizardSnapshot, WizardError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(WizardError::SessionNotFound { id })?;
        session.touch();
        Ok(session.wizard.snapshot())
    }

    /// Feed a screen event to the session's dispatcher.
    ///
    /// Landing on a browse screen, or switching its tab, starts a load on
    /// the session's feed in the background.
    pub async fn apply(&self, id: Uuid, event: WizardEvent) -> Result<WizardSnapshot, WizardError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(WizardError::SessionNotFound { id })?;
        session.touch();

        let wizard = &mut session.wizard;
        let from = wizard.step();
        let before = browse_request(wizard);
        let event_name = event.name();
        match wizard.dispatch(event) {
            Ok(to) => {
                info!(session_id = %id, %from, %to, event = event_name, "Wizard transition");
                let snapshot = wizard.snapshot();
                if let Some(request) = browse_request(wizard).filter(|r| before != Some(*r)) {
                    let feed = session.feed.clone();
                    tokio::spawn(async move {
                        feed.load(request).await;
                    });
                }
                Ok(snapshot)
            }
            Err(e) => {
                debug!(session_id = %id, step = %from, event = event_name, error = %e, "Wizard event rejected");
                Err(e)
            }
        }
    }

    /// The session's browse feed.
    pub async fn feed(&self, id: Uuid) -> Result<Arc<BrowseFeed>, WizardError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(WizardError::SessionNotFound { id })?;
        session.touch();
        Ok(session.feed.clone())
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Wizard session removed");
        }
        removed
    }

    /// Drop every session untouched for longer than `max_idle`. Returns how
    /// many were dropped.
    pub async fn expire_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.touched.elapsed() <= max_idle);
        let expired_count = before - sessions.len();
        if expired_count > 0 {
            info!(count = expired_count, "Expired idle wizard sessions");
        }
        expired_count
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// The feed request a browse step shows, if the wizard is on one.
fn browse_request(wizard: &WizardDispatcher) -> Option<FeedRequest> {
    match wizard.step() {
        Step::Browse => wizard.browse_filter().map(FeedRequest::for_browse_filter),
        Step::Groups => Some(FeedRequest::Groups),
        _ => None,
    }
}

/// Spawn the background loop that drops idle sessions.
pub fn spawn_expiry_loop(manager: Arc<WizardManager>, max_idle: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Session expiry loop started (interval: {}s, idle limit: {}s)",
            SWEEP_INTERVAL_SECS,
            max_idle.as_secs()
        );
        let mut tick = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            tick.tick().await;
            manager.expire_idle(max_idle).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::browse::{FeedItems, FeedState};
    use crate::directory::{fixtures, Group, MemoryDirectory, Profile, ProfileKind};
    use crate::error::DirectoryError;
    use crate::wizard::step::{BrowseFilter, UserAction, UserType};

    fn manager() -> WizardManager {
        WizardManager::new(Arc::new(MemoryDirectory::with_fixtures()), Duration::from_secs(2))
    }

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

    async fn settled(feed: &BrowseFeed) -> FeedState {
        for _ in 0..100 {
            match feed.state().await {
                FeedState::Idle | FeedState::Loading { .. } => {
                    tokio::time::sleep(Duration::from_millis(10)).await
                }
                state => return state,
            }
        }
        feed.state().await
    }

    #[tokio::test]
    async fn create_and_apply() {
        let manager = manager();
        assert!(manager.is_empty().await);

        let (id, snapshot) = manager.create().await;
        assert_eq!(snapshot.step, Step::Welcome);
        assert_eq!(manager.len().await, 1);

        manager.apply(id, WizardEvent::Start).await.unwrap();
        let snapshot = manager
            .apply(
                id,
                WizardEvent::SelectRole {
                    user_type: UserType::Freelancer,
                    action: UserAction::View,
                },
            )
            .await
            .unwrap();
        assert_eq!(snapshot.step, Step::Browse);
        assert_eq!(snapshot.browse_filter, Some(BrowseFilter::Freelancers));
        assert_eq!(manager.snapshot(id).await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn rejected_event_keeps_session_state() {
        let manager = manager();
        let (id, _) = manager.create().await;

        let err = manager.apply(id, WizardEvent::Publish).await.unwrap_err();
        assert!(matches!(err, WizardError::NotAllowed { .. }));
        assert_eq!(manager.snapshot(id).await.unwrap().step, Step::Welcome);
    }

    #[tokio::test]
    async fn unknown_session() {
        let manager = manager();
        let id = Uuid::new_v4();
        assert_eq!(
            manager.snapshot(id).await.unwrap_err(),
            WizardError::SessionNotFound { id }
        );
        assert!(manager.apply(id, WizardEvent::Start).await.is_err());
        assert!(manager.feed(id).await.is_err());
        assert!(!manager.remove(id).await);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let manager = manager();
        let (a, _) = manager.create().await;
        let (b, _) = manager.create().await;

        manager.apply(a, WizardEvent::Start).await.unwrap();
        assert_eq!(manager.snapshot(a).await.unwrap().step, Step::UserType);
        assert_eq!(manager.snapshot(b).await.unwrap().step, Step::Welcome);

        assert!(manager.remove(a).await);
        assert_eq!(manager.len().await, 1);
        assert!(manager.snapshot(a).await.is_err());
    }

    #[tokio::test]
    async fn tab_switch_outlives_slow_first_load() {
        let manager = WizardManager::new(Arc::new(SlowFreelancers), Duration::from_secs(2));
        let (id, _) = manager.create().await;
        manager.apply(id, WizardEvent::Start).await.unwrap();
        manager
            .apply(
                id,
                WizardEvent::SelectRole {
                    user_type: UserType::Freelancer,
                    action: UserAction::View,
                },
            )
            .await
            .unwrap();
        let feed = manager.feed(id).await.unwrap();
        while feed.state().await == FeedState::Idle {
            tokio::task::yield_now().await;
        }
        manager
            .apply(
                id,
                WizardEvent::SetBrowseFilter {
                    filter: BrowseFilter::Businesses,
                },
            )
            .await
            .unwrap();

        let state = settled(&feed).await;
        let FeedState::Loaded { request, items } = state else {
            panic!("feed did not load: {state:?}");
        };
        assert_eq!(
            request,
            FeedRequest::Profiles {
                kind: Some(ProfileKind::Business)
            }
        );

        // Let the slow freelancer load finish; it must not replace the tab.
        tokio::time::sleep(Duration::from_millis(300)).await;
        let FeedState::Loaded { items: after, .. } = feed.state().await else {
            panic!("feed left the loaded state");
        };
        assert_eq!(after, items);
        let FeedItems::Profiles(profiles) = after else {
            panic!("expected profiles");
        };
        assert!(profiles.iter().all(|p| p.kind == ProfileKind::Business));
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let manager = manager();
        let (stale, _) = manager.create().await;
        let (active, _) = manager.create().await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        manager.snapshot(active).await.unwrap();

        assert_eq!(manager.expire_idle(Duration::from_millis(40)).await, 1);
        assert!(manager.snapshot(stale).await.is_err());
        assert!(manager.snapshot(active).await.is_ok());
        assert_eq!(manager.expire_idle(Duration::from_secs(60)).await, 0);
    }
}
