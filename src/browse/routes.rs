//! REST endpoints for the listing and group browse screens.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::feed::{BrowseFeed, FeedItems, FeedRequest, FeedState};
use super::filter::{ListingFilter, PriceBracket, SortKey};
use super::groups::{GroupFilter, GroupSort};
use crate::directory::model::{Group, GroupScope, Profile, ProfileKind};
use crate::directory::Directory;
use crate::wizard::WizardManager;

/// Shared state for browse routes.
#[derive(Clone)]
pub struct BrowseRouteState {
    pub directory: Arc<dyn Directory>,
    pub request_timeout: Duration,
    /// Wizard sessions; a `session` query parameter loads through that
    /// session's feed.
    pub sessions: Arc<WizardManager>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    session: Option<Uuid>,
    kind: Option<String>,
    q: Option<String>,
    category: Option<String>,
    country: Option<String>,
    price: Option<String>,
    verified: Option<bool>,
    sort: Option<String>,
}

impl ListingParams {
    fn parse(self) -> Result<(Option<ProfileKind>, ListingFilter), String> {
        let kind = self
            .kind
            .as_deref()
            .map(str::parse::<ProfileKind>)
            .transpose()?;
        let price = self
            .price
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<PriceBracket>)
            .transpose()?;
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();
        Ok((
            kind,
            ListingFilter {
                search: self.q,
                category: self.category,
                country: self.country,
                price,
                verified_only: self.verified.unwrap_or(false),
                sort,
            },
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
struct GroupParams {
    session: Option<Uuid>,
    q: Option<String>,
    category: Option<String>,
    scope: Option<String>,
    location: Option<String>,
    sort: Option<String>,
}

impl GroupParams {
    fn parse(self) -> Result<GroupFilter, String> {
        let scope = self
            .scope
            .as_deref()
            .map(str::parse::<GroupScope>)
            .transpose()?;
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<GroupSort>)
            .transpose()?
            .unwrap_or_default();
        Ok(GroupFilter {
            search: self.q,
            category: self.category,
            scope,
            location: self.location,
            sort,
        })
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn json_error(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

/// Load through the session's feed when one is named, otherwise through a
/// fresh feed. Timeouts and backend failures come back as a retryable 502
/// rather than an empty list; a load overtaken by a newer one on the same
/// session answers 409.
async fn load(
    state: &BrowseRouteState,
    session: Option<Uuid>,
    request: FeedRequest,
) -> Result<FeedItems, Response> {
    let feed = match session {
        Some(id) => state.sessions.feed(id).await.map_err(|e| {
            json_error(StatusCode::NOT_FOUND, serde_json::json!({ "error": e.to_string() }))
        })?,
        None => Arc::new(BrowseFeed::new(
            Arc::clone(&state.directory),
            state.request_timeout,
        )),
    };

    match feed.load_state(request).await {
        Some(FeedState::Loaded { items, .. }) => Ok(items),
        Some(FeedState::Failed { message, .. }) => Err(json_error(
            StatusCode::BAD_GATEWAY,
            serde_json::json!({ "error": message, "retryable": true }),
        )),
        None => Err(json_error(
            StatusCode::CONFLICT,
            serde_json::json!({ "error": "Superseded by a newer load", "superseded": true }),
        )),
        Some(other) => Err(internal_error(format!("Unexpected feed state: {other:?}"))),
    }
}

fn internal_error(message: String) -> Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({ "error": message }),
    )
}

/// Rows of the wrong kind mean the feed broke, not the request.
fn profile_rows(items: FeedItems) -> Result<Vec<Profile>, Response> {
    match items {
        FeedItems::Profiles(rows) => Ok(rows),
        FeedItems::Groups(_) => Err(internal_error(
            "Profile load returned group rows".to_string(),
        )),
    }
}

fn group_rows(items: FeedItems) -> Result<Vec<Group>, Response> {
    match items {
        FeedItems::Groups(rows) => Ok(rows),
        FeedItems::Profiles(_) => Err(internal_error(
            "Group load returned profile rows".to_string(),
        )),
    }
}

/// GET /api/listings
async fn list_listings(
    State(state): State<BrowseRouteState>,
    Query(params): Query<ListingParams>,
) -> Response {
    let session = params.session;
    let (kind, filter) = match params.parse() {
        Ok(parsed) => parsed,
        Err(e) => return bad_request(e),
    };

    let source = match load(&state, session, FeedRequest::Profiles { kind })
        .await
        .and_then(profile_rows)
    {
        Ok(source) => source,
        Err(resp) => return resp,
    };
    let listings = filter.apply(&source);
    Json(serde_json::json!({
        "total": source.len(),
        "count": listings.len(),
        "listings": listings,
    }))
    .into_response()
}

/// GET /api/groups
async fn list_groups(
    State(state): State<BrowseRouteState>,
    Query(params): Query<GroupParams>,
) -> Response {
    let session = params.session;
    let filter = match params.parse() {
        Ok(filter) => filter,
        Err(e) => return bad_request(e),
    };

    let source = match load(&state, session, FeedRequest::Groups)
        .await
        .and_then(group_rows)
    {
        Ok(source) => source,
        Err(resp) => return resp,
    };
    let groups = filter.apply(&source);
    Json(serde_json::json!({
        "total": source.len(),
        "count": groups.len(),
        "groups": groups,
    }))
    .into_response()
}

/// Build the browse REST routes.
pub fn browse_routes(state: BrowseRouteState) -> Router {
    Router::new()
        .route("/api/listings", get(list_listings))
        .route("/api/groups", get(list_groups))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::directory::MemoryDirectory;

    fn app() -> (Router, Arc<WizardManager>) {
        let directory: Arc<dyn Directory> = Arc::new(MemoryDirectory::with_fixtures());
        let sessions = Arc::new(WizardManager::new(directory.clone(), Duration::from_secs(2)));
        let router = browse_routes(BrowseRouteState {
            directory,
            request_timeout: Duration::from_secs(2),
            sessions: sessions.clone(),
        });
        (router, sessions)
    }

    #[tokio::test]
    async fn session_listing_loads_through_session_feed() {
        let (app, sessions) = app();
        let (id, _) = sessions.create().await;

        let response = app
            .oneshot(
                Request::get(format!("/api/listings?session={id}&kind=business"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let feed = sessions.feed(id).await.unwrap();
        assert!(matches!(
            feed.state().await,
            FeedState::Loaded {
                request: FeedRequest::Profiles {
                    kind: Some(ProfileKind::Business)
                },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unknown_session_listing_is_404() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::get(format!("/api/groups?session={}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn mismatched_rows_are_server_errors() {
        let err = profile_rows(FeedItems::Groups(Vec::new())).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = group_rows(FeedItems::Profiles(Vec::new())).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(group_rows(FeedItems::Groups(Vec::new())).is_ok());
    }

    #[test]
    fn listing_params_parse() {
        let params = ListingParams {
            kind: Some("freelancers".into()),
            price: Some("50-75".into()),
            sort: Some("rating".into()),
            verified: Some(true),
            ..Default::default()
        };
        let (kind, filter) = params.parse().unwrap();
        assert_eq!(kind, Some(ProfileKind::Freelancer));
        assert_eq!(filter.price.unwrap().max, Some(75));
        assert_eq!(filter.sort, SortKey::Rating);
        assert!(filter.verified_only);
    }

    #[test]
    fn invalid_params_rejected() {
        let params = ListingParams {
            price: Some("lots".into()),
            ..Default::default()
        };
        assert!(params.parse().is_err());

        let params = GroupParams {
            scope: Some("galactic".into()),
            ..Default::default()
        };
        assert!(params.parse().is_err());
    }
}
