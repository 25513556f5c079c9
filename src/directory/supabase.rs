//! Supabase (PostgREST) directory backend.
//!
//! Reads `user_profiles` and `groups` through the REST interface with the
//! project's anonymous key. Only rows flagged `is_public` are requested.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::Directory;
use super::model::{Group, GroupScope, Profile, ProfileKind};
use crate::config::SupabaseConfig;
use crate::error::DirectoryError;

const PROFILES_TABLE: &str = "user_profiles";
const GROUPS_TABLE: &str = "groups";

/// A row of the `user_profiles` table.
#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: String,
    user_type: String,
    display_name: String,
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    skills: Option<Vec<String>>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    hourly_rate: Option<f64>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    review_count: Option<u32>,
    #[serde(default)]
    founded_year: Option<i32>,
    #[serde(default)]
    is_verified: Option<bool>,
    #[serde(default)]
    follower_count: Option<u64>,
    #[serde(default)]
    languages: Option<Vec<String>>,
    #[serde(default)]
    is_public: bool,
}

impl ProfileRow {
    fn into_profile(self) -> Option<Profile> {
        let kind = match self.user_type.parse::<ProfileKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(id = %self.id, error = %e, "Skipping profile with unknown user_type");
                return None;
            }
        };
        Some(Profile {
            id: self.id,
            kind,
            name: self.display_name,
            headline: self.headline.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            description: self.bio.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            hourly_rate: self
                .hourly_rate
                .filter(|r| r.is_finite() && *r >= 0.0)
                .map(|r| r.round() as u32),
            rating: self.rating.unwrap_or_default(),
            review_count: self.review_count.unwrap_or_default(),
            founded_year: self.founded_year,
            verified: self.is_verified.unwrap_or(false),
            followers: self.follower_count,
            languages: self.languages.unwrap_or_default(),
            is_public: self.is_public,
        })
    }
}

/// A row of the `groups` table.
#[derive(Debug, Deserialize)]
struct GroupRow {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    scope: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    member_count: Option<u32>,
    #[serde(default)]
    is_public: bool,
    #[serde(default)]
    is_verified: Option<bool>,
    #[serde(default)]
    is_trending: Option<bool>,
    #[serde(default)]
    is_premium: Option<bool>,
}

impl GroupRow {
    fn into_group(self) -> Option<Group> {
        let scope = match self.scope.parse::<GroupScope>() {
            Ok(scope) => scope,
            Err(e) => {
                warn!(id = %self.id, error = %e, "Skipping group with unknown scope");
                return None;
            }
        };
        Some(Group {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            scope,
            location: self.location,
            member_count: self.member_count.unwrap_or_default(),
            is_public: self.is_public,
            verified: self.is_verified.unwrap_or(false),
            trending: self.is_trending.unwrap_or(false),
            premium: self.is_premium.unwrap_or(false),
        })
    }
}

/// Directory backed by a hosted Supabase project.
pub struct SupabaseDirectory {
    client: reqwest::Client,
    config: SupabaseConfig,
    timeout: Duration,
}

impl SupabaseDirectory {
    pub fn new(config: SupabaseConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config,
            timeout,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    /// GET a table with PostgREST filters and decode the row array.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, DirectoryError> {
        let key = self.config.anon_key.expose_secret();
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        debug!(table, filters = ?filters, "Querying directory backend");

        let resp = self
            .client
            .get(self.table_url(table))
            .header("apikey", key)
            .bearer_auth(key)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.request_error(table, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(table, status = status.as_u16(), "Directory backend returned an error");
            return Err(DirectoryError::Status {
                table: table.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| self.request_error(table, e))?;
        serde_json::from_slice(&bytes).map_err(|e| DirectoryError::Decode {
            table: table.to_string(),
            reason: e.to_string(),
        })
    }

    fn request_error(&self, table: &str, err: reqwest::Error) -> DirectoryError {
        if err.is_timeout() {
            DirectoryError::Timeout {
                table: table.to_string(),
                timeout: self.timeout,
            }
        } else {
            DirectoryError::Request {
                table: table.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl Directory for SupabaseDirectory {
    async fn list_profiles(&self, kind: Option<ProfileKind>) -> Result<Vec<Profile>, DirectoryError> {
        let mut filters = vec![("is_public", "eq.true".to_string())];
        if let Some(kind) = kind {
            filters.push(("user_type", format!("eq.{}", kind.as_user_type())));
        }

        let rows: Vec<ProfileRow> = self.select(PROFILES_TABLE, &filters).await?;
        Ok(rows
            .into_iter()
            .filter_map(ProfileRow::into_profile)
            .filter(|p| p.is_public)
            .collect())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, DirectoryError> {
        let filters = [("is_public", "eq.true".to_string())];
        let rows: Vec<GroupRow> = self.select(GROUPS_TABLE, &filters).await?;
        Ok(rows
            .into_iter()
            .filter_map(GroupRow::into_group)
            .filter(|g| g.is_public)
            .collect())
    }
}
