//! Listing and group data models shared by the browse screens and backends.

use serde::{Deserialize, Serialize};

use crate::wizard::step::{BrowseFilter, UserType};

/// Which marketplace a profile is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Business,
    Freelancer,
    LocalService,
    SocialMedia,
}

impl ProfileKind {
    /// Column value used by the `user_profiles.user_type` backend column.
    pub fn as_user_type(&self) -> UserType {
        match self {
            Self::Business => UserType::Business,
            Self::Freelancer => UserType::Freelancer,
            Self::LocalService => UserType::OccupationProvider,
            Self::SocialMedia => UserType::SocialMediaInfluencer,
        }
    }

    /// The listing kind a browse filter shows; `None` for groups.
    pub fn for_browse_filter(filter: BrowseFilter) -> Option<ProfileKind> {
        match filter {
            BrowseFilter::Businesses => Some(Self::Business),
            BrowseFilter::Freelancers => Some(Self::Freelancer),
            BrowseFilter::LocalServices => Some(Self::LocalService),
            BrowseFilter::SocialMedia => Some(Self::SocialMedia),
            BrowseFilter::Groups => None,
        }
    }
}

impl From<UserType> for ProfileKind {
    fn from(user_type: UserType) -> Self {
        match user_type {
            UserType::Business => Self::Business,
            UserType::Freelancer => Self::Freelancer,
            UserType::OccupationProvider => Self::LocalService,
            UserType::SocialMediaInfluencer => Self::SocialMedia,
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Business => write!(f, "business"),
            Self::Freelancer => write!(f, "freelancer"),
            Self::LocalService => write!(f, "local_service"),
            Self::SocialMedia => write!(f, "social_media"),
        }
    }
}

impl std::str::FromStr for ProfileKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "business" | "businesses" => Ok(Self::Business),
            "freelancer" | "freelancers" => Ok(Self::Freelancer),
            "local_service" | "local_services" | "occupation_provider" => Ok(Self::LocalService),
            "social_media" | "social_media_influencer" => Ok(Self::SocialMedia),
            _ => Err(format!("Unknown profile kind: {}", s)),
        }
    }
}

/// A public listing: business, freelancer, local service or influencer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub kind: ProfileKind,
    pub name: String,
    /// Business type, primary skill, occupation or content niche.
    pub headline: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub country: String,
    #[serde(default)]
    pub city: String,
    /// Hourly rate in whole US dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<u32>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub is_public: bool,
}

/// Visibility breadth of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupScope {
    Local,
    Regional,
    Global,
}

impl std::fmt::Display for GroupScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Regional => write!(f, "regional"),
            Self::Global => write!(f, "global"),
        }
    }
}

impl std::str::FromStr for GroupScope {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "regional" => Ok(Self::Regional),
            "global" => Ok(Self::Global),
            _ => Err(format!("Unknown group scope: {}", s)),
        }
    }
}

/// A topic/location-scoped community. Read-only from this layer; member
/// counts are not adjusted by join actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub scope: GroupScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub member_count: u32,
    pub is_public: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_user_type() {
        for user_type in UserType::ALL {
            assert_eq!(ProfileKind::from(user_type).as_user_type(), user_type);
        }
    }

    #[test]
    fn kind_parses_browse_and_role_names() {
        assert_eq!("freelancers".parse::<ProfileKind>().unwrap(), ProfileKind::Freelancer);
        assert_eq!(
            "occupation_provider".parse::<ProfileKind>().unwrap(),
            ProfileKind::LocalService
        );
        assert!("groups".parse::<ProfileKind>().is_err());
    }

    #[test]
    fn groups_filter_has_no_profile_kind() {
        assert_eq!(ProfileKind::for_browse_filter(BrowseFilter::Groups), None);
        assert_eq!(
            ProfileKind::for_browse_filter(BrowseFilter::SocialMedia),
            Some(ProfileKind::SocialMedia)
        );
    }

    #[test]
    fn group_scope_serde() {
        let scope: GroupScope = serde_json::from_str("\"regional\"").unwrap();
        assert_eq!(scope, GroupScope::Regional);
        assert_eq!("global".parse::<GroupScope>().unwrap(), GroupScope::Global);
    }
}
