//! Profile drafts: the data accumulated across the creation screens.
//!
//! A draft is never mutated in place by a screen. Each "Next" produces a
//! [`DraftPatch`] that [`merge_draft`] folds into a new draft value, and
//! [`missing_fields`] decides whether the merged draft may move on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::{FormStage, UserType};
use crate::catalog;
use crate::directory::model::{Profile, ProfileKind};

/// Where the profile owner is based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Willing to work remotely / serve outside the city.
    #[serde(default)]
    pub remote: bool,
}

/// A showcased piece of work (or a content sample for influencers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An influencer's account on a social platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandle {
    pub platform: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
}

/// A field the creation forms can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    /// Business type, primary skill, occupation or content niche.
    Primary,
    Categories,
    HourlyRate,
    Services,
    Platforms,
    Country,
    City,
    Bio,
    Availability,
    Portfolio,
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Primary => "primary",
            Self::Categories => "categories",
            Self::HourlyRate => "hourly_rate",
            Self::Services => "services",
            Self::Platforms => "platforms",
            Self::Country => "country",
            Self::City => "city",
            Self::Bio => "bio",
            Self::Availability => "availability",
            Self::Portfolio => "portfolio",
        };
        write!(f, "{s}")
    }
}

/// The in-progress profile for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    /// Bumped on every merge.
    pub version: u32,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<u32>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<SocialHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
}

/// Fields submitted by one screen. `None` leaves the draft's value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub primary: Option<String>,
    pub categories: Option<Vec<String>>,
    pub hourly_rate: Option<u32>,
    pub services: Option<Vec<String>>,
    pub platforms: Option<Vec<SocialHandle>>,
    pub location: Option<Location>,
    pub languages: Option<Vec<String>>,
    pub bio: Option<String>,
    pub availability: Option<String>,
    pub portfolio: Option<Vec<PortfolioItem>>,
    pub founded_year: Option<i32>,
}

impl ProfileDraft {
    /// An empty draft for a freshly selected role.
    pub fn new(user_type: UserType) -> Self {
        Self {
            version: 0,
            user_type,
            name: None,
            primary: None,
            categories: Vec::new(),
            hourly_rate: None,
            services: Vec::new(),
            platforms: Vec::new(),
            location: None,
            languages: Vec::new(),
            bio: None,
            availability: None,
            portfolio: Vec::new(),
            founded_year: None,
        }
    }

    /// Whether every field the role requires is filled.
    pub fn is_complete(&self) -> bool {
        missing_fields(self, FormStage::Preview).is_empty()
    }

    /// Render the draft as the listing it would publish as.
    ///
    /// The listing is keyed by the owning wizard session. Catalog keys
    /// (country codes, category keys) are stored as their display values so
    /// the listing filters the same way as directory rows.
    pub fn to_preview(&self, session_id: Uuid) -> Profile {
        let location = self.location.clone().unwrap_or_default();
        let skills = if self.services.is_empty() {
            self.categories.clone()
        } else {
            self.services.clone()
        };
        let followers = self
            .platforms
            .iter()
            .filter_map(|p| p.followers)
            .reduce(|a, b| a + b);

        Profile {
            id: format!("draft-{session_id}"),
            kind: ProfileKind::from(self.user_type),
            name: self.name.clone().unwrap_or_default(),
            headline: self.primary.clone().unwrap_or_default(),
            category: self
                .categories
                .first()
                .or_else(|| self.services.first())
                .map(|c| catalog::resolve_category(c).to_string())
                .unwrap_or_default(),
            description: self.bio.clone().unwrap_or_default(),
            skills,
            country: catalog::resolve_country(&location.country).to_string(),
            city: location.city,
            hourly_rate: self.hourly_rate,
            rating: 0.0,
            review_count: 0,
            founded_year: self.founded_year,
            verified: false,
            followers,
            languages: self.languages.clone(),
            is_public: true,
        }
    }
}

/// Fold a screen's patch into the draft, producing the next draft.
pub fn merge_draft(prev: &ProfileDraft, patch: &DraftPatch) -> ProfileDraft {
    let mut next = prev.clone();
    next.version = prev.version.saturating_add(1);

    if let Some(ref v) = patch.name {
        next.name = Some(v.clone());
    }
    if let Some(ref v) = patch.primary {
        next.primary = Some(v.clone());
    }
    if let Some(ref v) = patch.categories {
        next.categories = v.clone();
    }
    if let Some(v) = patch.hourly_rate {
        next.hourly_rate = Some(v);
    }
    if let Some(ref v) = patch.services {
        next.services = v.clone();
    }
    if let Some(ref v) = patch.platforms {
        next.platforms = v.clone();
    }
    if let Some(ref v) = patch.location {
        next.location = Some(v.clone());
    }
    if let Some(ref v) = patch.languages {
        next.languages = v.clone();
    }
    if let Some(ref v) = patch.bio {
        next.bio = Some(v.clone());
    }
    if let Some(ref v) = patch.availability {
        next.availability = Some(v.clone());
    }
    if let Some(ref v) = patch.portfolio {
        next.portfolio = v.clone();
    }
    if let Some(v) = patch.founded_year {
        next.founded_year = Some(v);
    }

    next
}

/// Fields a single stage asks for, by role.
pub fn stage_fields(user_type: UserType, stage: FormStage) -> &'static [DraftField] {
    use DraftField::*;
    match (user_type, stage) {
        (UserType::Business, FormStage::Niche) => &[Name, Primary, Categories],
        (UserType::Freelancer, FormStage::Niche) => &[Name, Primary, Categories, HourlyRate],
        (UserType::OccupationProvider, FormStage::Niche) => &[Name, Primary, Services],
        (UserType::SocialMediaInfluencer, FormStage::Niche) => &[Name, Primary, Platforms],
        (_, FormStage::Location) => &[Country, City],
        (UserType::Business, FormStage::Portfolio) => &[Bio],
        (UserType::Freelancer, FormStage::Portfolio) => &[Bio, Portfolio],
        (UserType::OccupationProvider, FormStage::Portfolio) => &[Bio, Availability],
        (UserType::SocialMediaInfluencer, FormStage::Portfolio) => &[Bio, Portfolio],
        (_, FormStage::Preview) => &[],
    }
}

/// Required fields still empty once the draft reaches `stage`.
///
/// Requirements are cumulative: a stage also re-checks everything the
/// earlier stages of the same role asked for.
pub fn missing_fields(draft: &ProfileDraft, stage: FormStage) -> Vec<DraftField> {
    FormStage::SEQUENCE
        .iter()
        .take_while(|s| **s <= stage)
        .flat_map(|s| stage_fields(draft.user_type, *s).iter().copied())
        .filter(|field| !is_filled(draft, *field))
        .collect()
}

fn is_filled(draft: &ProfileDraft, field: DraftField) -> bool {
    fn text(v: &Option<String>) -> bool {
        v.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
    fn any_text(v: &[String]) -> bool {
        v.iter().any(|s| !s.trim().is_empty())
    }

    match field {
        DraftField::Name => text(&draft.name),
        DraftField::Primary => text(&draft.primary),
        DraftField::Categories => any_text(&draft.categories),
        DraftField::HourlyRate => draft.hourly_rate.is_some_and(|r| r > 0),
        DraftField::Services => any_text(&draft.services),
        DraftField::Platforms => draft.platforms.iter().any(|p| !p.handle.trim().is_empty()),
        DraftField::Country => draft
            .location
            .as_ref()
            .is_some_and(|l| !l.country.trim().is_empty()),
        DraftField::City => draft
            .location
            .as_ref()
            .is_some_and(|l| !l.city.trim().is_empty()),
        DraftField::Bio => text(&draft.bio),
        DraftField::Availability => text(&draft.availability),
        DraftField::Portfolio => draft.portfolio.iter().any(|p| !p.title.trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(country: &str, city: &str) -> Location {
        Location {
            country: country.to_string(),
            city: city.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn merge_keeps_unrelated_fields() {
        let draft = ProfileDraft::new(UserType::Freelancer);
        let step1 = merge_draft(
            &draft,
            &DraftPatch {
                name: Some("Sarah Chen".into()),
                primary: Some("Web Development".into()),
                categories: Some(vec!["development".into()]),
                hourly_rate: Some(75),
                ..Default::default()
            },
        );
        let step2 = merge_draft(
            &step1,
            &DraftPatch {
                location: Some(location("CA", "Toronto")),
                ..Default::default()
            },
        );

        assert_eq!(step2.name.as_deref(), Some("Sarah Chen"));
        assert_eq!(step2.primary.as_deref(), Some("Web Development"));
        assert_eq!(step2.hourly_rate, Some(75));
        assert_eq!(step2.location.as_ref().unwrap().city, "Toronto");
        assert_eq!(step2.version, 2);
        // The previous value is untouched
        assert!(step1.location.is_none());
        assert_eq!(step1.version, 1);
    }

    #[test]
    fn empty_patch_only_bumps_version() {
        let draft = ProfileDraft::new(UserType::Business);
        let next = merge_draft(&draft, &DraftPatch::default());
        assert_eq!(next.version, 1);
        assert_eq!(ProfileDraft { version: 0, ..next }, draft);
    }

    #[test]
    fn niche_requirements_per_role() {
        let business = ProfileDraft::new(UserType::Business);
        assert_eq!(
            missing_fields(&business, FormStage::Niche),
            vec![DraftField::Name, DraftField::Primary, DraftField::Categories]
        );

        let freelancer = ProfileDraft::new(UserType::Freelancer);
        assert!(missing_fields(&freelancer, FormStage::Niche).contains(&DraftField::HourlyRate));

        let service = ProfileDraft::new(UserType::OccupationProvider);
        assert!(missing_fields(&service, FormStage::Niche).contains(&DraftField::Services));

        let influencer = ProfileDraft::new(UserType::SocialMediaInfluencer);
        assert!(missing_fields(&influencer, FormStage::Niche).contains(&DraftField::Platforms));
    }

    #[test]
    fn whitespace_does_not_count_as_filled() {
        let draft = merge_draft(
            &ProfileDraft::new(UserType::Business),
            &DraftPatch {
                name: Some("   ".into()),
                primary: Some("Bakery".into()),
                categories: Some(vec!["".into()]),
                ..Default::default()
            },
        );
        assert_eq!(
            missing_fields(&draft, FormStage::Niche),
            vec![DraftField::Name, DraftField::Categories]
        );
    }

    #[test]
    fn requirements_are_cumulative() {
        let draft = merge_draft(
            &ProfileDraft::new(UserType::Business),
            &DraftPatch {
                location: Some(location("US", "Austin")),
                ..Default::default()
            },
        );
        let missing = missing_fields(&draft, FormStage::Location);
        assert!(missing.contains(&DraftField::Name));
        assert!(!missing.contains(&DraftField::City));
    }

    #[test]
    fn zero_rate_is_missing() {
        let draft = merge_draft(
            &ProfileDraft::new(UserType::Freelancer),
            &DraftPatch {
                hourly_rate: Some(0),
                ..Default::default()
            },
        );
        assert!(missing_fields(&draft, FormStage::Niche).contains(&DraftField::HourlyRate));
    }

    #[test]
    fn complete_influencer_preview() {
        let draft = merge_draft(
            &ProfileDraft::new(UserType::SocialMediaInfluencer),
            &DraftPatch {
                name: Some("Lena Park".into()),
                primary: Some("Travel".into()),
                platforms: Some(vec![
                    SocialHandle {
                        platform: "instagram".into(),
                        handle: "@lenatravels".into(),
                        followers: Some(120_000),
                    },
                    SocialHandle {
                        platform: "youtube".into(),
                        handle: "lenatravels".into(),
                        followers: Some(30_000),
                    },
                ]),
                location: Some(location("KR", "Seoul")),
                bio: Some("Slow travel stories".into()),
                portfolio: Some(vec![PortfolioItem {
                    title: "Jeju in winter".into(),
                    description: String::new(),
                    url: None,
                }]),
                ..Default::default()
            },
        );
        assert!(draft.is_complete());

        let session_id = Uuid::new_v4();
        let preview = draft.to_preview(session_id);
        assert_eq!(preview.id, format!("draft-{session_id}"));
        assert_eq!(preview.kind, ProfileKind::SocialMedia);
        assert_eq!(preview.name, "Lena Park");
        assert_eq!(preview.headline, "Travel");
        assert_eq!(preview.country, "South Korea");
        assert_eq!(preview.followers, Some(150_000));
        assert!(preview.is_public);
        assert_ne!(draft.to_preview(Uuid::new_v4()).id, preview.id);
    }

    #[test]
    fn patch_deserializes_partial_json() {
        let patch: DraftPatch = serde_json::from_str(r#"{"name": "Acme", "categories": ["retail"]}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Acme"));
        assert_eq!(patch.categories, Some(vec!["retail".to_string()]));
        assert!(patch.bio.is_none());
    }
}
