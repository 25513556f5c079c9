//! Wizard steps, roles and actions: the closed vocabulary of the dispatcher.

use serde::{Deserialize, Serialize};

/// The role a user registers as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Business,
    Freelancer,
    OccupationProvider,
    SocialMediaInfluencer,
}

impl UserType {
    pub const ALL: [UserType; 4] = [
        Self::Business,
        Self::Freelancer,
        Self::OccupationProvider,
        Self::SocialMediaInfluencer,
    ];

    /// The browse category a "view" action opens for this role.
    pub fn browse_filter(&self) -> BrowseFilter {
        match self {
            Self::Business => BrowseFilter::Businesses,
            Self::Freelancer => BrowseFilter::Freelancers,
            Self::OccupationProvider => BrowseFilter::LocalServices,
            Self::SocialMediaInfluencer => BrowseFilter::SocialMedia,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Business => "business",
            Self::Freelancer => "freelancer",
            Self::OccupationProvider => "occupation_provider",
            Self::SocialMediaInfluencer => "social_media_influencer",
        };
        write!(f, "{s}")
    }
}

/// What the user wants to do with the chosen role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    Create,
    Join,
    View,
}

impl std::fmt::Display for UserAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Join => write!(f, "join"),
            Self::View => write!(f, "view"),
        }
    }
}

/// Preset category selected before entering the browse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowseFilter {
    Businesses,
    Freelancers,
    Groups,
    SocialMedia,
    LocalServices,
}

impl std::fmt::Display for BrowseFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Businesses => write!(f, "businesses"),
            Self::Freelancers => write!(f, "freelancers"),
            Self::Groups => write!(f, "groups"),
            Self::SocialMedia => write!(f, "social_media"),
            Self::LocalServices => write!(f, "local_services"),
        }
    }
}

/// Position inside a role's fixed profile-creation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStage {
    /// Niche / gig / service selection / social profile.
    Niche,
    Location,
    /// Portfolio, or content for influencers.
    Portfolio,
    Preview,
}

impl FormStage {
    pub const SEQUENCE: [FormStage; 4] = [
        Self::Niche,
        Self::Location,
        Self::Portfolio,
        Self::Preview,
    ];

    pub fn next(&self) -> Option<FormStage> {
        match self {
            Self::Niche => Some(Self::Location),
            Self::Location => Some(Self::Portfolio),
            Self::Portfolio => Some(Self::Preview),
            Self::Preview => None,
        }
    }

    pub fn previous(&self) -> Option<FormStage> {
        match self {
            Self::Niche => None,
            Self::Location => Some(Self::Niche),
            Self::Portfolio => Some(Self::Location),
            Self::Preview => Some(Self::Portfolio),
        }
    }
}

/// A named screen of the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    #[default]
    Welcome,
    UserType,
    Browse,
    Groups,
    BusinessNiche,
    BusinessLocation,
    BusinessPortfolio,
    BusinessPreview,
    FreelancerGig,
    FreelancerLocation,
    FreelancerPortfolio,
    FreelancerPreview,
    ServiceSelection,
    ServiceLocation,
    ServicePortfolio,
    ServicePreview,
    SocialMediaProfile,
    SocialMediaLocation,
    SocialMediaContent,
    SocialMediaPreview,
    Dashboard,
}

impl Step {
    pub const ALL: [Step; 21] = [
        Self::Welcome,
        Self::UserType,
        Self::Browse,
        Self::Groups,
        Self::BusinessNiche,
        Self::BusinessLocation,
        Self::BusinessPortfolio,
        Self::BusinessPreview,
        Self::FreelancerGig,
        Self::FreelancerLocation,
        Self::FreelancerPortfolio,
        Self::FreelancerPreview,
        Self::ServiceSelection,
        Self::ServiceLocation,
        Self::ServicePortfolio,
        Self::ServicePreview,
        Self::SocialMediaProfile,
        Self::SocialMediaLocation,
        Self::SocialMediaContent,
        Self::SocialMediaPreview,
        Self::Dashboard,
    ];

    /// The form step for a role at a given stage.
    pub fn form(user_type: UserType, stage: FormStage) -> Step {
        use FormStage::*;
        match (user_type, stage) {
            (UserType::Business, Niche) => Self::BusinessNiche,
            (UserType::Business, Location) => Self::BusinessLocation,
            (UserType::Business, Portfolio) => Self::BusinessPortfolio,
            (UserType::Business, Preview) => Self::BusinessPreview,
            (UserType::Freelancer, Niche) => Self::FreelancerGig,
            (UserType::Freelancer, Location) => Self::FreelancerLocation,
            (UserType::Freelancer, Portfolio) => Self::FreelancerPortfolio,
            (UserType::Freelancer, Preview) => Self::FreelancerPreview,
            (UserType::OccupationProvider, Niche) => Self::ServiceSelection,
            (UserType::OccupationProvider, Location) => Self::ServiceLocation,
            (UserType::OccupationProvider, Portfolio) => Self::ServicePortfolio,
            (UserType::OccupationProvider, Preview) => Self::ServicePreview,
            (UserType::SocialMediaInfluencer, Niche) => Self::SocialMediaProfile,
            (UserType::SocialMediaInfluencer, Location) => Self::SocialMediaLocation,
            (UserType::SocialMediaInfluencer, Portfolio) => Self::SocialMediaContent,
            (UserType::SocialMediaInfluencer, Preview) => Self::SocialMediaPreview,
        }
    }

    /// Inverse of [`Step::form`]: `None` for steps outside a creation sequence.
    pub fn form_position(&self) -> Option<(UserType, FormStage)> {
        use FormStage::*;
        let position = match self {
            Self::BusinessNiche => (UserType::Business, Niche),
            Self::BusinessLocation => (UserType::Business, Location),
            Self::BusinessPortfolio => (UserType::Business, Portfolio),
            Self::BusinessPreview => (UserType::Business, Preview),
            Self::FreelancerGig => (UserType::Freelancer, Niche),
            Self::FreelancerLocation => (UserType::Freelancer, Location),
            Self::FreelancerPortfolio => (UserType::Freelancer, Portfolio),
            Self::FreelancerPreview => (UserType::Freelancer, Preview),
            Self::ServiceSelection => (UserType::OccupationProvider, Niche),
            Self::ServiceLocation => (UserType::OccupationProvider, Location),
            Self::ServicePortfolio => (UserType::OccupationProvider, Portfolio),
            Self::ServicePreview => (UserType::OccupationProvider, Preview),
            Self::SocialMediaProfile => (UserType::SocialMediaInfluencer, Niche),
            Self::SocialMediaLocation => (UserType::SocialMediaInfluencer, Location),
            Self::SocialMediaContent => (UserType::SocialMediaInfluencer, Portfolio),
            Self::SocialMediaPreview => (UserType::SocialMediaInfluencer, Preview),
            Self::Welcome | Self::UserType | Self::Browse | Self::Groups | Self::Dashboard => {
                return None;
            }
        };
        Some(position)
    }

    /// The hardcoded logical predecessor used by "Back".
    pub fn back_target(&self) -> Option<Step> {
        match self {
            Self::Welcome | Self::Dashboard => None,
            Self::UserType => Some(Self::Welcome),
            Self::Browse | Self::Groups => Some(Self::UserType),
            other => {
                let (user_type, stage) = other.form_position()?;
                Some(match stage.previous() {
                    Some(prev) => Step::form(user_type, prev),
                    None => Self::UserType,
                })
            }
        }
    }

    /// Whether this step ends the wizard.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    pub fn is_preview(&self) -> bool {
        matches!(self.form_position(), Some((_, FormStage::Preview)))
    }
}


impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::UserType => "user-type",
            Self::Browse => "browse",
            Self::Groups => "groups",
            Self::BusinessNiche => "business-niche",
            Self::BusinessLocation => "business-location",
            Self::BusinessPortfolio => "business-portfolio",
            Self::BusinessPreview => "business-preview",
            Self::FreelancerGig => "freelancer-gig",
            Self::FreelancerLocation => "freelancer-location",
            Self::FreelancerPortfolio => "freelancer-portfolio",
            Self::FreelancerPreview => "freelancer-preview",
            Self::ServiceSelection => "service-selection",
            Self::ServiceLocation => "service-location",
            Self::ServicePortfolio => "service-portfolio",
            Self::ServicePreview => "service-preview",
            Self::SocialMediaProfile => "social-media-profile",
            Self::SocialMediaLocation => "social-media-location",
            Self::SocialMediaContent => "social-media-content",
            Self::SocialMediaPreview => "social-media-preview",
            Self::Dashboard => "dashboard",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_opens_on_welcome() {
        assert_eq!(Step::default(), Step::Welcome);
    }

    #[test]
    fn display_matches_serde() {
        for step in Step::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "Display and serde should match for {step:?}");
        }
        for user_type in UserType::ALL {
            let json = serde_json::to_string(&user_type).unwrap();
            assert_eq!(format!("\"{user_type}\""), json);
        }
    }

    #[test]
    fn form_and_position_are_inverse() {
        for user_type in UserType::ALL {
            for stage in FormStage::SEQUENCE {
                let step = Step::form(user_type, stage);
                assert_eq!(step.form_position(), Some((user_type, stage)));
            }
        }
        assert!(Step::Welcome.form_position().is_none());
        assert!(Step::Dashboard.form_position().is_none());
    }

    #[test]
    fn every_step_is_reachable_from_welcome_by_back() {
        for step in Step::ALL {
            if step.is_terminal() {
                assert!(step.back_target().is_none());
                continue;
            }
            let mut current = step;
            let mut hops = 0;
            while let Some(prev) = current.back_target() {
                current = prev;
                hops += 1;
                assert!(hops < Step::ALL.len(), "Back loop from {step}");
            }
            assert_eq!(current, Step::Welcome, "{step} should unwind to welcome");
        }
    }

    #[test]
    fn back_targets_follow_sequence() {
        assert_eq!(Step::FreelancerGig.back_target(), Some(Step::UserType));
        assert_eq!(Step::FreelancerLocation.back_target(), Some(Step::FreelancerGig));
        assert_eq!(Step::SocialMediaPreview.back_target(), Some(Step::SocialMediaContent));
        assert_eq!(Step::Browse.back_target(), Some(Step::UserType));
        assert_eq!(Step::Groups.back_target(), Some(Step::UserType));
    }

    #[test]
    fn browse_filter_per_role() {
        assert_eq!(UserType::Business.browse_filter(), BrowseFilter::Businesses);
        assert_eq!(UserType::Freelancer.browse_filter(), BrowseFilter::Freelancers);
        assert_eq!(UserType::OccupationProvider.browse_filter(), BrowseFilter::LocalServices);
        assert_eq!(UserType::SocialMediaInfluencer.browse_filter(), BrowseFilter::SocialMedia);
    }

    #[test]
    fn preview_steps() {
        let previews: Vec<Step> = Step::ALL.into_iter().filter(|s| s.is_preview()).collect();
        assert_eq!(
            previews,
            vec![
                Step::BusinessPreview,
                Step::FreelancerPreview,
                Step::ServicePreview,
                Step::SocialMediaPreview
            ]
        );
    }
}
