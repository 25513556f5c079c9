//! Listing filters and sort orders for the profile browse screens.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::directory::model::Profile;

/// An hourly-rate bracket, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBracket {
    pub min: u32,
    /// `None` for open-ended brackets such as `100+`.
    pub max: Option<u32>,
}

impl PriceBracket {
    pub fn contains(&self, rate: u32) -> bool {
        rate >= self.min && self.max.is_none_or(|max| rate <= max)
    }
}

impl std::str::FromStr for PriceBracket {
    type Err = String;

    /// Parses `"50-75"` or `"100+"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(min) = s.strip_suffix('+') {
            let min = min
                .trim()
                .parse()
                .map_err(|_| format!("Invalid price bracket: {}", s))?;
            return Ok(Self { min, max: None });
        }
        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid price bracket: {}", s))?;
        let min: u32 = min
            .trim()
            .parse()
            .map_err(|_| format!("Invalid price bracket: {}", s))?;
        let max: u32 = max
            .trim()
            .parse()
            .map_err(|_| format!("Invalid price bracket: {}", s))?;
        if max < min {
            return Err(format!("Invalid price bracket: {}", s));
        }
        Ok(Self {
            min,
            max: Some(max),
        })
    }
}

impl std::fmt::Display for PriceBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}+", self.min),
        }
    }
}

/// Sort orders offered by the listing screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep source order.
    #[default]
    Default,
    /// Highest rating first.
    Rating,
    /// Alphabetical.
    Name,
    /// Most recently founded first.
    Newest,
    /// Most reviewed first.
    Reviews,
    /// Verified listings first.
    Verified,
    PriceLow,
    PriceHigh,
}

impl std::str::FromStr for SortKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" | "relevance" => Ok(Self::Default),
            "rating" => Ok(Self::Rating),
            "name" => Ok(Self::Name),
            "newest" | "founded" => Ok(Self::Newest),
            "reviews" => Ok(Self::Reviews),
            "verified" => Ok(Self::Verified),
            "price_low" => Ok(Self::PriceLow),
            "price_high" => Ok(Self::PriceHigh),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Filter state of a listing screen. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub price: Option<PriceBracket>,
    pub verified_only: bool,
    pub sort: SortKey,
}

impl ListingFilter {
    /// Whether a profile passes every active predicate.
    pub fn matches(&self, profile: &Profile) -> bool {
        if let Some(term) = active(&self.search) {
            let term = term.to_lowercase();
            let hit = profile.name.to_lowercase().contains(&term)
                || profile.headline.to_lowercase().contains(&term)
                || profile.description.to_lowercase().contains(&term)
                || profile
                    .skills
                    .iter()
                    .any(|s| s.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        if let Some(category) = active(&self.category) {
            if !profile.category.eq_ignore_ascii_case(catalog::resolve_category(category)) {
                return false;
            }
        }

        if let Some(country) = active(&self.country) {
            if !profile.country.eq_ignore_ascii_case(catalog::resolve_country(country)) {
                return false;
            }
        }

        if let Some(bracket) = self.price {
            // Listings without a rate never fall inside a bracket
            if !profile.hourly_rate.is_some_and(|r| bracket.contains(r)) {
                return false;
            }
        }

        if self.verified_only && !profile.verified {
            return false;
        }

        true
    }

    /// Derive the view list: matching profiles in sort order.
    pub fn apply(&self, source: &[Profile]) -> Vec<Profile> {
        let mut view: Vec<Profile> = source.iter().filter(|p| self.matches(p)).cloned().collect();
        sort_profiles(&mut view, self.sort);
        view
    }
}

/// Stable sort; ties keep their source order.
pub fn sort_profiles(profiles: &mut [Profile], key: SortKey) {
    match key {
        SortKey::Default => {}
        SortKey::Rating => profiles.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Name => profiles.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortKey::Newest => profiles.sort_by(|a, b| descending_some_first(a.founded_year, b.founded_year)),
        SortKey::Reviews => profiles.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        SortKey::Verified => profiles.sort_by(|a, b| b.verified.cmp(&a.verified)),
        SortKey::PriceLow => profiles.sort_by(|a, b| match (a.hourly_rate, b.hourly_rate) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::PriceHigh => {
            profiles.sort_by(|a, b| descending_some_first(a.hourly_rate, b.hourly_rate))
        }
    }
}

/// Larger values first, missing values last.
fn descending_some_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A text field that is set and not blank.
pub(crate) fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
