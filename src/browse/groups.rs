//! Group list filters.

use serde::{Deserialize, Serialize};

use super::filter::active;
use crate::directory::model::{Group, GroupScope};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSort {
    #[default]
    Default,
    /// Largest first.
    Members,
    Name,
    /// Trending groups first.
    Trending,
}

impl std::str::FromStr for GroupSort {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(Self::Default),
            "members" | "popular" => Ok(Self::Members),
            "name" => Ok(Self::Name),
            "trending" => Ok(Self::Trending),
            _ => Err(format!("Unknown group sort: {}", s)),
        }
    }
}

/// Filter state of the group list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub scope: Option<GroupScope>,
    pub location: Option<String>,
    pub sort: GroupSort,
}

impl GroupFilter {
    pub fn matches(&self, group: &Group) -> bool {
        if !group.is_public {
            return false;
        }

        if let Some(term) = active(&self.search) {
            let term = term.to_lowercase();
            if !group.name.to_lowercase().contains(&term)
                && !group.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        if let Some(category) = active(&self.category) {
            if !group.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        if let Some(scope) = self.scope {
            if group.scope != scope {
                return false;
            }
        }

        if let Some(location) = active(&self.location) {
            let same = group
                .location
                .as_deref()
                .is_some_and(|l| l.eq_ignore_ascii_case(location));
            if !same {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, source: &[Group]) -> Vec<Group> {
        let mut view: Vec<Group> = source.iter().filter(|g| self.matches(g)).cloned().collect();
        match self.sort {
            GroupSort::Default => {}
            GroupSort::Members => view.sort_by(|a, b| b.member_count.cmp(&a.member_count)),
            GroupSort::Name => view.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            GroupSort::Trending => view.sort_by(|a, b| b.trending.cmp(&a.trending)),
        }
        view
    }
}
