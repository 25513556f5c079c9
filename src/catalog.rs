//! Static reference tables used by the creation forms and filters.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// A skill category with its common skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2.
    pub code: &'static str,
    pub name: &'static str,
}

/// A keyed label: business categories, service categories, platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: &'static str,
    pub label: &'static str,
}

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        key: "development",
        label: "Web Development",
        skills: &["React", "Node.js", "TypeScript", "Python", "PostgreSQL"],
    },
    SkillCategory {
        key: "mobile",
        label: "Mobile Development",
        skills: &["Swift", "Kotlin", "Flutter", "React Native"],
    },
    SkillCategory {
        key: "design",
        label: "Graphic Design",
        skills: &["Illustrator", "Photoshop", "Figma", "Branding"],
    },
    SkillCategory {
        key: "writing",
        label: "Writing & Translation",
        skills: &["Copywriting", "SEO", "Translation", "Editing"],
    },
    SkillCategory {
        key: "marketing",
        label: "Digital Marketing",
        skills: &["Social Ads", "Email Marketing", "Analytics"],
    },
    SkillCategory {
        key: "data",
        label: "Data Science",
        skills: &["Python", "SQL", "Machine Learning", "Visualization"],
    },
    SkillCategory {
        key: "video",
        label: "Video & Animation",
        skills: &["Premiere Pro", "After Effects", "Motion Graphics"],
    },
];

pub const COUNTRIES: &[Country] = &[
    Country { code: "AU", name: "Australia" },
    Country { code: "BR", name: "Brazil" },
    Country { code: "CA", name: "Canada" },
    Country { code: "DE", name: "Germany" },
    Country { code: "ES", name: "Spain" },
    Country { code: "FR", name: "France" },
    Country { code: "GB", name: "United Kingdom" },
    Country { code: "IN", name: "India" },
    Country { code: "JP", name: "Japan" },
    Country { code: "KR", name: "South Korea" },
    Country { code: "MX", name: "Mexico" },
    Country { code: "NG", name: "Nigeria" },
    Country { code: "US", name: "United States" },
];

pub const BUSINESS_CATEGORIES: &[Entry] = &[
    Entry { key: "food_beverage", label: "Food & Beverage" },
    Entry { key: "technology", label: "Technology" },
    Entry { key: "retail", label: "Retail" },
    Entry { key: "health", label: "Health & Wellness" },
    Entry { key: "professional_services", label: "Professional Services" },
    Entry { key: "real_estate", label: "Real Estate" },
    Entry { key: "education", label: "Education" },
];

pub const SERVICE_CATEGORIES: &[Entry] = &[
    Entry { key: "plumbing", label: "Plumbing" },
    Entry { key: "electrical", label: "Electrical" },
    Entry { key: "cleaning", label: "Cleaning" },
    Entry { key: "landscaping", label: "Landscaping" },
    Entry { key: "moving", label: "Moving" },
    Entry { key: "handyman", label: "Handyman" },
    Entry { key: "tutoring", label: "Tutoring" },
];

pub const SOCIAL_PLATFORMS: &[Entry] = &[
    Entry { key: "instagram", label: "Instagram" },
    Entry { key: "tiktok", label: "TikTok" },
    Entry { key: "youtube", label: "YouTube" },
    Entry { key: "x", label: "X" },
    Entry { key: "linkedin", label: "LinkedIn" },
    Entry { key: "twitch", label: "Twitch" },
];

pub fn skill_category(key: &str) -> Option<&'static SkillCategory> {
    SKILL_CATEGORIES.iter().find(|c| c.key == key)
}

/// Look up a country by ISO code (case-insensitive).
pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn business_category(key: &str) -> Option<&'static Entry> {
    BUSINESS_CATEGORIES.iter().find(|e| e.key == key)
}

pub fn service_category(key: &str) -> Option<&'static Entry> {
    SERVICE_CATEGORIES.iter().find(|e| e.key == key)
}

pub fn social_platform(key: &str) -> Option<&'static Entry> {
    SOCIAL_PLATFORMS.iter().find(|e| e.key == key)
}

/// Display name for a country given as an ISO code. Anything else (already
/// a name, or unknown) comes back unchanged.
pub fn resolve_country(value: &str) -> &str {
    country(value.trim()).map(|c| c.name).unwrap_or(value)
}

/// Display label for a skill, business or service category key. Labels and
/// unknown values come back unchanged.
pub fn resolve_category(value: &str) -> &str {
    let key = value.trim();
    skill_category(key)
        .map(|c| c.label)
        .or_else(|| business_category(key).map(|e| e.label))
        .or_else(|| service_category(key).map(|e| e.label))
        .unwrap_or(value)
}

/// GET /api/catalog/{table}
async fn get_table(Path(table): Path<String>) -> Response {
    let body = match table.as_str() {
        "skill-categories" => serde_json::to_value(SKILL_CATEGORIES),
        "countries" => serde_json::to_value(COUNTRIES),
        "business-categories" => serde_json::to_value(BUSINESS_CATEGORIES),
        "service-categories" => serde_json::to_value(SERVICE_CATEGORIES),
        "social-platforms" => serde_json::to_value(SOCIAL_PLATFORMS),
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": format!("Unknown catalog: {}", table) })),
            )
                .into_response();
        }
    };
    match body {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Build the catalog REST routes.
pub fn catalog_routes() -> Router {
    Router::new().route("/api/catalog/{table}", get(get_table))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(skill_category("design").unwrap().label, "Graphic Design");
        assert_eq!(country("ca").unwrap().name, "Canada");
        assert_eq!(business_category("retail").unwrap().label, "Retail");
        assert_eq!(service_category("plumbing").unwrap().label, "Plumbing");
        assert_eq!(social_platform("tiktok").unwrap().label, "TikTok");
        assert!(skill_category("astrology").is_none());
        assert!(country("ZZ").is_none());
    }

    #[test]
    fn keys_resolve_to_display_values() {
        assert_eq!(resolve_country("CA"), "Canada");
        assert_eq!(resolve_country("gb"), "United Kingdom");
        assert_eq!(resolve_country("Canada"), "Canada");
        assert_eq!(resolve_category("development"), "Web Development");
        assert_eq!(resolve_category("food_beverage"), "Food & Beverage");
        assert_eq!(resolve_category("plumbing"), "Plumbing");
        assert_eq!(resolve_category("Travel"), "Travel");
    }

    #[test]
    fn keys_are_unique() {
        fn unique<'a>(keys: impl Iterator<Item = &'a str>) -> bool {
            let mut seen = HashSet::new();
            keys.into_iter().all(|k| seen.insert(k))
        }
        assert!(unique(SKILL_CATEGORIES.iter().map(|c| c.key)));
        assert!(unique(COUNTRIES.iter().map(|c| c.code)));
        assert!(unique(BUSINESS_CATEGORIES.iter().map(|e| e.key)));
        assert!(unique(SERVICE_CATEGORIES.iter().map(|e| e.key)));
        assert!(unique(SOCIAL_PLATFORMS.iter().map(|e| e.key)));
    }
}
