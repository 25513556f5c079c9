//! Sample listings used by the in-memory directory and tests.

use super::model::{Group, GroupScope, Profile, ProfileKind};

#[allow(clippy::too_many_arguments)]
fn profile(
    id: &str,
    kind: ProfileKind,
    name: &str,
    headline: &str,
    category: &str,
    description: &str,
    skills: &[&str],
    country: &str,
    city: &str,
    hourly_rate: Option<u32>,
    rating: f32,
    review_count: u32,
) -> Profile {
    Profile {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        headline: headline.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        country: country.to_string(),
        city: city.to_string(),
        hourly_rate,
        rating,
        review_count,
        founded_year: None,
        verified: false,
        followers: None,
        languages: vec!["English".to_string()],
        is_public: true,
    }
}

/// Every sample profile, public and private.
pub fn profiles() -> Vec<Profile> {
    use ProfileKind::*;

    vec![
        // Freelancers
        Profile {
            verified: true,
            languages: vec!["English".into(), "Mandarin".into()],
            ..profile(
                "fl-sarah-chen",
                Freelancer,
                "Sarah Chen",
                "Full-Stack Web Developer",
                "Web Development",
                "React and Node.js applications for startups and agencies.",
                &["React", "Node.js", "TypeScript", "PostgreSQL"],
                "Canada",
                "Toronto",
                Some(75),
                4.9,
                127,
            )
        },
        profile(
            "fl-marcus-johnson",
            Freelancer,
            "Marcus Johnson",
            "Brand & Graphic Designer",
            "Graphic Design",
            "Logos, brand identities and marketing collateral.",
            &["Illustrator", "Photoshop", "Branding"],
            "United States",
            "Atlanta",
            Some(45),
            4.7,
            89,
        ),
        Profile {
            verified: true,
            languages: vec!["Spanish".into(), "English".into()],
            ..profile(
                "fl-elena-rodriguez",
                Freelancer,
                "Elena Rodriguez",
                "Content Writer & Copywriter",
                "Writing & Translation",
                "SEO articles, product copy and Spanish translation.",
                &["Copywriting", "SEO", "Translation"],
                "Spain",
                "Madrid",
                Some(35),
                4.8,
                203,
            )
        },
        profile(
            "fl-arjun-patel",
            Freelancer,
            "Arjun Patel",
            "Mobile App Developer",
            "Mobile Development",
            "Native iOS and cross-platform Flutter apps.",
            &["Swift", "Flutter", "Firebase"],
            "India",
            "Bengaluru",
            Some(120),
            4.6,
            54,
        ),
        Profile {
            is_public: false,
            ..profile(
                "fl-hidden",
                Freelancer,
                "Private Freelancer",
                "Data Analyst",
                "Data Science",
                "Not listed publicly.",
                &["Python"],
                "Canada",
                "Vancouver",
                Some(60),
                4.2,
                3,
            )
        },
        // Businesses
        Profile {
            founded_year: Some(2015),
            verified: true,
            ..profile(
                "biz-green-leaf",
                Business,
                "Green Leaf Cafe",
                "Organic Cafe",
                "Food & Beverage",
                "Farm-to-table breakfast and specialty coffee.",
                &["Catering", "Coffee"],
                "United States",
                "Portland",
                None,
                4.6,
                312,
            )
        },
        Profile {
            founded_year: Some(2019),
            ..profile(
                "biz-techflow",
                Business,
                "TechFlow Solutions",
                "IT Consulting",
                "Technology",
                "Cloud migration and managed IT for small businesses.",
                &["Cloud", "Cybersecurity"],
                "Canada",
                "Toronto",
                None,
                4.8,
                76,
            )
        },
        Profile {
            founded_year: Some(2008),
            verified: true,
            ..profile(
                "biz-urban-threads",
                Business,
                "Urban Threads",
                "Clothing Boutique",
                "Retail",
                "Independent fashion labels and tailoring.",
                &["Tailoring", "Fashion"],
                "United Kingdom",
                "London",
                None,
                4.3,
                158,
            )
        },
        // Local services
        profile(
            "svc-diego-alvarez",
            LocalService,
            "Diego Alvarez",
            "Licensed Plumber",
            "Plumbing",
            "Emergency repairs, water heaters and remodels.",
            &["Leak repair", "Water heaters", "Drain cleaning"],
            "United States",
            "Austin",
            Some(65),
            4.9,
            241,
        ),
        Profile {
            verified: true,
            ..profile(
                "svc-bright-spark",
                LocalService,
                "Bright Spark Electric",
                "Electrician",
                "Electrical",
                "Residential wiring, panel upgrades and EV chargers.",
                &["Wiring", "Panel upgrades", "EV chargers"],
                "Canada",
                "Calgary",
                Some(85),
                4.7,
                98,
            )
        },
        profile(
            "svc-fresh-home",
            LocalService,
            "Fresh Home Cleaning",
            "House Cleaner",
            "Cleaning",
            "Weekly and move-out cleaning.",
            &["Deep cleaning", "Move-out cleaning"],
            "United States",
            "Denver",
            Some(30),
            4.5,
            187,
        ),
        // Social media
        Profile {
            followers: Some(245_000),
            verified: true,
            ..profile(
                "sm-lena-park",
                SocialMedia,
                "Lena Park",
                "Travel Creator",
                "Travel",
                "Slow travel stories and city guides.",
                &["Instagram", "YouTube"],
                "South Korea",
                "Seoul",
                None,
                4.8,
                64,
            )
        },
        Profile {
            followers: Some(82_000),
            ..profile(
                "sm-jake-fit",
                SocialMedia,
                "Jake Thompson",
                "Fitness Coach",
                "Health & Fitness",
                "Home workouts and nutrition tips.",
                &["TikTok", "Instagram"],
                "Australia",
                "Sydney",
                None,
                4.4,
                31,
            )
        },
        Profile {
            followers: Some(510_000),
            verified: true,
            ..profile(
                "sm-amara-obi",
                SocialMedia,
                "Amara Obi",
                "Beauty & Lifestyle",
                "Beauty",
                "Skincare reviews and lifestyle vlogs.",
                &["YouTube", "Instagram", "TikTok"],
                "Nigeria",
                "Lagos",
                None,
                4.9,
                112,
            )
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn group(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    scope: GroupScope,
    location: Option<&str>,
    member_count: u32,
    is_public: bool,
) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        scope,
        location: location.map(str::to_string),
        member_count,
        is_public,
        verified: false,
        trending: false,
        premium: false,
    }
}

/// Every sample group, public and private.
pub fn groups() -> Vec<Group> {
    use GroupScope::*;

    vec![
        Group {
            verified: true,
            trending: true,
            ..group(
                "grp-toronto-tech",
                "Toronto Tech Founders",
                "Monthly meetups for early-stage founders in the GTA.",
                "Technology",
                Local,
                Some("Toronto"),
                1_240,
                true,
            )
        },
        group(
            "grp-freelance-designers",
            "Freelance Designers Network",
            "Portfolio reviews, pricing advice and client leads.",
            "Design",
            Global,
            None,
            8_930,
            true,
        ),
        Group {
            premium: true,
            ..group(
                "grp-pnw-small-biz",
                "Pacific Northwest Small Business",
                "Owners sharing suppliers, hiring tips and events.",
                "Business",
                Regional,
                Some("Pacific Northwest"),
                3_410,
                true,
            )
        },
        Group {
            trending: true,
            ..group(
                "grp-creator-collab",
                "Creator Collabs",
                "Find brand deals and collaborators across platforms.",
                "Social Media",
                Global,
                None,
                15_200,
                true,
            )
        },
        group(
            "grp-austin-trades",
            "Austin Trades & Home Services",
            "Plumbers, electricians and cleaners referring work.",
            "Local Services",
            Local,
            Some("Austin"),
            640,
            true,
        ),
        group(
            "grp-private-board",
            "Advisory Board",
            "Invite-only.",
            "Business",
            Global,
            None,
            12,
            false,
        ),
    ]
}
