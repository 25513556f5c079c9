//! Browse screens: listing and group filters, and the feed that loads them.

pub mod feed;
pub mod filter;
pub mod groups;
pub mod routes;

pub use feed::{BrowseFeed, FeedItems, FeedRequest, FeedState, LoadOutcome};
pub use filter::{ListingFilter, PriceBracket, SortKey};
pub use groups::{GroupFilter, GroupSort};
pub use routes::{browse_routes, BrowseRouteState};
