//! Profile-creation / browsing wizard.
//!
//! The wizard is a closed set of [`Step`]s driven by screen events. The
//! [`WizardDispatcher`] owns the current step, the chosen role and action,
//! and the [`ProfileDraft`] accumulated across the creation forms. Each role
//! walks a fixed sequence (niche → location → portfolio → preview) before
//! publishing lands on the dashboard.

pub mod dispatcher;
pub mod draft;
pub mod manager;
pub mod routes;
pub mod step;

pub use dispatcher::{WizardDispatcher, WizardEvent, WizardSnapshot};
pub use draft::{merge_draft, missing_fields, DraftField, DraftPatch, ProfileDraft};
pub use manager::WizardManager;
pub use routes::{wizard_routes, WizardRouteState};
pub use step::{BrowseFilter, FormStage, Step, UserAction, UserType};
