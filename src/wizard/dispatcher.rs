//! Step dispatcher: owns the current step, role selection and draft, and
//! decides where each screen event leads.
//!
//! Transitions only follow the edges coded in [`WizardDispatcher::dispatch`].
//! A rejected event returns a [`WizardError`] and leaves the dispatcher
//! exactly as it was, the equivalent of a disabled "Next" button.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::draft::{merge_draft, missing_fields, DraftField, DraftPatch, ProfileDraft};
use super::step::{BrowseFilter, FormStage, Step, UserAction, UserType};
use crate::directory::model::Profile;
use crate::error::WizardError;

/// A user action reported by the active screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    /// "Get started" on the welcome screen.
    Start,
    /// Role and action picked on the user-type screen.
    SelectRole {
        user_type: UserType,
        action: UserAction,
    },
    /// "Next" on a creation form.
    Submit {
        #[serde(default)]
        patch: DraftPatch,
    },
    /// "Publish" on a preview screen.
    Publish,
    Back,
    /// Switch tabs while browsing.
    SetBrowseFilter { filter: BrowseFilter },
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::SelectRole { .. } => "select_role",
            Self::Submit { .. } => "submit",
            Self::Publish => "publish",
            Self::Back => "back",
            Self::SetBrowseFilter { .. } => "set_browse_filter",
        }
    }
}

/// Serializable view of the dispatcher for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub step: Step,
    pub user_type: Option<UserType>,
    pub action: Option<UserAction>,
    pub browse_filter: Option<BrowseFilter>,
    pub draft: Option<ProfileDraft>,
    /// Fields still blocking "Next"/"Publish" on the current step.
    pub missing: Vec<DraftField>,
    /// How the draft will look once listed (preview steps only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Profile>,
    /// The listing produced by "Publish".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<Profile>,
}

/// Finite-state dispatcher for one wizard run.
#[derive(Debug, Clone)]
pub struct WizardDispatcher {
    /// Session the run belongs to; keys the published listing.
    id: Uuid,
    step: Step,
    user_type: Option<UserType>,
    action: Option<UserAction>,
    browse_filter: Option<BrowseFilter>,
    draft: Option<ProfileDraft>,
    published: Option<Profile>,
}

impl Default for WizardDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardDispatcher {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// A dispatcher on the welcome step for session `id`.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            step: Step::Welcome,
            user_type: None,
            action: None,
            browse_filter: None,
            draft: None,
            published: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.user_type
    }

    pub fn action(&self) -> Option<UserAction> {
        self.action
    }

    pub fn browse_filter(&self) -> Option<BrowseFilter> {
        self.browse_filter
    }

    pub fn draft(&self) -> Option<&ProfileDraft> {
        self.draft.as_ref()
    }

    pub fn published(&self) -> Option<&Profile> {
        self.published.as_ref()
    }

    /// Apply an event. Returns the new step, or the reason it was refused.
    pub fn dispatch(&mut self, event: WizardEvent) -> Result<Step, WizardError> {
        let step = self.step;
        let not_allowed = || WizardError::NotAllowed {
            step,
            event: event.name().to_string(),
        };

        match (&event, step) {
            (WizardEvent::Start, Step::Welcome) => {
                self.step = Step::UserType;
            }

            (WizardEvent::SelectRole { user_type, action }, Step::UserType) => {
                let (user_type, action) = (*user_type, *action);
                self.user_type = Some(user_type);
                self.action = Some(action);
                match action {
                    UserAction::View => {
                        self.browse_filter = Some(user_type.browse_filter());
                        self.step = Step::Browse;
                    }
                    UserAction::Join => {
                        self.browse_filter = Some(BrowseFilter::Groups);
                        self.step = Step::Groups;
                    }
                    UserAction::Create => {
                        // Coming back to the same role keeps what was typed.
                        if self.draft.as_ref().map(|d| d.user_type) != Some(user_type) {
                            self.draft = Some(ProfileDraft::new(user_type));
                        }
                        self.browse_filter = None;
                        self.step = Step::form(user_type, FormStage::Niche);
                    }
                }
            }

            (WizardEvent::SetBrowseFilter { filter }, Step::Browse) => {
                self.browse_filter = Some(*filter);
            }

            (WizardEvent::Submit { patch }, _) => {
                let (user_type, stage) = step.form_position().ok_or_else(not_allowed)?;
                let next_stage = stage.next().ok_or_else(not_allowed)?;
                let draft = self.draft.as_ref().ok_or_else(not_allowed)?;

                let merged = merge_draft(draft, patch);
                let missing = missing_fields(&merged, stage);
                if !missing.is_empty() {
                    return Err(WizardError::Incomplete { step, missing });
                }

                self.draft = Some(merged);
                self.step = Step::form(user_type, next_stage);
            }

            (WizardEvent::Publish, _) if step.is_preview() => {
                let draft = self.draft.as_ref().ok_or_else(not_allowed)?;
                let missing = missing_fields(draft, FormStage::Preview);
                if !missing.is_empty() {
                    return Err(WizardError::Incomplete { step, missing });
                }

                self.published = Some(draft.to_preview(self.id));
                self.step = Step::Dashboard;
            }

            (WizardEvent::Back, _) => {
                let target = step.back_target().ok_or_else(not_allowed)?;
                match step {
                    Step::Browse | Step::Groups => self.browse_filter = None,
                    Step::UserType => {
                        self.user_type = None;
                        self.action = None;
                    }
                    _ => {}
                }
                self.step = target;
            }

            _ => return Err(not_allowed()),
        }

        Ok(self.step)
    }

    /// Whether "Next" would be enabled for this patch on the current step.
    /// Nothing is applied.
    pub fn can_submit(&self, patch: &DraftPatch) -> Result<(), WizardError> {
        self.clone()
            .dispatch(WizardEvent::Submit {
                patch: patch.clone(),
            })
            .map(|_| ())
    }

    /// Fields the current draft still lacks for the current step.
    pub fn missing(&self) -> Vec<DraftField> {
        match (self.step.form_position(), self.draft.as_ref()) {
            (Some((_, stage)), Some(draft)) => missing_fields(draft, stage),
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let preview = if self.step.is_preview() {
            self.draft.as_ref().map(|d| d.to_preview(self.id))
        } else {
            None
        };

        WizardSnapshot {
            step: self.step,
            user_type: self.user_type,
            action: self.action,
            browse_filter: self.browse_filter,
            draft: self.draft.clone(),
            missing: self.missing(),
            preview,
            published: self.published.clone(),
        }
    }
}
