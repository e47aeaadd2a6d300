//! Ownership check for course mutations.

use coursebook_core::AppError;
use coursebook_models::UserId;
use tracing::warn;

use crate::metrics::track_authorization_denied;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAction {
    Edit,
    Delete,
}

impl CourseAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseAction::Edit => "edit",
            CourseAction::Delete => "delete",
        }
    }

    fn denial_message(self) -> &'static str {
        match self {
            CourseAction::Edit => "you can edit only your courses",
            CourseAction::Delete => "you can delete only your courses",
        }
    }
}

/// Allows the action only when the caller owns the resource.
pub fn authorize(caller: UserId, owner: UserId, action: CourseAction) -> Result<(), AppError> {
    if caller == owner {
        return Ok(());
    }
    warn!(%caller, %owner, action = action.as_str(), "ownership check failed");
    track_authorization_denied(action.as_str());
    Err(AppError::forbidden(action.denial_message()))
}
