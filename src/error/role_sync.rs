use serenity::http::HttpError;
use serenity::model::ModelError;
use thiserror::Error;

/// Discord JSON error code for "Missing Access".
const MISSING_ACCESS: isize = 50001;
/// Discord JSON error code for "Missing Permissions".
const MISSING_PERMISSIONS: isize = 50013;

/// Failure while reading roles or writing a member's role set.
///
/// Splits terminal failures from ones that might succeed on a later attempt. No retry
/// is performed by the reconciler; callers log both kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleSyncError {
    /// The bot lacks the permission or hierarchy position for the operation.
    #[error("Missing permission to update roles: {0}")]
    PermissionDenied(String),

    /// Any other failure (network, rate limit, missing cache data).
    #[error("Role synchronization failed: {0}")]
    Transient(String),
}

/// Classifies Serenity errors into permission and transient failures.
///
/// HTTP 403, Discord codes 50001/50013 and Serenity's local hierarchy and permission
/// checks count as `PermissionDenied`.
impl From<serenity::Error> for RoleSyncError {
    fn from(err: serenity::Error) -> Self {
        if is_permission_error(&err) {
            RoleSyncError::PermissionDenied(err.to_string())
        } else {
            RoleSyncError::Transient(err.to_string())
        }
    }
}

/// Returns true when the error means the bot is not allowed to perform the action.
pub fn is_permission_error(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            response.status_code.as_u16() == 403
                || matches!(response.error.code, MISSING_ACCESS | MISSING_PERMISSIONS)
        }
        serenity::Error::Model(ModelError::Hierarchy)
        | serenity::Error::Model(ModelError::InvalidPermissions { .. }) => true,
        _ => false,
    }
}
