use crate::entities::*;

pub const ANOTHER_RATING_DENIED: &str = "You cannot submit another rating for this recipe";

/// Decide whether a rating may be submitted.
///
/// `already_has_other_active_rating` must only reflect comments
/// *other* than the one being edited.
pub const fn can_submit_rating(
    is_editing_existing_comment: bool,
    already_has_other_active_rating: bool,
    is_current_user_the_comment_author: bool,
    caller_is_admin: bool,
) -> bool {
    if !already_has_other_active_rating {
        return true;
    }
    is_editing_existing_comment && (is_current_user_the_comment_author || caller_is_admin)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingPermission {
    Allowed,
    Denied,
}

impl RatingPermission {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Message for the user if the rating control is withheld.
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Allowed => None,
            Self::Denied => Some(ANOTHER_RATING_DENIED),
        }
    }
}

/// Whether the rating control should be offered to the caller.
///
/// Re-rating a comment that already carries a rating is reserved
/// for its author and for admins. Adding a rating to an unrated
/// comment while editing it counts as a fresh rating.
pub fn rating_permission(
    identity: &Identity,
    editing: Option<&Comment>,
    already_has_other_active_rating: bool,
) -> RatingPermission {
    let is_author = editing
        .zip(identity.verified_email())
        .map(|(comment, email)| comment.is_authored_by(email))
        .unwrap_or(false);
    let is_admin = identity.is_verified_admin();
    if let Some(comment) = editing {
        if comment.is_rated() && !(is_author || is_admin) {
            return RatingPermission::Denied;
        }
    }
    if can_submit_rating(
        editing.map(Comment::is_rated).unwrap_or(false),
        already_has_other_active_rating,
        is_author,
        is_admin,
    ) {
        RatingPermission::Allowed
    } else {
        RatingPermission::Denied
    }
}
