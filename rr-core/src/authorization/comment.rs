use crate::entities::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("only the author or an admin may edit this comment")]
    NotAuthorOrAdmin,
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn authorize_edit(identity: &Identity, comment: &Comment) -> Result<()> {
    if identity.is_verified_admin() {
        return Ok(());
    }
    match identity.verified_email() {
        Some(email) if comment.is_authored_by(email) => Ok(()),
        _ => Err(Error::NotAuthorOrAdmin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_entities::builders::*;

    #[test]
    fn only_author_or_admin_may_edit() {
        let c = Comment::build().author("A", "a@x.com").body("hi").finish();
        assert!(authorize_edit(&Identity::user("a@x.com", "A"), &c).is_ok());
        assert!(authorize_edit(&Identity::admin("b@y.com", "B"), &c).is_ok());
        assert!(authorize_edit(&Identity::user("b@y.com", "B"), &c).is_err());
        assert!(authorize_edit(&Identity::anonymous(), &c).is_err());
    }

    #[test]
    fn unauthenticated_admin_flag_is_ignored() {
        let c = Comment::build().author("A", "a@x.com").body("hi").finish();
        let identity = Identity {
            is_authenticated: false,
            is_admin: true,
            email: Some("a@x.com".into()),
            name: None,
        };
        assert!(authorize_edit(&identity, &c).is_err());
    }
}
