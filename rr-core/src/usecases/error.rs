use crate::{authorization, repositories, util::validate::DraftInvalidation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] DraftInvalidation),
    #[error("{}", crate::authorization::rating::ANOTHER_RATING_DENIED)]
    RatingNotPermitted,
    #[error("This is not allowed")]
    Forbidden,
    #[error("The comment belongs to another recipe")]
    RecipeMismatch,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<authorization::comment::Error> for Error {
    fn from(_: authorization::comment::Error) -> Self {
        Self::Forbidden
    }
}
