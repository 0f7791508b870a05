use rr_core::{
    authorization::rating::ANOTHER_RATING_DENIED, repositories::Error as RepoError,
    usecases::Error as UsecaseError, util::validate::DraftInvalidation,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The draft was rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] DraftInvalidation),
    #[error("{}", ANOTHER_RATING_DENIED)]
    PolicyViolation,
    #[error("This is not allowed")]
    Forbidden,
    /// Message of the failed store operation
    #[error("{0}")]
    Persistence(String),
}

impl AppError {
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<UsecaseError> for AppError {
    fn from(err: UsecaseError) -> Self {
        match err {
            UsecaseError::Validation(err) => Self::Validation(err),
            UsecaseError::RatingNotPermitted => Self::PolicyViolation,
            UsecaseError::Forbidden | UsecaseError::RecipeMismatch => Self::Forbidden,
            UsecaseError::Repo(err) => err.into(),
        }
    }
}
