#[macro_use]
extern crate log;

mod composer;
mod delete_comment;
mod load_comments;

pub mod prelude {
    pub use super::{composer::*, delete_comment::*, load_comments::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use rr_core::{db::*, entities::*, repositories::*, usecases};

#[cfg(test)]
pub(crate) mod tests;
