mod delete_comment;
mod error;
mod load_comments;
mod submit_comment;


pub use self::{delete_comment::*, error::Error, load_comments::*, submit_comment::*};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*};
}
