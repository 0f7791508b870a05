pub mod comment;
pub mod rating;
