use rr_entities::comment::CommentDraft;
use std::fmt;
use thiserror::Error;

pub use fast_chemail::is_valid_email;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    AuthorName,
    AuthorEmail,
    BodyOrRating,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AuthorName => "author name",
            Self::AuthorEmail => "author email",
            Self::BodyOrRating => "comment or rating",
        };
        f.write_str(name)
    }
}

/// All offending fields of a draft, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {}", display_fields(.fields))]
pub struct DraftInvalidation {
    pub fields: Vec<DraftField>,
}

impl DraftInvalidation {
    pub fn contains(&self, field: DraftField) -> bool {
        self.fields.contains(&field)
    }
}

fn display_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn has_text(body: Option<&str>) -> bool {
    body.map(|b| !b.trim().is_empty()).unwrap_or(false)
}

impl Validate for CommentDraft {
    type Error = DraftInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        let mut fields = vec![];
        if self.author_name.is_empty() {
            fields.push(DraftField::AuthorName);
        }
        if self.author_email.is_empty() || !is_valid_email(&self.author_email) {
            fields.push(DraftField::AuthorEmail);
        }
        if !has_text(self.body.as_deref()) && self.rating.is_none() {
            fields.push(DraftField::BodyOrRating);
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(DraftInvalidation { fields })
        }
    }
}

impl AutoCorrect for CommentDraft {
    fn auto_correct(mut self) -> Self {
        self.author_name = self.author_name.trim().to_owned();
        self.author_email = self.author_email.trim().to_owned();
        self
    }
}
