use super::prelude::*;

/// Remove a comment unconditionally.
///
/// NOTE:
/// The aggregate rating of the recipe is *not* recomputed,
/// even if the deleted comment carried a rating.
pub fn delete_comment<R: CommentRepo>(repo: &R, id: &str) -> Result<()> {
    log::debug!("Deleting comment {id}");
    Ok(repo.delete_comment(id)?)
}
