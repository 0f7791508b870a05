use rr_entities::comment::Comment;

pub trait SortByRecency {
    /// Newest first. Comments created at the same time keep
    /// their current relative order.
    fn sort_by_recency(&mut self);
}

impl SortByRecency for [Comment] {
    fn sort_by_recency(&mut self) {
        // `sort_by` is stable
        self.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_entities::{builders::*, time::Timestamp};

    fn comment(id: &str, created_at: i64) -> Comment {
        Comment::build()
            .id(id)
            .body("x")
            .created_at(Timestamp::from_secs(created_at))
            .finish()
    }

    #[test]
    fn newest_first() {
        let mut comments = vec![comment("a", 1), comment("b", 3), comment("c", 2)];
        comments.sort_by_recency();
        let ids: Vec<_> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut comments = vec![
            comment("a", 1),
            comment("b", 2),
            comment("c", 2),
            comment("d", 1),
            comment("e", 2),
        ];
        comments.sort_by_recency();
        let ids: Vec<_> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "e", "a", "d"]);
    }
}
