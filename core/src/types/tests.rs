use super::*;
use std::cmp::Ordering;
use std::sync::Arc;

fn result(index: usize, text: &str, score: u32) -> MatchResult {
    MatchResult::new(Item::new(index, text), score)
}

mod chunk {
    use super::*;

    #[test]
    fn reports_index_bounds() {
        let chunk = Chunk::from_items(vec![Item::new(7, "a"), Item::new(8, "b")]);

        assert_eq!(chunk.len(), 2);
        assert!(!chunk.is_full());
        assert_eq!(chunk.first_index(), Some(7));
        assert_eq!(chunk.last_index(), Some(8));
    }

    #[test]
    fn full_at_capacity() {
        let items = (0..CHUNK_SIZE).map(|i| Item::new(i, "x")).collect();
        assert!(Chunk::from_items(items).is_full());
    }

    #[test]
    fn count_items_sums_chunks() {
        let chunks = vec![
            Arc::new(Chunk::from_items(vec![Item::new(0, "a"), Item::new(1, "b")])),
            Arc::new(Chunk::from_items(vec![Item::new(2, "c")])),
        ];
        assert_eq!(count_items(&chunks), 3);
        assert_eq!(count_items(&[]), 0);
    }
}

mod revision {
    use super::*;

    #[test]
    fn minor_bump_stays_compatible() {
        let base = Revision::default();
        let mut next = base;
        next.bump_minor();

        assert_ne!(base, next);
        assert!(next.compatible(&base));
    }

    #[test]
    fn major_bump_breaks_compatibility() {
        let base = Revision::new(0, 3);
        let mut next = base;
        next.bump_major();

        assert_eq!(next, Revision::new(1, 0));
        assert!(!next.compatible(&base));
    }
}

mod relevance {
    use super::*;

    #[test]
    fn higher_score_first() {
        assert_eq!(
            result(5, "abc", 10).cmp_relevance(&result(1, "abc", 3), false),
            Ordering::Less
        );
    }

    #[test]
    fn shorter_text_breaks_score_ties() {
        assert_eq!(
            result(5, "ab", 3).cmp_relevance(&result(1, "abcd", 3), false),
            Ordering::Less
        );
    }

    #[test]
    fn index_tie_break_flips_with_tac() {
        let early = result(1, "ab", 3);
        let late = result(2, "ab", 3);

        assert_eq!(early.cmp_relevance(&late, false), Ordering::Less);
        assert_eq!(early.cmp_relevance(&late, true), Ordering::Greater);
    }
}
