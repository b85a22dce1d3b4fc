use super::*;
use crate::types::Item;

fn result(index: usize, text: &str, score: u32) -> MatchResult {
    MatchResult::new(Item::new(index, text), score)
}

fn chunk(start: usize, texts: &[&str]) -> Arc<Chunk> {
    let items = texts
        .iter()
        .enumerate()
        .map(|(offset, text)| Item::new(start + offset, *text))
        .collect();
    Arc::new(Chunk::from_items(items))
}

fn indexes(merger: &Merger) -> Vec<usize> {
    merger.iter().map(|r| r.item().index()).collect()
}

mod empty {
    use super::*;

    #[test]
    fn has_no_results_and_keeps_revision() {
        let merger = Merger::empty(Revision::new(2, 5));

        assert!(merger.is_empty());
        assert_eq!(merger.get(0), None);
        assert_eq!(merger.revision(), Revision::new(2, 5));
        assert!(!merger.cacheable());
    }
}

mod pass_through {
    use super::*;

    #[test]
    fn yields_every_item_in_order() {
        let chunks = vec![chunk(0, &["a", "b"]), chunk(2, &["c"])];
        let merger = Merger::pass_through(chunks, false, Revision::default());

        assert_eq!(merger.len(), 3);
        assert_eq!(indexes(&merger), vec![0, 1, 2]);
        assert_eq!(merger.min_index(), 0);
        assert_eq!(merger.max_index(), 2);
        assert!(!merger.cacheable());
    }

    #[test]
    fn tac_reverses_order() {
        let chunks = vec![chunk(0, &["a", "b"]), chunk(2, &["c"])];
        let merger = Merger::pass_through(chunks, true, Revision::default());

        assert_eq!(indexes(&merger), vec![2, 1, 0]);
        assert_eq!(merger.get(3), None);
    }
}

mod scanned {
    use super::*;

    #[test]
    fn unsorted_concatenates_partitions() {
        let lists = vec![
            vec![result(0, "a", 1), result(3, "d", 9)],
            vec![],
            vec![result(5, "f", 4)],
        ];
        let merger = Merger::new("q", lists, false, false, Revision::default(), 0, 5);

        assert_eq!(indexes(&merger), vec![0, 3, 5]);
        assert!(!merger.is_sorted());
        assert!(merger.cacheable());
    }

    #[test]
    fn unsorted_tac_reverses() {
        let lists = vec![vec![result(0, "a", 1)], vec![result(4, "e", 1)]];
        let merger = Merger::new("q", lists, false, true, Revision::default(), 0, 4);

        assert_eq!(indexes(&merger), vec![4, 0]);
    }

    #[test]
    fn sorted_merges_by_relevance() {
        let lists = vec![
            vec![result(1, "bb", 9), result(0, "aa", 2)],
            vec![result(7, "hh", 5), result(6, "gg", 2)],
        ];
        let merger = Merger::new("q", lists, true, false, Revision::default(), 0, 7);

        assert!(merger.is_sorted());
        assert_eq!(indexes(&merger), vec![1, 7, 0, 6]);
    }

    #[test]
    fn sorted_tac_breaks_ties_from_the_tail() {
        let lists = vec![
            vec![result(2, "x", 3), result(1, "x", 3)],
            vec![result(5, "x", 3)],
        ];
        let merger = Merger::new("q", lists, true, true, Revision::default(), 0, 5);

        assert_eq!(indexes(&merger), vec![5, 2, 1]);
    }

    #[test]
    fn keeps_query_and_index_range() {
        let merger = Merger::new("abc", vec![vec![]], true, false, Revision::new(1, 1), 10, 20);

        assert_eq!(merger.query(), "abc");
        assert_eq!(merger.min_index(), 10);
        assert_eq!(merger.max_index(), 20);
        assert_eq!(merger.revision(), Revision::new(1, 1));
    }
}

#[test]
fn final_flag_is_shared_through_arc() {
    let merger = Arc::new(Merger::new("q", vec![], false, false, Revision::default(), 0, 0));
    let published = Arc::clone(&merger);

    assert!(!published.is_final());
    merger.set_final(true);
    assert!(published.is_final());
}
