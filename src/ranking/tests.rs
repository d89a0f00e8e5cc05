use super::*;

fn doc(title: &str) -> CandidateDocument {
    CandidateDocument {
        title: title.to_string(),
        url: format!("https://example.com/{title}"),
        body: format!("body of {title}"),
    }
}

mod cosine_tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = vec![0.5, 0.5, 0.1];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_vectors_score_negative_one() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_mismatched_lengths_score_zero() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_scale_invariance() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![2.0, 4.0, 6.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
    }
}

mod rank_tests {
    use super::*;

    #[test]
    fn test_orders_by_similarity_descending() {
        let ranker = RelevanceRanker::new();
        let query = vec![1.0, 0.0];

        let candidates = vec![
            (doc("far"), vec![0.0, 1.0]),
            (doc("near"), vec![1.0, 0.1]),
            (doc("mid"), vec![1.0, 1.0]),
        ];

        let ranked = ranker.rank(&query, candidates, 3);
        let titles: Vec<&str> = ranked.iter().map(|r| r.document.title.as_str()).collect();
        assert_eq!(titles, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_determinism() {
        let ranker = RelevanceRanker::new();
        let query = vec![0.3, 0.7, 0.2];
        let candidates = vec![
            (doc("a"), vec![0.1, 0.9, 0.0]),
            (doc("b"), vec![0.5, 0.5, 0.5]),
            (doc("c"), vec![0.9, 0.1, 0.3]),
        ];

        let first = ranker.rank(&query, candidates.clone(), 3);
        let second = ranker.rank(&query, candidates, 3);

        assert_eq!(first, second);
    }

    #[test]
    fn test_top_k_bound() {
        let ranker = RelevanceRanker::new();
        let query = vec![1.0, 0.0];
        let candidates: Vec<_> = (0..5)
            .map(|i| (doc(&format!("d{i}")), vec![1.0, i as f32]))
            .collect();

        for k in 0..8 {
            let ranked = ranker.rank(&query, candidates.clone(), k);
            assert_eq!(ranked.len(), k.min(5));
        }
    }

    #[test]
    fn test_scores_stay_in_cosine_range() {
        let ranker = RelevanceRanker::new();
        let query = vec![0.4, -0.8, 0.2];
        let candidates = vec![
            (doc("a"), vec![-0.4, 0.8, -0.2]),
            (doc("b"), vec![10.0, 10.0, 10.0]),
            (doc("c"), vec![0.0, 0.0, 0.0]),
        ];

        for result in ranker.rank(&query, candidates, 3) {
            assert!(result.score >= -1.0 && result.score <= 1.0);
        }
    }

    #[test]
    fn test_stable_tie_break_preserves_fetch_order() {
        let ranker = RelevanceRanker::new();
        let query = vec![1.0, 1.0];

        // Scalar multiples: identical cosine similarity to the query.
        let candidates = vec![
            (doc("first"), vec![2.0, 0.0]),
            (doc("second"), vec![4.0, 0.0]),
            (doc("third"), vec![1.0, 0.0]),
        ];

        let ranked = ranker.rank(&query, candidates, 3);
        let titles: Vec<&str> = ranked.iter().map(|r| r.document.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_candidates_return_empty() {
        let ranker = RelevanceRanker::new();
        assert!(ranker.rank(&[1.0, 0.0], Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_k_zero_returns_empty() {
        let ranker = RelevanceRanker::new();
        let candidates = vec![(doc("a"), vec![1.0, 0.0])];
        assert!(ranker.rank(&[1.0, 0.0], candidates, 0).is_empty());
    }

    #[test]
    fn test_zero_query_vector_keeps_fetch_order() {
        let ranker = RelevanceRanker::new();
        let query = vec![0.0, 0.0];
        let candidates = vec![
            (doc("a"), vec![1.0, 0.0]),
            (doc("b"), vec![0.0, 1.0]),
        ];

        // All similarities collapse to 0.0; stable sort keeps input order.
        let ranked = ranker.rank(&query, candidates, 2);
        assert_eq!(ranked[0].document.title, "a");
        assert_eq!(ranked[1].document.title, "b");
        assert_eq!(ranked[0].score, 0.0);
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(embed_prefix("short", 100), "short");
    }

    #[test]
    fn test_long_text_truncated_to_char_count() {
        let text = "a".repeat(500);
        assert_eq!(embed_prefix(&text, 300).chars().count(), 300);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "héllo wörld ".repeat(50);
        let prefix = embed_prefix(&text, 30);
        assert_eq!(prefix.chars().count(), 30);
        // Slicing at a byte boundary inside a multibyte char would panic;
        // reaching here is the assertion.
    }

    #[test]
    fn test_zero_chars_gives_empty_prefix() {
        assert_eq!(embed_prefix("anything", 0), "");
    }
}
