//! The result reconciliation engine.
//!
//! Pure merge of one lexical result set and one vector result set into the
//! two presentation tiers:
//!
//! - `found`: exact title+difficulty lexical matches first, then
//!   high-similarity vector matches of the requested difficulty.
//! - `related`: everything else, lexical hits before vector hits, first
//!   occurrence per topic id wins.
//!
//! The tiers are disjoint, internally duplicate-free, and never truncated;
//! display capping belongs to the consumer. No I/O happens here, so given
//! identical inputs the output is identical, ordering included.

use std::collections::HashSet;

use wsic_core::types::{Difficulty, ReconciliationOutcome, SearchResult, TopicId};
use wsic_core::{Error, Result};

/// Call-time engine parameters.
#[derive(Debug, Clone)]
pub struct EngineParams {
    /// Vector results must score strictly above this to qualify for the
    /// found tier.
    pub similarity_threshold: f32,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
        }
    }
}

/// Merge raw lexical and vector results for one query into found/related
/// tiers.
///
/// # Errors
///
/// `InvalidArgument` when `query` is empty (after trimming) or the threshold
/// is not a finite value in [0, 1]. Both are caller bugs; no other failure
/// exists.
pub fn reconcile(
    query: &str,
    difficulty: Difficulty,
    lexical: &[SearchResult],
    vector: &[SearchResult],
    params: &EngineParams,
) -> Result<ReconciliationOutcome> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::InvalidArgument("empty query".to_string()));
    }
    let threshold = params.similarity_threshold;
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(Error::InvalidArgument(format!(
            "similarity threshold out of range: {}",
            threshold
        )));
    }

    let query_lower = query.to_lowercase();
    let mut found = Vec::new();
    let mut in_found: HashSet<TopicId> = HashSet::new();

    // Exact-match subset E: case-insensitive title equality plus the
    // requested difficulty. Difficulty is always enforced here; an exact
    // title at the wrong level can only surface via the related tier.
    for result in lexical {
        if result.difficulty == difficulty
            && result.title.to_lowercase() == query_lower
            && in_found.insert(result.topic_id.clone())
        {
            found.push(result.clone());
        }
    }

    // High-similarity subset H, appended after E so exact matches always
    // outrank similarity matches.
    for result in vector {
        let high = result.score.is_some_and(|s| s > threshold);
        if high && result.difficulty == difficulty && in_found.insert(result.topic_id.clone()) {
            found.push(result.clone());
        }
    }

    // Related tier: every remaining hit, lexical first so an unscored
    // lexical entry beats a scored vector entry for the same topic.
    let mut related = Vec::new();
    let mut seen = in_found;
    for result in lexical.iter().chain(vector.iter()) {
        if seen.insert(result.topic_id.clone()) {
            related.push(result.clone());
        }
    }

    Ok(ReconciliationOutcome { found, related })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(id: &str, title: &str, difficulty: Difficulty) -> SearchResult {
        SearchResult {
            topic_id: id.to_string(),
            title: title.to_string(),
            description: format!("About {}", title),
            difficulty,
            view_count: 0,
            like_count: 0,
            share_count: 0,
            score: None,
        }
    }

    fn vec_hit(id: &str, title: &str, difficulty: Difficulty, score: f32) -> SearchResult {
        SearchResult {
            score: Some(score),
            ..lex(id, title, difficulty)
        }
    }

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.topic_id.as_str()).collect()
    }

    #[test]
    fn exact_plus_related_vector_hit() {
        // Scenario 1: exact lexical match also returned by vector at 0.93,
        // plus a lower-similarity sibling.
        let lexical = vec![lex("t1", "Quantum Physics", Difficulty::Beginner)];
        let vector = vec![
            vec_hit("t1", "Quantum Physics", Difficulty::Beginner, 0.93),
            vec_hit("t2", "Quantum Computing", Difficulty::Beginner, 0.70),
        ];
        let outcome = reconcile(
            "Quantum Physics",
            Difficulty::Beginner,
            &lexical,
            &vector,
            &EngineParams::default(),
        )
        .expect("reconcile");

        assert_eq!(ids(&outcome.found), vec!["t1"]);
        assert_eq!(ids(&outcome.related), vec!["t2"]);
        assert!(!outcome.offer_generation());
    }

    #[test]
    fn both_paths_empty_offers_generation() {
        // Scenario 2.
        let outcome = reconcile(
            "Blockchain Governance",
            Difficulty::Advanced,
            &[],
            &[],
            &EngineParams::default(),
        )
        .expect("reconcile");
        assert!(outcome.found.is_empty());
        assert!(outcome.related.is_empty());
        assert!(outcome.offer_generation());
    }

    #[test]
    fn exact_title_wrong_difficulty_falls_to_related() {
        // Scenario 3: exact title at the wrong level is excluded from E but
        // still surfaces as a suggestion.
        let lexical = vec![lex("t1", "AI", Difficulty::Beginner)];
        let outcome = reconcile(
            "AI",
            Difficulty::Intermediate,
            &lexical,
            &[],
            &EngineParams::default(),
        )
        .expect("reconcile");

        assert!(outcome.found.is_empty());
        assert_eq!(ids(&outcome.related), vec!["t1"]);
        assert!(outcome.offer_generation());
    }

    #[test]
    fn lexical_only_inputs_reconcile_cleanly() {
        // Scenario 4 / P6: degraded vector path means an empty vector set.
        let lexical = vec![
            lex("t1", "Climate Change Policy", Difficulty::Beginner),
            lex("t2", "Climate Science", Difficulty::Beginner),
        ];
        let outcome = reconcile(
            "Climate Change",
            Difficulty::Beginner,
            &lexical,
            &[],
            &EngineParams::default(),
        )
        .expect("reconcile");
        assert!(outcome.found.is_empty());
        assert_eq!(ids(&outcome.related), vec!["t1", "t2"]);
    }

    #[test]
    fn topic_in_both_subsets_appears_once_via_exact_branch() {
        // Scenario 5 / P3: dual membership keeps the E position.
        let lexical = vec![
            lex("t9", "Other Exact", Difficulty::Beginner),
            lex("t1", "Quantum Physics", Difficulty::Beginner),
        ];
        let vector = vec![
            vec_hit("t1", "Quantum Physics", Difficulty::Beginner, 0.90),
            vec_hit("t3", "Wave Mechanics", Difficulty::Beginner, 0.88),
        ];
        let outcome = reconcile(
            "Quantum Physics",
            Difficulty::Beginner,
            &lexical,
            &vector,
            &EngineParams::default(),
        )
        .expect("reconcile");

        // t1 sits among the E entries (here: the only E entry), ahead of the
        // H-derived t3; t9 is not an exact title match so it lands in
        // related.
        assert_eq!(ids(&outcome.found), vec!["t1", "t3"]);
        assert_eq!(ids(&outcome.related), vec!["t9"]);
    }

    #[test]
    fn high_similarity_wrong_difficulty_never_reaches_found() {
        // P4: difficulty dominates vector score.
        let vector = vec![vec_hit("t1", "Quantum Physics", Difficulty::Advanced, 0.99)];
        let outcome = reconcile(
            "Quantum Physics",
            Difficulty::Beginner,
            &[],
            &vector,
            &EngineParams::default(),
        )
        .expect("reconcile");
        assert!(outcome.found.is_empty());
        assert_eq!(ids(&outcome.related), vec!["t1"]);
    }

    #[test]
    fn threshold_is_strictly_exceeded() {
        let vector = vec![
            vec_hit("t1", "At Threshold", Difficulty::Beginner, 0.85),
            vec_hit("t2", "Above Threshold", Difficulty::Beginner, 0.8501),
        ];
        let outcome = reconcile(
            "superconductors",
            Difficulty::Beginner,
            &[],
            &vector,
            &EngineParams::default(),
        )
        .expect("reconcile");
        assert_eq!(ids(&outcome.found), vec!["t2"]);
        assert_eq!(ids(&outcome.related), vec!["t1"]);
    }

    #[test]
    fn threshold_is_tunable_per_call() {
        let vector = vec![vec_hit("t1", "Looser Match", Difficulty::Beginner, 0.70)];
        let params = EngineParams {
            similarity_threshold: 0.6,
        };
        let outcome = reconcile("warp drives", Difficulty::Beginner, &[], &vector, &params)
            .expect("reconcile");
        assert_eq!(ids(&outcome.found), vec!["t1"]);
    }

    #[test]
    fn tiers_are_disjoint_and_duplicate_free() {
        // P1/P2 over an input with heavy overlap.
        let lexical = vec![
            lex("t1", "Rust", Difficulty::Beginner),
            lex("t1", "Rust", Difficulty::Beginner),
            lex("t2", "Rust Internals", Difficulty::Beginner),
        ];
        let vector = vec![
            vec_hit("t1", "Rust", Difficulty::Beginner, 0.95),
            vec_hit("t2", "Rust Internals", Difficulty::Beginner, 0.5),
            vec_hit("t3", "Go", Difficulty::Beginner, 0.4),
            vec_hit("t3", "Go", Difficulty::Beginner, 0.3),
        ];
        let outcome = reconcile(
            "Rust",
            Difficulty::Beginner,
            &lexical,
            &vector,
            &EngineParams::default(),
        )
        .expect("reconcile");

        let found_ids: HashSet<_> = ids(&outcome.found).into_iter().collect();
        let related_ids: HashSet<_> = ids(&outcome.related).into_iter().collect();
        assert_eq!(found_ids.len(), outcome.found.len());
        assert_eq!(related_ids.len(), outcome.related.len());
        assert!(found_ids.is_disjoint(&related_ids));
    }

    #[test]
    fn related_prefers_the_lexical_entry_on_overlap() {
        // The same topic below threshold in vector and non-exact in lexical:
        // the unscored lexical entry wins the related slot.
        let lexical = vec![lex("t1", "Quantum Mechanics Overview", Difficulty::Beginner)];
        let vector = vec![vec_hit(
            "t1",
            "Quantum Mechanics Overview",
            Difficulty::Beginner,
            0.6,
        )];
        let outcome = reconcile(
            "quantum",
            Difficulty::Beginner,
            &lexical,
            &vector,
            &EngineParams::default(),
        )
        .expect("reconcile");
        assert_eq!(outcome.related.len(), 1);
        assert!(outcome.related[0].score.is_none());
    }

    #[test]
    fn case_insensitive_exact_match() {
        let lexical = vec![lex("t1", "QUANTUM physics", Difficulty::Beginner)];
        let outcome = reconcile(
            "quantum PHYSICS",
            Difficulty::Beginner,
            &lexical,
            &[],
            &EngineParams::default(),
        )
        .expect("reconcile");
        assert_eq!(ids(&outcome.found), vec!["t1"]);
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        // P7: determinism, ordering included.
        let lexical = vec![
            lex("t2", "Quantum Physics", Difficulty::Beginner),
            lex("t5", "Quantum History", Difficulty::Beginner),
        ];
        let vector = vec![
            vec_hit("t3", "Entanglement", Difficulty::Beginner, 0.91),
            vec_hit("t4", "Decoherence", Difficulty::Beginner, 0.86),
            vec_hit("t6", "Phonons", Difficulty::Beginner, 0.2),
        ];
        let run = || {
            reconcile(
                "Quantum Physics",
                Difficulty::Beginner,
                &lexical,
                &vector,
                &EngineParams::default(),
            )
            .expect("reconcile")
        };
        let a = run();
        let b = run();
        assert_eq!(ids(&a.found), ids(&b.found));
        assert_eq!(ids(&a.related), ids(&b.related));
        assert_eq!(ids(&a.found), vec!["t2", "t3", "t4"]);
        assert_eq!(ids(&a.related), vec!["t5", "t6"]);
    }

    #[test]
    fn empty_query_is_rejected_as_caller_bug() {
        let err = reconcile(
            "   ",
            Difficulty::Beginner,
            &[],
            &[],
            &EngineParams::default(),
        )
        .expect_err("must reject");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let params = EngineParams {
            similarity_threshold: 1.5,
        };
        let err = reconcile("quantum", Difficulty::Beginner, &[], &[], &params)
            .expect_err("must reject");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
