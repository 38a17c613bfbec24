//! Property tests for in-memory index search ordering.

use std::collections::HashMap;

use proptest::prelude::*;
use symcheck_rag::document::Chunk;
use symcheck_rag::index::VectorIndex;
use symcheck_rag::inmemory::InMemoryIndex;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a chunk with a normalized embedding.
fn arb_chunk(dim: usize) -> impl Strategy<Value = Chunk> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| Chunk {
            id,
            text,
            embedding,
            metadata: HashMap::new(),
            document_id: "case_1".to_string(),
        },
    )
}

mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any set of indexed chunks, search returns results ordered by
        /// descending cosine similarity, bounded by top_k, and the index
        /// holds exactly one entry per inserted chunk.
        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, inserted) = rt.block_on(async {
                let index = InMemoryIndex::new(DIM);
                index.insert(&chunks).await.unwrap();
                let inserted = index.len().await;
                let results = index.search(&query, top_k).await.unwrap();
                (results, inserted)
            });

            // The index is append-only: one entry per inserted chunk.
            prop_assert_eq!(inserted, chunks.len());

            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= chunks.len());

            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
