use recall_core::error::Error;
use recall_core::traits::VectorIndex;
use recall_core::types::{Metric, VectorId};
use recall_index::{clone_index, index_factory, FlatIndex, IdMapIndex, IdSelector};

fn sample_vectors() -> Vec<f32> {
    // Four 4-d vectors at increasing distance from the origin.
    vec![
        0.0, 0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, 0.0, //
        0.0, 2.0, 0.0, 0.0, //
        3.0, 3.0, 0.0, 0.0, //
    ]
}

#[test]
fn l2_search_orders_ascending() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    ix.add(&sample_vectors()).expect("add");
    assert_eq!(ix.ntotal(), 4);

    let results = ix.search(&[0.0, 0.0, 0.0, 0.0], 4).expect("search");
    let hits = &results[0];
    eprintln!("flat l2: {:?}", hits);
    assert_eq!(hits.len(), 4);
    let ids: Vec<VectorId> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    for pair in hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
    assert_eq!(hits[0].distance, 0.0);
    assert_eq!(hits[2].distance, 4.0, "squared L2, not euclidean");
}

#[test]
fn inner_product_orders_descending() {
    let mut ix = FlatIndex::new(4, Metric::InnerProduct).expect("new");
    ix.add(&sample_vectors()).expect("add");
    let results = ix.search(&[1.0, 1.0, 0.0, 0.0], 4).expect("search");
    let hits = &results[0];
    assert_eq!(hits[0].id, 3, "largest dot product first");
    for pair in hits.windows(2) {
        assert!(pair[0].distance >= pair[1].distance);
    }
}

#[test]
fn k_is_clamped_and_zero_k_is_empty() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    ix.add(&sample_vectors()).expect("add");
    let results = ix.search(&[0.0; 4], 100).expect("search");
    assert_eq!(results[0].len(), 4, "no sentinel padding past ntotal");
    let results = ix.search(&[0.0; 4], 0).expect("search");
    assert!(results[0].is_empty());
}

#[test]
fn multi_query_search_returns_one_list_per_row() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    ix.add(&sample_vectors()).expect("add");
    let queries = [0.0, 0.0, 0.0, 0.0, 3.0, 3.0, 0.0, 0.0];
    let results = ix.search(&queries, 1).expect("search");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0][0].id, 0);
    assert_eq!(results[1][0].id, 3);
}

#[test]
fn dimension_mismatch_is_reported() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    let err = ix.add(&[1.0, 2.0, 3.0]).expect_err("short add");
    assert!(matches!(err, Error::DimensionMismatch { expected: 4, got: 3 }));
    ix.add(&sample_vectors()).expect("add");
    let err = ix.search(&[1.0, 2.0], 1).expect_err("short query");
    assert!(matches!(err, Error::DimensionMismatch { expected: 4, got: 2 }));
}

#[test]
fn reconstruct_returns_stored_vector() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    ix.add(&sample_vectors()).expect("add");
    assert_eq!(ix.reconstruct(2).expect("reconstruct"), vec![0.0, 2.0, 0.0, 0.0]);
    assert!(matches!(ix.reconstruct(4), Err(Error::NotFound(_))));
    assert!(matches!(ix.reconstruct(-1), Err(Error::NotFound(_))));
}

#[test]
fn range_search_honors_radius() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    ix.add(&sample_vectors()).expect("add");
    let hits = ix.range_search(&[0.0; 4], 4.0).expect("range");
    let ids: Vec<VectorId> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![0, 1, 2], "ids 0,1,2 are within squared distance 4");
}

#[test]
fn remove_ids_compacts_and_relabels() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    ix.add(&sample_vectors()).expect("add");
    let removed = ix.remove_ids(&IdSelector::batch([1, 2]));
    assert_eq!(removed, 2);
    assert_eq!(ix.ntotal(), 2);
    // Survivors are relabelled 0 and 1.
    assert_eq!(ix.reconstruct(0).expect("r0"), vec![0.0, 0.0, 0.0, 0.0]);
    assert_eq!(ix.reconstruct(1).expect("r1"), vec![3.0, 3.0, 0.0, 0.0]);
}

#[test]
fn reset_clears_vectors_keeps_config() {
    let mut ix = FlatIndex::new(4, Metric::L2).expect("new");
    ix.add(&sample_vectors()).expect("add");
    ix.reset();
    assert_eq!(ix.ntotal(), 0);
    assert_eq!(ix.dim(), 4);
    ix.add(&[1.0, 1.0, 1.0, 1.0]).expect("add after reset");
    assert_eq!(ix.ntotal(), 1);
}

#[test]
fn id_map_speaks_external_ids() {
    let mut ix = IdMapIndex::new(FlatIndex::new(4, Metric::L2).expect("flat"));
    ix.add_with_ids(&sample_vectors(), &[100, 200, 300, 400]).expect("add_with_ids");

    let results = ix.search(&[0.0; 4], 2).expect("search");
    let ids: Vec<VectorId> = results[0].iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![100, 200]);

    assert_eq!(ix.reconstruct(300).expect("reconstruct"), vec![0.0, 2.0, 0.0, 0.0]);

    // Plain add has no labels to assign.
    let err = ix.add(&[0.0; 4]).expect_err("add must fail");
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn id_map_removal_keeps_external_ids_stable() {
    let mut ix = IdMapIndex::new(FlatIndex::new(4, Metric::L2).expect("flat"));
    ix.add_with_ids(&sample_vectors(), &[100, 200, 300, 400]).expect("add_with_ids");
    let removed = ix.remove_ids(&IdSelector::range(100, 300));
    assert_eq!(removed, 2);
    assert_eq!(ix.ntotal(), 2);
    let results = ix.search(&[0.0; 4], 2).expect("search");
    let ids: Vec<VectorId> = results[0].iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![300, 400], "survivors keep their ids");
}

#[test]
fn id_map_rejects_mismatched_id_count() {
    let mut ix = IdMapIndex::new(FlatIndex::new(4, Metric::L2).expect("flat"));
    let err = ix.add_with_ids(&sample_vectors(), &[1, 2]).expect_err("bad ids");
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn nan_distances_rank_last_without_panicking() {
    let mut ix = FlatIndex::new(2, Metric::L2).expect("new");
    ix.add(&[0.0, 0.0, f32::NAN, 0.0, 1.0, 0.0]).expect("add");

    let results = ix.search(&[0.0, 0.0], 3).expect("search");
    let hits = &results[0];
    assert_eq!(hits[0].id, 0);
    assert_eq!(hits[1].id, 2);
    assert_eq!(hits[2].id, 1, "NaN distance sorts after every finite one");
    assert!(hits[2].distance.is_nan());

    // A NaN query must also come back ordered, not panic.
    let results = ix.search(&[f32::NAN, 0.0], 3).expect("nan query");
    assert_eq!(results[0].len(), 3);
}

#[test]
fn cloned_index_shares_nothing() {
    let mut ix = index_factory(4, "Flat", Metric::L2).expect("factory");
    ix.add(&sample_vectors()).expect("add");
    let snapshot = clone_index(&ix);
    ix.add(&[9.0, 9.0, 9.0, 9.0]).expect("add more");
    assert_eq!(ix.ntotal(), 5);
    assert_eq!(snapshot.ntotal(), 4, "clone is unaffected by later adds");
}
