use super::{DimensionPartition, Partition, PartitionError};
use crate::{
    filter::KeyFilter,
    key::{Dimension, Element, Key},
};
use serde_json::json;

fn key(pairs: &[(&str, i64)]) -> Key {
    Key::new(pairs.iter().map(|(d, id)| Element::new(*d, *id))).unwrap()
}

fn chunk(dimension: &str, ids: &[i64]) -> DimensionPartition {
    DimensionPartition::new(
        Dimension::new(dimension),
        ids.iter().map(|id| Element::new(dimension, *id)).collect(),
    )
    .unwrap()
}

// frame chunk {1, 2}, sensor chunk {7}
fn partition() -> Partition {
    Partition::new(0, vec![chunk("frame", &[1, 2]), chunk("sensor", &[7])])
}

fn keys() -> Vec<Key> {
    vec![
        key(&[("frame", 1), ("sensor", 7), ("band", 10)]),
        key(&[("frame", 2), ("sensor", 7), ("band", 11)]),
        key(&[("frame", 2), ("sensor", 7), ("band", 10)]),
        key(&[("frame", 3), ("sensor", 7), ("band", 12)]),
        key(&[("frame", 1), ("sensor", 8), ("band", 13)]),
        key(&[("frame", 1)]),
    ]
}

#[test]
fn dimension_partition_rejects_foreign_elements() {
    let err = DimensionPartition::new(Dimension::new("frame"), vec![Element::new("band", 1)])
        .unwrap_err();

    assert!(matches!(
        err,
        PartitionError::ElementDimensionMismatch { .. }
    ));
}

#[test]
fn independent_filter_ignores_unconstrained_dimensions() {
    let partition = partition();
    let filter = partition.independent_filter();

    assert!(filter.matches(&key(&[("frame", 1), ("sensor", 7), ("band", 99)])));
    assert!(filter.matches(&key(&[("frame", 2)])));
    assert!(!filter.matches(&key(&[("frame", 3), ("sensor", 7)])));
    assert_eq!(filter.len(), 2);
}

#[test]
fn extra_dimensions_filter_rejects_unresolved_dimensions() {
    let mut partition = partition();

    assert!(
        !partition
            .extra_dimensions_filter()
            .matches(&key(&[("frame", 1), ("sensor", 7), ("band", 10)]))
    );

    partition
        .add_dependent_dimension(chunk("band", &[10]))
        .unwrap();
    let filter = partition.extra_dimensions_filter();

    assert!(filter.matches(&key(&[("frame", 1), ("sensor", 7), ("band", 10)])));
    assert!(!filter.matches(&key(&[("frame", 1), ("sensor", 7), ("band", 11)])));
    assert!(!filter.matches(&key(&[("frame", 1), ("tile", 0)])));
}

#[test]
fn discover_dependent_collects_co_occurring_elements_once() {
    let partition = partition();
    let keys = keys();
    let band = partition.discover_dependent(&Dimension::new("band"), &keys);

    let ids: Vec<_> = band.elements().iter().map(ToString::to_string).collect();
    assert_eq!(ids, vec!["band=10", "band=11"]);
}

#[test]
fn slice_honors_dependent_chunks() {
    let mut partition = partition();
    let keys = keys();

    assert_eq!(partition.slice(&keys).len(), 4);

    partition
        .add_dependent_dimension(chunk("band", &[11]))
        .unwrap();
    let sliced = partition.slice(&keys);

    assert_eq!(
        sliced,
        vec![&key(&[("frame", 2), ("sensor", 7), ("band", 11)]), &key(&[("frame", 1)])]
    );
}

#[test]
fn add_dependent_dimension_rejects_known_dimensions() {
    let mut partition = partition();
    partition.add_dependent_dimension(chunk("band", &[1])).unwrap();

    assert_eq!(
        partition.add_dependent_dimension(chunk("frame", &[1])),
        Err(PartitionError::DuplicateDimension {
            dimension: Dimension::new("frame")
        })
    );
    assert!(partition.add_dependent_dimension(chunk("band", &[2])).is_err());
    assert_eq!(partition.dependents().len(), 1);
}

#[test]
fn get_chunk_and_missing_elements_report_diagnostics() {
    let mut partition = partition();
    partition.add_dependent_dimension(chunk("band", &[10, 11])).unwrap();
    let frame = Dimension::new("frame");

    assert_eq!(partition.get_chunk(&frame).unwrap().len(), 2);
    assert!(partition.get_chunk(&Dimension::new("band")).is_some());
    assert!(partition.get_chunk(&Dimension::new("tile")).is_none());
    assert_eq!(
        partition.missing_elements(&frame, &[Element::new("frame", 2)]),
        vec![Element::new("frame", 1)]
    );
    assert!(
        partition
            .missing_elements(&Dimension::new("tile"), &[])
            .is_empty()
    );
}

#[test]
fn root_partition_matches_every_key() {
    let root = Partition::new(0, Vec::new());

    assert!(root.is_root());
    assert_eq!(root.slice(&keys()).len(), keys().len());
}

#[test]
fn fingerprint_tracks_content_and_dependents() {
    let a = partition();
    let mut b = partition();

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint().as_hex().len(), 64);
    assert_eq!(a.fingerprint().as_hex(), a.fingerprint().to_string());
    assert!(
        a.fingerprint()
            .as_hex()
            .starts_with(&format!("{:02x}", a.fingerprint().as_bytes()[0]))
    );

    b.add_dependent_dimension(chunk("band", &[10])).unwrap();
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_ne!(
        a.fingerprint(),
        Partition::new(1, a.chunks().to_vec()).fingerprint()
    );
}

#[test]
fn partition_serializes_with_dependents() {
    let mut partition = partition();
    partition.add_dependent_dimension(chunk("band", &[10])).unwrap();
    let json = serde_json::to_string(&partition).unwrap();
    let back: Partition = serde_json::from_str(&json).unwrap();

    assert_eq!(back, partition);
    assert_eq!(back.fingerprint(), partition.fingerprint());
}

#[test]
fn partition_payload_with_foreign_element_is_rejected() {
    let payload = json!({
        "ordinal": 0,
        "chunks": [{ "dimension": "frame", "elements": [Element::new("band", 1)] }],
        "dependents": [],
    });

    let err = serde_json::from_value::<Partition>(payload).unwrap_err();
    assert!(err.to_string().contains("band=1"));
}

#[test]
fn partition_payload_with_repeated_dimension_is_rejected() {
    let frame = serde_json::to_value(chunk("frame", &[1])).unwrap();
    let band = serde_json::to_value(chunk("band", &[10])).unwrap();

    let repeated_chunk = json!({ "ordinal": 0, "chunks": [frame, frame], "dependents": [] });
    let dependent_shadows_chunk = json!({ "ordinal": 0, "chunks": [frame], "dependents": [frame] });
    let repeated_dependent = json!({ "ordinal": 0, "chunks": [frame], "dependents": [band, band] });

    for payload in [repeated_chunk, dependent_shadows_chunk, repeated_dependent] {
        let err = serde_json::from_value::<Partition>(payload).unwrap_err();
        assert!(err.to_string().contains("already has a chunk"));
    }
}

#[test]
fn partition_payload_without_dependents_is_accepted() {
    let payload = json!({ "ordinal": 3, "chunks": [chunk("frame", &[1, 2])] });
    let partition: Partition = serde_json::from_value(payload).unwrap();

    assert_eq!(partition.ordinal(), 3);
    assert!(partition.dependents().is_empty());
}

#[test]
fn filter_views_wrap_into_key_filter() {
    let mut partition = partition();
    partition.add_dependent_dimension(chunk("band", &[10])).unwrap();
    let wrapped = KeyFilter::from(partition.filter());

    for key in keys() {
        assert_eq!(wrapped.matches(&key), partition.filter().matches(&key));
    }
    assert!(KeyFilter::from(partition.independent_filter()).matches(&key(&[("frame", 2)])));
}
