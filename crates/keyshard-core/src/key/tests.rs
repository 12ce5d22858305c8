use super::{Dimension, Element, ElementId, Key, KeyError, Keyspace};
use std::cmp::Ordering;

fn key(pairs: &[(&str, i64)]) -> Key {
    Key::new(pairs.iter().map(|(d, id)| Element::new(*d, *id))).unwrap()
}

#[test]
fn key_rejects_duplicate_dimension() {
    let err = Key::new([Element::new("frame", 1), Element::new("frame", 2)]).unwrap_err();

    assert_eq!(
        err,
        KeyError::DuplicateDimension {
            dimension: Dimension::new("frame")
        }
    );
}

#[test]
fn key_equality_ignores_insertion_order() {
    let a = Key::new([Element::new("sensor", 1), Element::new("frame", 2)]).unwrap();
    let b = Key::new([Element::new("frame", 2), Element::new("sensor", 1)]).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_string(), "{frame=2, sensor=1}");
}

#[test]
fn root_key_is_empty_and_sorts_first() {
    let root = Key::root();

    assert!(root.is_root());
    assert_eq!(root.len(), 0);
    assert!(root < key(&[("frame", 0)]));
}

#[test]
fn element_try_cmp_rejects_mixed_dimensions() {
    let frame = Element::new("frame", 1);
    let band = Element::new("band", "MS");

    assert!(matches!(
        frame.try_cmp(&band),
        Err(KeyError::DimensionMismatch { .. })
    ));
    assert_eq!(
        frame.try_cmp(&Element::new("frame", 7)).unwrap(),
        Ordering::Less
    );
}

#[test]
fn element_ids_order_numerically_before_text() {
    assert!(ElementId::Int(9) < ElementId::Int(10));
    assert!(ElementId::Int(i64::MAX) < ElementId::from("a"));
    assert_eq!(Element::new("band", "MS").to_string(), "band=MS");
}

#[test]
fn key_project_drops_unlisted_dimensions() {
    let k = key(&[("sensor", 1), ("frame", 2), ("tile", 3)]);
    let projected = k.project(&[Dimension::new("frame"), Dimension::new("tile")]);

    assert_eq!(projected, key(&[("frame", 2), ("tile", 3)]));
    assert!(projected.narrows(&k));
}

#[test]
fn key_serializes_as_element_list() {
    let k = key(&[("sensor", 1), ("frame", 2)]);
    let json = serde_json::to_string(&k).unwrap();
    let back: Key = serde_json::from_str(&json).unwrap();

    assert_eq!(back, k);
}

#[test]
fn key_deserialize_rejects_duplicate_dimension() {
    let json = r#"[{"dimension":"frame","id":{"Int":1}},{"dimension":"frame","id":{"Int":2}}]"#;

    assert!(serde_json::from_str::<Key>(json).is_err());
}

#[test]
fn keyspace_dimensions_keep_first_seen_order_without_duplicates() {
    let mut keyspace = Keyspace::new();
    assert!(keyspace.add(key(&[("frame", 3), ("sensor", 1)])));
    assert!(keyspace.add(key(&[("frame", 1), ("sensor", 1)])));
    assert!(keyspace.add(key(&[("frame", 3), ("sensor", 2)])));
    assert!(!keyspace.add(key(&[("frame", 3), ("sensor", 2)])));

    let frame = keyspace.dimension(&Dimension::new("frame")).unwrap();
    let ids: Vec<_> = frame.elements().iter().map(|e| e.id().clone()).collect();

    assert_eq!(ids, vec![ElementId::Int(3), ElementId::Int(1)]);
    assert_eq!(keyspace.len(), 3);
    assert_eq!(
        keyspace.dimension(&Dimension::new("sensor")).unwrap().len(),
        2
    );
    assert!(keyspace.dimension(&Dimension::new("band")).is_none());
}

#[test]
fn keyspace_tracks_dimensions_of_sparse_keys() {
    let keyspace: Keyspace = [key(&[("frame", 1)]), key(&[("band", 4)]), Key::root()]
        .into_iter()
        .collect();

    let names: Vec<_> = keyspace
        .dimensions()
        .iter()
        .map(|d| d.dimension().name().to_string())
        .collect();

    assert_eq!(names, vec!["frame", "band"]);
    assert!(keyspace.contains(&Key::root()));
    assert!(
        keyspace
            .dimension(&Dimension::new("frame"))
            .unwrap()
            .contains(&Element::new("frame", 1))
    );
}
