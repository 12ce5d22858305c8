use super::{ConfigError, DimensionConfig, PartitionConfig};
use crate::key::Dimension;

#[test]
fn json_document_fills_defaults() {
    let config = PartitionConfig::from_json(
        r#"{
            "num_splits": 12,
            "dimensions": [
                { "name": "frame", "can_split": true, "overlap_before": 1 },
                { "name": "sensor" },
                { "name": "band", "is_dependent": true }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.num_splits, 12);
    assert_eq!(
        config.dimensions,
        vec![
            DimensionConfig::splittable("frame").with_overlap(1, 0),
            DimensionConfig::fixed("sensor"),
            DimensionConfig::dependent("band"),
        ]
    );
    assert_eq!(config.dependent_dimensions().count(), 1);
}

#[test]
fn json_document_rejects_unknown_fields() {
    let err = PartitionConfig::from_json(r#"{ "num_splits": 2, "tasks": 4 }"#).unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_splits_are_rejected() {
    assert!(matches!(
        PartitionConfig::new(0).validate(),
        Err(ConfigError::InvalidSplits { num_splits: 0 })
    ));
}

#[test]
fn duplicate_dimensions_are_rejected() {
    let config = PartitionConfig::new(4)
        .with_dimension(DimensionConfig::splittable("frame"))
        .with_dimension(DimensionConfig::fixed("frame"));

    assert!(matches!(
        config.validate(),
        Err(ConfigError::DuplicateDimension { dimension }) if dimension == Dimension::new("frame")
    ));
}

#[test]
fn dependent_dimensions_cannot_be_chunked() {
    let overlap = PartitionConfig::new(4)
        .with_dimension(DimensionConfig::dependent("band").with_overlap(0, 1));
    let chunked =
        PartitionConfig::new(4).with_dimension(DimensionConfig::dependent("band").with_chunk_size(2));
    let mut split = DimensionConfig::dependent("band");
    split.can_split = true;

    assert!(matches!(
        overlap.validate(),
        Err(ConfigError::DependentChunking { .. })
    ));
    assert!(matches!(
        chunked.validate(),
        Err(ConfigError::DependentChunking { .. })
    ));
    assert!(matches!(
        PartitionConfig::new(4).with_dimension(split).validate(),
        Err(ConfigError::DependentSplittable { .. })
    ));
}

#[test]
fn zero_chunk_size_and_empty_names_are_rejected() {
    let zero =
        PartitionConfig::new(4).with_dimension(DimensionConfig::splittable("frame").with_chunk_size(0));
    let unnamed = PartitionConfig::new(4).with_dimension(DimensionConfig::fixed(""));

    assert!(matches!(
        zero.validate(),
        Err(ConfigError::ZeroChunkSize { .. })
    ));
    assert!(matches!(unnamed.validate(), Err(ConfigError::EmptyName)));
}

#[test]
fn config_round_trips_through_json() {
    let config = PartitionConfig::new(8)
        .with_dimension(DimensionConfig::splittable("frame").with_chunk_size(3))
        .with_dimension(DimensionConfig::dependent("band"));
    let json = serde_json::to_string(&config).unwrap();

    assert_eq!(PartitionConfig::from_json(&json).unwrap(), config);
}
