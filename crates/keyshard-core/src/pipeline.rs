//! Module: pipeline
//! Responsibility: the end-to-end partitioning entry points that chain
//! validation, planning and assembly, and the dependent-dimension pass the
//! orchestrating layer runs afterwards.
//! Boundary: every module error leaves through [`Error`].

use crate::{
    assemble::KeyspaceAssembler,
    config::PartitionConfig,
    error::Error,
    key::Keyspace,
    obs::{self, PartitionTraceEvent, PartitionTraceSink},
    partition::Partition,
    plan::DimensionSplitPlanner,
};

/// Validate `config`, plan chunk counts and assemble the partition list.
pub fn partition_keyspace(
    keyspace: &Keyspace,
    config: &PartitionConfig,
    sink: Option<&dyn PartitionTraceSink>,
) -> Result<Vec<Partition>, Error> {
    run(keyspace, config, sink).inspect_err(|err| {
        obs::emit(
            sink,
            PartitionTraceEvent::Error {
                class: err.class,
                origin: err.origin,
            },
        );
    })
}

fn run(
    keyspace: &Keyspace,
    config: &PartitionConfig,
    sink: Option<&dyn PartitionTraceSink>,
) -> Result<Vec<Partition>, Error> {
    config.validate()?;
    let plan = DimensionSplitPlanner::new(keyspace, config).plan(sink)?;
    let partitions = KeyspaceAssembler::new(keyspace, config).assemble(&plan, sink)?;

    Ok(partitions)
}

/// Resolve every configured dependent dimension for each partition, in
/// configuration order, from the keys of `keyspace`.
pub fn resolve_dependents(
    partitions: &mut [Partition],
    keyspace: &Keyspace,
    config: &PartitionConfig,
) -> Result<(), Error> {
    for partition in partitions.iter_mut() {
        for dependent in config.dependent_dimensions() {
            let chunk = partition.discover_dependent(&dependent.name, keyspace.keys());
            partition.add_dependent_dimension(chunk)?;
        }
    }

    Ok(())
}
