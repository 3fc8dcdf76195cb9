//! Read-only views over a [Scenario], meant for whatever front end
//! renders the results (table, chart, log line...). Nothing in here
//! formats or draws; it only collects numbers.

use crate::utils::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    Used,
    Empty,
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockStatus::Used   => { write!(f, "Used") },
            BlockStatus::Empty  => { write!(f, "Empty") },
        }
    }
}

/// One line of the partition table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartitionRow {
    pub name:           String,
    /// 1-based position of the occupant in the process list. `None` is
    /// what a table shows as "N/A".
    pub process_no:     Option<usize>,
    pub status:         BlockStatus,
    /// Occupant size, or 0.
    pub space_required: MemUnits,
    pub block_size:     MemUnits,
    /// `block_size - space_required`
    pub unused_space:   MemUnits,
}

/// Snapshot of every partition, in creation order.
pub fn partition_rows(scenario: &Scenario) -> Vec<PartitionRow> {
    let procs = scenario.processes();
    scenario.partitions()
        .map(|p| {
            let occupant = p.occupant();
            let space_required = occupant
                .map(|idx| procs[idx].size)
                .unwrap_or(0.0);
            PartitionRow {
                name:           p.name.clone(),
                process_no:     occupant.map(|idx| idx + 1),
                status:         if occupant.is_some() { BlockStatus::Used } else { BlockStatus::Empty },
                space_required,
                block_size:     p.size,
                unused_space:   p.size - space_required,
            }
        })
        .collect()
}

/// Aggregate waste figures for the current assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FragStats {
    pub total_memory:           MemUnits,
    /// Sum of partition sizes. Less than `total_memory` only in the
    /// external scenario, when the pool was not filled exactly.
    pub partitioned:            MemUnits,
    /// Sum of placed process sizes.
    pub used:                   MemUnits,
    /// Unused space inside occupied partitions.
    pub internal_fragmentation: MemUnits,
    /// Total size of unoccupied partitions.
    pub free_partitions:        MemUnits,
    /// Memory that is free yet of no use to someone who was turned away:
    /// free partitions plus the unpartitioned rest of the pool, counted
    /// only if at least one process went unplaced or one candidate was
    /// rejected.
    pub external_fragmentation: MemUnits,
    pub unplaced:               usize,
    pub unplaced_demand:        MemUnits,
    pub rejected_candidates:    usize,
    /// `used / total_memory`, 0 for an empty pool.
    pub utilization:            f64,
}

impl FragStats {
    pub fn compute(scenario: &Scenario) -> Self {
        let rows = partition_rows(scenario);
        let total_memory = scenario.total_memory();
        let partitioned = scenario.partitioned_memory();
        let (used, internal_fragmentation, free_partitions) = rows.iter()
            .fold((0.0, 0.0, 0.0), |(u, i, f), r| {
                match r.status {
                    BlockStatus::Used   => { (u + r.space_required, i + r.unused_space, f) },
                    BlockStatus::Empty  => { (u, i, f + r.block_size) },
                }
            });
        let (unplaced, unplaced_demand) = scenario.processes()
            .iter()
            .filter(|p| !p.is_placed())
            .fold((0, 0.0), |(n, d), p| (n + 1, d + p.size));
        let rejected_candidates = scenario.rejected().len();
        let external_fragmentation = if unplaced > 0 || rejected_candidates > 0 {
            free_partitions + (total_memory - partitioned).max(0.0)
        } else { 0.0 };

        Self {
            total_memory,
            partitioned,
            used,
            internal_fragmentation,
            free_partitions,
            external_fragmentation,
            unplaced,
            unplaced_demand,
            rejected_candidates,
            utilization: if total_memory > 0.0 { used / total_memory } else { 0.0 },
        }
    }
}

/// Everything a renderer needs about one scenario after (optionally)
/// one allocation run. Serializable, so it can be handed over to a
/// separate process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kind:           ScenarioKind,
    pub total_memory:   MemUnits,
    pub strategy:       Option<Strategy>,
    pub partitions:     Vec<PartitionRow>,
    pub placements:     Vec<PlacementRecord>,
    pub rejected:       Vec<CandidateRejected>,
    pub stats:          FragStats,
}

impl Report {
    /// `result` should be the latest run over `scenario`, if any.
    pub fn new(scenario: &Scenario, result: Option<&AllocationResult>) -> Self {
        Self {
            kind:           scenario.kind(),
            total_memory:   scenario.total_memory(),
            strategy:       result.map(|r| r.strategy),
            partitions:     partition_rows(scenario),
            placements:     result.map(|r| r.records.clone()).unwrap_or_default(),
            rejected:       scenario.rejected().to_vec(),
            stats:          FragStats::compute(scenario),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
