pub mod placement;

use crate::utils::*;
use self::placement::{best_fit, first_fit, worst_fit};

/// Placement policy applied by [run].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Strategy {
    /// Smallest leftover
    Best,
    /// Largest partition
    Worst,
    /// First one that fits
    First,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Best, Strategy::Worst, Strategy::First];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Best  => { "Best Fit" },
            Strategy::Worst => { "Worst Fit" },
            Strategy::First => { "First Fit" },
        }
    }

    fn picker(&self) -> fn(&PartitionTable, MemUnits) -> Option<usize> {
        match self {
            Strategy::Best  => { best_fit },
            Strategy::Worst => { worst_fit },
            Strategy::First => { first_fit },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `best`, `Best Fit`, `best-fit`, `WORST_FIT`, `firstfit` and
/// the like.
impl FromStr for Strategy {
    type Err = FragError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s.chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        let stem = norm.strip_suffix("fit").unwrap_or(&norm);
        match stem {
            "best"  => { Ok(Strategy::Best) },
            "worst" => { Ok(Strategy::Worst) },
            "first" => { Ok(Strategy::First) },
            _       => { Err(FragError::UnknownStrategy(s.to_string())) }
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[error("Process {process} with size {size} cannot be allocated by {strategy} and is terminated.")]
/// No free partition was big enough for a process.
pub struct PlacementFailed {
    /// 1-based position of the process.
    pub process:    usize,
    pub size:       MemUnits,
    pub strategy:   Strategy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Allocated {
        /// Index in creation order.
        partition:  usize,
        block:      String,
    },
    NotAllocated(PlacementFailed),
}

/// What happened to one process during a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// 1-based position of the process.
    pub process:    usize,
    pub size:       MemUnits,
    pub outcome:    Outcome,
}

impl PlacementRecord {
    pub fn block(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Allocated { block, .. }    => { Some(block.as_str()) },
            Outcome::NotAllocated(_)            => { None },
        }
    }
}

/// The outcome of one [run]: one record per process, in process order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub strategy:   Strategy,
    pub records:    Vec<PlacementRecord>,
}

impl AllocationResult {
    pub fn placed(&self) -> impl Iterator<Item = &PlacementRecord> {
        self.records
            .iter()
            .filter(|r| r.block().is_some())
    }

    pub fn failures(&self) -> impl Iterator<Item = &PlacementFailed> {
        self.records
            .iter()
            .filter_map(|r| {
                if let Outcome::NotAllocated(f) = &r.outcome { Some(f) }
                else { None }
            })
    }

    pub fn all_placed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Name of the block hosting process `process` (1-based).
    pub fn block_of(&self, process: usize) -> Option<&str> {
        self.records
            .get(process.checked_sub(1)?)
            .and_then(|r| r.block())
    }
}

/// Places every process of `scenario` with the given [Strategy].
///
/// Starts from a clean slate ([`Scenario::reset`]), so calling this again
/// with the same strategy gives the same assignment. Processes are
/// visited once each, in creation order. One that cannot be placed is
/// recorded as [`Outcome::NotAllocated`] and the run moves on.
pub fn run(strategy: Strategy, scenario: &Scenario) -> AllocationResult {
    scenario.reset();
    let pick = strategy.picker();
    let table = scenario.partition_table();
    let mut records = Vec::with_capacity(scenario.processes().len());

    for (proc_idx, proc) in scenario.processes().iter().enumerate() {
        let outcome = match pick(table, proc.size) {
            Some(part_idx)  => {
                scenario.assign(proc_idx, part_idx);
                let block = table[part_idx].name.clone();
                debug!("{strategy}: process {} ({}) -> {block}", proc_idx + 1, fmt_units(proc.size));
                Outcome::Allocated {
                    partition:  part_idx,
                    block,
                }
            },
            None    => {
                let failure = PlacementFailed {
                    process:    proc_idx + 1,
                    size:       proc.size,
                    strategy,
                };
                warn!("{failure}");
                Outcome::NotAllocated(failure)
            }
        };
        records.push(PlacementRecord {
            process:    proc_idx + 1,
            size:       proc.size,
            outcome,
        });
    }

    AllocationResult {
        strategy,
        records,
    }
}

/// Like [run], but the strategy comes in as text, e.g. straight from a
/// form or the command line.
pub fn run_named(strategy: &str, scenario: &Scenario) -> Result<AllocationResult, FragError> {
    let strategy: Strategy = strategy.parse()?;

    Ok(run(strategy, scenario))
}
