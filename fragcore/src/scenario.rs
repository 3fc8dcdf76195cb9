use crate::utils::*;
use clap::ValueEnum;

/// The two ways of cutting up the pool.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// One equal-sized block per declared process
    Internal,
    /// One exactly-sized block per admitted process
    External,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::Internal  => { write!(f, "Internal Fragmentation") },
            ScenarioKind::External  => { write!(f, "External Fragmentation") },
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[error("Process {candidate} with size {size} cannot be allocated, terminated ({remaining} left in the pool).")]
/// A candidate of the external scenario that would have overflowed
/// the pool. Only that candidate is skipped; admission goes on.
pub struct CandidateRejected {
    /// 1-based position of the candidate in the source.
    pub candidate:  usize,
    pub size:       MemUnits,
    /// Pool capacity left when the candidate was turned down.
    pub remaining:  MemUnits,
}

impl Scenario {
    fn empty(kind: ScenarioKind, total_memory: MemUnits) -> Self {
        Self {
            kind,
            total_memory,
            partitions: PartitionTable::default(),
            processes:  vec![],
            rejected:   vec![],
        }
    }

    fn push_partition(&mut self, size: MemUnits) {
        let p = Partition::new(self.partitions.len() + 1, size);
        self.partitions.insert(p.name.clone(), p);
    }

    /// Builds the internal-fragmentation layout: as many partitions as
    /// there are processes, each `total_memory / N` units big, no matter
    /// the processes' actual sizes.
    ///
    /// Every process is accepted. One that is bigger than the uniform
    /// block size will simply fail to be placed later on.
    pub fn build_internal<T, I>(
        total_memory:   T,
        process_sizes:  I,
    ) -> Result<Self, FragError>
    where   T: IntoSize,
            I: IntoIterator,
            I::Item: IntoSize {
        let total_memory = total_memory.into_size(Field::TotalMemory, 0)?;
        // Validate everything before building anything.
        let sizes = process_sizes.into_iter()
            .enumerate()
            .map(|(idx, s)| s.into_size(Field::ProcessSize, idx))
            .collect::<Result<Vec<MemUnits>, FragError>>()?;
        if sizes.is_empty() {
            return Err(FragError::InvalidInput {
                field:  Field::ProcessCount,
                index:  0,
                raw:    String::from("0"),
                why:    "not positive",
            });
        }

        let block_size = total_memory / sizes.len() as MemUnits;
        let mut res = Self::empty(ScenarioKind::Internal, total_memory);
        for s in sizes {
            res.processes.push(Process::new(s));
            res.push_partition(block_size);
        }
        info!(
            "Internal scenario: {} partitions of {} out of {}",
            res.partitions.len(),
            fmt_units(block_size),
            fmt_units(total_memory)
        );

        Ok(res)
    }

    /// Builds the external-fragmentation layout by pulling candidate
    /// sizes out of `candidates` one at a time.
    ///
    /// A candidate that still fits in the pool is admitted, and gets a
    /// partition of exactly its own size. One that does not is recorded
    /// as a [CandidateRejected] and pulling continues, since a later,
    /// smaller candidate might still fit. Pulling stops as soon as the
    /// pool is full or the source runs dry, so an endless source (e.g.
    /// an interactive prompt) is fine.
    ///
    /// A non-positive `total_memory` yields an empty scenario without
    /// pulling anything. A candidate that fails validation aborts the
    /// whole build.
    pub fn build_external<T, I>(
        total_memory:   T,
        candidates:     I,
    ) -> Result<Self, FragError>
    where   T: IntoSize,
            I: IntoIterator,
            I::Item: IntoSize {
        let total_memory = total_memory.into_number(Field::TotalMemory, 0)?;
        let mut res = Self::empty(ScenarioKind::External, total_memory);
        let mut source = candidates.into_iter().enumerate();
        let mut admitted: MemUnits = 0.0;

        while admitted < total_memory {
            let (idx, raw) = match source.next() {
                Some(c) => { c },
                None    => { break; }
            };
            let size = raw.into_size(Field::ProcessSize, idx)?;
            if admitted + size <= total_memory {
                admitted += size;
                res.processes.push(Process::new(size));
                res.push_partition(size);
                debug!("Admitted candidate {} ({}), {} in use", idx + 1, fmt_units(size), fmt_units(admitted));
            } else {
                let rejection = CandidateRejected {
                    candidate:  idx + 1,
                    size,
                    remaining:  total_memory - admitted,
                };
                warn!("{rejection}");
                res.rejected.push(rejection);
            }
        }
        info!(
            "External scenario: {} partitions, {} of {} admitted, {} candidates rejected",
            res.partitions.len(),
            fmt_units(admitted),
            fmt_units(total_memory),
            res.rejected.len()
        );

        Ok(res)
    }

    pub fn kind(&self) -> ScenarioKind {
        self.kind
    }

    pub fn total_memory(&self) -> MemUnits {
        self.total_memory
    }

    /// Partitions in creation order.
    pub fn partitions(&self) -> impl Iterator<Item = &Partition> {
        self.partitions.values()
    }

    pub fn partition_table(&self) -> &PartitionTable {
        &self.partitions
    }

    pub fn partition(&self, idx: usize) -> Option<&Partition> {
        self.partitions
            .get_index(idx)
            .map(|(_, p)| p)
    }

    pub fn partition_by_name(&self, name: &str) -> Option<&Partition> {
        self.partitions.get(name)
    }

    /// Processes in creation order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn rejected(&self) -> &[CandidateRejected] {
        &self.rejected
    }

    /// Sum of all partition sizes. For the external scenario this is
    /// also the total admitted demand.
    pub fn partitioned_memory(&self) -> MemUnits {
        self.partitions
            .values()
            .map(|p| p.size)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Forgets every assignment: all partitions become free, all
    /// processes unplaced. Partitions and processes themselves stay.
    pub fn reset(&self) {
        self.partitions
            .values()
            .for_each(|p| p.vacate());
        self.processes
            .iter()
            .for_each(|p| p.evict());
    }

    /// Links process `proc_idx` with partition `part_idx`.
    pub(crate) fn assign(&self, proc_idx: usize, part_idx: usize) {
        let (part, proc) = (&self.partitions[part_idx], &self.processes[proc_idx]);
        debug_assert!(proc.size <= part.size, "{} too small for process {}", part.name, proc_idx + 1);
        part.occupy(proc_idx);
        proc.place_in(part_idx);
    }
}
