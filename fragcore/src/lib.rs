//! Welcome to `fragsim`!
//!
//! A simulator of *fixed-partition* memory allocation. A pool of memory
//! is cut into partitions once, up front, and processes are then put
//! into them by one of three classic placement strategies. How the pool
//! is cut decides which kind of waste shows up:
//!
//! - **Internal fragmentation**: N equal blocks for N processes. A block
//!   may be larger than whatever lands in it.
//! - **External fragmentation**: one block per admitted process, sized to
//!   fit it exactly. Whatever remains of the pool once the next candidate
//!   no longer fits is unusable.
//!
//! The typical pipeline is [`Scenario`] → [`algo::run`] → [`report`].

mod partition;
pub mod utils;
pub mod scenario;
pub mod algo;
pub mod report;
pub mod session;
pub mod io;

/// Imports, type aliases, traits ... in general
/// useful stuff that shall be needed in many places.
pub use crate::utils::*;
pub use crate::session::Simulator;
pub use crate::io::{InputFormat, SizeGen, ListParser, CsvParser, Prompter, read_from_path};

/// A fixed block of the memory pool.
///
/// Partitions are created by a [`Scenario`] builder and never change size.
/// Which process sits in a partition is the only mutable part, and it is
/// written exclusively by [`algo::run`].
///
/// > ***INVARIANT:*** a partition holds at most one process, and never one
/// > bigger than [`size`](Partition::size).
#[derive(Debug)]
pub struct Partition {
    /// `"Block K"`, K being the 1-based creation order.
    pub name:           String,
    pub size:           MemUnits,
    // Index of the occupying process inside the scenario's process list.
    occupant:           Cell<Option<usize>>,
}

/// A request for [`size`](Process::size) units of memory.
///
/// A process that no strategy managed to place is *not* removed; it simply
/// keeps an empty [`placement`](Process::placement).
#[derive(Debug)]
pub struct Process {
    pub size:           MemUnits,
    // Index of the hosting partition inside the scenario's partition table.
    placement:          Cell<Option<usize>>,
}

/// The memory layout produced by one of the two builders
/// ([`Scenario::build_internal`], [`Scenario::build_external`]), together
/// with the processes that are to be placed into it.
///
/// A scenario is built once and then allocated any number of times. Every
/// allocation run starts by calling [`Scenario::reset`], so runs do not
/// see each other's assignments.
///
/// Assignment state lives in [`Cell`]s: a scenario can be shared by
/// reference within a thread, but is not `Sync`.
#[derive(Debug)]
pub struct Scenario {
    kind:               ScenarioKind,
    total_memory:       MemUnits,
    partitions:         PartitionTable,
    processes:          Vec<Process>,
    // External scenario only: candidates that did not fit in what was
    // left of the pool.
    rejected:           Vec<CandidateRejected>,
}
