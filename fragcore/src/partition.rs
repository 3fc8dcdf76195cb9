use crate::utils::*;

impl Partition {
    pub(crate) fn new(ordinal: usize, size: MemUnits) -> Self {
        Self {
            name:       format!("Block {ordinal}"),
            size,
            occupant:   Cell::new(None),
        }
    }

    /// Index of the occupying process, if any.
    pub fn occupant(&self) -> Option<usize> {
        self.occupant.get()
    }

    pub fn is_free(&self) -> bool {
        self.occupant.get().is_none()
    }

    /// Returns `true` if the partition is free and at least
    /// `size` units big.
    pub fn accepts(&self, size: MemUnits) -> bool {
        self.is_free() && self.size >= size
    }

    pub(crate) fn occupy(&self, process: usize) {
        debug_assert!(self.is_free(), "{} is already occupied", self.name);
        self.occupant.set(Some(process));
    }

    pub(crate) fn vacate(&self) {
        self.occupant.set(None);
    }
}

impl Process {
    pub(crate) fn new(size: MemUnits) -> Self {
        Self {
            size,
            placement:  Cell::new(None),
        }
    }

    /// Index of the hosting partition, if the last run placed this process.
    pub fn placement(&self) -> Option<usize> {
        self.placement.get()
    }

    pub fn is_placed(&self) -> bool {
        self.placement.get().is_some()
    }

    pub(crate) fn place_in(&self, partition: usize) {
        self.placement.set(Some(partition));
    }

    pub(crate) fn evict(&self) {
        self.placement.set(None);
    }
}
