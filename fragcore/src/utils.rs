pub use std::{
    cell::Cell,
    fmt,
    hash::BuildHasherDefault,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
    str::FromStr,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use indexmap::IndexMap;
pub use ahash::AHasher;
pub use serde::{Deserialize, Serialize};
pub use log::{debug, info, warn};

pub use crate::{Partition, Process, Scenario,
    algo::*,
    report::*,
    scenario::*,
};

/// The unit in which both pool and process sizes are measured. The
/// simulator does not care whether these are bytes, kilobytes or
/// something else; the only requirement is that all sizes of a run
/// share the unit.
///
/// Floating-point, because the internal-fragmentation scenario splits
/// the pool into `total / N` equal blocks with no rounding.
pub type MemUnits = f64;

/// Partitions keyed by name. Iteration order is creation order, which
/// every placement strategy relies upon for tie-breaking. A plain
/// `HashMap` would scramble it.
pub type PartitionTable = IndexMap<String, Partition, BuildHasherDefault<AHasher>>;

/// Which user-supplied number failed validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    TotalMemory,
    ProcessCount,
    ProcessSize,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::TotalMemory  => { write!(f, "total memory size") },
            Field::ProcessCount => { write!(f, "number of processes") },
            Field::ProcessSize  => { write!(f, "process size") },
        }
    }
}

#[derive(Error, Debug)]
/// Hard failures. Anything returned as a [FragError] aborts the
/// operation that produced it and leaves no partial state behind.
///
/// Soft failures ([CandidateRejected], [PlacementFailed]) are *not*
/// in here: they are recorded inside the scenario or the allocation
/// result and the operation carries on.
pub enum FragError {
    #[error("invalid {field} at index {index}: {raw:?} is {why}")]
    InvalidInput {
        field:  Field,
        /// Zero-based position of the offending value in its input.
        index:  usize,
        raw:    String,
        why:    &'static str,
    },
    #[error("unknown allocation strategy {0:?} (expected best, worst or first fit)")]
    UnknownStrategy(String),
    #[error("no scenario has been submitted")]
    NoScenario,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FragError {
    fn invalid(field: Field, index: usize, raw: impl ToString, why: &'static str) -> Self {
        FragError::InvalidInput {
            field,
            index,
            raw: raw.to_string(),
            why,
        }
    }
}

/// Anything that may stand in for a memory size at the input
/// boundary: either an already-numeric value, or raw text as typed
/// by a user or read from a file.
///
/// Validation happens exactly once, here. Past this point the rest
/// of the crate only ever sees finite, positive [MemUnits].
pub trait IntoSize {
    /// Converts to a finite number, without judging its sign.
    fn into_number(self, field: Field, index: usize) -> Result<MemUnits, FragError>;

    /// Converts to a finite, strictly positive number.
    fn into_size(self, field: Field, index: usize) -> Result<MemUnits, FragError>
    where Self: Sized {
        let v = self.into_number(field, index)?;

        positive(v, field, index, v)
    }
}

/// `raw` is what gets reported, so text inputs pass themselves rather
/// than the number they parsed to.
fn positive(v: MemUnits, field: Field, index: usize, raw: impl ToString) -> Result<MemUnits, FragError> {
    if v > 0.0 { Ok(v) }
    else { Err(FragError::invalid(field, index, raw, "not positive")) }
}

impl IntoSize for MemUnits {
    fn into_number(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        if self.is_finite() { Ok(self) }
        else { Err(FragError::invalid(field, index, self, "not a finite number")) }
    }
}

impl IntoSize for &str {
    fn into_number(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Err(FragError::invalid(field, index, self, "empty"));
        }
        match trimmed.parse::<MemUnits>() {
            Ok(v)   => {
                // `parse` happily accepts "inf" and "NaN".
                if v.is_finite() { Ok(v) }
                else { Err(FragError::invalid(field, index, self, "not a finite number")) }
            },
            Err(_)  => { Err(FragError::invalid(field, index, self, "not a number")) }
        }
    }

    fn into_size(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        let v = self.into_number(field, index)?;

        positive(v, field, index, self)
    }
}

impl IntoSize for String {
    fn into_number(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        self.as_str().into_number(field, index)
    }

    fn into_size(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        self.as_str().into_size(field, index)
    }
}

impl IntoSize for &String {
    fn into_number(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        self.as_str().into_number(field, index)
    }

    fn into_size(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        self.as_str().into_size(field, index)
    }
}

/// Answers from a fallible source, such as a [crate::Prompter]. A read
/// failure surfaces as the error it is, not as an invalid size.
impl<T: IntoSize> IntoSize for Result<T, FragError> {
    fn into_number(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        self?.into_number(field, index)
    }

    fn into_size(self, field: Field, index: usize) -> Result<MemUnits, FragError> {
        self?.into_size(field, index)
    }
}

/// Parses a user-supplied process count. Must be a positive integer.
pub fn parse_count(raw: &str) -> Result<usize, FragError> {
    match raw.trim().parse::<usize>() {
        Ok(0)   => { Err(FragError::invalid(Field::ProcessCount, 0, raw, "not positive")) },
        Ok(n)   => { Ok(n) },
        Err(_)  => {
            if raw.trim().is_empty() {
                Err(FragError::invalid(Field::ProcessCount, 0, raw, "empty"))
            } else {
                Err(FragError::invalid(Field::ProcessCount, 0, raw, "not a positive integer"))
            }
        }
    }
}

/// Renders a size the way a person would write it: no decimals when
/// the value is integral, two otherwise.
pub fn fmt_units(v: MemUnits) -> String {
    if v.fract() == 0.0 { format!("{v:.0}") }
    else { format!("{v:.2}") }
}
