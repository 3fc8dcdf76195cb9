use crate::utils::*;

/// Holds at most one [Scenario] plus the latest [AllocationResult] over
/// it, and nothing else. Front ends keep one of these around and drive
/// it with the operator's choices.
///
/// Submitting a new scenario discards the previous one. A failed submit
/// leaves the simulator exactly as it was.
#[derive(Debug, Default)]
pub struct Simulator {
    scenario:   Option<Scenario>,
    last:       Option<AllocationResult>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs an already-built scenario.
    pub fn submit(&mut self, scenario: Scenario) -> &Scenario {
        self.last = None;
        self.scenario.insert(scenario)
    }

    pub fn submit_internal<T, I>(&mut self, total_memory: T, process_sizes: I) -> Result<&Scenario, FragError>
    where   T: IntoSize,
            I: IntoIterator,
            I::Item: IntoSize {
        let s = Scenario::build_internal(total_memory, process_sizes)?;

        Ok(self.submit(s))
    }

    pub fn submit_external<T, I>(&mut self, total_memory: T, candidates: I) -> Result<&Scenario, FragError>
    where   T: IntoSize,
            I: IntoIterator,
            I::Item: IntoSize {
        let s = Scenario::build_external(total_memory, candidates)?;

        Ok(self.submit(s))
    }

    /// Runs the named strategy over the current scenario, from reset
    /// state. An unknown name is reported before anything is touched.
    pub fn allocate(&mut self, strategy: &str) -> Result<&AllocationResult, FragError> {
        let strategy: Strategy = strategy.parse()?;

        self.allocate_with(strategy)
    }

    pub fn allocate_with(&mut self, strategy: Strategy) -> Result<&AllocationResult, FragError> {
        let scenario = self.scenario
            .as_ref()
            .ok_or(FragError::NoScenario)?;
        let res = crate::algo::run(strategy, scenario);

        Ok(&*self.last.insert(res))
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn last_result(&self) -> Option<&AllocationResult> {
        self.last.as_ref()
    }

    pub fn report(&self) -> Result<Report, FragError> {
        let scenario = self.scenario
            .as_ref()
            .ok_or(FragError::NoScenario)?;

        Ok(Report::new(scenario, self.last.as_ref()))
    }

    /// Clears assignments but keeps the scenario, as if no strategy had
    /// ever run.
    pub fn reset(&mut self) {
        if let Some(s) = &self.scenario {
            s.reset();
        }
        self.last = None;
    }

    /// Back to square one: no scenario, no results.
    pub fn clear(&mut self) {
        self.scenario = None;
        self.last = None;
    }

    pub fn is_clear(&self) -> bool {
        self.scenario.is_none() && self.last.is_none()
    }
}
