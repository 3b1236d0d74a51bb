//! Runs the requested parts of one registered solver

use crate::config::Config;
use crate::error::CliError;
use advent_core::{FactoryInfo, Registry, SolverError};
use chrono::TimeDelta;
use std::ops::RangeInclusive;

/// What happened to one part
#[derive(Debug)]
pub enum PartOutcome {
    Solved(String),
    /// The input lacks what this part needs and the part was not asked for
    Skipped(SolverError),
    Failed(SolverError),
}

impl PartOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            PartOutcome::Solved(answer) => Some(answer),
            _ => None,
        }
    }
}

/// Result from solving a single part
pub struct PartResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub outcome: PartOutcome,
    pub solve_duration: TimeDelta,
    /// Reported on the first part only; parsing happens once
    pub parse_duration: Option<TimeDelta>,
}

/// The solver and parts selected by the config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Sequential runner over a registry
pub struct Runner {
    registry: Registry,
    year: u16,
    day: u8,
    part_filter: Option<u8>,
}

impl Runner {
    pub fn new(registry: Registry, config: &Config) -> Self {
        Self {
            registry,
            year: config.year,
            day: config.day,
            part_filter: config.part_filter,
        }
    }

    /// Resolve the configured year/day/part against the registry
    pub fn work_item(&self) -> Result<WorkItem, CliError> {
        let info = self
            .registry
            .get_info(self.year, self.day)
            .ok_or(SolverError::NotFound(self.year, self.day))?;
        Ok(WorkItem {
            year: self.year,
            day: self.day,
            parts: self.filter_parts(info)?,
        })
    }

    fn filter_parts(&self, info: FactoryInfo) -> Result<RangeInclusive<u8>, CliError> {
        match self.part_filter {
            Some(part) if (1..=info.parts).contains(&part) => Ok(part..=part),
            Some(part) => Err(CliError::PartUnavailable {
                year: info.id.year,
                day: info.id.day,
                part,
                parts: info.parts,
            }),
            None => Ok(1..=info.parts),
        }
    }

    /// Parse `input` once, then solve each selected part in order.
    ///
    /// A parse failure aborts the run; a failing part is reported in its
    /// result and the remaining parts still run. Without a part filter, a
    /// part whose target is absent from the input is skipped, unless every
    /// part would be.
    pub fn run(&self, input: &str) -> Result<Vec<PartResult>, CliError> {
        let work = self.work_item()?;
        let mut solver = self.registry.create_solver(work.year, work.day, input)?;
        let mut parse_duration = Some(solver.parse_duration());

        let mut results: Vec<PartResult> = work
            .parts
            .map(|part| {
                let _span =
                    tracing::info_span!("solve", year = work.year, day = work.day, part).entered();
                let (outcome, solve_duration) = match solver.solve(part) {
                    Ok(result) => {
                        let duration = result.duration();
                        (PartOutcome::Solved(result.answer), duration)
                    }
                    Err(e) => {
                        let e = SolverError::from(e);
                        let outcome = if self.part_filter.is_none() && e.is_missing_data() {
                            tracing::info!(reason = %e, "part skipped");
                            PartOutcome::Skipped(e)
                        } else {
                            tracing::info!(error = %e, "part failed");
                            PartOutcome::Failed(e)
                        };
                        (outcome, TimeDelta::zero())
                    }
                };
                PartResult {
                    year: work.year,
                    day: work.day,
                    part,
                    outcome,
                    solve_duration,
                    parse_duration: parse_duration.take(),
                }
            })
            .collect();

        // Nothing left to answer: the missing targets are the failure
        if results
            .iter()
            .all(|r| matches!(r.outcome, PartOutcome::Skipped(_)))
        {
            results = results
                .into_iter()
                .map(|r| match r.outcome {
                    PartOutcome::Skipped(e) => PartResult {
                        outcome: PartOutcome::Failed(e),
                        ..r
                    },
                    _ => r,
                })
                .collect();
        }
        Ok(results)
    }
}
