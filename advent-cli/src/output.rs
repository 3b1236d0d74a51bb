//! Output formatting for part results

use crate::runner::{PartOutcome, PartResult};
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Answer printed for a part whose input has no solution
pub const UNSOLVABLE: &str = "unsolvable";

/// Output formatter for part results
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    /// The wall clock for the summary starts here, so build the formatter
    /// before any input is read.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn print_result(&self, result: &PartResult) {
        match (&result.outcome, self.quiet) {
            (PartOutcome::Solved(answer), true) => println!("{}", answer),
            (PartOutcome::Skipped(_), true) => {}
            (PartOutcome::Failed(e), true) if e.is_no_solution() => println!("{}", UNSOLVABLE),
            (PartOutcome::Failed(e), true) => eprintln!("Error: {}", e),
            (PartOutcome::Failed(e), false) if !e.is_no_solution() => {
                eprintln!("{}", format_full(result))
            }
            (_, false) => println!("{}", format_full(result)),
        }
    }

    /// Summary block after all parts; shows nothing in quiet mode
    pub fn print_summary(&self, results: &[PartResult]) {
        if self.quiet {
            return;
        }

        let (mut solved, mut skipped, mut failed) = (0, 0, 0);
        for result in results {
            match result.outcome {
                PartOutcome::Solved(_) => solved += 1,
                PartOutcome::Skipped(_) => skipped += 1,
                PartOutcome::Failed(_) => failed += 1,
            }
        }
        let total_parse: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve: TimeDelta = results.iter().map(|r| r.solve_duration).sum();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} skipped, {} failed", solved, skipped, failed);
        println!("Total parse time: {}", format_duration(total_parse));
        println!("Total solve time: {}", format_duration(total_solve));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(self.elapsed())
        );
    }
}

/// One line per part: answer (or failure) with timing
fn format_full(result: &PartResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.outcome {
        PartOutcome::Solved(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            )
        }
        PartOutcome::Skipped(e) => format!("{}: skipped ({})", prefix, e),
        PartOutcome::Failed(e) if e.is_no_solution() => {
            format!("{}: {} ({})", prefix, UNSOLVABLE, e)
        }
        PartOutcome::Failed(e) => format!("{}: Error - {}", prefix, e),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

fn format_std_duration(d: Duration) -> String {
    TimeDelta::from_std(d).map_or_else(|_| "N/A".to_string(), format_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_core::{SolveError, SolverError};

    fn result(outcome: PartOutcome) -> PartResult {
        PartResult {
            year: 2025,
            day: 10,
            part: 2,
            outcome,
            solve_duration: TimeDelta::microseconds(2310),
            parse_duration: Some(TimeDelta::microseconds(120)),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(2310)), "2.31ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "1.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-5)), "-5µs");
    }

    #[test]
    fn test_format_full_answer() {
        assert_eq!(
            format_full(&result(PartOutcome::Solved("33".into()))),
            "2025/10 Part 2: 33 (parse: 120µs, solve: 2.31ms)"
        );
    }

    #[test]
    fn test_format_full_unsolvable() {
        let err = SolverError::Solve(SolveError::NoSolution("machine 0 is stuck".into()));
        let line = format_full(&result(PartOutcome::Failed(err)));
        assert!(line.starts_with("2025/10 Part 2: unsolvable ("), "{line}");
    }

    #[test]
    fn test_format_full_error() {
        let err = SolverError::Solve(SolveError::MissingData("no joltage".into()));
        assert_eq!(
            format_full(&result(PartOutcome::Failed(err))),
            "2025/10 Part 2: Error - Solve error: Missing data: no joltage"
        );
    }

    #[test]
    fn test_format_full_skipped() {
        let err = SolverError::Solve(SolveError::MissingData("no joltage".into()));
        assert_eq!(
            format_full(&result(PartOutcome::Skipped(err))),
            "2025/10 Part 2: skipped (Solve error: Missing data: no joltage)"
        );
    }

    #[test]
    fn test_elapsed_counts_from_construction() {
        let formatter = OutputFormatter::new(true);
        std::thread::sleep(Duration::from_millis(5));
        assert!(formatter.elapsed() >= Duration::from_millis(5));
    }
}
