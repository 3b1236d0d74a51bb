//! Solver registry: maps (year, day) to a factory producing parsed solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::puzzle::Solver;
use std::collections::BTreeMap;
use std::fmt;

/// Days per event (1-25)
pub const DAYS_PER_YEAR: u8 = 25;

/// Puzzle identity, ordered by year then day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PuzzleId {
    pub year: u16,
    pub day: u8,
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.year, self.day)
    }
}

/// Factory turning raw input into a parsed solver instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

struct Entry {
    factory: SolverFactory,
    parts: u8,
    tags: &'static [&'static str],
}

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub id: PuzzleId,
    pub parts: u8,
    pub tags: &'static [&'static str],
}

/// Builder for an immutable [`Registry`]
///
/// ```
/// use advent_core::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .register_all_plugins()
///     .unwrap()
///     .build();
/// # let _ = registry;
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<PuzzleId, Entry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `year`/`day`.
    ///
    /// Fails on a day outside 1..=25 or when the slot is already taken.
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        tags: &'static [&'static str],
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        if day == 0 || day > DAYS_PER_YEAR {
            return Err(RegistrationError::InvalidDay(year, day));
        }
        let id = PuzzleId { year, day };
        if self.entries.contains_key(&id) {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        tracing::debug!(puzzle = %id, parts, ?tags, "registered solver");
        self.entries.insert(
            id,
            Entry {
                factory: Box::new(factory),
                parts,
                tags,
            },
        );
        Ok(self)
    }

    /// Register every plugin submitted through `inventory::submit!`
    /// (normally via `#[derive(AutoRegister)]`).
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_plugins(|_| true)
    }

    /// Register the plugins accepted by `filter`.
    ///
    /// ```
    /// use advent_core::RegistryBuilder;
    ///
    /// let registry = RegistryBuilder::new()
    ///     .register_plugins(|plugin| plugin.year == 2025 && plugin.tags.contains(&"linear-algebra"))
    ///     .unwrap()
    ///     .build();
    /// # let _ = registry;
    /// ```
    pub fn register_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin
                    .solver
                    .register_with(self, plugin.year, plugin.day, plugin.tags)?;
            }
        }
        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

/// Immutable lookup from puzzle id to solver factory
pub struct Registry {
    entries: BTreeMap<PuzzleId, Entry>,
}

impl Registry {
    /// Metadata for every registered solver, in year/day order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().map(|(id, entry)| FactoryInfo {
            id: *id,
            parts: entry.parts,
            tags: entry.tags,
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        let id = PuzzleId { year, day };
        self.entries.get(&id).map(|entry| FactoryInfo {
            id,
            parts: entry.parts,
            tags: entry.tags,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse `input` with the solver registered for `year`/`day`
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let entry = self
            .entries
            .get(&PuzzleId { year, day })
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::Parse)
    }
}

/// Object-safe registration hook, implemented for every [`Solver`]
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<RegistryBuilder, RegistrationError>;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: RegistryBuilder,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
    ) -> Result<RegistryBuilder, RegistrationError> {
        builder.register(year, day, S::PARTS, tags, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance) as Box<dyn DynSolver + '_>)
        })
    }
}

/// A solver submitted for automatic registration
///
/// ```ignore
/// inventory::submit! {
///     SolverPlugin { year: 2025, day: 10, solver: &Day10, tags: &["linear-algebra"] }
/// }
/// ```
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels for filtering (e.g. "gf2", "parsing")
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::puzzle::Puzzle;

    struct Lines;

    impl Puzzle for Lines {
        type Input<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::Input<'_>, ParseError> {
            Ok(input.lines().collect())
        }
    }

    impl Solver for Lines {
        const PARTS: u8 = 1;

        fn solve_part(input: &mut Self::Input<'_>, _part: u8) -> Result<String, SolveError> {
            Ok(input.len().to_string())
        }
    }

    #[test]
    fn test_register_and_create() {
        let registry = Lines.register_with(RegistryBuilder::new(), 2025, 3, &["io"])
            .unwrap()
            .build();

        assert_eq!(registry.len(), 1);
        let info = registry.get_info(2025, 3).unwrap();
        assert_eq!(info.parts, 1);
        assert_eq!(info.tags, &["io"]);

        let mut solver = registry.create_solver(2025, 3, "a\nb\nc").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "3");
        assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
    }

    #[test]
    fn test_duplicate_rejected() {
        let builder = Lines.register_with(RegistryBuilder::new(), 2025, 3, &[]).unwrap();
        let result = Lines.register_with(builder, 2025, 3, &[]);
        assert!(matches!(result, Err(RegistrationError::DuplicateSolver(2025, 3))));
    }

    #[test]
    fn test_invalid_day_rejected() {
        let result = Lines.register_with(RegistryBuilder::new(), 2025, 26, &[]);
        assert!(matches!(result, Err(RegistrationError::InvalidDay(2025, 26))));
        let result = Lines.register_with(RegistryBuilder::new(), 2025, 0, &[]);
        assert!(matches!(result, Err(RegistrationError::InvalidDay(2025, 0))));
    }

    #[test]
    fn test_missing_solver() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.create_solver(2025, 1, ""),
            Err(SolverError::NotFound(2025, 1))
        ));
    }

    #[test]
    fn test_iter_info_ordered() {
        let builder = Lines.register_with(RegistryBuilder::new(), 2025, 9, &[]).unwrap();
        let builder = Lines.register_with(builder, 2024, 12, &[]).unwrap();
        let builder = Lines.register_with(builder, 2025, 2, &[]).unwrap();
        let ids: Vec<_> = builder.build().iter_info().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["2024/12", "2025/02", "2025/09"]);
    }
}
