// Domain value objects representing core business concepts

use std::fmt;

/// Type of decision variable in the blend model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// Continuous real number (x ∈ ℝ)
    Continuous,
    /// Integer number (x ∈ ℤ)
    Integer,
    /// Binary variable (x ∈ {0, 1})
    Binary,
}

/// Comparison sense of a linear constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

/// Terminal status reported by a solving engine, in the engine's own terms.
///
/// Adapters translate their backend's native classification onto this
/// vocabulary; the portable [`JobStatus`] is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Solution proven optimal
    Optimal,
    /// Feasible solution found, optimality not proven
    Feasible,
    /// Problem proven infeasible
    Infeasible,
    /// Engine could not separate infeasibility from unboundedness
    InfeasibleOrUnbounded,
    /// Objective proven unbounded
    Unbounded,
    /// Stopped on a time budget with no proof
    TimeLimit,
    /// Stopped on an iteration budget with no proof
    IterationLimit,
    /// Engine aborted or produced no classification
    Unknown,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStatus::Optimal => write!(f, "Optimal"),
            EngineStatus::Feasible => write!(f, "Feasible"),
            EngineStatus::Infeasible => write!(f, "Infeasible"),
            EngineStatus::InfeasibleOrUnbounded => write!(f, "InfeasibleOrUnbounded"),
            EngineStatus::Unbounded => write!(f, "Unbounded"),
            EngineStatus::TimeLimit => write!(f, "TimeLimit"),
            EngineStatus::IterationLimit => write!(f, "IterationLimit"),
            EngineStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Portable job outcome reported back to the dispatch framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// No classification could be made
    Unknown,
    /// Solution proven optimal
    OptimalSolution,
    /// Feasible solution found, optimality not proven
    FeasibleSolution,
    /// Problem proven infeasible
    InfeasibleSolution,
    /// Infeasible or unbounded, undecided
    InfeasibleOrUnboundedSolution,
    /// Objective proven unbounded
    UnboundedSolution,
}

impl JobStatus {
    /// Whether a usable solution exists and results should be published
    pub fn has_solution(&self) -> bool {
        matches!(
            self,
            JobStatus::OptimalSolution | JobStatus::FeasibleSolution
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Unknown => write!(f, "UNKNOWN"),
            JobStatus::OptimalSolution => write!(f, "OPTIMAL_SOLUTION"),
            JobStatus::FeasibleSolution => write!(f, "FEASIBLE_SOLUTION"),
            JobStatus::InfeasibleSolution => write!(f, "INFEASIBLE_SOLUTION"),
            JobStatus::InfeasibleOrUnboundedSolution => {
                write!(f, "INFEASIBLE_OR_UNBOUNDED_SOLUTION")
            }
            JobStatus::UnboundedSolution => write!(f, "UNBOUNDED_SOLUTION"),
        }
    }
}

/// Classification of an engine's terminal status onto the portable
/// vocabulary. Total over [`EngineStatus`]; anything outside the five core
/// outcomes falls through to `Unknown`.
impl From<EngineStatus> for JobStatus {
    fn from(status: EngineStatus) -> Self {
        match status {
            EngineStatus::Feasible => JobStatus::FeasibleSolution,
            EngineStatus::Infeasible => JobStatus::InfeasibleSolution,
            EngineStatus::InfeasibleOrUnbounded => JobStatus::InfeasibleOrUnboundedSolution,
            EngineStatus::Optimal => JobStatus::OptimalSolution,
            EngineStatus::Unbounded => JobStatus::UnboundedSolution,
            _ => JobStatus::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_statuses_map_onto_their_portable_counterparts() {
        let table = [
            (EngineStatus::Feasible, JobStatus::FeasibleSolution),
            (EngineStatus::Infeasible, JobStatus::InfeasibleSolution),
            (
                EngineStatus::InfeasibleOrUnbounded,
                JobStatus::InfeasibleOrUnboundedSolution,
            ),
            (EngineStatus::Optimal, JobStatus::OptimalSolution),
            (EngineStatus::Unbounded, JobStatus::UnboundedSolution),
        ];
        for (native, portable) in table {
            assert_eq!(JobStatus::from(native), portable);
        }
    }

    #[test]
    fn non_core_statuses_fall_through_to_unknown() {
        for native in [
            EngineStatus::TimeLimit,
            EngineStatus::IterationLimit,
            EngineStatus::Unknown,
        ] {
            assert_eq!(JobStatus::from(native), JobStatus::Unknown);
        }
    }

    #[test]
    fn only_optimal_and_feasible_carry_a_solution() {
        assert!(JobStatus::OptimalSolution.has_solution());
        assert!(JobStatus::FeasibleSolution.has_solution());
        assert!(!JobStatus::Unknown.has_solution());
        assert!(!JobStatus::InfeasibleSolution.has_solution());
        assert!(!JobStatus::InfeasibleOrUnboundedSolution.has_solution());
        assert!(!JobStatus::UnboundedSolution.has_solution());
    }

    #[test]
    fn job_status_renders_the_wire_labels() {
        assert_eq!(JobStatus::OptimalSolution.to_string(), "OPTIMAL_SOLUTION");
        assert_eq!(
            JobStatus::InfeasibleOrUnboundedSolution.to_string(),
            "INFEASIBLE_OR_UNBOUNDED_SOLUTION"
        );
    }
}
