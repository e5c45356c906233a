// HiGHS engine adapter.
// Translates the domain model to the HiGHS column/row API and the HiGHS
// terminal status onto the engine-status vocabulary.

use highs::{HighsModelStatus, RowProblem, Sense};
use tracing::warn;

use crate::domain::engine::{EngineFault, Result, SolveEngine};
use crate::domain::models::{Model, SolveOutcome};
use crate::domain::value_objects::{ConstraintSense, EngineStatus, VariableType};

pub struct HighsEngine {
    threads: usize,
}

impl HighsEngine {
    pub fn new() -> Self {
        Self { threads: 1 }
    }
}

impl Default for HighsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveEngine for HighsEngine {
    fn name(&self) -> &str {
        "HiGHS"
    }

    fn configure(&mut self, requested_cores: usize) -> usize {
        // HiGHS accepts any positive thread count; clamp only the
        // degenerate request.
        self.threads = requested_cores.max(1);
        self.threads
    }

    fn solve(&self, model: &Model) -> Result<SolveOutcome> {
        let statistics = model.statistics();

        let mut pb = RowProblem::default();
        let mut columns = Vec::with_capacity(model.num_variables());
        for (variable, &cost) in model.variables.iter().zip(&model.objective) {
            let lower = variable.lower_bound;
            let upper = variable.upper_bound.unwrap_or(f64::INFINITY);
            let col = match variable.variable_type {
                VariableType::Integer | VariableType::Binary => {
                    pb.add_integer_column(cost, lower..upper)
                }
                VariableType::Continuous => pb.add_column(cost, lower..upper),
            };
            columns.push(col);
        }

        for constraint in &model.constraints {
            let terms: Vec<_> = constraint
                .coefficients
                .iter()
                .enumerate()
                .filter(|(_, coefficient)| **coefficient != 0.0)
                .map(|(i, &coefficient)| (columns[i], coefficient))
                .collect();
            match constraint.sense {
                ConstraintSense::LessThanOrEqual => {
                    pb.add_row(..=constraint.rhs, &terms);
                }
                ConstraintSense::Equal => {
                    pb.add_row(constraint.rhs..=constraint.rhs, &terms);
                }
                ConstraintSense::GreaterThanOrEqual => {
                    pb.add_row(constraint.rhs.., &terms);
                }
            }
        }

        let mut highs_model = pb.optimise(Sense::Minimise);
        highs_model.set_option("threads", self.threads as i32);
        highs_model.set_option("output_flag", false);

        let solved = highs_model.solve();
        match solved.status() {
            HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                if values.len() != model.num_variables() {
                    return Err(EngineFault::Solution(format!(
                        "HiGHS returned {} column values for {} variables",
                        values.len(),
                        model.num_variables()
                    )));
                }
                let objective = model.objective_value(&values);
                Ok(SolveOutcome::optimal(objective, values, statistics))
            }
            HighsModelStatus::Infeasible => Ok(SolveOutcome::without_solution(
                EngineStatus::Infeasible,
                statistics,
            )),
            HighsModelStatus::UnboundedOrInfeasible => Ok(SolveOutcome::without_solution(
                EngineStatus::InfeasibleOrUnbounded,
                statistics,
            )),
            HighsModelStatus::Unbounded => Ok(SolveOutcome::without_solution(
                EngineStatus::Unbounded,
                statistics,
            )),
            status => {
                warn!(?status, "unclassified HiGHS terminal status");
                Ok(SolveOutcome::without_solution(
                    EngineStatus::Unknown,
                    statistics,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, Variable};

    fn engine() -> HighsEngine {
        let mut engine = HighsEngine::new();
        engine.configure(2);
        engine
    }

    fn single_variable_model(constraints: Vec<Constraint>, cost: f64) -> Model {
        Model {
            variables: vec![Variable::continuous("x")],
            groups: Vec::new(),
            objective: vec![cost],
            constraints,
        }
    }

    #[test]
    fn solves_a_small_lp_to_optimality() {
        // min x subject to x >= 3
        let model = single_variable_model(
            vec![Constraint::new(
                "floor",
                ConstraintSense::GreaterThanOrEqual,
                vec![1.0],
                3.0,
            )],
            1.0,
        );
        let outcome = engine().solve(&model).unwrap();
        assert_eq!(outcome.status, EngineStatus::Optimal);
        assert!((outcome.objective_value.unwrap() - 3.0).abs() < 1e-6);
        assert!((outcome.variable_values[0] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn reports_infeasibility_as_an_outcome() {
        // x >= 2 and x <= 1 cannot both hold
        let model = single_variable_model(
            vec![
                Constraint::new("lo", ConstraintSense::GreaterThanOrEqual, vec![1.0], 2.0),
                Constraint::new("hi", ConstraintSense::LessThanOrEqual, vec![1.0], 1.0),
            ],
            1.0,
        );
        let outcome = engine().solve(&model).unwrap();
        assert_eq!(outcome.status, EngineStatus::Infeasible);
        assert!(!outcome.has_solution());
    }

    #[test]
    fn reports_an_unbounded_objective_as_an_outcome() {
        // min -x with x unbounded above
        let model = single_variable_model(Vec::new(), -1.0);
        let outcome = engine().solve(&model).unwrap();
        assert!(matches!(
            outcome.status,
            EngineStatus::Unbounded | EngineStatus::InfeasibleOrUnbounded
        ));
    }

    #[test]
    fn configure_clamps_a_zero_budget() {
        let mut engine = HighsEngine::new();
        assert_eq!(engine.configure(0), 1);
        assert_eq!(engine.configure(6), 6);
    }
}
