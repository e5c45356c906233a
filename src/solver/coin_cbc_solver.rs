// COIN-OR CBC engine adapter, through the good_lp modeling interface.

use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolution, SolverModel, Variable as GoodLpVariable,
};

use crate::domain::engine::{EngineFault, Result, SolveEngine};
use crate::domain::models::{Model, SolveOutcome};
use crate::domain::value_objects::{ConstraintSense, EngineStatus, VariableType};

pub struct CoinCbcEngine;

impl CoinCbcEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveEngine for CoinCbcEngine {
    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn configure(&mut self, _requested_cores: usize) -> usize {
        // CBC as linked here runs single-threaded; whatever the
        // environment requested, one core is what the solve gets.
        1
    }

    fn solve(&self, model: &Model) -> Result<SolveOutcome> {
        let statistics = model.statistics();

        let mut vars = variables!();
        let mut lp_variables: Vec<GoodLpVariable> = Vec::new();
        for definition in &model.variables {
            let lower = definition.lower_bound;
            let upper = definition.upper_bound.unwrap_or(f64::INFINITY);
            let var = match definition.variable_type {
                VariableType::Integer | VariableType::Binary => {
                    vars.add(variable().integer().min(lower).max(upper))
                }
                VariableType::Continuous => vars.add(variable().min(lower).max(upper)),
            };
            lp_variables.push(var);
        }

        let mut objective: Expression = 0.into();
        for (i, &coefficient) in model.objective.iter().enumerate() {
            if coefficient != 0.0 {
                objective += coefficient * lp_variables[i];
            }
        }

        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);
        for constraint in &model.constraints {
            let mut lhs: Expression = 0.into();
            for (i, &coefficient) in constraint.coefficients.iter().enumerate() {
                if coefficient != 0.0 {
                    lhs += coefficient * lp_variables[i];
                }
            }
            lp_model = match constraint.sense {
                ConstraintSense::LessThanOrEqual => lp_model.with(lhs.leq(constraint.rhs)),
                ConstraintSense::Equal => lp_model.with(lhs.eq(constraint.rhs)),
                ConstraintSense::GreaterThanOrEqual => lp_model.with(lhs.geq(constraint.rhs)),
            };
        }

        match lp_model.solve() {
            Ok(solution) => {
                let values: Vec<f64> = lp_variables
                    .iter()
                    .map(|var| solution.value(*var))
                    .collect();
                let objective = model.objective_value(&values);
                Ok(SolveOutcome::optimal(objective, values, statistics))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::without_solution(
                EngineStatus::Infeasible,
                statistics,
            )),
            Err(ResolutionError::Unbounded) => Ok(SolveOutcome::without_solution(
                EngineStatus::Unbounded,
                statistics,
            )),
            Err(error) => Err(EngineFault::Backend(format!("{:?}", error))),
        }
    }
}
