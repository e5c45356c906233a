use super::value_objects::{ConstraintSense, EngineStatus, VariableType};

/// Decision variable in the blend model
#[derive(Debug, Clone)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub name: String,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Continuous,
            lower_bound: 0.0,
            upper_bound: None,
            name: name.into(),
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Integer,
            lower_bound: 0.0,
            upper_bound: None,
            name: name.into(),
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.variable_type,
            VariableType::Integer | VariableType::Binary
        )
    }
}

/// A named, ordered run of variables sharing a domain kind.
///
/// Groups are spans into the model's flat variable vector, so a solution
/// vector can be sliced per group without holding engine handles.
#[derive(Debug, Clone)]
pub struct VariableGroup {
    /// Group name, also the artifact base name (e.g. `pure_metal`)
    pub name: String,
    /// Header label naming the group's semantic unit (e.g. `metal`)
    pub unit: String,
    /// KPI label for the group's objective contribution (e.g. `PureMetal`)
    pub kpi_label: String,
    pub variable_type: VariableType,
    /// Offset of the first variable of this group in the flat vector
    pub offset: usize,
    pub len: usize,
}

impl VariableGroup {
    /// Slice this group's values out of a flat model-ordered vector
    pub fn slice<'a>(&self, values: &'a [f64]) -> &'a [f64] {
        &values[self.offset..self.offset + self.len]
    }
}

/// Linear constraint over the model's flat variable vector
#[derive(Debug, Clone)]
pub struct Constraint {
    pub sense: ConstraintSense,
    /// Dense coefficients, one per model variable
    pub coefficients: Vec<f64>,
    pub rhs: f64,
    pub name: String,
}

impl Constraint {
    pub fn equality(name: impl Into<String>, coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            sense: ConstraintSense::Equal,
            coefficients,
            rhs,
            name: name.into(),
        }
    }

    pub fn new(
        name: impl Into<String>,
        sense: ConstraintSense,
        coefficients: Vec<f64>,
        rhs: f64,
    ) -> Self {
        Self {
            sense,
            coefficients,
            rhs,
            name: name.into(),
        }
    }
}

/// A built optimization model, ready to hand to a solve engine.
///
/// Always a minimization; the objective is a dense coefficient vector
/// aligned with `variables`.
#[derive(Debug, Clone)]
pub struct Model {
    pub variables: Vec<Variable>,
    pub groups: Vec<VariableGroup>,
    pub objective: Vec<f64>,
    pub constraints: Vec<Constraint>,
}

impl Model {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integer_variables() > 0
    }

    /// Objective value of a given assignment
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }

    /// Objective contribution of one group under a given assignment
    pub fn group_objective(&self, group: &VariableGroup, values: &[f64]) -> f64 {
        let costs = &self.objective[group.offset..group.offset + group.len];
        costs
            .iter()
            .zip(group.slice(values))
            .map(|(c, v)| c * v)
            .sum()
    }

    pub fn statistics(&self) -> ModelStatistics {
        let continuous = self
            .variables
            .iter()
            .filter(|v| v.variable_type == VariableType::Continuous)
            .count() as u32;
        let integer = self
            .variables
            .iter()
            .filter(|v| v.variable_type == VariableType::Integer)
            .count() as u32;
        let binary = self
            .variables
            .iter()
            .filter(|v| v.variable_type == VariableType::Binary)
            .count() as u32;
        ModelStatistics {
            total_variables: self.variables.len() as u32,
            continuous_variables: continuous,
            integer_variables: integer,
            binary_variables: binary,
            linear_constraints: self.constraints.len() as u32,
            // The model family is linear by construction
            quadratic_constraints: 0,
            total_constraints: self.constraints.len() as u32,
        }
    }
}

/// Structural statistics of a built model, by variable and constraint kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStatistics {
    pub total_variables: u32,
    pub continuous_variables: u32,
    pub integer_variables: u32,
    pub binary_variables: u32,
    pub linear_constraints: u32,
    pub quadratic_constraints: u32,
    pub total_constraints: u32,
}

/// Terminal state of one solve attempt
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: EngineStatus,
    /// Objective value of the incumbent, when one exists
    pub objective_value: Option<f64>,
    /// Relative optimality gap; `Some(0.0)` for proven-optimal outcomes,
    /// `None` where the backend exposes no bound information
    pub gap: Option<f64>,
    /// Flat solution vector in model variable order; empty without a solution
    pub variable_values: Vec<f64>,
    pub statistics: ModelStatistics,
}

impl SolveOutcome {
    /// Outcome with no usable solution attached
    pub fn without_solution(status: EngineStatus, statistics: ModelStatistics) -> Self {
        Self {
            status,
            objective_value: None,
            gap: None,
            variable_values: Vec::new(),
            statistics,
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>, statistics: ModelStatistics) -> Self {
        Self {
            status: EngineStatus::Optimal,
            objective_value: Some(value),
            gap: Some(0.0),
            variable_values,
            statistics,
        }
    }

    pub fn has_solution(&self) -> bool {
        !self.variable_values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_group_model() -> Model {
        Model {
            variables: vec![
                Variable::continuous("a0"),
                Variable::continuous("a1"),
                Variable::integer("b0"),
            ],
            groups: vec![
                VariableGroup {
                    name: "a".into(),
                    unit: "units_a".into(),
                    kpi_label: "A".into(),
                    variable_type: VariableType::Continuous,
                    offset: 0,
                    len: 2,
                },
                VariableGroup {
                    name: "b".into(),
                    unit: "units_b".into(),
                    kpi_label: "B".into(),
                    variable_type: VariableType::Integer,
                    offset: 2,
                    len: 1,
                },
            ],
            objective: vec![2.0, 3.0, 5.0],
            constraints: vec![Constraint::equality("sum", vec![1.0, 1.0, 1.0], 4.0)],
        }
    }

    #[test]
    fn group_slicing_follows_declared_spans() {
        let model = two_group_model();
        let values = [1.0, 2.0, 1.0];
        assert_eq!(model.groups[0].slice(&values), &[1.0, 2.0]);
        assert_eq!(model.groups[1].slice(&values), &[1.0]);
    }

    #[test]
    fn objective_and_group_contributions_add_up() {
        let model = two_group_model();
        let values = [1.0, 2.0, 1.0];
        let total = model.objective_value(&values);
        assert!((total - 13.0).abs() < 1e-12);
        let per_group: f64 = model
            .groups
            .iter()
            .map(|g| model.group_objective(g, &values))
            .sum();
        assert!((per_group - total).abs() < 1e-12);
    }

    #[test]
    fn statistics_count_variables_by_kind() {
        let stats = two_group_model().statistics();
        assert_eq!(stats.total_variables, 3);
        assert_eq!(stats.continuous_variables, 2);
        assert_eq!(stats.integer_variables, 1);
        assert_eq!(stats.binary_variables, 0);
        assert_eq!(stats.linear_constraints, 1);
        assert_eq!(stats.quadratic_constraints, 0);
    }

    #[test]
    fn integer_counts_sum_across_groups() {
        let model = Model {
            variables: vec![
                Variable::integer("i0"),
                Variable::integer("i1"),
                Variable::continuous("x"),
                Variable::integer("j0"),
            ],
            groups: Vec::new(),
            objective: vec![1.0; 4],
            constraints: Vec::new(),
        };
        assert_eq!(model.statistics().integer_variables, 3);
    }

    #[test]
    fn continuous_only_model_reports_zero_integer_variables() {
        let model = Model {
            variables: vec![Variable::continuous("x"), Variable::continuous("y")],
            groups: Vec::new(),
            objective: vec![1.0, 1.0],
            constraints: Vec::new(),
        };
        assert_eq!(model.statistics().integer_variables, 0);
        assert!(!model.is_mixed_integer());
    }
}
