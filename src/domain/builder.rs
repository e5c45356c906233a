//! Model construction: turns a [`BlendSpec`] into a solver-ready [`Model`].

use super::blend::{BlendSpec, ModelError};
use super::models::{Constraint, Model, Variable, VariableGroup};
use super::value_objects::VariableType;

/// Build the blend program for one job.
///
/// Declares the variable groups in a fixed order (pure metal, raw
/// material, scrap, ingots, elements), composes the minimize-cost
/// objective, and adds the alloy-total and per-element mass-balance
/// equalities. Deterministic: the same spec always produces the same
/// model.
pub fn build_model(spec: &BlendSpec) -> Result<Model, ModelError> {
    spec.validate()?;

    let elements = spec.num_elements();
    let mut under_construction = ModelParts::default();

    under_construction.add_group(
        "pure_metal",
        "metal",
        "PureMetal",
        VariableType::Continuous,
        &spec.metal_costs,
        None,
    );
    under_construction.add_group(
        "raw_material",
        "material",
        "Raw",
        VariableType::Continuous,
        &spec.raw_costs,
        None,
    );
    under_construction.add_group(
        "scrap",
        "scrap",
        "Scrap",
        VariableType::Continuous,
        &spec.scrap_costs,
        None,
    );
    under_construction.add_group(
        "ingots",
        "ingots",
        "Ingots",
        VariableType::Integer,
        &spec.ingot_costs,
        None,
    );

    // Element variables carry no cost; their bounds enforce the alloy's
    // per-element proportion limits.
    let element_bounds: Vec<(f64, f64)> = spec
        .min_fraction
        .iter()
        .zip(&spec.max_fraction)
        .map(|(min, max)| (min * spec.alloy_quantity, max * spec.alloy_quantity))
        .collect();
    under_construction.add_group(
        "elements",
        "elements",
        "Elements",
        VariableType::Continuous,
        &vec![0.0; elements],
        Some(&element_bounds),
    );

    let ModelParts {
        variables,
        groups,
        objective,
    } = under_construction;

    let total = variables.len();
    let [metal, raw, scrap, ingots, element_group] = match groups.as_slice() {
        [m, r, s, i, e] => [
            (m.offset, m.len),
            (r.offset, r.len),
            (s.offset, s.len),
            (i.offset, i.len),
            (e.offset, e.len),
        ],
        _ => unreachable!("builder declares exactly five groups"),
    };

    let mut constraints = Vec::with_capacity(elements + 1);

    // Produce the requested alloy quantity
    let mut coefficients = vec![0.0; total];
    for k in 0..element_group.1 {
        coefficients[element_group.0 + k] = 1.0;
    }
    constraints.push(Constraint::equality(
        "alloy_total",
        coefficients,
        spec.alloy_quantity,
    ));

    // Each element in the alloy is what the sources contribute to it
    for j in 0..elements {
        let mut coefficients = vec![0.0; total];
        coefficients[element_group.0 + j] = 1.0;
        coefficients[metal.0 + j] = -1.0;
        for (k, fraction) in spec.raw_composition[j].iter().enumerate() {
            coefficients[raw.0 + k] = -fraction;
        }
        for (k, fraction) in spec.scrap_composition[j].iter().enumerate() {
            coefficients[scrap.0 + k] = -fraction;
        }
        for (k, fraction) in spec.ingot_composition[j].iter().enumerate() {
            coefficients[ingots.0 + k] = -fraction;
        }
        constraints.push(Constraint::equality(
            format!("element_balance_{}", j),
            coefficients,
            0.0,
        ));
    }

    Ok(Model {
        variables,
        groups,
        objective,
        constraints,
    })
}

/// Accumulates variables, groups, and objective coefficients while the
/// model takes shape
#[derive(Default)]
struct ModelParts {
    variables: Vec<Variable>,
    groups: Vec<VariableGroup>,
    objective: Vec<f64>,
}

impl ModelParts {
    fn add_group(
        &mut self,
        name: &str,
        unit: &str,
        kpi_label: &str,
        variable_type: VariableType,
        costs: &[f64],
        bounds: Option<&[(f64, f64)]>,
    ) {
        let offset = self.variables.len();
        for (i, cost) in costs.iter().enumerate() {
            let var_name = format!("{}_{}", name, i);
            let mut variable = match variable_type {
                VariableType::Integer => Variable::integer(var_name),
                _ => Variable::continuous(var_name),
            };
            if let Some(bounds) = bounds {
                let (lower, upper) = bounds[i];
                variable = variable.with_bounds(lower, Some(upper));
            }
            self.variables.push(variable);
            self.objective.push(*cost);
        }
        self.groups.push(VariableGroup {
            name: name.to_string(),
            unit: unit.to_string(),
            kpi_label: kpi_label.to_string(),
            variable_type,
            offset,
            len: costs.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ConstraintSense;

    #[test]
    fn sample_model_has_the_expected_shape() {
        let spec = BlendSpec::sample();
        let model = build_model(&spec).unwrap();

        // 3 metal + 2 raw + 2 scrap + 1 ingot + 3 element variables
        assert_eq!(model.num_variables(), 11);
        assert_eq!(model.groups.len(), 5);
        let names: Vec<&str> = model.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            ["pure_metal", "raw_material", "scrap", "ingots", "elements"]
        );
        // One total constraint plus one balance per element
        assert_eq!(model.constraints.len(), 4);
        assert!(model
            .constraints
            .iter()
            .all(|c| c.sense == ConstraintSense::Equal));
        assert_eq!(model.num_integer_variables(), 1);
        assert!(model.is_mixed_integer());
    }

    #[test]
    fn element_bounds_scale_with_the_alloy_quantity() {
        let spec = BlendSpec::sample();
        let model = build_model(&spec).unwrap();
        let elements = &model.groups[4];
        for (j, variable) in model.variables[elements.offset..elements.offset + elements.len]
            .iter()
            .enumerate()
        {
            let expected_lower = spec.min_fraction[j] * spec.alloy_quantity;
            let expected_upper = spec.max_fraction[j] * spec.alloy_quantity;
            assert!((variable.lower_bound - expected_lower).abs() < 1e-12);
            assert!((variable.upper_bound.unwrap() - expected_upper).abs() < 1e-12);
        }
    }

    #[test]
    fn balance_rows_weigh_sources_by_composition() {
        let spec = BlendSpec::sample();
        let model = build_model(&spec).unwrap();
        // Row for element 2: e_2 - m_2 - 0.05 r_0 - 0.30 r_1 - 0.40 s_0 - 0.70 s_1 - 0.45 i_0 = 0
        let row = &model.constraints[3];
        assert_eq!(row.name, "element_balance_2");
        assert_eq!(row.coefficients[2], -1.0); // pure metal 2
        assert!((row.coefficients[3] + 0.05).abs() < 1e-12); // raw 0
        assert!((row.coefficients[4] + 0.30).abs() < 1e-12); // raw 1
        assert!((row.coefficients[5] + 0.40).abs() < 1e-12); // scrap 0
        assert!((row.coefficients[6] + 0.70).abs() < 1e-12); // scrap 1
        assert!((row.coefficients[7] + 0.45).abs() < 1e-12); // ingot 0
        assert_eq!(row.coefficients[10], 1.0); // element 2
        assert_eq!(row.rhs, 0.0);
    }

    #[test]
    fn objective_carries_costs_only_on_source_groups() {
        let spec = BlendSpec::sample();
        let model = build_model(&spec).unwrap();
        assert_eq!(&model.objective[..3], &[22.0, 10.0, 13.0]);
        assert_eq!(&model.objective[3..5], &[6.0, 5.0]);
        assert_eq!(&model.objective[5..7], &[7.0, 8.0]);
        assert_eq!(&model.objective[7..8], &[9.0]);
        assert!(model.objective[8..].iter().all(|c| *c == 0.0));
    }

    #[test]
    fn inconsistent_data_fails_before_any_model_is_built() {
        let mut spec = BlendSpec::sample();
        spec.ingot_composition.push(vec![0.0]);
        assert!(build_model(&spec).is_err());
    }

    #[test]
    fn building_is_repeatable() {
        let spec = BlendSpec::sample();
        let a = build_model(&spec).unwrap();
        let b = build_model(&spec).unwrap();
        assert_eq!(a.objective, b.objective);
        assert_eq!(a.constraints.len(), b.constraints.len());
        for (ca, cb) in a.constraints.iter().zip(&b.constraints) {
            assert_eq!(ca.coefficients, cb.coefficients);
            assert_eq!(ca.rhs, cb.rhs);
        }
    }
}
