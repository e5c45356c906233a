//! Blend problem data: sources, costs, and element composition.
//!
//! The goal is to blend four kinds of sources into an alloy: pure metal,
//! raw materials, scrap, and ingots. Each source has a cost and is made up
//! of elements in different proportions; ingots are indivisible, so they
//! are modeled as integers. The alloy must hold a minimum and maximum
//! proportion of each element, and a requested quantity must be produced
//! at minimum cost.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Job parameter carrying a full problem spec as JSON
pub const PARAM_BLEND_SPEC: &str = "blend_spec";
/// Job parameter overriding the requested alloy quantity
pub const PARAM_ALLOY_QUANTITY: &str = "alloy_quantity";

/// Invalid or inconsistent problem data, detected before any solve attempt
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{matrix} has {found} rows but the problem declares {expected} elements")]
    MatrixRowMismatch {
        matrix: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{matrix} row {row} has {found} columns but the group declares {expected} units")]
    MatrixColumnMismatch {
        matrix: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("fraction bounds declare {found} entries but the problem declares {expected} elements")]
    FractionLengthMismatch { expected: usize, found: usize },
    #[error("element {element} has min fraction {min} above max fraction {max}")]
    InvalidFractionBounds { element: usize, min: f64, max: f64 },
    #[error("alloy quantity must be positive, got {0}")]
    InvalidAlloyQuantity(f64),
    #[error("problem declares an empty {0} group")]
    EmptyGroup(&'static str),
    #[error("invalid job parameter {key}: {reason}")]
    InvalidParameter { key: String, reason: String },
}

/// Immutable problem data for one blend job.
///
/// Composition matrices are `[element][source-unit]`: row `j` lists, for
/// each unit of the group, the fraction of element `j` it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendSpec {
    /// Requested alloy quantity
    pub alloy_quantity: f64,
    /// Cost per unit of pure metal, one per element
    pub metal_costs: Vec<f64>,
    /// Cost per unit of each raw material
    pub raw_costs: Vec<f64>,
    /// Cost per unit of each scrap source
    pub scrap_costs: Vec<f64>,
    /// Cost per ingot
    pub ingot_costs: Vec<f64>,
    /// Minimum fraction of each element in the alloy
    pub min_fraction: Vec<f64>,
    /// Maximum fraction of each element in the alloy
    pub max_fraction: Vec<f64>,
    /// Element composition of each raw material
    pub raw_composition: Vec<Vec<f64>>,
    /// Element composition of each scrap source
    pub scrap_composition: Vec<Vec<f64>>,
    /// Element composition of each ingot kind
    pub ingot_composition: Vec<Vec<f64>>,
}

impl BlendSpec {
    /// The reference blend problem: three elements, two raw materials, two
    /// scrap sources, one ingot kind, 71 units of alloy requested.
    pub fn sample() -> Self {
        Self {
            alloy_quantity: 71.0,
            metal_costs: vec![22.0, 10.0, 13.0],
            raw_costs: vec![6.0, 5.0],
            scrap_costs: vec![7.0, 8.0],
            ingot_costs: vec![9.0],
            min_fraction: vec![0.05, 0.30, 0.60],
            max_fraction: vec![0.10, 0.40, 0.80],
            raw_composition: vec![
                vec![0.20, 0.01],
                vec![0.05, 0.00],
                vec![0.05, 0.30],
            ],
            scrap_composition: vec![
                vec![0.00, 0.01],
                vec![0.60, 0.00],
                vec![0.40, 0.70],
            ],
            ingot_composition: vec![vec![0.10], vec![0.45], vec![0.45]],
        }
    }

    /// Build the spec for one invocation from job parameters.
    ///
    /// Starts from the compiled-in sample data; `blend_spec` replaces the
    /// whole spec with a JSON value, `alloy_quantity` overrides the target
    /// quantity. Unknown keys are ignored.
    pub fn from_parameters(parameters: &HashMap<String, String>) -> Result<Self, ModelError> {
        let mut spec = match parameters.get(PARAM_BLEND_SPEC) {
            Some(json) => {
                serde_json::from_str(json).map_err(|e| ModelError::InvalidParameter {
                    key: PARAM_BLEND_SPEC.to_string(),
                    reason: e.to_string(),
                })?
            }
            None => Self::sample(),
        };
        if let Some(raw) = parameters.get(PARAM_ALLOY_QUANTITY) {
            spec.alloy_quantity =
                raw.parse::<f64>()
                    .map_err(|e| ModelError::InvalidParameter {
                        key: PARAM_ALLOY_QUANTITY.to_string(),
                        reason: e.to_string(),
                    })?;
        }
        Ok(spec)
    }

    pub fn num_elements(&self) -> usize {
        self.metal_costs.len()
    }

    pub fn num_raw(&self) -> usize {
        self.raw_costs.len()
    }

    pub fn num_scrap(&self) -> usize {
        self.scrap_costs.len()
    }

    pub fn num_ingots(&self) -> usize {
        self.ingot_costs.len()
    }

    /// Check dimensional consistency of the problem data.
    ///
    /// Every composition matrix must have one row per element and one
    /// column per unit of its group; fraction bounds must cover every
    /// element with `min <= max`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.alloy_quantity <= 0.0 {
            return Err(ModelError::InvalidAlloyQuantity(self.alloy_quantity));
        }
        let elements = self.num_elements();
        if elements == 0 {
            return Err(ModelError::EmptyGroup("pure metal"));
        }
        if self.num_raw() == 0 {
            return Err(ModelError::EmptyGroup("raw material"));
        }
        if self.num_scrap() == 0 {
            return Err(ModelError::EmptyGroup("scrap"));
        }
        if self.num_ingots() == 0 {
            return Err(ModelError::EmptyGroup("ingot"));
        }
        for fractions in [&self.min_fraction, &self.max_fraction] {
            if fractions.len() != elements {
                return Err(ModelError::FractionLengthMismatch {
                    expected: elements,
                    found: fractions.len(),
                });
            }
        }
        for (element, (min, max)) in self
            .min_fraction
            .iter()
            .zip(&self.max_fraction)
            .enumerate()
        {
            if min > max {
                return Err(ModelError::InvalidFractionBounds {
                    element,
                    min: *min,
                    max: *max,
                });
            }
        }
        Self::validate_matrix("raw composition", &self.raw_composition, elements, self.num_raw())?;
        Self::validate_matrix(
            "scrap composition",
            &self.scrap_composition,
            elements,
            self.num_scrap(),
        )?;
        Self::validate_matrix(
            "ingot composition",
            &self.ingot_composition,
            elements,
            self.num_ingots(),
        )?;
        Ok(())
    }

    fn validate_matrix(
        matrix: &'static str,
        rows: &[Vec<f64>],
        elements: usize,
        units: usize,
    ) -> Result<(), ModelError> {
        if rows.len() != elements {
            return Err(ModelError::MatrixRowMismatch {
                matrix,
                expected: elements,
                found: rows.len(),
            });
        }
        for (row, columns) in rows.iter().enumerate() {
            if columns.len() != units {
                return Err(ModelError::MatrixColumnMismatch {
                    matrix,
                    row,
                    expected: units,
                    found: columns.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_spec_is_valid() {
        BlendSpec::sample().validate().unwrap();
    }

    #[test]
    fn matrix_row_mismatch_is_rejected() {
        let mut spec = BlendSpec::sample();
        spec.raw_composition.pop();
        match spec.validate() {
            Err(ModelError::MatrixRowMismatch {
                matrix,
                expected,
                found,
            }) => {
                assert_eq!(matrix, "raw composition");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected row mismatch, got {:?}", other),
        }
    }

    #[test]
    fn matrix_column_mismatch_is_rejected() {
        let mut spec = BlendSpec::sample();
        spec.scrap_composition[1].push(0.25);
        assert!(matches!(
            spec.validate(),
            Err(ModelError::MatrixColumnMismatch { row: 1, .. })
        ));
    }

    #[test]
    fn crossed_fraction_bounds_are_rejected() {
        let mut spec = BlendSpec::sample();
        spec.min_fraction[2] = 0.9;
        assert!(matches!(
            spec.validate(),
            Err(ModelError::InvalidFractionBounds { element: 2, .. })
        ));
    }

    #[test]
    fn nonpositive_quantity_is_rejected() {
        let mut spec = BlendSpec::sample();
        spec.alloy_quantity = 0.0;
        assert!(matches!(
            spec.validate(),
            Err(ModelError::InvalidAlloyQuantity(_))
        ));
    }

    #[test]
    fn parameters_default_to_the_sample() {
        let spec = BlendSpec::from_parameters(&HashMap::new()).unwrap();
        assert_eq!(spec, BlendSpec::sample());
    }

    #[test]
    fn alloy_quantity_parameter_overrides_the_target() {
        let mut parameters = HashMap::new();
        parameters.insert(PARAM_ALLOY_QUANTITY.to_string(), "100.5".to_string());
        let spec = BlendSpec::from_parameters(&parameters).unwrap();
        assert!((spec.alloy_quantity - 100.5).abs() < 1e-12);
    }

    #[test]
    fn malformed_quantity_parameter_is_an_error() {
        let mut parameters = HashMap::new();
        parameters.insert(PARAM_ALLOY_QUANTITY.to_string(), "plenty".to_string());
        assert!(matches!(
            BlendSpec::from_parameters(&parameters),
            Err(ModelError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn spec_round_trips_through_json() {
        let spec = BlendSpec::sample();
        let json = serde_json::to_string(&spec).unwrap();
        let mut parameters = HashMap::new();
        parameters.insert(PARAM_BLEND_SPEC.to_string(), json);
        assert_eq!(BlendSpec::from_parameters(&parameters).unwrap(), spec);
    }
}
