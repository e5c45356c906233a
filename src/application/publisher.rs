//! Result publication: solution tables and diagnostic metrics.
//!
//! Invoked only when the classified status carries a usable solution. All
//! artifact files are written to the context scratch directory first; only
//! after every write has succeeded are attachments registered and details
//! added, so a failure never leaves a partially committed result set.

use indexmap::IndexMap;
use tracing::Level;

use crate::domain::context::{PublishError, WorkerContext};
use crate::domain::models::{Model, SolveOutcome};

/// Scope prefix for model-level solve details
const MODEL_SCOPE: &str = "model";

/// Key of a model KPI detail, `<scope>.<metric>`
pub fn detail_kpi_name(scope: &str, name: &str) -> String {
    format!("{}.{}", scope, name)
}

/// Key of a structural statistic detail, `<scope>.<metric>`.
///
/// Shares the two-part convention with KPIs; the namespaces stay apart by
/// name choice (upper-case KPIs, snake_case statistics).
pub fn detail_stat_name(scope: &str, name: &str) -> String {
    format!("{}.{}", scope, name)
}

/// Publish the outcome of a solved job into the worker context.
pub fn publish(
    ctx: &mut dyn WorkerContext,
    model: &Model,
    outcome: &SolveOutcome,
) -> Result<(), PublishError> {
    let details = solve_details(model, outcome);

    // Materialize every table before committing anything
    let mut written = Vec::with_capacity(model.groups.len());
    for group in &model.groups {
        let name = format!("{}.csv", group.name);
        ctx.log_engine(Level::INFO, &format!("Publishing {}...", name));
        let path = ctx.temp_dir().join(&name);
        write_table(&name, &path, &group.unit, group.slice(&outcome.variable_values))?;
        written.push((name, path));
    }

    for (name, path) in &written {
        ctx.set_output_attachment(name, path)?;
    }
    ctx.add_solve_details(details);
    Ok(())
}

/// Diagnostic metrics for a usable solution: KPIs first (objective, gap,
/// native status, per-group cost subtotals), then structural statistics.
fn solve_details(model: &Model, outcome: &SolveOutcome) -> IndexMap<String, String> {
    let objective = outcome
        .objective_value
        .unwrap_or_else(|| model.objective_value(&outcome.variable_values));
    let gap = outcome
        .gap
        .map(|g| g.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut details = IndexMap::new();
    details.insert(
        detail_kpi_name(MODEL_SCOPE, "BEST_BOUND"),
        objective.to_string(),
    );
    details.insert(detail_kpi_name(MODEL_SCOPE, "MIP_GAP"), gap);
    details.insert(
        detail_kpi_name(MODEL_SCOPE, "STATUS"),
        outcome.status.to_string(),
    );
    for group in &model.groups {
        let costs = &model.objective[group.offset..group.offset + group.len];
        if costs.iter().any(|c| *c != 0.0) {
            details.insert(
                detail_kpi_name(MODEL_SCOPE, &group.kpi_label),
                model
                    .group_objective(group, &outcome.variable_values)
                    .to_string(),
            );
        }
    }

    let stats = outcome.statistics;
    details.insert(
        detail_stat_name(MODEL_SCOPE, "int_vars"),
        stats.integer_variables.to_string(),
    );
    details.insert(
        detail_stat_name(MODEL_SCOPE, "continuous_vars"),
        stats.continuous_variables.to_string(),
    );
    details.insert(
        detail_stat_name(MODEL_SCOPE, "bin_vars"),
        stats.binary_variables.to_string(),
    );
    details.insert(
        detail_stat_name(MODEL_SCOPE, "linear_constraints"),
        stats.linear_constraints.to_string(),
    );
    details.insert(
        detail_stat_name(MODEL_SCOPE, "quadratic_constraints"),
        stats.quadratic_constraints.to_string(),
    );
    details.insert(
        detail_stat_name(MODEL_SCOPE, "total_constraints"),
        stats.total_constraints.to_string(),
    );
    details.insert(
        detail_stat_name(MODEL_SCOPE, "total_variables"),
        stats.total_variables.to_string(),
    );
    details
}

/// Write one group table: a single header cell naming the unit, then one
/// value per row in declared variable order.
fn write_table(
    name: &str,
    path: &std::path::Path,
    unit: &str,
    values: &[f64],
) -> Result<(), PublishError> {
    let as_write_error = |source: csv::Error| PublishError::Write {
        name: name.to_string(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(as_write_error)?;
    writer.write_record([unit]).map_err(as_write_error)?;
    for value in values {
        writer
            .write_record([value.to_string()])
            .map_err(as_write_error)?;
    }
    writer.flush().map_err(|source| PublishError::Io {
        name: name.to_string(),
        source,
    })
}
