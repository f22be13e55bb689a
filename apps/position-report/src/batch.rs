//! Parallel evaluation of every position in a report input

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use clmm_math::invariants::{check_pool, check_position, Violation};
use clmm_math::{evaluate_position_with, PositionReport, ReportOptions};
use clmm_types::PositionSnapshot;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::snapshot::{PositionOutcome, ReportInput};

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub report: ReportOptions,
    /// Invariant violations fail the position instead of only being logged
    pub strict: bool,
}

/// Evaluate all positions. A failing position is reported in place and never
/// aborts the rest of the batch; output order follows input order.
pub fn evaluate_batch(input: &ReportInput, options: &BatchOptions) -> Vec<PositionOutcome> {
    let pool_violations: BTreeMap<&str, Vec<Violation>> = input
        .pools
        .iter()
        .map(|(key, pool)| (key.as_str(), check_pool(pool)))
        .collect();

    for (key, violations) in &pool_violations {
        for violation in violations {
            warn!(pool = %key, "{violation}");
        }
    }

    info!(
        pools = input.pools.len(),
        positions = input.positions.len(),
        "evaluating positions"
    );

    let outcomes: Vec<PositionOutcome> = input
        .positions
        .par_iter()
        .map(|position| {
            match evaluate_one(input, &pool_violations, position, options) {
                Ok(report) => {
                    debug!(id = ?position.id, regime = ?report.regime, "position evaluated");
                    PositionOutcome::Report(report)
                }
                Err(err) => {
                    warn!(id = ?position.id, "position failed: {err:#}");
                    PositionOutcome::Failed {
                        id: position.id.clone(),
                        error: format!("{err:#}"),
                    }
                }
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|outcome| outcome.is_failed()).count();
    info!(evaluated = outcomes.len() - failed, failed, "batch complete");

    outcomes
}

fn evaluate_one(
    input: &ReportInput,
    pool_violations: &BTreeMap<&str, Vec<Violation>>,
    position: &PositionSnapshot,
    options: &BatchOptions,
) -> Result<PositionReport> {
    let (key, pool) = input.pool_for(position).ok_or_else(|| match &position.pool {
        Some(key) => anyhow!("unknown pool {key}"),
        None => anyhow!("position names no pool and the input holds {} pools", input.pools.len()),
    })?;

    let mut violations = check_position(position, pool);
    if options.strict {
        if let Some(broken) = pool_violations.get(key) {
            violations.extend_from_slice(broken);
        }
        if let Some(first) = violations.first() {
            bail!("pool {key}: {first}");
        }
    } else {
        for violation in &violations {
            warn!(id = ?position.id, pool = %key, "{violation}");
        }
    }

    Ok(evaluate_position_with(position, pool, &options.report)?)
}
