//! sv_pipeline: deterministic calculation surface
//! (validate → resolve unions → proportions → allocate → committee checks → validity flags).
//!
//! This crate is I/O-free: inputs arrive as `sv_core` values (loaded by `sv_io`),
//! math lives in `sv_algo`. Every method runs independently; a method whose
//! allocator fails is left out of `methods` while the others still report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sv_algo::{AllocError, SeatAward, StaleSeats};
use sv_core::{
    entities::{BaseData, EffectiveEntity},
    errors::{ConfigurationError, CoreError},
    method::Method,
    variables::Params,
};
use thiserror::Error;
use tracing::{debug, warn};

pub mod allocate;
pub mod check_validity;
pub mod committee;
pub mod proportions;
pub mod validate;

// ---------------------------------- Result types ----------------------------------

/// Per-entity findings of the validator. Warnings, never failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationData {
    pub over_rounding: bool,
    pub lost_safe_seat: bool,
    /// Names of COMMITTEE unions whose internal split fails for this entity.
    pub committee_invalid: Vec<String>,
}

impl ValidationData {
    pub fn is_clean(&self) -> bool {
        !self.over_rounding && !self.lost_safe_seat && self.committee_invalid.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodResult {
    /// Sparse: entities without seats are absent.
    pub distribution: BTreeMap<String, u32>,
    pub order: Vec<SeatAward>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale: Option<StaleSeats>,
    pub validation: BTreeMap<String, ValidationData>,
}

impl MethodResult {
    pub fn seats_of(&self, name: &str) -> u32 {
        self.distribution.get(name).copied().unwrap_or(0)
    }

    /// True when no entity carries any validation flag.
    pub fn is_valid(&self) -> bool {
        self.validation.values().all(ValidationData::is_clean)
    }
}

/// Top-level output, keyed by effective entity name (standalone groups and
/// FRACTION unions).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub committee_size: u32,
    pub weights: BTreeMap<String, u64>,
    /// Exact proportional seat share `weight * committeeSize / totalWeight`.
    pub proportions: BTreeMap<String, f64>,
    pub methods: BTreeMap<Method, MethodResult>,
}

// ---------------------------------- Errors ----------------------------------

/// Aborts the whole calculation. Per-method allocator failures never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigurationError),

    #[error("invalid params: {0}")]
    Params(CoreError),

    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] CoreError),
}

// ---------------------------------- Public API ----------------------------------

/// Run every method named in `params` over `base`.
pub fn calculate(base: &BaseData, params: &Params) -> Result<CalculationResult, PipelineError> {
    let (entities, pools) = prepare(base, params)?;
    let size = base.committee_size;
    let shares = proportions::exact_shares(&entities, size)?;

    let mut methods = BTreeMap::new();
    for &method in &params.methods {
        match run_method(method, &entities, &pools, size, params.order_decimals) {
            Ok(result) => {
                methods.insert(method, result);
            }
            Err(e) => warn!(method = %method, error = %e, "method omitted from result"),
        }
    }

    Ok(CalculationResult {
        committee_size: size,
        weights: entities.iter().map(|e| (e.name.clone(), e.weight)).collect(),
        proportions: proportions::to_display(&shares),
        methods,
    })
}

/// Every check `calculate` performs before allocating, without allocating.
pub fn check_inputs(base: &BaseData, params: &Params) -> Result<(), PipelineError> {
    prepare(base, params).map(|_| ())
}

fn prepare(
    base: &BaseData,
    params: &Params,
) -> Result<(Vec<EffectiveEntity>, Vec<committee::CommitteePool>), PipelineError> {
    params.validate().map_err(PipelineError::Params)?;
    validate::check_base_data(base)?;

    let entities = sv_algo::resolve_unions(&base.groups, &base.unions)?;
    let pools = committee::pool_committees(base, &entities)?;
    debug!(
        entities = entities.len(),
        committee_unions = pools.len(),
        committee_size = base.committee_size,
        "resolved unions"
    );
    Ok((entities, pools))
}

fn run_method(
    method: Method,
    entities: &[EffectiveEntity],
    pools: &[committee::CommitteePool],
    size: u32,
    order_decimals: u8,
) -> Result<MethodResult, AllocError> {
    let allocation = allocate::allocate(method, entities, size, order_decimals)?;
    let findings = committee::check_committees(method, pools, size, allocation.assignment(), order_decimals)?;
    let validation = check_validity::validate_method(entities, size, &allocation, &findings);

    let (assignment, stale) = allocation.into_parts();
    debug!(
        method = %method,
        awarded = assignment.awarded_seats(),
        stale_seats = stale.as_ref().map_or(0, |s| s.amount_seats),
        "method finished"
    );
    if let Some(s) = &stale {
        warn!(method = %method, seats = s.amount_seats, entities = ?s.entity_names, "unresolved tie, lot drawing required");
    }

    Ok(MethodResult { distribution: assignment.distribution, order: assignment.order, stale, validation })
}
