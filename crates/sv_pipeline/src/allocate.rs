//! ALLOCATE stage: dispatch one method to its `sv_algo` allocator.

use sv_algo::{
    allocation::{allocate_divisor, allocate_hare_niemeyer, DivisorRule},
    AllocError, Allocation,
};
use sv_core::{entities::EffectiveEntity, method::Method};

pub fn allocate(
    method: Method,
    entities: &[EffectiveEntity],
    committee_size: u32,
    order_decimals: u8,
) -> Result<Allocation, AllocError> {
    match method {
        Method::DHondt => allocate_divisor(entities, committee_size, DivisorRule::DHondt, order_decimals),
        Method::SainteLagueSchepers => {
            allocate_divisor(entities, committee_size, DivisorRule::SainteLagueSchepers, order_decimals)
        }
        Method::HareNiemeyer => allocate_hare_niemeyer(entities, committee_size, order_decimals),
    }
}
