//! Rate constants, piecewise time functions and the flow balance.
//!
//! Every time-dependent quantity is an explicit function of `t`; nothing
//! here captures mutable state.

use crate::params::FlowParams;
use crate::state::FlowState;

/// Fraction of raw material transformed into product per unit time.
pub const TRANSFORMATION_RATE: f64 = 0.10;
/// Fraction of raw material lost to the recyclable stock per unit time.
pub const RAW_MATERIAL_LOSS_RATE: f64 = 0.05;
/// Fraction of product inventory sold per unit time.
pub const SALES_RATE: f64 = 0.10;
/// Fraction of product inventory lost per unit time.
pub const PRODUCT_LOSS_RATE: f64 = 0.02;
/// Fraction of recyclable material disposed of per unit time.
pub const DISPOSAL_RATE: f64 = 0.10;
/// Virgin raw-material inflow outside a crisis.
pub const VIRGIN_INFLOW_BASE: f64 = 20.0;
/// Share of the base virgin inflow that remains during a crisis.
pub const CRISIS_INFLOW_FACTOR: f64 = 0.2;

/// Recycling capacity doubles from this time on.
pub const CAPACITY_EXPANSION_TIME: f64 = 30.0;
/// Virgin inflow is cut from this time on when the crisis is enabled.
pub const CRISIS_START_TIME: f64 = 40.0;

/// Recycling capacity in effect at time `t`.
pub fn effective_capacity(params: &FlowParams, t: f64) -> f64 {
    if t < CAPACITY_EXPANSION_TIME {
        params.base_capacity_f64()
    } else {
        2.0 * params.base_capacity_f64()
    }
}

/// Rate at which recyclable material returns as raw material.
pub fn recycling_throughput(params: &FlowParams, recyclable: f64, t: f64) -> f64 {
    recyclable.min(effective_capacity(params, t)) * params.efficiency
}

/// Virgin raw-material inflow at time `t`.
pub fn virgin_inflow(params: &FlowParams, t: f64) -> f64 {
    if params.crisis_enabled && t >= CRISIS_START_TIME {
        VIRGIN_INFLOW_BASE * CRISIS_INFLOW_FACTOR
    } else {
        VIRGIN_INFLOW_BASE
    }
}

/// Times at which the vector field jumps for these parameters.
pub fn discontinuities(params: &FlowParams) -> Vec<f64> {
    let mut times = vec![CAPACITY_EXPANSION_TIME];
    if params.crisis_enabled {
        times.push(CRISIS_START_TIME);
    }
    times
}

/// Every individual flow at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowRates {
    pub transformation: f64,
    pub raw_material_loss: f64,
    pub sales: f64,
    pub product_loss: f64,
    pub disposal: f64,
    pub effective_capacity: f64,
    pub recycling_throughput: f64,
    pub virgin_inflow: f64,
}

impl FlowRates {
    pub fn compute(params: &FlowParams, x: &FlowState, t: f64) -> Self {
        Self {
            transformation: TRANSFORMATION_RATE * x.raw_material,
            raw_material_loss: RAW_MATERIAL_LOSS_RATE * x.raw_material,
            sales: SALES_RATE * x.product_inventory,
            product_loss: PRODUCT_LOSS_RATE * x.product_inventory,
            disposal: DISPOSAL_RATE * x.recyclable,
            effective_capacity: effective_capacity(params, t),
            recycling_throughput: recycling_throughput(params, x.recyclable, t),
            virgin_inflow: virgin_inflow(params, t),
        }
    }

    /// Virgin inflow plus reclaimed material.
    pub fn total_raw_inflow(&self) -> f64 {
        self.virgin_inflow + self.recycling_throughput
    }

    /// Time derivative of every stock.
    pub fn derivative(&self) -> FlowState {
        FlowState {
            raw_material: self.total_raw_inflow() - self.transformation - self.raw_material_loss,
            product_inventory: self.transformation - self.sales - self.product_loss,
            recyclable: self.sales + self.raw_material_loss + self.product_loss
                - self.recycling_throughput
                - self.disposal,
        }
    }

    /// Net exchange with the outside: virgin inflow minus disposal.
    pub fn net_external_flow(&self) -> f64 {
        self.virgin_inflow - self.disposal
    }
}

/// dx/dt of the circular-flow model.
pub fn derivative(params: &FlowParams, x: &FlowState, t: f64) -> FlowState {
    FlowRates::compute(params, x, t).derivative()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_params() -> impl Strategy<Value = FlowParams> {
        (0.1_f64..=1.0, 5_u32..=30, any::<bool>()).prop_map(|(e, c, k)| FlowParams {
            efficiency: e,
            base_capacity: c,
            crisis_enabled: k,
        })
    }

    proptest! {
        #[test]
        fn throughput_never_exceeds_bounds(
            p in valid_params(),
            mr in 0.0_f64..500.0,
            t in 0.0_f64..100.0,
        ) {
            let q = recycling_throughput(&p, mr, t);
            let cap = effective_capacity(&p, t);
            prop_assert!(q <= cap * p.efficiency + 1e-12);
            prop_assert!(q <= mr + 1e-12);
            prop_assert!(q <= mr.min(cap) * p.efficiency + 1e-12);
        }

        #[test]
        fn internal_transfers_cancel(
            p in valid_params(),
            mp in -100.0_f64..500.0,
            ip in -100.0_f64..500.0,
            mr in -100.0_f64..500.0,
            t in 0.0_f64..100.0,
        ) {
            let x = FlowState::new(mp, ip, mr);
            let rates = FlowRates::compute(&p, &x, t);
            let d = rates.derivative();
            let sum = d.raw_material + d.product_inventory + d.recyclable;
            let expected = rates.virgin_inflow - rates.disposal;
            prop_assert!((sum - expected).abs() <= 1e-9 * (1.0 + expected.abs() + mp.abs() + ip.abs() + mr.abs()));
            prop_assert_eq!(rates.net_external_flow(), expected);
        }
    }
}
