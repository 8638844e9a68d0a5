//! Stock vector of the circular-flow model.

/// Material stocks at one instant. Values are not clamped and may go
/// negative under extreme parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowState {
    /// MP: raw material available for transformation.
    pub raw_material: f64,
    /// IP: finished product awaiting sale.
    pub product_inventory: f64,
    /// MR: used or lost material awaiting reclamation or disposal.
    pub recyclable: f64,
}

impl FlowState {
    /// Stocks at t = 0.
    pub const INITIAL: FlowState = FlowState {
        raw_material: 100.0,
        product_inventory: 50.0,
        recyclable: 30.0,
    };

    pub const fn new(raw_material: f64, product_inventory: f64, recyclable: f64) -> Self {
        Self {
            raw_material,
            product_inventory,
            recyclable,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.raw_material, self.product_inventory, self.recyclable]
    }

    pub fn total(&self) -> f64 {
        self.raw_material + self.product_inventory + self.recyclable
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }

    pub(crate) fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            raw_material: f(self.raw_material, other.raw_material),
            product_inventory: f(self.product_inventory, other.product_inventory),
            recyclable: f(self.recyclable, other.recyclable),
        }
    }

    pub(crate) fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            raw_material: f(self.raw_material),
            product_inventory: f(self.product_inventory),
            recyclable: f(self.recyclable),
        }
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_stocks() {
        let s = FlowState::default();
        assert_eq!(s.as_array(), [100.0, 50.0, 30.0]);
        assert_eq!(s.total(), 180.0);
    }

    #[test]
    fn elementwise_helpers() {
        let a = FlowState::new(1.0, 2.0, 3.0);
        let b = FlowState::new(4.0, 5.0, 6.0);
        assert_eq!(a.zip_with(&b, |x, y| x + y).as_array(), [5.0, 7.0, 9.0]);
        assert_eq!(a.map(|x| -x).as_array(), [-1.0, -2.0, -3.0]);
        assert!(!FlowState::new(f64::NAN, 0.0, 0.0).is_finite());
    }
}
