use serde::{Deserialize, Serialize};

use super::MetalKind;

/// Goods and Services Tax, applied uniformly to every metal.
pub const GST_RATE: f64 = 0.03;

/// Grams in one troy ounce.
pub const GRAMS_PER_OUNCE: f64 = 31.1035;

/// Tax rates in force for one metal.
///
/// GST and import duty are both levied on the untaxed local base price and
/// are additive, never compounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    pub gst_rate: f64,
    pub import_duty_rate: f64,
}

impl TaxPolicy {
    pub const fn for_metal(metal: MetalKind) -> Self {
        Self {
            gst_rate: GST_RATE,
            import_duty_rate: metal.import_duty_rate(),
        }
    }

    pub fn total_rate(self) -> f64 {
        self.gst_rate + self.import_duty_rate
    }
}
