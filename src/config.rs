//! Engine configuration
//!
//! Settings that change calculation results rather than how input is
//! processed. Processing settings live in [`crate::strategy::BatchConfig`].

use tracing::warn;

/// Largest supported number of decimal places for the currency minor unit
pub const MAX_CURRENCY_SCALE: u32 = 10;

/// Configuration for balance and settlement calculation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Decimal places of the currency minor unit (2 for cents)
    ///
    /// Even splits are allocated in units of `10^-currency_scale` and
    /// reports are formatted with this many decimal places.
    pub currency_scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { currency_scale: 2 }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig, falling back to the default scale when
    /// `currency_scale` is out of range
    pub fn new(currency_scale: u32) -> Self {
        let default = Self::default();

        let currency_scale = if currency_scale > MAX_CURRENCY_SCALE {
            warn!(
                currency_scale,
                default = default.currency_scale,
                "Invalid currency scale, using default"
            );
            default.currency_scale
        } else {
            currency_scale
        };

        Self { currency_scale }
    }
}
