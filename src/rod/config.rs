//! Rod stiffness coefficients.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weights of the two energy terms of a rod.
///
/// # Examples
///
/// ```
/// use u_rodsim::rod::Stiffness;
///
/// let stiffness = Stiffness::default().with_rod(70.0).with_anchor(300.0);
/// assert!(stiffness.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stiffness {
    /// Weight of the squared turning angle at each interior joint.
    pub rod: f64,

    /// Weight of the squared anchor-to-rod distance.
    pub anchor: f64,
}

impl Default for Stiffness {
    fn default() -> Self {
        Self {
            rod: 50.0,
            anchor: 100.0,
        }
    }
}

impl Stiffness {
    pub fn new(rod: f64, anchor: f64) -> Self {
        Self { rod, anchor }
    }

    /// Both coefficients zero: the energy of such a rod is always 0.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn with_rod(mut self, rod: f64) -> Self {
        self.rod = rod;
        self
    }

    pub fn with_anchor(mut self, anchor: f64) -> Self {
        self.anchor = anchor;
        self
    }

    /// Validates that both coefficients are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("rod", self.rod), ("anchor", self.anchor)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidStiffness(format!(
                    "{name} stiffness must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
