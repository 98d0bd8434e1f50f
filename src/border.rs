use serde::{Deserialize, Serialize};

use crate::coords::Rectangle;
use crate::error::PruneError;

/// Square world border centred on `(center_x, center_z)`.
///
/// The covered span per axis is `[center - half, center + half - 1]` with
/// `half = floor(diameter / 2)`. Odd diameters therefore lose one block on the
/// positive side, and zero or negative diameters yield an empty square that
/// intersects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    pub center_x: i64,
    pub center_z: i64,
    pub diameter: i64,
}

/// Inclusive block span of a [`Border`] on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderBounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_z: i64,
    pub max_z: i64,
}

impl Border {
    pub fn new(center_x: i64, center_z: i64, diameter: i64) -> Self {
        Self {
            center_x,
            center_z,
            diameter,
        }
    }

    pub fn half(&self) -> i64 {
        self.diameter.div_euclid(2)
    }

    pub fn bounds(&self) -> BorderBounds {
        let half = self.half();
        BorderBounds {
            min_x: self.center_x.saturating_sub(half),
            max_x: self.center_x.saturating_add(half).saturating_sub(1),
            min_z: self.center_z.saturating_sub(half),
            max_z: self.center_z.saturating_add(half).saturating_sub(1),
        }
    }

    /// True when any block of `rect` lies inside the border.
    pub fn intersects(&self, rect: &Rectangle) -> bool {
        let b = self.bounds();
        !(rect.max_x < b.min_x || rect.min_x > b.max_x || rect.max_z < b.min_z || rect.min_z > b.max_z)
    }

    pub fn translated(self, dx: i64, dz: i64) -> Self {
        Self::new(self.center_x + dx, self.center_z + dz, self.diameter)
    }

    /// Opt-in check used by `--strict`; the default flow accepts any border.
    pub fn validate_strict(&self) -> Result<(), PruneError> {
        if self.diameter <= 0 {
            return Err(PruneError::InvalidBorder(format!(
                "diameter must be positive, got {}",
                self.diameter
            )));
        }
        Ok(())
    }
}

impl BorderBounds {
    pub fn x_out_of_range(&self, value: i64) -> bool {
        value < self.min_x || value > self.max_x
    }

    pub fn z_out_of_range(&self, value: i64) -> bool {
        value < self.min_z || value > self.max_z
    }
}
