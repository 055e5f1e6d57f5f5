//! Layout configuration and its documented defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Geometry knobs recognized by the layout engine. All values are in the caller's drawing
/// units (the reference renderer treats them as pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of one person box. Default: 140.
    pub node_width: f64,
    /// Height of one person box. Default: 50.
    pub node_height: f64,
    /// Minimum gap between unit bounding boxes on the same tier. Default: 20.
    pub horizontal_gap: f64,
    /// Vertical gap between tiers. Default: 100.
    pub vertical_gap: f64,
    /// Gap between the boxes of a couple placed adjacently. Default: 10.
    pub spouse_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 140.0,
            node_height: 50.0,
            horizontal_gap: 20.0,
            vertical_gap: 100.0,
            spouse_gap: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("horizontal_gap", self.horizontal_gap),
            ("vertical_gap", self.vertical_gap),
            ("spouse_gap", self.spouse_gap),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid_config(format!("{name} must be finite")));
            }
            if value < 0.0 {
                return Err(Error::invalid_config(format!("{name} must not be negative")));
            }
        }
        if self.node_width == 0.0 || self.node_height == 0.0 {
            return Err(Error::invalid_config("node dimensions must be non-zero"));
        }
        Ok(())
    }

    /// Top edge y of a tier's row. The engine emits `(tier, x)` only; callers derive y here.
    pub fn row_y(&self, tier: i32) -> f64 {
        f64::from(tier) * (self.node_height + self.vertical_gap)
    }

    /// Bounding-box width of a unit holding `members` adjacent person boxes.
    pub fn unit_width(&self, members: usize) -> f64 {
        debug_assert!(members > 0);
        let members = members.max(1) as f64;
        members * self.node_width + (members - 1.0) * self.spouse_gap
    }
}
