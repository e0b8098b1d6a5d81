//! Pie chart geometry for the monthly expense breakdown.
//!
//! Angles follow the canvas convention the original chart used: sectors
//! start at 12 o'clock (`-PI / 2`) and grow clockwise.

use std::f64::consts::PI;

/// Fill colors assigned to sectors in order, cycling once exhausted.
pub const PALETTE: [&str; 8] = [
    "#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

/// Half of the pie a sector's label anchor falls in. Left-half labels
/// right-align so the text runs outward from the pie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Left,
    Right,
}

/// One laid-out pie sector.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub label: String,
    pub value: f64,
    /// Share of the total, in `0.0..=1.0`.
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: &'static str,
}

impl Sector {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn label_side(&self) -> LabelSide {
        if self.mid_angle().cos() < 0.0 {
            LabelSide::Left
        } else {
            LabelSide::Right
        }
    }
}

/// Lays out sectors for a breakdown. Returns an empty layout when there is
/// nothing to draw or the total is not positive.
pub fn sectors(breakdown: &[(String, f64)]) -> Vec<Sector> {
    let total: f64 = breakdown.iter().map(|(_, value)| value).sum();
    if breakdown.is_empty() || total <= 0.0 || total.is_nan() {
        return Vec::new();
    }
    let mut current = -PI / 2.0;
    breakdown
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let fraction = value / total;
            let sweep = fraction * 2.0 * PI;
            let sector = Sector {
                label: label.clone(),
                value: *value,
                fraction,
                start_angle: current,
                end_angle: current + sweep,
                color: PALETTE[index % PALETTE.len()],
            };
            current += sweep;
            sector
        })
        .collect()
}
