//! How saddle cells are split during contour extraction.
//!
//! Part of every [`Seed`](crate::Seed): the same field split with a
//! different mode yields different segments.

use crate::error::ContourError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a saddle cell (four crossings) is split into two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaddleResolution {
    /// Pair crossings positionally: top with right, bottom with left.
    ///
    /// Always cuts off the TR and BL corners, whatever the field does at the
    /// cell center, so it can join the wrong pair when the center sits on
    /// the other side of the threshold.
    #[default]
    EdgeOrder,
    /// Canonical disambiguation: the mean of the four corners decides whether
    /// the cell center belongs to the TL/BR diagonal's side. The corners on
    /// the other diagonal are then cut off.
    CenterAverage,
}

impl SaddleResolution {
    pub const ALL: [SaddleResolution; 2] =
        [SaddleResolution::EdgeOrder, SaddleResolution::CenterAverage];

    pub fn name(self) -> &'static str {
        match self {
            SaddleResolution::EdgeOrder => "edge-order",
            SaddleResolution::CenterAverage => "center-average",
        }
    }
}

impl fmt::Display for SaddleResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SaddleResolution {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SaddleResolution::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| ContourError::InvalidParam {
                name: "saddle".into(),
                reason: format!("expected edge-order or center-average, got '{s}'"),
            })
    }
}
