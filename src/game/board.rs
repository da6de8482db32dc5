//! Hex boards and unit deployment.

use crate::game::types::{HexCoord, Island, Side, Unit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Columns of the tactics grid (`q`).
pub const GRID_COLS: i32 = 7;
/// Rows of the tactics grid (`r`).
pub const GRID_ROWS: i32 = 6;
/// First row owned by the local player; rows above it belong to the opponent.
pub const LOCAL_FIRST_ROW: i32 = GRID_ROWS / 2;

impl HexCoord {
    /// Cube coordinate with `s` derived from `q` and `r`.
    pub fn new(q: i32, r: i32) -> Self {
        HexCoord { q, r, s: -q - r }
    }

    pub fn is_valid(&self) -> bool {
        self.q + self.r + self.s == 0
    }

    /// Hex distance from `other`.
    pub fn distance(&self, other: &HexCoord) -> i32 {
        ((self.q - other.q).abs() + (self.r - other.r).abs() + (self.s - other.s).abs()) / 2
    }

    /// Occupancy key, `"q,r,s"`.
    pub fn key(&self) -> String {
        format!("{},{},{}", self.q, self.r, self.s)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// Board geometry a game is played on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BoardLayout {
    /// Rectangular grid, rows split between the sides.
    #[default]
    Tactics,
    /// Hexagon of `radius` around the origin; `r > 0` local, `r < 0` opponent.
    Radius { radius: i32 },
}

impl BoardLayout {
    pub fn contains(&self, at: &HexCoord) -> bool {
        match *self {
            BoardLayout::Tactics => (0..GRID_COLS).contains(&at.q) && (0..GRID_ROWS).contains(&at.r),
            BoardLayout::Radius { radius } => at.distance(&HexCoord::new(0, 0)) <= radius,
        }
    }

    /// Owning side of a cell; `None` for neutral cells.
    pub fn side_of(&self, at: &HexCoord) -> Option<Side> {
        match *self {
            BoardLayout::Tactics if at.r >= LOCAL_FIRST_ROW => Some(Side::Local),
            BoardLayout::Tactics => Some(Side::Opponent),
            BoardLayout::Radius { .. } => match at.r {
                r if r > 0 => Some(Side::Local),
                r if r < 0 => Some(Side::Opponent),
                _ => None,
            },
        }
    }
}

/// Why a deployment was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployError {
    UnknownPlayer,
    UnknownUnit,
    MalformedCoordinate,
    OffBoard,
    WrongSide,
    Occupied,
}

impl fmt::Display for DeployError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeployError::UnknownPlayer => "unknown player",
            DeployError::UnknownUnit => "unknown unit",
            DeployError::MalformedCoordinate => "q + r + s must be 0",
            DeployError::OffBoard => "cell is off the board",
            DeployError::WrongSide => "cell belongs to the other side",
            DeployError::Occupied => "cell is occupied",
        };
        f.write_str(s)
    }
}

impl std::error::Error for DeployError {}

/// Deployed units keyed by their cell.
pub fn deployed_positions(units: &[Unit]) -> HashMap<String, &Unit> {
    units
        .iter()
        .filter(|u| u.is_deployed)
        .filter_map(|u| u.position.map(|p| (p.key(), u)))
        .collect()
}

impl Island {
    /// Places a unit of this island on `at`. Redeploying a unit moves it.
    pub fn deploy_unit(
        &mut self,
        side: Side,
        layout: BoardLayout,
        unit_id: Uuid,
        at: HexCoord,
    ) -> Result<(), DeployError> {
        if !self.units.iter().any(|u| u.id == unit_id) {
            return Err(DeployError::UnknownUnit);
        }
        if !at.is_valid() {
            return Err(DeployError::MalformedCoordinate);
        }
        if !layout.contains(&at) {
            return Err(DeployError::OffBoard);
        }
        if layout.side_of(&at) != Some(side) {
            return Err(DeployError::WrongSide);
        }
        if let Some(occupant) = deployed_positions(&self.units).get(&at.key()) {
            if occupant.id != unit_id {
                return Err(DeployError::Occupied);
            }
        }

        if let Some(unit) = self.units.iter_mut().find(|u| u.id == unit_id) {
            unit.is_deployed = true;
            unit.position = Some(at);
        }
        Ok(())
    }

    pub fn undeploy_unit(&mut self, unit_id: Uuid) -> bool {
        match self.units.iter_mut().find(|u| u.id == unit_id) {
            Some(unit) => {
                unit.is_deployed = false;
                unit.position = None;
                true
            }
            None => false,
        }
    }
}
