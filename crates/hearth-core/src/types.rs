//! Grid value types: density, positions, footprints and cell keys.

use std::fmt;
use std::str::FromStr;

use crate::errors::CellKeyError;

/// The `(columns, rows)` configuration controlling grid capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDensity {
    pub columns: u32,
    pub rows: u32,
}

impl GridDensity {
    /// Dense grid for large wall panels.
    pub const COMPACT: Self = Self { columns: 6, rows: 4 };
    /// Default grid.
    pub const STANDARD: Self = Self { columns: 4, rows: 3 };
    /// Roomy grid for small screens.
    pub const SPACIOUS: Self = Self { columns: 3, rows: 2 };

    /// Create a density. Both axes are raised to at least one cell.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// Total number of cells on one page.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Check that a footprint anchored at `position` lies fully inside the grid.
    pub fn contains(&self, position: GridPosition, footprint: Footprint) -> bool {
        let right = position.col as u64 + footprint.cols as u64;
        let bottom = position.row as u64 + footprint.rows as u64;
        right <= self.columns as u64 && bottom <= self.rows as u64
    }

    /// Largest axis, used as the ring search radius.
    pub fn max_extent(&self) -> u32 {
        self.columns.max(self.rows)
    }
}

impl Default for GridDensity {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for GridDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Zero-based top-left anchor of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub col: u32,
    pub row: u32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Index of this cell in a row-major scan of a grid `columns` wide.
    pub fn row_major_index(&self, columns: u32) -> u64 {
        self.row as u64 * columns as u64 + self.col as u64
    }

    /// Cell key of the anchor cell.
    pub fn key(&self) -> CellKey {
        CellKey::new(self.col, self.row)
    }
}

/// The `cols x rows` rectangle a widget occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub cols: u32,
    pub rows: u32,
}

impl Footprint {
    pub const UNIT: Self = Self { cols: 1, rows: 1 };

    /// Create a footprint. A footprint is never smaller than 1x1.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Shrink the footprint so it fits on a grid of the given density.
    pub fn clamp_to(&self, density: GridDensity) -> Self {
        Self::new(self.cols.min(density.columns), self.rows.min(density.rows))
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Key of a single grid cell, rendered as `"col,row"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub col: u32,
    pub row: u32,
}

impl CellKey {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

impl FromStr for CellKey {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (col, row) = s
            .split_once(',')
            .ok_or_else(|| CellKeyError::Malformed { key: s.to_string() })?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| CellKeyError::Malformed { key: s.to_string() })
        };
        Ok(Self::new(parse(col)?, parse(row)?))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CellKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CellKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Legacy footprint presets, `cols x rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WidgetSize {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "1x1"))]
    Small,
    #[cfg_attr(feature = "serde", serde(rename = "2x1"))]
    Wide,
    #[cfg_attr(feature = "serde", serde(rename = "1x2"))]
    Tall,
    #[cfg_attr(feature = "serde", serde(rename = "2x2"))]
    Large,
}

impl WidgetSize {
    /// All presets, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Wide, Self::Tall, Self::Large];

    /// Footprint of this preset.
    pub fn footprint(&self) -> Footprint {
        match self {
            WidgetSize::Small => Footprint::new(1, 1),
            WidgetSize::Wide => Footprint::new(2, 1),
            WidgetSize::Tall => Footprint::new(1, 2),
            WidgetSize::Large => Footprint::new(2, 2),
        }
    }

    /// The preset with exactly this footprint, if any.
    pub fn from_footprint(footprint: Footprint) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.footprint() == footprint)
    }

    /// Wire name, e.g. `"2x1"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetSize::Small => "1x1",
            WidgetSize::Wide => "2x1",
            WidgetSize::Tall => "1x2",
            WidgetSize::Large => "2x2",
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetSize {
    type Err = crate::errors::WidgetSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| crate::errors::WidgetSizeError::Unknown {
                value: s.to_string(),
            })
    }
}
