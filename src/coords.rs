use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static REGION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r\.(-?\d+)\.(-?\d+)\.mca$").expect("region pattern"));
static CHUNK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^c\.(-?\d+)\.(-?\d+)\.mcc$").expect("chunk pattern"));

/// Tile size of a persisted file, in blocks per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// `r.X.Z.mca`, 32×32 chunks.
    Region,
    /// `c.X.Z.mcc`, a single oversized chunk.
    Chunk,
}

impl Granularity {
    pub fn side_length(self) -> i64 {
        match self {
            Self::Region => 512,
            Self::Chunk => 16,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "mca" => Some(Self::Region),
            "mcc" => Some(Self::Chunk),
            _ => None,
        }
    }

    pub fn short_tag(self) -> &'static str {
        match self {
            Self::Region => "r",
            Self::Chunk => "c",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Region => &REGION_NAME,
            Self::Chunk => &CHUNK_NAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCoordinate {
    pub x: i64,
    pub z: i64,
}

impl GridCoordinate {
    pub fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// Absolute block area covered by this tile.
    pub fn bounds(self, granularity: Granularity) -> Rectangle {
        Rectangle::of_tile(self, granularity)
    }
}

/// Inclusive block-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rectangle {
    pub min_x: i64,
    pub max_x: i64,
    pub min_z: i64,
    pub max_z: i64,
}

impl Rectangle {
    pub fn of_tile(coord: GridCoordinate, granularity: Granularity) -> Self {
        let side = granularity.side_length();
        let min_x = coord.x.saturating_mul(side);
        let min_z = coord.z.saturating_mul(side);
        Self {
            min_x,
            max_x: min_x.saturating_add(side - 1),
            min_z,
            max_z: min_z.saturating_add(side - 1),
        }
    }

    pub fn translated(self, dx: i64, dz: i64) -> Self {
        Self {
            min_x: self.min_x + dx,
            max_x: self.max_x + dx,
            min_z: self.min_z + dz,
            max_z: self.max_z + dz,
        }
    }
}

/// Extracts the tile coordinate from a file name of the given granularity.
///
/// Anything that is not exactly `r.<int>.<int>.mca` (resp. `c.<int>.<int>.mcc`)
/// yields `None`. Integers too wide for an `i64` still match and clamp to its
/// range.
pub fn parse_tile(name: &str, granularity: Granularity) -> Option<GridCoordinate> {
    let caps = granularity.pattern().captures(name)?;
    Some(GridCoordinate::new(parse_clamped(&caps[1]), parse_clamped(&caps[2])))
}

fn parse_clamped(digits: &str) -> i64 {
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

pub fn classify_name(name: &str) -> Option<(Granularity, GridCoordinate)> {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext)?;
    let granularity = Granularity::from_extension(ext)?;
    parse_tile(name, granularity).map(|coord| (granularity, coord))
}
