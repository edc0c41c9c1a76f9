use std::fmt;

/// Deepest supported zoom level. At this level a grid has 2^30 columns, which still fits in
/// `u32` and leaves room for navigation in `i64`.
pub const MAX_ZOOM: u8 = 30;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid zoom level: {0}")]
pub struct InvalidZoom(pub i32);

/// Integer zoom level of a tile pyramid, where 0 means a single tile covering the whole grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Zoom(u8);

impl TryFrom<i32> for Zoom {
    type Error = InvalidZoom;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(level) if level <= MAX_ZOOM => Ok(Self(level)),
            _ => Err(InvalidZoom(value)),
        }
    }
}

impl From<Zoom> for u8 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Zoom {
    pub fn level(&self) -> u8 {
        self.0
    }

    /// Number of tiles along each axis, i.e. 2^zoom.
    pub fn total_tiles(&self) -> u32 {
        1u32 << self.0
    }

    /// Scale of this level relative to zoom 0, i.e. 2^zoom as a float.
    pub(crate) fn scale(&self) -> f64 {
        f64::from(self.total_tiles())
    }
}
