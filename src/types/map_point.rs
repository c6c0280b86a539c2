use crate::types::LonLat;
use serde::{Deserialize, Serialize};

/// Default marker color (`#CC0033`)
pub const DEFAULT_POINT_COLOR: &str = "#CC0033";

/// Default marker size in points
pub const DEFAULT_POINT_SIZE: f64 = 6.0;

/// A point to show on the map
///
/// Either a bare `[longitude, latitude]` pair or an object carrying its own
/// styling. Both forms may be mixed in the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapPoint {
    Coordinates(LonLat),
    Styled(StyledMapPoint),
}

/// A map point with optional styling overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledMapPoint {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

/// Marker symbol handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct PointSymbol {
    pub color: String,
    pub size: f64,
    pub outline_color: String,
    pub outline_width: f64,
}

impl Default for PointSymbol {
    fn default() -> Self {
        Self {
            color: DEFAULT_POINT_COLOR.to_string(),
            size: DEFAULT_POINT_SIZE,
            outline_color: "white".to_string(),
            outline_width: 1.0,
        }
    }
}

impl MapPoint {
    pub fn position(&self) -> LonLat {
        match self {
            MapPoint::Coordinates(position) => *position,
            MapPoint::Styled(point) => LonLat::new(point.longitude, point.latitude),
        }
    }

    /// Resolve the marker symbol for this point
    ///
    /// Empty colors and zero sizes count as absent and keep the default.
    pub fn symbol(&self) -> PointSymbol {
        let mut symbol = PointSymbol::default();

        if let MapPoint::Styled(point) = self {
            if let Some(color) = point.color.as_deref().filter(|color| !color.is_empty()) {
                symbol.color = color.to_string();
            }
            if let Some(size) = point.size.filter(|size| *size != 0.0) {
                symbol.size = size;
            }
        }

        symbol
    }
}

impl From<LonLat> for MapPoint {
    fn from(position: LonLat) -> Self {
        MapPoint::Coordinates(position)
    }
}
