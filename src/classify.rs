//! Selection of the map projection for a position or bounding box

use crate::basemap::SOUTH_GEORGIA_BBOX;
use crate::envelope::is_bbox_inside;
use crate::types::{BBox, LonLat, Projection};
use log::debug;
use serde::{Deserialize, Serialize};

/// Default southern limit of the Arctic projection, in degrees latitude
pub const DEFAULT_ARCTIC_MIN_LATITUDE: f64 = 50.0;

/// Default northern limit of the Antarctic projection, in degrees latitude
pub const DEFAULT_ANTARCTIC_MAX_LATITUDE: f64 = -50.0;

/// Latitude thresholds of the polar projections
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub arctic_min_latitude: f64,
    pub antarctic_max_latitude: f64,
}

impl ClassifierConfig {
    pub const DEFAULT: Self = Self {
        arctic_min_latitude: DEFAULT_ARCTIC_MIN_LATITUDE,
        antarctic_max_latitude: DEFAULT_ANTARCTIC_MAX_LATITUDE,
    };

    /// Geographic region a projection is selected for
    pub fn region(&self, projection: Projection) -> BBox {
        match projection {
            Projection::World => BBox::new(-180.0, -90.0, 180.0, 90.0),
            Projection::Arctic => BBox::new(-180.0, self.arctic_min_latitude, 180.0, 90.0),
            Projection::Antarctic => BBox::new(-180.0, -90.0, 180.0, self.antarctic_max_latitude),
            Projection::SouthGeorgia => SOUTH_GEORGIA_BBOX,
        }
    }

    /// Pick the projection for a bounding box
    ///
    /// The most specific region that contains the whole box wins: South
    /// Georgia, then Arctic, then Antarctic. Anything else is shown on the
    /// world map.
    pub fn classify_bbox(&self, bbox: &BBox) -> Projection {
        let projection = [
            Projection::SouthGeorgia,
            Projection::Arctic,
            Projection::Antarctic,
        ]
        .into_iter()
        .find(|&projection| is_bbox_inside(bbox, &self.region(projection)))
        .unwrap_or(Projection::World);

        debug!("classified {:?} as {projection}", bbox.to_array());
        projection
    }

    /// Pick the projection for a single position
    pub fn classify_position(&self, position: LonLat) -> Projection {
        self.classify_bbox(&BBox::from(position))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pick the projection for a position using the default thresholds
pub fn classify_position(position: LonLat) -> Projection {
    ClassifierConfig::DEFAULT.classify_position(position)
}

/// Pick the projection for a bounding box using the default thresholds
pub fn classify_bbox(bbox: &BBox) -> Projection {
    ClassifierConfig::DEFAULT.classify_bbox(bbox)
}
