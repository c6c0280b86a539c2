use crate::types::LonLat;
use serde::{Deserialize, Serialize};

/// Bounding box for geographic areas
///
/// Represents a rectangular geographic area defined by longitude and latitude
/// bounds in WGS84 degrees, in the OGC `[minLon, minLat, maxLon, maxLat]`
/// order.
///
/// # Anti-meridian handling
///
/// A box whose `min_lon` is greater than its `max_lon` is not an error: it
/// describes an area crossing the ±180° longitude line, starting at `min_lon`
/// and continuing east through the anti-meridian up to `max_lon`. The
/// span-related helpers below take this into account. [`BBox::extend`] and
/// [`BBox::merge`] do not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub min_lon: f64, // west
    pub min_lat: f64, // south
    pub max_lon: f64, // east
    pub max_lat: f64, // north
}

impl BBox {
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub const fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// Whether the box wraps around the ±180° longitude line
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// Whether both side edges sit on the anti-meridian, i.e. the box covers
    /// a full latitude band around the globe
    pub fn spans_all_longitudes(&self) -> bool {
        self.min_lon != self.max_lon && self.min_lon.abs() == 180.0 && self.max_lon.abs() == 180.0
    }

    /// Longitudinal extent in degrees, walking east from `min_lon`
    pub fn lon_span(&self) -> f64 {
        if self.spans_all_longitudes() {
            360.0
        } else if self.crosses_antimeridian() {
            360.0 - (self.min_lon - self.max_lon)
        } else {
            self.max_lon - self.min_lon
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Area in square degrees
    pub fn area(&self) -> f64 {
        self.lon_span() * self.lat_span()
    }

    /// Center of the box, with the longitude normalized to ±180°
    pub fn center(&self) -> LonLat {
        let west = if self.spans_all_longitudes() {
            -180.0
        } else {
            self.min_lon
        };

        let mut lon = west + self.lon_span() / 2.0;
        if lon > 180.0 {
            lon -= 360.0;
        }

        LonLat::new(lon, (self.min_lat + self.max_lat) / 2.0)
    }

    /// Create a bounding box from a slice of points
    ///
    /// Returns `None` if the slice is empty.
    pub fn from_points(points: &[LonLat]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut bbox = Self::from(*first);
        for &point in rest {
            bbox.extend(point);
        }
        Some(bbox)
    }

    /// Extend bounding box to include a point
    ///
    /// Grows the bounding box if necessary to encompass the given point.
    /// If the point is already inside the bbox, no change is made.
    pub fn extend(&mut self, point: LonLat) {
        self.min_lon = self.min_lon.min(point.lon);
        self.max_lon = self.max_lon.max(point.lon);
        self.max_lat = self.max_lat.max(point.lat);
        self.min_lat = self.min_lat.min(point.lat);
    }

    /// Merge another bounding box into this one
    ///
    /// Grows the bounding box if necessary to encompass the other bounding box.
    /// If the other bbox is already contained, no change is made.
    pub fn merge(&mut self, other: BBox) {
        self.min_lon = self.min_lon.min(other.min_lon);
        self.max_lon = self.max_lon.max(other.max_lon);
        self.max_lat = self.max_lat.max(other.max_lat);
        self.min_lat = self.min_lat.min(other.min_lat);
    }
}

impl From<LonLat> for BBox {
    fn from(point: LonLat) -> Self {
        Self {
            min_lon: point.lon,
            min_lat: point.lat,
            max_lon: point.lon,
            max_lat: point.lat,
        }
    }
}

impl From<[f64; 4]> for BBox {
    fn from([min_lon, min_lat, max_lon, max_lat]: [f64; 4]) -> Self {
        Self::new(min_lon, min_lat, max_lon, max_lat)
    }
}

impl From<BBox> for [f64; 4] {
    fn from(bbox: BBox) -> Self {
        bbox.to_array()
    }
}
