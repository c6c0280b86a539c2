use serde::{Deserialize, Serialize};

/// Spatial reference identified by its EPSG well-known id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpatialReference(pub u32);

impl SpatialReference {
    /// WGS 84 geographic coordinates
    pub const WGS84: Self = Self(4326);
    /// WGS 84 / Pseudo-Mercator
    pub const WEB_MERCATOR: Self = Self(3857);
    /// WGS 84 / Antarctic Polar Stereographic
    pub const ANTARCTIC_POLAR_STEREOGRAPHIC: Self = Self(3031);
    /// WGS 84 / EPSG Alaska Polar Stereographic
    pub const ARCTIC_POLAR_STEREOGRAPHIC: Self = Self(5936);
    /// WGS 84 / South Georgia Lambert
    pub const SOUTH_GEORGIA_LAMBERT: Self = Self(3762);

    pub const fn wkid(&self) -> u32 {
        self.0
    }
}

/// A closed ring of `[x, y]` vertices (first vertex repeated at the end)
pub type Ring = Vec<[f64; 2]>;

/// Polygon made of one or more rings in a given spatial reference
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Ring>,
    pub spatial_reference: SpatialReference,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>, spatial_reference: SpatialReference) -> Self {
        Self {
            rings,
            spatial_reference,
        }
    }

    /// Total number of vertices over all rings, closing vertices included
    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }
}

/// Polyline of `[lon, lat, height]` vertices, one or more paths
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub paths: Vec<Vec<[f64; 3]>>,
}
