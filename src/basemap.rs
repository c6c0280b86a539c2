//! Static per-projection basemap configuration

use crate::classify::{DEFAULT_ANTARCTIC_MAX_LATITUDE, DEFAULT_ARCTIC_MIN_LATITUDE};
use crate::error::{Error, Result};
use crate::types::{BBox, Polygon, Projection, Ring, SpatialReference};
use crate::view::ViewConstraints;
use std::f64::consts::PI;

/// Region covered by the South Georgia basemap
pub const SOUTH_GEORGIA_BBOX: BBox = BBox::new(-38.643677, -55.200717, -35.271423, -53.641972);

/// Number of vertices used to approximate the polar view extent disks
pub const VIEW_EXTENT_DISK_VERTICES: usize = 64;

/// Half the width of the Web Mercator world, in meters
const WEB_MERCATOR_HALF_WIDTH: f64 = 20026376.39;

/// Half the height of the Web Mercator world, in meters
const WEB_MERCATOR_HALF_HEIGHT: f64 = 20048966.1;

/// Area the view may be panned within
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewExtent {
    /// Circle approximated by a polygon of `vertices` sides
    Disk {
        center: [f64; 2],
        radius: f64,
        vertices: usize,
        spatial_reference: SpatialReference,
    },
    /// Axis-aligned rectangle from `min` to `max`
    Rectangle {
        min: [f64; 2],
        max: [f64; 2],
        spatial_reference: SpatialReference,
    },
}

impl ViewExtent {
    pub fn spatial_reference(&self) -> SpatialReference {
        match self {
            ViewExtent::Disk {
                spatial_reference, ..
            }
            | ViewExtent::Rectangle {
                spatial_reference, ..
            } => *spatial_reference,
        }
    }

    /// Build the polygon of this extent
    pub fn to_polygon(&self) -> Polygon {
        let ring = match *self {
            ViewExtent::Disk {
                center,
                radius,
                vertices,
                ..
            } => circle_ring(vertices, radius, center),
            ViewExtent::Rectangle { min, max, .. } => vec![
                [min[0], min[1]],
                [min[0], max[1]],
                [max[0], max[1]],
                [max[0], min[1]],
                [min[0], min[1]],
            ],
        };

        Polygon::new(vec![ring], self.spatial_reference())
    }
}

/// Generate a closed ring approximating a circle
///
/// The ring has `vertices + 1` points, the last one repeating the first.
/// Fewer than 3 vertices are raised to 3.
pub fn circle_ring(vertices: usize, radius: f64, center: [f64; 2]) -> Ring {
    let vertices = vertices.max(3);
    let [center_x, center_y] = center;

    let mut ring: Ring = (0..vertices)
        .map(|i| {
            let angle = (i as f64 * 2.0 * PI) / vertices as f64;
            [
                center_x + radius * angle.cos(),
                center_y + radius * angle.sin(),
            ]
        })
        .collect();

    ring.push(ring[0]);
    ring
}

/// Display configuration for one map projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasemapConfig {
    pub projection: Projection,
    /// Portal item id of the basemap shown for this projection
    pub basemap_id: &'static str,
    pub spatial_reference: SpatialReference,
    /// View rotation aligning the projection's "up" with the usual bearing
    pub rotation_degrees: f64,
    pub view_extent: ViewExtent,
    /// Geographic region (WGS84) this projection is selected for with the
    /// default classifier thresholds
    ///
    /// A [`ClassifierConfig`](crate::classify::ClassifierConfig) with other
    /// thresholds selects against its own
    /// [`region`](crate::classify::ClassifierConfig::region) instead.
    pub validity_bbox: BBox,
}

impl BasemapConfig {
    /// Viewport constraints keeping the view inside the extent
    pub fn view_constraints(&self) -> ViewConstraints {
        ViewConstraints {
            geometry: self.view_extent.to_polygon(),
            rotation_enabled: false,
            snap_to_zoom: true,
        }
    }
}

pub const WORLD_BASEMAP_CONFIG: BasemapConfig = BasemapConfig {
    projection: Projection::World,
    basemap_id: "67ab7f7c535c4687b6518e6d2343e8a2",
    spatial_reference: SpatialReference::WEB_MERCATOR,
    rotation_degrees: 0.0,
    view_extent: ViewExtent::Rectangle {
        min: [-WEB_MERCATOR_HALF_WIDTH * 16.0, -WEB_MERCATOR_HALF_HEIGHT],
        max: [WEB_MERCATOR_HALF_WIDTH * 16.0, WEB_MERCATOR_HALF_HEIGHT],
        spatial_reference: SpatialReference::WEB_MERCATOR,
    },
    validity_bbox: BBox::new(-180.0, -90.0, 180.0, 90.0),
};

pub const ARCTIC_BASEMAP_CONFIG: BasemapConfig = BasemapConfig {
    projection: Projection::Arctic,
    basemap_id: "beee46578bc44e0bb47901f04400588a",
    spatial_reference: SpatialReference::ARCTIC_POLAR_STEREOGRAPHIC,
    rotation_degrees: 150.0,
    view_extent: ViewExtent::Disk {
        center: [2_000_000.0, 2_000_000.0],
        radius: 5_000_000.0,
        vertices: VIEW_EXTENT_DISK_VERTICES,
        spatial_reference: SpatialReference::ARCTIC_POLAR_STEREOGRAPHIC,
    },
    validity_bbox: BBox::new(-180.0, DEFAULT_ARCTIC_MIN_LATITUDE, 180.0, 90.0),
};

pub const ANTARCTIC_BASEMAP_CONFIG: BasemapConfig = BasemapConfig {
    projection: Projection::Antarctic,
    basemap_id: "435e23642bf94b83b07d1d3fc0c5c9d5",
    spatial_reference: SpatialReference::ANTARCTIC_POLAR_STEREOGRAPHIC,
    rotation_degrees: 0.0,
    view_extent: ViewExtent::Disk {
        center: [0.0, 0.0],
        radius: 5_000_000.0,
        vertices: VIEW_EXTENT_DISK_VERTICES,
        spatial_reference: SpatialReference::ANTARCTIC_POLAR_STEREOGRAPHIC,
    },
    validity_bbox: BBox::new(-180.0, -90.0, 180.0, DEFAULT_ANTARCTIC_MAX_LATITUDE),
};

pub const SOUTH_GEORGIA_BASEMAP_CONFIG: BasemapConfig = BasemapConfig {
    projection: Projection::SouthGeorgia,
    basemap_id: "a9d30e0b6f2d47528e3c2f938420f630",
    spatial_reference: SpatialReference::SOUTH_GEORGIA_LAMBERT,
    rotation_degrees: 0.0,
    view_extent: ViewExtent::Rectangle {
        min: [SOUTH_GEORGIA_BBOX.min_lon, SOUTH_GEORGIA_BBOX.min_lat],
        max: [SOUTH_GEORGIA_BBOX.max_lon, SOUTH_GEORGIA_BBOX.max_lat],
        spatial_reference: SpatialReference::WGS84,
    },
    validity_bbox: SOUTH_GEORGIA_BBOX,
};

/// Look up the basemap configuration of a projection
pub fn config_for(projection: Projection) -> &'static BasemapConfig {
    match projection {
        Projection::World => &WORLD_BASEMAP_CONFIG,
        Projection::Arctic => &ARCTIC_BASEMAP_CONFIG,
        Projection::Antarctic => &ANTARCTIC_BASEMAP_CONFIG,
        Projection::SouthGeorgia => &SOUTH_GEORGIA_BASEMAP_CONFIG,
    }
}

/// Look up the basemap configuration whose view uses the given spatial
/// reference
///
/// Fails for ids no basemap is shown in, rather than falling back to the
/// world view.
pub fn config_for_wkid(wkid: u32) -> Result<&'static BasemapConfig> {
    Projection::ALL
        .into_iter()
        .map(config_for)
        .find(|config| config.spatial_reference.wkid() == wkid)
        .ok_or(Error::UnknownSpatialReference(wkid))
}

/// Whether the spatial reference is one of the polar basemap projections
pub fn is_polar_wkid(wkid: u32) -> bool {
    wkid == ARCTIC_BASEMAP_CONFIG.spatial_reference.wkid()
        || wkid == ANTARCTIC_BASEMAP_CONFIG.spatial_reference.wkid()
}
