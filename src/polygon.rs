//! Polygon geometry for bounding boxes
//!
//! Bounding boxes are turned into WGS84 rings that survive re-projection
//! into the basemap's spatial reference. On the world and South Georgia maps
//! the four corners are enough. On the polar maps the parallels become
//! circular arcs, so their edges are densified before re-projection, and
//! boxes crossing the anti-meridian are split into two rings.

use crate::basemap::config_for;
use crate::error::Result;
use crate::types::{BBox, Polygon, Projection, Ring, SpatialReference};
use log::trace;

/// Default number of vertices per densified edge
pub const DEFAULT_DENSIFICATION: usize = 50;

/// Minimum number of vertices of a densified edge (its two end points)
const MIN_EDGE_VERTICES: usize = 2;

/// Options passed along with a re-projection request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReprojectOptions {
    /// Curve edges as needed so the projected shape stays accurate, instead
    /// of only mapping the vertices
    pub shape_preserving: bool,
}

/// Geometry engine able to re-project polygons between spatial references
///
/// Implemented by the rendering layer.
pub trait GeometryEngine {
    fn reproject(
        &self,
        polygon: &Polygon,
        target: SpatialReference,
        options: ReprojectOptions,
    ) -> Result<Polygon>;
}

/// Ring parameters for a polar bounding box part
#[derive(Debug, Clone, Copy)]
struct RingCoordinates {
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
    densification_steps: usize,
}

/// Create evenly spaced points along a parallel
///
/// # Arguments
///
/// * `start_lon` - Longitude of the first point
/// * `end_lon` - Longitude of the last point
/// * `latitude` - Latitude of the parallel
/// * `vertices` - Number of points to create, raised to 2 if lower
pub fn latitude_parallel_points(
    start_lon: f64,
    end_lon: f64,
    latitude: f64,
    vertices: usize,
) -> Vec<[f64; 2]> {
    let vertices = vertices.max(MIN_EDGE_VERTICES);
    let last = (vertices - 1) as f64;

    (0..vertices)
        .map(|i| {
            let fraction = i as f64 / last;
            [start_lon + (end_lon - start_lon) * fraction, latitude]
        })
        .collect()
}

/// Bottom edge west to east, top edge back east to west, then close
fn polar_ring(coordinates: RingCoordinates) -> Ring {
    let RingCoordinates {
        min_lon,
        max_lon,
        min_lat,
        max_lat,
        densification_steps,
    } = coordinates;

    let mut ring = latitude_parallel_points(min_lon, max_lon, min_lat, densification_steps);

    let mut top = latitude_parallel_points(min_lon, max_lon, max_lat, densification_steps);
    top.reverse();
    ring.extend(top);

    ring.push(ring[0]);
    ring
}

/// Split a crossing box into a western (`min_lon..180`) and an eastern
/// (`-180..max_lon`) ring, sharing the densification between them
fn antimeridian_rings(coordinates: RingCoordinates) -> Vec<Ring> {
    let densification_steps = coordinates.densification_steps.div_ceil(2);

    let west = polar_ring(RingCoordinates {
        max_lon: 180.0,
        densification_steps,
        ..coordinates
    });

    let east = polar_ring(RingCoordinates {
        min_lon: -180.0,
        densification_steps,
        ..coordinates
    });

    vec![west, east]
}

/// Corner ring, with the western edge shifted by -360° for crossing boxes
fn standard_ring(bbox: &BBox) -> Ring {
    let min_lon = if bbox.crosses_antimeridian() {
        bbox.min_lon - 360.0
    } else {
        bbox.min_lon
    };
    let BBox {
        min_lat,
        max_lon,
        max_lat,
        ..
    } = *bbox;

    vec![
        [min_lon, min_lat],
        [max_lon, min_lat],
        [max_lon, max_lat],
        [min_lon, max_lat],
        [min_lon, min_lat],
    ]
}

/// Build the WGS84 polygon of a bounding box for display in `projection`
///
/// # Arguments
///
/// * `bbox` - Box to build, may cross the anti-meridian
/// * `projection` - Projection the polygon will be shown in
/// * `densification` - Vertices per edge on the polar projections
///   (see [`DEFAULT_DENSIFICATION`]), raised to 2 if lower
pub fn build_polygon(bbox: &BBox, projection: Projection, densification: usize) -> Polygon {
    // Both side edges on the anti-meridian: the whole band, written west to east
    let bbox = &if bbox.spans_all_longitudes() {
        BBox::new(-180.0, bbox.min_lat, 180.0, bbox.max_lat)
    } else {
        *bbox
    };

    let rings = if projection.is_polar() {
        let coordinates = RingCoordinates {
            min_lon: bbox.min_lon,
            max_lon: bbox.max_lon,
            min_lat: bbox.min_lat,
            max_lat: bbox.max_lat,
            densification_steps: densification.max(MIN_EDGE_VERTICES),
        };

        if bbox.crosses_antimeridian() {
            antimeridian_rings(coordinates)
        } else {
            vec![polar_ring(coordinates)]
        }
    } else {
        vec![standard_ring(bbox)]
    };

    let polygon = Polygon::new(rings, SpatialReference::WGS84);
    trace!(
        "built {projection} polygon for {:?}: {} rings, {} vertices",
        bbox.to_array(),
        polygon.rings.len(),
        polygon.vertex_count()
    );
    polygon
}

/// Build the polygon of a bounding box and re-project it into the spatial
/// reference of the projection's basemap
pub fn build_projected_polygon<E: GeometryEngine + ?Sized>(
    engine: &E,
    bbox: &BBox,
    projection: Projection,
    densification: usize,
) -> Result<Polygon> {
    let polygon = build_polygon(bbox, projection, densification);
    let target = config_for(projection).spatial_reference;

    engine.reproject(
        &polygon,
        target,
        ReprojectOptions {
            shape_preserving: true,
        },
    )
}
