//! Triangulated 3D meshes for showing bounding boxes on a globe
//!
//! A flat polygon draped on the globe is interpolated along great circles
//! between its vertices, which does not follow a lon/lat rectangle once the
//! box gets large or covers a pole. The mesh samples the rectangle on a
//! regular lon/lat grid instead.

use crate::types::{BBox, LonLat, PointSymbol, Polyline};
use log::{trace, warn};
use serde::{Deserialize, Serialize};

/// Default height of the mesh above the reference surface, in meters
pub const DEFAULT_MESH_HEIGHT: f64 = 5000.0;

/// Default number of longitude steps of the mesh grid
pub const DEFAULT_MESH_SEGMENTS: usize = 1000;

/// Default area (square degrees) up to which a box is shown as a marker
pub const DEFAULT_AREA_THRESHOLD: f64 = 20.0;

/// Vertex and face buffers of a triangulated mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Flat `[lon, lat, height]` triples
    pub positions: Vec<f64>,
    /// Vertex index triples, counter-clockwise seen from outside the globe
    pub faces: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 3
    }

    /// Position of the vertex at `index`
    pub fn vertex(&self, index: usize) -> Option<[f64; 3]> {
        let start = index.checked_mul(3)?;
        match self.positions.get(start..start + 3)? {
            &[lon, lat, height] => Some([lon, lat, height]),
            _ => None,
        }
    }
}

/// Mesh of a bounding box together with its outline
#[derive(Debug, Clone, PartialEq)]
pub struct BBoxMesh {
    pub mesh: Mesh,
    pub outline: Polyline,
}

/// Mesh builder settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeshOptions {
    pub height: f64,
    pub segments: usize,
    /// Boxes with an area up to this many square degrees are shown as a
    /// marker at their center
    pub area_threshold: f64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_MESH_HEIGHT,
            segments: DEFAULT_MESH_SEGMENTS,
            area_threshold: DEFAULT_AREA_THRESHOLD,
        }
    }
}

/// How a bounding box is shown on the globe
#[derive(Debug, Clone, PartialEq)]
pub enum GlobeFeature {
    Mesh(BBoxMesh),
    Marker { position: LonLat, symbol: PointSymbol },
}

/// Grid sampling of a bounding box
struct Grid {
    west: f64,
    lon_span: f64,
    lon_steps: usize,
    lat_steps: usize,
}

impl Grid {
    fn new(bbox: &BBox, segments: usize) -> Self {
        let lon_steps = segments.max(1);
        let lat_steps = ((lon_steps as f64 * bbox.lat_span() / 360.0).floor() as usize).max(1);
        let west = if bbox.spans_all_longitudes() {
            -180.0
        } else {
            bbox.min_lon
        };

        Self {
            west,
            lon_span: bbox.lon_span(),
            lon_steps,
            lat_steps,
        }
    }

    fn lon(&self, column: usize) -> f64 {
        let lon = self.west + self.lon_span * column as f64 / self.lon_steps as f64;
        if lon > 180.0 { lon - 360.0 } else { lon }
    }

    fn lat(&self, bbox: &BBox, row: usize) -> f64 {
        bbox.min_lat + bbox.lat_span() * row as f64 / self.lat_steps as f64
    }

    fn columns(&self) -> usize {
        self.lon_steps + 1
    }
}

/// Build a draped mesh and its outline for a bounding box
///
/// # Arguments
///
/// * `bbox` - Box to build, may cross the anti-meridian
/// * `height` - Constant height of every vertex, in meters
/// * `segments` - Number of longitude steps, raised to 1 if lower. The
///   number of latitude steps follows the box's latitude span.
pub fn build_mesh(bbox: &BBox, height: f64, segments: usize) -> BBoxMesh {
    if segments == 0 {
        warn!("mesh requested with 0 segments, using 1");
    }

    let grid = Grid::new(bbox, segments);
    let columns = grid.columns();
    let rows = grid.lat_steps + 1;

    let mut positions = Vec::with_capacity(columns * rows * 3);
    for row in 0..rows {
        let lat = grid.lat(bbox, row);
        for column in 0..columns {
            positions.extend([grid.lon(column), lat, height]);
        }
    }

    let mut faces = Vec::with_capacity(grid.lon_steps * grid.lat_steps * 6);
    for row in 0..grid.lat_steps {
        for column in 0..grid.lon_steps {
            let south_west = (row * columns + column) as u32;
            let south_east = south_west + 1;
            let north_west = south_west + columns as u32;
            let north_east = north_west + 1;

            faces.extend([south_west, south_east, north_east]);
            faces.extend([south_west, north_east, north_west]);
        }
    }

    let mesh = Mesh { positions, faces };
    let outline = outline(bbox, &grid, height);

    trace!(
        "built mesh for {:?}: {} vertices, {} triangles, {} outline paths",
        bbox.to_array(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        outline.paths.len()
    );

    BBoxMesh { mesh, outline }
}

/// South, east, north and west edges on the mesh grid
///
/// The east and west edges are left out when both sit on the anti-meridian,
/// where they would draw the same line twice.
fn outline(bbox: &BBox, grid: &Grid, height: f64) -> Polyline {
    let parallel = |lat: f64| -> Vec<[f64; 3]> {
        (0..grid.columns())
            .map(|column| [grid.lon(column), lat, height])
            .collect()
    };
    let meridian = |lon: f64| -> Vec<[f64; 3]> {
        (0..=grid.lat_steps)
            .map(|row| [lon, grid.lat(bbox, row), height])
            .collect()
    };

    let mut paths = vec![parallel(bbox.min_lat)];
    if !bbox.spans_all_longitudes() {
        paths.push(meridian(bbox.max_lon));
    }
    paths.push(parallel(bbox.max_lat));
    if !bbox.spans_all_longitudes() {
        paths.push(meridian(bbox.min_lon));
    }

    Polyline { paths }
}

/// Decide how to show a bounding box on the globe
///
/// Small boxes would be hard to spot as a mesh and are shown as a marker at
/// their center instead.
pub fn globe_feature(bbox: &BBox, options: &MeshOptions) -> GlobeFeature {
    if bbox.area() > options.area_threshold {
        GlobeFeature::Mesh(build_mesh(bbox, options.height, options.segments))
    } else {
        GlobeFeature::Marker {
            position: bbox.center(),
            symbol: PointSymbol::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_some_eq;
    use insta::assert_compact_debug_snapshot;

    #[test]
    fn grid_dimensions() {
        // 36 longitude steps over a 90° latitude span -> 9 latitude steps
        let bbox = BBox::new(0.0, 0.0, 36.0, 90.0);
        let BBoxMesh { mesh, .. } = build_mesh(&bbox, 5000.0, 36);

        assert_eq!(mesh.vertex_count(), 37 * 10);
        assert_eq!(mesh.triangle_count(), 36 * 9 * 2);
        assert!(mesh.positions.chunks(3).all(|vertex| vertex[2] == 5000.0));
    }

    #[test]
    fn single_cell_winding() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let BBoxMesh { mesh, .. } = build_mesh(&bbox, 0.0, 1);

        assert_compact_debug_snapshot!(mesh.faces, @"[0, 1, 3, 0, 3, 2]");
        assert_some_eq!(mesh.vertex(0), [0.0, 0.0, 0.0]);
        assert_some_eq!(mesh.vertex(1), [10.0, 0.0, 0.0]);
        assert_some_eq!(mesh.vertex(2), [0.0, 10.0, 0.0]);
        assert_some_eq!(mesh.vertex(3), [10.0, 10.0, 0.0]);
        assert_eq!(mesh.vertex(4), None);
    }

    #[test]
    fn crossing_bbox_wraps_longitudes() {
        let bbox = BBox::new(170.0, 60.0, -170.0, 80.0);
        let BBoxMesh { mesh, .. } = build_mesh(&bbox, 0.0, 4);

        let first_row: Vec<f64> = (0..5).filter_map(|i| mesh.vertex(i)).map(|v| v[0]).collect();
        assert_eq!(first_row, vec![170.0, 175.0, 180.0, -175.0, -170.0]);
        assert!(mesh.positions.chunks(3).all(|vertex| (-180.0..=180.0).contains(&vertex[0])));
    }

    #[test]
    fn zero_segments_are_clamped() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let BBoxMesh { mesh, outline } = build_mesh(&bbox, 0.0, 0);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(outline.paths.len(), 4);
    }

    #[test]
    fn zero_area_bbox_is_not_empty() {
        let bbox = BBox::new(5.0, 5.0, 5.0, 5.0);
        let BBoxMesh { mesh, outline } = build_mesh(&bbox, 0.0, 10);

        assert_eq!(mesh.triangle_count(), 20);
        assert!(!outline.paths.is_empty());
    }

    #[test]
    fn outline_edges() {
        let bbox = BBox::new(-10.0, 60.0, 10.0, 80.0);
        let BBoxMesh { outline, .. } = build_mesh(&bbox, 100.0, 2);

        assert_compact_debug_snapshot!(outline.paths, @"[[[-10.0, 60.0, 100.0], [0.0, 60.0, 100.0], [10.0, 60.0, 100.0]], [[10.0, 60.0, 100.0], [10.0, 80.0, 100.0]], [[-10.0, 80.0, 100.0], [0.0, 80.0, 100.0], [10.0, 80.0, 100.0]], [[-10.0, 60.0, 100.0], [-10.0, 80.0, 100.0]]]");
    }

    #[test]
    fn polar_cap_outline_skips_antimeridian_edges() {
        let bbox = BBox::new(-180.0, -90.0, 180.0, -60.0);
        let BBoxMesh { mesh, outline } = build_mesh(&bbox, 0.0, 12);

        assert_eq!(outline.paths.len(), 2);
        assert_eq!(outline.paths[0][0], [-180.0, -90.0, 0.0]);
        assert_eq!(outline.paths[1][0], [-180.0, -60.0, 0.0]);
        // 12 * 30 / 360 = 1 latitude step
        assert_eq!(mesh.vertex_count(), 13 * 2);
    }

    #[test]
    fn small_boxes_become_markers() {
        let bbox = BBox::new(-38.0, -55.0, -36.0, -54.0);

        match globe_feature(&bbox, &MeshOptions::default()) {
            GlobeFeature::Marker { position, symbol } => {
                assert_eq!(position, LonLat::new(-37.0, -54.5));
                assert_eq!(symbol, PointSymbol::default());
            }
            GlobeFeature::Mesh(_) => panic!("Expected a marker"),
        }
    }

    #[test]
    fn large_boxes_become_meshes() {
        let bbox = BBox::new(170.0, 60.0, -170.0, 80.0);
        let options = MeshOptions {
            segments: 36,
            ..MeshOptions::default()
        };

        match globe_feature(&bbox, &options) {
            GlobeFeature::Mesh(BBoxMesh { mesh, outline }) => {
                assert_eq!(mesh.vertex_count(), 37 * 3);
                assert_eq!(outline.paths.len(), 4);
            }
            GlobeFeature::Marker { .. } => panic!("Expected a mesh"),
        }
    }
}
