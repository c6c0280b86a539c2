//! Planning and applying map views
//!
//! A [`ViewPlan`] bundles everything needed to show some geometry: the
//! projection picked by the classifier, its basemap, the navigation
//! constraints and the target to go to. Planning is pure; only
//! [`ViewPlan::apply`] talks to the rendering layer, through the
//! [`Viewport`] trait.

use crate::basemap::{BasemapConfig, config_for};
use crate::config::ViewerConfig;
use crate::envelope::{envelope, envelope_of_points, nudge_viewpoint};
use crate::error::{Error, Result};
use crate::heading::{HeadingExpressionConfig, camera_heading, generate_heading_expression};
use crate::mesh::{GlobeFeature, globe_feature};
use crate::polygon::build_polygon;
use crate::types::{BBox, LonLat, MapPoint, PointSymbol, Polygon, Projection};
use log::debug;

/// Map scale used when zooming to a single asset
pub const ASSET_SCALE: f64 = 1_000_000.0;

/// Navigation constraints of a map view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConstraints {
    /// Area the view may be panned within
    pub geometry: Polygon,
    pub rotation_enabled: bool,
    pub snap_to_zoom: bool,
}

/// What the view should be centered on
#[derive(Debug, Clone, PartialEq)]
pub enum GoToTarget {
    /// Fit the view to a polygon
    Geometry(Polygon),
    /// Center the view on a position
    Point(LonLat),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GoToOptions {
    pub animate: bool,
    /// Fixed map scale, or `None` to fit the target
    pub scale: Option<f64>,
}

/// Map view of the rendering layer
pub trait Viewport {
    fn set_rotation(&mut self, degrees: f64);
    fn set_constraints(&mut self, constraints: ViewConstraints) -> Result<()>;
    fn go_to(&mut self, target: &GoToTarget, options: GoToOptions) -> Result<()>;
}

/// A marker to draw on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LonLat,
    pub symbol: PointSymbol,
}

/// Default on-screen diagonal, in pixels, below which a bounding box is
/// shown as a marker
pub const DEFAULT_PIXEL_THRESHOLD: f64 = 10.0;

/// Screen position in pixels
pub type ScreenPoint = [f64; 2];

/// Length in pixels of the diagonal between two projected corners
///
/// A corner that could not be projected onto the screen counts as a
/// zero-length diagonal.
pub fn pixel_diagonal(bottom_left: Option<ScreenPoint>, top_right: Option<ScreenPoint>) -> f64 {
    match (bottom_left, top_right) {
        (Some([x1, y1]), Some([x2, y2])) => (x2 - x1).hypot(y2 - y1),
        _ => 0.0,
    }
}

/// A bounding box polygon with the marker shown in its place once it gets
/// too small on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleAwarePolygon {
    pub polygon: Polygon,
    pub marker: Marker,
}

/// What a [`ScaleAwarePolygon`] shows at the current scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonDisplay<'a> {
    Polygon(&'a Polygon),
    Marker(&'a Marker),
}

impl ScaleAwarePolygon {
    /// Build the polygon of `bbox` for `projection` with a marker at the
    /// box center, using the default point symbol unless `symbol` is given
    pub fn new(bbox: &BBox, projection: Projection, densification: usize, symbol: Option<PointSymbol>) -> Self {
        Self {
            polygon: build_polygon(bbox, projection, densification),
            marker: Marker {
                position: bbox.center(),
                symbol: symbol.unwrap_or_default(),
            },
        }
    }

    /// Pick the polygon or the marker from the polygon extent's projected
    /// corners
    ///
    /// # Arguments
    ///
    /// * `bottom_left` - Screen position of the extent's south-west corner
    /// * `top_right` - Screen position of the extent's north-east corner
    /// * `pixel_threshold` - Diagonal length (in pixels) from which the
    ///   polygon itself is shown
    pub fn display(
        &self,
        bottom_left: Option<ScreenPoint>,
        top_right: Option<ScreenPoint>,
        pixel_threshold: f64,
    ) -> PolygonDisplay<'_> {
        if pixel_diagonal(bottom_left, top_right) >= pixel_threshold {
            PolygonDisplay::Polygon(&self.polygon)
        } else {
            PolygonDisplay::Marker(&self.marker)
        }
    }
}

/// Everything needed to show some geometry on the right map
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPlan {
    pub projection: Projection,
    pub basemap: &'static BasemapConfig,
    pub constraints: ViewConstraints,
    pub target: GoToTarget,
    pub scale: Option<f64>,
    /// WGS84 polygons of the requested bounding boxes
    pub polygons: Vec<ScaleAwarePolygon>,
    pub markers: Vec<Marker>,
    /// Symbol rotation expression for assets on the polar maps
    pub heading_expression: Option<String>,
}

impl ViewPlan {
    fn new(projection: Projection, target: GoToTarget) -> Self {
        let basemap = config_for(projection);
        Self {
            projection,
            basemap,
            constraints: basemap.view_constraints(),
            target,
            scale: None,
            polygons: Vec::new(),
            markers: Vec::new(),
            heading_expression: None,
        }
    }

    /// Point the viewport at the planned target
    ///
    /// Sets the rotation, then the constraints, then navigates without
    /// animation. Stops at the first failure.
    pub fn apply<V: Viewport + ?Sized>(&self, viewport: &mut V) -> Result<()> {
        viewport.set_rotation(self.basemap.rotation_degrees);
        viewport.set_constraints(self.constraints.clone())?;
        viewport.go_to(
            &self.target,
            GoToOptions {
                animate: false,
                scale: self.scale,
            },
        )
    }
}

/// Plan a view showing a set of bounding boxes
///
/// The projection is picked for the envelope of all boxes. With
/// `show_region` the view goes to the whole basemap extent instead of the
/// envelope.
pub fn plan_bboxes(config: &ViewerConfig, bboxes: &[BBox], show_region: bool) -> Result<ViewPlan> {
    let envelope = envelope(bboxes).ok_or(Error::EmptyInput)?;
    let projection = config.classifier.classify_bbox(&envelope);

    let target = if show_region {
        GoToTarget::Geometry(config_for(projection).view_extent.to_polygon())
    } else {
        GoToTarget::Geometry(build_polygon(&envelope, projection, config.densification))
    };

    let mut plan = ViewPlan::new(projection, target);
    plan.polygons = bboxes
        .iter()
        .map(|bbox| ScaleAwarePolygon::new(bbox, projection, config.densification, None))
        .collect();

    debug!(
        "planned {projection} view for {} bounding boxes (show_region: {show_region})",
        bboxes.len()
    );
    Ok(plan)
}

/// Plan a view centered on a position
pub fn plan_center(config: &ViewerConfig, center: LonLat) -> ViewPlan {
    let projection = config.classifier.classify_position(center);
    debug!("planned {projection} view centered on {center:?}");
    ViewPlan::new(projection, GoToTarget::Point(center))
}

/// Plan a view showing a set of styled points
pub fn plan_points(config: &ViewerConfig, points: &[MapPoint]) -> Result<ViewPlan> {
    let positions: Vec<LonLat> = points.iter().map(MapPoint::position).collect();
    let envelope = envelope_of_points(&positions).ok_or(Error::EmptyInput)?;
    let projection = config.classifier.classify_bbox(&envelope);

    let target = match positions.as_slice() {
        [position] => GoToTarget::Point(*position),
        _ => GoToTarget::Geometry(build_polygon(&envelope, projection, config.densification)),
    };

    let mut plan = ViewPlan::new(projection, target);
    plan.markers = points
        .iter()
        .map(|point| Marker {
            position: point.position(),
            symbol: point.symbol(),
        })
        .collect();

    debug!("planned {projection} view for {} points", points.len());
    Ok(plan)
}

/// Attribute fields of an asset layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetFields<'a> {
    pub longitude_field: &'a str,
    pub heading_field: &'a str,
}

/// Plan a view zoomed to a tracked asset
///
/// On the polar maps the plan carries the heading expression for the asset
/// layer's symbols.
pub fn plan_asset(config: &ViewerConfig, position: LonLat, fields: &AssetFields<'_>) -> Result<ViewPlan> {
    let projection = config.classifier.classify_position(position);

    let mut plan = ViewPlan::new(projection, GoToTarget::Point(position));
    plan.scale = Some(ASSET_SCALE);

    if projection.is_polar() {
        let expression = generate_heading_expression(&HeadingExpressionConfig {
            longitude_field: fields.longitude_field,
            heading_field: fields.heading_field,
            projection,
            antarctic: config.antarctic_heading,
        })?;
        plan.heading_expression = Some(expression);
    }

    debug!("planned {projection} view for asset at {position:?}");
    Ok(plan)
}

/// Globe representation of each bounding box
pub fn globe_features(config: &ViewerConfig, bboxes: &[BBox]) -> Vec<GlobeFeature> {
    bboxes.iter().map(|bbox| globe_feature(bbox, &config.mesh)).collect()
}

/// Camera of the globe inset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeCamera {
    pub target: LonLat,
    /// Camera heading in degrees, only set on the polar maps
    pub heading: Option<f64>,
}

/// Camera looking at `center`, aligned with the flat map of `projection`
pub fn globe_camera(center: LonLat, projection: Projection) -> GlobeCamera {
    GlobeCamera {
        target: nudge_viewpoint(center),
        heading: projection.is_polar().then(|| camera_heading(center)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basemap::{ANTARCTIC_BASEMAP_CONFIG, ARCTIC_BASEMAP_CONFIG};
    use approx::assert_abs_diff_eq;
    use claims::{assert_err, assert_matches, assert_none, assert_ok, assert_some};

    #[derive(Debug, PartialEq)]
    enum Call {
        Rotation(f64),
        Constraints(ViewConstraints),
        GoTo(GoToTarget, GoToOptions),
    }

    #[derive(Default)]
    struct RecordingViewport {
        calls: Vec<Call>,
        reject_constraints: bool,
    }

    impl Viewport for RecordingViewport {
        fn set_rotation(&mut self, degrees: f64) {
            self.calls.push(Call::Rotation(degrees));
        }

        fn set_constraints(&mut self, constraints: ViewConstraints) -> Result<()> {
            if self.reject_constraints {
                return Err(Error::Viewport("constraints rejected".to_string()));
            }
            self.calls.push(Call::Constraints(constraints));
            Ok(())
        }

        fn go_to(&mut self, target: &GoToTarget, options: GoToOptions) -> Result<()> {
            self.calls.push(Call::GoTo(target.clone(), options));
            Ok(())
        }
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let config = ViewerConfig::default();

        assert_matches!(assert_err!(plan_bboxes(&config, &[], false)), Error::EmptyInput);
        assert_matches!(assert_err!(plan_points(&config, &[])), Error::EmptyInput);
    }

    #[test]
    fn bboxes_plan() {
        let config = ViewerConfig {
            densification: 5,
            ..ViewerConfig::default()
        };
        let bboxes = [BBox::new(170.0, 60.0, -170.0, 80.0), BBox::new(175.0, 65.0, -175.0, 70.0)];

        let plan = assert_ok!(plan_bboxes(&config, &bboxes, false));
        assert_eq!(plan.projection, Projection::Arctic);
        assert_eq!(plan.basemap, &ARCTIC_BASEMAP_CONFIG);
        assert_eq!(plan.constraints, ARCTIC_BASEMAP_CONFIG.view_constraints());
        assert_eq!(plan.polygons.len(), 2);
        assert!(plan.polygons.iter().all(|bbox| bbox.polygon.rings.len() == 2));
        assert_eq!(plan.target, GoToTarget::Geometry(plan.polygons[0].polygon.clone()));
        assert_eq!(plan.polygons[0].marker.position, LonLat::new(180.0, 70.0));
        assert_none!(plan.scale);
    }

    #[test]
    fn show_region_targets_view_extent() {
        let bboxes = [BBox::new(-10.0, -80.0, 10.0, -60.0)];
        let plan = assert_ok!(plan_bboxes(&ViewerConfig::default(), &bboxes, true));

        assert_eq!(plan.projection, Projection::Antarctic);
        assert_eq!(
            plan.target,
            GoToTarget::Geometry(ANTARCTIC_BASEMAP_CONFIG.view_extent.to_polygon())
        );
    }

    #[test]
    fn apply_order() {
        let plan = plan_center(&ViewerConfig::default(), LonLat::new(20.0, 75.0));
        let mut viewport = RecordingViewport::default();

        assert_ok!(plan.apply(&mut viewport));
        assert_eq!(
            viewport.calls,
            vec![
                Call::Rotation(150.0),
                Call::Constraints(ARCTIC_BASEMAP_CONFIG.view_constraints()),
                Call::GoTo(
                    GoToTarget::Point(LonLat::new(20.0, 75.0)),
                    GoToOptions {
                        animate: false,
                        scale: None
                    }
                ),
            ]
        );
    }

    #[test]
    fn apply_stops_at_first_failure() {
        let plan = plan_center(&ViewerConfig::default(), LonLat::new(0.0, 0.0));
        let mut viewport = RecordingViewport {
            reject_constraints: true,
            ..RecordingViewport::default()
        };

        let error = assert_err!(plan.apply(&mut viewport));
        assert_eq!(error.to_string(), "Viewport navigation failed: constraints rejected");
        assert_eq!(viewport.calls, vec![Call::Rotation(0.0)]);
    }

    #[test]
    fn points_plan() {
        let points = [
            MapPoint::Coordinates(LonLat::new(-37.0, -54.5)),
            MapPoint::Coordinates(LonLat::new(-36.5, -54.2)),
        ];

        let plan = assert_ok!(plan_points(&ViewerConfig::default(), &points));
        assert_eq!(plan.projection, Projection::SouthGeorgia);
        assert_eq!(plan.markers.len(), 2);
        assert_eq!(plan.markers[1].position, LonLat::new(-36.5, -54.2));
        assert_matches!(plan.target, GoToTarget::Geometry(_));
    }

    #[test]
    fn single_point_plan_centers_on_it() {
        let points = [MapPoint::Coordinates(LonLat::new(100.0, -75.0))];

        let plan = assert_ok!(plan_points(&ViewerConfig::default(), &points));
        assert_eq!(plan.projection, Projection::Antarctic);
        assert_eq!(plan.target, GoToTarget::Point(LonLat::new(100.0, -75.0)));
    }

    #[test]
    fn asset_plans() {
        let fields = AssetFields {
            longitude_field: "LON",
            heading_field: "COG",
        };

        let polar = assert_ok!(plan_asset(&ViewerConfig::default(), LonLat::new(-60.0, -65.0), &fields));
        assert_eq!(polar.projection, Projection::Antarctic);
        assert_eq!(polar.scale, Some(ASSET_SCALE));
        let expression = assert_some!(polar.heading_expression);
        assert!(expression.contains("$feature.COG"));

        let world = assert_ok!(plan_asset(&ViewerConfig::default(), LonLat::new(10.0, 10.0), &fields));
        assert_eq!(world.projection, Projection::World);
        assert_none!(world.heading_expression);
    }

    #[test]
    fn asset_plan_rejects_bad_field_names() {
        let fields = AssetFields {
            longitude_field: "LON",
            heading_field: "COG;",
        };

        let result = plan_asset(&ViewerConfig::default(), LonLat::new(10.0, 80.0), &fields);
        assert_matches!(assert_err!(result), Error::InvalidFieldName(_));
    }

    #[test]
    fn globe_cameras() {
        let camera = globe_camera(LonLat::new(179.9, -89.8), Projection::Antarctic);
        assert_eq!(camera.heading, Some(-179.9));
        assert!(camera.target.lon < 179.9);
        assert!(camera.target.lat > -89.8);

        let camera = globe_camera(LonLat::new(30.0, 10.0), Projection::World);
        assert_eq!(camera.target, LonLat::new(30.0, 10.0));
        assert_none!(camera.heading);
    }

    #[test]
    fn globe_features_per_bbox() {
        let config = ViewerConfig::default();
        let bboxes = [BBox::new(-38.0, -55.0, -36.0, -54.0), BBox::new(-10.0, 60.0, 10.0, 80.0)];

        let features = globe_features(&config, &bboxes);
        assert_matches!(&features[0], GlobeFeature::Marker { .. });
        assert_matches!(&features[1], GlobeFeature::Mesh(_));
    }

    #[test]
    fn pixel_diagonals() {
        assert_abs_diff_eq!(pixel_diagonal(Some([0.0, 40.0]), Some([30.0, 0.0])), 50.0, epsilon = 1e-9);
        assert_eq!(pixel_diagonal(Some([10.0, 10.0]), Some([10.0, 10.0])), 0.0);
        assert_eq!(pixel_diagonal(None, Some([30.0, 0.0])), 0.0);
        assert_eq!(pixel_diagonal(Some([0.0, 40.0]), None), 0.0);
    }

    #[test]
    fn small_polygons_are_shown_as_markers() {
        let bbox = BBox::new(-175.0, -80.4, -174.0, -80.3);
        let shape = ScaleAwarePolygon::new(&bbox, Projection::Antarctic, 5, None);

        assert_eq!(shape.marker.symbol, PointSymbol::default());
        assert_matches!(shape.display(Some([0.0, 4.0]), Some([3.0, 0.0]), 10.0), PolygonDisplay::Marker(_));
        assert_matches!(shape.display(Some([0.0, 0.0]), Some([9.9, 0.0]), 10.0), PolygonDisplay::Marker(_));
        // The threshold itself is large enough
        assert_matches!(shape.display(Some([0.0, 0.0]), Some([10.0, 0.0]), 10.0), PolygonDisplay::Polygon(_));
        assert_matches!(shape.display(Some([0.0, 0.0]), Some([600.0, 800.0]), 10.0), PolygonDisplay::Polygon(_));
        assert_matches!(shape.display(None, Some([600.0, 800.0]), 10.0), PolygonDisplay::Marker(_));
    }

    #[test]
    fn scale_aware_polygon_parts() {
        let bbox = BBox::new(170.0, 60.0, -170.0, 80.0);
        let symbol = PointSymbol {
            color: "#0000FF".to_string(),
            ..PointSymbol::default()
        };
        let shape = ScaleAwarePolygon::new(&bbox, Projection::Arctic, 5, Some(symbol.clone()));

        assert_eq!(shape.polygon, build_polygon(&bbox, Projection::Arctic, 5));
        assert_eq!(shape.marker.position, LonLat::new(180.0, 70.0));
        assert_eq!(shape.marker.symbol, symbol);
        assert_eq!(shape.display(None, None, 0.0), PolygonDisplay::Polygon(&shape.polygon));
    }

    #[test]
    fn plan_threshold_picks_display() {
        let config = ViewerConfig {
            pixel_threshold: 100.0,
            ..ViewerConfig::default()
        };
        let plan = assert_ok!(plan_bboxes(&config, &[BBox::new(-10.0, -20.0, 10.0, 20.0)], false));

        let shape = &plan.polygons[0];
        let display = shape.display(Some([0.0, 100.0]), Some([0.0, 0.0]), config.pixel_threshold);
        assert_eq!(display, PolygonDisplay::Polygon(&shape.polygon));

        let display = shape.display(Some([0.0, 6.0]), Some([8.0, 0.0]), config.pixel_threshold);
        assert_eq!(display, PolygonDisplay::Marker(&shape.marker));
    }
}
