#![doc = include_str!("../README.md")]

pub use crate::basemap::{
    ANTARCTIC_BASEMAP_CONFIG, ARCTIC_BASEMAP_CONFIG, BasemapConfig, SOUTH_GEORGIA_BASEMAP_CONFIG,
    SOUTH_GEORGIA_BBOX, ViewExtent, WORLD_BASEMAP_CONFIG, config_for, config_for_wkid,
    is_polar_wkid,
};
pub use crate::classify::{ClassifierConfig, classify_bbox, classify_position};
pub use crate::config::ViewerConfig;
pub use crate::envelope::{
    envelope, envelope_of_points, is_bbox_inside, is_point_in_bbox, nudge_viewpoint,
};
pub use crate::error::{Error, Result};
pub use crate::graticule::{
    DEFAULT_SCALE_INTERVALS, GraticuleBounds, GraticuleLine, ScaleInterval, generate_graticule,
};
pub use crate::heading::{
    AntarcticHeading, HeadingExpressionConfig, bearing_correction, camera_heading,
    corrected_heading, generate_heading_expression, requires_heading_correction,
};
pub use crate::mesh::{BBoxMesh, GlobeFeature, Mesh, MeshOptions, build_mesh, globe_feature};
pub use crate::params::{
    BBoxParam, MapPointParam, parse_bbox_param, parse_map_point_param, validate_bbox,
};
pub use crate::polygon::{
    DEFAULT_DENSIFICATION, GeometryEngine, ReprojectOptions, build_polygon,
    build_projected_polygon, latitude_parallel_points,
};
pub use crate::types::*;
pub use crate::view::{
    AssetFields, DEFAULT_PIXEL_THRESHOLD, GlobeCamera, GoToOptions, GoToTarget, Marker,
    PolygonDisplay, ScaleAwarePolygon, ScreenPoint, ViewConstraints, ViewPlan, Viewport,
    globe_camera, globe_features, pixel_diagonal, plan_asset, plan_bboxes, plan_center,
    plan_points,
};

pub mod basemap;
pub mod classify;
mod config;
pub mod envelope;
mod error;
pub mod graticule;
pub mod heading;
pub mod mesh;
mod params;
pub mod polygon;
mod types;
pub mod view;
