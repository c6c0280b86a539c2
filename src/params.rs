//! Parsing of the JSON `bbox` and `points` input parameters

use crate::error::{Error, Result};
use crate::types::{BBox, MapPoint};
use serde::{Deserialize, Serialize};

/// A single `[minLon, minLat, maxLon, maxLat]` tuple or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BBoxParam {
    Single(BBox),
    Many(Vec<BBox>),
}

impl BBoxParam {
    pub fn into_vec(self) -> Vec<BBox> {
        match self {
            BBoxParam::Single(bbox) => vec![bbox],
            BBoxParam::Many(bboxes) => bboxes,
        }
    }
}

/// A single map point or a list mixing coordinate pairs and styled points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapPointParam {
    Single(MapPoint),
    Many(Vec<MapPoint>),
}

impl MapPointParam {
    pub fn into_vec(self) -> Vec<MapPoint> {
        match self {
            MapPointParam::Single(point) => vec![point],
            MapPointParam::Many(points) => points,
        }
    }
}

/// Check that a bounding box is usable as input
///
/// `min_lon > max_lon` is accepted since it marks an anti-meridian crossing.
pub fn validate_bbox(bbox: &BBox) -> Result<()> {
    let reason = if !bbox.to_array().iter().all(|value| value.is_finite()) {
        "all values must be finite"
    } else if bbox.min_lat > bbox.max_lat {
        "minimum latitude is above maximum latitude"
    } else {
        return Ok(());
    };

    Err(Error::InvalidBBox {
        bbox: bbox.to_array(),
        reason,
    })
}

/// Parse a `bbox` parameter into a list of validated bounding boxes
///
/// # Examples
///
/// ```
/// use polarview::parse_bbox_param;
///
/// let bboxes = parse_bbox_param("[[170, 60, -170, 80], [-10, -80, 10, -60]]").unwrap();
/// assert_eq!(bboxes.len(), 2);
/// assert!(bboxes[0].crosses_antimeridian());
/// ```
pub fn parse_bbox_param(json: &str) -> Result<Vec<BBox>> {
    let bboxes = serde_json::from_str::<BBoxParam>(json)?.into_vec();
    bboxes.iter().try_for_each(validate_bbox)?;
    Ok(bboxes)
}

/// Parse a `points` parameter into a list of map points
pub fn parse_map_point_param(json: &str) -> Result<Vec<MapPoint>> {
    Ok(serde_json::from_str::<MapPointParam>(json)?.into_vec())
}
