//! Envelope and containment helpers for bounding boxes and points

use crate::types::{BBox, LonLat};
use log::warn;

/// Distance from a pole or the anti-meridian below which a viewpoint is
/// nudged, in degrees
const NUDGE_THRESHOLD: f64 = 0.5;

/// Compute the envelope (componentwise min/max) of a set of bounding boxes
///
/// Returns `None` if the slice is empty.
///
/// # Limitations
///
/// Boxes crossing the anti-meridian are merged like any other box, which
/// produces an envelope spanning nearly the whole globe when crossing and
/// non-crossing boxes are mixed. A warning is logged in that case.
pub fn envelope(bboxes: &[BBox]) -> Option<BBox> {
    let (first, rest) = bboxes.split_first()?;

    let crossing = bboxes.iter().filter(|bbox| bbox.crosses_antimeridian()).count();
    if crossing > 0 && crossing < bboxes.len() {
        warn!(
            "envelope of {} boxes includes {crossing} crossing the anti-meridian, result may be too wide",
            bboxes.len()
        );
    }

    let mut envelope = *first;
    for bbox in rest {
        envelope.merge(*bbox);
    }
    Some(envelope)
}

/// Compute the envelope of a set of points
///
/// Returns `None` if the slice is empty.
pub fn envelope_of_points(points: &[LonLat]) -> Option<BBox> {
    BBox::from_points(points)
}

/// Whether `inner` lies entirely within `outer` (edges may touch)
pub fn is_bbox_inside(inner: &BBox, outer: &BBox) -> bool {
    inner.min_lon >= outer.min_lon
        && inner.min_lat >= outer.min_lat
        && inner.max_lon <= outer.max_lon
        && inner.max_lat <= outer.max_lat
}

/// Whether `point` lies within `bbox` (closed intervals on both axes)
pub fn is_point_in_bbox(point: LonLat, bbox: &BBox) -> bool {
    point.lon >= bbox.min_lon
        && point.lon <= bbox.max_lon
        && point.lat >= bbox.min_lat
        && point.lat <= bbox.max_lat
}

/// Move a viewpoint away from the poles and the anti-meridian
///
/// The renderer cannot re-project viewpoints sitting exactly on a pole or on
/// ±180° longitude. Points within half a degree of those lines are moved
/// 0.2° back from the north pole or from +180°, and 0.1° back from the south
/// pole or from -180°.
pub fn nudge_viewpoint(point: LonLat) -> LonLat {
    let LonLat { mut lon, mut lat } = point;

    if (lat.abs() - 90.0).abs() < NUDGE_THRESHOLD {
        if lat > 0.0 {
            lat -= 0.2;
        } else {
            lat += 0.1;
        }
    }

    if (lon.abs() - 180.0).abs() < NUDGE_THRESHOLD {
        if lon > 0.0 {
            lon -= 0.2;
        } else {
            lon += 0.1;
        }
    }

    LonLat::new(lon, lat)
}
