//! Labelled graticule lines (parallels and meridians)
//!
//! Lines are generated once for every scale interval. The renderer shows
//! the set whose scale range matches the current view.

use crate::classify::ClassifierConfig;
use crate::types::Projection;
use log::warn;

/// Graticules never reach the poles, where meridians converge
const MAX_GRATICULE_LATITUDE: f64 = 89.0;

/// Sampling step along parallels, in degrees longitude
const PARALLEL_STEP: f64 = 0.5;

/// Sampling step along meridians, in degrees latitude
const MERIDIAN_STEP: f64 = 1.0;

/// Parallels are split into these longitude ranges
const PARALLEL_SEGMENTS: [(f64, f64); 4] = [(-180.0, -90.0), (-90.0, 0.0), (0.0, 90.0), (90.0, 180.0)];

/// Latitude range covered by the graticule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraticuleBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl GraticuleBounds {
    /// Bounds of the region shown by a projection
    pub fn for_projection(projection: Projection, classifier: &ClassifierConfig) -> Self {
        let region = classifier.region(projection);
        Self {
            min_latitude: region.min_lat,
            max_latitude: region.max_lat,
        }
    }

    fn clamped(&self) -> (f64, f64) {
        (
            self.min_latitude.max(-MAX_GRATICULE_LATITUDE),
            self.max_latitude.min(MAX_GRATICULE_LATITUDE),
        )
    }
}

impl Default for GraticuleBounds {
    fn default() -> Self {
        Self {
            min_latitude: -MAX_GRATICULE_LATITUDE,
            max_latitude: MAX_GRATICULE_LATITUDE,
        }
    }
}

/// Line spacing used between two map scales
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleInterval {
    pub min_scale: f64,
    pub max_scale: f64,
    pub lat_interval: f64,
    pub lon_interval: f64,
}

pub const DEFAULT_SCALE_INTERVALS: [ScaleInterval; 4] = [
    ScaleInterval {
        min_scale: f64::INFINITY,
        max_scale: 20_000_000.0,
        lat_interval: 10.0,
        lon_interval: 30.0,
    },
    ScaleInterval {
        min_scale: 20_000_000.0,
        max_scale: 5_000_000.0,
        lat_interval: 5.0,
        lon_interval: 10.0,
    },
    ScaleInterval {
        min_scale: 5_000_000.0,
        max_scale: 1_250_000.0,
        lat_interval: 1.0,
        lon_interval: 5.0,
    },
    ScaleInterval {
        min_scale: 1_250_000.0,
        max_scale: 0.0,
        lat_interval: 0.5,
        lon_interval: 1.0,
    },
];

/// A single labelled graticule polyline in WGS84
#[derive(Debug, Clone, PartialEq)]
pub struct GraticuleLine {
    pub object_id: u32,
    pub path: Vec<[f64; 2]>,
    pub label: String,
    pub lat_interval: f64,
    pub lon_interval: f64,
}

fn latitude_label(lat: f64) -> String {
    format!("{}°{}", lat.abs(), if lat >= 0.0 { 'N' } else { 'S' })
}

fn longitude_label(lon: f64) -> String {
    format!("{}°{}", lon.abs(), if lon >= 0.0 { 'E' } else { 'W' })
}

/// Values from `start` to `end` (inclusive) in steps of `step`
///
/// Computed by index to avoid accumulating rounding errors. Yields nothing
/// unless `step` is finite and positive.
fn steps(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step.is_finite() && step > 0.0 && start.is_finite() && end.is_finite() {
        ((end - start) / step + 1e-9).floor().max(-1.0) as i64
    } else {
        -1
    };
    (0..=count).map(move |i| start + step * i as f64)
}

/// Generate the graticule lines for every scale interval
///
/// Object ids are assigned sequentially starting at 1.
pub fn generate_graticule(bounds: &GraticuleBounds, intervals: &[ScaleInterval]) -> Vec<GraticuleLine> {
    let (min_lat, max_lat) = bounds.clamped();

    let mut lines = Vec::new();
    for interval in intervals {
        if !is_valid_step(interval.lat_interval) || !is_valid_step(interval.lon_interval) {
            warn!("skipping graticule interval with invalid spacing: {interval:?}");
            continue;
        }

        parallels(interval, min_lat, max_lat, &mut lines);
        meridians(interval, min_lat, max_lat, &mut lines);
    }

    lines
}

fn is_valid_step(step: f64) -> bool {
    step.is_finite() && step > 0.0
}

fn next_object_id(lines: &[GraticuleLine]) -> u32 {
    lines.len() as u32 + 1
}

/// The bounds themselves plus every multiple of the interval between them,
/// each split into four segments
fn parallels(interval: &ScaleInterval, min_lat: f64, max_lat: f64, lines: &mut Vec<GraticuleLine>) {
    let mut latitudes = vec![min_lat, max_lat];
    for lat in steps(-90.0, 90.0, interval.lat_interval).map(|lat| -lat) {
        if (min_lat..=max_lat).contains(&lat) && !latitudes.contains(&lat) {
            latitudes.push(lat);
        }
    }
    latitudes.dedup();

    for lat in latitudes {
        for (start, end) in PARALLEL_SEGMENTS {
            lines.push(GraticuleLine {
                object_id: next_object_id(lines),
                path: steps(start, end, PARALLEL_STEP).map(|lon| [lon, lat]).collect(),
                label: latitude_label(lat),
                lat_interval: interval.lat_interval,
                lon_interval: interval.lon_interval,
            });
        }
    }
}

fn meridians(interval: &ScaleInterval, min_lat: f64, max_lat: f64, lines: &mut Vec<GraticuleLine>) {
    for lon in steps(-180.0, 180.0, interval.lon_interval) {
        let mut path: Vec<[f64; 2]> = steps(min_lat, max_lat, MERIDIAN_STEP).map(|lat| [lon, lat]).collect();
        if path.last().is_none_or(|&[_, lat]| lat < max_lat) {
            path.push([lon, max_lat]);
        }

        lines.push(GraticuleLine {
            object_id: next_object_id(lines),
            path,
            label: longitude_label(lon),
            lat_interval: interval.lat_interval,
            lon_interval: interval.lon_interval,
        });
    }
}
