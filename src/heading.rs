//! Heading correction for oriented symbols on the polar maps
//!
//! On a pole-centered azimuthal projection "north" points towards the map
//! center, so its screen direction changes with longitude. A symbol rotated
//! by its raw heading would therefore point the wrong way almost everywhere.
//! The correction depends on each feature's own longitude, so it is handed
//! to the renderer as a per-feature expression instead of a single rotation.

use crate::error::{Error, Result};
use crate::types::{LonLat, Projection};
use serde::{Deserialize, Serialize};

/// Offset between the Arctic basemap's central meridian and Greenwich
const ARCTIC_CENTRAL_MERIDIAN_OFFSET: f64 = -45.0;

/// Sign convention of the Antarctic bearing correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntarcticHeading {
    /// The correction is the feature's longitude
    #[default]
    Direct,
    /// The correction is the negated longitude, for mirrored basemaps
    Mirrored,
}

/// Whether symbols shown in `projection` need a heading correction
pub fn requires_heading_correction(projection: Projection) -> bool {
    projection.is_polar()
}

/// Bearing correction in degrees for a feature at `longitude`, before
/// normalization
pub fn bearing_correction(longitude: f64, projection: Projection, antarctic: AntarcticHeading) -> f64 {
    match projection {
        Projection::Arctic => longitude + ARCTIC_CENTRAL_MERIDIAN_OFFSET,
        Projection::Antarctic => match antarctic {
            AntarcticHeading::Direct => longitude,
            AntarcticHeading::Mirrored => -longitude,
        },
        Projection::World | Projection::SouthGeorgia => 0.0,
    }
}

/// Corrected symbol rotation in degrees, normalized to `[0, 360)`
///
/// Evaluates the same formula as [`generate_heading_expression`] for a
/// single feature.
pub fn corrected_heading(
    longitude: f64,
    heading: f64,
    projection: Projection,
    antarctic: AntarcticHeading,
) -> f64 {
    if !requires_heading_correction(projection) {
        return heading;
    }

    (heading + bearing_correction(longitude, projection, antarctic)).rem_euclid(360.0)
}

/// Camera heading keeping the globe inset aligned with the flat polar map
pub fn camera_heading(center: LonLat) -> f64 {
    if center.lat < 0.0 {
        -center.lon
    } else {
        center.lon
    }
}

/// Input of [`generate_heading_expression`]
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingExpressionConfig<'a> {
    /// Attribute holding the feature's longitude
    pub longitude_field: &'a str,
    /// Attribute holding the feature's raw heading
    pub heading_field: &'a str,
    pub projection: Projection,
    pub antarctic: AntarcticHeading,
}

fn validate_field_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidFieldName(name.to_string()))
    }
}

/// Generate the Arcade expression computing each feature's symbol rotation
///
/// Field names are spliced into the script and must be plain identifiers.
pub fn generate_heading_expression(config: &HeadingExpressionConfig<'_>) -> Result<String> {
    validate_field_name(config.longitude_field)?;
    validate_field_name(config.heading_field)?;

    let longitude = format!("$feature.{}", config.longitude_field);
    let heading = format!("$feature.{}", config.heading_field);

    let correction = match (config.projection, config.antarctic) {
        (Projection::Arctic, _) => format!("longitude - {}", -ARCTIC_CENTRAL_MERIDIAN_OFFSET),
        (Projection::Antarctic, AntarcticHeading::Direct) => "longitude".to_string(),
        (Projection::Antarctic, AntarcticHeading::Mirrored) => "-longitude".to_string(),
        (Projection::World | Projection::SouthGeorgia, _) => {
            return Ok(format!("// No heading correction on the {} map\nreturn {heading};", config.projection));
        }
    };

    Ok(format!(
        "// Heading correction for the {projection} map\n\
         var longitude = {longitude};\n\
         var heading = {heading};\n\
         var correction = {correction};\n\
         return ((heading + correction) % 360 + 360) % 360;",
        projection = config.projection,
    ))
}
