//! Fence records in the output geofencing schema.
//!
//! ```json
//! {
//!   "name": { "value": "Rocket 00" },
//!   "geoShape": {
//!     "type": "polygon",
//!     "fencePoints": [
//!       { "lat": { "NormValue": 47.55, "NormUnit": "°" }, "latDirection": "NORTH",
//!         "long": { "NormValue": 9.08, "NormUnit": "°" }, "longDirection": "EAST" }
//!     ]
//!   }
//! }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};

use crate::types::{Geographic, Shape};

pub const DEGREE_UNIT: &str = "°";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FenceRecord {
    pub name: FenceName,
    #[serde(rename = "geoShape")]
    pub geo_shape: GeoShape,
}

impl FenceRecord {
    pub fn name(&self) -> &str {
        &self.name.value
    }

    pub fn points(&self) -> &[FencePoint] {
        &self.geo_shape.fence_points
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FenceName {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GeoShape {
    #[serde(rename = "type")]
    pub kind: GeoShapeKind,
    #[serde(rename = "fencePoints")]
    pub fence_points: Vec<FencePoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeoShapeKind {
    Polygon,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FencePoint {
    pub lat: NormValue,
    #[serde(rename = "latDirection")]
    pub lat_direction: LatitudeDirection,
    pub long: NormValue,
    #[serde(rename = "longDirection")]
    pub long_direction: LongitudeDirection,
}

impl FencePoint {
    /// Signed latitude, negative when tagged SOUTH.
    pub fn latitude(&self) -> f64 {
        match self.lat_direction {
            LatitudeDirection::North => self.lat.value,
            LatitudeDirection::South => -self.lat.value,
        }
    }

    /// Signed longitude, negative when tagged WEST.
    pub fn longitude(&self) -> f64 {
        match self.long_direction {
            LongitudeDirection::East => self.long.value,
            LongitudeDirection::West => -self.long.value,
        }
    }
}

/// A value with its unit, degrees for every fence coordinate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NormValue {
    #[serde(rename = "NormValue")]
    pub value: f64,
    #[serde(rename = "NormUnit")]
    pub unit: String,
}

impl NormValue {
    pub fn degrees(value: f64) -> Self {
        Self {
            value,
            unit: DEGREE_UNIT.to_string(),
        }
    }
}

#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LatitudeDirection {
    North,
    South,
}

#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum LongitudeDirection {
    East,
    West,
}

/// How hemisphere tags are attached to fence points.
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HemisphereLabeling {
    /// Every point is tagged NORTH/EAST and carries its signed value.
    ///
    /// Southern or western fences come out mislabeled but numerically exact.
    #[default]
    FixedNorthEast,
    /// Tags follow the coordinate sign and values are magnitudes.
    FromSign,
}

impl HemisphereLabeling {
    pub fn fence_point(self, lat: f64, lon: f64) -> FencePoint {
        match self {
            Self::FixedNorthEast => FencePoint {
                lat: NormValue::degrees(lat),
                lat_direction: LatitudeDirection::North,
                long: NormValue::degrees(lon),
                long_direction: LongitudeDirection::East,
            },
            Self::FromSign => FencePoint {
                lat: NormValue::degrees(lat.abs()),
                lat_direction: if lat < 0.0 { LatitudeDirection::South } else { LatitudeDirection::North },
                long: NormValue::degrees(lon.abs()),
                long_direction: if lon < 0.0 { LongitudeDirection::West } else { LongitudeDirection::East },
            },
        }
    }
}

/// `"{description} {index:02}"`
pub fn fence_name(description: &str, index: usize) -> String {
    format!("{description} {index:02}")
}

/// Package one geographic shape as a fence record.
///
/// Points follow the ring order of the shape, each distinct vertex once;
/// the ring is not closed in the output.
pub fn assemble(shape: &Shape<Geographic>, description: &str, index: usize, labeling: HemisphereLabeling) -> FenceRecord {
    let fence_points = shape
        .vertices()
        .iter()
        .map(|coord| labeling.fence_point(coord.y, coord.x))
        .collect();

    FenceRecord {
        name: FenceName {
            value: fence_name(description, index),
        },
        geo_shape: GeoShape {
            kind: GeoShapeKind::Polygon,
            fence_points,
        },
    }
}
