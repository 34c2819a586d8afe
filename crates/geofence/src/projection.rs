//! Anchor resolution and the WGS84 <-> UTM transforms.
//!
//! The planar system for a job is the UTM zone containing its anchor. Zone
//! numbers follow longitude in 6° bands with the Norway and Svalbard
//! exceptions; the latitude band letter picks the hemisphere variant.

use std::fmt;

use geo_types::Coord;
use proj4rs::proj::Proj;
use serde::{Deserialize, Serialize};

use crate::error::{FenceError, Result};

pub const MIN_LATITUDE: f64 = -80.0;
pub const MAX_LATITUDE: f64 = 84.0;

const LATITUDE_BANDS: &[u8] = b"CDEFGHJKLMNPQRSTUVWXX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmZone {
    pub number: u8,
    pub letter: char,
}

impl UtmZone {
    /// Zone containing the given WGS84 location.
    pub fn for_location(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite()
            || !lon.is_finite()
            || !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat)
            || !(-180.0..=180.0).contains(&lon)
        {
            return Err(FenceError::AnchorOutOfRange { lat, lon });
        }

        Ok(Self {
            number: zone_number(lat, lon),
            letter: zone_letter(lat),
        })
    }

    pub fn is_southern(&self) -> bool {
        self.letter < 'N'
    }

    /// Longitude of the zone's central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    fn proj_string(&self) -> String {
        let south = if self.is_southern() { " +south" } else { "" };
        format!("+proj=utm +zone={}{south} +ellps=WGS84 +datum=WGS84 +units=m +no_defs", self.number)
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.letter)
    }
}

fn zone_number(lat: f64, lon: f64) -> u8 {
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }

    if (72.0..=84.0).contains(&lat) && lon >= 0.0 {
        if lon < 9.0 {
            return 31;
        } else if lon < 21.0 {
            return 33;
        } else if lon < 33.0 {
            return 35;
        } else if lon < 42.0 {
            return 37;
        }
    }

    // lon = 180 belongs to the last zone
    (((lon + 180.0) / 6.0).floor() as u8 + 1).min(60)
}

fn zone_letter(lat: f64) -> char {
    let band = ((lat - MIN_LATITUDE) / 8.0).floor() as usize;
    char::from(LATITUDE_BANDS[band.min(LATITUDE_BANDS.len() - 1)])
}

/// Forward and inverse transforms between WGS84 degrees and one UTM zone.
pub struct Projector {
    zone: UtmZone,
    geographic: Proj,
    planar: Proj,
}

impl fmt::Debug for Projector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projector").field("zone", &self.zone).finish_non_exhaustive()
    }
}

impl Projector {
    pub fn for_zone(zone: UtmZone) -> Result<Self> {
        let geographic = Proj::from_proj_string("+proj=latlong +ellps=WGS84 +datum=WGS84 +no_defs")
            .map_err(|err| FenceError::Projection(format!("{err:?}")))?;
        let planar = Proj::from_proj_string(&zone.proj_string())
            .map_err(|err| FenceError::Projection(format!("{err:?}")))?;

        Ok(Self {
            zone,
            geographic,
            planar,
        })
    }

    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    /// WGS84 degrees to easting/northing in meters.
    pub fn to_planar(&self, lon: f64, lat: f64) -> Result<Coord<f64>> {
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        proj4rs::transform::transform(&self.geographic, &self.planar, &mut point)
            .map_err(|err| FenceError::Projection(format!("({lat}, {lon}) -> {}: {err:?}", self.zone)))?;

        finite(Coord { x: point.0, y: point.1 })
    }

    /// Easting/northing in meters to WGS84 degrees (`x` = longitude).
    pub fn to_geographic(&self, planar: Coord<f64>) -> Result<Coord<f64>> {
        let mut point = (planar.x, planar.y, 0.0);
        proj4rs::transform::transform(&self.planar, &self.geographic, &mut point)
            .map_err(|err| FenceError::Projection(format!("{} ({}, {}) -> WGS84: {err:?}", self.zone, planar.x, planar.y)))?;

        finite(Coord {
            x: point.0.to_degrees(),
            y: point.1.to_degrees(),
        })
    }
}

fn finite(coord: Coord<f64>) -> Result<Coord<f64>> {
    if coord.x.is_finite() && coord.y.is_finite() {
        Ok(coord)
    } else {
        Err(FenceError::Projection(format!("non-finite result ({}, {})", coord.x, coord.y)))
    }
}

/// An anchor location in both WGS84 and its zone's planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub lat: f64,
    pub lon: f64,
    pub easting: f64,
    pub northing: f64,
    pub zone: UtmZone,
}

impl AnchorPoint {
    pub fn planar(&self) -> Coord<f64> {
        Coord {
            x: self.easting,
            y: self.northing,
        }
    }
}

/// The anchor together with the transforms of its zone.
#[derive(Debug)]
pub struct ResolvedAnchor {
    pub anchor: AnchorPoint,
    pub projector: Projector,
}

/// Pick the planar system for `(lat, lon)` and locate the anchor in it.
pub fn resolve_anchor(lat: f64, lon: f64) -> Result<ResolvedAnchor> {
    let zone = UtmZone::for_location(lat, lon)?;
    let projector = Projector::for_zone(zone)?;
    let planar = projector.to_planar(lon, lat)?;
    tracing::debug!(%zone, easting = planar.x, northing = planar.y, "Resolved anchor ({lat}, {lon})");

    Ok(ResolvedAnchor {
        anchor: AnchorPoint {
            lat,
            lon,
            easting: planar.x,
            northing: planar.y,
            zone,
        },
        projector,
    })
}
