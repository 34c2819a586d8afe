use std::{marker::PhantomData, path::PathBuf};

use geo::{Area, BoundingRect};
use geo_types::{Coord, LineString, Polygon, Rect};
use image::GrayImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{FenceError, Result};

/// One conversion job: an image plus where and how large to place its shapes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ImageSource {
    /// Path of the raster image to convert
    pub file: PathBuf,
    /// Human-readable description, used as the prefix of every fence name
    pub desc: String,
    /// Planar units (meters) per image pixel
    pub scale: f64,
    /// Anchor latitude in WGS84 degrees
    pub lat: f64,
    /// Anchor longitude in WGS84 degrees
    pub lon: f64,
}

impl ImageSource {
    pub fn new(file: impl Into<PathBuf>, desc: impl Into<String>, scale: f64, lat: f64, lon: f64) -> Self {
        Self {
            file: file.into(),
            desc: desc.into(),
            scale,
            lat,
            lon,
        }
    }

    /// Reject scale factors that would collapse or mirror the shapes.
    pub fn checked_scale(&self) -> Result<f64> {
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(self.scale)
        } else {
            Err(FenceError::InvalidScale(self.scale))
        }
    }
}

/// Foreground/background raster whose row index grows with planar Y.
///
/// Raster images store row 0 at the top; the mask stores it at the bottom,
/// so contour coordinates can be scaled straight into easting/northing.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    pub const FOREGROUND: u8 = 255;
    pub const BACKGROUND: u8 = 0;

    /// Wrap a raster that is already ordered bottom-up.
    ///
    /// Any non-zero pixel counts as foreground.
    pub fn from_flipped(mut image: GrayImage) -> Self {
        for pixel in image.pixels_mut() {
            pixel.0[0] = if pixel.0[0] > 0 { Self::FOREGROUND } else { Self::BACKGROUND };
        }
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y).0[0] == Self::FOREGROUND
    }

    /// True when no pixel is foreground.
    pub fn is_empty(&self) -> bool {
        self.image.pixels().all(|p| p.0[0] == Self::BACKGROUND)
    }
}

/// Closed boundary of one traced region, in mask pixel coordinates.
///
/// The last point connects back to the first and is never repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContour {
    pub points: Vec<[i32; 2]>,
    /// Whether this boundary encloses a background hole inside a region
    pub is_hole: bool,
}

impl RawContour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Inclusive `(min, max)` corners of the contour.
    pub fn bounding_box(&self) -> Option<([i32; 2], [i32; 2])> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(min, max), &[x, y]| {
            ([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)])
        }))
    }
}

/// Marker for the coordinate system a [`Shape`] lives in.
pub trait CoordinateSpace: std::fmt::Debug + Clone + Copy + PartialEq + Default + Send + Sync + 'static {}

/// Mask pixels, Y growing upward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pixel;

/// Easting/northing in meters within the anchor's UTM zone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Planar;

/// WGS84 degrees, `x` = longitude and `y` = latitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geographic;

impl CoordinateSpace for Pixel {}

impl CoordinateSpace for Planar {}

impl CoordinateSpace for Geographic {}

/// A single-ring polygon tagged with the coordinate system of its vertices.
///
/// Each pipeline stage consumes one space and produces the next, so a
/// pixel polygon can never be handed to the reprojection by mistake.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape<S: CoordinateSpace> {
    polygon: Polygon<f64>,
    _space: PhantomData<S>,
}

impl<S: CoordinateSpace> Shape<S> {
    pub(crate) fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self {
            polygon,
            _space: PhantomData,
        }
    }

    /// Build a shape from distinct ring vertices; the ring is closed internally.
    pub fn from_vertices(vertices: Vec<Coord<f64>>) -> Self {
        Self::from_polygon(Polygon::new(LineString::new(vertices), vec![]))
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Ring vertices in order, without the repeated closing point.
    pub fn vertices(&self) -> &[Coord<f64>] {
        let coords = &self.polygon.exterior().0;
        match (coords.first(), coords.last()) {
            (Some(first), Some(last)) if coords.len() > 1 && first == last => &coords[..coords.len() - 1],
            _ => coords,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        self.polygon.bounding_rect()
    }

    /// Fewer than three vertices, or no enclosed area.
    pub fn is_degenerate(&self) -> bool {
        self.vertex_count() < 3 || self.area() == 0.0
    }
}

impl Shape<Pixel> {
    /// Build the closed pixel ring of a traced contour.
    pub fn from_contour(contour: &RawContour) -> Self {
        let coords = contour
            .points
            .iter()
            .map(|&[x, y]| Coord {
                x: f64::from(x),
                y: f64::from(y),
            })
            .collect();
        Self::from_vertices(coords)
    }
}
