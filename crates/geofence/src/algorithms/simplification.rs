use geo_types::{LineString, Polygon};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use crate::{
    traits::ShapeSimplifier,
    types::{Pixel, Shape},
};

/// Vertex tolerance in pixels applied to every traced shape.
pub const DEFAULT_TOLERANCE: f64 = 2.0;

/// Simplify the closed exterior as a plain line string.
///
/// geo keeps at least four coordinates when simplifying polygon rings, so a
/// speck smaller than the tolerance would survive. As a line string the ring
/// may shrink to its repeated start point and is then degenerate.
fn simplify_ring(shape: &Shape<Pixel>, simplify: impl Fn(&LineString<f64>) -> LineString<f64>) -> Shape<Pixel> {
    if shape.vertex_count() < 3 {
        return shape.clone();
    }
    Shape::from_polygon(Polygon::new(simplify(shape.polygon().exterior()), vec![]))
}

/// Douglas-Peucker simplifier using geo crate's implementation.
///
/// Topology is not preserved: the ring may self-intersect or collapse.
#[derive(Debug, Clone, Default)]
pub struct DouglasPeuckerSimplifier;

impl ShapeSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, shape: &Shape<Pixel>, tolerance: f64) -> Shape<Pixel> {
        use geo::Simplify;

        simplify_ring(shape, |ring| ring.simplify(&tolerance))
    }
}

/// Visvalingam-Whyatt simplifier using geo crate's implementation
///
/// `tolerance` is an area threshold in square pixels.
#[derive(Debug, Clone, Default)]
pub struct VisvalingamWhyattSimplifier;

impl ShapeSimplifier for VisvalingamWhyattSimplifier {
    fn simplify(&self, shape: &Shape<Pixel>, tolerance: f64) -> Shape<Pixel> {
        use geo::SimplifyVw;

        simplify_ring(shape, |ring| ring.simplify_vw(&tolerance))
    }
}

#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SimplificationMethod {
    #[default]
    DouglasPeucker,
    VisvalingamWhyatt,
}

impl SimplificationMethod {
    pub fn simplifier(self) -> Box<dyn ShapeSimplifier> {
        match self {
            Self::DouglasPeucker => Box::new(DouglasPeuckerSimplifier),
            Self::VisvalingamWhyatt => Box::new(VisvalingamWhyattSimplifier),
        }
    }
}
