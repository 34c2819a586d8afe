//! # Image to Geofence Conversion Library
//!
//! Turns the silhouettes in a raster image into geofence polygons placed at
//! a real-world latitude/longitude.
//!
//! ## Pipeline
//!
//! - **Binarize**: fixed luminance threshold, rows flipped so Y grows upward
//! - **Trace**: border following, straight runs compressed, image frame dropped
//! - **Simplify**: Douglas-Peucker at 2 px without topology preservation
//! - **Place**: scale about the pixel origin, then shift onto the anchor's
//!   UTM easting/northing
//! - **Reproject**: every vertex back to WGS84 degrees
//! - **Assemble**: one named fence record per shape
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geofence::{FenceBatch, FencePipeline, ImageSource};
//!
//! let pipeline = FencePipeline::builder().build();
//! let sources = vec![ImageSource::new("images/rocket.png", "Rocket", 1.0, 47.5547, 9.0861)];
//!
//! let batch: FenceBatch = pipeline.convert_all(&sources)?;
//! batch.save_json("geo-area.json".as_ref())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use geofence::{FencePipeline, HemisphereLabeling, SimplificationMethod};
//!
//! let pipeline = FencePipeline::builder()
//!     .with_threshold(150)
//!     .with_blur(1.0)
//!     .with_simplifier(SimplificationMethod::VisvalingamWhyatt)
//!     .with_tolerance(4.0)
//!     .with_hemisphere_labeling(HemisphereLabeling::FromSign)
//!     .build();
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod projection;
pub mod placement;
pub mod fence;
pub mod settings;
pub mod pipeline;
pub mod io;

// Re-exports for convenience
pub use error::{FenceError, Result};
pub use types::{BinaryMask, CoordinateSpace, Geographic, ImageSource, Pixel, Planar, RawContour, Shape};
pub use traits::*;
pub use algorithms::*;
pub use projection::{resolve_anchor, AnchorPoint, Projector, ResolvedAnchor, UtmZone};
pub use placement::{place, reproject};
pub use fence::{assemble, fence_name, FencePoint, FenceRecord, HemisphereLabeling};
pub use settings::ConversionSettings;
pub use pipeline::{builder::PipelineBuilder, FenceBatch, FencePipeline, ImageRun};
pub use io::{load_grayscale, write_atomically};
