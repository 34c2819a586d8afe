use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::{Deserialize, Serialize};
use crate::{
    error::Result,
    fence::FenceRecord,
    io::write_atomically,
    pipeline::FenceBatch,
};

/// Properties attached to each preview feature
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FencePreviewProperties {
    pub name: String,
    pub vertex_count: usize,
}

impl FenceRecord {
    /// Polygon feature for map previews; the ring is closed as GeoJSON requires.
    pub fn to_geojson_feature(&self) -> Feature {
        let mut ring: Vec<Vec<f64>> = self
            .points()
            .iter()
            .map(|point| vec![point.longitude(), point.latitude()])
            .collect();
        if let Some(first) = ring.first().cloned() {
            ring.push(first);
        }

        let properties = FencePreviewProperties {
            name: self.name().to_string(),
            vertex_count: self.points().len(),
        };

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: serde_json::to_value(properties).ok().and_then(|v| v.as_object().cloned()),
            foreign_members: None,
        }
    }
}

impl FenceBatch {
    pub fn to_geojson(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.records().iter().map(FenceRecord::to_geojson_feature).collect(),
            foreign_members: None,
        }
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson())?)
    }

    /// Save GeoJSON preview to file
    pub fn save_geojson(&self, path: &Path) -> Result<()> {
        let geojson_string = self.to_geojson_string()?;
        write_atomically(path, geojson_string.as_bytes())?;
        tracing::info!("Wrote GeoJSON preview to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fence::{assemble, HemisphereLabeling};
    use crate::types::{Geographic, Shape};
    use geo_types::Coord;

    fn record(labeling: HemisphereLabeling) -> FenceRecord {
        let shape = Shape::<Geographic>::from_vertices(vec![
            Coord { x: -70.60, y: -33.40 },
            Coord { x: -70.59, y: -33.40 },
            Coord { x: -70.59, y: -33.39 },
            Coord { x: -70.60, y: -33.39 },
        ]);
        assemble(&shape, "Santiago", 0, labeling)
    }

    #[test]
    fn test_feature_ring_is_closed_lon_lat() {
        let feature = record(HemisphereLabeling::default()).to_geojson_feature();
        let Some(Geometry { value: Value::Polygon(rings), .. }) = feature.geometry else {
            panic!("expected a polygon geometry");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0][0], vec![-70.60, -33.40]);
        assert_eq!(rings[0].first(), rings[0].last());

        let properties = feature.properties.unwrap();
        assert_eq!(properties["name"], "Santiago 00");
        assert_eq!(properties["vertex_count"], 4);
    }

    #[test]
    fn test_sign_labeling_restores_signed_coordinates() {
        let fixed = record(HemisphereLabeling::FixedNorthEast).to_geojson_feature();
        let signed = record(HemisphereLabeling::FromSign).to_geojson_feature();
        assert_eq!(fixed.geometry, signed.geometry);
    }

    #[test]
    fn test_collection_has_one_feature_per_fence() {
        let mut batch = FenceBatch::new();
        batch.extend([record(HemisphereLabeling::default()), record(HemisphereLabeling::default())]);
        assert_eq!(batch.to_geojson().features.len(), 2);

        let parsed: geojson::GeoJson = batch.to_geojson_string().unwrap().parse().unwrap();
        assert!(matches!(parsed, geojson::GeoJson::FeatureCollection(_)));
    }
}
