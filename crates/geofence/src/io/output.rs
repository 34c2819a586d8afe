use std::path::Path;

use serde::Serialize;
use crate::{
    error::Result,
    fence::FenceRecord,
    io::write_atomically,
    pipeline::FenceBatch,
};

/// Pretty JSON array with 4-space indentation; `°` is written verbatim.
pub fn fences_to_json(records: &[FenceRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    let json = String::from_utf8(buffer).map_err(<serde_json::Error as serde::ser::Error>::custom)?;
    Ok(json)
}

impl FenceBatch {
    /// Serialize the whole batch as the output JSON document
    pub fn to_json_string(&self) -> Result<String> {
        fences_to_json(self.records())
    }

    /// Save the batch, replacing `path` only once serialization succeeded
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = fences_to_json(self.records())?;
        write_atomically(path, json.as_bytes())?;
        tracing::info!("Wrote {} fences to {}", self.len(), path.display());
        Ok(())
    }

    /// Load a previously written output document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<FenceRecord> = serde_json::from_str(json)?;
        let mut batch = Self::new();
        batch.extend(records);
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fence::{assemble, HemisphereLabeling};
    use crate::types::{Geographic, Shape};
    use geo_types::Coord;

    fn batch() -> FenceBatch {
        let shape = Shape::<Geographic>::from_vertices(vec![
            Coord { x: -0.21, y: 51.50 },
            Coord { x: -0.20, y: 51.50 },
            Coord { x: -0.20, y: 51.51 },
        ]);
        let mut batch = FenceBatch::new();
        batch.extend([assemble(&shape, "FLIRT", 0, HemisphereLabeling::default())]);
        batch
    }

    #[test]
    fn test_empty_batch_is_empty_array() {
        assert_eq!(FenceBatch::new().to_json_string().unwrap(), "[]");
    }

    #[test]
    fn test_four_space_indent_and_raw_degree_sign() {
        let json = batch().to_json_string().unwrap();
        assert!(json.starts_with("[\n    {\n        \"name\""));
        assert!(json.contains("\"NormUnit\": \"°\""));
        assert!(!json.contains("\\u00b0"));
    }

    #[test]
    fn test_saved_bytes_match_string_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geo-area.json");
        let batch = batch();
        batch.save_json(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), batch.to_json_string().unwrap());
    }

    #[test]
    fn test_saved_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geo-area.json");
        let original = batch();
        original.save_json(&path).unwrap();

        let restored = FenceBatch::from_json_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.records(), original.records());
    }
}
