use geofence::{ConversionSettings, ImageSource};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_OUTPUT: &str = "geo-area.json";

#[derive(Error, Debug)]
pub enum JobConfigError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Job lists no images")]
    NoImages,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// A batch of images converted into one fence document
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConversionJob {
    /// Output JSON path, relative to the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Optional GeoJSON preview path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geojson: Option<PathBuf>,
    #[serde(default)]
    pub settings: ConversionSettings,
    /// Images in conversion order; relative paths resolve against the job file
    pub images: Vec<ImageSource>,
}

impl ConversionJob {
    /// Starter job for `geofence init`
    pub fn example() -> Self {
        Self {
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
            geojson: None,
            settings: ConversionSettings::default(),
            images: vec![ImageSource::new(
                "images/flirt_front.png",
                "FLIRT",
                40.0,
                51.5053512759227,
                -0.2102589290821343,
            )],
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// JSON schema of the job file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ConversionJob)
    }

    /// Load job configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, JobConfigError> {
        let content = fs::read_to_string(&path)?;
        Ok(Self::from_toml(&content)?.resolved_against(path.as_ref()))
    }

    /// Load job configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, JobConfigError> {
        let job: ConversionJob = toml::from_str(content)?;
        job.validated()
    }

    /// Load job configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, JobConfigError> {
        let content = fs::read_to_string(&path)?;
        Ok(Self::from_json(&content)?.resolved_against(path.as_ref()))
    }

    /// Load job configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, JobConfigError> {
        let job: ConversionJob = serde_json::from_str(content)?;
        job.validated()
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, JobConfigError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(JobConfigError::UnsupportedFileFormat),
        }
    }

    /// Save job configuration, format chosen by extension
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), JobConfigError> {
        let content = match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml()?,
            Some("json") => self.to_json()?,
            _ => return Err(JobConfigError::UnsupportedFileFormat),
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert job to TOML string
    pub fn to_toml(&self) -> Result<String, JobConfigError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Convert job to JSON string
    pub fn to_json(&self) -> Result<String, JobConfigError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    fn validated(self) -> Result<Self, JobConfigError> {
        if self.images.is_empty() {
            return Err(JobConfigError::NoImages);
        }
        Ok(self)
    }

    fn resolved_against(mut self, job_file: &Path) -> Self {
        if let Some(base) = job_file.parent() {
            for image in &mut self.images {
                if image.file.is_relative() {
                    image.file = base.join(&image.file);
                }
            }
        }
        self
    }
}
