// Normalized analysis results
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Caption used when the provider returns no caption at all
pub const NO_DESCRIPTION: &str = "no description available";

/// Summary of an analyze call.
///
/// Built only by [`super::mapping::map_analysis`]; fields are read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    description: String,
    tags: Vec<String>,
    detected_objects: Vec<String>,
    categories: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn new(
        description: String,
        tags: Vec<String>,
        detected_objects: Vec<String>,
        categories: Vec<String>,
    ) -> Self {
        Self {
            description,
            tags,
            detected_objects,
            categories,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn detected_objects(&self) -> &[String] {
        &self.detected_objects
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Adult/racy classification as decided by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationResult {
    pub contains_adult_content: bool,
    pub contains_racy_content: bool,
    pub adult_score: f64,
    pub racy_score: f64,
}

/// Body returned by the OCR endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
}
