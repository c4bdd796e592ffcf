// Vision provider models and types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Visual features the provider can compute in an analyze call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisualFeature {
    Categories,
    Description,
    Objects,
    Tags,
    Adult,
}

impl VisualFeature {
    /// Name used in the `visualFeatures` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualFeature::Categories => "Categories",
            VisualFeature::Description => "Description",
            VisualFeature::Objects => "Objects",
            VisualFeature::Tags => "Tags",
            VisualFeature::Adult => "Adult",
        }
    }
}

/// A fixed, ordered set of visual features for one provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSet(&'static [VisualFeature]);

impl FeatureSet {
    /// Features needed to build an `AnalysisResult`
    pub const ANALYZE: FeatureSet = FeatureSet(&[
        VisualFeature::Categories,
        VisualFeature::Description,
        VisualFeature::Objects,
        VisualFeature::Tags,
    ]);

    /// Features needed to build a `ModerationResult`
    pub const MODERATE: FeatureSet = FeatureSet(&[VisualFeature::Adult]);

    pub fn contains(&self, feature: VisualFeature) -> bool {
        self.0.contains(&feature)
    }

    /// Comma-separated form for the `visualFeatures` query parameter
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(VisualFeature::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

// ============================================================================
// ANALYZE PAYLOAD
// ============================================================================

/// Response of `POST /vision/{version}/analyze`.
///
/// Only the features that were requested are present; everything else is
/// absent from the JSON and defaults to empty here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ImageDescription>,

    #[serde(default)]
    pub objects: Vec<DetectedObject>,

    #[serde(default)]
    pub tags: Vec<ImageTag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult: Option<AdultInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageDescription {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub captions: Vec<Caption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caption {
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageTag {
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedObject {
    /// Display name of the object ("object" on the wire)
    #[serde(rename = "object")]
    pub name: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectangle: Option<Rectangle>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Adult-content classification block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdultInfo {
    pub is_adult_content: bool,
    pub is_racy_content: bool,
    #[serde(default)]
    pub is_gory_content: bool,
    pub adult_score: f64,
    pub racy_score: f64,
    #[serde(default)]
    pub gore_score: f64,
}

// ============================================================================
// OCR PAYLOAD
// ============================================================================

/// Response of `POST /vision/{version}/ocr`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(default)]
    pub regions: Vec<OcrRegion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrRegion {
    #[serde(default)]
    pub bounding_box: String,
    #[serde(default)]
    pub lines: Vec<OcrLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrLine {
    #[serde(default)]
    pub bounding_box: String,
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrWord {
    #[serde(default)]
    pub bounding_box: String,
    pub text: String,
}

/// Error envelope returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorResponse {
    pub error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
}

// ============================================================================
// IMAGE FORMATS
// ============================================================================

/// Image formats accepted by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    /// Detect format from the magic bytes at the start of the image
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\xFF\xD8\xFF") {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if data.starts_with(b"BM") {
            Some(ImageFormat::Bmp)
        } else {
            None
        }
    }
}

/// Bytes needed to recognize every supported format
pub const SNIFF_LEN: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_set_query_value() {
        assert_eq!(FeatureSet::ANALYZE.to_query_value(), "Categories,Description,Objects,Tags");
        assert_eq!(FeatureSet::MODERATE.to_query_value(), "Adult");
    }

    #[test]
    fn test_analyze_set_excludes_adult() {
        assert!(!FeatureSet::ANALYZE.contains(VisualFeature::Adult));
        assert!(FeatureSet::MODERATE.contains(VisualFeature::Adult));
    }

    #[test]
    fn test_sniff_formats() {
        assert_eq!(ImageFormat::sniff(b"\xFF\xD8\xFF\xE0\x00\x10JFIF"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::sniff(b"\x89PNG\r\n\x1a\n\x00\x00"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::sniff(b"GIF89a\x01\x00"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"BM\x36\x00\x00\x00"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::sniff(b"RIFF\x00\x00\x00\x00WEBP"), None);
        assert_eq!(ImageFormat::sniff(b""), None);
    }

    #[test]
    fn test_object_name_from_wire_field() {
        let json = r#"{
            "object": "dog",
            "confidence": 0.9,
            "rectangle": {"x": 1, "y": 2, "w": 3, "h": 4}
        }"#;
        let object: DetectedObject = serde_json::from_str(json).unwrap();
        assert_eq!(object.name, "dog");
    }

    #[test]
    fn test_analyze_response_missing_features_default_empty() {
        let response: AnalyzeResponse = serde_json::from_str(r#"{"requestId": "abc"}"#).unwrap();
        assert!(response.tags.is_empty());
        assert!(response.description.is_none());
        assert!(response.adult.is_none());
    }
}
