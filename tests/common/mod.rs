// Shared test fixtures
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image_analyzer::error::VisionError;
use image_analyzer::vision::models::{
    AdultInfo, AnalyzeResponse, Caption, Category, DetectedObject, ImageDescription, ImageTag,
    OcrLine, OcrRegion, OcrResponse, OcrWord,
};
use image_analyzer::vision::{FeatureSet, VisionProvider};
use std::sync::Mutex;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDRfake-png-body";

/// How the mock builds its answers
pub enum Behavior {
    /// Fixed payloads for every call
    Fixed {
        analyze: AnalyzeResponse,
        ocr: OcrResponse,
    },
    /// Echo the image bytes back as caption / OCR word / adult decision
    Echo,
    /// Fail every call with this error
    Fail(VisionError),
}

/// In-memory `VisionProvider` recording the feature sets it was asked for
pub struct MockProvider {
    behavior: Behavior,
    pub analyze_calls: Mutex<Vec<FeatureSet>>,
    pub ocr_calls: Mutex<usize>,
}

impl MockProvider {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            analyze_calls: Mutex::new(Vec::new()),
            ocr_calls: Mutex::new(0),
        }
    }

    pub fn fixed(analyze: AnalyzeResponse, ocr: OcrResponse) -> Self {
        Self::new(Behavior::Fixed { analyze, ocr })
    }

    pub fn failing(err: VisionError) -> Self {
        Self::new(Behavior::Fail(err))
    }

    pub fn requested(&self) -> Vec<FeatureSet> {
        self.analyze_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionProvider for MockProvider {
    async fn analyze(&self, image: Bytes, features: FeatureSet) -> Result<AnalyzeResponse, VisionError> {
        self.analyze_calls.lock().unwrap().push(features);
        tokio::task::yield_now().await;

        match &self.behavior {
            Behavior::Fixed { analyze, .. } => Ok(analyze.clone()),
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Echo => {
                let text = String::from_utf8_lossy(&image).into_owned();
                let flagged = text.ends_with('!');
                let mut response = AnalyzeResponse::default();
                if features.contains(image_analyzer::vision::VisualFeature::Description) {
                    response.description = Some(ImageDescription {
                        tags: vec![],
                        captions: vec![caption(&text)],
                    });
                    response.tags = vec![tag(&text)];
                }
                if features.contains(image_analyzer::vision::VisualFeature::Adult) {
                    response.adult = Some(adult(flagged, false, 0.5, 0.5));
                }
                Ok(response)
            }
        }
    }

    async fn recognize_text(&self, image: Bytes) -> Result<OcrResponse, VisionError> {
        *self.ocr_calls.lock().unwrap() += 1;
        tokio::task::yield_now().await;

        match &self.behavior {
            Behavior::Fixed { ocr, .. } => Ok(ocr.clone()),
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Echo => {
                let text = String::from_utf8_lossy(&image).into_owned();
                Ok(ocr_payload(&[&[&[text.as_str()]]]))
            }
        }
    }

    fn endpoint(&self) -> &str {
        "http://mock.vision"
    }
}

pub fn caption(text: &str) -> Caption {
    Caption { text: text.to_string(), confidence: 0.9 }
}

pub fn tag(name: &str) -> ImageTag {
    ImageTag { name: name.to_string(), confidence: 0.9 }
}

pub fn object(name: &str) -> DetectedObject {
    DetectedObject { name: name.to_string(), confidence: 0.8, rectangle: None }
}

pub fn category(name: &str) -> Category {
    Category { name: name.to_string(), score: 0.7 }
}

pub fn adult(is_adult: bool, is_racy: bool, adult_score: f64, racy_score: f64) -> AdultInfo {
    AdultInfo {
        is_adult_content: is_adult,
        is_racy_content: is_racy,
        is_gory_content: false,
        adult_score,
        racy_score,
        gore_score: 0.0,
    }
}

/// Build an OCR payload from regions -> lines -> words
pub fn ocr_payload(regions: &[&[&[&str]]]) -> OcrResponse {
    OcrResponse {
        language: Some("en".to_string()),
        regions: regions
            .iter()
            .map(|lines| OcrRegion {
                bounding_box: "0,0,10,10".to_string(),
                lines: lines
                    .iter()
                    .map(|words| OcrLine {
                        bounding_box: "0,0,10,10".to_string(),
                        words: words
                            .iter()
                            .map(|w| OcrWord {
                                bounding_box: "0,0,10,10".to_string(),
                                text: w.to_string(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
        ..Default::default()
    }
}

pub fn sample_analysis() -> AnalyzeResponse {
    AnalyzeResponse {
        categories: vec![category("animal_dog"), category("outdoor_grass")],
        description: Some(ImageDescription {
            tags: vec!["dog".to_string()],
            captions: vec![caption("a dog running on grass"), caption("a dog")],
        }),
        objects: vec![object("dog"), object("frisbee")],
        tags: vec![tag("grass"), tag("dog"), tag("outdoor")],
        adult: Some(adult(false, false, 0.01, 0.02)),
        request_id: Some("req-1".to_string()),
    }
}
