// Provider payload to result mapping
// Author: kelexine (https://github.com/kelexine)

use super::models::{AnalysisResult, ModerationResult, NO_DESCRIPTION};
use crate::error::VisionError;
use crate::vision::models::{AnalyzeResponse, OcrResponse};

/// Reduce an analyze payload to an `AnalysisResult`.
///
/// List order is kept exactly as the provider returned it.
pub fn map_analysis(response: AnalyzeResponse) -> AnalysisResult {
    let description = response
        .description
        .and_then(|d| d.captions.into_iter().next())
        .map(|caption| caption.text)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    AnalysisResult::new(
        description,
        response.tags.into_iter().map(|t| t.name).collect(),
        response.objects.into_iter().map(|o| o.name).collect(),
        response.categories.into_iter().map(|c| c.name).collect(),
    )
}

/// Rebuild plain text from the region -> line -> word hierarchy.
///
/// Words join with a space, lines with a newline, in provider order.
pub fn extract_text(response: &OcrResponse) -> String {
    let lines: Vec<String> = response
        .regions
        .iter()
        .flat_map(|region| region.lines.iter())
        .map(|line| {
            line.words
                .iter()
                .map(|word| word.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    lines.join("\n").trim().to_string()
}

/// Copy the provider's adult-content block verbatim.
pub fn map_moderation(response: AnalyzeResponse) -> Result<ModerationResult, VisionError> {
    let adult = response.adult.ok_or_else(|| {
        VisionError::UnexpectedPayload("adult block missing from analyze response".to_string())
    })?;

    Ok(ModerationResult {
        contains_adult_content: adult.is_adult_content,
        contains_racy_content: adult.is_racy_content,
        adult_score: adult.adult_score,
        racy_score: adult.racy_score,
    })
}
