//! Parsing `generateContent` replies.

use super::Part;
use crate::core::errors::EditorError;
use crate::file::ImageResource;
use serde::{Deserialize, Serialize};

const NO_ANALYSIS: &str = "No analysis available.";
const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl GenerateContentResponse {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parts of the first candidate
    pub fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First inline image as a data URL
    pub fn image_data_url(&self) -> Result<String, EditorError> {
        if self.parts().is_empty() {
            return Err(EditorError::AiResponse(
                "no content returned or invalid response structure".to_string(),
            ));
        }
        if let Some(url) = self.parts().iter().find_map(Part::image_data_url) {
            return Ok(url);
        }
        let text = self.text();
        tracing::warn!("AI response carried no image part");
        Err(EditorError::AiResponse(format!(
            "no image returned; it might have responded with text: {}",
            text.as_deref().unwrap_or("No text found.")
        )))
    }

    /// First inline image, decoded
    pub fn image(&self) -> Result<ImageResource, EditorError> {
        ImageResource::from_data_url(&self.image_data_url()?)
    }

    /// Text reply of an analysis request, with the fallback wording
    pub fn analysis(&self, fast: bool) -> String {
        let fallback = if fast { NO_DESCRIPTION } else { NO_ANALYSIS };
        self.text().unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::adapters::encode_png_data_url;
    use crate::file::resource::tests::png_bytes;

    #[test]
    fn picks_first_image_part() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [
                    { "text": "here you go" },
                    { "inlineData": { "mimeType": "text/plain", "data": "eA==" } },
                    { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "BBBB" } }
                ] }
            }]
        }"#;
        let response = GenerateContentResponse::from_json(json).unwrap();
        assert_eq!(response.image_data_url().unwrap(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn text_only_reply_is_an_error_carrying_the_text() {
        let json = r#"{ "candidates": [{ "content": { "parts": [ { "text": "I can't do that" } ] } }] }"#;
        let response = GenerateContentResponse::from_json(json).unwrap();
        let err = response.image_data_url().unwrap_err().to_string();
        assert!(err.contains("I can't do that"), "{}", err);
    }

    #[test]
    fn empty_reply_is_an_error() {
        let response = GenerateContentResponse::from_json("{}").unwrap();
        assert!(matches!(response.image_data_url(), Err(EditorError::AiResponse(_))));
        assert_eq!(response.analysis(false), "No analysis available.");
        assert_eq!(response.analysis(true), "No description available.");
    }

    #[test]
    fn decodes_returned_image() {
        let url = encode_png_data_url(&png_bytes(3, 2, [0, 255, 0, 255]));
        let payload = url.trim_start_matches("data:image/png;base64,");
        let json = format!(
            r#"{{ "candidates": [{{ "content": {{ "parts": [ {{ "inlineData": {{ "mimeType": "image/png", "data": "{}" }} }} ] }} }}] }}"#,
            payload
        );
        let image = GenerateContentResponse::from_json(&json).unwrap().image().unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
    }

    #[test]
    fn analysis_joins_text_parts() {
        let json = r#"{ "candidates": [{ "content": { "parts": [ { "text": "A cat " }, { "text": "on a mat." } ] } }] }"#;
        let response = GenerateContentResponse::from_json(json).unwrap();
        assert_eq!(response.analysis(false), "A cat on a mat.");
    }
}
