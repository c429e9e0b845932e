use std::env;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use sori_core::Clock;
use sori_core::model::{AnalysisResult, FormantAnalysis, Scores, ToneAnalysis};

use crate::error::ScoringError;

/// Voice used for synthesized reference audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Female,
    Male,
    Female2,
}

/// Speaking rate for synthesized reference audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Clone, Debug)]
pub struct ScoringConfig {
    base_url: String,
}

impl ScoringConfig {
    /// Build a config against an explicit endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidBaseUrl` if the URL does not parse.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ScoringError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Url::parse(&base_url).map_err(|_| ScoringError::InvalidBaseUrl)?;
        Ok(Self { base_url })
    }

    /// Read the backend endpoint from `SORI_API_URL`, falling back to the
    /// local development server.
    #[must_use]
    pub fn from_env() -> Self {
        env::var("SORI_API_URL")
            .ok()
            .and_then(|value| Self::new(value).ok())
            .unwrap_or_else(|| Self {
                base_url: "http://localhost:8000".to_owned(),
            })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// HTTP client for the remote speech-analysis and TTS backend.
///
/// Requests are one-shot: no automatic retry, and stale responses for
/// superseded requests are not suppressed.
#[derive(Clone)]
pub struct ScoringClient {
    client: Client,
    config: ScoringConfig,
    clock: Clock,
}

impl ScoringClient {
    #[must_use]
    pub fn new(config: ScoringConfig, clock: Clock) -> Self {
        Self {
            client: Client::new(),
            config,
            clock,
        }
    }

    #[must_use]
    pub fn from_env(clock: Clock) -> Self {
        Self::new(ScoringConfig::from_env(), clock)
    }

    /// Submit a recording for scoring against its reference text.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError` on transport failures, non-success HTTP
    /// status, or a backend-reported analysis failure.
    pub async fn analyze(
        &self,
        recording_id: &str,
        reference_text: &str,
    ) -> Result<AnalysisResult, ScoringError> {
        let url = format!("{}/api/analyze", self.config.base_url());
        let response = self
            .client
            .post(url)
            .json(&AnalyzeRequest {
                recording_id,
                reference_text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScoringError::HttpStatus(response.status()));
        }

        let body: AnalyzeResponse = response.json().await?;
        analysis_from_response(body, recording_id, self.clock.now())
    }

    /// Re-fetch a previously computed result by id.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError` on transport failures or non-success status.
    pub async fn fetch_result(&self, result_id: &str) -> Result<AnalysisResult, ScoringError> {
        let url = format!("{}/api/results/{result_id}", self.config.base_url());
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScoringError::HttpStatus(response.status()));
        }

        let body: ResultResponse = response.json().await?;
        Ok(body.into_analysis(self.clock.now()))
    }

    /// Synthesize reference audio for `text`; returns raw audio bytes in a
    /// backend-chosen container.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError` on transport failures or non-success status.
    pub async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        speed: Speed,
    ) -> Result<Vec<u8>, ScoringError> {
        let url = format!("{}/api/tts", self.config.base_url());
        let response = self
            .client
            .post(url)
            .json(&TtsRequest { text, voice, speed })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScoringError::HttpStatus(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Liveness probe against the backend; status only.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url());
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Convert a raw analyze response into the domain result.
fn analysis_from_response(
    body: AnalyzeResponse,
    recording_id: &str,
    created_at: DateTime<Utc>,
) -> Result<AnalysisResult, ScoringError> {
    if !body.success {
        let message = body.error.unwrap_or_else(|| "분석에 실패했습니다.".to_owned());
        if message.contains("No speech recognized") {
            return Err(ScoringError::NoSpeechDetected);
        }
        return Err(ScoringError::Backend(message));
    }

    let id = body.result_id.ok_or(ScoringError::MissingField("result_id"))?;
    let scores = body.scores.ok_or(ScoringError::MissingField("scores"))?;

    Ok(AnalysisResult {
        id,
        recording_id: recording_id.to_owned(),
        created_at,
        scores,
        feedback: body.feedback.unwrap_or_default(),
        formant: body.formant,
        tone: body.tone,
    })
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    recording_id: &'a str,
    reference_text: &'a str,
}

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    voice: Voice,
    speed: Speed,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    success: bool,
    result_id: Option<String>,
    scores: Option<Scores>,
    feedback: Option<String>,
    error: Option<String>,
    #[serde(default)]
    formant: Option<FormantAnalysis>,
    #[serde(default)]
    tone: Option<ToneAnalysis>,
}

#[derive(Debug, Deserialize)]
struct ResultResponse {
    id: String,
    recording_id: String,
    created_at: String,
    scores: Scores,
    feedback: String,
    #[serde(default)]
    formant: Option<FormantAnalysis>,
    #[serde(default)]
    tone: Option<ToneAnalysis>,
}

impl ResultResponse {
    /// Backend timestamps are passed through as strings; fall back to the
    /// local clock when one does not parse.
    fn into_analysis(self, fallback_created_at: DateTime<Utc>) -> AnalysisResult {
        let created_at = self
            .created_at
            .parse::<DateTime<Utc>>()
            .unwrap_or(fallback_created_at);
        AnalysisResult {
            id: self.id,
            recording_id: self.recording_id,
            created_at,
            scores: self.scores,
            feedback: self.feedback,
            formant: self.formant,
            tone: self.tone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sori_core::time::fixed_now;

    fn success_body() -> AnalyzeResponse {
        serde_json::from_str(
            r#"{
                "success": true,
                "result_id": "result-7",
                "scores": {
                    "accuracy": 92.0,
                    "fluency": 88.5,
                    "completeness": 100.0,
                    "pronunciation": 90.2
                },
                "feedback": "훌륭한 발음입니다!",
                "formant": {
                    "resonance_score": 81.0,
                    "stability_score": 77.0,
                    "feedback": "공명이 안정적입니다"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn maps_a_successful_response() {
        let result = analysis_from_response(success_body(), "rec-1", fixed_now()).unwrap();
        assert_eq!(result.id, "result-7");
        assert_eq!(result.recording_id, "rec-1");
        assert_eq!(result.created_at, fixed_now());
        assert!((result.scores.pronunciation - 90.2).abs() < f64::EPSILON);
        assert!(result.formant.is_some());
        assert!(result.tone.is_none());
    }

    #[test]
    fn backend_failure_surfaces_its_message() {
        let body: AnalyzeResponse =
            serde_json::from_str(r#"{"success": false, "error": "model overloaded"}"#).unwrap();
        let err = analysis_from_response(body, "rec-1", fixed_now()).unwrap_err();
        assert!(matches!(err, ScoringError::Backend(msg) if msg == "model overloaded"));
    }

    #[test]
    fn silence_is_rewritten_to_a_friendly_message() {
        let body: AnalyzeResponse = serde_json::from_str(
            r#"{"success": false, "error": "Error: No speech recognized in audio"}"#,
        )
        .unwrap();
        let err = analysis_from_response(body, "rec-1", fixed_now()).unwrap_err();
        assert!(matches!(err, ScoringError::NoSpeechDetected));
        assert!(err.to_string().contains("음성이 감지되지"));
    }

    #[test]
    fn success_without_scores_is_an_error() {
        let body: AnalyzeResponse =
            serde_json::from_str(r#"{"success": true, "result_id": "x"}"#).unwrap();
        let err = analysis_from_response(body, "rec-1", fixed_now()).unwrap_err();
        assert!(matches!(err, ScoringError::MissingField("scores")));
    }

    #[test]
    fn tts_options_serialize_as_wire_strings() {
        assert_eq!(serde_json::to_string(&Voice::Female2).unwrap(), "\"female2\"");
        assert_eq!(serde_json::to_string(&Speed::Normal).unwrap(), "\"normal\"");
        let request = TtsRequest {
            text: "안녕하세요",
            voice: Voice::Male,
            speed: Speed::Slow,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["voice"], "male");
        assert_eq!(json["speed"], "slow");
    }

    #[test]
    fn config_rejects_garbage_and_trims_trailing_slash() {
        assert!(ScoringConfig::new("not a url").is_err());
        let config = ScoringConfig::new("https://api.example.com/").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn result_response_falls_back_on_unparseable_timestamps() {
        let body: ResultResponse = serde_json::from_str(
            r#"{
                "id": "r1",
                "recording_id": "rec-1",
                "created_at": "yesterday-ish",
                "scores": {"accuracy": 1.0, "fluency": 2.0, "completeness": 3.0, "pronunciation": 4.0},
                "feedback": ""
            }"#,
        )
        .unwrap();
        let result = body.into_analysis(fixed_now());
        assert_eq!(result.created_at, fixed_now());
    }
}
