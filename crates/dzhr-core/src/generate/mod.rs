//! Generation and refinement orchestration.
//!
//! Fans out one text-generation call per device, joins them fail-fast,
//! scores each answer and guarantees non-empty markup in every artifact.

pub mod fallback;
pub mod parse;

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::design::{ConstraintBundle, DeviceProfile, GeneratedArtifact};
use crate::error::{DzhrError, DzhrResult};
use crate::llm::{CompletionRequest, TextGenerator};
use crate::prompt::{self, PromptPair};
use crate::validate::{QualityReport, ResponseValidator};

pub use fallback::fallback_artifact;
pub use parse::{ArtifactPayload, parse_artifact};

/// Output cap requested from the generation service.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

/// Tunables of a generation or refinement call.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub max_output_tokens: u32,
    /// Extra attempts after an answer that is not valid JSON.
    pub malformed_retries: u32,
    /// Per-device bound on a single service call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub validator: ResponseValidator,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            malformed_retries: 1,
            timeout: None,
            validator: ResponseValidator::default(),
        }
    }
}

/// Coordinates prompt composition, the generation service and scoring.
#[derive(Clone)]
pub struct DesignOrchestrator {
    generator: Arc<dyn TextGenerator>,
    options: GenerationOptions,
}

impl DesignOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, options: GenerationOptions) -> Self {
        Self { generator, options }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Generate one artifact per device, in the order the devices were given.
    ///
    /// Every device id is resolved before any call is issued. One failing
    /// device fails the whole batch and drops the calls still in flight.
    pub async fn generate<S: AsRef<str>>(
        &self,
        brief: &str,
        device_ids: &[S],
        constraints: &ConstraintBundle,
    ) -> DzhrResult<Vec<GeneratedArtifact>> {
        if brief.trim().is_empty() {
            return Err(DzhrError::validation("prompt must not be empty"));
        }
        let devices = DeviceProfile::resolve_all(device_ids)?;
        info!(devices = devices.len(), "Generating designs");

        try_join_all(
            devices
                .into_iter()
                .map(|device| self.generate_one(brief, device, constraints)),
        )
        .await
    }

    /// Refine existing artifacts with a delta instruction.
    ///
    /// When `device_ids` is non-empty only artifacts for those devices are
    /// sent for refinement; the others are returned as they are.
    pub async fn refine<S: AsRef<str>>(
        &self,
        current: &[GeneratedArtifact],
        instruction: &str,
        device_ids: &[S],
        constraints: &ConstraintBundle,
    ) -> DzhrResult<Vec<GeneratedArtifact>> {
        if instruction.trim().is_empty() {
            return Err(DzhrError::validation("refinement prompt must not be empty"));
        }
        let selected = DeviceProfile::resolve_all(device_ids)?;
        let targets = current
            .iter()
            .map(|artifact| DeviceProfile::resolve(&artifact.device).map(|d| (artifact, d)))
            .collect::<DzhrResult<Vec<_>>>()?;
        info!(artifacts = targets.len(), "Refining designs");

        let selected = &selected;
        try_join_all(targets.into_iter().map(|(artifact, device)| async move {
            let wanted = selected.is_empty() || selected.iter().any(|d| d.id == device.id);
            if !wanted {
                debug!(device = device.id, "Device not selected, keeping design");
                return Ok(artifact.clone());
            }
            self.refine_one(artifact, instruction, device, constraints).await
        }))
        .await
    }

    async fn generate_one(
        &self,
        brief: &str,
        device: &'static DeviceProfile,
        constraints: &ConstraintBundle,
    ) -> DzhrResult<GeneratedArtifact> {
        debug!(device = device.id, "Generating design");
        let prompt = prompt::compose_generation_prompt(brief, device, constraints);
        let payload = self.request_artifact(prompt, device).await?;
        self.report_quality(device, &payload);

        if payload.html.trim().is_empty() {
            warn!(device = device.id, "Generator returned no markup, substituting fallback");
            return Ok(fallback_artifact(brief, device));
        }

        Ok(GeneratedArtifact {
            device: device.id.to_string(),
            html: payload.html,
            css: payload.css,
        })
    }

    async fn refine_one(
        &self,
        artifact: &GeneratedArtifact,
        instruction: &str,
        device: &'static DeviceProfile,
        constraints: &ConstraintBundle,
    ) -> DzhrResult<GeneratedArtifact> {
        debug!(device = device.id, "Refining design");
        let prompt = prompt::compose_refinement_prompt(artifact, instruction, device, constraints);
        let payload = self.request_artifact(prompt, device).await?;
        self.report_quality(device, &payload);

        if payload.html.trim().is_empty() {
            warn!(device = device.id, "Refinement returned no markup, keeping original design");
            return Ok(artifact.clone());
        }

        Ok(GeneratedArtifact {
            device: device.id.to_string(),
            html: payload.html,
            css: payload.css,
        })
    }

    /// Call the service and parse its answer, retrying malformed JSON.
    async fn request_artifact(
        &self,
        prompt: PromptPair,
        device: &DeviceProfile,
    ) -> DzhrResult<ArtifactPayload> {
        let request = CompletionRequest::from_prompt(prompt, self.options.max_output_tokens);
        let mut attempt = 0;
        loop {
            let raw = self.call(request.clone()).await?;
            match parse_artifact(&raw) {
                Ok(payload) => return Ok(payload),
                Err(e) if attempt < self.options.malformed_retries => {
                    attempt += 1;
                    warn!(device = device.id, attempt, error = %e, "Malformed generation response, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn call(&self, request: CompletionRequest) -> DzhrResult<String> {
        match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.generator.complete_json(request))
                .await
                .map_err(|_| DzhrError::Timeout(limit))?,
            None => self.generator.complete_json(request).await,
        }
    }

    fn report_quality(&self, device: &DeviceProfile, payload: &ArtifactPayload) -> QualityReport {
        let report = self.options.validator.score(&payload.html, &payload.css);
        if report.is_valid {
            info!(device = device.id, score = report.score, "Design scored");
        } else {
            warn!(
                device = device.id,
                score = report.score,
                issues = ?report.issues,
                "Design scored below quality threshold"
            );
        }
        report
    }
}
