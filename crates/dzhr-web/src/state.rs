//! Application state.

use std::sync::Arc;

use dzhr_core::analysis::StyleAnalyzer;
use dzhr_core::extract::StyleExtractor;
use dzhr_core::generate::{DesignOrchestrator, GenerationOptions};
use dzhr_core::llm::TextGenerator;
use dzhr_core::store::{DesignSystemStore, PromptHistoryStore};
use dzhr_figma::FigmaService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: DesignOrchestrator,
    pub analyzer: StyleAnalyzer,
    pub design_systems: Arc<dyn DesignSystemStore>,
    pub prompts: Arc<dyn PromptHistoryStore>,
    pub figma: Arc<FigmaService>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        extractor: Arc<dyn StyleExtractor>,
        design_systems: Arc<dyn DesignSystemStore>,
        prompts: Arc<dyn PromptHistoryStore>,
        figma: Arc<FigmaService>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            orchestrator: DesignOrchestrator::new(generator.clone(), options),
            analyzer: StyleAnalyzer::new(extractor, generator),
            design_systems,
            prompts,
            figma,
        }
    }
}
