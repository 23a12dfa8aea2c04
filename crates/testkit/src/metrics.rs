//! Session metrics reporting for headless runs.
//!
//! A run summarizes what the interaction layer and the effects did into one
//! JSON document, so scripted sessions can be compared across changes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level metrics report for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Session identifier (script name or test name)
    pub session: String,

    /// Timestamp when metrics were collected (RFC 3339)
    pub timestamp: String,

    /// Overall run result
    pub result: RunResult,

    /// Where the scene came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneMetrics>,

    /// Hover, click and overlay counters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<InteractionMetrics>,

    /// Adaptive quality outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityMetrics>,

    /// Final particle populations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particles: Option<ParticleMetrics>,

    /// Run execution metrics
    pub execution: ExecutionMetrics,
}

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunResult {
    /// Run completed
    Pass,
    /// Run failed
    Fail,
}

/// Scene source and composition counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetrics {
    /// Scene description path, or `fallback`
    pub source: String,
    /// Nodes in the scene graph
    pub nodes: usize,
    /// Registered interactive entities
    pub entities: usize,
}

/// Interaction event counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionMetrics {
    /// Hover enter transitions
    pub hover_enters: u64,
    /// Hover exit transitions
    pub hover_exits: u64,
    /// Clicks resolved to an action
    pub actions: u64,
    /// Actions routed to the default overlay
    pub fallback_actions: u64,
    /// Overlays that finished opening
    pub overlays_opened: u64,
    /// Overlays that finished closing
    pub overlays_closed: u64,
}

/// Adaptive quality outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Profile chosen from device signals
    pub initial_profile: String,
    /// Profile at the end of the run
    pub final_profile: String,
    /// Number of downgrades
    pub sheds: u32,
    /// Average FPS of the last closed sample window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fps: Option<f32>,
}

/// Particle populations at the end of the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleMetrics {
    /// Falling particle count
    pub falling: usize,
    /// Firefly count
    pub fireflies: usize,
    /// Petal count
    pub petals: usize,
    /// Frames on which particles were stepped
    pub update_frames: u64,
}

/// Run execution metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    /// Frames simulated
    pub frames: u64,
    /// Simulated seconds
    pub simulated_seconds: f64,
    /// Wall-clock duration (seconds)
    pub duration_seconds: f64,
}

/// Builder for creating metrics reports
pub struct MetricsReportBuilder {
    report: MetricsReport,
}

impl MetricsReportBuilder {
    /// Create a new builder with session name
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            report: MetricsReport {
                session: session.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                result: RunResult::Pass,
                scene: None,
                interaction: None,
                quality: None,
                particles: None,
                execution: ExecutionMetrics {
                    frames: 0,
                    simulated_seconds: 0.0,
                    duration_seconds: 0.0,
                },
            },
        }
    }

    /// Set run result
    pub fn result(mut self, result: RunResult) -> Self {
        self.report.result = result;
        self
    }

    /// Set scene metrics
    pub fn scene(mut self, metrics: SceneMetrics) -> Self {
        self.report.scene = Some(metrics);
        self
    }

    /// Set interaction metrics
    pub fn interaction(mut self, metrics: InteractionMetrics) -> Self {
        self.report.interaction = Some(metrics);
        self
    }

    /// Set quality metrics
    pub fn quality(mut self, metrics: QualityMetrics) -> Self {
        self.report.quality = Some(metrics);
        self
    }

    /// Set particle metrics
    pub fn particles(mut self, metrics: ParticleMetrics) -> Self {
        self.report.particles = Some(metrics);
        self
    }

    /// Set execution metrics
    pub fn execution(mut self, metrics: ExecutionMetrics) -> Self {
        self.report.execution = metrics;
        self
    }

    /// Finish building
    pub fn build(self) -> MetricsReport {
        self.report
    }
}

impl MetricsReport {
    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write metrics report {}", path.display()))
    }

    /// Read a report written by [`MetricsReport::write_json`].
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read metrics report {}", path.display()))?;
        Ok(serde_json::from_str(&contents)?)
    }
}
