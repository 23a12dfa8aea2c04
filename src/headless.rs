use crate::config::SceneConfig;
use crate::scene_loader::{self, LoadedScene};
use crate::scripted_input::{ScriptedFrame, ScriptedInputPlayer};
use anyhow::{Context, Result};
use folio3d_core::FrameTick;
use folio3d_fx::{AdaptiveQuality, ParticleField, QualityShed};
use folio3d_testkit::{
    EventRecord, ExecutionMetrics, InteractionMetrics, JsonlSink, MetricsReport,
    MetricsReportBuilder, ParticleMetrics, QualityMetrics, RunResult, SceneMetrics,
};
use folio3d_ui3d::{CameraView, FrameReport, InteractionContext, InteractionEvent, SceneGraph};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

pub const DEFAULT_FRAME_MS: f32 = 1000.0 / 60.0;
/// Frame limit when neither `--frames` nor a script bounds the run.
pub const DEFAULT_MAX_FRAMES: u64 = 600;

pub struct HeadlessConfig {
    pub scene: SceneConfig,
    /// Replaces the configured scene candidates when set.
    pub scene_candidates: Option<Vec<PathBuf>>,
    pub fallback_scene: bool,
    pub script: Option<PathBuf>,
    pub max_frames: Option<u64>,
    pub frame_ms: f32,
    pub trace: Option<PathBuf>,
    pub metrics: Option<PathBuf>,
    pub session_name: String,
}

#[derive(Serialize)]
struct SessionStart<'a> {
    source: &'a str,
    nodes: usize,
    entities: usize,
    profile: &'a str,
}

pub fn run(cfg: HeadlessConfig) -> Result<MetricsReport> {
    let started = Instant::now();

    let loaded = if cfg.fallback_scene {
        scene_loader::fallback()
    } else {
        let candidates = cfg
            .scene_candidates
            .as_deref()
            .unwrap_or(cfg.scene.scene.candidates.as_slice());
        scene_loader::load_scene(candidates)
    };

    let mut script = match &cfg.script {
        Some(path) => Some(
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load script {}", path.display()))?,
        ),
        None => None,
    };
    if let Some(player) = &script {
        info!(seconds = player.total_duration(), "scripted input loaded");
    }

    let trace = match &cfg.trace {
        Some(path) => Some(JsonlSink::create(path)?),
        None => None,
    };

    let mut session = Session::new(&cfg.scene, loaded, trace)?;
    let base_dt = (cfg.frame_ms.max(0.1)) / 1000.0;

    loop {
        if let Some(limit) = cfg.max_frames {
            if session.frames() >= limit {
                break;
            }
        } else if script.as_ref().map_or(
            session.frames() >= DEFAULT_MAX_FRAMES,
            ScriptedInputPlayer::is_finished,
        ) {
            break;
        }

        let (dt, input) = match script.as_mut() {
            Some(player) => {
                let dt = player.frame_ms().map_or(base_dt, |ms| ms.max(0.1) / 1000.0);
                (dt, player.advance(dt))
            }
            None => (base_dt, ScriptedFrame::default()),
        };
        session.step(dt, &input)?;
    }

    session.finish()?;
    let report = session.report(
        &cfg.session_name,
        RunResult::Pass,
        started.elapsed().as_secs_f64(),
    );
    info!(
        frames = report.execution.frames,
        source = %session.source(),
        nodes = session.scene().len(),
        hovered = session.interaction().hovered().is_some(),
        profile = %session.quality().profile(),
        falling = session.field().counts().falling,
        "headless session finished"
    );

    if let Some(path) = &cfg.metrics {
        report.write_json(path)?;
    }
    Ok(report)
}

/// One headless run: the scene, its interaction context and the ambient
/// effects, advanced one frame at a time.
pub struct Session {
    scene: SceneGraph,
    source: String,
    camera: CameraView,
    viewport: (u32, u32),
    interaction: InteractionContext,
    quality: AdaptiveQuality,
    field: ParticleField,
    tick: FrameTick,
    simulated_seconds: f64,
    trace: Option<JsonlSink>,
    counters: InteractionMetrics,
}

impl Session {
    pub fn new(config: &SceneConfig, loaded: LoadedScene, trace: Option<JsonlSink>) -> Result<Self> {
        let LoadedScene { graph, source } = loaded;
        let interaction = InteractionContext::compose(config.interaction.clone(), &graph);
        let quality = AdaptiveQuality::new(&config.device, &config.quality);
        let field = ParticleField::new(quality.budget(), config.scene.particle_seed);

        let mut session = Self {
            camera: config.camera.view(),
            viewport: config.camera.viewport(),
            scene: graph,
            source,
            interaction,
            quality,
            field,
            tick: FrameTick::ZERO,
            simulated_seconds: 0.0,
            trace,
            counters: InteractionMetrics::default(),
        };

        let start = SessionStart {
            source: &session.source,
            nodes: session.scene.len(),
            entities: session.interaction.registry().entity_count(),
            profile: session.quality.profile().as_str(),
        };
        if let Some(trace) = session.trace.as_mut() {
            trace.write(&EventRecord {
                tick: session.tick,
                kind: "session-start",
                payload: start,
            })?;
        }
        info!(
            source = %session.source,
            entities = session.interaction.registry().entity_count(),
            profile = %session.quality.profile(),
            "session started"
        );
        Ok(session)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn frames(&self) -> u64 {
        self.tick.0
    }

    pub fn interaction(&self) -> &InteractionContext {
        &self.interaction
    }

    pub fn quality(&self) -> &AdaptiveQuality {
        &self.quality
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Feed one frame of input, then run interaction, particles and the
    /// frame-rate sampler.
    pub fn step(&mut self, dt: f32, input: &ScriptedFrame) -> Result<FrameReport> {
        if input.leave {
            self.interaction.pointer_left();
        }
        if let Some(screen) = input.pointer {
            self.interaction.pointer_moved(screen, self.viewport);
        }
        if input.backdrop {
            self.interaction.backdrop_clicked();
        }
        if input.exit {
            self.interaction.exit_pressed();
        }
        if input.click {
            self.interaction.click();
        }

        let mut events = Vec::new();
        if let Some(overlay) = input.open {
            if self.interaction.open_overlay(overlay) {
                events.push(InteractionEvent::OverlayOpening { overlay });
            } else {
                debug!(%overlay, "overlay request ignored, another overlay is active");
            }
        }

        let mut report = self.interaction.frame(dt, &self.camera, &mut self.scene);
        events.append(&mut report.events);

        self.field.tick();
        let shed = self.quality.record_frame(dt);
        if let Some(shed) = shed {
            self.field.apply_budget(shed.budget);
        }

        for event in &events {
            self.count(event);
            self.record(event.kind(), event)?;
        }
        if let Some(shed) = shed {
            self.record::<QualityShed>("quality-shed", &shed)?;
        }

        report.events = events;
        self.tick = self.tick.advance(1);
        self.simulated_seconds += f64::from(dt);
        Ok(report)
    }

    pub fn finish(&mut self) -> Result<()> {
        if let Some(trace) = self.trace.as_mut() {
            trace.flush()?;
        }
        Ok(())
    }

    pub fn report(&self, session: &str, result: RunResult, duration_seconds: f64) -> MetricsReport {
        let counts = self.field.counts();
        MetricsReportBuilder::new(session)
            .result(result)
            .scene(SceneMetrics {
                source: self.source.clone(),
                nodes: self.scene.len(),
                entities: self.interaction.registry().entity_count(),
            })
            .interaction(self.counters.clone())
            .quality(QualityMetrics {
                initial_profile: self.quality.initial_profile().as_str().to_string(),
                final_profile: self.quality.profile().as_str().to_string(),
                sheds: self.quality.shed_count(),
                last_fps: self.quality.last_fps(),
            })
            .particles(ParticleMetrics {
                falling: counts.falling,
                fireflies: counts.fireflies,
                petals: counts.petals,
                update_frames: self.field.update_count(),
            })
            .execution(ExecutionMetrics {
                frames: self.tick.0,
                simulated_seconds: self.simulated_seconds,
                duration_seconds,
            })
            .build()
    }

    fn count(&mut self, event: &InteractionEvent) {
        let counters = &mut self.counters;
        match event {
            InteractionEvent::HoverEnter { .. } => counters.hover_enters += 1,
            InteractionEvent::HoverExit { .. } => counters.hover_exits += 1,
            InteractionEvent::Action { fallback, .. } => {
                counters.actions += 1;
                if *fallback {
                    counters.fallback_actions += 1;
                }
            }
            InteractionEvent::OverlayOpened { .. } => counters.overlays_opened += 1,
            InteractionEvent::OverlayClosed { .. } => counters.overlays_closed += 1,
            InteractionEvent::OverlayOpening { .. } | InteractionEvent::OverlayClosing { .. } => {}
        }
    }

    fn record<P: Serialize>(&mut self, kind: &str, payload: &P) -> Result<()> {
        if let Some(trace) = self.trace.as_mut() {
            trace.write(&EventRecord {
                tick: self.tick,
                kind,
                payload,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio3d_core::OverlayId;
    use folio3d_fx::{DeviceSignals, QualityProfile};
    use folio3d_testkit::read_events;
    use folio3d_ui3d::OverlayPhase;
    use glam::Vec3;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Camera straight in front of the "about" fallback button.
    fn about_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.camera.position = [8.0, 10.0, 20.0];
        config.camera.target = [8.0, 10.0, 10.0];
        config.camera.viewport = [800, 600];
        config.device = DeviceSignals {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".into(),
            gpu_renderer: Some("NVIDIA GeForce RTX 4070".into()),
            graphics_available: true,
            viewport_width: Some(800),
        };
        config
    }

    fn session(config: &SceneConfig) -> Session {
        Session::new(config, scene_loader::fallback(), None).unwrap()
    }

    fn frames(session: &mut Session, count: usize, dt: f32, input: ScriptedFrame) {
        for i in 0..count {
            let frame = if i == 0 {
                input
            } else {
                ScriptedFrame {
                    pointer: input.pointer,
                    ..ScriptedFrame::default()
                }
            };
            session.step(dt, &frame).unwrap();
        }
    }

    #[test]
    fn click_on_button_opens_its_overlay_and_exit_closes_it() {
        let config = about_config();
        let mut session = session(&config);
        let center = ScriptedFrame {
            pointer: Some((400.0, 300.0)),
            ..ScriptedFrame::default()
        };

        frames(&mut session, 30, 1.0 / 60.0, center);
        assert!(session.interaction().hovered().is_some());

        frames(
            &mut session,
            60,
            1.0 / 60.0,
            ScriptedFrame {
                click: true,
                ..center
            },
        );
        assert_eq!(
            session.interaction().overlay_phase(),
            OverlayPhase::Open(OverlayId::About)
        );

        frames(
            &mut session,
            30,
            1.0 / 60.0,
            ScriptedFrame {
                exit: true,
                ..center
            },
        );
        assert!(session.interaction().overlay_phase().is_closed());

        let report = session.report("click", RunResult::Pass, 0.0);
        let interaction = report.interaction.unwrap();
        assert_eq!(interaction.actions, 1);
        assert_eq!(interaction.fallback_actions, 0);
        assert_eq!(interaction.overlays_opened, 1);
        assert_eq!(interaction.overlays_closed, 1);
        assert_eq!(report.execution.frames, 120);
    }

    #[test]
    fn hover_scale_returns_to_snapshot_after_pointer_leaves() {
        let config = about_config();
        let mut session = session(&config);
        let node = session.scene().find_by_name("aboutme_Raycaster").unwrap();

        frames(
            &mut session,
            5,
            1.0 / 60.0,
            ScriptedFrame {
                pointer: Some((400.0, 300.0)),
                ..ScriptedFrame::default()
            },
        );
        let mid = session.scene().get(node).unwrap().transform.scale;
        assert_ne!(mid, Vec3::ONE);

        frames(
            &mut session,
            60,
            1.0 / 60.0,
            ScriptedFrame {
                leave: true,
                ..ScriptedFrame::default()
            },
        );
        assert_eq!(session.scene().get(node).unwrap().transform.scale, Vec3::ONE);
        assert!(session.interaction().hovered().is_none());
    }

    #[test]
    fn slow_frames_shed_particles_once() {
        let config = about_config();
        let mut session = session(&config);
        assert_eq!(session.quality().profile(), QualityProfile::High);
        assert_eq!(session.field().counts().falling, 50);

        frames(&mut session, 40, 0.04, ScriptedFrame::default());
        assert_eq!(session.quality().profile(), QualityProfile::Medium);
        assert_eq!(session.field().counts().falling, 35);

        frames(&mut session, 300, 1.0 / 60.0, ScriptedFrame::default());
        assert_eq!(session.quality().shed_count(), 1);
        assert_eq!(session.field().counts().falling, 35);
    }

    #[test]
    fn run_writes_trace_and_metrics() {
        let dir = std::env::temp_dir().join(format!(
            "folio3d-run-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let script = dir.join("script.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            &script,
            r#"{"steps": [
                {"duration": 0.5, "pointer": [400, 300]},
                {"duration": 1.0, "pointer": [400, 300], "click": true},
                {"duration": 0.5, "backdrop": true}
            ]}"#,
        )
        .unwrap();

        let trace = dir.join("trace.jsonl");
        let metrics = dir.join("metrics.json");
        let report = run(HeadlessConfig {
            scene: about_config(),
            scene_candidates: None,
            fallback_scene: true,
            script: Some(script),
            max_frames: None,
            frame_ms: 1000.0 / 60.0,
            trace: Some(trace.clone()),
            metrics: Some(metrics.clone()),
            session_name: "scripted".into(),
        })
        .unwrap();

        assert_eq!(report.scene.as_ref().unwrap().source, "fallback");
        assert_eq!(report.interaction.as_ref().unwrap().overlays_closed, 1);

        let events = read_events(&trace).unwrap();
        assert_eq!(events[0]["kind"], "session-start");
        let kinds: Vec<_> = events
            .iter()
            .map(|e| e["kind"].as_str().unwrap_or_default().to_string())
            .collect();
        let position = |kind: &str| kinds.iter().position(|k| k == kind).unwrap();
        assert!(position("hover-enter") < position("action"));
        assert!(position("overlay-opening") < position("overlay-opened"));
        assert!(position("overlay-closing") < position("overlay-closed"));
        assert_eq!(events[position("action")]["payload"]["overlay"], "about");

        assert!(std::fs::read_to_string(&metrics)
            .unwrap()
            .contains("\"session\": \"scripted\""));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn direct_open_request_is_traced() {
        let config = about_config();
        let mut session = session(&config);
        let report = session
            .step(
                1.0 / 60.0,
                &ScriptedFrame {
                    open: Some(OverlayId::Projects),
                    ..ScriptedFrame::default()
                },
            )
            .unwrap();
        assert_eq!(
            report.events,
            vec![InteractionEvent::OverlayOpening {
                overlay: OverlayId::Projects
            }]
        );

        let again = session
            .step(
                1.0 / 60.0,
                &ScriptedFrame {
                    open: Some(OverlayId::Contact),
                    ..ScriptedFrame::default()
                },
            )
            .unwrap();
        assert!(again.events.is_empty());
        assert_eq!(
            session.interaction().overlay_phase().overlay(),
            Some(OverlayId::Projects)
        );
    }

    #[test]
    fn missing_script_fails_the_run() {
        let result = run(HeadlessConfig {
            scene: SceneConfig::default(),
            scene_candidates: None,
            fallback_scene: true,
            script: Some(PathBuf::from("/missing/script.json")),
            max_frames: Some(1),
            frame_ms: DEFAULT_FRAME_MS,
            trace: None,
            metrics: None,
            session_name: "missing".into(),
        });
        assert!(result.is_err());
    }
}
