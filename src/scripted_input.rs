use folio3d_core::OverlayId;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScriptedStep {
    pub duration: f32,
    /// Pointer position in viewport pixels, held for the whole step.
    #[serde(default)]
    pub pointer: Option<[f32; 2]>,
    /// Pointer leaves the canvas at the start of the step.
    #[serde(default)]
    pub leave: bool,
    #[serde(default)]
    pub click: bool,
    #[serde(default)]
    pub backdrop: bool,
    #[serde(default)]
    pub exit: bool,
    /// Request an overlay directly, as a navigation link would.
    #[serde(default)]
    pub open: Option<OverlayId>,
    /// Overrides the session frame time while this step runs.
    #[serde(default)]
    pub frame_ms: Option<f32>,
}

/// Input for one frame. Presses are edge triggered: they are reported on the
/// first frame of their step only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScriptedFrame {
    pub pointer: Option<(f32, f32)>,
    pub leave: bool,
    pub click: bool,
    pub backdrop: bool,
    pub exit: bool,
    pub open: Option<OverlayId>,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    entered: bool,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: ScriptedInputFile = serde_json::from_str(&contents)?;
        Self::from_steps(file.steps)
    }

    pub fn from_steps(steps: Vec<ScriptedStep>) -> anyhow::Result<Self> {
        if steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps,
            index: 0,
            time_in_step: 0.0,
            entered: false,
            finished: false,
        })
    }

    /// Sum of all step durations in seconds.
    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration.max(0.0)).sum()
    }

    /// True once the last step has run for its full duration.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frame time requested by the current step, if any.
    pub fn frame_ms(&self) -> Option<f32> {
        self.steps.get(self.index).and_then(|s| s.frame_ms)
    }

    /// Input for the frame about to run, then advance the clock by `dt`.
    pub fn advance(&mut self, dt: f32) -> ScriptedFrame {
        let Some(step) = self.steps.get(self.index) else {
            return ScriptedFrame::default();
        };

        let mut frame = ScriptedFrame {
            pointer: step.pointer.map(|[x, y]| (x, y)),
            ..ScriptedFrame::default()
        };
        if !self.entered && !self.finished {
            self.entered = true;
            frame.leave = step.leave;
            frame.click = step.click;
            frame.backdrop = step.backdrop;
            frame.exit = step.exit;
            frame.open = step.open;
        }

        // Stop at the next step even when the leftover time already covers it,
        // so its presses are reported on the following frame.
        self.time_in_step += dt;
        while self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
                self.entered = false;
                break;
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
                break;
            }
        }

        frame
    }
}
