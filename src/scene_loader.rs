use folio3d_ui3d::{fallback_scene, SceneGraph};
use std::path::PathBuf;
use tracing::{info, warn};

pub const FALLBACK_SOURCE: &str = "fallback";

/// A scene graph plus a label for where it came from.
pub struct LoadedScene {
    pub graph: SceneGraph,
    pub source: String,
}

/// Try each candidate description in order; synthesize the fallback scene
/// once the list is exhausted.
pub fn load_scene(candidates: &[PathBuf]) -> LoadedScene {
    for path in candidates {
        match SceneGraph::from_path(path) {
            Ok(graph) => {
                info!(path = %path.display(), nodes = graph.len(), "scene loaded");
                return LoadedScene {
                    graph,
                    source: path.display().to_string(),
                };
            }
            Err(err) => {
                warn!(%err, path = %path.display(), "scene candidate failed, trying next");
            }
        }
    }

    if !candidates.is_empty() {
        warn!(
            attempts = candidates.len(),
            "all scene candidates failed, using fallback scene"
        );
    }
    fallback()
}

pub fn fallback() -> LoadedScene {
    let graph = fallback_scene();
    info!(nodes = graph.len(), "fallback scene generated");
    LoadedScene {
        graph,
        source: FALLBACK_SOURCE.to_string(),
    }
}
