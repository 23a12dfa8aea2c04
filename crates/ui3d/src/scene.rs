//! Scene graph consumed by the interaction layer.
//!
//! The graph is a flat arena of world-positioned nodes. A model loader fills
//! it from a scene description; the fallback generator fills it directly.
//! Interaction code only touches node scale and the highlight flag.

use crate::interaction::Aabb;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Index of a node in its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Renderable kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Node with geometry.
    #[default]
    Mesh,
    /// Grouping node without geometry of its own.
    Group,
}

/// Transform in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A named, world-positioned node.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name as authored in the model.
    pub name: String,
    /// Optional explicit interaction tag (e.g. `open-projects`).
    pub tag: Option<String>,
    pub kind: NodeKind,
    pub transform: Transform3D,
    /// Geometry bounds in model space; `None` for nodes without geometry.
    pub local_bounds: Option<Aabb>,
    /// Set while the hover highlight material is swapped in.
    pub highlighted: bool,
}

impl SceneNode {
    /// Create a box mesh of the given size, centered at `position`.
    pub fn mesh(name: impl Into<String>, position: Vec3, size: Vec3) -> Self {
        Self {
            name: name.into(),
            tag: None,
            kind: NodeKind::Mesh,
            transform: Transform3D::new(position),
            local_bounds: Some(Aabb::from_center_size(Vec3::ZERO, size)),
            highlighted: false,
        }
    }

    /// Create a group node at `position`.
    pub fn group(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            kind: NodeKind::Group,
            local_bounds: None,
            ..Self::mesh(name, position, Vec3::ZERO)
        }
    }

    /// Builder: set an explicit interaction tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Builder: set the node scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Builder: set the node rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn is_mesh(&self) -> bool {
        self.kind == NodeKind::Mesh
    }

    /// World-space axis-aligned bounds of the node's geometry.
    ///
    /// Nodes without geometry yield a zero-extent box at their position.
    pub fn world_bounds(&self) -> Aabb {
        match self.local_bounds {
            Some(bounds) => bounds.transformed(&self.transform.matrix()),
            None => Aabb::from_center_size(self.transform.position, Vec3::ZERO),
        }
    }
}

/// Flat arena of scene nodes, in traversal order.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Visit nodes in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }

    /// First node with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parse a JSON scene description.
    pub fn from_json_str(input: &str) -> Result<Self, SceneError> {
        let description: SceneDescription = serde_json::from_str(input)?;
        Self::from_description(description)
    }

    /// Read and parse a JSON scene description from disk.
    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build a graph from an already-parsed description.
    pub fn from_description(description: SceneDescription) -> Result<Self, SceneError> {
        if description.nodes.is_empty() {
            return Err(SceneError::Empty);
        }

        let mut graph = SceneGraph::new();
        for node in description.nodes {
            graph.add(node.into_node());
        }
        Ok(graph)
    }
}

/// Errors emitted while reading a scene description.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Wrap IO errors when reading descriptions.
    #[error("failed to read scene description: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse scene description: {0}")]
    Parse(#[from] serde_json::Error),
    /// The description parsed but contained no nodes.
    #[error("scene description contains no nodes")]
    Empty,
}

/// Serialized scene: the boundary format delivered by a model loader.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SceneDescription {
    pub nodes: Vec<NodeDescription>,
}

/// One node of a [`SceneDescription`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeDescription {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`.
    #[serde(default = "identity_rotation")]
    pub rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Box geometry size, centered on the node origin.
    #[serde(default)]
    pub size: Option<[f32; 3]>,
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl NodeDescription {
    fn into_node(self) -> SceneNode {
        let mut scale = Vec3::from_array(self.scale);
        // Exported models occasionally carry a collapsed axis; treat those as unscaled
        if scale.x == 0.0 || scale.y == 0.0 || scale.z == 0.0 {
            tracing::debug!(node = %self.name, ?scale, "normalizing zero scale");
            scale = Vec3::ONE;
        }

        let rotation = Quat::from_array(self.rotation);
        let rotation = if rotation.length_squared() > 0.0 {
            rotation.normalize()
        } else {
            Quat::IDENTITY
        };

        let local_bounds = match (self.kind, self.size) {
            (NodeKind::Group, _) => None,
            (NodeKind::Mesh, Some(size)) => {
                Some(Aabb::from_center_size(Vec3::ZERO, Vec3::from_array(size)))
            }
            (NodeKind::Mesh, None) => Some(Aabb::from_center_size(Vec3::ZERO, Vec3::ZERO)),
        };

        SceneNode {
            name: self.name,
            tag: self.tag,
            kind: self.kind,
            transform: Transform3D {
                position: Vec3::from_array(self.position),
                rotation,
                scale,
            },
            local_bounds,
            highlighted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_bounds_follow_scale_and_position() {
        let node = SceneNode::mesh("box", Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 1.0, 0.5))
            .with_scale(Vec3::splat(2.0));
        let bounds = node.world_bounds();
        assert!((bounds.center() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
        assert!((bounds.size() - Vec3::new(4.0, 2.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn group_bounds_are_degenerate() {
        let group = SceneNode::group("root", Vec3::new(4.0, 0.0, 0.0));
        let bounds = group.world_bounds();
        assert_eq!(bounds.size(), Vec3::ZERO);
        assert_eq!(bounds.center(), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn parses_description_and_normalizes_zero_scale() {
        let json = r#"{
            "nodes": [
                {"name": "Scene", "kind": "group"},
                {"name": "aboutme_Raycaster_Pointer_Hover", "position": [8, 10, 10],
                 "scale": [0, 1, 1], "size": [2, 1, 0.5]},
                {"name": "Plant", "tag": "open-main", "size": [1, 1, 1]}
            ]
        }"#;
        let graph = SceneGraph::from_json_str(json).expect("scene parses");
        assert_eq!(graph.len(), 3);

        let id = graph
            .find_by_name("aboutme_Raycaster_Pointer_Hover")
            .expect("button present");
        let node = graph.get(id).unwrap();
        assert_eq!(node.transform.scale, Vec3::ONE);
        assert_eq!(node.transform.position, Vec3::new(8.0, 10.0, 10.0));

        let plant = graph.get(graph.find_by_name("Plant").unwrap()).unwrap();
        assert_eq!(plant.tag.as_deref(), Some("open-main"));
        assert!(graph.get(NodeId(0)).unwrap().local_bounds.is_none());
    }

    #[test]
    fn empty_and_malformed_descriptions_are_errors() {
        assert!(matches!(
            SceneGraph::from_json_str(r#"{"nodes": []}"#),
            Err(SceneError::Empty)
        ));
        assert!(matches!(
            SceneGraph::from_json_str("glTF\u{2}binary"),
            Err(SceneError::Parse(_))
        ));
        assert!(matches!(
            SceneGraph::from_path(Path::new("/definitely/not/here.json")),
            Err(SceneError::Io(_))
        ));
    }
}
