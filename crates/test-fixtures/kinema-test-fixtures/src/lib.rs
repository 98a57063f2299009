//! Shared fixtures for the kinema controller crates' tests.

use kinema_controller_core::{
    ClipHandle, ClipLoader, Config, Container, ControllerResource, GraphNode, InputType,
    InputValue, LeafNode,
};

/// In-memory clip loader. Paths listed in `missing` fail to load;
/// loads and unloads are recorded so tests can assert release
/// behavior.
#[derive(Default)]
pub struct MemoryClips {
    next_id: u64,
    pub missing: Vec<String>,
    pub loaded: Vec<String>,
    pub unloaded: Vec<String>,
}

impl MemoryClips {
    pub fn with_missing(paths: &[&str]) -> Self {
        Self {
            missing: paths.iter().map(|p| (*p).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Loads minus unloads; zero means nothing leaked.
    pub fn live(&self) -> usize {
        self.loaded.len() - self.unloaded.len()
    }
}

impl ClipLoader for MemoryClips {
    fn load(&mut self, path: &str) -> Option<ClipHandle> {
        if self.missing.iter().any(|m| m == path) {
            return None;
        }
        self.next_id += 1;
        self.loaded.push(path.to_string());
        Some(ClipHandle {
            id: self.next_id,
            path: path.to_string(),
        })
    }

    fn unload(&mut self, clip: &ClipHandle) {
        self.unloaded.push(clip.path.clone());
    }
}

/// A small but fully populated controller: three inputs, one constant,
/// a 2x2 slot/set grid with two bound clips, and a two-level graph.
pub fn sample_controller(clips: &mut dyn ClipLoader) -> ControllerResource {
    let mut resource = ControllerResource::new(Config::default());

    let speed = resource.schema.add_input().expect("input capacity");
    resource.schema.set_input_name(speed, "speed").expect("name");
    resource.schema.set_input_type(speed, InputType::Float);
    let grounded = resource.schema.add_input().expect("input capacity");
    resource
        .schema
        .set_input_name(grounded, "grounded")
        .expect("name");
    let jumps = resource.schema.add_input().expect("input capacity");
    resource
        .schema
        .set_input_name(jumps, "jump_count")
        .expect("name");
    resource.schema.set_input_type(jumps, InputType::Int);

    let max_speed = resource.schema.add_constant().expect("constant capacity");
    resource
        .schema
        .set_constant_name(max_speed, "max_speed")
        .expect("name");
    resource.schema.set_constant_type(max_speed, InputType::Float);
    resource
        .schema
        .set_constant_value(max_speed, InputValue::Float(6.0))
        .expect("typed value");

    resource.mapping.add_set("base").expect("set name");
    resource.mapping.add_set("armored").expect("set name");
    resource.mapping.add_slot("Walk").expect("slot name");
    resource.mapping.add_slot("Idle").expect("slot name");
    resource
        .mapping
        .bind_clip(0, 0, Some("anims/walk.anim"), clips)
        .expect("bind");
    resource
        .mapping
        .bind_clip(1, 1, Some("anims/idle_armored.anim"), clips)
        .expect("bind");

    resource.graph = GraphNode::Container(Container {
        name: "locomotion".into(),
        selected: Some(1),
        children: vec![
            GraphNode::Leaf(LeafNode {
                name: "idle".into(),
                payload: vec![1, 2, 3],
            }),
            GraphNode::Container(Container {
                name: "on_ground".into(),
                selected: None,
                children: vec![GraphNode::Leaf(LeafNode {
                    name: "walk".into(),
                    payload: vec![],
                })],
            }),
        ],
    });

    resource
}
