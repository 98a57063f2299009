use std::path::PathBuf;

use kinema_controller_editor::{EditorSession, SelectionHost, SessionError};
use kinema_controller_core::{
    Config, ControllerError, GraphNode, HashId, InputValue, LeafNode, Writer, FORMAT_MAGIC,
    SET_INPUT,
};
use kinema_test_fixtures::{sample_controller, MemoryClips};

struct FakeHost {
    path: Option<PathBuf>,
    buffer: Vec<u8>,
    has_buffer: bool,
}

impl FakeHost {
    fn empty() -> Self {
        Self {
            path: None,
            buffer: Vec::new(),
            has_buffer: false,
        }
    }

    fn with_buffer(len: usize) -> Self {
        Self {
            path: None,
            buffer: vec![0; len],
            has_buffer: true,
        }
    }
}

impl SelectionHost for FakeHost {
    fn selected_controller_path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn live_input_buffer(&mut self) -> Option<&mut [u8]> {
        if self.has_buffer {
            Some(&mut self.buffer)
        } else {
            None
        }
    }
}

fn is_empty_resource(session: &EditorSession) -> bool {
    let resource = session.resource();
    resource.schema.inputs().is_empty()
        && resource.schema.constants().is_empty()
        && resource.mapping.slots().is_empty()
        && resource.mapping.sets().is_empty()
        && resource.mapping.entries().is_empty()
}

#[test]
fn save_and_load_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero.kcl");
    let mut clips = MemoryClips::default();

    let mut session = EditorSession::new(Config::default());
    *session.resource_mut() = sample_controller(&mut clips);
    session.save_as(&path).unwrap();
    assert_eq!(session.path(), Some(path.as_path()));

    let mut other_clips = MemoryClips::default();
    let mut other = EditorSession::new(Config::default());
    other.load(&path, &mut other_clips).unwrap();

    assert_eq!(other.resource(), session.resource());
    assert_eq!(other.path(), Some(path.as_path()));
    assert_eq!(other_clips.live(), 2);
}

#[test]
fn save_without_a_path_declines() {
    let session = EditorSession::new(Config::default());
    assert!(matches!(session.save(), Err(SessionError::NoPath)));
}

#[test]
fn unreadable_file_resets_to_an_empty_controller() {
    let dir = tempfile::tempdir().unwrap();
    let mut clips = MemoryClips::default();

    let mut session = EditorSession::new(Config::default());
    *session.resource_mut() = sample_controller(&mut clips);
    assert_eq!(clips.live(), 2);

    let err = session
        .load(dir.path().join("absent.kcl"), &mut clips)
        .unwrap_err();
    assert!(matches!(err, SessionError::Io(_)));
    assert!(is_empty_resource(&session));
    // The outgoing resource's clips were still released.
    assert_eq!(clips.live(), 0);
}

#[test]
fn foreign_version_resets_to_an_empty_controller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.kcl");
    let mut w = Writer::default();
    w.write_bytes(&FORMAT_MAGIC);
    w.write_u32(99);
    std::fs::write(&path, w.into_vec()).unwrap();

    let mut clips = MemoryClips::default();
    let mut session = EditorSession::new(Config::default());
    let err = session.load(&path, &mut clips).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Controller(ControllerError::UnsupportedFormat)
    ));
    assert!(is_empty_resource(&session));
}

#[test]
fn new_controller_releases_clips_and_forgets_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut clips = MemoryClips::default();

    let mut session = EditorSession::new(Config::default());
    *session.resource_mut() = sample_controller(&mut clips);
    session.save_as(dir.path().join("hero.kcl")).unwrap();

    session.new_controller(&mut clips);
    assert!(session.path().is_none());
    assert!(is_empty_resource(&session));
    assert_eq!(clips.live(), 0);
}

#[test]
fn load_from_selection_follows_the_host() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("npc.kcl");
    let mut clips = MemoryClips::default();

    let mut session = EditorSession::new(Config::default());
    *session.resource_mut() = sample_controller(&mut clips);
    session.save_as(&path).unwrap();

    let host = FakeHost {
        path: Some(path.clone()),
        ..FakeHost::empty()
    };
    let mut other = EditorSession::new(Config::default());
    other
        .load_from_selection(&host, &mut MemoryClips::default())
        .unwrap();
    assert_eq!(other.path(), Some(path.as_path()));

    let nothing = FakeHost::empty();
    assert!(matches!(
        other.load_from_selection(&nothing, &mut MemoryClips::default()),
        Err(SessionError::NoSelection)
    ));
}

#[test]
fn navigation_walks_containers_and_resets_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero.kcl");
    let mut clips = MemoryClips::default();

    let mut session = EditorSession::new(Config::default());
    *session.resource_mut() = sample_controller(&mut clips);
    session.save_as(&path).unwrap();

    assert_eq!(session.current_container().unwrap().name, "locomotion");
    // Child 0 is a leaf, child 1 a container.
    assert!(!session.enter_child(0));
    assert!(session.enter_child(1));
    assert_eq!(session.current_container().unwrap().name, "on_ground");
    assert!(session.go_up());
    assert!(!session.go_up());

    assert!(session.enter_child(1));
    session.load(&path, &mut clips).unwrap();
    assert_eq!(session.current_container().unwrap().name, "locomotion");
}

#[test]
fn stale_navigation_falls_back_to_the_root() {
    let mut clips = MemoryClips::default();
    let mut session = EditorSession::new(Config::default());
    *session.resource_mut() = sample_controller(&mut clips);

    assert!(session.enter_child(1));
    // The host deletes the navigated child behind the session's back.
    session
        .resource_mut()
        .graph
        .as_container_mut()
        .unwrap()
        .children
        .truncate(1);
    assert_eq!(session.current_container().unwrap().name, "locomotion");
}

#[test]
fn live_input_overlay_reads_and_writes_through_the_host() {
    let mut clips = MemoryClips::default();
    let mut session = EditorSession::new(Config::default());
    *session.resource_mut() = sample_controller(&mut clips);

    let total = session.resource().schema.total_size();
    let mut host = FakeHost::with_buffer(total);

    session
        .write_live_input(&mut host, 0, InputValue::Float(3.5))
        .unwrap();
    assert_eq!(
        session.read_live_input(&mut host, 0),
        Some(InputValue::Float(3.5))
    );

    let mut blind = FakeHost::empty();
    assert!(session.read_live_input(&mut blind, 0).is_none());
    assert!(matches!(
        session.write_live_input(&mut blind, 0, InputValue::Float(1.0)),
        Err(SessionError::NoSelection)
    ));
}

#[test]
fn set_input_event_type_is_registered_up_front() {
    let mut session = EditorSession::new(Config::default());
    let kind = HashId::of_name(SET_INPUT);
    let descriptor = session.events().find(kind).unwrap();
    assert_eq!(descriptor.label, "Set Input");
    assert_eq!(descriptor.payload_size, 8);

    assert!(session.set_event_editor(
        kind,
        Box::new(|payload, _node| payload[0] = payload[0].wrapping_add(1))
    ));

    let mut node = GraphNode::Leaf(LeafNode {
        name: "walk".into(),
        payload: Vec::new(),
    });
    let mut payload = [0u8; 8];
    session
        .events_mut()
        .find_mut(kind)
        .unwrap()
        .edit(&mut payload, &mut node);
    assert_eq!(payload[0], 1);
}

#[test]
fn graph_containers_expose_their_selected_child() {
    let mut clips = MemoryClips::default();
    let resource = sample_controller(&mut clips);
    let root = resource.graph.as_container().unwrap();
    assert_eq!(root.selected_child().unwrap().name(), "on_ground");
}
