use serde_json::json;

use mech_spectator::client::{encode_frame, ClientEvent, Listener, Message, Spectator};
use mech_spectator::core::{Heading, Session};
use mech_spectator::types::{error_code_name, MessageCode, PhaseEdge, WorldPhase};

#[derive(Default)]
struct Recorder {
    events: Vec<ClientEvent>,
    renders: Vec<(usize, usize, f64)>,
}

impl Recorder {
    fn phase_edges(&self) -> Vec<PhaseEdge> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ClientEvent::Phase(edge) => Some(*edge),
                _ => None,
            })
            .collect()
    }

    fn has(&self, pred: impl Fn(&ClientEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}

impl Listener for Recorder {
    fn on_event(&mut self, event: &ClientEvent) {
        self.events.push(event.clone());
    }

    fn on_state_changed(&mut self, session: &mut Session) {
        let snap = session.snapshot();
        self.renders
            .push((snap.mechs.len(), snap.projectiles.len(), snap.scale));
    }
}

fn frame(code: u8, body: serde_json::Value) -> Vec<u8> {
    encode_frame(code, body.to_string().as_bytes()).unwrap()
}

fn world(phase: u8) -> Vec<u8> {
    frame(2, json!({ "worldState": phase }))
}

fn spawn(id: u32, kind: u32, x: f32, z: f32) -> Vec<u8> {
    frame(
        5,
        json!({
            "objectId": id,
            "objectType": kind,
            "position": { "x": x, "y": 0.0, "z": z },
            "rotation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
        }),
    )
}

fn moved(id: u32, x: f32, z: f32) -> Vec<u8> {
    frame(
        6,
        json!({
            "objectId": id,
            "position": { "x": x, "y": 0.0, "z": z },
            "rotation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
        }),
    )
}

fn destroy(id: u32) -> Vec<u8> {
    frame(7, json!({ "objectId": id }))
}

#[test]
fn full_episode_raises_phase_edges_in_order() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    for phase in [1, 2, 3, 4, 5] {
        spectator.feed(&world(phase), &mut rec);
    }

    assert_eq!(
        rec.phase_edges(),
        vec![
            PhaseEdge::ConfigurationStart,
            PhaseEdge::ConfigurationEnd,
            PhaseEdge::StartupStart,
            PhaseEdge::StartupEnd,
            PhaseEdge::GameStart,
            PhaseEdge::GameEnd,
        ]
    );
    assert_eq!(spectator.session().phase(), WorldPhase::GameOver);
}

#[test]
fn repeated_world_state_raises_nothing() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&world(2), &mut rec);
    spectator.feed(&world(2), &mut rec);
    spectator.feed(&world(4), &mut rec);
    spectator.feed(&world(4), &mut rec);

    assert_eq!(rec.phase_edges(), vec![PhaseEdge::ConfigurationStart]);
}

#[test]
fn far_spawn_grows_scale_and_renders() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&world(4), &mut rec);
    let stats = spectator.feed(&spawn(1, 2, 200.0, 0.0), &mut rec);
    assert_eq!(stats.renders, 1);
    assert_eq!(rec.renders, vec![(1, 0, 5.0)]);

    let snap = spectator.session_mut().snapshot();
    let mech = snap.mechs[0];
    assert_eq!(mech.point.x, 80.0);
    assert_eq!(mech.point.z, 12.0);
    // Identity rotation faces +z, which is down the screen.
    assert_eq!(mech.heading, Heading::Down);
}

#[test]
fn spawn_move_destroy_updates_tracker() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    let mut bytes = spawn(1, 2, 0.0, 0.0);
    bytes.extend(spawn(1, 100, 5.0, 5.0));
    bytes.extend(moved(1, 10.0, -3.0));
    bytes.extend(destroy(1));
    spectator.feed(&bytes, &mut rec);

    // Move and destroy hit the mech first; the projectile with the same id stays.
    assert_eq!(rec.renders, vec![(1, 0, 1.0), (1, 1, 1.0), (1, 1, 1.0), (0, 1, 1.0)]);
    assert!(!spectator.session().is_faulted());
}

#[test]
fn unknown_object_type_is_ignored() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&spawn(9, 7, 0.0, 0.0), &mut rec);

    assert!(rec.renders.is_empty());
    assert!(spectator.session().tracker().is_empty());
}

#[test]
fn tracker_fault_suppresses_rendering_until_game_end() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&world(4), &mut rec);
    spectator.feed(&moved(42, 1.0, 1.0), &mut rec);
    assert!(rec.has(|e| matches!(e, ClientEvent::TrackerFault(_))));
    assert!(spectator.session().is_faulted());

    spectator.feed(&spawn(1, 2, 0.0, 0.0), &mut rec);
    assert!(rec.renders.is_empty());

    spectator.feed(&world(5), &mut rec);
    assert!(!spectator.session().is_faulted());
    assert!(spectator.session().tracker().is_empty());
    assert_eq!(rec.renders, vec![(0, 0, 1.0)]);
}

#[test]
fn game_end_resets_scale() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&world(4), &mut rec);
    spectator.feed(&spawn(1, 2, 1000.0, 0.0), &mut rec);
    assert!(spectator.session().scale() > 1.0);

    spectator.feed(&world(5), &mut rec);
    assert_eq!(spectator.session().scale(), 1.0);
}

#[test]
fn bad_body_does_not_stop_later_frames() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    let mut bytes = encode_frame(5, b"{not json").unwrap();
    bytes.extend(spawn(3, 2, 0.0, 0.0));
    let stats = spectator.feed(&bytes, &mut rec);

    assert_eq!(stats.frames, 2);
    assert_eq!(stats.errors, 1);
    assert!(rec.has(|e| matches!(
        e,
        ClientEvent::FrameError {
            code: MessageCode::ObjectSpawn,
            ..
        }
    )));
    assert_eq!(spectator.session().tracker().count(mech_spectator::types::ObjectKind::Mech), 1);
}

#[test]
fn unknown_code_is_reported() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&encode_frame(42, b"whatever").unwrap(), &mut rec);

    assert!(rec.has(|e| *e == ClientEvent::UnknownMessage { code: 42 }));
    assert!(rec.has(|e| *e
        == ClientEvent::MessageReceived {
            code: MessageCode::Unknown(42),
            message: Message::Unknown,
        }));
}

#[test]
fn configure_mech_response_finishes_commit() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&world(2), &mut rec);
    spectator.feed(
        &frame(3, json!({ "msgId": 101, "response": 7, "error": 107 })),
        &mut rec,
    );

    assert!(rec.has(|e| *e
        == ClientEvent::ConfigurationCommitFinished {
            response: 7,
            error: 107,
            description: error_code_name(107),
        }));
    assert!(!rec.has(|e| matches!(e, ClientEvent::ResponseWarning { .. })));
}

#[test]
fn response_error_outside_configuration_warns() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&world(4), &mut rec);
    spectator.feed(&frame(3, json!({ "msgId": 9, "error": 50 })), &mut rec);
    spectator.feed(&frame(3, json!({ "msgId": 9, "error": 0 })), &mut rec);

    let warnings: Vec<_> = rec
        .events
        .iter()
        .filter(|e| matches!(e, ClientEvent::ResponseWarning { .. }))
        .collect();
    assert_eq!(
        warnings,
        vec![&ClientEvent::ResponseWarning {
            msg_id: 9,
            error: 50,
            description: error_code_name(50),
        }]
    );
}

#[test]
fn login_response_starts_connection() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&encode_frame(4, b"").unwrap(), &mut rec);

    assert!(rec.has(|e| *e == ClientEvent::ConnectionStart));
}

#[test]
fn byte_at_a_time_matches_single_chunk() {
    let mut bytes = world(4);
    bytes.extend(spawn(1, 2, 120.0, -30.0));
    bytes.extend(spawn(2, 100, -10.0, 4.0));
    bytes.extend(moved(1, 130.0, -35.0));

    let mut whole = Spectator::with_json(80, 24);
    let mut rec_whole = Recorder::default();
    whole.feed(&bytes, &mut rec_whole);

    let mut split = Spectator::with_json(80, 24);
    let mut rec_split = Recorder::default();
    for b in &bytes {
        split.feed(std::slice::from_ref(b), &mut rec_split);
    }

    assert_eq!(rec_whole.events, rec_split.events);
    assert_eq!(rec_whole.renders, rec_split.renders);
    assert_eq!(split.buffered(), 0);
}

#[test]
fn new_game_starts_from_initial_scale() {
    let mut spectator = Spectator::with_json(80, 24);
    let mut rec = Recorder::default();

    spectator.feed(&world(3), &mut rec);
    spectator.feed(&world(4), &mut rec);
    spectator.feed(&spawn(1, 2, 400.0, 0.0), &mut rec);
    spectator.feed(&destroy(1), &mut rec);
    assert_eq!(spectator.session().scale(), 10.0);

    // No game-over in between: the server goes straight back to setup.
    for phase in [1, 2, 3, 4] {
        spectator.feed(&world(phase), &mut rec);
    }

    assert_eq!(spectator.session().scale(), 1.0);
    assert_eq!(
        rec.renders,
        vec![(0, 0, 1.0), (1, 0, 10.0), (0, 0, 10.0), (0, 0, 1.0)]
    );
}
