use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use serde_json::json;

use mech_spectator::client::{encode_frame, FrameDecoder, Listener, Spectator};
use mech_spectator::core::Session;
use mech_spectator::types::ObjectKind;

fn move_stream(objects: u32, rounds: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for id in 0..objects {
        let spawn = json!({
            "objectId": id,
            "objectType": 2,
            "position": { "x": id as f32, "y": 0.0, "z": 0.0 },
            "rotation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
        });
        bytes.extend(encode_frame(5, spawn.to_string().as_bytes()).unwrap());
    }
    for round in 0..rounds {
        for id in 0..objects {
            let mv = json!({
                "objectId": id,
                "position": { "x": (id + round) as f32, "y": 0.0, "z": round as f32 },
                "rotation": { "x": 0.0, "y": 0.7071, "z": 0.0, "w": 0.7071 }
            });
            bytes.extend(encode_frame(6, mv.to_string().as_bytes()).unwrap());
        }
    }
    bytes
}

struct Snapshotting;

impl Listener for Snapshotting {
    fn on_state_changed(&mut self, session: &mut Session) {
        black_box(session.snapshot());
    }
}

fn bench_framing(c: &mut Criterion) {
    let bytes = move_stream(32, 50);

    c.bench_function("frame_split_4k_chunks", |b| {
        b.iter(|| {
            let mut decoder = FrameDecoder::with_capacity(4096);
            let mut n = 0;
            for chunk in bytes.chunks(4096) {
                n += decoder.feed(black_box(chunk)).count();
            }
            n
        })
    });
}

fn bench_spectator(c: &mut Criterion) {
    let bytes = move_stream(32, 50);

    c.bench_function("spectator_feed_with_render", |b| {
        b.iter(|| {
            let mut spectator = Spectator::with_json(80, 24);
            spectator.feed(black_box(&bytes), &mut Snapshotting)
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = Session::new(200, 60);
    for id in 0..256u32 {
        let angle = id as f32 * 0.1;
        session.tracker_mut().spawn(
            ObjectKind::Mech,
            id,
            Vec3::new(angle.cos() * 100.0, 0.0, angle.sin() * 100.0),
            Quat::from_rotation_y(angle),
        );
    }

    c.bench_function("snapshot_256_mechs", |b| {
        b.iter(|| black_box(session.snapshot()))
    });
}

criterion_group!(benches, bench_framing, bench_spectator, bench_snapshot);
criterion_main!(benches);
