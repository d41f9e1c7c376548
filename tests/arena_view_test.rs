use glam::{Quat, Vec3};

use mech_spectator::core::Session;
use mech_spectator::term::{ArenaView, FrameBuffer, LinkStatus, Rgb};
use mech_spectator::types::{ObjectKind, WorldPhase};

fn rendered(session: &mut Session, w: u16, h: u16, link: LinkStatus) -> FrameBuffer {
    let mut fb = FrameBuffer::new(w, h);
    ArenaView::new().render_into(&session.snapshot(), link, &mut fb);
    fb
}

#[test]
fn header_shows_current_scale() {
    let mut session = Session::new(80, 24);
    session
        .tracker_mut()
        .spawn(ObjectKind::Mech, 1, Vec3::new(200.0, 0.0, 0.0), Quat::IDENTITY);

    let fb = rendered(&mut session, 80, 24, LinkStatus::Live);

    assert!(fb.row_text(0).starts_with("Scale: 5 "));
}

#[test]
fn mech_and_projectile_glyphs_and_colors() {
    let mut session = Session::new(80, 24);
    session.tracker_mut().spawn(
        ObjectKind::Mech,
        1,
        Vec3::new(-20.0, 0.0, -4.0),
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
    );
    session
        .tracker_mut()
        .spawn(ObjectKind::Projectile, 1, Vec3::new(10.0, 0.0, 3.0), Quat::IDENTITY);

    let fb = rendered(&mut session, 80, 24, LinkStatus::Live);

    let mech = fb.get(20, 8).unwrap();
    assert_eq!(mech.ch, '→');
    assert_eq!(mech.style.fg, Rgb::new(0, 128, 128));

    let shot = fb.get(50, 15).unwrap();
    assert_eq!(shot.ch, '⦷');
    assert_eq!(shot.style.fg, Rgb::new(128, 128, 0));
}

#[test]
fn status_line_tracks_phase_and_counts() {
    let mut session = Session::new(80, 24);
    session.advance_phase(WorldPhase::Game);
    session
        .tracker_mut()
        .spawn(ObjectKind::Mech, 4, Vec3::ZERO, Quat::IDENTITY);

    let fb = rendered(&mut session, 80, 24, LinkStatus::Closed);

    assert!(fb
        .row_text(23)
        .starts_with("GAME | mechs 1 | projectiles 0 | closed"));
}

#[test]
fn resize_keeps_larger_scale() {
    let mut session = Session::new(80, 24);
    session
        .tracker_mut()
        .spawn(ObjectKind::Mech, 1, Vec3::new(200.0, 0.0, 0.0), Quat::IDENTITY);
    let _ = session.snapshot();
    assert_eq!(session.scale(), 5.0);

    session.set_extent(400, 100);
    let fb = rendered(&mut session, 400, 100, LinkStatus::Live);

    assert_eq!(session.scale(), 5.0);
    assert!(fb.row_text(0).starts_with("Scale: 5 "));
}

#[test]
fn tracker_fault_freezes_objects_and_shows_in_status() {
    let mut session = Session::new(80, 24);
    session
        .tracker_mut()
        .spawn(ObjectKind::Mech, 1, Vec3::new(-20.0, 0.0, -4.0), Quat::IDENTITY);
    let mut snap = session.snapshot();

    let _ = session.tracker_mut().destroy(99);
    session
        .tracker_mut()
        .spawn(ObjectKind::Mech, 2, Vec3::new(10.0, 0.0, 3.0), Quat::IDENTITY);
    session.snapshot_into(&mut snap);

    let mut fb = FrameBuffer::new(80, 24);
    ArenaView::new().render_into(&snap, LinkStatus::Live, &mut fb);

    assert_eq!(fb.get(20, 8).map(|c| c.ch), Some('↓'));
    assert_eq!(fb.get(50, 15).map(|c| c.ch), Some(' '));
    assert!(fb.row_text(23).contains("tracker fault"));
}
