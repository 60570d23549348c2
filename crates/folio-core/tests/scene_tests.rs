// Host-side tests for the scene animator driven by manual clock and ticks.

use folio_core::constants::{CAMERA_HOME, CAMERA_LOOK_AT, GROUND_Y, POINTER_PARKED};
use folio_core::{
    bob_offset, Camera, ManualClock, ManualTicks, SceneAnimator, SceneConfig, TickSource,
};
use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

fn animator(clock: &ManualClock) -> SceneAnimator<ManualClock> {
    SceneAnimator::new(&SceneConfig::default(), clock.clone()).expect("default scene")
}

#[test]
fn elapsed_is_monotonic_under_tick_source() {
    let clock = ManualClock::new();
    let anim = Rc::new(RefCell::new(animator(&clock)));
    let samples = Rc::new(RefCell::new(Vec::new()));

    let mut ticks = ManualTicks::new();
    let (a, s) = (anim.clone(), samples.clone());
    ticks.start(Box::new(move || {
        let t = a.borrow_mut().update();
        s.borrow_mut().push(t.elapsed);
    }));

    for step in [0.016, 0.017, 0.0, 0.5, 0.016] {
        clock.advance(step);
        ticks.tick();
    }
    // A clock that jumps backwards must not rewind the scene.
    clock.set(-10.0);
    ticks.tick();
    clock.set(2.0);
    ticks.tick();

    let samples = samples.borrow();
    assert_eq!(ticks.frames(), 7);
    assert!(samples.windows(2).all(|w| w[1] >= w[0]), "{:?}", samples);
    assert!((samples[6] - 2.0).abs() < 1e-6);
}

#[test]
fn solids_bob_within_amplitude() {
    let clock = ManualClock::new();
    let mut anim = animator(&clock);
    let bases: Vec<f32> = anim.scene().solids.iter().map(|s| s.base_y).collect();
    let amp = anim.bob_amplitude();
    for _ in 0..2_000 {
        clock.advance(0.05);
        anim.update();
        for (solid, base) in anim.scene().solids.iter().zip(&bases) {
            assert!(
                (solid.transform.position.y - base).abs() <= amp + 1e-5,
                "offset exceeded amplitude"
            );
        }
    }
}

#[test]
fn bob_offset_is_bounded_and_phase_shifted() {
    for i in 0..1000 {
        let t = i as f32 * 0.1;
        assert!(bob_offset(t, 0.2, 3.0, 0.15).abs() <= 0.15);
    }
    assert_ne!(bob_offset(1.0, 0.2, 0.0, 1.0), bob_offset(1.0, 0.2, 1.0, 1.0));
}

#[test]
fn solids_rotate_at_constant_rate() {
    let clock = ManualClock::new();
    let mut anim = animator(&clock);
    clock.advance(1.0);
    anim.update();
    let first = anim.scene().solids[0].transform.rotation;
    clock.advance(1.0);
    anim.update();
    let second = anim.scene().solids[0].transform.rotation;
    assert!(((second - first) - first).length() < 1e-5);
    assert!(first.y > first.x && first.x > 0.0);
}

#[test]
fn time_uniforms_follow_the_clock() {
    let clock = ManualClock::new();
    let mut anim = animator(&clock);
    clock.advance(3.25);
    anim.update();
    let scene = anim.scene();
    assert_eq!(scene.ground.material.time, 3.25);
    assert_eq!(scene.particles.material.time, 3.25);
}

#[test]
fn pointer_ripple_lands_where_the_ray_hits_the_sand() {
    let clock = ManualClock::new();
    let mut anim = animator(&clock);
    assert_eq!(
        anim.scene().ground.material.pointer,
        Vec2::from(POINTER_PARKED)
    );

    let ndc = Vec2::new(0.2, -0.3);
    let camera_before: Camera = anim.scene().camera.clone();
    anim.set_pointer_ndc(ndc);
    anim.update();

    let ray = camera_before.ray_from_ndc(ndc);
    let hit = ray.intersect_plane_y(GROUND_Y).expect("ray looks down at the sand");
    let pointer = anim.scene().ground.material.pointer;
    assert!(pointer.abs_diff_eq(Vec2::new(hit.x, hit.z), 1e-4), "{pointer:?}");
}

#[test]
fn pointer_above_horizon_keeps_last_ripple() {
    let clock = ManualClock::new();
    let mut anim = animator(&clock);
    anim.set_pointer_ndc(Vec2::ZERO);
    clock.advance(0.016);
    anim.update();
    let landed = anim.scene().ground.material.pointer;
    assert_ne!(landed, Vec2::from(POINTER_PARKED));

    anim.set_pointer_ndc(Vec2::new(0.0, 1.0));
    clock.advance(0.016);
    anim.update();
    assert_eq!(anim.scene().ground.material.pointer, landed);
}

#[test]
fn camera_eases_towards_pointer_target() {
    let clock = ManualClock::new();
    let mut anim = animator(&clock);
    anim.set_pointer_ndc(Vec2::new(1.0, 1.0));
    let goal = Vec3::new(0.5, CAMERA_HOME.y + 0.2, CAMERA_HOME.z);

    let mut prev_dist = (anim.scene().camera.eye - goal).length();
    for _ in 0..120 {
        clock.advance(1.0 / 60.0);
        anim.update();
        let eye = anim.scene().camera.eye;
        let dist = (eye - goal).length();
        assert!(dist <= prev_dist + 1e-6, "camera moved away from its goal");
        assert!(eye.x <= goal.x + 1e-6, "smoothing overshot");
        prev_dist = dist;
    }
    assert!(prev_dist < 0.01, "still {prev_dist} away after two seconds");
    assert_eq!(anim.scene().camera.target, CAMERA_LOOK_AT);
    assert_eq!(anim.scene().camera.eye.z, CAMERA_HOME.z);
}

#[test]
fn zero_delta_frame_does_not_move_camera() {
    let clock = ManualClock::new();
    let mut anim = animator(&clock);
    anim.set_pointer_ndc(Vec2::new(-1.0, 0.0));
    anim.update();
    assert_eq!(anim.scene().camera.eye, CAMERA_HOME);
}
