#![cfg(test)]

use std::f32::consts::FRAC_PI_2;

use glowfield_blocks::BlockRegistry;
use glowfield_geom::Vec3;
use glowfield_scene::Scene;

use crate::player::{MoveInput, MovementParams, MovementState, Walker};

const DT: f32 = 0.016;

fn world() -> BlockRegistry {
    BlockRegistry::new(Scene::standard(), 16)
}

/// Standing on the ground in front of the first riser, facing up the stairs (+X).
fn walker_at_foot_of_stairs() -> Walker {
    let mut w = Walker::new(
        Vec3::new(-13.2, 0.26, 5.0),
        0.26,
        0.8,
        MovementParams::default(),
    );
    w.yaw = FRAC_PI_2;
    w
}

fn run_ticks(w: &mut Walker, reg: &BlockRegistry, input: &MoveInput, n: usize) {
    for _ in 0..n {
        w.tick(reg.index(), input, DT);
    }
}

#[test]
fn riser_blocks_walking() {
    let reg = world();
    let mut w = walker_at_foot_of_stairs();
    let fwd = MoveInput {
        forward: true,
        ..Default::default()
    };
    run_ticks(&mut w, &reg, &fwd, 60);
    // first riser face is at x = -12.5
    assert!(w.pos.x < -12.7, "walked into the step: x = {}", w.pos.x);
    assert!(w.pos.y < 0.45, "climbed the riser: y = {}", w.pos.y);
    assert!((w.pos.z - 5.0).abs() < 0.5, "slid along the riser: z = {}", w.pos.z);
}

#[test]
fn jump_lands_on_first_step() {
    let reg = world();
    let mut w = walker_at_foot_of_stairs();
    run_ticks(&mut w, &reg, &MoveInput::default(), 2);
    assert!(w.is_grounded());

    let jump = MoveInput {
        jump: true,
        ..Default::default()
    };
    w.tick(reg.index(), &jump, DT);
    assert_eq!(w.state, MovementState::Airborne);

    let idle = MoveInput::default();
    let mut guard = 0;
    while w.pos.y < 2.0 {
        w.tick(reg.index(), &idle, DT);
        guard += 1;
        assert!(guard < 200, "never rose above 2");
    }

    let fwd = MoveInput {
        forward: true,
        ..Default::default()
    };
    while w.pos.x < -12.1 {
        w.tick(reg.index(), &fwd, DT);
        guard += 1;
        assert!(guard < 400, "never reached the step");
    }

    while !w.is_grounded() {
        w.tick(reg.index(), &idle, DT);
        guard += 1;
        assert!(guard < 1000, "never landed");
    }
    // feet rest one radius above the 0.6 step top
    assert!((w.pos.y - 0.86).abs() < 0.05, "landed at y = {}", w.pos.y);
    assert!(w.pos.x > -12.5 && w.pos.x < -11.5);
}

#[test]
fn standing_on_a_step_is_stable() {
    let reg = world();
    let mut w = Walker::new(
        Vec3::new(-12.0, 1.5, 5.0),
        0.26,
        0.8,
        MovementParams::default(),
    );
    let idle = MoveInput::default();
    let mut guard = 0;
    while !w.is_grounded() {
        w.tick(reg.index(), &idle, DT);
        guard += 1;
        assert!(guard < 200);
    }
    let settled = w.pos;
    run_ticks(&mut w, &reg, &idle, 30);
    assert!(w.is_grounded());
    assert!((w.pos - settled).length() < 1e-3);
}
