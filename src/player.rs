use std::f32::consts::{FRAC_PI_2, TAU};
use std::hash::Hash;

use glowfield_geom::{Capsule, Vec3};
use glowfield_octree::{Contact, Octree};

/// Pitch stays this far short of straight up/down.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.1;

/// Wrap `theta` into `[0, 2π)`.
pub fn normalize_yaw(theta: f32) -> f32 {
    let y = ((theta % TAU) + TAU) % TAU;
    // rounding can land exactly on 2π
    if y >= TAU { 0.0 } else { y }
}

#[inline]
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Horizontal facing for `yaw`; yaw 0 looks down +Z.
#[inline]
pub fn forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementState {
    Grounded,
    Airborne,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementParams {
    pub gravity: f32,
    pub speed: f32,
    pub run_multiplier: f32,
    pub jump: f32,
    pub max_dt: f32,
    /// Yaw per tick for A/D in turn mode.
    pub turn_rate: f32,
    /// Yaw/pitch per tick for I/K/J/L.
    pub fine_turn_rate: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            speed: 12.0,
            run_multiplier: 2.0,
            jump: 20.0,
            max_dt: 0.03,
            turn_rate: 0.07,
            fine_turn_rate: 0.03,
        }
    }
}

/// Held controls for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    pub jump: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    /// A/D strafe rather than turn.
    pub strafe: bool,
}

impl MoveInput {
    pub fn is_idle(&self) -> bool {
        *self == MoveInput { strafe: self.strafe, ..Default::default() }
    }
}

/// Capsule avatar integrated against the collision index.
#[derive(Debug, Clone)]
pub struct Walker {
    pub pos: Vec3, // capsule lower endpoint
    pub vel: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub state: MovementState,
    pub radius: f32,
    pub height: f32,
    pub params: MovementParams,
}

impl Walker {
    pub fn new(feet: Vec3, radius: f32, height: f32, params: MovementParams) -> Self {
        Self {
            pos: feet,
            vel: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            state: MovementState::Airborne,
            radius,
            height,
            params,
        }
    }

    /// Resting on the ground plane at the origin.
    pub fn spawn(radius: f32, height: f32, params: MovementParams) -> Self {
        Self::new(Vec3::new(0.0, radius, 0.0), radius, height, params)
    }

    #[inline]
    pub fn capsule(&self) -> Capsule {
        Capsule::upright(self.pos, self.height, self.radius)
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state == MovementState::Grounded
    }

    /// Pointer-look: dragging right turns right, dragging down looks down.
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw = normalize_yaw(self.yaw - dx * sensitivity);
        self.pitch = clamp_pitch(self.pitch + dy * sensitivity);
    }

    fn orient(&mut self, input: &MoveInput) {
        let fine = self.params.fine_turn_rate;
        if input.pitch_up {
            self.pitch -= fine;
        }
        if input.pitch_down {
            self.pitch += fine;
        }
        if input.yaw_left {
            self.yaw += fine;
        }
        if input.yaw_right {
            self.yaw -= fine;
        }
        if !input.strafe {
            if input.left {
                self.yaw += self.params.turn_rate;
            }
            if input.right {
                self.yaw -= self.params.turn_rate;
            }
        }
        self.pitch = clamp_pitch(self.pitch);
        self.yaw = normalize_yaw(self.yaw);
    }

    /// Desired horizontal velocity for the current yaw.
    fn wish_velocity(&self, input: &MoveInput) -> Vec3 {
        let mut local = Vec3::ZERO;
        if input.forward {
            local.z += 1.0;
        }
        if input.back {
            local.z -= 1.0;
        }
        if input.strafe {
            if input.left {
                local.x += 1.0;
            }
            if input.right {
                local.x -= 1.0;
            }
        }
        if local.length_squared() > 0.0 {
            local = local.normalized();
        }
        let speed = if input.run {
            self.params.speed * self.params.run_multiplier
        } else {
            self.params.speed
        };
        local.rotate_y(self.yaw) * speed
    }

    /// Advance one tick. Returns the contact that was resolved, if any.
    pub fn tick<T: Copy + Eq + Hash>(
        &mut self,
        index: &Octree<T>,
        input: &MoveInput,
        dt: f32,
    ) -> Option<Contact> {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt.min(self.params.max_dt)
        } else {
            0.0
        };
        self.orient(input);

        let horiz = self.wish_velocity(input);
        let mut vy = self.vel.y;
        if self.is_grounded() && input.jump {
            vy = self.params.jump;
        } else if self.is_grounded() {
            vy = vy.max(0.0);
        } else {
            vy -= self.params.gravity * dt;
        }
        self.vel = Vec3::new(horiz.x, vy, horiz.z);
        self.pos += self.vel * dt;

        let contact = index.capsule_intersect(&self.capsule());
        match contact {
            Some(c) => {
                self.pos += c.normal * c.depth;
                self.state = if c.floor {
                    MovementState::Grounded
                } else {
                    MovementState::Airborne
                };
                self.pos.x = snap_centimetre(self.pos.x);
                self.pos.z = snap_centimetre(self.pos.z);
            }
            None => self.state = MovementState::Airborne,
        }
        contact
    }
}

#[inline]
fn snap_centimetre(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
