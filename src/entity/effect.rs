use std::f32::consts::PI;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entity::{Player, Text};

/// Per-tick behaviour attached to an entity. Runs in list order at the
/// start of the owner's `update`, before input is applied.
pub trait Effect<E> {
    fn apply(&mut self, entity: &mut E);
}

// ── Wander ───────────────────────────────────────────────────────────────────

/// Random stumbling: each tick, with probability `chance` per axis, take
/// one step up/down and then one step left/right. The stock chance is 10%.
pub struct Wander {
    pub chance: f64,
    rng: StdRng,
}

impl Wander {
    pub fn new(chance: f64, seed: u64) -> Self {
        Self { chance: chance.clamp(0.0, 1.0), rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self::new(0.1, 0)
    }
}

impl Effect<Player> for Wander {
    fn apply(&mut self, player: &mut Player) {
        if self.rng.gen_bool(self.chance) {
            let dy = if self.rng.gen_bool(0.5) { -1 } else { 1 };
            player.step(0, dy);
        }
        if self.rng.gen_bool(self.chance) {
            let dx = if self.rng.gen_bool(0.5) { -1 } else { 1 };
            player.step(dx, 0);
        }
    }
}

// ── Gravity ──────────────────────────────────────────────────────────────────

/// Pulls the player down `step` pixels per tick until it rests on the
/// bottom of its bounds.
pub struct Gravity {
    pub step: f32,
}

impl Effect<Player> for Gravity {
    fn apply(&mut self, player: &mut Player) {
        let floor = player.max_position().y;
        if player.pos.y < floor {
            player.pos.y = (player.pos.y + self.step).min(floor);
        }
    }
}

// ── Fade ─────────────────────────────────────────────────────────────────────

/// Pulses text alpha along half a sine wave: 0 → 1 → 0, then restarts.
pub struct Fade {
    /// Phase advance per tick in radians.
    pub step: f32,
    phase: f32,
}

impl Fade {
    pub fn new(step: f32) -> Self {
        Self { step, phase: 0.0 }
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::new(PI / 16.0)
    }
}

impl Effect<Text> for Fade {
    fn apply(&mut self, text: &mut Text) {
        self.phase += self.step;
        if self.phase >= PI {
            self.phase = 0.0;
        }
        text.color = text.color.with_alpha(self.phase.sin());
    }
}

// ── Drift ────────────────────────────────────────────────────────────────────

/// Moves text by `velocity` every tick. With `wrap_x` set, text leaving one
/// side of `[min, max]` reappears at the other.
pub struct Drift {
    pub velocity: Vec2,
    pub wrap_x: Option<(f32, f32)>,
}

impl Effect<Text> for Drift {
    fn apply(&mut self, text: &mut Text) {
        text.pos += self.velocity;
        if let Some((min, max)) = self.wrap_x {
            let w = text.width();
            if text.pos.x + w < min {
                text.pos.x = max;
            } else if text.pos.x > max {
                text.pos.x = min - w;
            }
        }
    }
}
