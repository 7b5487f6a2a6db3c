use crate::geometry::Vec2;
use crate::util::Rng;

const SHAKE_SEED: u64 = 0x5EED_D1CE;

/// Transient presentation jitter.
///
/// While active the offset is `(rx, ry) * power * remaining / duration` with
/// `rx, ry` drawn from [-1, 1). The generator is reseeded on every `shake`,
/// so identical call sequences produce identical offsets.
pub struct ScreenShake {
    power: f32,
    duration: f32,
    remaining: f32,
    jitter: Vec2,
    rng: Rng,
}

impl ScreenShake {
    pub fn new() -> Self {
        Self {
            power: 0.0,
            duration: 0.0,
            remaining: 0.0,
            jitter: Vec2::ZERO,
            rng: Rng::new(SHAKE_SEED),
        }
    }

    /// Start or restart the shake; the last call wins
    pub fn shake(&mut self, power: f32, duration: f32) {
        if power <= 0.0 || duration <= 0.0 {
            self.remaining = 0.0;
            return;
        }
        self.power = power;
        self.duration = duration;
        self.remaining = duration;
        self.rng = Rng::new(SHAKE_SEED);
        self.roll();
    }

    /// Count down by `dt` seconds and pick the next jitter direction
    pub fn update(&mut self, dt: f32) {
        if self.remaining <= 0.0 {
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining > 0.0 {
            self.roll();
        }
    }

    fn roll(&mut self) {
        self.jitter = Vec2::new(
            self.rng.range_f32(-1.0, 1.0),
            self.rng.range_f32(-1.0, 1.0),
        );
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Current displacement, exactly zero when inactive
    pub fn offset(&self) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        self.jitter * (self.power * self.remaining / self.duration)
    }
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self::new()
    }
}
