/// Frame-advance timers, independent of the physics step.

use crate::entities::{Explosion, FrameTimer, Jet};

/// Accumulate `speed`; once the accumulator reaches 1 the frame advances and
/// the accumulator restarts from zero.  Returns `true` on advance.
pub fn step_timer(timer: &mut FrameTimer, speed: f64) -> bool {
    timer.counter += speed;
    if timer.counter >= 1.0 {
        timer.frame += 1;
        timer.counter = 0.0;
        true
    } else {
        false
    }
}

/// Cycle the jet's idle/thrust animation.
pub fn advance_jet(jet: &mut Jet, speed: f64, frame_count: usize) {
    if step_timer(&mut jet.animation, speed) {
        jet.animation.frame %= frame_count.max(1);
    }
}

/// Cosmetic tilt in degrees; nose up while climbing.
pub fn jet_rotation(jet: &Jet) -> f64 {
    jet.velocity * -4.0
}

/// Start the explosion centred on `(x, y)`.
pub fn trigger_explosion(explosion: &mut Explosion, x: i32, y: i32, size: i32) {
    *explosion = Explosion {
        active: true,
        x: x - size / 2,
        y: y - size / 2,
        timer: FrameTimer::default(),
    };
}

/// Advance a running explosion; it deactivates itself after its last frame.
pub fn advance_explosion(explosion: &mut Explosion, speed: f64, frame_count: usize) {
    if !explosion.active {
        return;
    }
    if step_timer(&mut explosion.timer, speed) && explosion.timer.frame >= frame_count {
        explosion.active = false;
    }
}
