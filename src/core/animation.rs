//! # Animated Values
//!
//! A small, frame-driven stand-in for a platform animation primitive.
//! Nothing here knows about wall-clock time: the host calls [`AnimatedXY::tick`]
//! with the elapsed time since the previous frame.
//!
//! ```text
//! set_value()  ──► value jumps, any running motion is dropped
//! spring_to()  ──► physically modeled, settles when slow and close
//! timing_to()  ──► fixed duration, eased
//!
//! tick(dt) ──► Some(tag) exactly once, on the frame the motion lands
//! ```
//!
//! Each motion carries a caller-chosen tag `K`; the tag comes back from
//! `tick` on completion so the owner knows *which* transition finished.

use std::time::Duration;

use crate::core::geometry::Offset;

/// Integration step for the spring solver. Frames are split into steps of at
/// most this size so large frame gaps stay stable.
const SPRING_STEP: Duration = Duration::from_millis(1);

/// Parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from the target below which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed (units per second) below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 230.0,
            damping: 22.0,
            mass: 1.0,
            rest_displacement: 0.01,
            rest_speed: 0.1,
        }
    }
}

impl SpringConfig {
    /// Whether the fixed-step solver converges for these constants. With
    /// `a = c·h/m` and `b = k·h²/m` the step is stable iff `a < 2` and
    /// `b + 2a < 4`.
    pub fn is_stable(&self) -> bool {
        let h = SPRING_STEP.as_secs_f64();
        let a = self.damping * h / self.mass;
        let b = self.stiffness * h * h / self.mass;
        [a, b].iter().all(|v| v.is_finite() && *v >= 0.0) && a < 2.0 && b + 2.0 * a < 4.0
    }
}

/// Easing curve for timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Piecewise-linear interpolation through three points, clamped outside the
/// input domain.
///
/// `input` must be strictly increasing.
pub fn interpolate(x: f64, input: [f64; 3], output: [f64; 3]) -> f64 {
    if x <= input[0] {
        return output[0];
    }
    if x >= input[2] {
        return output[2];
    }
    let (i0, i1, o0, o1) = if x <= input[1] {
        (input[0], input[1], output[0], output[1])
    } else {
        (input[1], input[2], output[1], output[2])
    };
    if i1 == i0 {
        return o1;
    }
    o0 + (x - i0) / (i1 - i0) * (o1 - o0)
}

#[derive(Debug, Clone, Copy)]
enum Motion<K> {
    Idle,
    Spring {
        target: Offset,
        velocity: Offset,
        config: SpringConfig,
        tag: K,
    },
    Timing {
        from: Offset,
        to: Offset,
        elapsed: Duration,
        duration: Duration,
        easing: Easing,
        tag: K,
    },
}

/// A 2-D animatable value.
#[derive(Debug, Clone)]
pub struct AnimatedXY<K> {
    value: Offset,
    motion: Motion<K>,
}

impl<K: Copy> Default for AnimatedXY<K> {
    fn default() -> Self {
        Self::new(Offset::ZERO)
    }
}

impl<K: Copy> AnimatedXY<K> {
    pub fn new(value: Offset) -> Self {
        Self {
            value,
            motion: Motion::Idle,
        }
    }

    pub fn value(&self) -> Offset {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    /// Tag of the running motion, if any.
    pub fn running(&self) -> Option<K> {
        match self.motion {
            Motion::Idle => None,
            Motion::Spring { tag, .. } | Motion::Timing { tag, .. } => Some(tag),
        }
    }

    /// Jump to `value` immediately. A running motion is dropped without
    /// completing; its tag is returned.
    pub fn set_value(&mut self, value: Offset) -> Option<K> {
        let aborted = self.stop();
        self.value = value;
        aborted
    }

    /// Stop in place. Returns the tag of the motion that was dropped.
    pub fn stop(&mut self) -> Option<K> {
        let aborted = self.running();
        self.motion = Motion::Idle;
        aborted
    }

    /// Start a spring toward `target`, from rest.
    pub fn spring_to(&mut self, target: Offset, config: SpringConfig, tag: K) {
        self.motion = Motion::Spring {
            target,
            velocity: Offset::ZERO,
            config,
            tag,
        };
    }

    /// Start a fixed-duration transition toward `to`.
    pub fn timing_to(&mut self, to: Offset, duration: Duration, easing: Easing, tag: K) {
        self.motion = Motion::Timing {
            from: self.value,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing,
            tag,
        };
    }

    /// Advance the running motion by `dt`.
    ///
    /// Returns the motion's tag on the frame it completes; the final value is
    /// already applied when this returns.
    pub fn tick(&mut self, dt: Duration) -> Option<K> {
        match &mut self.motion {
            Motion::Idle => None,
            Motion::Timing {
                from,
                to,
                elapsed,
                duration,
                easing,
                tag,
            } => {
                *elapsed += dt;
                if *elapsed >= *duration || duration.is_zero() {
                    let (to, tag) = (*to, *tag);
                    self.value = to;
                    self.motion = Motion::Idle;
                    return Some(tag);
                }
                let t = elapsed.as_secs_f64() / duration.as_secs_f64();
                let eased = easing.apply(t);
                self.value = *from + (*to - *from) * eased;
                None
            }
            Motion::Spring {
                target,
                velocity,
                config,
                tag,
            } => {
                let mut remaining = dt;
                while !remaining.is_zero() {
                    let step = remaining.min(SPRING_STEP);
                    remaining -= step;
                    let h = step.as_secs_f64();

                    let displacement = self.value - *target;
                    let force = displacement * -config.stiffness - *velocity * config.damping;
                    *velocity = *velocity + force * (h / config.mass);
                    self.value = self.value + *velocity * h;

                    let diverged = !(self.value.dx.is_finite() && self.value.dy.is_finite());
                    let at_rest = (self.value - *target).length() < config.rest_displacement
                        && velocity.length() < config.rest_speed;
                    if diverged || at_rest {
                        let (target, tag) = (*target, *tag);
                        self.value = target;
                        self.motion = Motion::Idle;
                        return Some(tag);
                    }
                }
                None
            }
        }
    }
}
