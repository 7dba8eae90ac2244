//! Fog colour transitions between rooms

use shatter_scene::Fog;

/// Length of a fog transition in seconds
pub const FOG_TRANSITION_SECS: f32 = 1.5;
/// Fog transitions advance at a fixed 60 Hz tick
pub const FOG_TICK_HZ: u32 = 60;

const TOTAL_TICKS: u32 = (FOG_TRANSITION_SECS * FOG_TICK_HZ as f32) as u32;

/// Linear interpolation of both fog colours from the current value to a target
#[derive(Debug, Clone)]
pub struct FogTransition {
    from: Fog,
    to: Fog,
    current: Fog,
    ticks: u32,
    active: bool,
}

impl FogTransition {
    pub fn new(initial: Fog) -> Self {
        Self {
            from: initial,
            to: initial,
            current: initial,
            ticks: TOTAL_TICKS,
            active: false,
        }
    }

    /// Fog to draw with right now
    pub fn current(&self) -> Fog {
        self.current
    }

    pub fn target(&self) -> Fog {
        self.to
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Progress of the running transition in [0, 1]
    pub fn progress(&self) -> f32 {
        self.ticks as f32 / TOTAL_TICKS as f32
    }

    /// Begin moving toward `target`, starting from whatever is shown now
    pub fn start(&mut self, target: Fog) {
        self.from = self.current;
        self.to = target;
        self.ticks = 0;
        self.active = true;
    }

    /// Jump straight to `fog` with no transition
    pub fn set(&mut self, fog: Fog) {
        self.from = fog;
        self.to = fog;
        self.current = fog;
        self.ticks = TOTAL_TICKS;
        self.active = false;
    }

    /// Advance one 60 Hz tick. Returns true while the transition is running.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.ticks += 1;
        if self.ticks >= TOTAL_TICKS {
            self.ticks = TOTAL_TICKS;
            self.current = self.to;
            self.active = false;
        } else {
            self.current = self.from.lerp(&self.to, self.progress());
        }
        self.active
    }
}

impl Default for FogTransition {
    fn default() -> Self {
        Self::new(Fog::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shatter_core::Rgba;

    fn flat(v: f32) -> Fog {
        Fog {
            lower: Rgba::opaque(v, v, v),
            upper: Rgba::opaque(v, v, v),
        }
    }

    #[test]
    fn test_reaches_target_after_duration() {
        let mut fog = FogTransition::new(flat(0.0));
        fog.start(flat(1.0));

        let mut ticks = 0;
        while fog.tick() {
            ticks += 1;
        }
        assert_eq!(ticks + 1, 90);
        assert_eq!(fog.current(), flat(1.0));
        assert!(!fog.is_active());
    }

    #[test]
    fn test_midway_is_interpolated() {
        let mut fog = FogTransition::new(flat(0.0));
        fog.start(flat(1.0));
        for _ in 0..45 {
            fog.tick();
        }
        assert!((fog.current().lower.r - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_retarget_restarts_from_current() {
        let mut fog = FogTransition::new(flat(0.0));
        fog.start(flat(1.0));
        for _ in 0..45 {
            fog.tick();
        }
        fog.start(flat(0.0));
        assert_eq!(fog.progress(), 0.0);
        fog.tick();
        let r = fog.current().lower.r;
        assert!(r < 0.5 && r > 0.48);
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut fog = FogTransition::default();
        assert!(!fog.tick());
        assert_eq!(fog.current(), Fog::DEFAULT);
    }
}
