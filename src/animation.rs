use super::*;

bitflags! {
    /// Set of lights currently switched on.
    pub struct Lights: u8 {
        const POINT       = 0b001;
        const DIRECTIONAL = 0b010;
        const SPOT        = 0b100;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightKind {
    Point       = 0,
    Directional = 1,
    Spot        = 2,
}

impl LightKind {
    pub const ALL: [LightKind; 3] = [LightKind::Point, LightKind::Directional, LightKind::Spot];

    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn flag(self) -> Lights {
        match self {
            LightKind::Point       => Lights::POINT,
            LightKind::Directional => Lights::DIRECTIONAL,
            LightKind::Spot        => Lights::SPOT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LightKind::Point       => "point",
            LightKind::Directional => "directional",
            LightKind::Spot        => "spot",
        }
    }
}

pub const EXPONENT_MAX:      Real = 128.0;
pub const DEFAULT_SHININESS: Real = 25.0;
pub const SHININESS_MAX:     Real = 120.0;

/// Light rotation per step is `DEGREES_PER_PERIOD / period` degrees.
pub const DEGREES_PER_PERIOD: Real = 4.0;

/// Folds any phase onto a ramp over `[0, max]`: 0 at phase 0, `max` at π, 0 again at 2π.
pub fn triangle_wave(phase: Real, max: Real) -> Real {
    let folded = phase.rem_euclid(TAU).cos().acos();
    (max * folded / PI).max(0.0).min(max)
}

/// A value swept back and forth over `[0, max]` by a phase accumulator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Oscillator {
    max:     Real,
    initial: Real,
    value:   Real,
    phase:   Real,
    enabled: bool,
}

impl Oscillator {
    pub fn new(initial: Real, max: Real) -> Self {
        let mut oscillator = Oscillator { max, initial, value: 0.0, phase: 0.0, enabled: false };
        oscillator.reset();
        oscillator
    }

    /// Restores the initial value and the phase that produces it. Leaves `enabled` alone.
    pub fn reset(&mut self) {
        self.value = self.initial;
        self.phase = if self.max > 0.0 { PI * self.initial / self.max } else { 0.0 };
    }

    pub fn advance(&mut self, step: Real) {
        self.phase = (self.phase + step).rem_euclid(TAU);
        self.value = triangle_wave(self.phase, self.max);
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    #[inline] pub fn value(&self)      -> Real { self.value }
    #[inline] pub fn phase(&self)      -> Real { self.phase }
    #[inline] pub fn max(&self)        -> Real { self.max }
    #[inline] pub fn is_enabled(&self) -> bool { self.enabled }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationSettings {
    pub period:           Real,
    pub cutoff_max:       Real,
    pub cutoff_initial:   Real,
    pub exponent_initial: Real,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        AnimationSettings {
            period:           4.0,
            cutoff_max:       60.0,
            cutoff_initial:   30.0,
            exponent_initial: 0.0,
        }
    }
}

/// Everything that changes while the demo runs. Advanced by [`Animation::step`],
/// read by the renderer every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    period: Real,

    frame:        usize,
    shininess:    Real,
    light_angles: [Real; 3],
    lights_on:    Lights,

    exponent: Oscillator,
    cutoff:   Oscillator,

    paused:            bool,
    shininess_cycling: bool,
    show_normals:      bool,
}

impl Animation {
    pub fn new(settings: AnimationSettings) -> Self {
        let mut animation = Animation {
            period:       settings.period,
            frame:        0,
            shininess:    DEFAULT_SHININESS,
            light_angles: [0.0; 3],
            lights_on:    Lights::empty(),
            exponent:     Oscillator::new(settings.exponent_initial, EXPONENT_MAX),
            cutoff:       Oscillator::new(settings.cutoff_initial, settings.cutoff_max),

            paused:            true,
            shininess_cycling: false,
            show_normals:      false,
        };
        animation.reinitialize();
        animation
    }

    /// Back to the startup values. Pause, display and oscillation toggles are kept.
    pub fn reinitialize(&mut self) {
        self.frame        = 0;
        self.shininess    = DEFAULT_SHININESS;
        self.lights_on    = Lights::empty();
        self.light_angles = [0.0; 3];
        self.exponent.reset();
        self.cutoff.reset();
    }

    /// One fixed time step.
    pub fn step(&mut self) {
        self.frame += 1;

        let degrees = DEGREES_PER_PERIOD / self.period;
        for &kind in LightKind::ALL.iter() {
            if self.is_light_on(kind) {
                let angle = &mut self.light_angles[kind.slot()];
                *angle = (*angle + degrees).rem_euclid(360.0);
            }
        }

        if self.is_light_on(LightKind::Spot) {
            let phase_step = degrees.to_radians();
            if self.exponent.is_enabled() { self.exponent.advance(phase_step); }
            if self.cutoff.is_enabled()   { self.cutoff.advance(phase_step); }
        }

        trace!("step {}: angles {:?} exponent {} cutoff {}",
            self.frame, self.light_angles, self.exponent.value(), self.cutoff.value());
    }

    /// Feeds wall-clock time to `gate`, stepping once if it fires while running.
    pub fn tick(&mut self, gate: &mut FixedTimestep, delta: Duration) -> bool {
        let fired = gate.tick(delta);
        if fired && !self.paused {
            self.step();
            true
        } else {
            false
        }
    }

    /// Per rendered frame. While cycling, shininess creeps up by a tenth of the
    /// whole-seconds count modulo 10, capped at [`SHININESS_MAX`].
    pub fn update_shininess(&mut self, elapsed_secs: f64) {
        if self.shininess_cycling {
            let seconds = (elapsed_secs.max(0.0) as u64 % 10) as Real;
            self.shininess = (self.shininess + seconds * 0.1).min(SHININESS_MAX);
        } else {
            self.shininess = DEFAULT_SHININESS;
        }
    }

    pub fn toggle_light(&mut self, kind: LightKind) -> bool {
        self.lights_on.toggle(kind.flag());
        self.is_light_on(kind)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn toggle_shininess_cycling(&mut self) -> bool {
        self.shininess_cycling = !self.shininess_cycling;
        self.shininess_cycling
    }

    pub fn toggle_normals(&mut self) -> bool {
        self.show_normals = !self.show_normals;
        self.show_normals
    }

    pub fn toggle_exponent_oscillation(&mut self) -> bool {
        self.exponent.toggle()
    }

    pub fn toggle_cutoff_oscillation(&mut self) -> bool {
        self.cutoff.toggle()
    }

    #[inline] pub fn period(&self)    -> Real  { self.period }
    #[inline] pub fn frame(&self)     -> usize { self.frame }
    #[inline] pub fn shininess(&self) -> Real  { self.shininess }
    #[inline] pub fn lights_on(&self) -> Lights { self.lights_on }

    #[inline]
    pub fn is_light_on(&self, kind: LightKind) -> bool {
        self.lights_on.contains(kind.flag())
    }

    /// Degrees about +Y, in `[0, 360)`.
    #[inline]
    pub fn light_angle(&self, kind: LightKind) -> Real {
        self.light_angles[kind.slot()]
    }

    #[inline] pub fn exponent(&self)   -> Real { self.exponent.value() }
    #[inline] pub fn cutoff(&self)     -> Real { self.cutoff.value() }
    #[inline] pub fn cutoff_max(&self) -> Real { self.cutoff.max() }

    #[inline] pub fn exponent_oscillator(&self) -> &Oscillator { &self.exponent }
    #[inline] pub fn cutoff_oscillator(&self)   -> &Oscillator { &self.cutoff }

    #[inline] pub fn is_paused(&self)            -> bool { self.paused }
    #[inline] pub fn is_shininess_cycling(&self) -> bool { self.shininess_cycling }
    #[inline] pub fn shows_normals(&self)        -> bool { self.show_normals }
}

/// Accumulates frame deltas and fires once the total passes `threshold`, then starts over.
#[derive(Copy, Clone, Debug)]
pub struct FixedTimestep {
    threshold: Duration,
    elapsed:   Duration,
}

impl FixedTimestep {
    pub fn from_rate(steps_per_second: Real) -> Self {
        FixedTimestep {
            threshold: Duration::from_secs_f64(1.0 / steps_per_second as f64),
            elapsed:   Duration::from_secs(0),
        }
    }

    pub fn tick(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        if self.elapsed > self.threshold {
            self.elapsed = Duration::from_secs(0);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn threshold(&self) -> Duration {
        self.threshold
    }
}
