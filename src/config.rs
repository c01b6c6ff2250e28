use super::*;

use clap::Parser;
use thiserror::Error;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "torus", version, about = "A torus lit by point, directional and spot lights")]
pub struct Config {
    /// Light rotation period; each step turns a lit light by 4/period degrees
    #[arg(long, default_value_t = 4.0)]
    pub period: Real,

    /// Animation steps per second
    #[arg(long, default_value_t = 120.0)]
    pub step_rate: Real,

    /// Largest spot cutoff angle in degrees, at most 90
    #[arg(long, default_value_t = 60.0)]
    pub cutoff_max: Real,

    /// Spot cutoff angle in degrees at startup and after reinitializing
    #[arg(long, default_value_t = 30.0)]
    pub cutoff_initial: Real,

    /// Spot exponent at startup and after reinitializing, at most 128
    #[arg(long, default_value_t = 0.0)]
    pub exponent_initial: Real,

    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// MSAA sample count
    #[arg(long, default_value_t = 2)]
    pub samples: u16,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("period must be within [0.01, 10000], got {0}")]
    Period(Real),

    #[error("step rate must be within [0.01, 10000] steps per second, got {0}")]
    StepRate(Real),

    #[error("cutoff max must be within [0, 90] degrees, got {0}")]
    CutoffMax(Real),

    #[error("initial cutoff must be within [0, {max}] degrees, got {value}")]
    CutoffInitial { value: Real, max: Real },

    #[error("initial exponent must be within [0, 128], got {0}")]
    ExponentInitial(Real),
}

// keeps 4 / period and 1 / step rate finite and representable as a Duration
pub const PERIOD_RANGE:    (Real, Real) = (0.01, 10_000.0);
pub const STEP_RATE_RANGE: (Real, Real) = (0.01, 10_000.0);

#[inline]
fn within(value: Real, min: Real, max: Real) -> bool {
    // written so that NaN is rejected
    value >= min && value <= max
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !within(self.period, PERIOD_RANGE.0, PERIOD_RANGE.1) {
            return Err(ConfigError::Period(self.period));
        }
        if !within(self.step_rate, STEP_RATE_RANGE.0, STEP_RATE_RANGE.1) {
            return Err(ConfigError::StepRate(self.step_rate));
        }
        if !within(self.cutoff_max, 0.0, 90.0) {
            return Err(ConfigError::CutoffMax(self.cutoff_max));
        }
        if !within(self.cutoff_initial, 0.0, self.cutoff_max) {
            return Err(ConfigError::CutoffInitial { value: self.cutoff_initial, max: self.cutoff_max });
        }
        if !within(self.exponent_initial, 0.0, EXPONENT_MAX) {
            return Err(ConfigError::ExponentInitial(self.exponent_initial));
        }
        Ok(())
    }

    pub fn animation_settings(&self) -> AnimationSettings {
        AnimationSettings {
            period:           self.period,
            cutoff_max:       self.cutoff_max,
            cutoff_initial:   self.cutoff_initial,
            exponent_initial: self.exponent_initial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("torus").chain(args.iter().cloned())).unwrap()
    }

    #[test]
    fn defaults_match_the_demo() {
        let config = parse(&[]);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.animation_settings(), AnimationSettings::default());
        assert_eq!(config.step_rate, 120.0);
        assert_eq!((config.width, config.height, config.samples), (1024, 768, 2));
    }

    #[test]
    fn overrides_reach_the_animation() {
        let config = parse(&["--period", "2", "--cutoff-max", "80", "--cutoff-initial", "80"]);
        assert_eq!(config.validate(), Ok(()));

        let animation = Animation::new(config.animation_settings());
        assert_eq!(animation.period(), 2.0);
        assert_eq!(animation.cutoff(), 80.0);
        assert_eq!(animation.cutoff_max(), 80.0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(parse(&["--period", "0"]).validate(), Err(ConfigError::Period(0.0)));
        assert_eq!(parse(&["--step-rate=-1"]).validate(), Err(ConfigError::StepRate(-1.0)));
        assert_eq!(parse(&["--cutoff-max", "91"]).validate(), Err(ConfigError::CutoffMax(91.0)));
        assert_eq!(
            parse(&["--cutoff-initial", "61"]).validate(),
            Err(ConfigError::CutoffInitial { value: 61.0, max: 60.0 }),
        );
        assert_eq!(
            parse(&["--exponent-initial", "129"]).validate(),
            Err(ConfigError::ExponentInitial(129.0)),
        );
    }

    #[test]
    fn rejects_vanishing_rates() {
        let tiny_rate = parse(&["--step-rate", "1e-20"]);
        assert_eq!(tiny_rate.validate(), Err(ConfigError::StepRate(1e-20)));

        let tiny_period = parse(&["--period", "1e-40"]);
        assert!(matches!(tiny_period.validate(), Err(ConfigError::Period(_))));

        assert!(matches!(parse(&["--step-rate", "inf"]).validate(), Err(ConfigError::StepRate(_))));
    }

    #[test]
    fn range_edges_stay_finite() {
        let slowest = parse(&["--period", "0.01", "--step-rate", "0.01"]);
        assert_eq!(slowest.validate(), Ok(()));

        let gate = FixedTimestep::from_rate(slowest.step_rate);
        assert!(gate.threshold() >= Duration::from_secs(99));

        let mut animation = Animation::new(slowest.animation_settings());
        animation.toggle_pause();
        animation.toggle_light(LightKind::Point);
        animation.step();
        let angle = animation.light_angle(LightKind::Point);
        assert!(angle.is_finite() && angle >= 0.0 && angle < 360.0);

        let fastest = parse(&["--period", "10000", "--step-rate", "10000"]);
        assert_eq!(fastest.validate(), Ok(()));
    }

    #[test]
    fn rejects_nan() {
        let config = parse(&["--period", "NaN"]);
        assert!(matches!(config.validate(), Err(ConfigError::Period(_))));
    }

    #[test]
    fn error_messages_name_the_limit() {
        let message = ConfigError::ExponentInitial(200.0).to_string();
        assert_eq!(message, "initial exponent must be within [0, 128], got 200");
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Config::try_parse_from(["torus", "--fps", "60"]).is_err());
    }
}
