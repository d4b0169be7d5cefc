use crate::error::{DpResult, DrillError};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::Display;

/// How the iteration-0 tour is built.
#[derive(ValueEnum, Display, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InitStrategy {
    NearestNeighbor,
    Random,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabuParams {
    /// Tenure multiplier: tenure = round(alpha * sqrt(n))
    #[arg(long, default_value_t = 0.75)]
    pub alpha: f64,

    /// Rejection bound: a non-aspirating move is dropped if its
    /// penalized delta exceeds beta * current cost
    #[arg(long, default_value_t = 0.5)]
    pub beta: f64,

    /// Per-iteration multiplier on every frequency counter, in (0, 1)
    #[arg(long = "decayFactor", default_value_t = 0.9)]
    pub decay_factor: f64,

    /// Weight of the frequency penalty in move selection
    #[arg(long, default_value_t = 0.01)]
    pub lambda: f64,

    #[arg(long = "maxIterations", default_value_t = 1000)]
    pub max_iterations: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Candidate moves drawn per iteration (0 scans the whole neighborhood)
    #[arg(long = "sampleSize", default_value_t = 0)]
    pub sample_size: usize,

    #[arg(long, value_enum, default_value_t = InitStrategy::NearestNeighbor)]
    pub init: InitStrategy,
}

impl Default for TabuParams {
    fn default() -> Self {
        Self {
            alpha: 0.75,
            beta: 0.5,
            decay_factor: 0.9,
            lambda: 0.01,
            max_iterations: 1000,
            seed: 42,
            sample_size: 0,
            init: InitStrategy::NearestNeighbor,
        }
    }
}

impl TabuParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DpResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites fields with the values the user typed on the command line.
    /// Clap defaults never override values loaded from a parameter file.
    pub fn merge_from_cli(&mut self, cli_params: &TabuParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field.clone();
                }
            };
        }

        update_if_present!(alpha, "alpha");
        update_if_present!(beta, "beta");
        update_if_present!(decay_factor, "decay_factor");
        update_if_present!(lambda, "lambda");
        update_if_present!(max_iterations, "max_iterations");
        update_if_present!(seed, "seed");
        update_if_present!(sample_size, "sample_size");
        update_if_present!(init, "init");
    }

    pub fn validate(&self) -> DpResult<()> {
        let named = [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("decayFactor", self.decay_factor),
            ("lambda", self.lambda),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(DrillError::InvalidParameter(format!(
                    "--{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("lambda", self.lambda)] {
            if value < 0.0 {
                return Err(DrillError::InvalidParameter(format!(
                    "--{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        if self.decay_factor <= 0.0 || self.decay_factor >= 1.0 {
            return Err(DrillError::InvalidParameter(format!(
                "--decayFactor must lie strictly between 0 and 1, got {}",
                self.decay_factor
            )));
        }

        Ok(())
    }

    /// Short-term memory length for an instance with `n` holes.
    pub fn tabu_tenure(&self, n: usize) -> usize {
        (self.alpha * (n as f64).sqrt()).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TabuParams::default().validate().is_ok());
    }

    #[test]
    fn test_decay_factor_bounds_are_exclusive() {
        for bad in [0.0, 1.0, -0.2, 1.5] {
            let params = TabuParams {
                decay_factor: bad,
                ..Default::default()
            };
            assert!(
                matches!(params.validate(), Err(DrillError::InvalidParameter(_))),
                "decayFactor {} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        let neg_alpha = TabuParams {
            alpha: -1.0,
            ..Default::default()
        };
        let neg_beta = TabuParams {
            beta: -0.1,
            ..Default::default()
        };
        let nan_lambda = TabuParams {
            lambda: f64::NAN,
            ..Default::default()
        };
        assert!(neg_alpha.validate().is_err());
        assert!(neg_beta.validate().is_err());
        assert!(nan_lambda.validate().is_err());
    }

    #[test]
    fn test_tenure_scales_with_sqrt() {
        let params = TabuParams::default();
        assert_eq!(params.tabu_tenure(4), 2); // 0.75 * 2 = 1.5 -> 2
        assert_eq!(params.tabu_tenure(100), 8); // 7.5 -> 8
        let zero = TabuParams {
            alpha: 0.0,
            ..Default::default()
        };
        assert_eq!(zero.tabu_tenure(100), 0);
    }

    #[test]
    fn test_json_uses_camel_case_and_defaults() {
        let params: TabuParams =
            serde_json::from_str(r#"{ "decayFactor": 0.5, "maxIterations": 10, "init": "random" }"#)
                .unwrap();
        assert_eq!(params.decay_factor, 0.5);
        assert_eq!(params.max_iterations, 10);
        assert_eq!(params.init, InitStrategy::Random);
        assert_eq!(params.alpha, 0.75);
    }
}
