//! # Configuration
//!
//! Settings shared by every check: the default float epsilon and whether failure messages are
//! colored.
//!
//! ## Sources
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A YAML file named by `VERDICT_CONFIG`
//! 3. Environment overrides: `VERDICT_EPSILON`, `VERDICT_COLOR` (`auto`, `always`, `never`)
//!    and `NO_COLOR`
//!
//! [`Config::global`] loads these once per process. A [`Checker`](crate::Checker) can be given
//! its own [`Config`] instead.
//!
//! ```yaml
//! epsilon: 1.0e-6
//! color: never
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::compare::DEFAULT_EPSILON;
use crate::render::{Painter, Tone};

pub const CONFIG_VAR: &str = "VERDICT_CONFIG";
pub const EPSILON_VAR: &str = "VERDICT_EPSILON";
pub const COLOR_VAR: &str = "VERDICT_COLOR";
pub const NO_COLOR_VAR: &str = "NO_COLOR";

static GLOBAL: Lazy<Config> = Lazy::new(Config::from_env);

/// When failure messages carry ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(ConfigError::InvalidColor(value.to_string())),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("epsilon must be a finite, non-negative number, got '{0}'")]
    InvalidEpsilon(String),
    #[error("color must be one of auto, always, never, got '{0}'")]
    InvalidColor(String),
}

/// Settings for checks and failure rendering.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tolerance used by the float checks that do not take an explicit epsilon.
    pub epsilon: f64,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            color: ColorMode::Auto,
        }
    }
}

impl Config {
    /// The process-wide configuration, loaded from the environment on first use.
    pub fn global() -> &'static Config {
        &GLOBAL
    }

    /// Parses a YAML document; missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()
    }

    /// Reads and parses a YAML config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Builds a configuration from the process environment.
    ///
    /// Problems are reported on stderr and the affected setting keeps its default, so a bad
    /// variable never aborts a test run.
    pub fn from_env() -> Self {
        let (config, errors) = Self::from_lookup_lenient(|key| std::env::var(key).ok());
        let painter = config.painter();
        for error in &errors {
            eprintln!("{}", warning(&painter, error));
        }
        config
    }

    /// Like [`Config::from_lookup`], but each source is applied on its own: a source that fails
    /// is skipped and its error returned, and the remaining sources still apply.
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();
        let mut config = match lookup(CONFIG_VAR) {
            Some(path) if !path.is_empty() => Self::from_path(Path::new(&path))
                .unwrap_or_else(|e| {
                    errors.push(e);
                    Config::default()
                }),
            _ => Config::default(),
        };
        if let Some(epsilon) = lookup(EPSILON_VAR) {
            match parse_epsilon(&epsilon) {
                Ok(epsilon) => config.epsilon = epsilon,
                Err(e) => errors.push(e),
            }
        }
        if let Some(color) = lookup(COLOR_VAR) {
            match ColorMode::parse(&color) {
                Ok(color) => config.color = color,
                Err(e) => errors.push(e),
            }
        }
        if no_color(&lookup) {
            config.color = ColorMode::Never;
        }
        (config, errors)
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_VAR) {
            Some(path) if !path.is_empty() => Self::from_path(Path::new(&path))?,
            _ => Config::default(),
        };
        if let Some(epsilon) = lookup(EPSILON_VAR) {
            config.epsilon = parse_epsilon(&epsilon)?;
        }
        if let Some(color) = lookup(COLOR_VAR) {
            config.color = ColorMode::parse(&color)?;
        }
        if no_color(&lookup) {
            config.color = ColorMode::Never;
        }
        Ok(config)
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Whether failure messages should be colored.
    pub fn use_colors(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => atty::is(atty::Stream::Stderr),
        }
    }

    pub fn painter(&self) -> Painter {
        Painter::new(self.use_colors())
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.epsilon.to_string()));
        }
        Ok(self)
    }
}

fn parse_epsilon(value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(epsilon) if epsilon.is_finite() && epsilon >= 0.0 => Ok(epsilon),
        _ => Err(ConfigError::InvalidEpsilon(value.to_string())),
    }
}

fn warning(painter: &Painter, error: &ConfigError) -> String {
    format!(
        "{} {}; ignoring this setting",
        painter.paint("verdict: warning:", Tone::Marker),
        error
    )
}

// https://no-color.org: any non-empty value disables color.
fn no_color<F: Fn(&str) -> Option<String>>(lookup: &F) -> bool {
    lookup(NO_COLOR_VAR).is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.epsilon, 1e-10);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn yaml_overrides_only_named_keys() {
        let config = Config::from_yaml_str("epsilon: 1.0e-6\n").unwrap();
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.color, ColorMode::Auto);

        let config = Config::from_yaml_str("color: never").unwrap();
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert!(!config.use_colors());
    }

    #[test]
    fn yaml_rejects_unknown_keys_and_bad_epsilon() {
        assert!(matches!(
            Config::from_yaml_str("epsilom: 1.0"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("epsilon: -1.0"),
            Err(ConfigError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn environment_overrides() {
        let config = Config::from_lookup(lookup(&[
            (EPSILON_VAR, "1e-6"),
            (COLOR_VAR, "Always"),
        ]))
        .unwrap();
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.color, ColorMode::Always);
    }

    #[test]
    fn no_color_beats_color_var() {
        let config =
            Config::from_lookup(lookup(&[(COLOR_VAR, "always"), (NO_COLOR_VAR, "1")])).unwrap();
        assert_eq!(config.color, ColorMode::Never);

        let config = Config::from_lookup(lookup(&[(NO_COLOR_VAR, "")])).unwrap();
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn invalid_environment_values_are_errors() {
        assert!(matches!(
            Config::from_lookup(lookup(&[(EPSILON_VAR, "tiny")])),
            Err(ConfigError::InvalidEpsilon(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(COLOR_VAR, "rainbow")])),
            Err(ConfigError::InvalidColor(_))
        ));
    }

    #[test]
    fn lenient_loading_skips_only_the_bad_setting() {
        let (config, errors) =
            Config::from_lookup_lenient(lookup(&[(EPSILON_VAR, "1e-6"), (COLOR_VAR, "rainbow")]));
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ConfigError::InvalidColor(_)));

        let (config, errors) = Config::from_lookup_lenient(lookup(&[
            (CONFIG_VAR, "/nonexistent/verdict.yaml"),
            (EPSILON_VAR, "tiny"),
            (COLOR_VAR, "never"),
        ]));
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ConfigError::Read { .. }));
        assert!(matches!(errors[1], ConfigError::InvalidEpsilon(_)));
    }

    #[test]
    fn lenient_loading_without_problems_matches_strict_loading() {
        let vars = [(EPSILON_VAR, "0.5"), (COLOR_VAR, "always"), (NO_COLOR_VAR, "1")];
        let (config, errors) = Config::from_lookup_lenient(lookup(&vars));
        assert!(errors.is_empty());
        assert_eq!(config, Config::from_lookup(lookup(&vars)).unwrap());
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn warnings_follow_the_color_decision() {
        let error = ConfigError::InvalidColor("rainbow".to_string());
        assert_eq!(
            warning(&Painter::plain(), &error),
            "verdict: warning: color must be one of auto, always, never, got 'rainbow'; \
             ignoring this setting"
        );
        let colored = warning(&Painter::new(true), &error);
        assert!(colored.contains("\x1b["));
        assert!(colored.ends_with("got 'rainbow'; ignoring this setting"));
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let err = Config::from_lookup(lookup(&[(CONFIG_VAR, "/nonexistent/verdict.yaml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/verdict.yaml"));
    }
}
