use crate::logging::LogLevel;

pub const DEFAULT_COUNT_UP_DURATION_MS: u64 = 2_000;
pub const DEFAULT_SPARKLE_MAX: usize = 8;
pub const DEFAULT_SPARKLE_INTERVAL_MS: u64 = 2_000;
pub const DEFAULT_NARROW_BREAKPOINT_PX: u64 = 768;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const COUNT_UP_DURATION_MS_BOUNDS: (u64, u64) = (100, 60_000);
const SPARKLE_MAX_BOUNDS: (usize, usize) = (1, 64);
const SPARKLE_INTERVAL_MS_BOUNDS: (u64, u64) = (250, 60_000);
const NARROW_BREAKPOINT_PX_BOUNDS: (u64, u64) = (320, 2_000);

pub const COUNT_UP_DURATION_ATTR: &str = "data-count-up-duration-ms";
pub const SPARKLE_MAX_ATTR: &str = "data-sparkle-max";
pub const SPARKLE_INTERVAL_ATTR: &str = "data-sparkle-interval-ms";
pub const NARROW_BREAKPOINT_ATTR: &str = "data-narrow-breakpoint-px";
pub const LOG_LEVEL_ATTR: &str = "data-log-level";

/// Tunables read once at startup from `data-*` attributes on `<body>`.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub count_up_duration_ms: u64,
    pub sparkle_max: usize,
    pub sparkle_interval_ms: u64,
    pub narrow_breakpoint_px: u64,
    pub log_level: LogLevel,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            count_up_duration_ms: DEFAULT_COUNT_UP_DURATION_MS,
            sparkle_max: DEFAULT_SPARKLE_MAX,
            sparkle_interval_ms: DEFAULT_SPARKLE_INTERVAL_MS,
            narrow_breakpoint_px: DEFAULT_NARROW_BREAKPOINT_PX,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl EffectsConfig {
    /// `lookup` maps an attribute name to its raw value. Missing, unparsable
    /// and out-of-range values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let count_up_duration_ms = parse_u64_with_bounds(
            &lookup,
            COUNT_UP_DURATION_ATTR,
            DEFAULT_COUNT_UP_DURATION_MS,
            COUNT_UP_DURATION_MS_BOUNDS,
        );
        let sparkle_max = parse_usize_with_bounds(
            &lookup,
            SPARKLE_MAX_ATTR,
            DEFAULT_SPARKLE_MAX,
            SPARKLE_MAX_BOUNDS,
        );
        let sparkle_interval_ms = parse_u64_with_bounds(
            &lookup,
            SPARKLE_INTERVAL_ATTR,
            DEFAULT_SPARKLE_INTERVAL_MS,
            SPARKLE_INTERVAL_MS_BOUNDS,
        );
        let narrow_breakpoint_px = parse_u64_with_bounds(
            &lookup,
            NARROW_BREAKPOINT_ATTR,
            DEFAULT_NARROW_BREAKPOINT_PX,
            NARROW_BREAKPOINT_PX_BOUNDS,
        );
        let log_level = lookup(LOG_LEVEL_ATTR)
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            count_up_duration_ms,
            sparkle_max,
            sparkle_interval_ms,
            narrow_breakpoint_px,
            log_level,
        }
    }

    pub fn narrow_viewport_query(&self) -> String {
        format!("(max-width: {}px)", self.narrow_breakpoint_px)
    }
}

fn parse_u64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    bounds: (u64, u64),
) -> u64 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_usize_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
    bounds: (usize, usize),
) -> usize {
    lookup(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> EffectsConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        EffectsConfig::from_lookup(|name| attributes.get(name).cloned())
    }

    #[test]
    fn missing_attributes_use_defaults() {
        assert_eq!(config_from(&[]), EffectsConfig::default());
    }

    #[test]
    fn in_range_values_override_defaults() {
        let config = config_from(&[
            (COUNT_UP_DURATION_ATTR, " 1500 "),
            (SPARKLE_MAX_ATTR, "12"),
            (SPARKLE_INTERVAL_ATTR, "3000"),
            (NARROW_BREAKPOINT_ATTR, "640"),
            (LOG_LEVEL_ATTR, "debug"),
        ]);

        assert_eq!(config.count_up_duration_ms, 1_500);
        assert_eq!(config.sparkle_max, 12);
        assert_eq!(config.sparkle_interval_ms, 3_000);
        assert_eq!(config.narrow_breakpoint_px, 640);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.narrow_viewport_query(), "(max-width: 640px)");
    }

    #[test]
    fn out_of_range_and_garbage_fall_back() {
        let config = config_from(&[
            (COUNT_UP_DURATION_ATTR, "5"),
            (SPARKLE_MAX_ATTR, "0"),
            (SPARKLE_INTERVAL_ATTR, "fast"),
            (NARROW_BREAKPOINT_ATTR, "-1"),
            (LOG_LEVEL_ATTR, "verbose"),
        ]);

        assert_eq!(config, EffectsConfig::default());
    }
}
