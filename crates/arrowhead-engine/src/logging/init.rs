use std::sync::Once;

use log::LevelFilter;

/// Crates that log every frame at `info`. Held at `warn` by the fallback filter.
const NOISY_MODULES: &[&str] = &["wgpu_core", "wgpu_hal", "naga"];

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"arrowhead_engine=trace"`.
    /// Takes precedence over `RUST_LOG`.
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let mut builder = builder_for(&config, rust_log.as_deref());

        if builder.try_init().is_err() {
            log::debug!("a logger was already installed; keeping it");
            return;
        }
        log::debug!("logging initialized");
    });
}

fn builder_for(config: &LoggingConfig, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    match config.env_filter.as_deref().or(rust_log) {
        Some(directives) => {
            builder.parse_filters(directives);
        }
        None => {
            builder.filter_level(config.default_level);
            for module in NOISY_MODULES {
                builder.filter_module(module, LevelFilter::Warn.min(config.default_level));
            }
        }
    }

    builder.write_style(config.write_style);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(logger: &env_logger::Logger, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn explicit_filter_beats_rust_log() {
        let config = LoggingConfig {
            env_filter: Some("trace".to_string()),
            ..LoggingConfig::default()
        };
        let logger = builder_for(&config, Some("error")).build();
        assert!(enabled(&logger, "arrowhead_engine", Level::Trace));
    }

    #[test]
    fn rust_log_used_without_explicit_filter() {
        let logger = builder_for(&LoggingConfig::default(), Some("warn")).build();
        assert!(!enabled(&logger, "arrowhead_engine", Level::Info));
        assert!(enabled(&logger, "arrowhead_engine", Level::Warn));
    }

    #[test]
    fn fallback_quiets_gpu_internals() {
        let logger = builder_for(&LoggingConfig::default(), None).build();
        assert!(enabled(&logger, "arrowhead_engine::core", Level::Info));
        assert!(!enabled(&logger, "wgpu_core::device", Level::Info));
        assert!(enabled(&logger, "naga", Level::Warn));
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("debug".to_string()),
            ..LoggingConfig::default()
        });
        log::info!("logger survives a second init");
    }
}
