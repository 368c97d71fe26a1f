use log::LevelFilter;
use std::env;

/// Environment variable that turns on debug logging.
pub const DEBUG_ENV: &str = "CROSSGEN_DEBUG";

/// Sets up `env_logger` on stderr. Logs at Info, or Debug if `debug_enabled`;
/// an explicit `RUST_LOG` overrides either.
pub fn init_logger(debug_enabled: bool) {
  let level = if debug_enabled {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };

  let mut builder = env_logger::Builder::new();
  builder
    .filter(None, level)
    .format_timestamp(None)
    .format_module_path(false)
    .format_target(false);

  if let Ok(spec) = env::var("RUST_LOG") {
    builder.parse_filters(&spec);
  }

  // A second call (e.g. from tests) keeps the first logger.
  if builder.try_init().is_ok() {
    log::debug!("Logger initialized at {:?} level", level);
  }
}

/// Whether [DEBUG_ENV] is set.
pub fn debug_requested() -> bool {
  env::var_os(DEBUG_ENV).is_some()
}
