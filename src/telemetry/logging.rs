use std::io::Write;
use std::sync::OnceLock;

static INITIALIZED: OnceLock<log::LevelFilter> = OnceLock::new();

pub fn parse_level(level: &str) -> Result<log::LevelFilter, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(log::LevelFilter::Off),
        "error" => Ok(log::LevelFilter::Error),
        "warn" | "warning" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        other => Err(format!("unknown log level '{}'", other)),
    }
}

/// Installs the process logger once; later calls keep the first level.
pub fn init(level: &str) -> Result<(), String> {
    let filter = parse_level(level)?;
    if INITIALIZED.get().is_some() {
        return Ok(());
    }
    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter);
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            fmt.timestamp_seconds(),
            record.level(),
            record.args()
        )
    });
    builder
        .try_init()
        .map_err(|err| format!("logger init failed: {}", err))?;
    let _ = INITIALIZED.set(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_known_names() {
        assert_eq!(parse_level("INFO"), Ok(log::LevelFilter::Info));
        assert_eq!(parse_level(" warning "), Ok(log::LevelFilter::Warn));
        assert_eq!(parse_level("trace"), Ok(log::LevelFilter::Trace));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn init_is_idempotent() {
        assert!(init("warn").is_ok());
        assert!(init("debug").is_ok());
    }
}
