use std::fs;
use std::path::Path;
use std::process;

use lmx_core::settings::{self, Settings};
use lmx_engine::ExplorerError;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Install the settings file as the process-wide settings, or keep the
/// embedded defaults when none is given.
pub fn load(file: Option<&str>) -> &'static Settings {
    if let Some(file) = file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error: {}");
    }
    settings::settings()
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let s = die!(check_file(Path::new(file)), "Error: {}");
    println!("{}", describe(&s));
}

fn check_file(path: &Path) -> Result<Settings, ExplorerError> {
    lmx_engine::load_settings(path)
}

fn describe(s: &Settings) -> String {
    format!(
        "OK: url={}, timeout_ms={}, debounce_ms={}, top_k={}",
        s.service.predict_url(),
        s.service.timeout_ms,
        s.session.debounce_ms,
        s.prediction
            .top_k
            .map_or_else(|| "default".to_string(), |k| k.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(settings::default_toml().as_bytes()).unwrap();

        let s = check_file(file.path()).unwrap();
        assert_eq!(
            describe(&s),
            "OK: url=http://127.0.0.1:8000/predict, timeout_ms=30000, debounce_ms=1000, top_k=default"
        );
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let toml = settings::default_toml().replace("debounce_ms = 1000", "debounce_ms = 0");
        file.write_all(toml.as_bytes()).unwrap();

        let err = check_file(file.path()).unwrap_err();
        assert!(matches!(err, ExplorerError::Settings(_)), "{err}");
    }

    #[test]
    fn validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ExplorerError::Io { .. }));
    }
}
