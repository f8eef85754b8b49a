//! Environment isolation utilities for testing

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify environment variables
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Variables saved and restored around an isolated run
const ISOLATED_VARS: [&str; 3] = ["HOME", "XDG_CONFIG_HOME", "RENDERSUB_CONFIG"];

/// Run `f` with a fake HOME and a controlled `RENDERSUB_CONFIG`
///
/// `XDG_CONFIG_HOME` points inside the fake home, so the per-user config
/// lookup never sees the real one. When `config` is `None`,
/// `RENDERSUB_CONFIG` is unset. The closure receives the fake home.
///
/// ```no_run
/// use rendersub_testkit::with_isolated_env;
///
/// with_isolated_env(None, |home| {
///     assert!(home.exists());
///     assert!(std::env::var("RENDERSUB_CONFIG").is_err());
/// });
/// ```
pub fn with_isolated_env<F, R>(config: Option<&Path>, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    // poisoning only means another test panicked; env vars are still usable
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let original: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let fake_home = TempDir::new().unwrap();
    let fake_config_home = fake_home.path().join(".config");
    std::fs::create_dir_all(&fake_config_home).unwrap();

    // SAFETY: We hold ENV_LOCK, ensuring no other test is modifying env vars concurrently.
    unsafe {
        std::env::set_var("HOME", fake_home.path());
        std::env::set_var("XDG_CONFIG_HOME", &fake_config_home);

        match config {
            Some(path) => std::env::set_var("RENDERSUB_CONFIG", path),
            None => std::env::remove_var("RENDERSUB_CONFIG"),
        }
    }

    let result = f(fake_home.path());

    // SAFETY: We still hold ENV_LOCK.
    unsafe {
        for (name, value) in original {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    result
}
