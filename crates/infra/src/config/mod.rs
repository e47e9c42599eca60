//! Configuration loading
//!
//! Client configuration comes from files and `LBCTL_*` variables; session
//! values come from `CLC_API_*` variables.

pub mod loader;
pub mod session_env;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
pub use session_env::session_material_from_env;

#[cfg(test)]
pub(crate) static ENV_LOCK: once_cell::sync::Lazy<std::sync::Mutex<()>> =
    once_cell::sync::Lazy::new(|| std::sync::Mutex::new(()));
