//! Session values exported by a previous login

use lbctl_core::SessionMaterial;
use lbctl_domain::constants::{ENV_ACCOUNT, ENV_LOCATION, ENV_PASSWORD, ENV_TOKEN, ENV_USERNAME};

use super::loader::env_var;

/// Read `CLC_API_*` session values. Empty values count as absent.
pub fn session_material_from_env() -> SessionMaterial {
    SessionMaterial {
        username: env_var(ENV_USERNAME),
        password: env_var(ENV_PASSWORD),
        account_alias: env_var(ENV_ACCOUNT),
        location_alias: env_var(ENV_LOCATION),
        bearer_token: env_var(ENV_TOKEN),
    }
}
