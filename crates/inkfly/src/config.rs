//! CLI configuration -- thin wrapper around `inkfly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-key, --api-url, etc.).

use secrecy::ExposeSecret;

use inkfly_core::{Credentials, StudioConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use inkfly_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Look up the active profile in the loaded config.
///
/// A profile named explicitly with `--profile` must exist. The implicit
/// default may be absent -- credentials can still arrive via flags or
/// environment variables.
pub fn active_profile<'a>(
    global: &GlobalOpts,
    config: &'a Config,
) -> Result<(String, Option<&'a Profile>), CliError> {
    let name = active_profile_name(global, config);
    if let Some(profile) = config.profiles.get(&name) {
        return Ok((name, Some(profile)));
    }

    if global.profile.is_some() {
        let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        let available = if names.is_empty() {
            "(none)".into()
        } else {
            names.join(", ")
        };
        return Err(CliError::ProfileNotFound { name, available });
    }

    Ok((name, None))
}

/// Resolve the credential pair, letting CLI flags shadow the profile chain.
pub fn resolve_credentials(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<Credentials, CliError> {
    // 1. Both halves on the command line (or env): no profile needed.
    if let (Some(api_key), Some(secret)) = (&global.api_key, &global.secret_key) {
        return build_credentials(api_key.clone(), secret);
    }

    let Some(profile) = profile else {
        return Err(CliError::NoCredentials {
            profile: profile_name.into(),
        });
    };

    // 2. API key flag with the profile's secret chain (env var > keyring
    //    > plaintext).
    if let Some(ref api_key) = global.api_key {
        let secret = inkfly_config::resolve_secret_key(profile, profile_name)?;
        return build_credentials(api_key.clone(), secret.expose_secret());
    }

    // 3. Secret flag with the profile's API key.
    if let Some(ref secret) = global.secret_key {
        let api_key = profile
            .api_key
            .clone()
            .ok_or_else(|| CliError::NoCredentials {
                profile: profile_name.into(),
            })?;
        return build_credentials(api_key, secret);
    }

    // 4. Full shared resolution.
    Ok(inkfly_config::resolve_credentials(profile, profile_name)?)
}

/// Translate a profile + global flags into a `StudioConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn studio_config(
    global: &GlobalOpts,
    profile: Option<&Profile>,
    defaults: &Defaults,
) -> StudioConfig {
    let mut studio = inkfly_config::profile_to_studio_config(profile, defaults);
    if let Some(ref url) = global.api_url {
        studio.api_url.clone_from(url);
    }
    if let Some(ref url) = global.raster_url {
        studio.raster_url.clone_from(url);
    }
    if let Some(secs) = global.timeout {
        studio.timeout_secs = secs;
    }
    studio
}

fn build_credentials(api_key: String, secret: &str) -> Result<Credentials, CliError> {
    Credentials::new(api_key, secret).map_err(|err| CliError::Validation {
        field: "credentials".into(),
        reason: err.to_string(),
    })
}
