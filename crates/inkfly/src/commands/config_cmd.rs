//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the signing secret.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "cache_ttl_hours = {}", cfg.defaults.cache_ttl_hours);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        if let Some(ref key) = p.api_key {
            let _ = writeln!(out, "api_key = \"{key}\"");
        }
        if p.secret_key.is_some() {
            let _ = writeln!(out, "secret_key = \"****\"");
        }
        if let Some(ref env) = p.secret_key_env {
            let _ = writeln!(out, "secret_key_env = \"{env}\"");
        }
        if let Some(ref url) = p.api_url {
            let _ = writeln!(out, "api_url = \"{url}\"");
        }
        if let Some(ref url) = p.raster_url {
            let _ = writeln!(out, "raster_url = \"{url}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Delegate to the shared config crate's save function.
fn save_config(cfg: &Config) -> Result<(), CliError> {
    config::save_config(cfg)?;
    Ok(())
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("interactive prompt failed: {e}"),
    }
}

/// Build a `ProfileNotFound` error listing what is configured.
fn profile_not_found(name: String, cfg: &Config) -> CliError {
    let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
    available.sort_unstable();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// A profile with every field unset, for `config set` on a fresh name.
fn empty_profile() -> Profile {
    Profile {
        api_key: None,
        secret_key: None,
        secret_key_env: None,
        api_url: None,
        raster_url: None,
        timeout: None,
    }
}

/// Store a secret key in the system keyring under `<profile>/secret-key`.
fn store_in_keyring(profile_name: &str, secret: &str) -> Result<(), CliError> {
    let entry = keyring::Entry::new("inkfly", &format!("{profile_name}/secret-key")).map_err(
        |e| CliError::Validation {
            field: "keyring".into(),
            reason: format!("failed to access keyring: {e}"),
        },
    )?;
    entry.set_password(secret).map_err(|e| CliError::Validation {
        field: "keyring".into(),
        reason: format!("failed to store secret key in keyring: {e}"),
    })?;
    Ok(())
}

/// Offer to store the secret key in the system keyring or keep it in the
/// config file.
///
/// Returns `Some(secret)` if the user chose plaintext, `None` if stored in
/// the keyring.
fn prompt_keyring_storage(secret: &str, profile_name: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "System keyring (recommended)",
        "Plaintext in the config file",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the secret key?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        store_in_keyring(profile_name, secret)?;
        eprintln!("   ✓ Stored in the system keyring");
        Ok(None)
    } else {
        Ok(Some(secret.to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("✨ Setting up inkfly");
            eprintln!("   Writing to {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_key: String = Input::new()
                .with_prompt("API key")
                .interact_text()
                .map_err(prompt_err)?;
            if api_key.is_empty() {
                return Err(CliError::Validation {
                    field: "api_key".into(),
                    reason: "API key cannot be blank".into(),
                });
            }

            // The secret never echoes.
            let secret = rpassword::prompt_password("Secret key: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "secret_key".into(),
                    reason: "secret key cannot be blank".into(),
                });
            }

            let secret_key = prompt_keyring_storage(&secret, &profile_name)?;

            // Merge into any existing config rather than clobbering
            // other profiles.
            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    api_key: Some(api_key),
                    secret_key,
                    secret_key_env: None,
                    api_url: None,
                    raster_url: None,
                    timeout: None,
                },
            );
            cfg.default_profile = Some(profile_name.clone());
            save_config(&cfg)?;

            eprintln!("\n✓ Wrote {}", config_path.display());
            eprintln!("  Default profile: {profile_name}");
            eprintln!("\n  Try: inkfly test");

            Ok(())
        }

        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            // Mask plaintext secrets in every output format, not just
            // the text view.
            for profile in cfg.profiles.values_mut() {
                if profile.secret_key.is_some() {
                    profile.secret_key = Some("****".into());
                }
            }
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();

            // Accept both bare profile fields ("api_url") and full dot
            // paths ("profiles.work.api_url").
            let (profile_name, field) = match key.split('.').collect::<Vec<_>>()[..] {
                [field] => (config::active_profile_name(global, &cfg), field.to_owned()),
                ["profiles", name, field] => (name.to_owned(), field.to_owned()),
                _ => {
                    return Err(CliError::Validation {
                        field: key.clone(),
                        reason: "expected a profile field or profiles.<name>.<field>".into(),
                    });
                }
            };

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(empty_profile);

            match field.as_str() {
                "api_key" | "api-key" => profile.api_key = Some(value),
                "secret_key" | "secret-key" => profile.secret_key = Some(value),
                "secret_key_env" | "secret-key-env" => profile.secret_key_env = Some(value),
                "api_url" | "api-url" => profile.api_url = Some(value),
                "raster_url" | "raster-url" => profile.raster_url = Some(value),
                "timeout" => {
                    profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                        field: "timeout".into(),
                        reason: "expected whole seconds".into(),
                    })?);
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Known keys: api_key, secret_key, \
                             secret_key_env, api_url, raster_url, timeout"
                        ),
                    });
                }
            }

            save_config(&cfg)?;
            eprintln!("✓ {profile_name}.{field} updated");
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured yet. Start with: inkfly config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(name, &cfg));
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ '{name}' is now the default profile");
            Ok(())
        }

        ConfigCommand::SetSecret { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            // A keyring secret for an unconfigured profile would be
            // orphaned; require the profile first.
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(profile_name, &cfg));
            }

            let secret = rpassword::prompt_password("Secret key: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "secret_key".into(),
                    reason: "secret key cannot be blank".into(),
                });
            }

            store_in_keyring(&profile_name, &secret)?;
            eprintln!("✓ Keyring secret updated for profile '{profile_name}'");
            Ok(())
        }
    }
}
