//! CLI-side config resolution: profile selection and flag overrides on top
//! of `netdex-config`.

use std::time::Duration;

pub use netdex_config::{Config, Profile, config_path, load_config_or_default, save_config};
use netdex_core::{ServerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name selected by `--profile`, else the configured default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.profile_name(global.profile.as_deref()).to_owned()
}

/// Comma-separated profile names, for error help text.
pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build a `ServerConfig` from the config file, profile, and CLI overrides.
///
/// Without a matching profile, `--server` alone is enough. An explicitly
/// requested profile that doesn't exist is an error.
pub fn resolve_server_config(global: &GlobalOpts, cfg: &Config) -> Result<ServerConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut server = match cfg.profiles.get(&profile_name) {
        Some(profile) => netdex_config::profile_to_server_config(profile, &cfg.defaults)?,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            let raw = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            let mut server = ServerConfig::new(parse_url(raw)?);
            server.timeout = Duration::from_secs(cfg.defaults.timeout);
            if cfg.defaults.insecure {
                server.tls = TlsVerification::DangerAcceptInvalid;
            }
            server
        }
    };

    if let Some(ref raw) = global.server {
        server.url = parse_url(raw)?;
    }
    if global.insecure {
        server.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        server.timeout = Duration::from_secs(secs);
    }

    Ok(server)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use netdex_config::Defaults;
    use std::collections::BTreeMap;

    fn global() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            server: None,
            output: OutputFormat::Table,
            verbose: 0,
            quiet: false,
            insecure: false,
            timeout: None,
        }
    }

    fn config_with_home() -> Config {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "home".to_owned(),
            Profile {
                server: "http://inventory.lan:8000".into(),
                ca_cert: None,
                insecure: None,
                timeout: Some(5),
            },
        );
        Config {
            default_profile: Some("home".into()),
            defaults: Defaults::default(),
            profiles,
        }
    }

    #[test]
    fn flags_override_profile() {
        let mut opts = global();
        opts.insecure = true;
        opts.timeout = Some(90);

        let server = resolve_server_config(&opts, &config_with_home()).unwrap();

        assert_eq!(server.url.host_str(), Some("inventory.lan"));
        assert_eq!(server.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(server.timeout, Duration::from_secs(90));
    }

    #[test]
    fn server_flag_works_without_profiles() {
        let mut opts = global();
        opts.server = Some("http://127.0.0.1:9000".into());

        let server = resolve_server_config(&opts, &Config::default()).unwrap();

        assert_eq!(server.url.port(), Some(9000));
        assert_eq!(server.timeout, Duration::from_secs(30));
    }

    #[test]
    fn nothing_configured_is_no_config() {
        let err = resolve_server_config(&global(), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_explicit_profile_is_reported() {
        let mut opts = global();
        opts.profile = Some("office".into());

        let err = resolve_server_config(&opts, &config_with_home()).unwrap_err();

        assert!(
            matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "home")
        );
    }
}
