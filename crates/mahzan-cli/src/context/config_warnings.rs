use mahzan_config::MahzanConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &MahzanConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &MahzanConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.gateway.is_configured() && has_env_prefix(&env_keys, "MAHZAN_GATEWAY") {
        warnings.push(
            "Gateway config appears default while MAHZAN_GATEWAY* env vars exist. Use double underscores (example: MAHZAN_GATEWAY__URL)."
                .to_string(),
        );
    }

    if !config.provider.is_configured() && has_env_prefix(&env_keys, "MAHZAN_PROVIDER") {
        warnings.push(
            "Provider config appears default while MAHZAN_PROVIDER* env vars exist. Use double underscores (example: MAHZAN_PROVIDER__ANON_KEY)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use mahzan_config::MahzanConfig;
    use pretty_assertions::assert_eq;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_unconfigured_sections_with_env_prefixes() {
        let config = MahzanConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                (
                    "MAHZAN_GATEWAY_URL".to_string(),
                    "libsql://demo".to_string(),
                ),
                (
                    "MAHZAN_PROVIDER_ANON_KEY".to_string(),
                    "anon".to_string(),
                ),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn silent_when_no_matching_env_vars_exist() {
        let config = MahzanConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![("PATH".to_string(), "/usr/bin".to_string())],
        );

        assert!(warnings.is_empty());
    }
}
