/// Config sections that `RVW_<SECTION>__<KEY>` env vars map onto.
const SECTIONS: [&str; 4] = ["API", "REVIEW", "AUTH", "GENERAL"];

/// `RVW_` variables read directly rather than through figment.
const STANDALONE: [&str; 3] = ["RVW_API_URL", "RVW_LOG", "RVW_PASSWORD"];

/// Emit warnings for likely mistyped env var keys that figment silently ignores.
pub fn warn_mistyped_env() {
    for warning in collect_mistyped_env_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_mistyped_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut keys = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| !STANDALONE.contains(&key.as_str()))
        .collect::<Vec<_>>();
    keys.sort();

    keys.iter()
        .filter_map(|key| {
            SECTIONS.iter().find_map(|section| {
                let single = format!("RVW_{section}_");
                let double = format!("RVW_{section}__");
                let field = key.strip_prefix(&single)?;
                if key.starts_with(&double) || field.is_empty() {
                    return None;
                }
                Some(format!(
                    "{key} is ignored. Use double underscores between section and key (example: {double}{field})."
                ))
            })
        })
        .collect()
}
