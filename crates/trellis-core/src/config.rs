#[must_use]
pub(crate) fn read_raw_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[must_use]
pub(crate) fn parse_enabled_default_true(raw: Option<&str>) -> bool {
    !matches!(
        raw.map(|value| value.trim().to_ascii_lowercase())
            .as_deref(),
        Some("off" | "none" | "0" | "false")
    )
}
