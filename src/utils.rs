/// Accept server addresses the way people type them: bare hosts get an
/// https:// scheme, trailing slashes are dropped so paths can be appended.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    with_scheme.trim_end_matches('/').to_string()
}
