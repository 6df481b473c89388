//! The Windows-shortcut `.url` companion format (spec.md §4.C, §6).

/// Parse the `URL=` line out of an `[InternetShortcut]` section. Returns
/// `None` if the section or key is absent — never errors.
pub fn parse_url_shortcut(content: &str) -> Option<String> {
    let mut in_section = false;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("[InternetShortcut]") {
            in_section = true;
            continue;
        }
        if trimmed.starts_with('[') {
            in_section = false;
            continue;
        }
        if in_section {
            if let Some(value) = trimmed.strip_prefix("URL=") {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Render the ASCII `.ini`-shaped companion file content for `url`.
pub fn render_url_shortcut(url: &str) -> String {
    format!("[InternetShortcut]\nURL={url}\n")
}
