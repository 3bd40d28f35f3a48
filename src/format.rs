//! Display helpers shared by the dashboard tables.

/// Human-readable byte count with two decimals, e.g. `1073741824` →
/// `"1.00 GB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{:.2} {}", value, UNITS[exponent])
}

/// Compact count for table cells: values under 1000 verbatim, then one
/// decimal with a K/M/B/T suffix and a trimmed trailing `.0`, e.g.
/// `1500` → `"1.5K"`.
pub fn abbreviate_number(value: u64) -> String {
    const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in SCALES {
        if value as f64 >= scale {
            let text = format!("{:.1}", value as f64 / scale);
            let text = text.strip_suffix(".0").unwrap_or(&text);
            return format!("{text}{suffix}");
        }
    }
    value.to_string()
}

/// Formats an ISO 8601 timestamp as `YYYY-MM-DD HH:MM`. Anything that does
/// not look like a timestamp is passed through untouched.
pub fn format_timestamp(iso: &str) -> String {
    let Some((date, rest)) = iso.split_once('T') else {
        return iso.to_string();
    };
    let time: String = rest.chars().take(5).collect();
    if time.len() == 5 {
        format!("{date} {time}")
    } else {
        date.to_string()
    }
}

/// Syntactic email check: one `@`, a dot-separated domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
