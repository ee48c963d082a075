//! Byte size parsing and formatting.

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Parse a size such as `512`, `64KB`, `256MB` or `2GB` into bytes.
///
/// Suffixes are case-insensitive, binary (1 KB = 1024 bytes), and may be
/// separated from the number by whitespace. Returns `None` for malformed
/// input or overflow.
pub fn parse_size(input: &str) -> Option<u64> {
    let s = input.trim().to_uppercase();
    let (number, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, GB)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, MB)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, KB)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };

    number.trim().parse::<u64>().ok()?.checked_mul(multiplier)
}

/// Format a byte count with the largest fitting binary unit.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_size("1024"), Some(1024));
    }

    #[test]
    fn test_parse_suffixes() {
        assert_eq!(parse_size("64KB"), Some(64 * 1024));
        assert_eq!(parse_size("256MB"), Some(256 * 1024 * 1024));
        assert_eq!(parse_size("2GB"), Some(2 * 1024 * 1024 * 1024));
        assert_eq!(parse_size("10B"), Some(10));
    }

    #[test]
    fn test_parse_lowercase_and_whitespace() {
        assert_eq!(parse_size(" 16 mb "), Some(16 * 1024 * 1024));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("lots"), None);
        assert_eq!(parse_size("-1MB"), None);
        assert_eq!(parse_size("99999999999999999999GB"), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(256 * 1024 * 1024), "256.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
