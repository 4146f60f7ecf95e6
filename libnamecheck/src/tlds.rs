pub const DEFAULT_TLDS: &[&str] = &["com", "io", "org", "dev", "ai"];

pub fn default_tlds() -> Vec<String> {
    DEFAULT_TLDS.iter().map(|t| t.to_string()).collect()
}

/// Splits a comma-separated TLD list, trimming whitespace and any leading dot.
/// Order and duplicates are kept as given.
pub fn parse_tld_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim().trim_start_matches('.').trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn domain_name(name: &str, tld: &str) -> String {
    format!("{}.{}", name, tld)
}
