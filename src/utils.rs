/// Maximum number of entries per recommendation seed list.
pub const MAX_SEEDS: usize = 5;

/// Splits a comma-separated seed list and keeps at most [`MAX_SEEDS`] entries.
///
/// Surrounding whitespace is trimmed and empty entries are dropped, so
/// `"a, ,b,"` yields `["a", "b"]`. `None` and `""` yield an empty list.
pub fn parse_seed_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|seed| !seed.is_empty())
            .take(MAX_SEEDS)
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Masks a credential for logging, keeping only a short prefix and suffix.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    } else {
        "****".to_string()
    }
}
