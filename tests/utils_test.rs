use sporldash::utils::*;

#[test]
fn test_parse_seed_list_basic() {
    let seeds = parse_seed_list(Some("a,b,c"));
    assert_eq!(seeds, vec!["a", "b", "c"]);
}

#[test]
fn test_parse_seed_list_truncates_to_max() {
    let seeds = parse_seed_list(Some("1,2,3,4,5,6,7"));

    assert_eq!(seeds.len(), MAX_SEEDS);
    assert_eq!(seeds, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_parse_seed_list_absent_or_empty() {
    assert!(parse_seed_list(None).is_empty());
    assert!(parse_seed_list(Some("")).is_empty());
    assert!(parse_seed_list(Some(" , ,")).is_empty());
}

#[test]
fn test_parse_seed_list_trims_and_skips_blanks() {
    let seeds = parse_seed_list(Some(" rock , ,jazz,"));
    assert_eq!(seeds, vec!["rock", "jazz"]);
}

#[test]
fn test_parse_seed_list_blanks_do_not_count_towards_limit() {
    let seeds = parse_seed_list(Some(",a,,b,,c,,d,,e,,f"));
    assert_eq!(seeds, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_mask_token_keeps_prefix_and_suffix() {
    let masked = mask_token("BQD1234567890xyz");

    assert!(masked.starts_with("BQD1"));
    assert!(masked.ends_with("0xyz"));
    assert!(!masked.contains("567"));
}

#[test]
fn test_mask_token_short_values_fully_hidden() {
    assert_eq!(mask_token(""), "****");
    assert_eq!(mask_token("abc"), "****");
    assert_eq!(mask_token("12345678"), "****");
}
