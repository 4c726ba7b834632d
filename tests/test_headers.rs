use harbor::http::headers::{HeaderMap, fold_values};

#[test]
fn test_fold_values_joins_non_empty() {
    assert_eq!(fold_values("gzip", "br"), "gzip, br");
}

#[test]
fn test_fold_values_non_empty_side_wins() {
    assert_eq!(fold_values("", "br"), "br");
    assert_eq!(fold_values("gzip", ""), "gzip");
    assert_eq!(fold_values("", ""), "");
}

#[test]
fn test_header_map_folds_case_insensitive_duplicates() {
    let mut headers = HeaderMap::new();
    headers.insert("X-Tag", "one");
    headers.insert("x-tag", "two");
    headers.insert("X-TAG", "three");

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("x-tag"), Some("one, two, three"));
}

#[test]
fn test_header_map_stores_lowercase_names() {
    let headers: HeaderMap = [("User-Agent", "foo/1.0"), ("Host", "h")].into_iter().collect();

    let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["user-agent", "host"]);
    assert_eq!(headers.get("USER-AGENT"), Some("foo/1.0"));
    assert!(headers.contains("host"));
    assert!(!headers.contains("accept"));
}

#[test]
fn test_header_map_empty() {
    let headers = HeaderMap::new();
    assert!(headers.is_empty());
    assert_eq!(headers.get("anything"), None);
}
