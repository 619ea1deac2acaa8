use super::*;

#[test]
fn forever_is_unbounded() {
    assert_eq!(transform_lifetime("forever"), None);
}

#[test]
fn numeric_lifetimes_keep_their_value() {
    assert_eq!(transform_lifetime("1"), Some(1));
    assert_eq!(transform_lifetime("7"), Some(7));
    assert_eq!(transform_lifetime("30"), Some(30));
    assert_eq!(transform_lifetime("365"), Some(365));
    assert_eq!(transform_lifetime("0"), Some(0));
}

#[test]
fn unparseable_lifetime_defaults_to_thirty_days() {
    assert_eq!(transform_lifetime("garbage"), Some(30));
    assert_eq!(transform_lifetime(""), Some(30));
    assert_eq!(transform_lifetime("Forever"), Some(30));
}

#[test]
fn lifetime_reads_leading_digits() {
    assert_eq!(transform_lifetime("7days"), Some(7));
    assert_eq!(transform_lifetime("  14 "), Some(14));
    assert_eq!(transform_lifetime("-2"), Some(-2));
}

#[test]
fn length_defaults_for_non_positive_or_garbage() {
    assert_eq!(transform_length("0"), 6);
    assert_eq!(transform_length("-3"), 6);
    assert_eq!(transform_length("abc"), 6);
    assert_eq!(transform_length(""), 6);
    assert_eq!(transform_length("99999999999"), 6);
}

#[test]
fn length_keeps_positive_values() {
    assert_eq!(transform_length("4"), 4);
    assert_eq!(transform_length("8"), 8);
    assert_eq!(transform_length("4.5"), 4);
}

#[test]
fn extracts_single_segment_codes() {
    assert_eq!(extract_code("https://turl.co/abc123").unwrap(), "abc123");
    assert_eq!(extract_code("http://localhost:8010/3B1XYz").unwrap(), "3B1XYz");
}

#[test]
fn extracts_last_segment_of_nested_paths() {
    assert_eq!(
        extract_code("http://localhost:8010/d/3B1XYz").unwrap(),
        "3B1XYz"
    );
    assert_eq!(extract_code("https://go.example.org/x/y/Zz9/").unwrap(), "Zz9");
    assert_eq!(
        extract_code("  https://turl.co/abc123?utm=1#top  ").unwrap(),
        "abc123"
    );
}

#[test]
fn same_code_regardless_of_host_or_scheme() {
    let urls = [
        "https://turl.co/Ab12Cd",
        "http://localhost:8010/Ab12Cd",
        "https://links.custom-domain.io/d/Ab12Cd",
        "ftp://example.com/Ab12Cd",
    ];
    for url in urls {
        assert_eq!(extract_code(url).unwrap(), "Ab12Cd", "{url}");
    }
}

#[test]
fn rejects_empty_input() {
    assert_eq!(
        extract_code(""),
        Err(ClientError::InvalidUrlFormat(String::new()))
    );
    assert!(matches!(
        extract_code("   "),
        Err(ClientError::InvalidUrlFormat(_))
    ));
}

#[test]
fn rejects_non_urls() {
    assert_eq!(
        extract_code("not a url"),
        Err(ClientError::InvalidUrlFormat("not a url".to_string()))
    );
    assert!(matches!(
        extract_code("turl.co/abc123"),
        Err(ClientError::InvalidUrlFormat(_))
    ));
}

#[test]
fn rejects_urls_without_path_segments() {
    assert!(matches!(
        extract_code("https://turl.co"),
        Err(ClientError::InvalidUrlFormat(_))
    ));
    assert!(matches!(
        extract_code("https://turl.co//"),
        Err(ClientError::InvalidUrlFormat(_))
    ));
    assert!(matches!(
        extract_code("mailto:someone@example.com"),
        Err(ClientError::InvalidUrlFormat(_))
    ));
}
