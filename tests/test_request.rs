use harbor::http::request::{ContentLengthError, Method, RequestBuilder};

#[test]
fn test_request_header_retrieval_ignores_case() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("Host", "example.com")
        .header("Content-Type", "application/json")
        .build()
        .unwrap();

    assert_eq!(req.header("host"), Some("example.com"));
    assert_eq!(req.header("HOST"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_builder_defaults_version() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .build()
        .unwrap();

    assert_eq!(req.version, "HTTP/1.1");
    assert!(RequestBuilder::new().path("/").build().is_err());
}

#[test]
fn test_request_user_agent_defaults_to_empty() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/user-agent")
        .build()
        .unwrap();

    assert_eq!(req.user_agent(), "");
}

fn with_length(value: &str) -> harbor::http::request::Request {
    RequestBuilder::new()
        .method(Method::POST)
        .path("/files/x")
        .header("Content-Length", value)
        .build()
        .unwrap()
}

#[test]
fn test_request_content_length_parsing() {
    assert_eq!(with_length("42").content_length(), Ok(42));
    assert_eq!(with_length("0").content_length(), Ok(0));
    assert_eq!(with_length("+7").content_length(), Ok(7));
}

#[test]
fn test_request_content_length_missing() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/files/x")
        .build()
        .unwrap();

    assert_eq!(req.content_length(), Err(ContentLengthError::Missing));
    assert_eq!(with_length("").content_length(), Err(ContentLengthError::Missing));
}

#[test]
fn test_request_content_length_invalid() {
    assert_eq!(
        with_length("not-a-number").content_length(),
        Err(ContentLengthError::Invalid)
    );
    assert_eq!(with_length("-1").content_length(), Err(ContentLengthError::Invalid));
    assert_eq!(with_length("1.5").content_length(), Err(ContentLengthError::Invalid));
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::parse("GET"), Method::GET);
    assert_eq!(Method::parse("POST"), Method::POST);
    assert_eq!(Method::parse("get"), Method::Extension("get".to_string())); // Case-sensitive
    assert_eq!(Method::parse("PUT").as_str(), "PUT");
}
