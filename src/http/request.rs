use crate::http::headers::HeaderMap;

/// HTTP request methods.
///
/// Only `GET` and `POST` are routed. Any other token is kept verbatim in
/// `Extension` so it can be logged; it never matches a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// Any other method token, case preserved
    Extension(String),
}

impl Method {
    /// Parses a method token. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use harbor::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Extension("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Extension(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Extension(s) => s,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problem with the `Content-Length` header of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLengthError {
    /// Header absent or empty
    Missing,
    /// Not an integer, or negative
    Invalid,
}

/// Represents the head of a parsed HTTP request.
///
/// The body is not part of it: handlers that accept a body read exactly
/// `Content-Length` bytes from the connection themselves.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The raw request target, still percent-encoded
    pub path: String,
    /// HTTP version, not validated
    pub version: String,
    /// Request headers, names lower-cased
    pub headers: HeaderMap,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HeaderMap,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// The `User-Agent` value, or an empty string.
    pub fn user_agent(&self) -> &str {
        self.header("user-agent").unwrap_or("")
    }

    pub fn accept_encoding(&self) -> Option<&str> {
        self.header("accept-encoding")
    }

    /// Parses the `Content-Length` header for an upload.
    ///
    /// A leading `+` is accepted; a negative value is invalid.
    pub fn content_length(&self) -> Result<u64, ContentLengthError> {
        let raw = match self.header("content-length") {
            Some(v) if !v.is_empty() => v,
            _ => return Err(ContentLengthError::Missing),
        };

        let n: i64 = raw.parse().map_err(|_| ContentLengthError::Invalid)?;
        u64::try_from(n).map_err(|_| ContentLengthError::Invalid)
    }
}
