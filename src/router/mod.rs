//! Request routing.
//!
//! The route table is an ordered list of `(method, matcher, handler)`
//! entries. Lookup checks every exact-path route before any prefix route,
//! each group in registration order, and the first hit wins. The method has
//! to match exactly; a known path requested with another method ends up as
//! 404, the same as an unknown path.
//!
//! ```text
//! GET  /              -> Root
//! GET  /user-agent    -> UserAgent
//! GET  /echo/{msg}    -> Echo
//! GET  /files/{name}  -> FileGet
//! POST /files/{name}  -> FilePost
//! ```

pub mod handlers;

use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::config::Config;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatcher {
    /// The whole path must be equal
    Exact(&'static str),
    /// The path must start with the prefix; the rest is handed to the handler
    Prefix(&'static str),
}

impl PathMatcher {
    /// Matches `path`, returning the part after the matched text.
    pub fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            PathMatcher::Exact(p) => (path == *p).then_some(""),
            PathMatcher::Prefix(p) => path.strip_prefix(p),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, PathMatcher::Exact(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    FileGet,
    FilePost,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub matcher: PathMatcher,
    pub handler: Handler,
}

pub struct Router {
    routes: Vec<Route>,
    config: Arc<Config>,
}

impl Router {
    /// Creates a router with the standard route table.
    pub fn new(config: Arc<Config>) -> Self {
        Self::empty(config)
            .route(Method::GET, PathMatcher::Exact("/"), Handler::Root)
            .route(Method::GET, PathMatcher::Exact("/user-agent"), Handler::UserAgent)
            .route(Method::GET, PathMatcher::Prefix("/echo/"), Handler::Echo)
            .route(Method::GET, PathMatcher::Prefix("/files/"), Handler::FileGet)
            .route(Method::POST, PathMatcher::Prefix("/files/"), Handler::FilePost)
    }

    pub fn empty(config: Arc<Config>) -> Self {
        Self {
            routes: Vec::new(),
            config,
        }
    }

    pub fn route(mut self, method: Method, matcher: PathMatcher, handler: Handler) -> Self {
        self.routes.push(Route {
            method,
            matcher,
            handler,
        });
        self
    }

    /// Finds the handler for `method` and `path`, plus the path remainder
    /// left over by a prefix match.
    pub fn resolve<'a>(&self, method: &Method, path: &'a str) -> Option<(Handler, &'a str)> {
        let exact = self.routes.iter().filter(|r| r.matcher.is_exact());
        let prefix = self.routes.iter().filter(|r| !r.matcher.is_exact());

        exact.chain(prefix).find_map(|route| {
            if route.method != *method {
                return None;
            }
            route
                .matcher
                .matches(path)
                .map(|rest| (route.handler, rest))
        })
    }

    /// Runs the matching handler. `body` is the connection's remaining
    /// input and is only read by handlers that take a request body.
    pub async fn dispatch<R>(&self, req: &Request, body: &mut R) -> Response
    where
        R: AsyncRead + Unpin,
    {
        let Some((handler, rest)) = self.resolve(&req.method, &req.path) else {
            tracing::debug!(method = %req.method, path = %req.path, "No route matched");
            return Response::not_found();
        };

        tracing::debug!(method = %req.method, path = %req.path, ?handler, "Dispatching request");

        let dir = self.config.directory.as_deref();
        match handler {
            Handler::Root => handlers::root(),
            Handler::Echo => handlers::echo(rest, req.accept_encoding()),
            Handler::UserAgent => handlers::user_agent(req),
            Handler::FileGet => handlers::file_get(dir, rest).await,
            Handler::FilePost => handlers::file_post(dir, rest, req, body).await,
        }
    }
}
