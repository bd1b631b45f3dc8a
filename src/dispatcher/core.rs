use crate::binding::HandlerBindings;
use crate::body::RequestContext;
use crate::error::{BindError, BindingDeclError};
use crate::resolver::Resolver;
use crate::runtime_config::BindConfig;
use crate::typed::BoundArgs;
use http::Method;
use serde::Serialize;
use serde_json::{json, Value};
use smallvec::SmallVec;
use std::any::Any;
use std::collections::HashMap;
use std::io::Read;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Maximum inline response headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 8;

/// Response header storage
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// One request on its way to a handler.
///
/// Owns the request's [`RequestContext`], so the body is read and parsed at
/// most once no matter how many parameters the handler binds.
#[derive(Debug)]
pub struct HandlerRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path
    pub path: String,
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// Per-request body scope
    pub context: RequestContext,
}

impl HandlerRequest {
    pub fn new(
        method: Method,
        path: impl Into<String>,
        handler_name: impl Into<String>,
        context: RequestContext,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            handler_name: handler_name.into(),
            context,
        }
    }
}

/// Response produced by a handler or by the dispatcher itself
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 400, 500, etc.)
    pub status: u16,
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    /// Response body as JSON
    pub body: Value,
}

impl HandlerResponse {
    /// Create a JSON response with default headers
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create an error response
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }

    /// RFC 7807 problem response for a binding failure.
    #[must_use]
    pub fn problem(err: &BindError) -> Self {
        let status = err.status();
        let mut body = json!({
            "type": format!("urn:multibody:{}", err.kind()),
            "title": status.canonical_reason().unwrap_or("Bad Request"),
            "status": status.as_u16(),
            "detail": err.to_string(),
        });
        if let (Some(param), Some(map)) = (err.parameter(), body.as_object_mut()) {
            map.insert("parameter".to_string(), Value::String(param.to_string()));
        }
        let mut resp = Self::json(status.as_u16(), body);
        resp.set_header("content-type", "application/problem+json".to_string());
        resp
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Handler entry point: resolved arguments plus the request they came from.
pub type HandlerFn = Arc<dyn Fn(&BoundArgs, &HandlerRequest) -> HandlerResponse + Send + Sync>;

#[derive(Clone)]
struct RegisteredHandler {
    bindings: HandlerBindings,
    handler: HandlerFn,
}

/// Routes requests to registered handlers after resolving their body parameters.
///
/// Registration happens at startup; afterwards the dispatcher is only read
/// and can be shared across threads behind an `Arc`.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<String, RegisteredHandler>,
    resolver: Resolver,
}

impl Dispatcher {
    /// Create a new empty dispatcher with the default (strict) configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: BindConfig) -> Self {
        Self {
            handlers: HashMap::new(),
            resolver: Resolver::new(config),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Register `handler` under `bindings.handler_name`.
    ///
    /// The declaration is validated first. Registering a name twice replaces
    /// the earlier handler.
    pub fn register<F>(&mut self, bindings: HandlerBindings, handler: F) -> Result<(), BindingDeclError>
    where
        F: Fn(&BoundArgs, &HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
    {
        bindings.validate()?;
        let handler_name = bindings.handler_name.clone();
        let parameters = bindings.parameters.len();

        if self.handlers.remove(&handler_name).is_some() {
            warn!(
                handler_name = %handler_name,
                total_handlers = self.handlers.len(),
                "Replaced existing handler"
            );
        }

        info!(
            handler_name = %handler_name,
            parameters = parameters,
            total_handlers = self.handlers.len() + 1,
            "Handler registered successfully"
        );

        self.handlers.insert(
            handler_name,
            RegisteredHandler {
                bindings,
                handler: Arc::new(handler),
            },
        );
        Ok(())
    }

    /// Binding declaration of a registered handler
    pub fn bindings(&self, handler_name: &str) -> Option<&HandlerBindings> {
        self.handlers.get(handler_name).map(|h| &h.bindings)
    }

    /// Registered handler names, sorted
    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// A request context using this dispatcher's body limits.
    pub fn context<R>(&self, transport: R) -> RequestContext
    where
        R: Read + Send + 'static,
    {
        RequestContext::with_limits(transport, self.resolver.config().body_limits())
    }

    /// Resolve the handler's parameters and run it.
    ///
    /// - unknown handler: 404
    /// - binding failure: problem response with the failure's status
    /// - handler panic: 500
    pub fn dispatch(&self, req: HandlerRequest) -> HandlerResponse {
        debug!(
            handler_name = %req.handler_name,
            available_handlers = self.handlers.len(),
            "Handler lookup"
        );

        let Some(entry) = self.handlers.get(&req.handler_name) else {
            error!(
                handler_name = %req.handler_name,
                available_handlers = ?self.handler_names(),
                "Handler not found"
            );
            return HandlerResponse::error(
                404,
                &format!("No handler registered for '{}'", req.handler_name),
            );
        };

        let start = Instant::now();
        let args = match self.resolver.resolve_all(&entry.bindings, &req.context) {
            Ok(args) => args,
            Err(err) => {
                info!(
                    handler_name = %req.handler_name,
                    method = %req.method,
                    path = %req.path,
                    failure = %err.kind(),
                    error = %err,
                    "Body binding rejected request"
                );
                return HandlerResponse::problem(&err);
            }
        };
        debug!(
            handler_name = %req.handler_name,
            resolved = args.len(),
            resolve_us = start.elapsed().as_micros() as u64,
            "Body parameters resolved"
        );

        let handler = &entry.handler;
        match catch_unwind(AssertUnwindSafe(|| handler(&args, &req))) {
            Ok(resp) => {
                info!(
                    handler_name = %req.handler_name,
                    status = resp.status,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Handler execution complete"
                );
                resp
            }
            Err(panic) => {
                let panic_message = panic_message(panic.as_ref());
                error!(
                    handler_name = %req.handler_name,
                    panic_message = %panic_message,
                    "Handler panicked"
                );
                HandlerResponse::error(500, &format!("Handler panicked: {panic_message}"))
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
