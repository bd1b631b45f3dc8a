use super::json;
use crate::error::{BindError, BodyFault};
use crate::runtime_config::DEFAULT_MAX_BODY_BYTES;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::{Cursor, Read};
use std::time::Instant;
use tracing::{debug, info};

/// Limits applied when a request body is read and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimits {
    /// Bodies larger than this are rejected as malformed
    pub max_body_bytes: usize,
    /// Accept unquoted object keys
    pub relaxed_json: bool,
}

impl Default for BodyLimits {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            relaxed_json: true,
        }
    }
}

/// Per-request body scope.
///
/// Owns the single-consumption transport and caches both the raw body text
/// and the parsed JSON tree the first time they are needed. Failures are
/// cached too: once the transport read or the parse has failed, every later
/// access for this request observes the same error.
///
/// The context is `Send` so a request can move to the thread handling it,
/// but not `Sync`: it belongs to exactly one request.
pub struct RequestContext {
    transport: RefCell<Option<Box<dyn Read + Send>>>,
    limits: BodyLimits,
    reads: Cell<usize>,
    body: OnceCell<Result<String, BindError>>,
    tree: OnceCell<Result<Value, BindError>>,
}

impl RequestContext {
    /// Context over a transport stream with default limits.
    pub fn new<R>(transport: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::with_limits(transport, BodyLimits::default())
    }

    pub fn with_limits<R>(transport: R, limits: BodyLimits) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            transport: RefCell::new(Some(Box::new(transport))),
            limits,
            reads: Cell::new(0),
            body: OnceCell::new(),
            tree: OnceCell::new(),
        }
    }

    /// Context over an in-memory body.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self::new(Cursor::new(body.into().into_bytes()))
    }

    pub fn limits(&self) -> BodyLimits {
        self.limits
    }

    /// How many times the transport has been read (never more than once).
    pub fn transport_reads(&self) -> usize {
        self.reads.get()
    }

    /// Raw body text, read from the transport on first use.
    pub fn body(&self) -> Result<&str, BindError> {
        self.body
            .get_or_init(|| self.read_transport())
            .as_deref()
            .map_err(Clone::clone)
    }

    /// Parsed JSON tree, built from [`Self::body`] on first use.
    pub fn tree(&self) -> Result<&Value, BindError> {
        self.tree
            .get_or_init(|| {
                let text = self.body()?;
                let parse_start = Instant::now();
                let parsed = json::parse(text, self.limits.relaxed_json);
                let parse_duration_ms = parse_start.elapsed().as_millis() as u64;
                match &parsed {
                    Ok(value) => debug!(
                        parse_duration_ms = parse_duration_ms,
                        body_fields = value.as_object().map(|o| o.len()),
                        relaxed = self.limits.relaxed_json,
                        "JSON body parsed"
                    ),
                    Err(fault) => debug!(
                        parse_duration_ms = parse_duration_ms,
                        error = %fault,
                        "JSON body parse failed"
                    ),
                }
                parsed.map_err(BindError::MalformedBody)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn read_transport(&self) -> Result<String, BindError> {
        let reader = self
            .transport
            .borrow_mut()
            .take()
            .ok_or_else(|| {
                BindError::MalformedBody(BodyFault::Io("body already consumed".into()))
            })?;
        self.reads.set(self.reads.get() + 1);

        let limit = self.limits.max_body_bytes;
        let mut buf = Vec::new();
        reader
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut buf)
            .map_err(|e| BindError::MalformedBody(BodyFault::Io(e.to_string())))?;
        if buf.len() > limit {
            return Err(BindError::MalformedBody(BodyFault::TooLarge { limit }));
        }
        let text =
            String::from_utf8(buf).map_err(|_| BindError::MalformedBody(BodyFault::NotUtf8))?;

        info!(body_size_bytes = text.len(), "Request body read");
        Ok(text)
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("limits", &self.limits)
            .field("transport_reads", &self.reads.get())
            .field("body_cached", &self.body.get().is_some())
            .field("tree_cached", &self.tree.get().is_some())
            .finish()
    }
}
