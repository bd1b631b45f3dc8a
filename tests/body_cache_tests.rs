use multibody::binding::{HandlerBindings, ParameterDescriptor};
use multibody::body::{BodyLimits, RequestContext};
use multibody::error::{BindError, BodyFault};
use multibody::resolver::Resolver;
use multibody::typed::Json;
use serde::{Deserialize, Serialize};
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Reader that counts how many `read` calls reach the underlying bytes.
struct CountingReader {
    inner: Cursor<Vec<u8>>,
    calls: Arc<AtomicUsize>,
}

impl CountingReader {
    fn new(body: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let reader = Self {
            inner: Cursor::new(body.as_bytes().to_vec()),
            calls: Arc::clone(&calls),
        };
        (reader, calls)
    }
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.read(buf)
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct Param {
    id: Option<i64>,
    name: Option<String>,
}

#[test]
fn test_transport_read_once_for_many_parameters() {
    let (reader, calls) = CountingReader::new(r#"{"param1": 1, "param2": true, "param3": 2.5, "id": 3, "name": "n"}"#);
    let ctx = RequestContext::new(reader);
    let bindings = HandlerBindings::new("many")
        .param(ParameterDescriptor::of::<i32>("param1"))
        .param(ParameterDescriptor::of::<bool>("param2"))
        .param(ParameterDescriptor::of::<f64>("param3"))
        .param(ParameterDescriptor::of::<Json<Param>>("param"));

    let resolver = Resolver::default();
    let args = resolver.resolve_all(&bindings, &ctx).unwrap();
    assert_eq!(args.len(), 4);
    let calls_after_first_pass = calls.load(Ordering::SeqCst);

    // A second pass is served from the cache
    resolver.resolve_all(&bindings, &ctx).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), calls_after_first_pass);
    assert_eq!(ctx.transport_reads(), 1);
}

#[test]
fn test_cached_body_text_is_stable() {
    let ctx = RequestContext::from_body(r#"{"a": 1}"#);
    let first = ctx.body().unwrap().to_string();
    ctx.tree().unwrap();
    assert_eq!(ctx.body().unwrap(), first);
}

#[test]
fn test_oversized_body_rejected_for_every_parameter() {
    let limits = BodyLimits {
        max_body_bytes: 8,
        relaxed_json: true,
    };
    let ctx = RequestContext::with_limits(Cursor::new(br#"{"a": 1, "b": 2}"#.to_vec()), limits);
    let resolver = Resolver::default();
    for name in ["a", "b"] {
        let err = resolver
            .resolve(&ParameterDescriptor::of::<i32>(name), &ctx)
            .unwrap_err();
        assert_eq!(err, BindError::MalformedBody(BodyFault::TooLarge { limit: 8 }));
        assert_eq!(err.status(), http::StatusCode::PAYLOAD_TOO_LARGE);
    }
    assert_eq!(ctx.transport_reads(), 1);
}

#[test]
fn test_strict_json_rejects_bare_keys() {
    let limits = BodyLimits {
        max_body_bytes: 1024,
        relaxed_json: false,
    };
    let ctx = RequestContext::with_limits(Cursor::new(b"{id: 7}".to_vec()), limits);
    assert!(matches!(
        ctx.tree(),
        Err(BindError::MalformedBody(BodyFault::Syntax(_)))
    ));
}

#[test]
fn test_context_moves_to_another_thread() {
    let ctx = RequestContext::from_body(r#"{"id": 11}"#);
    let handle = std::thread::spawn(move || {
        Resolver::default()
            .resolve(&ParameterDescriptor::of::<i64>("id"), &ctx)
            .unwrap()
    });
    assert_eq!(
        handle.join().unwrap(),
        Some(multibody::BoundValue::Long(11))
    );
}
