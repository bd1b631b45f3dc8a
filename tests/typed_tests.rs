use multibody::binding::{HandlerBindings, ParameterDescriptor};
use multibody::body::RequestContext;
use multibody::error::{BindError, FailureKind};
use multibody::resolver::Resolver;
use multibody::typed::{extract, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
struct Pojo {
    id: Option<i64>,
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
struct Param {
    id: Option<i64>,
    name: Option<String>,
    pojo: Option<Pojo>,
}

#[test]
fn test_extract_primitives() {
    let ctx = RequestContext::from_body(r#"{"b": "-3", "s": 300, "l": "9000000000", "c": "z"}"#);
    let r = Resolver::default();
    let b: i8 = extract(&r, &ParameterDescriptor::of::<i8>("b"), &ctx).unwrap();
    let s: i16 = extract(&r, &ParameterDescriptor::of::<i16>("s"), &ctx).unwrap();
    let l: i64 = extract(&r, &ParameterDescriptor::of::<i64>("l"), &ctx).unwrap();
    let c: char = extract(&r, &ParameterDescriptor::of::<char>("c"), &ctx).unwrap();
    assert_eq!((b, s, l, c), (-3, 300, 9_000_000_000, 'z'));
}

#[test]
fn test_extract_boxed_integer_by_key() {
    let ctx = RequestContext::from_body(r#"{"id": "12"}"#);
    let d = ParameterDescriptor::of::<Option<i32>>("param").key("id");
    let v: Option<i32> = extract(&Resolver::default(), &d, &ctx).unwrap();
    assert_eq!(v, Some(12));
}

#[test]
fn test_extract_optional_absent() {
    let ctx = RequestContext::from_body(r#"{}"#);
    let d = ParameterDescriptor::of::<Option<bool>>("flag").required(false);
    let v: Option<bool> = extract(&Resolver::default(), &d, &ctx).unwrap();
    assert_eq!(v, None);
}

#[test]
fn test_extract_nested_structured() {
    let ctx = RequestContext::from_body(
        r#"{"param": {"id": 1, "name": "outer", "pojo": {"id": 2, "name": "inner"}}}"#,
    );
    let d = ParameterDescriptor::of::<Json<Param>>("param");
    let Json(p) = extract::<Json<Param>>(&Resolver::default(), &d, &ctx).unwrap();
    assert_eq!(p.pojo.and_then(|inner| inner.name).as_deref(), Some("inner"));
}

#[test]
fn test_extract_vec_of_integers() {
    let ctx = RequestContext::from_body(r#"{"ids": [1, 2, 3]}"#);
    let d = ParameterDescriptor::of::<Json<Vec<i32>>>("ids");
    let ids = extract::<Json<Vec<i32>>>(&Resolver::default(), &d, &ctx).unwrap();
    assert_eq!(ids.into_inner(), vec![1, 2, 3]);
}

#[test]
fn test_required_fallback_reports_missing_nested_object() {
    let ctx = RequestContext::from_body(r#"{"id": 1, "name": "x"}"#);
    let d = ParameterDescriptor::of::<Json<Param>>("param");
    let err = extract::<Json<Param>>(&Resolver::default(), &d, &ctx).unwrap_err();
    assert_eq!(
        err,
        BindError::FieldsIncomplete {
            key: "param".into(),
            type_name: "Param".into(),
            missing: vec!["pojo".into()],
        }
    );
}

#[test]
fn test_descriptor_for_other_type_is_coercion_error() {
    let ctx = RequestContext::from_body(r#"{"n": 1}"#);
    let d = ParameterDescriptor::of::<i32>("n");
    let err = extract::<bool>(&Resolver::default(), &d, &ctx).unwrap_err();
    assert_eq!(err.kind(), FailureKind::CoercionError);
}

#[test]
fn test_bound_args_typed_access() {
    let bindings = HandlerBindings::new("object2")
        .param(ParameterDescriptor::of::<Json<Pojo>>("p").key("param"))
        .param(ParameterDescriptor::of::<Option<i64>>("limit").required(false));
    let ctx = RequestContext::from_body(r#"{"param": {"id": 4, "name": "k"}}"#);
    let args = Resolver::default().resolve_all(&bindings, &ctx).unwrap();

    let Json(p) = args.get::<Json<Pojo>>("p").unwrap();
    assert_eq!(p.id, Some(4));
    assert_eq!(args.get::<Option<i64>>("limit").unwrap(), None);
    assert!(args.raw("limit").is_none());
    assert!(args.contains("limit"));
}
