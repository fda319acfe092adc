use super::fixtures::{self, array_of, elements, field, rob, store_by_delta};
use anyhow::Result;
use deltapack_types::schema::{RecordSchema, Schema, TypeRef};
use deltapack_types::value::{Array, Custom, Record, Value};
use deltapack_types::Error;

#[test]
fn no_default_constructor() -> Result<()> {
    let engine = fixtures::engine()?;

    let data = engine.serialize(&Value::from(Record::new("NoDefaultConstructor").with("x", 1)))?;
    let res = engine.deserialize(&TypeRef::named("NoDefaultConstructor"), &data);
    match res {
        Err(e @ Error::NoDefaultConstructor(_)) => assert_eq!(
            e.to_string(),
            "No default constructor found for type NoDefaultConstructor"
        ),
        other => panic!("{other:?}"),
    }
    Ok(())
}

#[test]
fn unsupported_delta_type() -> Result<()> {
    let engine = fixtures::engine()?;

    let flags = array_of(
        "Flag",
        vec![
            Value::from(Record::new("Flag").with("on", true)),
            Value::from(Record::new("Flag").with("on", false)),
        ],
    );
    let res = engine.serialize(&flags);
    match res {
        Err(Error::UnsupportedDeltaType {
            owner,
            field,
            field_type,
        }) => {
            assert_eq!((owner.as_str(), field.as_str()), ("Flag", "on"));
            assert_eq!(field_type, "bool");
        }
        other => panic!("{other:?}"),
    }

    let data = [0, 0, 0, 1, 0];
    let res = engine.deserialize(&TypeRef::array_of(TypeRef::named("Flag")), &data);
    assert!(matches!(res, Err(Error::UnsupportedDeltaType { .. })), "{res:?}");
    Ok(())
}

#[test]
fn null_root() -> Result<()> {
    let engine = fixtures::engine()?;
    let res = engine.serialize(&Value::Null);
    assert!(matches!(res, Err(Error::NullRoot)), "{res:?}");
    Ok(())
}

#[test]
fn unrecognized_types() -> Result<()> {
    let engine = fixtures::engine()?;

    let res = engine.serialize(&Value::from(Record::new("Stranger").with("x", 1)));
    assert!(matches!(&res, Err(Error::UnrecognizedType(name)) if name == "Stranger"), "{res:?}");

    let res = engine.deserialize(&TypeRef::named("Stranger"), &[0; 16]);
    assert!(matches!(&res, Err(Error::UnrecognizedType(name)) if name == "Stranger"), "{res:?}");

    // A record value under a name registered for a custom codec.
    let res = engine.serialize(&Value::from(Record::new("Shout")));
    assert!(matches!(res, Err(Error::UnrecognizedType(_))), "{res:?}");
    Ok(())
}

#[test]
fn truncated_input() -> Result<()> {
    let engine = fixtures::engine()?;

    let data = engine.serialize(&rob())?;
    for cut in [0, 3, 10, data.len() - 1] {
        let res = engine.deserialize(&TypeRef::named("Person"), &data[..cut]);
        assert!(matches!(res, Err(Error::TruncatedRead(_))), "{cut} {res:?}");
    }

    let rows = array_of("StoreByDelta", vec![store_by_delta("x", 1.5), store_by_delta("y", 2.5)]);
    let data = engine.serialize(&rows)?;
    let ty = TypeRef::array_of(TypeRef::named("StoreByDelta"));
    let res = engine.deserialize(&ty, &data[..data.len() - 2]);
    match res {
        Err(Error::TruncatedRead(what)) => assert!(what.contains("delta field d"), "{what}"),
        other => panic!("{other:?}"),
    }
    Ok(())
}

#[test]
fn type_mismatch() -> Result<()> {
    let engine = fixtures::engine()?;

    let mut wrong = rob();
    if let Some(rec) = wrong.as_record_mut() {
        rec.set("age", 20i64);
    }
    let res = engine.serialize(&wrong);
    match res {
        Err(Error::TypeMismatch {
            at,
            expected,
            found,
        }) => {
            assert_eq!(at, "root.age");
            assert_eq!(expected, "i32");
            assert_eq!(found, "i64");
        }
        other => panic!("{other:?}"),
    }

    let mixed = array_of("StoreByDelta", vec![store_by_delta("x", 1.0), rob()]);
    let res = engine.serialize(&mixed);
    assert!(matches!(res, Err(Error::TypeMismatch { .. })), "{res:?}");

    let bad_delta = array_of(
        "StoreByDelta",
        vec![Value::from(Record::new("StoreByDelta").with("s", "x").with("d", 1.0f32))],
    );
    let res = engine.serialize(&bad_delta);
    match res {
        Err(Error::TypeMismatch { at, .. }) => assert_eq!(at, "root[0].d"),
        other => panic!("{other:?}"),
    }

    let ints = Value::from(Record::new("People").with("ppl", Array::of(TypeRef::I32, [1])));
    let res = engine.serialize(&ints);
    assert!(matches!(res, Err(Error::TypeMismatch { .. })), "{res:?}");
    Ok(())
}

#[test]
fn missing_field() -> Result<()> {
    let engine = fixtures::engine()?;

    let mut nameless = rob();
    if let Some(rec) = nameless.as_record_mut() {
        rec.remove("name");
    }
    let res = engine.serialize(&nameless);
    match res {
        Err(Error::MissingField { owner, field }) => {
            assert_eq!((owner.as_str(), field.as_str()), ("Person", "name"));
        }
        other => panic!("{other:?}"),
    }

    let a = Value::from(Record::new("A").with("b", Value::Null));
    let res = engine.serialize(&a);
    assert!(matches!(res, Err(Error::MissingField { .. })), "{res:?}");

    let no_delta = array_of(
        "StoreByDelta",
        vec![Value::from(Record::new("StoreByDelta").with("s", "x"))],
    );
    let res = engine.serialize(&no_delta);
    assert!(matches!(res, Err(Error::MissingField { .. })), "{res:?}");
    Ok(())
}

#[test]
fn unregistered_custom_value() -> Result<()> {
    let engine = fixtures::engine()?;
    let schema_without_custom = Schema::builder()
        .record(RecordSchema::builder("Only").field("x", TypeRef::I32))
        .build()?;
    let bare = deltapack_engine::Engine::new(schema_without_custom);

    let shout = super::fixtures::Shout::value("hi");
    engine.serialize(&shout)?;
    let res = bare.serialize(&shout);
    assert!(matches!(res, Err(Error::UnrecognizedType(_))), "{res:?}");

    let cust = shout.as_custom().map(Custom::type_name);
    assert_eq!(cust, Some("Shout"));
    Ok(())
}

#[test]
fn invalid_schema() {
    let res = Schema::builder()
        .record(RecordSchema::builder("Dup").field("x", TypeRef::I32))
        .record(RecordSchema::builder("Dup").field("y", TypeRef::I32))
        .build();
    assert!(matches!(res, Err(Error::InvalidSchema(_))), "{res:?}");

    let res = Schema::builder()
        .record(
            RecordSchema::builder("Twice")
                .field("x", TypeRef::I32)
                .transient_field("x", TypeRef::STR),
        )
        .build();
    assert!(matches!(res, Err(Error::InvalidSchema(_))), "{res:?}");
}

#[test]
fn out_of_range_float_scale() -> Result<()> {
    let engine = fixtures::engine()?;
    let ty = TypeRef::array_of(TypeRef::named("StoreByDelta"));

    // One element with an empty s, then the d block: width 1, first value 1, scale.
    let input = |scale: i32| {
        let mut data = vec![0, 0, 0, 1, 0, 0, 0, 0, 1];
        data.extend(1i64.to_be_bytes());
        data.extend(scale.to_be_bytes());
        data
    };

    let tiny = engine.deserialize(&ty, &input(i32::MAX))?;
    assert_eq!(field(&elements(&tiny)[0], &["d"]), &Value::from(0.0));

    for scale in [-400, i32::MIN] {
        let res = engine.deserialize(&ty, &input(scale));
        assert!(matches!(res, Err(Error::Malformed(_))), "{scale} {res:?}");
    }
    Ok(())
}

#[test]
fn malformed_input() -> Result<()> {
    let engine = fixtures::engine()?;

    let negative_len = (-1i32).to_be_bytes();
    let res = engine.deserialize(&TypeRef::array_of(TypeRef::I32), &negative_len);
    assert!(matches!(res, Err(Error::Malformed(_))), "{res:?}");

    let bad_width = [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    let ty = TypeRef::array_of(TypeRef::named("StoreByDeltaTypes"));
    let res = engine.deserialize(&ty, &bad_width);
    assert!(matches!(res, Err(Error::Malformed(_))), "{res:?}");
    Ok(())
}
