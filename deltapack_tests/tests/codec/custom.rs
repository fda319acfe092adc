use super::fixtures::{self, elements, field, Shout};
use anyhow::Result;
use deltapack_types::schema::TypeRef;
use deltapack_types::value::{Array, Record, Value};

fn shout(value: &Value) -> Option<&str> {
    value
        .as_custom()
        .and_then(|cust| cust.downcast_ref::<Shout>())
        .map(|shout| shout.s.as_str())
}

#[test]
fn custom_codec_owns_its_bytes() -> Result<()> {
    let engine = fixtures::engine()?;

    let data = engine.serialize(&Shout::value("hello world"))?;
    assert_eq!(&data[..4], &[0, 0, 0, 11]);
    assert_eq!(&data[4..], b"hello world");

    let cs = engine.deserialize(&TypeRef::named("Shout"), &data)?;
    assert_eq!(shout(&cs), Some("HELLO WORLD"));
    Ok(())
}

#[test]
fn custom_codec_inside_records_and_arrays() -> Result<()> {
    let engine = fixtures::engine()?;

    let acs = Value::from(
        Record::new("AShout").with("a", Shout::value("hello")).with(
            "b",
            Array::new(
                TypeRef::named("Shout"),
                vec![Shout::value("what"), Shout::value("hmmm")],
            ),
        ),
    );
    let data = engine.serialize(&acs)?;
    let deserialized = engine.deserialize(&TypeRef::named("AShout"), &data)?;

    assert_eq!(shout(field(&deserialized, &["a"])), Some("HELLO"));
    let b = elements(field(&deserialized, &["b"]));
    assert_eq!(shout(&b[0]), Some("WHAT"));
    assert_eq!(shout(&b[1]), Some("HMMM"));
    Ok(())
}
