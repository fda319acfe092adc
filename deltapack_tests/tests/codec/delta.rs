use super::fixtures::{self, arr_sbdt, array_of, elements, field, ledger};
use anyhow::Result;
use deltapack_types::schema::TypeRef;
use deltapack_types::value::{Array, Decimal, Record, Value};
use rand::Rng;

#[test]
fn store_by_delta() -> Result<()> {
    let engine = fixtures::engine()?;

    let strs = ["hello", "goodbye", "hmmmm", "what"];
    let dubs = [7.123, 7.125, 7.124, 7.12];
    let arr = strs
        .iter()
        .zip(dubs)
        .map(|(s, d)| fixtures::store_by_delta(s, d))
        .collect::<Vec<_>>();
    let wrapped = Value::from(Record::new("ArrSBD").with(
        "arr",
        Array::new(TypeRef::named("StoreByDelta"), arr.clone()),
    ));

    let data = engine.serialize(&wrapped)?;
    let a = engine.deserialize(&TypeRef::named("ArrSBD"), &data)?;
    let a = elements(field(&a, &["arr"]));
    assert_eq!(a.len(), arr.len());
    for (got, expected) in a.iter().zip(arr.iter()) {
        assert_eq!(field(got, &["s"]), field(expected, &["s"]));
        assert!(field(got, &["d"]).approx_eq(field(expected, &["d"]), 1e-5));
    }

    // Strings first, then one block: width byte, 64-bit 7123, three 3-bit offsets, 32-bit scale.
    let strings_len = 4 + strs.iter().map(|s| 4 + s.len()).sum::<usize>();
    assert_eq!(data.len(), strings_len + (8 + 64 + 3 * 3 + 32 + 7) / 8);
    assert_eq!(data[strings_len], 3);
    Ok(())
}

#[test]
fn store_by_delta_types() -> Result<()> {
    let engine = fixtures::engine()?;

    let vals = [0x7FFFFFFF, 0x7FFFFFEE, 0x7FFFFFEF, 0x7FFFFFDC, 0x7FFFFFBB, 0x7FFFFF00];
    let s = 0x7FFFFFFFFFFFFF00;
    let long_vals = [s, s + 0x10, s + 0x18, s + 0x20, s + 0x30, s + 0x90];
    let value = arr_sbdt(&vals, &long_vals);

    let data = engine.serialize(&value)?;
    let deserialized = engine.deserialize(&TypeRef::named("ArrSBDT"), &data)?;
    let sbdt = elements(field(&deserialized, &["sbdt"]));
    for (i, elem) in sbdt.iter().enumerate() {
        assert_eq!(field(elem, &["a"]), &Value::from(vals[i]));
        assert_eq!(field(elem, &["b"]), &Value::from(long_vals[i]));
    }
    assert_eq!(deserialized, value);

    // Length, then the "a" block and the "b" block share one bit stream.
    // a: offsets down to -0xBB need 9 bits; b: offsets up to 0x60 need 8 bits.
    let a_bits = 8 + 32 + 5 * 9;
    let b_bits = 8 + 64 + 5 * 8;
    assert_eq!(data.len(), 4 + (a_bits + b_bits + 7) / 8);
    Ok(())
}

#[test]
fn store_by_delta_large_offsets() -> Result<()> {
    let engine = fixtures::engine()?;

    let vals = [0, 0x7FFFFFEE, 1, 0x7FFFFFDC, 2, 0x7FFFFF00];
    let s = 0x7FFFFFFFFFFFFF00;
    let long_vals = [s, 5, s + 0x18, 10, s + 0x30, s + 0x90];
    let value = arr_sbdt(&vals, &long_vals);

    let data = engine.serialize(&value)?;
    let deserialized = engine.deserialize(&TypeRef::named("ArrSBDT"), &data)?;
    assert_eq!(deserialized, value);

    // a still fits 32-bit offsets; b falls back to raw 64-bit values.
    let a_bits = 8 + 32 + 5 * 32;
    let b_bits = 8 + 6 * 64;
    assert_eq!(data.len(), 4 + (a_bits + b_bits + 7) / 8);
    assert_eq!(data[4], 32);
    Ok(())
}

#[test]
fn extreme_values() -> Result<()> {
    let engine = fixtures::engine()?;

    let vals = [i32::MIN, i32::MAX, i32::MIN, -1, 0];
    let long_vals = [i64::MAX, i64::MIN, 0, i64::MAX, -1];
    let value = arr_sbdt(&vals, &long_vals);
    let data = engine.serialize(&value)?;
    assert_eq!(engine.deserialize(&TypeRef::named("ArrSBDT"), &data)?, value);

    let single = arr_sbdt(&[-7], &[i64::MIN]);
    let data = engine.serialize(&single)?;
    assert_eq!(engine.deserialize(&TypeRef::named("ArrSBDT"), &data)?, single);
    Ok(())
}

#[test]
fn decimal_narrow_ints_and_f32() -> Result<()> {
    let engine = fixtures::engine()?;

    let rows = vec![
        ledger("open", Decimal::new(10_050, 2), 3, 0.5),
        ledger("fill", Decimal::new(1_005, 1), -2, 0.25),
        ledger("fee", Decimal::new(-12_345, 3), i16::MAX, -1.75),
        ledger("close", Decimal::new(100, 0), i16::MIN, 1e-3),
    ];
    let value = array_of("Ledger", rows);

    let data = engine.serialize(&value)?;
    let ty = TypeRef::array_of(TypeRef::named("Ledger"));
    let deserialized = engine.deserialize(&ty, &data)?;
    // Decimals compare numerically, and f32 values come back through their shortest decimal form.
    assert_eq!(deserialized, value);

    let amounts = elements(&deserialized)
        .iter()
        .map(|row| field(row, &["amount"]).clone())
        .collect::<Vec<_>>();
    assert_eq!(
        amounts,
        [
            Value::from(Decimal::new(100_500, 3)),
            Value::from(Decimal::new(100_500, 3)),
            Value::from(Decimal::new(-12_345, 3)),
            Value::from(Decimal::new(100_000, 3)),
        ]
    );
    Ok(())
}

#[test]
fn random_walk_is_compact() -> Result<()> {
    let engine = fixtures::engine()?;
    let mut rng = rand::thread_rng();

    let len = 2000;
    let mut a = rng.gen_range(-1_000_000..1_000_000);
    let mut b = rng.gen::<i64>() / 2;
    let (vals, long_vals): (Vec<i32>, Vec<i64>) = (0..len)
        .map(|_| {
            a += rng.gen_range(-8..8);
            b += rng.gen_range(-100..100);
            (a, b)
        })
        .unzip();
    let value = arr_sbdt(&vals, &long_vals);

    let data = engine.serialize(&value)?;
    assert_eq!(engine.deserialize(&TypeRef::named("ArrSBDT"), &data)?, value);

    // Steps of at most 8 and 100 need 4-bit and 8-bit offsets instead of 32 and 64 bits per value.
    assert!(data[4] <= 4, "{}", data[4]);
    assert!(data.len() <= 4 + (8 + 32 + len * 4 + 8 + 64 + len * 8 + 7) / 8);
    assert!(data.len() < len * (4 + 8) / 2);
    Ok(())
}

#[test]
fn random_floats_round_trip() -> Result<()> {
    let engine = fixtures::engine()?;
    let mut rng = rand::thread_rng();

    let mut d = 100.0;
    let rows = (0..500)
        .map(|i| {
            d += f64::from(rng.gen_range(-50i32..50)) / 1000.0;
            fixtures::store_by_delta(&format!("row{i}"), d)
        })
        .collect::<Vec<_>>();
    let value = array_of("StoreByDelta", rows);

    let data = engine.serialize(&value)?;
    let ty = TypeRef::array_of(TypeRef::named("StoreByDelta"));
    let deserialized = engine.deserialize(&ty, &data)?;
    assert!(deserialized.approx_eq(&value, 1e-9));
    Ok(())
}
