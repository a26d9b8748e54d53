//! Canonical JSON encoding for signing.
//!
//! Output is compact JSON with object keys sorted by their UTF-8 bytes at every
//! depth. Every number is read as an IEEE double first: integral values print
//! as plain digits without fraction or exponent, so `30`, `30.0` and `3e1`
//! canonicalize identically. Array order is preserved.
//!
//! Sign and verify must both go through [`canonicalize`]; the AEAD cipher uses
//! plain `serde_json` serialization instead.

use serde_json::{Number, Value};

/// Encode `value` into its canonical byte form. Never fails.
pub fn canonicalize(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_json(out, s),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_json(out, key.as_str());
                out.push(b':');
                write_value(out, item);
            }
            out.push(b'}');
        }
    }
}

fn write_number(out: &mut Vec<u8>, n: &Number) {
    let Some(f) = n.as_f64() else {
        out.extend_from_slice(n.to_string().as_bytes());
        return;
    };
    if f == 0.0 {
        out.push(b'0');
    } else if f.fract() == 0.0 {
        // Positional digits at any magnitude, so `1e19` and
        // `10000000000000000000` meet on the same text.
        out.extend_from_slice(format!("{f:.0}").as_bytes());
    } else {
        write_json(out, &f);
    }
}

fn write_json<T: serde::Serialize + ?Sized>(out: &mut Vec<u8>, value: &T) {
    // Strings and finite floats written into a `Vec` cannot fail.
    let _ = serde_json::to_writer(out, value);
}
