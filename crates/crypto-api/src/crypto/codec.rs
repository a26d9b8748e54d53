//! Keyless reversible base64 codec sharing the [`Cipher`] contract.
//!
//! Not a security mechanism. String values are encoded as their raw text, not
//! their JSON literal, so that `"hello"` and the bytes `hello` encode
//! identically and embedded quotes or backslashes survive unescaped;
//! decoding tries JSON first and falls back to a plain string, which lets
//! structured values and plain strings round-trip without a type tag.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use super::{Algorithm, Cipher, CipherError};

/// Base64 over the JSON form of a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Base64Codec {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for Base64Codec {
    fn encrypt(&self, value: &Value) -> Result<String, CipherError> {
        match value {
            Value::String(text) => Ok(STANDARD.encode(text)),
            _ => {
                let json = serde_json::to_vec(value).map_err(CipherError::Serialization)?;
                Ok(STANDARD.encode(json))
            }
        }
    }

    fn decrypt(&self, envelope: &str) -> Result<Value, CipherError> {
        let bytes = STANDARD.decode(envelope).map_err(CipherError::Decode)?;

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned())),
        }
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Base64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_every_value_kind() {
        let codec = Base64Codec::new();
        let values = [
            json!("hello world!"),
            json!(2.75),
            json!(true),
            json!(null),
            json!({"foo": "bar", "num": 42.0}),
            json!(["x", 42.0, true]),
            json!({"contact": {"email": "john@example.com"}}),
            json!(""),
        ];
        for value in values {
            let encoded = codec.encrypt(&value).unwrap();
            assert_eq!(codec.decrypt(&encoded).unwrap(), value, "value: {value}");
        }
    }

    #[test]
    fn strings_are_encoded_without_quotes() {
        let codec = Base64Codec::new();
        assert_eq!(codec.encrypt(&json!("John Doe")).unwrap(), "Sm9obiBEb2U=");
        assert_eq!(codec.encrypt(&json!("hello")).unwrap(), STANDARD.encode("hello"));
    }

    #[test]
    fn strings_with_escapable_characters_round_trip() {
        let codec = Base64Codec::new();
        for text in [r#"say "hi""#, r"C:\temp", "line
break	tab", "日本語"] {
            let value = json!(text);
            let encoded = codec.encrypt(&value).unwrap();
            assert_eq!(STANDARD.decode(&encoded).unwrap(), text.as_bytes());
            assert_eq!(codec.decrypt(&encoded).unwrap(), value, "text: {text}");
        }
    }

    #[test]
    fn numbers_decode_as_numbers() {
        assert_eq!(Base64Codec::new().decrypt("MzA=").unwrap(), json!(30));
    }

    #[test]
    fn objects_decode_as_objects() {
        let encoded =
            "eyJlbWFpbCI6ImpvaG5AZXhhbXBsZS5jb20iLCJwaG9uZSI6IjEyMy00NTYtNzg5MCJ9";
        assert_eq!(
            Base64Codec::new().decrypt(encoded).unwrap(),
            json!({"email": "john@example.com", "phone": "123-456-7890"})
        );
    }

    #[test]
    fn invalid_base64_is_decode_error() {
        assert!(matches!(
            Base64Codec::new().decrypt("not-valid-base64!!"),
            Err(CipherError::Decode(_))
        ));
    }

    #[test]
    fn non_utf8_bytes_decode_lossily() {
        let encoded = STANDARD.encode([0x66, 0x6f, 0xff]);
        assert_eq!(
            Base64Codec::new().decrypt(&encoded).unwrap(),
            json!("fo\u{fffd}")
        );
    }
}
