//! Pure body encoders.
//!
//! Encoding is separate from transport so wire bytes can be asserted in
//! tests, and the multipart boundary is supplied by the caller rather than
//! generated inside the encoder.

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

use crate::error::{ApiResult, ParticleError};
use crate::params::{ParamValue, Params};

/// Content type for URL-form-encoded bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Generate a fresh multipart boundary.
///
/// Unique per request; collision with part contents is made negligible by
/// the 128-bit random token, not by scanning the contents.
#[must_use]
pub fn boundary() -> String {
    format!("particle-{}", Uuid::new_v4().simple())
}

/// Content type for a multipart body using the given boundary.
#[must_use]
pub fn multipart_content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Encode scalar parameters as an `application/x-www-form-urlencoded` body.
///
/// Fails with [`ParticleError::Encoding`] if any value is a file part.
pub fn url_form(params: &Params) -> ApiResult<Bytes> {
    let pairs = query_pairs(params)?;

    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Ok(Bytes::from(body))
}

/// Encode parameters as a `multipart/form-data` body with the given boundary.
///
/// Scalars become simple form fields; file parts carry their filename and
/// any extra part headers. Part order is parameter insertion order.
pub fn multipart(params: &Params, boundary: &str) -> ApiResult<Bytes> {
    let mut body = BytesMut::new();

    for (name, value) in params.iter() {
        body.put_slice(b"--");
        body.put_slice(boundary.as_bytes());
        body.put_slice(b"\r\n");

        match value {
            ParamValue::File(part) => {
                body.put_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{}\"\r\n",
                        part.filename
                    )
                    .as_bytes(),
                );
                for (header, header_value) in &part.headers {
                    body.put_slice(format!("{header}: {header_value}\r\n").as_bytes());
                }
                body.put_slice(b"\r\n");
                body.put_slice(&part.contents);
            }
            ParamValue::Text(text) => put_field(&mut body, name, text),
            ParamValue::Int(n) => put_field(&mut body, name, &n.to_string()),
            ParamValue::Bool(b) => put_field(&mut body, name, &b.to_string()),
        }

        body.put_slice(b"\r\n");
    }

    body.put_slice(b"--");
    body.put_slice(boundary.as_bytes());
    body.put_slice(b"--\r\n");

    Ok(body.freeze())
}

/// Emit one simple form-field part, sans boundary.
fn put_field(body: &mut BytesMut, name: &str, text: &str) {
    body.put_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{text}").as_bytes(),
    );
}

/// Render parameters as stringified key/value pairs for a query string.
///
/// Fails with [`ParticleError::Encoding`] if any value is a file part;
/// GET and DELETE requests never carry files.
pub fn query_pairs(params: &Params) -> ApiResult<Vec<(String, String)>> {
    params
        .iter()
        .map(|(name, value)| {
            value
                .as_scalar()
                .map(|text| (name.to_string(), text))
                .ok_or_else(|| {
                    ParticleError::encoding(format!(
                        "parameter {name:?} is a file part and cannot be form- or query-encoded"
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FilePart;

    #[test]
    fn test_url_form_encoding() {
        let params = Params::new().with("a", "1").with("b", "x y");
        let body = url_form(&params).unwrap();
        assert_eq!(&body[..], b"a=1&b=x%20y");
    }

    #[test]
    fn test_url_form_rejects_file_parts() {
        let params = Params::new().with("file", FilePart::new(&b"data"[..], "f.bin"));
        assert!(matches!(url_form(&params), Err(ParticleError::Encoding(_))));
    }

    #[test]
    fn test_url_form_empty() {
        let body = url_form(&Params::new()).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_multipart_layout() {
        let params = Params::new()
            .with("file_type", "binary")
            .with(
                "file",
                FilePart::new(&b"\x00firmware\xff"[..], "tinker.bin")
                    .with_header("Content-Type", "application/octet-stream"),
            );

        let body = multipart(&params, "BOUNDARY").unwrap();
        let expected: &[u8] = b"--BOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file_type\"\r\n\
            \r\n\
            binary\r\n\
            --BOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"tinker.bin\"\r\n\
            Content-Type: application/octet-stream\r\n\
            \r\n\
            \x00firmware\xff\r\n\
            --BOUNDARY--\r\n";

        assert_eq!(&body[..], expected);
    }

    #[test]
    fn test_multipart_one_part_per_parameter() {
        let params = Params::new().with("a", "1").with("b", "2").with("c", "3");
        let body = multipart(&params, "B").unwrap();
        let text = std::str::from_utf8(&body).unwrap();

        assert_eq!(text.matches("--B\r\n").count(), 3);
        assert!(text.ends_with("--B--\r\n"));
    }

    #[test]
    fn test_boundary_is_unique() {
        assert_ne!(boundary(), boundary());
    }

    #[test]
    fn test_multipart_content_type() {
        assert_eq!(
            multipart_content_type("xyz"),
            "multipart/form-data; boundary=xyz"
        );
    }
}
