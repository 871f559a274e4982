use std::{
    collections::VecDeque,
    io,
    iter::repeat_with,
    pin::Pin,
    task::{Context, Poll},
};

use futures_lite::{
    io::{Chain, Cursor},
    ready,
    AsyncRead,
    AsyncReadExt,
};

use super::{FieldValue, FormData, FormField};
use crate::Body;

type PartReader = Chain<Chain<Cursor<Vec<u8>>, Body>, &'static [u8]>;

const DEFAULT_FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// A multipart form body.
///
/// Generates a multipart form body as described in [RFC
/// 7578](https://datatracker.ietf.org/doc/html/rfc7578), streaming each field
/// in order. The total length is known only if every field value has a known
/// length.
#[derive(Debug)]
pub struct MultipartBody {
    boundary: String,
    len: Option<u64>,
    parts: VecDeque<PartReader>,
    terminator: Cursor<Vec<u8>>,
}

impl MultipartBody {
    pub(crate) fn new(form: FormData) -> Self {
        Self::with_boundary(form, generate_boundary())
    }

    pub(crate) fn with_boundary<S: Into<String>>(form: FormData, boundary: S) -> Self {
        let boundary = boundary.into();
        let mut len = Some(0u64);
        let mut parts = VecDeque::with_capacity(form.len());

        for field in form {
            let (header, value) = encode_part(field, &boundary);

            len = len
                .zip(value.len())
                .map(|(len, value_len)| len + header.len() as u64 + value_len + 2);

            parts.push_back(Cursor::new(header).chain(value).chain(&b"\r\n"[..]));
        }

        let terminator = Cursor::new(format!("--{}--\r\n", &boundary).into_bytes());
        let len = len.map(|len| len + terminator.get_ref().len() as u64);

        Self {
            boundary,
            len,
            parts,
            terminator,
        }
    }

    /// Get the boundary separating the parts of this body.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Get the value for the `Content-Type` header of a request sending this
    /// body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Get the total size of the body, if known.
    pub fn len(&self) -> Option<u64> {
        self.len
    }
}

impl From<MultipartBody> for Body {
    fn from(form: MultipartBody) -> Self {
        if let Some(len) = form.len {
            Body::from_reader_sized(form, len)
        } else {
            Body::from_reader(form)
        }
    }
}

impl AsyncRead for MultipartBody {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        while let Some(part) = self.parts.front_mut() {
            match ready!(AsyncRead::poll_read(Pin::new(part), cx, buf)) {
                Ok(0) => {
                    // This part has finished being read, discard it and move to
                    // the next one.
                    self.parts.pop_front();
                }
                result => return Poll::Ready(result),
            }
        }

        AsyncRead::poll_read(Pin::new(&mut self.terminator), cx, buf)
    }
}

/// Write the part header for a field and pull out its value.
fn encode_part(field: FormField, boundary: &str) -> (Vec<u8>, Body) {
    let (name, value) = field.into_parts();

    let mut header = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"",
        boundary,
        escape(&name)
    );

    let body = match value {
        FieldValue::Text(text) => {
            header.push_str("\r\n");
            Body::from(text)
        }
        FieldValue::Stream(body) => {
            header.push_str("\r\n");
            body
        }
        FieldValue::File(handle) => {
            let (file_name, content_type, body) = handle.into_parts();

            header.push_str(&format!(
                "; filename=\"{}\"\r\nContent-Type: {}\r\n",
                escape(&file_name),
                content_type.as_deref().unwrap_or(DEFAULT_FILE_CONTENT_TYPE)
            ));

            body
        }
    };

    header.push_str("\r\n");

    (header.into_bytes(), body)
}

/// Percent-encode the characters that cannot appear in a quoted header
/// parameter.
fn escape(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn generate_boundary() -> String {
    repeat_with(fastrand::alphanumeric).take(24).collect()
}
