use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::io::{self, Write};

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

/// Direct access to the outgoing response
///
/// Handlers receive it as `&mut ResponseWriter` and write bytes into it
/// with [`std::io::Write`]. The body is committed by [`ResponseWriter::complete`],
/// which consumes the writer on both the success and the failure path, so
/// the writer can never outlive the request.
///
/// # Example
/// ```
/// use std::io::Write;
/// use hello_mvc::common::ResponseWriter;
///
/// let mut writer = ResponseWriter::new();
/// writer.write_all(b"ok").unwrap();
/// let response = writer.complete::<hello_mvc::HelloMvcError>(Ok(()));
/// assert_eq!(response.status(), 200);
/// ```
#[derive(Debug)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    buffer: Vec<u8>,
    closed: bool,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            buffer: Vec::new(),
            closed: false,
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn set_content_type(&mut self, value: HeaderValue) {
        self.headers.insert(header::CONTENT_TYPE, value);
    }

    /// Bytes written so far
    pub fn written(&self) -> &[u8] {
        &self.buffer
    }

    /// Refuse further writes
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Turn the handler outcome into the final response.
    ///
    /// On `Err` the partially written body is discarded and the error is
    /// rendered instead.
    pub fn complete<E: IntoResponse>(mut self, outcome: Result<(), E>) -> Response {
        self.close();
        match outcome {
            Ok(()) => self.into_response(),
            Err(err) => {
                tracing::debug!(
                    discarded = self.buffer.len(),
                    "Handler failed after writing to the response"
                );
                err.into_response()
            }
        }
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "response writer is closed",
            ));
        }
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl IntoResponse for ResponseWriter {
    fn into_response(mut self) -> Response {
        if !self.headers.contains_key(header::CONTENT_TYPE) {
            self.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(TEXT_PLAIN_UTF_8),
            );
        }
        (self.status, self.headers, Body::from(self.buffer)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HelloMvcError;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn written_bytes_become_the_body() {
        let mut writer = ResponseWriter::new();
        write!(writer, "o").unwrap();
        writer.write_all(b"k").unwrap();
        assert_eq!(writer.written(), b"ok");

        let response = writer.complete::<HelloMvcError>(Ok(()));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[test]
    fn explicit_content_type_and_status_are_kept() {
        let mut writer = ResponseWriter::new();
        writer.set_status(StatusCode::ACCEPTED);
        writer.set_content_type(HeaderValue::from_static("text/csv"));
        writer.write_all(b"a,b").unwrap();
        let response = writer.complete::<HelloMvcError>(Ok(()));
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    }

    #[test]
    fn closed_writer_rejects_writes() {
        let mut writer = ResponseWriter::new();
        writer.close();
        let err = writer.write_all(b"late").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[tokio::test]
    async fn failure_discards_partial_output() {
        let mut writer = ResponseWriter::new();
        writer.write_all(b"partial").unwrap();
        let failure = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        let response = writer.complete(Err(HelloMvcError::from(failure)));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!body.windows(7).any(|w| w == b"partial"));
    }
}
