use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::jobs::tests::common::RecordingBackend;
use crate::pages::app::JobBoardApp;
use crate::voice::tests::common::{session_with, RecordingSynthesizer, ScriptedRecognizer};

pub(super) const BOUNDARY: &str = "ability-jobs-boundary";

pub(super) fn app_with(
    backend: Arc<RecordingBackend>,
    synthesizer: Arc<RecordingSynthesizer>,
    recognizer: Arc<ScriptedRecognizer>,
) -> JobBoardApp<RecordingBackend> {
    JobBoardApp::new(backend, session_with(synthesizer, recognizer))
}

pub(super) fn silent_app(backend: Arc<RecordingBackend>) -> JobBoardApp<RecordingBackend> {
    app_with(
        backend,
        Arc::new(RecordingSynthesizer::default()),
        Arc::new(ScriptedRecognizer::default()),
    )
}

pub(super) enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
}

pub(super) fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
