use std::path::Path;

use docchat_engine::{decode_response, is_indexable, FailureKind, QueryResponse, UploadResponse};

#[test]
fn decodes_expected_fields_and_ignores_extras() {
    let upload: UploadResponse =
        decode_response(br#"{"status": "success", "documents_added": 0, "extra": true}"#, "documents_added")
            .unwrap();
    assert_eq!(upload.documents_added, 0);

    let query: QueryResponse = decode_response(
        br#"{"answer": "answer not found, try some other question"}"#,
        "answer",
    )
    .unwrap();
    assert_eq!(query.answer, "answer not found, try some other question");
    assert_eq!(query.query, None);
}

#[test]
fn missing_field_is_malformed() {
    let err = decode_response::<UploadResponse>(br#"{"status": "success"}"#, "documents_added")
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert!(err.message.contains("documents_added"));
}

#[test]
fn error_field_is_reported_as_backend_error() {
    let err = decode_response::<QueryResponse>(br#"{"error": "No documents uploaded yet."}"#, "answer")
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Backend);
    assert_eq!(err.message, "No documents uploaded yet.");
}

#[test]
fn non_json_and_non_object_bodies_are_malformed() {
    for body in [&b""[..], b"null", b"[1, 2]", b"Internal Server Error"] {
        let err = decode_response::<QueryResponse>(body, "answer").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse, "body {body:?}");
    }
}

#[test]
fn indexable_extensions_are_case_insensitive() {
    assert!(is_indexable(Path::new("report.PDF")));
    assert!(is_indexable(Path::new("slides.pptx")));
    assert!(is_indexable(Path::new("dir/notes.txt")));
    assert!(!is_indexable(Path::new("image.png")));
    assert!(!is_indexable(Path::new("README")));
}
