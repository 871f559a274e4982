use futures_lite::{future::block_on, io::AsyncReadExt};
use http::Method;
use serde_json::json;
use test_case::test_case;
use wpcom_media::{
    build_form_data, AttributedMedia, Body, FieldValue, FileHandle, FormDataBuilder, MediaList,
    MediaSource, Passthrough, Query, RequestParams,
};

mod utils;

fn read_to_string(value: FieldValue) -> String {
    let mut body = match value {
        FieldValue::Text(text) => Body::from(text),
        FieldValue::Stream(body) => body,
        FieldValue::File(handle) => handle.into_body(),
    };

    block_on(async {
        let mut buf = String::new();
        body.read_to_string(&mut buf).await.unwrap();
        buf
    })
}

#[test_case(MediaSource::value("12345") ; "opaque value")]
#[test_case(MediaSource::value("") ; "empty value")]
fn non_file_input_is_single_media_field(source: MediaSource) {
    let expected = match &source {
        MediaSource::Value(value) => value.clone(),
        _ => unreachable!(),
    };

    let form = build_form_data(source);

    assert_eq!(form.len(), 1);
    assert_eq!(form.fields()[0].name(), "media[]");
    assert_eq!(form.fields()[0].value().as_text(), Some(expected.as_str()));
}

#[cfg(feature = "fs")]
#[test]
fn two_files_from_disk_preserve_order() {
    utils::logging();

    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, "first").unwrap();
    std::fs::write(&b, "second").unwrap();

    let form = build_form_data(vec![
        AttributedMedia::new(a.to_str().unwrap()).attr("title", "A"),
        AttributedMedia::new(b.to_str().unwrap()),
    ]);

    let names: Vec<_> = form.names().collect();
    assert_eq!(names, ["attrs[0][title]", "media[]", "media[]"]);

    let values: Vec<_> = form
        .into_iter()
        .map(|field| {
            let (_, value) = field.into_parts();
            assert!(value.is_stream() || value.as_text().is_some());
            read_to_string(value)
        })
        .collect();

    assert_eq!(values, ["A", "first", "second"]);
}

#[test]
fn json_input_matches_typed_input() {
    let from_json = MediaList::try_from(json!([
        {"file": "a.txt", "title": "A"},
        {"file": "b.txt"},
    ]))
    .unwrap();

    let builder = FormDataBuilder::new().resolver(Passthrough);
    let form = builder.build(from_json);

    let pairs: Vec<_> = form
        .fields()
        .iter()
        .map(|field| (field.name(), field.value().as_text()))
        .collect();

    assert_eq!(
        pairs,
        [
            ("attrs[0][title]", Some("A")),
            ("media[]", Some("a.txt")),
            ("media[]", Some("b.txt")),
        ]
    );
}

#[test]
fn upload_request_end_to_end() {
    let mut params = RequestParams::new("/sites/42/media/new").form_data(build_form_data(vec![
        MediaSource::from(
            AttributedMedia::new(FileHandle::new("a.txt", "first").content_type("text/plain"))
                .attr("title", "A"),
        ),
    ]));
    params.boundary = Some("boundary".into());

    let mut request = params
        .to_request(
            Method::POST,
            "https://public-api.wordpress.com/rest/v1.1",
            &Query::new().param("http_envelope", "1"),
            None,
        )
        .unwrap();

    assert_eq!(
        request.uri(),
        "https://public-api.wordpress.com/rest/v1.1/sites/42/media/new?http_envelope=1"
    );

    let expected = "\
        --boundary\r\n\
        Content-Disposition: form-data; name=\"attrs[0][title]\"\r\n\
        \r\n\
        A\r\n\
        --boundary\r\n\
        Content-Disposition: form-data; name=\"media[]\"; filename=\"a.txt\"\r\n\
        Content-Type: text/plain\r\n\
        \r\n\
        first\r\n\
        --boundary--\r\n\
    ";

    assert_eq!(request.body().len(), Some(expected.len() as u64));

    let body = block_on(async {
        let mut buf = String::new();
        request.body_mut().read_to_string(&mut buf).await.unwrap();
        buf
    });

    assert_eq!(body, expected);
}

#[cfg(feature = "fs")]
#[test]
fn missing_file_surfaces_when_read() {
    let form = build_form_data("/no/such/dir/missing.jpg");
    let mut body = Body::from(form.into_multipart());

    let result = block_on(async {
        let mut buf = Vec::new();
        body.read_to_end(&mut buf).await
    });

    assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::NotFound);
}
