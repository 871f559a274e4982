use serde_json::{json, Value};
use std::sync::Mutex;
use test_case::test_case;
use wpcom_media::{
    AttributedMedia, Body, Dispatcher, FileHandle, Media, MediaConfig, MediaSource, Passthrough,
    Query, RequestParams, UrlMedia,
};

mod utils;

use utils::Recorder;

fn media(recorder: &Recorder) -> Media<&Recorder> {
    utils::logging();

    let config = MediaConfig::builder().resolver(Passthrough).build();

    Media::with_config("7", "42", recorder, config)
}

#[test]
fn get_defaults_api_version() {
    let recorder = Recorder::default();

    media(&recorder).get(());

    let call = recorder.single();
    assert_eq!(call.method, "GET");
    assert_eq!(call.path, "/sites/42/media/7");
    assert_eq!(call.query.get("apiVersion"), Some("1.2"));
}

#[test]
fn get_keeps_explicit_api_version() {
    let recorder = Recorder::default();

    media(&recorder).get(Query::new().param("apiVersion", "1.1").param("fields", "ID"));

    let call = recorder.single();
    assert_eq!(call.query.get("apiVersion"), Some("1.1"));
    assert_eq!(call.query.get("fields"), Some("ID"));
}

#[test]
fn empty_api_version_is_replaced() {
    let recorder = Recorder::default();

    media(&recorder).get([("apiVersion", "")]);

    assert_eq!(recorder.single().query.get("apiVersion"), Some("1.2"));
}

#[test]
fn configured_api_version() {
    let recorder = Recorder::default();
    let config = MediaConfig::builder().api_version("2").build();

    Media::with_config("7", "42", &recorder, config).get(());

    assert_eq!(recorder.single().query.get("apiVersion"), Some("2"));
}

#[test]
fn update_sends_json_body() {
    let recorder = Recorder::default();

    media(&recorder).update([("context", "edit")], json!({"title": "New title"}));

    let call = recorder.single();
    assert_eq!(call.method, "PUT");
    assert_eq!(call.path, "/sites/42/media/7");
    assert_eq!(call.query.get("context"), Some("edit"));
    assert_eq!(call.body, Some(json!({"title": "New title"})));
    assert!(call.form.is_none());
}

#[test_case(json!(null) ; "null")]
#[test_case(json!(false) ; "false")]
#[test_case(json!(0) ; "zero")]
#[test_case(json!("") ; "empty string")]
fn edit_without_media_sends_json_body(media_value: Value) {
    let recorder = Recorder::default();
    let body = json!({"title": "t", "media": media_value});

    media(&recorder).edit((), body.clone());

    let call = recorder.single();
    assert_eq!(call.path, "/sites/42/media/7/edit");
    assert_eq!(call.body, Some(body));
    assert!(call.form.is_none());
}

#[test]
fn edit_with_numeric_media_sends_text_field() {
    let recorder = Recorder::default();

    media(&recorder).edit((), json!({"media": 12, "title": "t"}));

    let call = recorder.single();
    assert_eq!(call.body, None);
    assert_eq!(
        call.text_fields(),
        [("media", Some("12")), ("attrs[title]", Some("t"))]
    );
}

#[test]
fn edit_with_media_sends_form() {
    let recorder = Recorder::default();

    media(&recorder).edit((), json!({
        "title": "Sunset",
        "media": "/tmp/sunset.jpg",
        "width": 640,
    }));

    let call = recorder.single();
    assert_eq!(call.method, "PUT");
    assert_eq!(call.path, "/sites/42/media/7/edit");
    assert_eq!(call.body, None);
    assert_eq!(
        call.text_fields(),
        [
            ("media", Some("/tmp/sunset.jpg")),
            ("attrs[title]", Some("Sunset")),
            ("attrs[width]", Some("640")),
        ]
    );
}

#[test]
fn edit_media_with_file_handle() {
    let recorder = Recorder::default();

    media(&recorder).edit_media(
        (),
        FileHandle::new("new.png", "png bytes"),
        [("caption", "Fresh")],
    );

    let call = recorder.single();
    assert_eq!(call.field_names(), ["media", "attrs[caption]"]);

    let form = call.form.unwrap();
    assert_eq!(form.fields()[0].value().file_name(), Some("new.png"));
}

#[test]
fn add_files_builds_form() {
    let recorder = Recorder::default();

    media(&recorder).add_files(
        (),
        vec![
            AttributedMedia::new("a.txt").attr("title", "A"),
            AttributedMedia::new("b.txt"),
        ],
    );

    let call = recorder.single();
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, "/sites/42/media/new");
    assert_eq!(call.body, None);
    assert_eq!(
        call.text_fields(),
        [
            ("attrs[0][title]", Some("A")),
            ("media[]", Some("a.txt")),
            ("media[]", Some("b.txt")),
        ]
    );
}

#[test]
fn add_files_with_single_stream() {
    let recorder = Recorder::default();

    media(&recorder).add_files(Query::new(), Body::from("bytes"));

    let call = recorder.single();
    assert_eq!(call.field_names(), ["media[]"]);
    assert!(call.form.unwrap().fields()[0].value().is_stream());
}

#[test]
fn add_urls_with_mixed_input() {
    let recorder = Recorder::default();

    media(&recorder).add_urls(
        (),
        vec![
            UrlMedia::new("http://x"),
            UrlMedia::new("http://y").attr("caption", "c"),
        ],
    );

    let call = recorder.single();
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, "/sites/42/media/new");
    assert!(call.form.is_none());
    assert_eq!(
        call.body,
        Some(json!({
            "media_urls": ["http://x", "http://y"],
            "attrs": [null, {"caption": "c"}],
        }))
    );
}

#[test]
fn add_single_url() {
    let recorder = Recorder::default();

    media(&recorder).add_urls((), "http://x");

    assert_eq!(recorder.single().body, Some(json!({"media_urls": ["http://x"]})));
}

#[test_case(true ; "delete")]
#[test_case(false ; "del alias")]
fn delete_request(use_alias: bool) {
    let recorder = Recorder::default();
    let media = media(&recorder);

    if use_alias {
        media.del(());
    } else {
        media.delete(());
    }

    let call = recorder.single();
    assert_eq!(call.method, "DELETE");
    assert_eq!(call.path, "/sites/42/media/7/delete");
    assert!(call.query.is_empty());
}

#[test]
fn boundary_is_passed_to_dispatcher() {
    struct Boundary<'a>(&'a Mutex<Option<String>>);

    impl Dispatcher for Boundary<'_> {
        type Output = ();

        fn get(&self, _: &str, _: Query) {}

        fn put(&self, _: RequestParams, _: Query, _: Option<Value>) {}

        fn post(&self, params: RequestParams, _: Query, _: Option<Value>) {
            *self.0.lock().unwrap() = params.boundary;
        }

        fn del(&self, _: &str, _: Query) {}
    }

    let seen = Mutex::new(None);
    let config = MediaConfig::builder().boundary("fixed").build();

    Media::with_config("", "42", Boundary(&seen), config).add_files((), MediaSource::value("12"));

    assert_eq!(seen.lock().unwrap().as_deref(), Some("fixed"));
}
