#![allow(dead_code)]

use serde_json::Value;
use std::sync::{Mutex, Once};
use wpcom_media::{Dispatcher, FormData, Query, RequestParams};

pub fn logging() {
    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        #[cfg(feature = "tracing")]
        {
            let _ = tracing_subscriber::fmt()
                .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
                .with_test_writer()
                .try_init();
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = env_logger::builder()
                .filter_module("wpcom::media", log::LevelFilter::Trace)
                .is_test(true)
                .try_init();
        }
    });
}

/// A request as it was handed to the dispatcher.
#[derive(Debug)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Query,
    pub form: Option<FormData>,
    pub body: Option<Value>,
}

impl Call {
    pub fn field_names(&self) -> Vec<&str> {
        self.form
            .as_ref()
            .map(|form| form.names().collect())
            .unwrap_or_default()
    }

    pub fn text_fields(&self) -> Vec<(&str, Option<&str>)> {
        self.form
            .as_ref()
            .map(|form| {
                form.fields()
                    .iter()
                    .map(|field| (field.name(), field.value().as_text()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Dispatcher that records every request instead of sending it.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn single(&self) -> Call {
        let mut calls = self.take();
        assert_eq!(calls.len(), 1, "expected exactly one request");
        calls.remove(0)
    }

    fn record(&self, method: &'static str, params: RequestParams, query: Query, body: Option<Value>) {
        self.calls.lock().unwrap().push(Call {
            method,
            path: params.path,
            query,
            form: params.form_data,
            body,
        });
    }
}

impl Dispatcher for Recorder {
    type Output = ();

    fn get(&self, path: &str, query: Query) {
        self.record("GET", RequestParams::new(path), query, None);
    }

    fn put(&self, params: RequestParams, query: Query, body: Option<Value>) {
        self.record("PUT", params, query, body);
    }

    fn post(&self, params: RequestParams, query: Query, body: Option<Value>) {
        self.record("POST", params, query, body);
    }

    fn del(&self, path: &str, query: Query) {
        self.record("DELETE", RequestParams::new(path), query, None);
    }
}
