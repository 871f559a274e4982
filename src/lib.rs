//! Media upload helpers for the WordPress.com REST API client.
//!
//! This crate turns media given in a variety of shapes (open streams, named
//! file handles, filesystem paths, remote URLs, any of them with descriptive
//! attributes) into the request parameters expected by the media endpoints,
//! and hands them to a [`Dispatcher`] supplied by the application. It never
//! sends requests itself.
//!
//! # Uploading files
//!
//! ```
//! use wpcom_media::{build_form_data, AttributedMedia, Body, FileHandle};
//!
//! let form = build_form_data(vec![
//!     AttributedMedia::new(FileHandle::new("sunset.jpg", vec![0xffu8, 0xd8]))
//!         .attr("title", "Sunset")
//!         .into(),
//!     wpcom_media::MediaSource::from(Body::from("raw bytes")),
//! ]);
//!
//! let names: Vec<_> = form.names().collect();
//! assert_eq!(names, ["attrs[0][title]", "media[]", "media[]"]);
//! ```
//!
//! Forms are handed to the dispatcher as an ordered list of fields. A
//! dispatcher without its own multipart encoder can use
//! [`FormData::into_multipart`] or [`RequestParams::to_request`].
//!
//! # Feature flags
//!
//! ## `fs`
//!
//! Resolve paths given as media into lazily opened file streams. Without this
//! feature paths are sent as plain text and callers are expected to provide
//! streams or file handles themselves. Enabled by default.
//!
//! ## `tracing`
//!
//! Emit diagnostics through the [tracing](https://docs.rs/tracing) crate
//! instead of [log](https://docs.rs/log). Enabled by default. All events use
//! the `wpcom::media` target.

#![deny(unsafe_code)]
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    unused,
    clippy::all
)]

#[macro_use]
mod log;

mod body;
mod config;
mod dispatch;
mod error;
mod forms;
mod media;
mod source;

pub use crate::{
    body::Body,
    config::{MediaConfig, MediaConfigBuilder, DEFAULT_API_VERSION},
    dispatch::{Dispatcher, Query, RequestParams},
    error::Error,
    forms::{build_form_data, FieldValue, FormData, FormDataBuilder, FormField, MultipartBody},
    media::{Media, UrlList, UrlMedia},
    source::{AttributedMedia, FileHandle, MediaList, MediaSource, Passthrough, PathResolver, Payload},
};

#[cfg(feature = "fs")]
pub use crate::source::FileSystem;

/// Re-export of the standard HTTP types.
pub use http;

/// Re-export of the JSON value type used for request bodies.
pub use serde_json;
