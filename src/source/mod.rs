//! Describing the media to upload.
//!
//! Media can come from several places: a stream the caller already has open,
//! a named file handle, a path on the local filesystem, or any of those paired
//! with descriptive attributes such as a title or caption. [`MediaSource`]
//! captures all of them as one tagged union so that the form builder never has
//! to guess what it was given.

use crate::{forms::FieldValue, Body, Error};
use serde_json::Value;

mod resolve;

#[cfg(feature = "fs")]
pub use resolve::FileSystem;
pub use resolve::{PathResolver, Passthrough};
pub(crate) use resolve::default_resolver;

/// A named file, ready to be read.
///
/// This is the equivalent of a file picked by a user in a form: the bytes
/// together with the name (and optionally the content type) the server should
/// record for them.
#[derive(Debug)]
pub struct FileHandle {
    name: String,
    content_type: Option<String>,
    body: Body,
}

impl FileHandle {
    /// Create a new file handle with a file name and contents.
    pub fn new<N, B>(name: N, body: B) -> Self
    where
        N: Into<String>,
        B: Into<Body>,
    {
        Self {
            name: name.into(),
            content_type: None,
            body: body.into(),
        }
    }

    /// Set the content type of this file.
    pub fn content_type<T: Into<String>>(mut self, content_type: T) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Get the file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the content type, if one was set.
    pub fn get_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the file contents.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Take the file contents.
    pub fn into_body(self) -> Body {
        self.body
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, Body) {
        (self.name, self.content_type, self.body)
    }
}

/// The media bytes of a single upload.
#[derive(Debug)]
pub enum Payload {
    /// An already open byte stream.
    Stream(Body),
    /// A named file handle.
    Handle(FileHandle),
    /// A path to be resolved by a [`PathResolver`].
    Path(String),
}

impl Payload {
    pub(crate) fn resolve(self, resolver: &dyn PathResolver) -> FieldValue {
        match self {
            Payload::Stream(body) => FieldValue::Stream(body),
            Payload::Handle(handle) => FieldValue::File(handle),
            Payload::Path(path) => resolver.resolve(path),
        }
    }
}

impl From<Body> for Payload {
    fn from(body: Body) -> Self {
        Payload::Stream(body)
    }
}

impl From<FileHandle> for Payload {
    fn from(handle: FileHandle) -> Self {
        Payload::Handle(handle)
    }
}

impl From<String> for Payload {
    fn from(path: String) -> Self {
        Payload::Path(path)
    }
}

impl From<&'_ str> for Payload {
    fn from(path: &str) -> Self {
        Payload::Path(path.to_owned())
    }
}

/// Media bytes together with descriptive attributes.
///
/// Attributes keep the order in which they were added, and are sent as
/// `attrs[<index>][<key>]` fields ahead of the media itself.
///
/// # Examples
///
/// ```
/// use wpcom_media::AttributedMedia;
///
/// let media = AttributedMedia::new("/tmp/sunset.jpg")
///     .attr("title", "Sunset")
///     .attr("description", "Taken from the pier");
///
/// assert_eq!(media.attrs().len(), 2);
/// ```
#[derive(Debug)]
pub struct AttributedMedia {
    file: Payload,
    attrs: Vec<(String, String)>,
}

impl AttributedMedia {
    /// Create a new attributed media with the given payload and no attributes.
    pub fn new<P: Into<Payload>>(file: P) -> Self {
        Self {
            file: file.into(),
            attrs: Vec::new(),
        }
    }

    /// Set an attribute.
    ///
    /// Setting an attribute that already exists replaces its value but keeps
    /// its original position. The key `file` names the payload itself and is
    /// ignored.
    pub fn attr<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();

        if key == "file" {
            debug!("ignoring `file` attribute, the payload is set separately");
        } else if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.attrs.push((key, value));
        }

        self
    }

    /// Get the attributes in insertion order.
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Get the payload.
    pub fn file(&self) -> &Payload {
        &self.file
    }

    pub(crate) fn into_parts(self) -> (Payload, Vec<(String, String)>) {
        (self.file, self.attrs)
    }
}

/// Parses a JSON object of the form `{"file": "<path>", "title": ...}`.
///
/// Fails with [`Error::MissingFile`] if there is no `file` entry. Attribute
/// values that are not strings are sent in their JSON text form.
impl TryFrom<Value> for AttributedMedia {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        let object = match value {
            Value::Object(object) => object,
            other => return Err(Error::invalid_source(format!("expected an object, got {}", other))),
        };

        let mut file = None;
        let mut attrs = Vec::new();

        for (key, value) in object {
            if key == "file" {
                file = Some(value);
            } else {
                attrs.push((key, value));
            }
        }

        let file = match file {
            Some(Value::String(path)) => Payload::Path(path),
            Some(other) => {
                return Err(Error::invalid_source(format!(
                    "`file` must be a path, got {}",
                    other
                )))
            }
            None => return Err(Error::MissingFile),
        };

        Ok(attrs
            .into_iter()
            .fold(Self::new(file), |media, (key, value)| {
                media.attr(key, value_to_text(value))
            }))
    }
}

/// A single piece of media to upload.
#[derive(Debug)]
pub enum MediaSource {
    /// An already open byte stream, sent as is.
    Stream(Body),
    /// A named file handle, sent as is.
    Handle(FileHandle),
    /// A filesystem path, resolved before sending.
    Path(String),
    /// Media with descriptive attributes.
    Attributed(AttributedMedia),
    /// An opaque value sent verbatim as the media field.
    Value(String),
}

impl MediaSource {
    /// Create a source that is sent verbatim, without path resolution.
    pub fn value<V: Into<String>>(value: V) -> Self {
        MediaSource::Value(value.into())
    }
}

impl From<Body> for MediaSource {
    fn from(body: Body) -> Self {
        MediaSource::Stream(body)
    }
}

impl From<FileHandle> for MediaSource {
    fn from(handle: FileHandle) -> Self {
        MediaSource::Handle(handle)
    }
}

impl From<AttributedMedia> for MediaSource {
    fn from(media: AttributedMedia) -> Self {
        MediaSource::Attributed(media)
    }
}

impl From<Payload> for MediaSource {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Stream(body) => MediaSource::Stream(body),
            Payload::Handle(handle) => MediaSource::Handle(handle),
            Payload::Path(path) => MediaSource::Path(path),
        }
    }
}

impl From<String> for MediaSource {
    fn from(path: String) -> Self {
        MediaSource::Path(path)
    }
}

impl From<&'_ str> for MediaSource {
    fn from(path: &str) -> Self {
        MediaSource::Path(path.to_owned())
    }
}

/// Parses loosely-typed JSON media input.
///
/// Strings are paths and objects are attributed media. Numbers and booleans
/// are passed through verbatim. Anything else is rejected.
impl TryFrom<Value> for MediaSource {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::String(path) => Ok(MediaSource::Path(path)),
            value @ Value::Object(_) => AttributedMedia::try_from(value).map(Into::into),
            value @ Value::Number(_) | value @ Value::Bool(_) => {
                Ok(MediaSource::Value(value.to_string()))
            }
            other => Err(Error::invalid_source(format!("cannot upload {}", other))),
        }
    }
}

/// One or more media sources.
///
/// Anything that converts into a single [`MediaSource`] also converts into a
/// list of one, so methods taking a `MediaList` accept either.
#[derive(Debug, Default)]
pub struct MediaList(Vec<MediaSource>);

impl MediaList {
    /// Get the number of sources in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list has no sources.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a source to the list.
    pub fn push<S: Into<MediaSource>>(&mut self, source: S) {
        self.0.push(source.into());
    }
}

impl IntoIterator for MediaList {
    type Item = MediaSource;
    type IntoIter = std::vec::IntoIter<MediaSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S: Into<MediaSource>> FromIterator<S> for MediaList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<MediaSource>> From<Vec<S>> for MediaList {
    fn from(sources: Vec<S>) -> Self {
        sources.into_iter().collect()
    }
}

impl<S: Into<MediaSource>, const N: usize> From<[S; N]> for MediaList {
    fn from(sources: [S; N]) -> Self {
        sources.into_iter().collect()
    }
}

macro_rules! single_source {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MediaList {
                fn from(source: $t) -> Self {
                    Self(vec![source.into()])
                }
            }
        )*
    };
}

single_source!(MediaSource, Body, FileHandle, AttributedMedia, Payload, String, &'_ str);

/// Parses a JSON value or array of values into a list of sources.
impl TryFrom<Value> for MediaList {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::Array(values) => values
                .into_iter()
                .map(MediaSource::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            value => MediaSource::try_from(value).map(Into::into),
        }
    }
}

/// Render a JSON value as form text. Strings are sent without quotes.
pub(crate) fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
