//! Building form data for media uploads.
//!
//! The media endpoints take their uploads as a flat, ordered list of form
//! fields. For every piece of media, its attributes come first as
//! `attrs[<index>][<key>]` fields, followed by exactly one `media[]` field
//! carrying the bytes:
//!
//! ```text
//! attrs[0][title]   = "Sunset"
//! media[]           = <sunset.jpg>
//! media[]           = <beach.jpg>
//! attrs[2][caption] = "Pier"
//! media[]           = <pier.jpg>
//! ```
//!
//! Turning that list into an actual multipart request body is the job of the
//! dispatcher; [`FormData::into_multipart`] is provided for dispatchers that
//! don't have an encoder of their own.

use crate::{
    log::Span,
    source::{default_resolver, FileHandle, MediaList, MediaSource, PathResolver},
    Body,
};
use std::{fmt, sync::Arc};

mod multipart;

pub use multipart::MultipartBody;

/// Name of the field carrying the media bytes.
pub(crate) const MEDIA_FIELD: &str = "media[]";

/// The value of a single form field.
#[derive(Debug)]
pub enum FieldValue {
    /// A plain text value.
    Text(String),
    /// An unnamed byte stream.
    Stream(Body),
    /// A named file.
    File(FileHandle),
}

impl FieldValue {
    /// Get the value as text, if it is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if the value is read from a stream rather than being
    /// plain text. Named files count as streams.
    pub fn is_stream(&self) -> bool {
        matches!(self, FieldValue::Stream(_) | FieldValue::File(_))
    }

    /// Get the file name, if the value is a named file.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            FieldValue::File(handle) => Some(handle.name()),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&'_ str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_owned())
    }
}

impl From<Body> for FieldValue {
    fn from(body: Body) -> Self {
        FieldValue::Stream(body)
    }
}

impl From<FileHandle> for FieldValue {
    fn from(handle: FileHandle) -> Self {
        FieldValue::File(handle)
    }
}

/// A single named form field.
#[derive(Debug)]
pub struct FormField {
    name: String,
    value: FieldValue,
}

impl FormField {
    /// Create a new field with a name and value.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the field value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Split the field into its name and value.
    pub fn into_parts(self) -> (String, FieldValue) {
        (self.name, self.value)
    }
}

/// An ordered list of form fields.
///
/// Duplicate field names are allowed and are preserved in the order they were
/// added.
#[derive(Debug, Default)]
pub struct FormData {
    fields: Vec<FormField>,
}

impl FormData {
    /// Create a new, empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field to this form.
    pub fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.push(FormField::new(name, value));
    }

    /// Get the number of fields in the form.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the fields of the form in order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Iterate over the field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FormField::name)
    }

    /// Encode the form as a multipart body with a randomly generated boundary.
    pub fn into_multipart(self) -> MultipartBody {
        MultipartBody::new(self)
    }

    /// Encode the form as a multipart body with the given boundary.
    pub fn into_multipart_with_boundary<S: Into<String>>(self, boundary: S) -> MultipartBody {
        MultipartBody::with_boundary(self, boundary)
    }
}

impl IntoIterator for FormData {
    type Item = FormField;
    type IntoIter = std::vec::IntoIter<FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormData {
    type Item = &'a FormField;
    type IntoIter = std::slice::Iter<'a, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<FormField> for FormData {
    fn from_iter<I: IntoIterator<Item = FormField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Builder for turning media sources into upload form data.
///
/// A builder holds no state between calls to [`build`](Self::build) and can
/// be shared freely.
///
/// # Examples
///
/// ```
/// use wpcom_media::{AttributedMedia, FormDataBuilder, Passthrough};
///
/// let form = FormDataBuilder::new()
///     .resolver(Passthrough)
///     .build(vec![
///         AttributedMedia::new("a.txt").attr("title", "A"),
///         AttributedMedia::new("b.txt"),
///     ]);
///
/// let names: Vec<_> = form.names().collect();
/// assert_eq!(names, ["attrs[0][title]", "media[]", "media[]"]);
/// ```
pub struct FormDataBuilder {
    resolver: Arc<dyn PathResolver>,
    span: Span,
}

impl Default for FormDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDataBuilder {
    /// Create a new builder with the default path resolver.
    ///
    /// When the `fs` feature is enabled, paths are turned into file streams;
    /// otherwise they are sent as text.
    pub fn new() -> Self {
        Self::with_resolver(default_resolver())
    }

    pub(crate) fn with_resolver(resolver: Arc<dyn PathResolver>) -> Self {
        Self {
            resolver,
            span: span!(DEBUG, "form_data"),
        }
    }

    /// Set the resolver used to turn paths into field values.
    pub fn resolver<R>(mut self, resolver: R) -> Self
    where
        R: PathResolver + 'static,
    {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Record events from this builder within the given span.
    #[cfg(feature = "tracing")]
    pub fn span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    /// Build form data from one or more media sources.
    ///
    /// This never fails. Paths are resolved lazily, so any problem opening a
    /// file surfaces only when the form is read.
    pub fn build<L: Into<MediaList>>(&self, media: L) -> FormData {
        enter_span!(self.span);

        let media: MediaList = media.into();
        let mut form = FormData::new();

        for (index, source) in media.into_iter().enumerate() {
            let value = match source {
                MediaSource::Path(path) => {
                    debug!("media {} is a path: {}", index, path);
                    self.resolver.resolve(path)
                }
                MediaSource::Stream(body) => {
                    debug!("media {} is a stream", index);
                    FieldValue::Stream(body)
                }
                MediaSource::Handle(handle) => {
                    debug!("media {} is a file: {}", index, handle.name());
                    FieldValue::File(handle)
                }
                MediaSource::Attributed(media) => {
                    let (file, attrs) = media.into_parts();

                    for (key, value) in attrs {
                        trace!("add {} => {}", key, value);
                        form.push(format!("attrs[{}][{}]", index, key), value);
                    }

                    file.resolve(&*self.resolver)
                }
                MediaSource::Value(value) => {
                    debug!("media {} is an opaque value", index);
                    FieldValue::Text(value)
                }
            };

            form.push(MEDIA_FIELD, value);
        }

        form
    }
}

impl fmt::Debug for FormDataBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDataBuilder")
            .field("resolver", &self.resolver)
            .finish()
    }
}

/// Build form data from one or more media sources using a default builder.
pub fn build_form_data<L: Into<MediaList>>(media: L) -> FormData {
    FormDataBuilder::new().build(media)
}
