//! Methods for a single media item of a site.

use crate::{
    config::MediaConfig,
    dispatch::{Dispatcher, Query, RequestParams},
    forms::{FieldValue, FormData, FormDataBuilder},
    source::{value_to_text, MediaList, Payload, PathResolver},
};
use serde_json::Value;

mod urls;

pub use urls::{UrlList, UrlMedia};

/// A media item of a site.
///
/// Every method builds the path and parameters of one endpoint and passes
/// them to the dispatcher, returning whatever the dispatcher returns. Nothing
/// is validated here; errors come back from the dispatcher or the server.
///
/// # Examples
///
/// ```
/// use wpcom_media::serde_json::Value;
/// use wpcom_media::{AttributedMedia, Dispatcher, Media, MediaConfig, Passthrough, Query, RequestParams};
///
/// struct PrintPaths;
///
/// impl Dispatcher for PrintPaths {
///     type Output = String;
///
///     fn get(&self, path: &str, _: Query) -> String {
///         path.to_owned()
///     }
///
///     fn put(&self, params: RequestParams, _: Query, _: Option<Value>) -> String {
///         params.path
///     }
///
///     fn post(&self, params: RequestParams, _: Query, _: Option<Value>) -> String {
///         params.path
///     }
///
///     fn del(&self, path: &str, _: Query) -> String {
///         path.to_owned()
///     }
/// }
///
/// let config = MediaConfig::builder().resolver(Passthrough).build();
/// let media = Media::with_config("", "example.wordpress.com", PrintPaths, config);
///
/// let path = media.add_files((), vec![
///     AttributedMedia::new("/tmp/sunset.jpg").attr("title", "Sunset"),
///     AttributedMedia::new("/tmp/beach.jpg"),
/// ]);
///
/// assert_eq!(path, "/sites/example.wordpress.com/media/new");
/// ```
#[derive(Debug)]
pub struct Media<D> {
    id: String,
    site_id: String,
    dispatcher: D,
    config: MediaConfig,
}

impl<D: Dispatcher> Media<D> {
    /// Create a handle for the media item `id` of site `site_id`.
    ///
    /// The id may be empty when the handle is only used to add new media.
    pub fn new<I, S>(id: I, site_id: S, dispatcher: D) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        Self::with_config(id, site_id, dispatcher, MediaConfig::default())
    }

    /// Create a handle with custom configuration.
    pub fn with_config<I, S>(id: I, site_id: S, dispatcher: D, config: MediaConfig) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        let id = id.into();

        if id.is_empty() {
            debug!("media `id` is not defined");
        }

        Self {
            id,
            site_id: site_id.into(),
            dispatcher,
            config,
        }
    }

    /// Get the media id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the site id.
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Get the dispatcher requests are sent through.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    fn item_path(&self) -> String {
        format!("/sites/{}/media/{}", self.site_id, self.id)
    }

    fn new_path(&self) -> String {
        format!("/sites/{}/media/new", self.site_id)
    }

    fn params(&self, path: String, form_data: Option<FormData>) -> RequestParams {
        RequestParams {
            path,
            form_data,
            boundary: self.config.boundary().map(ToOwned::to_owned),
        }
    }

    fn form_builder(&self) -> FormDataBuilder {
        FormDataBuilder::with_resolver(self.config.resolver().clone())
    }

    /// Fetch the media item.
    ///
    /// Requests the configured API version (1.2 by default) unless the query
    /// names another with a non-empty `apiVersion`.
    pub fn get<Q: Into<Query>>(&self, query: Q) -> D::Output {
        let mut query = query.into();

        if query.get("apiVersion").map_or(true, str::is_empty) {
            query.insert("apiVersion", self.config.api_version());
        }

        self.dispatcher.get(&self.item_path(), query)
    }

    /// Replace the metadata of the media item.
    pub fn update<Q: Into<Query>>(&self, query: Q, body: Value) -> D::Output {
        let params = self.params(self.item_path(), None);

        self.dispatcher.put(params, query.into(), Some(body))
    }

    /// Edit the media item.
    ///
    /// If the body has a `media` entry that is not null, `false`, `0` or an
    /// empty string, the edit is sent as a form instead:
    /// a `media` field followed by an `attrs[<key>]` field for each other
    /// entry. A string `media` value is treated as a path. Otherwise the body
    /// is sent as JSON.
    pub fn edit<Q: Into<Query>>(&self, query: Q, body: Value) -> D::Output {
        let path = format!("{}/edit", self.item_path());

        let object = match body {
            Value::Object(object) if object.get("media").map_or(false, is_truthy) => object,
            body => {
                let params = self.params(path, None);
                return self.dispatcher.put(params, query.into(), Some(body));
            }
        };

        let mut media = None;
        let mut attrs = Vec::new();

        for (key, value) in object {
            if key == "media" {
                media = Some(value);
            } else {
                attrs.push((key, value_to_text(value)));
            }
        }

        let media = match media {
            Some(Value::String(path)) => self.config.resolver().resolve(path),
            other => FieldValue::Text(other.map(value_to_text).unwrap_or_default()),
        };

        self.put_edit_form(query.into(), media, attrs)
    }

    /// Edit the media item, replacing its file.
    ///
    /// Sends a `media` field with the new file followed by an `attrs[<key>]`
    /// field for each attribute.
    pub fn edit_media<Q, P, A, K, V>(&self, query: Q, media: P, attrs: A) -> D::Output
    where
        Q: Into<Query>,
        P: Into<Payload>,
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let media: Payload = media.into();
        let media = media.resolve(&**self.config.resolver());
        let attrs = attrs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        self.put_edit_form(query.into(), media, attrs)
    }

    fn put_edit_form(&self, query: Query, media: FieldValue, attrs: Vec<(String, String)>) -> D::Output {
        let mut form = FormData::new();
        form.push("media", media);

        for (key, value) in attrs {
            form.push(format!("attrs[{}]", key), value);
        }

        debug!("editing media {} with {} form fields", self.id, form.len());

        let params = self.params(format!("{}/edit", self.item_path()), Some(form));

        self.dispatcher.put(params, query, None)
    }

    /// Upload one or more files as new media items.
    pub fn add_files<Q, L>(&self, query: Q, files: L) -> D::Output
    where
        Q: Into<Query>,
        L: Into<MediaList>,
    {
        let form = self.form_builder().build(files);
        let params = self.params(self.new_path(), Some(form));

        self.dispatcher.post(params, query.into(), None)
    }

    /// Add one or more remote files as new media items.
    pub fn add_urls<Q, L>(&self, query: Q, media: L) -> D::Output
    where
        Q: Into<Query>,
        L: Into<UrlList>,
    {
        let media: UrlList = media.into();
        let body = media.into_body();
        let params = self.params(self.new_path(), None);

        self.dispatcher.post(params, query.into(), Some(body))
    }

    /// Delete the media item.
    pub fn delete<Q: Into<Query>>(&self, query: Q) -> D::Output {
        self.dispatcher
            .del(&format!("{}/delete", self.item_path()), query.into())
    }

    /// Delete the media item. Alias of [`delete`](Self::delete).
    pub fn del<Q: Into<Query>>(&self, query: Q) -> D::Output {
        self.delete(query)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
