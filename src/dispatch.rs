//! The seam between media methods and whatever actually sends requests.
//!
//! This crate never talks to the network. Every [`Media`](crate::Media)
//! method assembles a path, a query and optionally a body or form, then hands
//! them to a [`Dispatcher`] provided by the application. The dispatcher owns
//! transport, authentication and retries.

use crate::{forms::FormData, Body, Error};
use http::{header, Method, Request};
use serde_json::Value;
use std::{collections::BTreeMap, sync::Arc};
use url::Url;

/// Query string parameters of a request.
///
/// Parameters are kept sorted by name, so the same query always encodes to
/// the same string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any existing value of the same name.
    pub fn param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(key, value);
        self
    }

    /// Set a parameter, returning the previous value if there was one.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), value.into())
    }

    /// Get the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if the parameter is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns true if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as an `application/x-www-form-urlencoded` query string, without
    /// the leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl From<()> for Query {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Query {
    fn from(params: [(K, V); N]) -> Self {
        params.into_iter().collect()
    }
}

/// Where a request goes and, for uploads, the form it carries.
#[derive(Debug)]
pub struct RequestParams {
    /// Path of the endpoint, relative to the API root.
    pub path: String,
    /// Form fields to send as a multipart body instead of a JSON body.
    pub form_data: Option<FormData>,
    /// Multipart boundary to use when encoding `form_data`. A random one is
    /// generated if not set.
    pub boundary: Option<String>,
}

impl RequestParams {
    /// Create request parameters for the given path with no form.
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            form_data: None,
            boundary: None,
        }
    }

    /// Attach a form to send with the request.
    pub fn form_data(mut self, form: FormData) -> Self {
        self.form_data = Some(form);
        self
    }

    /// Assemble an HTTP request from these parameters.
    ///
    /// The URL is `base_url` followed by the path and the encoded query. If
    /// there is form data it is encoded as a multipart body and `body` is
    /// ignored; otherwise `body`, if any, is sent as JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use wpcom_media::{http::Method, Query, RequestParams};
    ///
    /// let request = RequestParams::new("/sites/42/media/7").to_request(
    ///     Method::GET,
    ///     "https://public-api.wordpress.com/rest/v1.1",
    ///     &Query::new().param("fields", "ID,URL"),
    ///     None,
    /// )?;
    ///
    /// assert_eq!(
    ///     request.uri(),
    ///     "https://public-api.wordpress.com/rest/v1.1/sites/42/media/7?fields=ID%2CURL"
    /// );
    /// # Ok::<(), wpcom_media::Error>(())
    /// ```
    pub fn to_request(
        self,
        method: Method,
        base_url: &str,
        query: &Query,
        body: Option<Value>,
    ) -> Result<Request<Body>, Error> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        ))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let builder = Request::builder().method(method).uri(url.as_str());

        let request = match (self.form_data, body) {
            (Some(form), _) => {
                let form = match self.boundary {
                    Some(boundary) => form.into_multipart_with_boundary(boundary),
                    None => form.into_multipart(),
                };

                builder
                    .header(header::CONTENT_TYPE, form.content_type())
                    .body(Body::from(form))?
            }
            (None, Some(body)) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            (None, None) => builder.body(Body::empty())?,
        };

        trace!("assembled {} {}", request.method(), request.uri());

        Ok(request)
    }
}

/// Sends requests on behalf of the media methods.
///
/// The output type is up to the implementation; a synchronous client might
/// return a `Result`, an asynchronous one a future.
pub trait Dispatcher {
    /// What each request method returns.
    type Output;

    /// Send a `GET` request.
    fn get(&self, path: &str, query: Query) -> Self::Output;

    /// Send a `PUT` request.
    fn put(&self, params: RequestParams, query: Query, body: Option<Value>) -> Self::Output;

    /// Send a `POST` request.
    fn post(&self, params: RequestParams, query: Query, body: Option<Value>) -> Self::Output;

    /// Send a `DELETE` request.
    fn del(&self, path: &str, query: Query) -> Self::Output;
}

macro_rules! forward_dispatcher {
    ($($t:ty),*) => {
        $(
            impl<D: Dispatcher + ?Sized> Dispatcher for $t {
                type Output = D::Output;

                fn get(&self, path: &str, query: Query) -> Self::Output {
                    (**self).get(path, query)
                }

                fn put(&self, params: RequestParams, query: Query, body: Option<Value>) -> Self::Output {
                    (**self).put(params, query, body)
                }

                fn post(&self, params: RequestParams, query: Query, body: Option<Value>) -> Self::Output {
                    (**self).post(params, query, body)
                }

                fn del(&self, path: &str, query: Query) -> Self::Output {
                    (**self).del(path, query)
                }
            }
        )*
    };
}

forward_dispatcher!(&D, Box<D>, Arc<D>);
