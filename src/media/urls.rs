use crate::Error;
use serde_json::{Map, Value};

/// A remote file to be added to the media library by URL.
#[derive(Clone, Debug, PartialEq)]
pub enum UrlMedia {
    /// Just the URL.
    Url(String),
    /// A URL together with attributes such as a caption or title.
    Described {
        /// URL of the remote file.
        url: String,
        /// Attributes to record for the new media item.
        attrs: Map<String, Value>,
    },
}

impl UrlMedia {
    /// Create a new URL media with no attributes.
    pub fn new<U: Into<String>>(url: U) -> Self {
        UrlMedia::Url(url.into())
    }

    /// Set an attribute. The key `url` is reserved for the URL itself and is
    /// ignored.
    pub fn attr<K, V>(self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();

        if key == "url" {
            return self;
        }

        let (url, mut attrs) = match self {
            UrlMedia::Url(url) => (url, Map::new()),
            UrlMedia::Described { url, attrs } => (url, attrs),
        };

        attrs.insert(key, value.into());

        UrlMedia::Described { url, attrs }
    }

    /// Get the URL.
    pub fn url(&self) -> &str {
        match self {
            UrlMedia::Url(url) => url,
            UrlMedia::Described { url, .. } => url,
        }
    }
}

impl From<String> for UrlMedia {
    fn from(url: String) -> Self {
        UrlMedia::Url(url)
    }
}

impl From<&'_ str> for UrlMedia {
    fn from(url: &str) -> Self {
        UrlMedia::Url(url.to_owned())
    }
}

/// Parses `"<url>"` or `{"url": "<url>", ...attributes}`.
impl TryFrom<Value> for UrlMedia {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::String(url) => Ok(UrlMedia::Url(url)),
            Value::Object(object) => {
                let mut url = None;
                let mut attrs = Map::new();

                for (key, value) in object {
                    if key == "url" {
                        url = Some(value);
                    } else {
                        attrs.insert(key, value);
                    }
                }

                match url {
                    Some(Value::String(url)) => Ok(UrlMedia::Described { url, attrs }),
                    Some(other) => Err(Error::invalid_source(format!(
                        "`url` must be a string, got {}",
                        other
                    ))),
                    None => Err(Error::MissingUrl),
                }
            }
            other => Err(Error::invalid_source(format!("not a url: {}", other))),
        }
    }
}

/// One or more remote files.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UrlList(Vec<UrlMedia>);

impl UrlList {
    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Turn the list into the JSON body expected by the `media/new` endpoint.
    ///
    /// URLs go into `media_urls`. If any entry has attributes, `attrs` is an
    /// array aligned with `media_urls`, with `null` in place of entries that
    /// have none; it stops after the last entry with attributes.
    pub(crate) fn into_body(self) -> Value {
        let mut media_urls = Vec::with_capacity(self.0.len());
        let mut attrs: Option<Vec<Value>> = None;

        for (index, media) in self.0.into_iter().enumerate() {
            match media {
                UrlMedia::Url(url) => media_urls.push(Value::String(url)),
                UrlMedia::Described { url, attrs: media_attrs } => {
                    let attrs = attrs.get_or_insert_with(Vec::new);
                    attrs.resize(index, Value::Null);
                    attrs.push(Value::Object(media_attrs));

                    media_urls.push(Value::String(url));
                }
            }
        }

        let mut body = Map::new();
        body.insert("media_urls".into(), Value::Array(media_urls));

        if let Some(attrs) = attrs {
            body.insert("attrs".into(), Value::Array(attrs));
        }

        Value::Object(body)
    }
}

impl IntoIterator for UrlList {
    type Item = UrlMedia;
    type IntoIter = std::vec::IntoIter<UrlMedia>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<U: Into<UrlMedia>> FromIterator<U> for UrlList {
    fn from_iter<I: IntoIterator<Item = U>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<U: Into<UrlMedia>> From<Vec<U>> for UrlList {
    fn from(media: Vec<U>) -> Self {
        media.into_iter().collect()
    }
}

impl<U: Into<UrlMedia>, const N: usize> From<[U; N]> for UrlList {
    fn from(media: [U; N]) -> Self {
        media.into_iter().collect()
    }
}

impl From<UrlMedia> for UrlList {
    fn from(media: UrlMedia) -> Self {
        Self(vec![media])
    }
}

impl From<String> for UrlList {
    fn from(url: String) -> Self {
        Self(vec![url.into()])
    }
}

impl From<&'_ str> for UrlList {
    fn from(url: &str) -> Self {
        Self(vec![url.into()])
    }
}

/// Parses a JSON value or array of values into a list of URL media.
impl TryFrom<Value> for UrlList {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        match value {
            Value::Array(values) => values
                .into_iter()
                .map(UrlMedia::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            value => UrlMedia::try_from(value).map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_urls_have_no_attrs() {
        let body = UrlList::from(["http://x", "http://y"]).into_body();

        assert_eq!(body, json!({"media_urls": ["http://x", "http://y"]}));
    }

    #[test]
    fn attrs_are_index_aligned() {
        let list = UrlList::from(vec![
            UrlMedia::new("http://x"),
            UrlMedia::new("http://y").attr("caption", "c"),
        ]);

        assert_eq!(
            list.into_body(),
            json!({
                "media_urls": ["http://x", "http://y"],
                "attrs": [null, {"caption": "c"}],
            })
        );
    }

    #[test]
    fn attrs_stop_at_last_described_entry() {
        let list = UrlList::from(vec![
            UrlMedia::new("http://x").attr("title", "X"),
            UrlMedia::new("http://y"),
        ]);

        assert_eq!(
            list.into_body(),
            json!({
                "media_urls": ["http://x", "http://y"],
                "attrs": [{"title": "X"}],
            })
        );
    }

    #[test]
    fn described_without_attributes_sends_empty_object() {
        let list = UrlList::try_from(json!([{"url": "http://x"}])).unwrap();

        assert_eq!(
            list.into_body(),
            json!({"media_urls": ["http://x"], "attrs": [{}]})
        );
    }

    #[test]
    fn url_attribute_is_ignored() {
        let media = UrlMedia::new("http://x").attr("url", "http://other");

        assert_eq!(media.url(), "http://x");
        assert_eq!(media, UrlMedia::new("http://x"));
    }

    #[test]
    fn url_attribute_alone_adds_no_attrs() {
        let list = UrlList::from(vec![UrlMedia::new("http://x").attr("url", "http://other")]);

        assert_eq!(list.into_body(), json!({"media_urls": ["http://x"]}));
    }

    #[test]
    fn parse_from_json() {
        let list = UrlList::try_from(json!(["http://x", {"url": "http://y", "caption": "c"}])).unwrap();

        assert_eq!(
            list,
            UrlList::from(vec![
                UrlMedia::new("http://x"),
                UrlMedia::new("http://y").attr("caption", "c"),
            ])
        );
    }

    #[test]
    fn missing_url_is_rejected() {
        assert!(matches!(
            UrlMedia::try_from(json!({"caption": "c"})),
            Err(Error::MissingUrl)
        ));
        assert!(matches!(
            UrlMedia::try_from(json!(3)),
            Err(Error::InvalidSource(_))
        ));
    }
}
