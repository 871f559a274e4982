use crate::forms::FieldValue;
use std::{fmt, sync::Arc};

/// Turns a filesystem path given as media input into a form field value.
///
/// Where a path ends up is a capability of the environment the client runs
/// in, so it is decided once by picking a resolver instead of being probed at
/// every call.
pub trait PathResolver: Send + Sync {
    /// Resolve a path into the value that will be sent for it.
    fn resolve(&self, path: String) -> FieldValue;
}

/// Resolves paths into lazily opened file streams.
///
/// The file name of the path is used as the file name of the uploaded part.
/// The file itself is not opened until the stream is first read.
#[cfg(feature = "fs")]
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystem;

#[cfg(feature = "fs")]
impl PathResolver for FileSystem {
    fn resolve(&self, path: String) -> FieldValue {
        let name = std::path::Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());

        trace!("resolved {} to a file stream", path);

        FieldValue::File(super::FileHandle::new(name, crate::Body::from_path(path)))
    }
}

/// Leaves paths untouched, sending them as plain text values.
///
/// Useful where no filesystem is available and the caller is expected to
/// provide streams or file handles directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl PathResolver for Passthrough {
    fn resolve(&self, path: String) -> FieldValue {
        FieldValue::Text(path)
    }
}

impl<R: PathResolver + ?Sized> PathResolver for Arc<R> {
    fn resolve(&self, path: String) -> FieldValue {
        (**self).resolve(path)
    }
}

impl<R: PathResolver + ?Sized> PathResolver for &R {
    fn resolve(&self, path: String) -> FieldValue {
        (**self).resolve(path)
    }
}

impl fmt::Debug for dyn PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PathResolver")
    }
}

/// The resolver used when none is configured.
pub(crate) fn default_resolver() -> Arc<dyn PathResolver> {
    #[cfg(feature = "fs")]
    {
        Arc::new(FileSystem)
    }

    #[cfg(not(feature = "fs"))]
    {
        Arc::new(Passthrough)
    }
}
