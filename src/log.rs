//! Logging facade that delegates to either the `log` crate or the `tracing`
//! crate depending on compile-time features.
//!
//! Every event emitted by this crate uses the [`TARGET`] target, so an
//! application can turn media tracing on or off independently of the rest of
//! its API client.

/// Target used for all events emitted by this crate.
pub(crate) const TARGET: &str = "wpcom::media";

#[cfg(feature = "tracing")]
pub(crate) type Span = tracing::Span;

#[cfg(not(feature = "tracing"))]
#[derive(Clone, Debug, Default)]
pub(crate) struct Span;

macro_rules! span {
    ($level:ident, $($t:tt)+) => {{
        #[cfg(feature = "tracing")]
        {
            ::tracing::span!(target: $crate::log::TARGET, ::tracing::Level::$level, $($t)*)
        }

        #[cfg(not(feature = "tracing"))]
        {
            $crate::log::Span
        }
    }};
}

macro_rules! enter_span {
    ($span:expr) => {
        #[cfg(feature = "tracing")]
        let _enter = $span.enter();

        #[cfg(not(feature = "tracing"))]
        let _enter = &$span;
    };
}

macro_rules! debug {
    ($($t:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: $crate::log::TARGET, $($t)*);

        #[cfg(not(feature = "tracing"))]
        ::log::debug!(target: $crate::log::TARGET, $($t)*);
    }};
}

macro_rules! trace {
    ($($t:tt)+) => {{
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: $crate::log::TARGET, $($t)*);

        #[cfg(not(feature = "tracing"))]
        ::log::trace!(target: $crate::log::TARGET, $($t)*);
    }};
}
