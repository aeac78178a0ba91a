//! # 3.4 Options
//!
//! Configuration the dumper reads. `Options` is a plain, `Clone`-able record built through a
//! `Default` impl plus builder-style setters, never mutable global state.

use crate::dumper::Dumper;
use crate::error::Result;
use crate::slice::Slice;

/// Policy for types with no JSON equivalent (`None`, `Illegal`, `MinKey`, `MaxKey`, `UTCDate`,
/// `Binary`, and non-finite `Double`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedTypeBehavior {
    /// Raise [`crate::Error::NoJsonEquivalent`].
    FailOnUnsupported,
    /// Emit a JSON `null`.
    NullifyUnsupported,
    /// Render the value through the VJSON dialect for just this one value.
    ConvertUnsupported,
}

impl Default for UnsupportedTypeBehavior {
    fn default() -> Self {
        UnsupportedTypeBehavior::FailOnUnsupported
    }
}

/// A caller-provided policy for rendering `Custom` values in JSON mode.
///
/// Modeled as a trait object rather than a function pointer so a stateful encoder (one that,
/// say, looks up a schema registry) can be plugged in.
pub trait CustomTypeHandler {
    /// Render `slice` (a `Custom` value) through `dumper`, which owns both the active `Sink`
    /// and `Options` for the duration of the call. `base` is the enclosing container the
    /// `Custom` value was found in.
    fn dump(&self, slice: Slice<'_>, dumper: &mut Dumper<'_, '_>, base: Slice<'_>) -> Result<()>;
}

/// Configuration recognized by the [`Dumper`](crate::dumper::Dumper).
#[derive(Clone, Default)]
pub struct Options {
    pub escape_forward_slashes: bool,
    pub escape_unicode: bool,
    pub pretty_print: bool,
    pub unsupported_type_behavior: UnsupportedTypeBehavior,
    pub custom_type_handler: Option<std::sync::Arc<dyn CustomTypeHandler + Send + Sync>>,
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("escape_forward_slashes", &self.escape_forward_slashes)
            .field("escape_unicode", &self.escape_unicode)
            .field("pretty_print", &self.pretty_print)
            .field("unsupported_type_behavior", &self.unsupported_type_behavior)
            .field("custom_type_handler", &self.custom_type_handler.is_some())
            .finish()
    }
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    pub fn escape_forward_slashes(mut self, value: bool) -> Self {
        self.escape_forward_slashes = value;
        self
    }

    pub fn escape_unicode(mut self, value: bool) -> Self {
        self.escape_unicode = value;
        self
    }

    pub fn pretty_print(mut self, value: bool) -> Self {
        self.pretty_print = value;
        self
    }

    pub fn unsupported_type_behavior(mut self, value: UnsupportedTypeBehavior) -> Self {
        self.unsupported_type_behavior = value;
        self
    }

    pub fn custom_type_handler(
        mut self,
        handler: std::sync::Arc<dyn CustomTypeHandler + Send + Sync>,
    ) -> Self {
        self.custom_type_handler = Some(handler);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let options = Options::default();
        assert!(!options.escape_forward_slashes);
        assert!(!options.escape_unicode);
        assert!(!options.pretty_print);
        assert_eq!(
            options.unsupported_type_behavior,
            UnsupportedTypeBehavior::FailOnUnsupported
        );
        assert!(options.custom_type_handler.is_none());
    }

    #[test]
    fn builder_chains() {
        let options = Options::new().pretty_print(true).escape_unicode(true);
        assert!(options.pretty_print);
        assert!(options.escape_unicode);
    }
}
