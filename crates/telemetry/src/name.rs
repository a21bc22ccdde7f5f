use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::context::CallContext;

/// Name used when a context carries no identifying information at all.
pub const ROOT_LOGGER: &str = "root";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("logger name is empty")]
    Empty,
    #[error("logger name '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// Dotted logger identifier, `module[.Type][.function]`.
///
/// Segments are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoggerName(String);

impl LoggerName {
    /// Builds the name for a call site.
    ///
    /// Rust module separators become dots. Empty segments are dropped, so a
    /// context without a function falls back to its module, and a context
    /// with nothing at all resolves to [`ROOT_LOGGER`].
    pub fn for_call(ctx: &CallContext, collapse_initializer: bool) -> Self {
        let module = ctx.module().replace("::", ".");
        let function = if collapse_initializer && ctx.is_initializer() {
            None
        } else {
            Some(ctx.function_name())
        };

        let segments = module
            .split('.')
            .chain(ctx.type_name())
            .chain(function)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();

        if segments.is_empty() {
            Self(ROOT_LOGGER.to_string())
        } else {
            Self(segments.join("."))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Immediate parent, `a.b` for `a.b.c`; `None` for a single segment.
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(parent, _)| parent)
    }

    /// The name itself followed by each dotted prefix, longest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(Some(self.0.as_str()), |name| {
            name.rsplit_once('.').map(|(parent, _)| parent)
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl FromStr for LoggerName {
    type Err = NameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() {
            return Err(NameError::Empty);
        }
        if value.split('.').any(str::is_empty) {
            return Err(NameError::EmptySegment(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }
}

impl fmt::Display for LoggerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LoggerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(ctx: CallContext, collapse: bool) -> String {
        LoggerName::for_call(&ctx, collapse).to_string()
    }

    #[test]
    fn plain_function() {
        assert_eq!(name(CallContext::function("app", "start"), false), "app.start");
    }

    #[test]
    fn instance_method() {
        let ctx = CallContext::instance("shapes", "draw", "shapes::Widget");
        assert_eq!(name(ctx, false), "shapes.Widget.draw");
        assert_eq!(name(ctx, true), "shapes.Widget.draw");
    }

    #[test]
    fn associated_function() {
        let ctx = CallContext::associated("shapes", "catalog", "Widget");
        assert_eq!(name(ctx, true), "shapes.Widget.catalog");
    }

    #[test]
    fn initializer_collapse() {
        let ctx = CallContext::instance("shapes", "new", "Widget");
        assert_eq!(name(ctx, true), "shapes.Widget");
        assert_eq!(name(ctx, false), "shapes.Widget.new");

        let ctx = CallContext::associated("shapes", "new", "Widget");
        assert_eq!(name(ctx, true), "shapes.Widget");
    }

    #[test]
    fn new_on_free_function_is_not_collapsed() {
        let ctx = CallContext::function("factory", "new");
        assert_eq!(name(ctx, true), "factory.new");
    }

    #[test]
    fn rust_module_paths_become_dotted() {
        let ctx = CallContext::function("my_crate::analytics", "run_query");
        assert_eq!(name(ctx, false), "my_crate.analytics.run_query");
    }

    #[test]
    fn missing_function_falls_back_to_module() {
        assert_eq!(name(CallContext::module_only("app::jobs"), false), "app.jobs");
        assert_eq!(name(CallContext::module_only(""), false), ROOT_LOGGER);
    }

    #[test]
    fn ancestors_walk_dotted_prefixes() {
        let name: LoggerName = "a.b.c".parse().unwrap();
        assert_eq!(name.ancestors().collect::<Vec<_>>(), vec!["a.b.c", "a.b", "a"]);
        assert_eq!(name.parent(), Some("a.b"));
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert_eq!("".parse::<LoggerName>(), Err(NameError::Empty));
        assert_eq!(
            "a..b".parse::<LoggerName>(),
            Err(NameError::EmptySegment("a..b".to_string()))
        );
        assert!(".a".parse::<LoggerName>().is_err());
    }
}
