use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::context::CallContext;
use crate::name::LoggerName;
use crate::sink::{LogSink, TracingSink};

/// Registry of named loggers.
///
/// Cloning is cheap; clones share the same loggers and levels. Create one at
/// startup and hand it to whatever needs to log.
#[derive(Clone)]
pub struct LoggerRegistry {
    shared: Arc<Shared>,
}

struct Shared {
    sink: Arc<dyn LogSink>,
    default_level: LevelFilter,
    loggers: DashMap<LoggerName, Arc<Entry>>,
    levels: DashMap<String, LevelFilter>,
}

struct Entry {
    name: LoggerName,
}

impl LoggerRegistry {
    /// Registry that forwards to `tracing` with an `INFO` default level.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self::with_sink_and_level(sink, LevelFilter::INFO)
    }

    pub fn with_sink_and_level(sink: Arc<dyn LogSink>, default_level: LevelFilter) -> Self {
        Self {
            shared: Arc::new(Shared {
                sink,
                default_level,
                loggers: DashMap::new(),
                levels: DashMap::new(),
            }),
        }
    }

    /// Returns the logger for a call site, registering it on first use.
    pub fn resolve(&self, ctx: &CallContext, collapse_initializer: bool) -> LoggerHandle {
        let name = LoggerName::for_call(ctx, collapse_initializer);
        tracing::debug!(logger = %name, "generated hierarchical logger name");
        self.handle(name)
    }

    /// Returns the logger registered under `name`, registering it if absent.
    pub fn handle(&self, name: LoggerName) -> LoggerHandle {
        let entry = self
            .shared
            .loggers
            .entry(name.clone())
            .or_insert_with(|| Arc::new(Entry { name }))
            .clone();

        LoggerHandle {
            entry,
            shared: Arc::clone(&self.shared),
        }
    }

    /// Sets the level for `name` and every logger below it that has no
    /// level of its own.
    pub fn set_level(&self, name: &LoggerName, level: LevelFilter) {
        self.shared.levels.insert(name.to_string(), level);
    }

    /// Removes a level set with [`set_level`](Self::set_level).
    pub fn clear_level(&self, name: &LoggerName) {
        self.shared.levels.remove(name.as_str());
    }

    /// Level of the nearest configured ancestor, or the registry default.
    pub fn effective_level(&self, name: &LoggerName) -> LevelFilter {
        self.shared.effective_level(name)
    }

    pub fn contains(&self, name: &LoggerName) -> bool {
        self.shared.loggers.contains_key(name)
    }

    /// Number of registered loggers.
    pub fn len(&self) -> usize {
        self.shared.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.loggers.is_empty()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("default_level", &self.shared.default_level)
            .field("loggers", &self.shared.loggers.len())
            .finish()
    }
}

impl Shared {
    fn effective_level(&self, name: &LoggerName) -> LevelFilter {
        name.ancestors()
            .find_map(|ancestor| self.levels.get(ancestor).map(|level| *level))
            .unwrap_or(self.default_level)
    }
}

/// Handle to a named logger.
///
/// Handles for the same name from the same registry compare equal.
#[derive(Clone)]
pub struct LoggerHandle {
    entry: Arc<Entry>,
    shared: Arc<Shared>,
}

impl LoggerHandle {
    pub fn name(&self) -> &LoggerName {
        &self.entry.name
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level <= self.shared.effective_level(&self.entry.name)
    }

    pub fn log(&self, level: Level, message: impl AsRef<str>) {
        if self.is_enabled(level) {
            self.shared
                .sink
                .emit(&self.entry.name, level, message.as_ref());
        }
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(Level::TRACE, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Level::INFO, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Level::WARN, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Level::ERROR, message);
    }
}

impl PartialEq for LoggerHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl Eq for LoggerHandle {}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoggerHandle").field(&self.entry.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn registry() -> (LoggerRegistry, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (LoggerRegistry::with_sink(sink.clone()), sink)
    }

    fn name(value: &str) -> LoggerName {
        value.parse().unwrap()
    }

    struct Widget {
        loggers: LoggerRegistry,
    }

    impl Widget {
        fn new(loggers: &LoggerRegistry) -> (Self, LoggerHandle) {
            let logger = crate::scoped_logger!(loggers, class: Self, collapse);
            (
                Self {
                    loggers: loggers.clone(),
                },
                logger,
            )
        }

        fn draw(&self) -> LoggerHandle {
            crate::scoped_logger!(self.loggers, instance: self)
        }
    }

    fn start(loggers: &LoggerRegistry) -> LoggerHandle {
        crate::scoped_logger!(loggers)
    }

    #[test]
    fn resolves_names_from_call_sites() {
        let (loggers, _) = registry();
        let module = module_path!().replace("::", ".");

        let (widget, init_logger) = Widget::new(&loggers);
        assert_eq!(init_logger.name().as_str(), format!("{module}.Widget"));
        assert_eq!(widget.draw().name().as_str(), format!("{module}.Widget.draw"));
        assert_eq!(start(&loggers).name().as_str(), format!("{module}.start"));
    }

    #[test]
    fn same_call_site_returns_same_handle() {
        let (loggers, _) = registry();
        let first = start(&loggers);
        let second = start(&loggers);
        assert_eq!(first, second);
        assert_eq!(loggers.len(), 1);
    }

    #[test]
    fn separate_registries_do_not_share_handles() {
        let (a, _) = registry();
        let (b, _) = registry();
        assert_ne!(a.handle(name("app")), b.handle(name("app")));
    }

    #[test]
    fn concurrent_first_registration_converges() {
        let (loggers, _) = registry();
        let ctx = CallContext::function("app", "start");

        let handles = std::thread::scope(|scope| {
            let workers = (0..8)
                .map(|_| scope.spawn(|| loggers.resolve(&ctx, false)))
                .collect::<Vec<_>>();
            workers
                .into_iter()
                .map(|worker| worker.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert!(handles.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(loggers.len(), 1);
    }

    #[test]
    fn levels_inherit_from_nearest_ancestor() {
        let (loggers, sink) = registry();
        loggers.set_level(&name("app"), LevelFilter::WARN);
        loggers.set_level(&name("app.jobs"), LevelFilter::DEBUG);

        assert_eq!(loggers.effective_level(&name("app.web.index")), LevelFilter::WARN);
        assert_eq!(loggers.effective_level(&name("app.jobs.sync")), LevelFilter::DEBUG);
        assert_eq!(loggers.effective_level(&name("other")), LevelFilter::INFO);

        loggers.handle(name("app.web")).info("dropped");
        loggers.handle(name("app.web")).error("kept");
        loggers.handle(name("app.jobs.sync")).debug("kept too");

        let messages = sink
            .records()
            .into_iter()
            .map(|record| (record.logger, record.message))
            .collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec![
                ("app.web".to_string(), "kept".to_string()),
                ("app.jobs.sync".to_string(), "kept too".to_string()),
            ]
        );

        loggers.clear_level(&name("app.jobs"));
        assert_eq!(loggers.effective_level(&name("app.jobs.sync")), LevelFilter::WARN);
    }

    #[test]
    fn handle_emits_to_sink_with_level() {
        let (loggers, sink) = registry();
        loggers
            .resolve(&CallContext::function("shapes", "draw"), false)
            .warn("careful");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].logger, "shapes.draw");
        assert_eq!(records[0].level, Level::WARN);
        assert_eq!(records[0].message, "careful");
    }
}
