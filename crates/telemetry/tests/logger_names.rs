use std::sync::Arc;

use stencil_telemetry::{call_context, CallContext, Level, LoggerRegistry, MemorySink};

mod shapes {
    use std::pin::Pin;
    use std::sync::Arc;

    use stencil_telemetry::{scoped_logger, LoggerHandle, LoggerRegistry};

    pub struct Widget {
        pub init_logger: LoggerHandle,
    }

    impl Widget {
        pub fn new(loggers: &LoggerRegistry, collapse: bool) -> Self {
            let init_logger = if collapse {
                scoped_logger!(loggers, class: Self, collapse)
            } else {
                scoped_logger!(loggers, class: Self)
            };
            Self { init_logger }
        }

        pub fn draw(&self, loggers: &LoggerRegistry) -> LoggerHandle {
            scoped_logger!(loggers, instance: self)
        }

        pub fn catalog(loggers: &LoggerRegistry) -> LoggerHandle {
            scoped_logger!(loggers, class: Self)
        }

        pub fn spawn_draw(self: Arc<Self>, loggers: &LoggerRegistry) -> LoggerHandle {
            scoped_logger!(loggers, instance: self)
        }

        pub fn boxed(self: Box<Self>, loggers: &LoggerRegistry) -> LoggerHandle {
            scoped_logger!(loggers, instance: self)
        }

        pub fn pinned(self: Pin<&mut Self>, loggers: &LoggerRegistry) -> LoggerHandle {
            scoped_logger!(loggers, instance: self)
        }

        pub fn consume(self, loggers: &LoggerRegistry) -> LoggerHandle {
            scoped_logger!(loggers, instance: &self)
        }
    }
}

mod app {
    use stencil_telemetry::{scoped_logger, LoggerHandle, LoggerRegistry};

    pub fn start(loggers: &LoggerRegistry) -> LoggerHandle {
        scoped_logger!(loggers)
    }

    pub async fn serve(loggers: &LoggerRegistry) -> LoggerHandle {
        scoped_logger!(loggers)
    }
}

fn resolve(ctx: CallContext, collapse: bool) -> String {
    LoggerRegistry::new()
        .resolve(&ctx, collapse)
        .name()
        .to_string()
}

#[test]
fn explicit_contexts_match_documented_names() {
    assert_eq!(
        resolve(CallContext::instance("shapes", "draw", "Widget"), false),
        "shapes.Widget.draw"
    );
    assert_eq!(resolve(CallContext::function("app", "start"), false), "app.start");
    assert_eq!(
        resolve(CallContext::instance("shapes", "new", "Widget"), true),
        "shapes.Widget"
    );
    assert_eq!(
        resolve(CallContext::instance("shapes", "new", "Widget"), false),
        "shapes.Widget.new"
    );
}

#[test]
fn macros_capture_module_type_and_function() {
    let loggers = LoggerRegistry::new();
    let widget = shapes::Widget::new(&loggers, true);

    assert_eq!(widget.init_logger.name().as_str(), "logger_names.shapes.Widget");
    assert_eq!(
        shapes::Widget::new(&loggers, false).init_logger.name().as_str(),
        "logger_names.shapes.Widget.new"
    );
    assert_eq!(
        widget.draw(&loggers).name().as_str(),
        "logger_names.shapes.Widget.draw"
    );
    assert_eq!(
        shapes::Widget::catalog(&loggers).name().as_str(),
        "logger_names.shapes.Widget.catalog"
    );
    assert_eq!(app::start(&loggers).name().as_str(), "logger_names.app.start");
}

#[test]
fn smart_pointer_receivers_name_the_inner_type() {
    let loggers = LoggerRegistry::new();
    let widget = || shapes::Widget::new(&loggers, true);

    assert_eq!(
        Arc::new(widget()).spawn_draw(&loggers).name().as_str(),
        "logger_names.shapes.Widget.spawn_draw"
    );
    assert_eq!(
        Box::new(widget()).boxed(&loggers).name().as_str(),
        "logger_names.shapes.Widget.boxed"
    );
    assert_eq!(
        Box::pin(widget()).as_mut().pinned(&loggers).name().as_str(),
        "logger_names.shapes.Widget.pinned"
    );
    assert_eq!(
        widget().consume(&loggers).name().as_str(),
        "logger_names.shapes.Widget.consume"
    );
}

#[tokio::test]
async fn async_functions_are_named_after_the_function() {
    let loggers = LoggerRegistry::new();
    let handle = app::serve(&loggers).await;
    assert_eq!(handle.name().as_str(), "logger_names.app.serve");
}

#[test]
fn repeated_resolution_shares_one_sink_entry() {
    let sink = Arc::new(MemorySink::new());
    let loggers = LoggerRegistry::with_sink(sink.clone());

    let first = app::start(&loggers);
    let second = app::start(&loggers);
    assert_eq!(first, second);

    first.info("one");
    second.info("two");
    let loggers_seen = sink
        .records()
        .into_iter()
        .map(|record| record.logger)
        .collect::<Vec<_>>();
    assert_eq!(loggers_seen, vec!["logger_names.app.start"; 2]);
}

#[test]
fn module_only_context_never_fails() {
    let sink = Arc::new(MemorySink::new());
    let loggers = LoggerRegistry::with_sink(sink.clone());

    let logger = loggers.resolve(&CallContext::module_only(module_path!()), false);
    logger.log(Level::ERROR, "still logged");

    assert_eq!(logger.name().as_str(), "logger_names");
    assert_eq!(sink.records()[0].message, "still logged");
    assert_eq!(call_context!().function_name(), "module_only_context_never_fails");
}
