//! Call-site context used to build hierarchical logger names.
//!
//! A [`CallContext`] is normally captured by the [`call_context!`](crate::call_context)
//! macro, which records `module_path!()` and the enclosing function name at
//! compile time. It can also be built by hand when the caller already knows
//! its identity (for example when names come from another runtime).

/// Name Rust code conventionally gives to constructors.
pub const INITIALIZER_NAME: &str = "new";

/// How the current call relates to a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Free function, no type segment.
    None,
    /// Method called on a value; holds the short runtime type name.
    Instance(&'static str),
    /// Associated function called on the type itself.
    Type(&'static str),
}

/// Identifying information about the immediately enclosing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    module: &'static str,
    function: &'static str,
    receiver: Receiver,
}

impl CallContext {
    /// Context for a free function.
    pub const fn function(module: &'static str, function: &'static str) -> Self {
        Self {
            module,
            function,
            receiver: Receiver::None,
        }
    }

    /// Context for a method invoked on a value of type `type_name`.
    ///
    /// `type_name` may be a full path as produced by [`std::any::type_name`];
    /// only its last segment is kept.
    pub fn instance(module: &'static str, function: &'static str, type_name: &'static str) -> Self {
        Self {
            module,
            function,
            receiver: Receiver::Instance(short_type_name(type_name)),
        }
    }

    /// Context for an associated function of `type_name`.
    pub fn associated(
        module: &'static str,
        function: &'static str,
        type_name: &'static str,
    ) -> Self {
        Self {
            module,
            function,
            receiver: Receiver::Type(short_type_name(type_name)),
        }
    }

    /// Context with no caller information beyond the module.
    pub const fn module_only(module: &'static str) -> Self {
        Self::function(module, "")
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    pub fn function_name(&self) -> &'static str {
        self.function
    }

    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    /// Type segment, if the call has a receiver.
    pub fn type_name(&self) -> Option<&'static str> {
        match self.receiver {
            Receiver::None => None,
            Receiver::Instance(name) | Receiver::Type(name) => Some(name),
        }
    }

    /// True when the call is a constructor on a type.
    pub fn is_initializer(&self) -> bool {
        self.receiver != Receiver::None && self.function == INITIALIZER_NAME
    }
}

/// Strips the module path and generic arguments from a type name.
///
/// `alloc::vec::Vec<u8>` becomes `Vec`, `&shapes::Widget` becomes `Widget`.
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = match full.find('<') {
        Some(idx) => &full[..idx],
        None => full,
    };
    let base = base.trim_start_matches(['&', '*']);
    let base = base.strip_prefix("mut ").unwrap_or(base);
    let base = base.strip_prefix("dyn ").unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base)
}

/// Extracts the enclosing function name from the type path of an item
/// declared inside it.
///
/// The path looks like `crate::module::function::{{closure}}::__here`;
/// closure frames produced by async bodies and closures are skipped.
pub fn function_name_from_path(path: &'static str) -> &'static str {
    let mut rest = path.strip_suffix("::__here").unwrap_or(path);
    while let Some(stripped) = rest.strip_suffix("::{{closure}}") {
        rest = stripped;
    }
    rest.rsplit("::").next().unwrap_or(rest)
}

#[doc(hidden)]
pub fn type_name_of<T: ?Sized>(_value: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// Name of the enclosing function, resolved at compile time.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        $crate::context::function_name_from_path($crate::context::type_name_of(&__here))
    }};
}

/// Captures the [`CallContext`] of the enclosing function.
///
/// ```ignore
/// fn start() {
///     let ctx = call_context!();                 // app.start
/// }
///
/// impl Widget {
///     fn draw(&self) {
///         let ctx = call_context!(instance: self); // shapes.Widget.draw
///     }
///
///     fn catalog() {
///         let ctx = call_context!(class: Self);    // shapes.Widget.catalog
///     }
///
///     fn spawn(self: Arc<Self>) {
///         let ctx = call_context!(instance: self); // shapes.Widget.spawn
///     }
/// }
/// ```
///
/// The receiver is dereferenced once, so `&self`, `Arc<Self>`, `Box<Self>`
/// and `Pin<&mut Self>` all name the inner type. Methods taking `self` by
/// value pass `instance: &self`.
#[macro_export]
macro_rules! call_context {
    () => {
        $crate::CallContext::function(::std::module_path!(), $crate::__function_name!())
    };
    (instance: $receiver:expr) => {
        $crate::CallContext::instance(
            ::std::module_path!(),
            $crate::__function_name!(),
            $crate::context::type_name_of(&*$receiver),
        )
    };
    (class: $ty:ty) => {
        $crate::CallContext::associated(
            ::std::module_path!(),
            $crate::__function_name!(),
            ::std::any::type_name::<$ty>(),
        )
    };
}

/// Resolves a logger for the enclosing function from a [`LoggerRegistry`](crate::LoggerRegistry).
///
/// Accepts the same receiver forms as [`call_context!`]; a trailing
/// `, collapse` drops the method segment for constructors.
#[macro_export]
macro_rules! scoped_logger {
    ($registry:expr) => {
        $registry.resolve(&$crate::call_context!(), false)
    };
    ($registry:expr, instance: $receiver:expr) => {
        $registry.resolve(&$crate::call_context!(instance: $receiver), false)
    };
    ($registry:expr, instance: $receiver:expr, collapse) => {
        $registry.resolve(&$crate::call_context!(instance: $receiver), true)
    };
    ($registry:expr, class: $ty:ty) => {
        $registry.resolve(&$crate::call_context!(class: $ty), false)
    };
    ($registry:expr, class: $ty:ty, collapse) => {
        $registry.resolve(&$crate::call_context!(class: $ty), true)
    };
}
