//! ---
//! wusim_section: "03-logging"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Context-enriched logging macros."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---

#[doc(hidden)]
#[macro_export]
macro_rules! __wu_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx: &$crate::LogContext = &$ctx;
        $crate::tracing::event!(
            $level,
            workunit = ctx.workunit.unwrap_or(""),
            slot = ctx.slot.unwrap_or(""),
            step = ctx.step.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with harness context.
#[macro_export]
macro_rules! wu_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__wu_event!($crate::tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__wu_event!($crate::tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with harness context.
#[macro_export]
macro_rules! wu_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__wu_event!($crate::tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__wu_event!($crate::tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with harness context.
#[macro_export]
macro_rules! wu_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__wu_event!($crate::tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__wu_event!($crate::tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}
