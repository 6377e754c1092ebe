//! Canonical logging macros

/// Log the start of an operation
///
/// ```
/// # use graphdelta_core::log_op_start;
/// log_op_start!("compute_diff");
/// log_op_start!("compute_diff", type_name = "Person");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use graphdelta_core::log_op_end;
/// log_op_end!("compute_diff", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into a [`GdError`](crate::errors::GdError) so the
/// emitted kind and code are the canonical ones.
///
/// ```
/// # use graphdelta_core::{log_op_error, errors::GraphDeltaError};
/// let err = GraphDeltaError::UnknownType { type_name: "Ghost".to_string() };
/// log_op_error!("compute_diff", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let gd_err: $crate::errors::GdError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?gd_err.kind(),
            err.code = gd_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let gd_err: $crate::errors::GdError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?gd_err.kind(),
            err.code = gd_err.code(),
            $($field)*
        );
    }};
}
