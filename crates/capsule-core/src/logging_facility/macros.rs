//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log service
//! operations. Every event carries `component`, `op` and `event`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use capsule_core::log_op_start;
/// log_op_start!("create");
/// log_op_start!("approve", capsule_id = "c1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::capsule_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::capsule_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use capsule_core::log_op_end;
/// log_op_end!("create", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::capsule_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::capsule_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log a mutation that was skipped because its record is absent
///
/// # Example
///
/// ```
/// # use capsule_core::log_op_skipped;
/// log_op_skipped!("view", capsule_id = "missing");
/// ```
#[macro_export]
macro_rules! log_op_skipped {
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::capsule_core_types::schema::EVENT_SKIPPED,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything `ExError` can be built from (an `ExError`, a
/// `CapsuleError`, or a reference to either).
///
/// # Example
///
/// ```
/// # use capsule_core::log_op_error;
/// # use capsule_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Persistence).with_message("disk full");
/// log_op_error!("save", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err = $crate::errors::ExError::from($err.clone());
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::capsule_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err = $crate::errors::ExError::from($err.clone());
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::capsule_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($field)*
        );
    }};
}
