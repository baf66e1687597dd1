//! Structured logging helpers.
//!
//! Consistent field names across subsystems so that JSON logs can be
//! filtered by `subsystem`, `block_height` and `llmq_type`.

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a block-related event with standard fields.
#[macro_export]
macro_rules! log_block_event {
    ($level:ident, $subsystem:expr, $msg:expr, $block_height:expr, $block_hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            block_height = $block_height,
            block_hash = %$block_hash,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a quorum-related event with standard fields.
#[macro_export]
macro_rules! log_quorum_event {
    ($level:ident, $subsystem:expr, $msg:expr, $llmq_type:expr, $block_height:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            llmq_type = %$llmq_type,
            block_height = $block_height,
            $($($field)*,)?
            $msg
        )
    };
}
