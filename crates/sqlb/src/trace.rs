use crate::config::BuilderConfig;
use tracing::Level;

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn truncate_sql<'a>(config: &BuilderConfig, sql: &'a str) -> std::borrow::Cow<'a, str> {
    match config.max_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)).into(),
        _ => sql.into(),
    }
}

/// Emit the text produced by a render pass.
pub(crate) fn rendered(config: &BuilderConfig, sql: &str, placeholders: u32) {
    /// Dispatch a tracing event at a runtime-determined level.
    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN  => tracing::warn!($($field)*),
                Level::INFO  => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    let sql = truncate_sql(config, sql);
    emit_at_level!(
        config.trace_level,
        target: "sqlb.sql",
        placeholders,
        sql = %sql,
        "rendered statement"
    );
}
