/// Per-builder rendering options.
///
/// The defaults suit most callers: renders borrow scratch buffers from the
/// process-wide pool and, with the `tracing` feature, rendered SQL is logged
/// at `DEBUG` truncated to 200 bytes.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Borrow render buffers from the shared pool.
    pub use_pool: bool,
    /// Initial capacity of a private render buffer when the pool is disabled.
    pub scratch_capacity: usize,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
    /// Tracing event level for rendered SQL.
    #[cfg(feature = "tracing")]
    pub trace_level: tracing::Level,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            use_pool: true,
            scratch_capacity: 256,
            max_sql_length: Some(200),
            #[cfg(feature = "tracing")]
            trace_level: tracing::Level::DEBUG,
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into private buffers of `capacity` bytes instead of pooled ones.
    pub fn disable_pool(mut self, capacity: usize) -> Self {
        self.use_pool = false;
        self.scratch_capacity = capacity;
        self
    }

    /// Render into pooled buffers.
    pub fn enable_pool(mut self) -> Self {
        self.use_pool = true;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Override the tracing event level.
    #[cfg(feature = "tracing")]
    pub fn with_trace_level(mut self, level: tracing::Level) -> Self {
        self.trace_level = level;
        self
    }
}
