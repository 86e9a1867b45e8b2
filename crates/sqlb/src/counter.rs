/// Placeholder sequence for one statement.
///
/// The renderer pulls `$n` indices from here in render order. It is owned by a
/// single [`Builder`](crate::Builder) and never synchronized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    index: u32,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the new value. The first call returns 1.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        self.index += 1;
        self.index
    }

    /// Current value (the number of placeholders handed out so far).
    pub fn get(&self) -> u32 {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
