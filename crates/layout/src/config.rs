#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Hard cap on the number of pages a single layout may produce. Exceeding
    /// it aborts the layout with `LayoutError::PageLimitExceeded`.
    ///
    /// Defaults to `10_000`.
    pub max_pages: usize,
    /// Tolerance used when deciding whether content fits the remaining
    /// height, absorbing floating point noise.
    ///
    /// Defaults to `0.01`.
    pub fit_epsilon: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_pages: 10_000,
            fit_epsilon: 0.01,
        }
    }
}
