//! Options controlling an export run.

/// Export behavior options for [`crate::codec::export_tooltips`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Glob matched against file names below the source directory.
    pub pattern: String,
    /// Propose tooltips for elements without one, from their caption or
    /// source expression.
    pub generate_tooltips: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pattern: "*".to_string(),
            generate_tooltips: false,
        }
    }
}

impl ExportOptions {
    /// Creates default export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file name pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Enables/disables tooltip generation.
    pub fn with_generate_tooltips(mut self, generate_tooltips: bool) -> Self {
        self.generate_tooltips = generate_tooltips;
        self
    }
}
