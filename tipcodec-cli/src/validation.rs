use std::path::{Path, PathBuf};

/// Validation context for the export and import commands
#[derive(Debug, Default)]
pub struct ValidationContext {
    pub source_dir: Option<PathBuf>,
    pub pattern: Option<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    pub fn with_pattern(mut self, pattern: String) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_file = Some(file);
        self
    }

    pub fn with_output_file(mut self, file: String) -> Self {
        self.output_file = Some(file);
        self
    }
}

/// Split an export source such as `objects/*.json` into its directory and
/// file name pattern. A bare directory selects every file in it.
pub fn split_source(source: &str) -> Result<(PathBuf, String), String> {
    if source.trim().is_empty() {
        return Err("Source cannot be empty".to_string());
    }

    let path = Path::new(source);
    if path.is_dir() {
        return Ok((path.to_path_buf(), "*".to_string()));
    }

    let pattern = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("Source has no file pattern: {}", source))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, pattern))
}

/// Validate directory exists
pub fn validate_directory(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", path.display()));
    }

    Ok(())
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate the output file can be created in an existing directory
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(format!(
                "Output directory does not exist: {}",
                parent.display()
            ));
        }
    }

    Ok(())
}

/// Validate a file name pattern
pub fn validate_pattern(pattern: &str) -> Result<(), String> {
    if pattern.is_empty() {
        return Err("Pattern cannot be empty".to_string());
    }

    if pattern.contains(['/', '\\']) {
        return Err(format!(
            "Pattern must match file names only, not paths: {}",
            pattern
        ));
    }

    Ok(())
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref dir) = context.source_dir {
        validate_directory(dir).map_err(|e| format!("Source validation failed: {}", e))?;
    }

    if let Some(ref pattern) = context.pattern {
        validate_pattern(pattern).map_err(|e| format!("Source validation failed: {}", e))?;
    }

    if let Some(ref input) = context.input_file {
        validate_file_path(input).map_err(|e| format!("Input validation failed: {}", e))?;
    }

    if let Some(ref output) = context.output_file {
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
    }

    Ok(())
}
