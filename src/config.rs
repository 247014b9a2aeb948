use std::path::PathBuf;

/// Environment variable holding the optional instance nesting limit.
///
/// The JSON and YAML parsers already refuse documents nested 128 levels deep,
/// so only limits below 128 can reject a parsed instance.
pub const MAX_DEPTH_ENV: &str = "SCHEMA_CONSISTENCY_MAX_DEPTH";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("usage: schema-consistency <SCHEMA_FILE> <INSTANCE_FILE>")]
    Usage,
    #[error("SCHEMA_CONSISTENCY_MAX_DEPTH must be a positive integer, got {0:?}")]
    InvalidMaxDepth(String),
}

/// Checker configuration loaded from command-line arguments and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub schema_path: PathBuf,
    pub instance_path: PathBuf,
    pub max_depth: Option<usize>,
}

impl CheckerConfig {
    /// Load configuration.
    ///
    /// - argument 1 (required): schema document path
    /// - argument 2 (required): instance document path
    /// - `SCHEMA_CONSISTENCY_MAX_DEPTH` (optional): reject instances nested
    ///   deeper than this before checking
    ///
    /// `args` excludes the program name.
    pub fn from_args_and_env<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::from_parts(args, std::env::var(MAX_DEPTH_ENV).ok())
    }

    pub fn from_parts<I>(args: I, max_depth: Option<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let (Some(schema_path), Some(instance_path), None) = (args.next(), args.next(), args.next())
        else {
            return Err(ConfigError::Usage);
        };

        let max_depth = match max_depth {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => Some(depth),
                _ => return Err(ConfigError::InvalidMaxDepth(raw)),
            },
            None => None,
        };

        Ok(Self {
            schema_path: PathBuf::from(schema_path),
            instance_path: PathBuf::from(instance_path),
            max_depth,
        })
    }
}
