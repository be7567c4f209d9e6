use bindargs::{ArgumentError, ConfigurationError};

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("the command-line declarations are invalid")]
    Declarations(#[from] ConfigurationError),

    #[error("invalid command line; use -help for usage")]
    CommandLine(#[from] ArgumentError),

    #[error("-verbose and -quiet can't both be given")]
    Conflict,
}

impl DemoError {
    /// Process exit code for this error. Bad input and broken declarations
    /// are told apart so scripts can distinguish them.
    pub fn exit_code(&self) -> u8 {
        match self {
            DemoError::Declarations(_) => 3,
            DemoError::CommandLine(_) | DemoError::Conflict => 2,
        }
    }
}
