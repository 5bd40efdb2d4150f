//! Common functionality shared across commands

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::TfGraphError>;
}

/// Trait for configurations that can be created from parsed command-line
/// arguments
pub trait FromCommand: Sized {
    fn from_command(command: crate::cli::Cli) -> Result<Self, crate::error::TfGraphError>;
}

/// Macro to implement `TryFrom<Cli>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Cli> for $config {
            type Error = $crate::error::TfGraphError;

            fn try_from(command: $crate::cli::Cli) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
