//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map SettingsError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use site_config::SettingsError;

/// Structured exit codes for site-settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    #[allow(dead_code)]
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// No settings source named - SITE_SETTINGS_MODULE unset and no --settings.
    ///
    /// Scripts should pass --settings or export SITE_SETTINGS_MODULE.
    SourceUndefined = 2,

    /// The settings source could not be found or parsed.
    ///
    /// Scripts should check the search path and the source's syntax.
    SourceUnloadable = 3,

    /// The requested setting does not exist.
    UnknownSetting = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&SettingsError> for ExitCode {
    fn from(err: &SettingsError) -> Self {
        match err {
            SettingsError::SourceUndefined { .. } => ExitCode::SourceUndefined,
            SettingsError::SourceUnloadable { .. } => ExitCode::SourceUnloadable,
            SettingsError::UnknownSetting(_) => ExitCode::UnknownSetting,
            SettingsError::AlreadyConfigured
            | SettingsError::InvalidValue { .. }
            | SettingsError::DotenvParse { .. }
            | SettingsError::DotenvIo { .. }
            | SettingsError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no SettingsError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<SettingsError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
