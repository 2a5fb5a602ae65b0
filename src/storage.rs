//! Storage source interface for the stored light program.

/// Errors reported by the storage source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The storage medium could not be opened.
    Unavailable,

    /// The requested program file does not exist.
    FileMissing,

    /// The program file's header failed verification.
    InvalidProgram,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage medium unavailable"),
            StorageError::FileMissing => write!(f, "program file not found"),
            StorageError::InvalidProgram => write!(f, "program file header invalid"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

/// Trait for abstracting the program file storage (SD card, flash, host fs).
///
/// Only touched from the main loop during startup, so methods take
/// `&mut self`.
pub trait Storage {
    /// Opaque handle to an opened program file.
    type ProgramHandle;

    /// Opens the storage medium.
    ///
    /// # Errors
    /// Returns [`StorageError::Unavailable`] if the medium cannot be opened.
    fn open(&mut self) -> Result<(), StorageError>;

    /// Opens the named program file for reading.
    ///
    /// # Errors
    /// Returns [`StorageError::FileMissing`] if the file does not exist.
    fn open_program_file(&mut self, name: &str) -> Result<Self::ProgramHandle, StorageError>;

    /// Verifies the program file's header.
    ///
    /// The default implementation accepts everything; implementations that
    /// understand the program format should return
    /// [`StorageError::InvalidProgram`] on a bad header, which routes startup
    /// into [`crate::SystemState::ErrorBadProgram`].
    fn verify_program(&mut self, program: &Self::ProgramHandle) -> Result<(), StorageError> {
        let _ = program;
        Ok(())
    }
}
