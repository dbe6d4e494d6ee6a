/*!
Error types for every stage of a flag's life: building it from loose
arguments, validating its names, registering it with the host flag set, and
parsing values from the command line.
 */

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Exit status used when a flag was declared with unusable arguments.
pub const CONSTRUCTION_EXIT_CODE: i32 = 127;

/// Exit status used when a flag's names or description are invalid.
pub const VALIDATION_EXIT_CODE: i32 = 128;

/// Exit status used when the command line itself couldn't be parsed.
pub const USAGE_EXIT_CODE: i32 = 127;

/// The arguments passed to the flag builder can't describe a flag. This is a
/// mistake in the program declaring the flag, not in its user's input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("flagdoc: no storage was given for the flag")]
    MissingStorage,

    #[error("flagdoc: more than one storage was given for the flag")]
    DuplicateStorage,

    #[error("flagdoc: more than one default value was given for the flag")]
    DuplicateDefault,

    #[error("flagdoc: too many boolean arguments were given for the flag")]
    TooManyBooleans,
}

/// The flag was built, but its names or description are unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("flagdoc: no flag provided")]
    NoName,

    #[error("flagdoc: invalid short flag {0:?} has length greater than 1")]
    InvalidShort(String),

    #[error("flagdoc: invalid long flag {0:?} has length equal to 1")]
    InvalidLong(String),

    #[error("flagdoc: no description provided for {0:?} flag")]
    NoDescription(String),
}

/// The flag couldn't be bound to its storage in the host flag set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("flagdoc: flag {flag:?} stores a {expected} but its default is a {found}")]
    TypeMismatch {
        flag: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("flagdoc: flag {flag:?} stores a {expected} but no default was given")]
    MissingDefault { flag: String, expected: &'static str },

    #[error("flagdoc: flag redefined: {0}")]
    Redefined(String),
}

/// Any failure while adding a flag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl FlagError {
    /// The process exit status that reports this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            FlagError::Construction(_) => CONSTRUCTION_EXIT_CODE,
            FlagError::Validation(_) => VALIDATION_EXIT_CODE,
            FlagError::Registration(_) => 1,
        }
    }
}

/// A value from the command line couldn't be stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("failed to parse {value:?} as bool")]
    InvalidBool { value: String },

    #[error("failed to parse {value:?} as float: {source}")]
    InvalidFloat {
        value: String,
        source: ParseFloatError,
    },

    #[error("failed to parse {value:?} as int: {source}")]
    InvalidInt {
        value: String,
        source: ParseIntError,
    },

    #[error("failed to parse {value:?} as uint: {source}")]
    InvalidUint {
        value: String,
        source: ParseIntError,
    },

    #[error("{value:?} is out of range for {kind}")]
    OutOfRange { value: String, kind: &'static str },
}

/// The command line couldn't be applied to the registered flags.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("flag provided but not defined: {0}")]
    Unrecognized(String),

    #[error("flag needs an argument: {0}")]
    NeedsArgument(String),

    #[error("invalid value for flag {option}: {source}")]
    InvalidValue {
        option: String,
        source: ValueError,
    },

    #[error("usage message was requested")]
    HelpRequested,

    #[error("readme was requested")]
    ReadmeRequested,
}
