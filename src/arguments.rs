use std::path::Path;

/// What's left of a command line once the flags have been consumed: the
/// positional arguments, plus a count of the flags that were set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    positionals: Vec<String>,
    nflag: usize,
}

impl Arguments {
    #[must_use]
    pub fn new(positionals: Vec<String>, nflag: usize) -> Self {
        Self { positionals, nflag }
    }

    /// The `i`th positional argument, if there is one.
    #[inline]
    #[must_use]
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.positionals.get(i).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.positionals
    }

    /// Number of positional arguments.
    #[inline]
    #[must_use]
    pub fn narg(&self) -> usize {
        self.positionals.len()
    }

    /// Number of distinct flag names that appeared on the command line.
    #[inline]
    #[must_use]
    pub fn nflag(&self) -> usize {
        self.nflag
    }

    #[must_use]
    pub fn into_args(self) -> Vec<String> {
        self.positionals
    }
}

/// Load the process's arguments, excluding the program name. Arguments that
/// aren't valid UTF-8 are converted lossily.
#[must_use]
pub fn from_env() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// `argv[0]` as given to the process, for the default usage banner.
#[must_use]
pub fn argv0() -> String {
    std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The file name of the running program, for the default readme title.
#[must_use]
pub fn program_name() -> String {
    let argv0 = argv0();
    let name = Path::new(&argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    name.unwrap_or(argv0)
}
