/*!
The context object that programs declare their flags on, and the result of
parsing a command line with it.
 */

use std::io;
use std::process;

use crate::arguments::{self, Arguments};
use crate::config::Config;
use crate::error::{FlagError, ParseError, RegistrationError, USAGE_EXIT_CODE};
use crate::flag::{self, CliFlag, FlagArg};
use crate::host::{BindingId, FlagSet};
use crate::registry::Registry;
use crate::section::Section;
use crate::storage::ValueKind;

/**
Flags, sections and help configuration for one program.

The `'a` lifetime is that of the storage borrowed by each flag. Parsing with
[`parse`][Cli::parse] or [`parse_from`][Cli::parse_from] consumes the `Cli`,
which ends those borrows, so the parsed values can be read right afterwards.

Every `Cli` starts with two built-in flags: `-h`/`--help`, which prints the
usage message, and a hidden `--readme`, which prints a Markdown reference.
 */
#[derive(Debug)]
pub struct Cli<'a> {
    registry: Registry,
    host: FlagSet<'a>,
    help: BindingId,
    readme: BindingId,
}

impl<'a> Cli<'a> {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut registry = Registry::new(config);
        let (host, [help, readme]) = FlagSet::with_switches([&["h", "help"], &["readme"]]);

        registry.add_flag(CliFlag::new(
            "h",
            "help",
            "Display this help message.",
            ValueKind::Bool,
            false,
        ));
        registry.add_flag(CliFlag::new(
            "",
            "readme",
            "Autogenerate a README.md file.",
            ValueKind::Bool,
            true,
        ));

        Self {
            registry,
            host,
            help,
            readme,
        }
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        self.registry.config()
    }

    /// Declare a flag, reporting every kind of failure to the caller.
    pub fn try_flag(&mut self, args: impl IntoIterator<Item = FlagArg<'a>>) -> Result<(), FlagError> {
        let pending = flag::build(args)?;
        pending.flag().validate()?;
        let flag = pending.enable(&mut self.host)?;

        tracing::debug!(
            short = flag.short(),
            long = flag.long(),
            kind = ?flag.kind(),
            hidden = flag.hidden(),
            "registered flag"
        );

        self.registry.add_flag(flag);
        Ok(())
    }

    /**
    Declare a flag. Usually called through the [`flag!`][crate::flag!]
    macro.

    A declaration that can't describe a flag at all is a bug in the program,
    so the error is printed and the process exits: with
    [`CONSTRUCTION_EXIT_CODE`][crate::CONSTRUCTION_EXIT_CODE] for unusable
    arguments, or [`VALIDATION_EXIT_CODE`][crate::VALIDATION_EXIT_CODE] for
    bad names or a missing description. Failing to bind the flag's storage is
    returned instead.
     */
    pub fn flag(
        &mut self,
        args: impl IntoIterator<Item = FlagArg<'a>>,
    ) -> Result<(), RegistrationError> {
        match self.try_flag(args) {
            Ok(()) => Ok(()),
            Err(FlagError::Registration(error)) => Err(error),
            Err(error) => {
                tracing::warn!(%error, "fatal flag declaration");
                eprintln!("{error}");
                process::exit(error.exit_code())
            }
        }
    }

    /// Add a free-form section, shown after the options.
    pub fn section(&mut self, title: impl Into<String>, text: impl Into<String>) {
        self.registry.add_section(Section::new(title, text));
    }

    /// Add a section of `key<align_on>value` lines, with the values lined up.
    pub fn aligned_section(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        align_on: impl Into<String>,
    ) {
        self.registry
            .add_section(Section::aligned(title, text, align_on));
    }

    /// Parse `args` (excluding the program name). Requests for help or the
    /// readme are reported as errors, so that the caller decides what to do
    /// with them.
    pub fn try_parse_from<I>(&mut self, args: I) -> Result<Arguments, ParseError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .collect();

        let arguments = self.host.parse(args.iter().map(String::as_str))?;

        if self.host.is_on(self.help) {
            tracing::debug!("usage message was requested");
            return Err(ParseError::HelpRequested);
        }

        if self.host.is_on(self.readme) {
            tracing::debug!("readme was requested");
            return Err(ParseError::ReadmeRequested);
        }

        Ok(arguments)
    }

    /**
    Parse `args` (excluding the program name), handling everything that
    isn't a successful parse:

    - `--help` prints the usage message to stderr and exits with 0;
    - `--readme` prints the Markdown reference to stdout and exits with 0;
    - any other error is printed, followed by the usage message, and the
      process exits with [`USAGE_EXIT_CODE`].
     */
    pub fn parse_from<I>(mut self, args: I) -> Parsed
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        match self.try_parse_from(args) {
            Ok(arguments) => Parsed {
                registry: self.registry,
                arguments,
            },
            Err(ParseError::HelpRequested) => self.registry.usage(0),
            Err(ParseError::ReadmeRequested) => self.registry.readme(),
            Err(error) => {
                tracing::warn!(%error, "failed to parse command line");
                eprintln!("{error}");
                self.registry.usage(USAGE_EXIT_CODE)
            }
        }
    }

    /// Parse the process's own command line. See
    /// [`parse_from`][Cli::parse_from].
    pub fn parse(self) -> Parsed {
        self.parse_from(arguments::from_env())
    }

    /// Write the usage message to `out`.
    pub fn write_usage(&mut self, out: &mut (impl io::Write + ?Sized)) -> io::Result<()> {
        self.registry.write_usage(out)
    }

    /// Write the Markdown reference to `out`.
    pub fn write_readme(&mut self, out: &mut (impl io::Write + ?Sized)) -> io::Result<()> {
        self.registry.write_readme(out)
    }

    /// Print the usage message to stderr and exit with `status`.
    pub fn usage(&mut self, status: i32) -> ! {
        self.registry.usage(status)
    }
}

/// A successfully parsed command line, along with the flag declarations so
/// that the program can still print its usage.
#[derive(Debug, Clone)]
pub struct Parsed {
    registry: Registry,
    arguments: Arguments,
}

impl Parsed {
    #[inline]
    #[must_use]
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The `i`th positional argument, if there is one.
    #[inline]
    #[must_use]
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.arguments.arg(i)
    }

    #[inline]
    #[must_use]
    pub fn args(&self) -> &[String] {
        self.arguments.args()
    }

    #[inline]
    #[must_use]
    pub fn narg(&self) -> usize {
        self.arguments.narg()
    }

    #[inline]
    #[must_use]
    pub fn nflag(&self) -> usize {
        self.arguments.nflag()
    }

    /// Print the usage message to stderr and exit with `status`, for
    /// rejecting positional arguments after parsing.
    pub fn usage(&mut self, status: i32) -> ! {
        self.registry.usage(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{Counter, IntList};

    fn config() -> Config {
        Config {
            title: "test".to_owned(),
            banner: "test [OPTIONS]".to_owned(),
            ..Config::default()
        }
    }

    #[test]
    fn builtins_are_registered() {
        let cli = Cli::new(config());
        let flags = cli.registry().flags();

        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].name(), "help");
        assert!(flags[1].hidden());
    }

    #[test]
    fn help_is_reported() {
        let mut cli = Cli::new(config());
        assert_eq!(
            cli.try_parse_from(["--help"]),
            Err(ParseError::HelpRequested)
        );
    }

    #[test]
    fn readme_is_reported() {
        let mut cli = Cli::new(config());
        assert_eq!(
            cli.try_parse_from(["--readme"]),
            Err(ParseError::ReadmeRequested)
        );
    }

    #[test]
    fn redefining_help_is_an_error() {
        let mut value = false;
        let mut cli = Cli::new(config());

        let error = cli
            .try_flag([
                FlagArg::from(&mut value),
                "h".into(),
                "Hijack help.".into(),
            ])
            .unwrap_err();

        assert_eq!(
            error,
            FlagError::Registration(RegistrationError::Redefined("h".to_owned()))
        );
        assert_eq!(cli.registry().flags().len(), 2);
    }

    #[test]
    fn validation_failure_is_reported() {
        let mut value = 0.0;
        let mut cli = Cli::new(config());

        let error = cli
            .try_flag([FlagArg::from(&mut value), 1.0.into(), "rate".into()])
            .unwrap_err();

        assert!(matches!(error, FlagError::Validation(_)));
        assert_eq!(error.exit_code(), crate::VALIDATION_EXIT_CODE);
    }

    #[test]
    fn parse_writes_through_storage() {
        let mut count = Counter::new();
        let mut numbers = IntList::new();
        let mut name = String::new();

        let parsed = {
            let mut cli = Cli::new(config());
            cli.try_flag([FlagArg::from(&mut count), "v".into(), "More verbosity.".into()])
                .unwrap();
            cli.try_flag([FlagArg::from(&mut numbers), "n".into(), "num".into(), "Numbers.".into()])
                .unwrap();
            cli.try_flag([
                FlagArg::from(&mut name),
                "name".into(),
                "world".into(),
                "Who to greet.".into(),
            ])
            .unwrap();

            cli.parse_from(["-vv", "--num", "1", "-n0x10", "rest"])
        };

        assert_eq!(count.count(), 2);
        assert_eq!(&*numbers, [1, 16]);
        assert_eq!(name, "world");
        assert_eq!(parsed.args(), ["rest"]);
        assert_eq!(parsed.nflag(), 3);
    }
}
