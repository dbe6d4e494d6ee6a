/*!
The flag set that owns the bindings between flag names and storage, and
applies a command line to them.

Tokenizing is delegated to [`flagdoc_parser`]; this module decides, per bound
name, whether a flag takes an argument, and writes parsed values through the
bound [`Storage`].
 */

use std::collections::{HashMap, HashSet};

use flagdoc_parser::{ArgAccess, ArgumentsParser};

use crate::arguments::Arguments;
use crate::error::{ParseError, RegistrationError, ValueError};
use crate::storage::Storage;
use crate::values::parse_bool;

/// Handle to one binding in a [`FlagSet`]. Several names may share one
/// binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

#[derive(Debug)]
enum Target<'a> {
    Storage(Storage<'a>),

    /// A switch owned by the flag set itself, for built-in flags like
    /// `--help`.
    Switch(bool),
}

impl Target<'_> {
    fn takes_argument(&self) -> bool {
        match self {
            Target::Storage(storage) => !storage.kind().is_switch(),
            Target::Switch(_) => false,
        }
    }

    fn set(&mut self, arg: Option<&str>) -> Result<(), ValueError> {
        match self {
            Target::Storage(storage) => storage.set(arg),
            Target::Switch(on) => {
                *on = arg.map(parse_bool).transpose()?.unwrap_or(true);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FlagSet<'a> {
    targets: Vec<Target<'a>>,
    names: HashMap<String, BindingId>,

    /// Every name that appeared on the command line.
    actual: HashSet<String>,
}

impl<'a> FlagSet<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that none of `names` is bound yet.
    pub fn check_unbound<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> Result<(), RegistrationError> {
        match names.into_iter().find(|name| self.names.contains_key(*name)) {
            Some(name) => Err(RegistrationError::Redefined(name.to_owned())),
            None => Ok(()),
        }
    }

    fn insert<'n>(
        &mut self,
        names: impl IntoIterator<Item = &'n str> + Clone,
        target: Target<'a>,
    ) -> Result<BindingId, RegistrationError> {
        self.check_unbound(names.clone())?;

        let id = BindingId(self.targets.len());
        self.targets.push(target);
        self.names
            .extend(names.into_iter().map(|name| (name.to_owned(), id)));

        Ok(id)
    }

    /// Bind `storage` under every one of `names`.
    pub fn bind<'n>(
        &mut self,
        names: impl IntoIterator<Item = &'n str> + Clone,
        storage: Storage<'a>,
    ) -> Result<BindingId, RegistrationError> {
        self.insert(names, Target::Storage(storage))
    }

    /// Bind a boolean switch that the flag set stores itself; read it back
    /// with [`is_on`][FlagSet::is_on].
    pub fn switch<'n>(
        &mut self,
        names: impl IntoIterator<Item = &'n str> + Clone,
    ) -> Result<BindingId, RegistrationError> {
        self.insert(names, Target::Switch(false))
    }

    /// A fresh flag set with switches already bound under each group of
    /// names. Every name must be distinct.
    pub(crate) fn with_switches<'n, const N: usize>(
        groups: [&[&'n str]; N],
    ) -> (Self, [BindingId; N]) {
        let mut set = Self::new();

        let ids = groups.map(|names| {
            let id = BindingId(set.targets.len());
            set.targets.push(Target::Switch(false));
            set.names
                .extend(names.iter().map(|&name| (name.to_owned(), id)));
            id
        });

        (set, ids)
    }

    #[must_use]
    pub fn is_on(&self, id: BindingId) -> bool {
        matches!(self.targets.get(id.0), Some(Target::Switch(true)))
    }

    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Apply a command line (excluding the program name). Flags and
    /// positionals may be interleaved; everything after `--` is positional.
    /// Parsing stops at the first error.
    pub fn parse<'arg>(
        &mut self,
        args: impl IntoIterator<Item = &'arg str>,
    ) -> Result<Arguments, ParseError> {
        let mut parser = ArgumentsParser::new(args);
        let mut positionals = Vec::new();

        while let Some(result) = parser.next_arg(Visitor {
            set: &mut *self,
            positionals: &mut positionals,
        }) {
            result?;
        }

        tracing::debug!(
            positionals = positionals.len(),
            flags = self.actual.len(),
            "finished parsing command line"
        );

        Ok(Arguments::new(positionals, self.actual.len()))
    }

    fn lookup(&self, name: &str, display: impl FnOnce() -> String) -> Result<BindingId, ParseError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::Unrecognized(display()))
    }

    fn store(
        &mut self,
        id: BindingId,
        name: &str,
        display: impl FnOnce() -> String,
        arg: Option<&str>,
    ) -> Result<(), ParseError> {
        let Some(target) = self.targets.get_mut(id.0) else {
            return Err(ParseError::Unrecognized(display()));
        };

        target.set(arg).map_err(|source| ParseError::InvalidValue {
            option: display(),
            source,
        })?;

        self.actual.insert(name.to_owned());
        Ok(())
    }

    /// Handle `--name` or `-n`, requesting an argument only if the bound
    /// storage needs one.
    fn apply<'arg>(
        &mut self,
        name: &str,
        display: impl Fn() -> String,
        arg: impl ArgAccess<'arg>,
    ) -> Result<(), ParseError> {
        let id = self.lookup(name, &display)?;

        let takes_argument = self
            .targets
            .get(id.0)
            .is_some_and(Target::takes_argument);

        let value = match takes_argument {
            true => Some(arg.take().ok_or_else(|| ParseError::NeedsArgument(display()))?),
            false => None,
        };

        self.store(id, name, display, value)
    }
}

struct Visitor<'s, 'a> {
    set: &'s mut FlagSet<'a>,
    positionals: &'s mut Vec<String>,
}

impl<'arg> flagdoc_parser::Visitor<'arg> for Visitor<'_, '_> {
    type Value = Result<(), ParseError>;

    fn visit_positional(self, argument: &'arg str) -> Self::Value {
        self.positionals.push(argument.to_owned());
        Ok(())
    }

    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value {
        let display = || format!("--{option}");
        let id = self.set.lookup(option, display)?;
        self.set.store(id, option, display, Some(argument))
    }

    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value {
        self.set.apply(option, || format!("--{option}"), arg)
    }

    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value {
        let mut buf = [0; 4];
        let name = option.encode_utf8(&mut buf);
        self.set.apply(name, || format!("-{option}"), arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{Counter, IntList, StringList};

    #[test]
    fn shared_binding_for_short_and_long() {
        let mut verbose = false;
        let mut name = String::new();

        {
            let mut set = FlagSet::new();
            set.bind(["v", "verbose"], Storage::from(&mut verbose)).unwrap();
            set.bind(["n", "name"], Storage::from(&mut name)).unwrap();

            let args = set.parse(["--verbose", "-n", "bob", "file"]).unwrap();
            assert_eq!(args.args(), ["file"]);
            assert_eq!(args.nflag(), 2);
        }

        assert!(verbose);
        assert_eq!(name, "bob");
    }

    #[test]
    fn redefinition_is_an_error() {
        let mut a = false;
        let mut b = false;

        let mut set = FlagSet::new();
        set.bind(["v"], Storage::from(&mut a)).unwrap();

        let error = set.bind(["x", "v"], Storage::from(&mut b)).unwrap_err();
        assert_eq!(error, RegistrationError::Redefined("v".to_owned()));
        assert!(!set.is_bound("x"));
    }

    #[test]
    fn unknown_flag() {
        let mut set = FlagSet::new();
        assert_eq!(
            set.parse(["-q"]).unwrap_err(),
            ParseError::Unrecognized("-q".to_owned())
        );
    }

    #[test]
    fn missing_argument() {
        let mut value: i64 = 0;
        let mut set = FlagSet::new();
        set.bind(["count"], Storage::from(&mut value)).unwrap();

        assert_eq!(
            set.parse(["--count"]).unwrap_err(),
            ParseError::NeedsArgument("--count".to_owned())
        );
    }

    #[test]
    fn bad_value_names_the_option() {
        let mut list = IntList::new();
        let mut set = FlagSet::new();
        set.bind(["i"], Storage::from(&mut list)).unwrap();

        let error = set.parse(["-i", "1", "-i", "one"]).unwrap_err();
        assert!(matches!(
            error,
            ParseError::InvalidValue { ref option, source: ValueError::InvalidInt { .. } }
                if option == "-i"
        ));
    }

    #[test]
    fn counters_and_lists_accumulate() {
        let mut counter = Counter::new();
        let mut list = StringList::new();

        {
            let mut set = FlagSet::new();
            set.bind(["v"], Storage::from(&mut counter)).unwrap();
            set.bind(["s", "str"], Storage::from(&mut list)).unwrap();

            set.parse(["-vv", "--str=a", "-sb", "-v", "--str", "c"])
                .unwrap();
        }

        assert_eq!(counter.count(), 3);
        assert_eq!(&*list, ["a", "b", "c"]);
    }

    #[test]
    fn bool_never_consumes_the_next_argument() {
        let mut flag = false;
        let mut set = FlagSet::new();
        set.bind(["b"], Storage::from(&mut flag)).unwrap();

        let args = set.parse(["-b", "false"]).unwrap();
        assert_eq!(args.args(), ["false"]);
    }

    #[test]
    fn bool_with_attached_value() {
        let mut flag = true;

        {
            let mut set = FlagSet::new();
            set.bind(["debug"], Storage::from(&mut flag)).unwrap();
            set.parse(["--debug=false"]).unwrap();
        }

        assert!(!flag);
    }

    #[test]
    fn switches() {
        let mut set = FlagSet::new();
        let help = set.switch(["h", "help"]).unwrap();
        let readme = set.switch(["readme"]).unwrap();

        set.parse(["-h"]).unwrap();
        assert!(set.is_on(help));
        assert!(!set.is_on(readme));
    }

    #[test]
    fn double_dash_ends_flags() {
        let mut set = FlagSet::new();
        let args = set.parse(["--", "-h", "x"]).unwrap();

        assert_eq!(args.args(), ["-h", "x"]);
        assert_eq!(args.nflag(), 0);
    }
}
