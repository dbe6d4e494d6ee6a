/*!
Flag descriptors: turning a loose, order-flexible argument list into a
validated flag, then rendering that flag as help text or as a Markdown table
row.

A flag is declared with a mix of arguments, in nearly any order:

- exactly one storage, such as `&mut bool` or `&mut IntList`;
- for scalar non-bool storages, one default value;
- up to two name strings (one character for the short name, more for the
  long name);
- a description, possibly split across several strings;
- a trailing boolean that hides the flag from help output.

Strings are classified one at a time, in the order given:

1. once a description exists, every later string is appended to it;
2. a one-character string becomes the short name, if there isn't one yet;
3. a multi-character string without spaces becomes the long name, if there
   isn't one yet and no default value has been captured;
4. for scalar storages other than `bool` with no default yet, the string is
   the default (kept verbatim, so `""` is a valid default);
5. anything else starts the description.

Arguments given before the storage are held back and classified once the
storage's kind is known, so the storage may appear anywhere in the list.

A boolean written before the description is the default of a `bool` flag; a
boolean after the description, or the second of two, hides the flag.
 */

use std::io::{self, Write as _};
use std::mem;

use indent_write::io::IndentWriter;
use lazy_format::lazy_format;

use crate::config::Config;
use crate::error::{ConstructionError, RegistrationError, ValidationError};
use crate::host::FlagSet;
use crate::storage::{DefaultValue, Storage, ValueKind};
use crate::values::{Counter, FloatList, IntList, StringList, UintList};
use crate::width::{ColumnWidth, SEPARATOR_WIDTH};
use crate::wrap::{display_width, wrap};

/// One argument of a flag declaration. Usually built implicitly through
/// [`From`] by the [`flag!`][crate::flag!] macro.
#[derive(Debug)]
pub enum FlagArg<'a> {
    Storage(Storage<'a>),
    Bool(bool),
    Float(f64),
    Int(i64),
    Uint(u64),
    Str(String),
}

macro_rules! flag_arg_from {
    ($($type:ty => |$value:ident| $body:expr,)*) => {$(
        impl<'a> From<$type> for FlagArg<'a> {
            #[inline]
            fn from($value: $type) -> Self {
                $body
            }
        }
    )*};
}

flag_arg_from! {
    &'a mut bool => |slot| FlagArg::Storage(Storage::Bool(slot)),
    &'a mut f64 => |slot| FlagArg::Storage(Storage::Float(slot)),
    &'a mut isize => |slot| FlagArg::Storage(Storage::Int(slot)),
    &'a mut i64 => |slot| FlagArg::Storage(Storage::Int64(slot)),
    &'a mut String => |slot| FlagArg::Storage(Storage::String(slot)),
    &'a mut usize => |slot| FlagArg::Storage(Storage::Uint(slot)),
    &'a mut u64 => |slot| FlagArg::Storage(Storage::Uint64(slot)),
    &'a mut FloatList => |slot| FlagArg::Storage(Storage::FloatList(slot)),
    &'a mut IntList => |slot| FlagArg::Storage(Storage::IntList(slot)),
    &'a mut StringList => |slot| FlagArg::Storage(Storage::StringList(slot)),
    &'a mut UintList => |slot| FlagArg::Storage(Storage::UintList(slot)),
    &'a mut Counter => |slot| FlagArg::Storage(Storage::Counter(slot)),
    Storage<'a> => |storage| FlagArg::Storage(storage),
    bool => |value| FlagArg::Bool(value),
    f32 => |value| FlagArg::Float(value.into()),
    f64 => |value| FlagArg::Float(value),
    i32 => |value| FlagArg::Int(value.into()),
    i64 => |value| FlagArg::Int(value),
    isize => |value| FlagArg::Int(value as i64),
    u32 => |value| FlagArg::Uint(value.into()),
    u64 => |value| FlagArg::Uint(value),
    usize => |value| FlagArg::Uint(value as u64),
    &str => |value| FlagArg::Str(value.to_owned()),
    String => |value| FlagArg::Str(value),
}

#[derive(Debug, Clone, Copy)]
struct Boolean {
    value: bool,
    after_description: bool,
}

/// Accumulates a flag declaration, one argument at a time.
#[derive(Debug, Default)]
pub struct FlagBuilder<'a> {
    storage: Option<Storage<'a>>,

    /// Arguments that arrived before the storage.
    deferred: Vec<FlagArg<'a>>,
    default: Option<DefaultValue>,
    booleans: Vec<Boolean>,
    short: String,
    long: String,
    description: String,
}

impl<'a> FlagBuilder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: FlagArg<'a>) -> Result<(), ConstructionError> {
        match arg {
            FlagArg::Storage(storage) => match self.storage {
                Some(_) => return Err(ConstructionError::DuplicateStorage),
                None => {
                    self.storage = Some(storage);
                    mem::take(&mut self.deferred)
                        .into_iter()
                        .try_for_each(|arg| self.push(arg))?;
                }
            },
            arg if self.storage.is_none() => self.deferred.push(arg),
            FlagArg::Bool(value) => self.booleans.push(Boolean {
                value,
                after_description: !self.description.is_empty(),
            }),
            FlagArg::Float(value) => self.capture_default(DefaultValue::Float(value))?,
            FlagArg::Int(value) => self.capture_default(DefaultValue::Int(value))?,
            FlagArg::Uint(value) => self.capture_default(DefaultValue::Uint(value))?,
            FlagArg::Str(value) => self.push_str(value),
        }

        Ok(())
    }

    fn capture_default(&mut self, value: DefaultValue) -> Result<(), ConstructionError> {
        match self.default {
            Some(_) => Err(ConstructionError::DuplicateDefault),
            None => {
                self.default = Some(value);
                Ok(())
            }
        }
    }

    fn push_str(&mut self, arg: String) {
        let chars = arg.chars().count();
        let takes_string_default = self.storage.as_ref().is_some_and(|storage| {
            let kind = storage.kind();
            !kind.is_repeatable() && kind != ValueKind::Bool
        });

        if !self.description.is_empty() {
            self.description.push(' ');
            self.description.push_str(arg.trim());
        } else if self.short.is_empty() && chars == 1 {
            arg.trim().clone_into(&mut self.short);
        } else if self.long.is_empty()
            && chars > 1
            && !arg.contains(' ')
            && self.default.is_none()
        {
            arg.trim().clone_into(&mut self.long);
        } else if takes_string_default && self.default.is_none() {
            self.default = Some(DefaultValue::String(arg));
        } else {
            arg.trim().clone_into(&mut self.description);
        }
    }

    /// Resolve the collected booleans against the storage kind and produce
    /// the flag, still holding its storage.
    pub fn finish(self) -> Result<PendingFlag<'a>, ConstructionError> {
        let storage = self.storage.ok_or(ConstructionError::MissingStorage)?;
        let kind = storage.kind();
        let mut default = self.default;

        let mut booleans = self.booleans.as_slice();

        // A numeric default on a bool storage is reported by `enable`
        if kind == ValueKind::Bool && default.is_none() {
            let value = match booleans {
                [first, rest @ ..] if !rest.is_empty() || !first.after_description => {
                    booleans = rest;
                    first.value
                }
                _ => false,
            };

            default = Some(DefaultValue::Bool(value));
        }

        let hidden = match booleans {
            [] => false,
            [marker] => marker.value,
            _ => return Err(ConstructionError::TooManyBooleans),
        };

        Ok(PendingFlag {
            flag: CliFlag {
                short: self.short,
                long: self.long,
                description: self.description.trim().to_owned(),
                kind,
                hidden,
            },
            storage,
            default,
        })
    }
}

/// Build a flag from a full declaration.
pub fn build<'a>(
    args: impl IntoIterator<Item = FlagArg<'a>>,
) -> Result<PendingFlag<'a>, ConstructionError> {
    let mut builder = FlagBuilder::new();

    args.into_iter().try_for_each(|arg| builder.push(arg))?;
    builder.finish()
}

/// A constructed flag that hasn't been bound into a [`FlagSet`] yet.
#[derive(Debug)]
pub struct PendingFlag<'a> {
    flag: CliFlag,
    storage: Storage<'a>,
    default: Option<DefaultValue>,
}

impl<'a> PendingFlag<'a> {
    #[inline]
    #[must_use]
    pub fn flag(&self) -> &CliFlag {
        &self.flag
    }

    #[inline]
    #[must_use]
    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Write the default into the storage, then bind the storage under each
    /// of the flag's names.
    pub fn enable(self, host: &mut FlagSet<'a>) -> Result<CliFlag, RegistrationError> {
        let Self {
            flag,
            mut storage,
            default,
        } = self;

        host.check_unbound(flag.names())?;
        storage.apply_default(flag.name(), default.as_ref())?;
        host.bind(flag.names(), storage)?;

        Ok(flag)
    }
}

/// A validated flag's metadata: everything help output needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFlag {
    short: String,
    long: String,
    description: String,
    kind: ValueKind,
    hidden: bool,
}

impl CliFlag {
    #[must_use]
    pub fn new(
        short: impl Into<String>,
        long: impl Into<String>,
        description: impl Into<String>,
        kind: ValueKind,
        hidden: bool,
    ) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
            description: description.into(),
            kind,
            hidden,
        }
    }

    #[inline]
    #[must_use]
    pub fn short(&self) -> &str {
        &self.short
    }

    #[inline]
    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }

    /// The long name, or the short name if there's no long name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self.long.is_empty() {
            true => &self.short,
            false => &self.long,
        }
    }

    /// The short name, or the long name if there's no short name.
    #[must_use]
    pub fn secondary_name(&self) -> &str {
        match self.short.is_empty() {
            true => &self.long,
            false => &self.short,
        }
    }

    /// Every non-empty name, short first.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
        [self.short.as_str(), self.long.as_str()]
            .into_iter()
            .filter(|name| !name.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.short.is_empty() && self.long.is_empty() {
            return Err(ValidationError::NoName);
        }

        if self.short.chars().count() > 1 {
            return Err(ValidationError::InvalidShort(self.short.clone()));
        }

        if self.long.chars().count() == 1 {
            return Err(ValidationError::InvalidLong(self.long.clone()));
        }

        if self.description.is_empty() {
            return Err(ValidationError::NoDescription(self.name().to_owned()));
        }

        Ok(())
    }

    /// The name column: `-s, --long=TAG`, `-s TAG`, or `--long`. In aligned
    /// mode the short part is padded so every long name starts in the same
    /// column.
    fn column(&self, widths: &ColumnWidth, align: bool) -> String {
        let tag = self.type_tag();
        let mut column = String::new();

        if !self.short.is_empty() {
            column.push('-');
            column.push_str(&self.short);

            if self.long.is_empty() && !tag.is_empty() {
                column.push(' ');
                column.push_str(tag);
            }

            column.push_str(match self.long.is_empty() {
                true => "  ",
                false => ", ",
            });
        }

        if align {
            pad(&mut column, widths.short + SEPARATOR_WIDTH);
        }

        if !self.long.is_empty() {
            column.push_str("--");
            column.push_str(&self.long);

            if !tag.is_empty() {
                column.push('=');
                column.push_str(tag);
            }
        }

        column
    }

    /// Write this flag as terminal help text.
    ///
    /// When alignment is on and the name columns take at most half of the
    /// available width, the description starts on the same line as the names
    /// and continuation lines line up under it. Otherwise the names get a
    /// line of their own and the description follows as an indented block.
    pub fn render(
        &self,
        out: &mut (impl io::Write + ?Sized),
        widths: &ColumnWidth,
        config: &Config,
    ) -> io::Result<()> {
        let tab = config.tab_width;
        let aligned = config.align && tab + widths.left <= config.max_width / 2;
        let mut column = self.column(widths, aligned);

        if aligned {
            pad(&mut column, widths.left);

            let mut lines = wrap(&self.description, widths.desc).into_iter();
            let first = lines.next().unwrap_or_default();
            writeln!(out, "{:tab$}{column}{:tab$}{first}", "", "")?;

            let hang = 2 * tab + widths.left;
            lines.try_for_each(|line| match line.is_empty() {
                true => writeln!(out),
                false => writeln!(out, "{:hang$}{line}", ""),
            })
        } else {
            writeln!(out, "{:tab$}{}", "", column.trim_end())?;

            let indent = " ".repeat(2 * tab);
            {
                let mut body = IndentWriter::new(&indent, &mut *out);
                wrap(&self.description, config.max_width.saturating_sub(2 * tab))
                    .iter()
                    .try_for_each(|line| writeln!(body, "{line}"))?;
            }

            writeln!(out)
        }
    }

    /// Write this flag as one row of the Markdown options table.
    pub fn table(&self, out: &mut (impl io::Write + ?Sized)) -> io::Result<()> {
        let names = lazy_format!(match ((self.short.as_str(), self.long.as_str())) {
            (short, "") => "`-{short}`",
            ("", long) => "`--{long}`",
            (short, long) => "`-{short}`, `--{long}`",
        });

        let tag = lazy_format!(match (self.type_tag()) {
            "" => "",
            tag => "`{tag}`",
        });

        writeln!(out, "{names} | {tag} | {}", self.description)
    }
}

fn pad(column: &mut String, width: usize) {
    let missing = width.saturating_sub(display_width(column));
    column.extend(std::iter::repeat_n(' ', missing));
}
