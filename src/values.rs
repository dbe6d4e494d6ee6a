/*!
Repeatable value containers and the parsing rules shared by every numeric
flag.

A list flag may appear many times on the command line (`--flag=a --flag=b`),
and each appearance appends to the list. A [`Counter`] flag increments every
time it appears, as in `-v -v -v`.
 */

use core::fmt;
use core::ops::Deref;

use joinery::JoinableIterator;

use crate::error::ValueError;

/// The settable-value contract: a type that the host flag set can write
/// command-line text into.
pub trait Value: fmt::Display {
    /// Store one appearance of the flag, with its value text.
    fn set(&mut self, arg: &str) -> Result<(), ValueError>;

    /// Forget every stored appearance.
    fn reset(&mut self);
}

macro_rules! lists {
    ($(
        $(#[$meta:meta])*
        $name:ident($item:ty) = $parse:path;
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $name(Vec<$item>);

            impl $name {
                #[inline]
                #[must_use]
                pub const fn new() -> Self {
                    Self(Vec::new())
                }

                #[inline]
                #[must_use]
                pub fn into_inner(self) -> Vec<$item> {
                    self.0
                }
            }

            impl Deref for $name {
                type Target = [$item];

                #[inline]
                fn deref(&self) -> &[$item] {
                    &self.0
                }
            }

            impl From<Vec<$item>> for $name {
                #[inline]
                fn from(items: Vec<$item>) -> Self {
                    Self(items)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "[{}]", self.0.iter().join_with(' '))
                }
            }

            impl Value for $name {
                fn set(&mut self, arg: &str) -> Result<(), ValueError> {
                    self.0.push($parse(arg)?);
                    Ok(())
                }

                fn reset(&mut self) {
                    self.0.clear();
                }
            }
        )*
    };
}

lists! {
    /// Collects every `--flag=float` appearance, in order.
    FloatList(f64) = parse_float;

    /// Collects every `--flag=int` appearance, in order.
    IntList(i64) = parse_int;

    /// Collects every `--flag=string` appearance, in order.
    StringList(String) = parse_string;

    /// Collects every `--flag=uint` appearance, in order.
    UintList(u64) = parse_uint;
}

/// Counts the number of times a flag was passed, as in `-v -v -v`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Counter {
    count: u32,
}

impl Counter {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    #[inline]
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn inc(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)
    }
}

impl Value for Counter {
    /// The value text is ignored; every appearance counts once.
    fn set(&mut self, _arg: &str) -> Result<(), ValueError> {
        self.inc();
        Ok(())
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

fn parse_string(arg: &str) -> Result<String, ValueError> {
    Ok(arg.to_owned())
}

pub(crate) fn parse_float(arg: &str) -> Result<f64, ValueError> {
    arg.parse().map_err(|source| ValueError::InvalidFloat {
        value: arg.to_owned(),
        source,
    })
}

/// Split an integer literal into its radix and digits: `0x`, `0o` and `0b`
/// prefixes are recognized, and a bare leading `0` means octal.
fn radix_digits(digits: &str) -> (u32, &str) {
    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(prefix).map(|rest| (radix, rest)));

    match prefixed {
        Some(found) => found,
        None if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        None => (10, digits),
    }
}

pub(crate) fn parse_int(arg: &str) -> Result<i64, ValueError> {
    let (negative, unsigned) = match arg.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, arg.strip_prefix('+').unwrap_or(arg)),
    };

    let (radix, digits) = radix_digits(unsigned);

    // from_str_radix would accept a second sign here
    let digits = match digits.starts_with(['+', '-']) {
        true => "",
        false => digits,
    };

    let result = match negative {
        true => i64::from_str_radix(&format!("-{digits}"), radix),
        false => i64::from_str_radix(digits, radix),
    };

    result.map_err(|source| ValueError::InvalidInt {
        value: arg.to_owned(),
        source,
    })
}

pub(crate) fn parse_uint(arg: &str) -> Result<u64, ValueError> {
    let (radix, digits) = radix_digits(arg);

    let digits = match digits.starts_with(['+', '-']) {
        true => "",
        false => digits,
    };

    u64::from_str_radix(digits, radix).map_err(|source| ValueError::InvalidUint {
        value: arg.to_owned(),
        source,
    })
}

/// The boolean grammar accepted by `--flag=value` on boolean flags.
pub(crate) fn parse_bool(arg: &str) -> Result<bool, ValueError> {
    match arg {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::InvalidBool {
            value: arg.to_owned(),
        }),
    }
}
