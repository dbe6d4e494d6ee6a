/*!
The closed set of places a flag can write into, and the defaults that may
accompany them.
 */

use crate::error::{RegistrationError, ValueError};
use crate::values::{
    Counter, FloatList, IntList, StringList, UintList, Value, parse_bool, parse_float, parse_int,
    parse_uint,
};

/// What a flag stores, independent of the width of the storage it writes
/// into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Float,
    Int,
    String,
    Uint,
    FloatList,
    IntList,
    StringList,
    UintList,
    Counter,
}

impl ValueKind {
    /// The placeholder shown next to the flag's name in help text. Flags that
    /// never take an argument have no tag.
    #[must_use]
    pub const fn type_tag(self) -> &'static str {
        match self {
            ValueKind::Float | ValueKind::FloatList => "FLOAT",
            ValueKind::Int | ValueKind::IntList => "INT",
            ValueKind::String | ValueKind::StringList => "STRING",
            ValueKind::Uint | ValueKind::UintList => "UINT",
            ValueKind::Bool | ValueKind::Counter => "",
        }
    }

    /// Lists and counters accumulate; they never carry a default.
    #[must_use]
    pub const fn is_repeatable(self) -> bool {
        matches!(
            self,
            ValueKind::FloatList
                | ValueKind::IntList
                | ValueKind::StringList
                | ValueKind::UintList
                | ValueKind::Counter
        )
    }

    /// Flags of this kind never consume an argument.
    #[must_use]
    pub const fn is_switch(self) -> bool {
        matches!(self, ValueKind::Bool | ValueKind::Counter)
    }

    pub(crate) const fn noun(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Float => "float",
            ValueKind::Int => "int",
            ValueKind::String => "string",
            ValueKind::Uint => "uint",
            ValueKind::FloatList => "float list",
            ValueKind::IntList => "int list",
            ValueKind::StringList => "string list",
            ValueKind::UintList => "uint list",
            ValueKind::Counter => "counter",
        }
    }
}

/// A borrowed, caller-owned location that a flag writes into while the
/// command line is parsed.
#[derive(Debug)]
pub enum Storage<'a> {
    Bool(&'a mut bool),
    Float(&'a mut f64),
    Int(&'a mut isize),
    Int64(&'a mut i64),
    String(&'a mut String),
    Uint(&'a mut usize),
    Uint64(&'a mut u64),
    FloatList(&'a mut FloatList),
    IntList(&'a mut IntList),
    StringList(&'a mut StringList),
    UintList(&'a mut UintList),
    Counter(&'a mut Counter),
}

impl Storage<'_> {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Storage::Bool(_) => ValueKind::Bool,
            Storage::Float(_) => ValueKind::Float,
            Storage::Int(_) | Storage::Int64(_) => ValueKind::Int,
            Storage::String(_) => ValueKind::String,
            Storage::Uint(_) | Storage::Uint64(_) => ValueKind::Uint,
            Storage::FloatList(_) => ValueKind::FloatList,
            Storage::IntList(_) => ValueKind::IntList,
            Storage::StringList(_) => ValueKind::StringList,
            Storage::UintList(_) => ValueKind::UintList,
            Storage::Counter(_) => ValueKind::Counter,
        }
    }

    /// Write one appearance of the flag. Switches receive `None` when no
    /// `=value` was attached.
    pub fn set(&mut self, arg: Option<&str>) -> Result<(), ValueError> {
        let arg = match (self.kind().is_switch(), arg) {
            (true, None) => "true",
            (_, Some(arg)) => arg,
            // The host always supplies an argument for non-switches
            (false, None) => "",
        };

        match self {
            Storage::Bool(slot) => **slot = parse_bool(arg)?,
            Storage::Float(slot) => **slot = parse_float(arg)?,
            Storage::Int(slot) => **slot = narrow(parse_int(arg)?, arg, "int")?,
            Storage::Int64(slot) => **slot = parse_int(arg)?,
            Storage::String(slot) => arg.clone_into(slot),
            Storage::Uint(slot) => **slot = narrow(parse_uint(arg)?, arg, "uint")?,
            Storage::Uint64(slot) => **slot = parse_uint(arg)?,
            Storage::FloatList(list) => list.set(arg)?,
            Storage::IntList(list) => list.set(arg)?,
            Storage::StringList(list) => list.set(arg)?,
            Storage::UintList(list) => list.set(arg)?,
            Storage::Counter(counter) => counter.set(arg)?,
        }

        Ok(())
    }

    /// Write a registration-time default. Lists start out empty and counters
    /// at zero, whatever the default.
    pub(crate) fn apply_default(
        &mut self,
        flag: &str,
        default: Option<&DefaultValue>,
    ) -> Result<(), RegistrationError> {
        let kind = self.kind();

        let repeatable: Option<&mut dyn Value> = match self {
            Storage::FloatList(list) => Some(&mut **list),
            Storage::IntList(list) => Some(&mut **list),
            Storage::StringList(list) => Some(&mut **list),
            Storage::UintList(list) => Some(&mut **list),
            Storage::Counter(counter) => Some(&mut **counter),
            _ => None,
        };

        if let Some(value) = repeatable {
            value.reset();
            return Ok(());
        }

        let Some(default) = default else {
            return match self {
                Storage::Bool(slot) => {
                    **slot = false;
                    Ok(())
                }
                _ => Err(RegistrationError::MissingDefault {
                    flag: flag.to_owned(),
                    expected: kind.noun(),
                }),
            };
        };

        let mismatch = || RegistrationError::TypeMismatch {
            flag: flag.to_owned(),
            expected: kind.noun(),
            found: default.noun(),
        };

        match (self, default) {
            (Storage::Bool(slot), &DefaultValue::Bool(value)) => **slot = value,
            (Storage::Float(slot), &DefaultValue::Float(value)) => **slot = value,
            (Storage::Int(slot), &DefaultValue::Int(value)) => {
                **slot = isize::try_from(value).map_err(|_| mismatch())?;
            }
            (Storage::Int(slot), &DefaultValue::Uint(value)) => {
                **slot = isize::try_from(value).map_err(|_| mismatch())?;
            }
            (Storage::Int64(slot), &DefaultValue::Int(value)) => **slot = value,
            (Storage::Int64(slot), &DefaultValue::Uint(value)) => {
                **slot = i64::try_from(value).map_err(|_| mismatch())?;
            }
            (Storage::Uint(slot), &DefaultValue::Uint(value)) => {
                **slot = usize::try_from(value).map_err(|_| mismatch())?;
            }
            (Storage::Uint(slot), &DefaultValue::Int(value)) => {
                **slot = usize::try_from(value).map_err(|_| mismatch())?;
            }
            (Storage::Uint64(slot), &DefaultValue::Uint(value)) => **slot = value,
            (Storage::Uint64(slot), &DefaultValue::Int(value)) => {
                **slot = u64::try_from(value).map_err(|_| mismatch())?;
            }
            (Storage::String(slot), DefaultValue::String(value)) => value.clone_into(slot),
            _ => return Err(mismatch()),
        }

        Ok(())
    }
}

fn narrow<T, U: TryFrom<T>>(value: T, arg: &str, kind: &'static str) -> Result<U, ValueError> {
    U::try_from(value).map_err(|_| ValueError::OutOfRange {
        value: arg.to_owned(),
        kind,
    })
}

macro_rules! storage_from {
    ($($variant:ident($type:ty),)*) => {$(
        impl<'a> From<&'a mut $type> for Storage<'a> {
            #[inline]
            fn from(slot: &'a mut $type) -> Self {
                Storage::$variant(slot)
            }
        }
    )*};
}

storage_from! {
    Bool(bool),
    Float(f64),
    Int(isize),
    Int64(i64),
    String(String),
    Uint(usize),
    Uint64(u64),
    FloatList(FloatList),
    IntList(IntList),
    StringList(StringList),
    UintList(UintList),
    Counter(Counter),
}

/// A default value captured from the flag's declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Float(f64),
    Int(i64),
    Uint(u64),
    String(String),
}

impl DefaultValue {
    const fn noun(&self) -> &'static str {
        match self {
            DefaultValue::Bool(_) => "bool",
            DefaultValue::Float(_) => "float",
            DefaultValue::Int(_) => "int",
            DefaultValue::Uint(_) => "uint",
            DefaultValue::String(_) => "string",
        }
    }
}
