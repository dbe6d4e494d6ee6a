#![no_std]

/*!
Low-level tokenizing of command-line arguments. Takes care of the distinctions
between flags, options, and positionals: `-x`, clustered shorts like `-abc`,
attached short values like `-ovalue`, `--long`, `--long=value`, and the `--`
terminator. No type handling happens here; flag names are never looked up.
Usually this is too low level to use directly.
*/

#[cfg(test)]
extern crate std;

/**
The [`ArgumentsParser`] type operates by passing the arguments it finds into a
[`Visitor`], to be handled.

Arguments are borrowed `str` slices; the `'arg` lifetime refers to the
command-line data, which is normally loaded once at the start of `main`.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional parameter.
    fn visit_positional(self, argument: &'arg str) -> Self::Value;

    /// A long option that definitely has an argument, because it was given
    /// as `--option=argument`
    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value;

    /// A long option or flag, such as `--option`
    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A short option or flag, such as `-o`
    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given flag needs an argument,
based on what is bound to that name.

Consider `--foo bar`. Is this a pair of parameters (the flag `--foo` and the
positional parameter `bar`) or a single option `--foo bar` that takes an
argument? Similarly, `-ab foo` could be `-a b`, `foo`; or `-a`, `-b foo`; or
`-a`, `-b`, `foo`. The tokenizer can't classify these on its own, so a visitor
requests an argument through this trait only for names that need one.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Get an argument from the parser. Only options that need a value should
    call this; boolean flags and counters ignore it, so that the next
    command-line argument is tokenized independently.

    Returns [`None`] if the arguments are exhausted, or if only positional
    parameters remain (because a raw `--` was reached).
    */
    fn take(self) -> Option<&'arg str>;
}

#[derive(Debug, Clone)]
enum State<'arg> {
    Ready,
    PositionalOnly,
    /// Remaining characters of a short cluster; never empty.
    ShortInProgress(&'arg str),
}

/**
An `ArgumentsParser` is the entry point of `flagdoc_parser`. Each call to
[`next_arg`][ArgumentsParser::next_arg] consumes one token and hands it to the
given [`Visitor`].
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State<'arg>,
    args: I,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of arguments. The list
    should *exclude* the name of the program.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            args: args.into_iter(),
        }
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        debug_assert!(!matches!(self.state, State::ShortInProgress(_)));

        self.state = State::PositionalOnly;
        self.args
            .next()
            .map(|arg| visitor.visit_positional(arg))
    }

    /// Put `self` into a `Ready` state, then return a StandardArgAccess
    #[inline]
    fn standard_arg(&mut self) -> StandardArgAccess<'_, 'arg, I> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::Ready;
        StandardArgAccess { parent: self }
    }

    /// Put `self` into a `ShortInProgress` state, then return a
    /// ShortArgAccess. `short` must be non-empty.
    #[inline]
    fn short_arg(&mut self, short: &'arg str) -> ShortArgAccess<'_, 'arg> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));
        debug_assert!(!short.is_empty());

        self.state = State::ShortInProgress(short);
        ShortArgAccess {
            short,
            state: &mut self.state,
        }
    }

    /// Handle getting the argument for a `-s` short option. If there is
    /// remaining content in the cluster, it's a candidate for the argument;
    /// otherwise, the next argument in the input args is the candidate.
    #[inline]
    fn handle_short_argument<V>(&mut self, option: char, rest: &'arg str, visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        match rest.is_empty() {
            true => visitor.visit_short(option, self.standard_arg()),
            false => visitor.visit_short(option, self.short_arg(rest)),
        }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Ready => {
                let argument = self.args.next()?;

                if argument == "--" {
                    return self.positional_only_arg(visitor);
                }

                Some(if let Some(option) = argument.strip_prefix("--") {
                    match split_once(option, b'=') {
                        Some((option, value)) => visitor.visit_long_option(option, value),
                        None => visitor.visit_long(option, self.standard_arg()),
                    }
                } else if let Some(short) = argument.strip_prefix('-') {
                    match split_first_char(short) {
                        None => visitor.visit_positional(argument),
                        Some((option, rest)) => self.handle_short_argument(option, rest, visitor),
                    }
                } else {
                    visitor.visit_positional(argument)
                })
            }
            State::PositionalOnly => self.positional_only_arg(visitor),
            State::ShortInProgress(short) => match split_first_char(short) {
                Some((option, rest)) => Some(self.handle_short_argument(option, rest, visitor)),
                None => {
                    self.state = State::Ready;
                    self.next_arg(visitor)
                }
            },
        }
    }
}

/// ArgAccess implementation that gets the next argument from the list.
/// Handles logic around `--` PositionalOnly parameters.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg str>,
{
    fn take(self) -> Option<&'arg str> {
        match self.parent.args.next()? {
            "--" if !matches!(self.parent.state, State::PositionalOnly) => {
                self.parent.state = State::PositionalOnly;
                None
            }
            arg => Some(arg),
        }
    }
}

/// ArgAccess implementation that gets the remainder of a short cluster.
/// Handles things like `-ovalue`, which is equivalent to `-o value`.
struct ShortArgAccess<'a, 'arg> {
    short: &'arg str,
    state: &'a mut State<'arg>,
}

impl<'arg> ArgAccess<'arg> for ShortArgAccess<'_, 'arg> {
    fn take(self) -> Option<&'arg str> {
        debug_assert!(
            matches!(*self.state, State::ShortInProgress(short) if short == self.short)
        );

        *self.state = State::Ready;
        Some(self.short)
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // `delimiter` is ASCII, so both halves stay on char boundaries
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}

fn split_first_char(input: &str) -> Option<(char, &str)> {
    let mut chars = input.chars();
    chars.next().map(|first| (first, chars.as_str()))
}
