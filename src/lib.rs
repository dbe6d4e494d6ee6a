/*!
Declare command-line flags once, and get both aligned usage text and a
Markdown reference document from the same declarations.

Each flag is declared with a loose list of arguments: the storage it writes
into, its short and/or long name, an optional default, a description, and an
optional `true` to hide it. The kind of the storage decides how the flag
parses and what placeholder (`INT`, `STRING`, ...) its help text shows.

```no_run
use flagdoc::{Cli, Config, Counter, StringList, flag};

let mut verbose = Counter::new();
let mut name = String::new();
let mut tags = StringList::new();

let mut cli = Cli::new(Config {
    banner: "greet [OPTIONS] <NAME>".to_owned(),
    info: "Print a friendly greeting.".to_owned(),
    ..Config::default()
});

flag!(cli, &mut verbose, "v", "verbose", "Say more. Repeat for even more.").unwrap();
flag!(cli, &mut name, "n", "name", "world", "Who to greet.").unwrap();
flag!(cli, &mut tags, "t", "tag", "Attach a tag. May be repeated.").unwrap();
cli.section("EXAMPLES", "greet --name=you -vv");

let mut parsed = cli.parse();

if parsed.narg() > 0 {
    parsed.usage(1);
}

println!("hello, {name} ({} levels of verbosity)", verbose.count());
```

Passing `-h` or `--help` prints the usage message and exits; passing the
hidden `--readme` flag prints the Markdown document instead.
 */

mod arguments;
mod cli;
mod config;
pub mod error;
pub mod flag;
pub mod host;
mod registry;
pub mod section;
pub mod storage;
mod values;
pub mod width;
pub mod wrap;

pub use arguments::Arguments;
pub use cli::{Cli, Parsed};
pub use config::Config;
pub use error::{
    CONSTRUCTION_EXIT_CODE, ConstructionError, FlagError, ParseError, RegistrationError,
    USAGE_EXIT_CODE, VALIDATION_EXIT_CODE, ValidationError, ValueError,
};
pub use flag::{CliFlag, FlagArg};
pub use registry::Registry;
pub use section::{Section, Style};
pub use storage::{DefaultValue, Storage, ValueKind};
pub use values::{Counter, FloatList, IntList, StringList, UintList, Value};

/**
Declare a flag on a [`Cli`]. Each argument after the first is converted into
a [`FlagArg`].

```no_run
# use flagdoc::{Cli, Config, flag};
let mut level: u64 = 0;
let mut cli = Cli::new(Config::default());

flag!(cli, &mut level, "l", "level", 3, "How hard to try.").unwrap();
```
 */
#[macro_export]
macro_rules! flag {
    ($cli:expr, $($arg:expr),+ $(,)?) => {
        $cli.flag([$($crate::FlagArg::from($arg)),+])
    };
}
