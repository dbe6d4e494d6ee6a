use std::env;

use anyhow::Context as _;
use flagdoc::{Cli, Config, Counter, FloatList, IntList, StringList, UintList, flag};

fn config() -> anyhow::Result<Config> {
    let max_width = match env::var("FLAGDOC_DEMO_WIDTH") {
        Ok(width) => width
            .parse()
            .with_context(|| format!("FLAGDOC_DEMO_WIDTH must be a number, got {width:?}"))?,
        Err(_) => 80,
    };

    Ok(Config {
        title: "Sample README.md".to_owned(),
        banner: "flagdoc-demo [OPTIONS] <ARG>".to_owned(),
        info: "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
               Mauris ut augue euismod, cursus nulla ut, semper eros. \
               Integer pulvinar a lectus sed pretium."
            .to_owned(),
        authors: vec!["Jane Doe <jane@example.com>".to_owned()],
        bug_email: "bugs@example.com".to_owned(),
        exit_status: "Normally the exit status is 0. In the event of invalid \
                      or missing arguments, the exit status will be non-zero."
            .to_owned(),
        see_also: vec!["flag".to_owned()],
        max_width,
        align: env::var_os("FLAGDOC_DEMO_ALIGN").is_some(),
        ..Config::default()
    })
}

fn main() -> anyhow::Result<()> {
    let mut boolean = false;
    let mut float = 0.0;
    let mut int: isize = 0;
    let mut int64: i64 = 0;
    let mut string = String::new();
    let mut uint: usize = 0;
    let mut uint64: u64 = 0;
    let mut floats = FloatList::new();
    let mut ints = IntList::new();
    let mut strings = StringList::new();
    let mut uints = UintList::new();
    let mut verbosity = Counter::new();

    let mut parsed = {
        let mut cli = Cli::new(config()?);

        flag!(cli, &mut boolean, "a", "praesent", false,
            "Fusce blandit nisi eu sem maximus, ut eleifend lectus semper.")?;
        flag!(cli, &mut float, "b", "facilisis", 0.0,
            "Cras ac dolor ante. Nulla posuere non purus ac vehicula.")?;
        flag!(cli, &mut int, "c", 0,
            "Nullam efficitur elit vel venenatis mattis. Aenean viverra tincidunt ligula.")?;
        flag!(cli, &mut string, "d", "ut", "",
            "Nulla a sollicitudin ex.", "Sed faucibus lacus congue dapibus vestibulum.")?;
        flag!(cli, &mut strings, "e", "placerat",
            "Etiam efficitur interdum leo nec luctus. Etiam est erat, bibendum.")?;
        flag!(cli, &mut uint64, "sagittis", 0,
            "Donec posuere efficitur massa, ut imperdiet mauris sodales sit amet.")?;
        flag!(cli, &mut int64, "offset", -1, "A signed 64-bit offset.")?;
        flag!(cli, &mut uint, "u", "jobs", 4, "How many jobs to run at once.")?;
        flag!(cli, &mut floats, "f", "weight", "A weight. May be repeated.")?;
        flag!(cli, &mut ints, "i", "delta", "A signed delta. May be repeated.")?;
        flag!(cli, &mut uints, "port", "A port to listen on. May be repeated.")?;
        flag!(cli, &mut verbosity, "v", "verbose", "Be more verbose. Repeat for more.")?;

        cli.aligned_section(
            "ENVIRONMENT",
            "FLAGDOC_DEMO_WIDTH: Width of the help text, in columns.\n\
             FLAGDOC_DEMO_ALIGN: Line option descriptions up in one column.",
            ":",
        );
        cli.section(
            "EXAMPLES",
            "flagdoc-demo -vv --ut=hello world",
        );

        cli.parse()
    };

    match parsed.narg() {
        0 => parsed.usage(1),
        1 => {}
        _ => parsed.usage(2),
    }

    if string.is_empty() {
        parsed.usage(3);
    }

    println!("bool: {boolean}");
    println!("float: {float}");
    println!("int: {int}");
    println!("int64: {int64}");
    println!("string: {string}");
    println!("uint: {uint}");
    println!("uint64: {uint64}");
    println!("floats: {floats}");
    println!("ints: {ints}");
    println!("strings: {strings}");
    println!("uints: {uints}");
    println!("verbosity: {}", verbosity.count());
    println!("args: {} - {:?}", parsed.narg(), parsed.args());

    Ok(())
}
