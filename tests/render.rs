use flagdoc::{
    Cli, Config, Counter, FlagArg, FlagError, IntList, ParseError, RegistrationError, StringList,
    ValueError, flag,
};

fn config(align: bool) -> Config {
    Config {
        title: "prog".to_owned(),
        banner: "prog [OPTIONS]".to_owned(),
        max_width: 80,
        tab_width: 4,
        align,
        ..Config::default()
    }
}

fn usage(cli: &mut Cli<'_>) -> String {
    let mut out = Vec::new();
    cli.write_usage(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn readme(cli: &mut Cli<'_>) -> String {
    let mut out = Vec::new();
    cli.write_readme(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn unaligned_blocks() {
    let mut text = String::new();
    let mut number: isize = 0;

    let mut cli = Cli::new(config(false));
    flag!(cli, &mut text, "s", "str", "x", "A string.").unwrap();
    flag!(cli, &mut number, "n", 0, "A number.").unwrap();

    assert_eq!(
        usage(&mut cli),
        "Usage: prog [OPTIONS]\n\
         \n\
         DESCRIPTION\n\
         \n\
         OPTIONS\n    \
         -h, --help\n        Display this help message.\n\n    \
         -n INT\n        A number.\n\n    \
         -s, --str=STRING\n        A string.\n\n"
    );
}

#[test]
fn aligned_descriptions_share_a_column() {
    let mut text = String::new();
    let mut number: isize = 0;

    let mut cli = Cli::new(config(true));
    flag!(cli, &mut text, "s", "str", "x", "A string.").unwrap();
    flag!(cli, &mut number, "n", 0, "A number.").unwrap();

    let widths = *cli.registry().widths();
    assert_eq!(widths.short, 6);
    assert_eq!(widths.long, 12);
    assert_eq!(widths.left, 20);
    assert_eq!(widths.desc, 52);

    let output = usage(&mut cli);
    let options: Vec<&str> = output
        .lines()
        .skip_while(|line| *line != "OPTIONS")
        .skip(1)
        .take(3)
        .collect();

    assert_eq!(
        options,
        [
            format!("{:<28}Display this help message.", "    -h,     --help"),
            format!("{:<28}A number.", "    -n INT"),
            format!("{:<28}A string.", "    -s,     --str=STRING"),
        ]
    );

    assert!(output.ends_with("A string.\n\n"));
}

#[test]
fn aligned_section_values_line_up() {
    let mut cli = Cli::new(config(false));
    cli.aligned_section("KEYS", "a: 1\nbb: 22", ":");

    let text = usage(&mut cli);
    let a = text.lines().find(|line| line.trim_start().starts_with("a ")).unwrap();
    let bb = text.lines().find(|line| line.trim_start().starts_with("bb ")).unwrap();

    assert_eq!(a.find('1'), bb.find('2'));
    assert_eq!(bb, "    bb    22");
}

#[test]
fn sort_order_is_reproducible() {
    let (mut b, mut upper_a, mut aardvark) = (false, false, false);

    let mut cli = Cli::new(config(false));
    flag!(cli, &mut b, "b", "Bee flag.").unwrap();
    flag!(cli, &mut upper_a, "A", "Ay flag.").unwrap();
    flag!(cli, &mut aardvark, "a", "Aardvark", "An animal.").unwrap();

    let first = usage(&mut cli);
    let readme_text = readme(&mut cli);
    let second = usage(&mut cli);
    assert_eq!(first, second);

    let names: Vec<&str> = cli.registry().flags().iter().map(|flag| flag.name()).collect();
    assert_eq!(names, ["A", "Aardvark", "b", "help", "readme"]);

    let rows: Vec<&str> = readme_text
        .lines()
        .filter(|line| line.starts_with('`') && line.contains(" | "))
        .collect();
    assert_eq!(
        rows,
        [
            "`-A` |  | Ay flag.",
            "`-a`, `--Aardvark` |  | An animal.",
            "`-b` |  | Bee flag.",
            "`-h`, `--help` |  | Display this help message.",
        ]
    );
}

#[test]
fn registration_order_does_not_change_output() {
    fn render(order: &[usize], align: bool) -> String {
        let mut verbose = false;
        let mut level: u64 = 0;
        let mut names = StringList::new();
        let mut rate = 0.0;

        let mut slots = [
            Some(vec![FlagArg::from(&mut verbose), "v".into(), "verbose".into(), "Talk.".into()]),
            Some(vec![FlagArg::from(&mut level), "level".into(), 3.into(), "How hard.".into()]),
            Some(vec![FlagArg::from(&mut names), "N".into(), "Some names.".into()]),
            Some(vec![FlagArg::from(&mut rate), "r".into(), 0.5.into(), "Rate of things.".into()]),
        ];

        let mut cli = Cli::new(config(align));
        for &i in order {
            if let Some(args) = slots[i].take() {
                cli.try_flag(args).unwrap();
            }
        }

        usage(&mut cli)
    }

    for align in [false, true] {
        let expected = render(&[0, 1, 2, 3], align);

        for order in [[3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]] {
            assert_eq!(render(&order, align), expected);
        }
    }
}

#[test]
fn hidden_flags_parse_but_do_not_render() {
    let mut secret = IntList::new();

    let parsed = {
        let mut cli = Cli::new(config(true));
        flag!(cli, &mut secret, "secret", "Not for you.", true).unwrap();

        assert!(!usage(&mut cli).contains("secret"));
        assert!(!readme(&mut cli).contains("secret"));

        cli.parse_from(["--secret=7", "--secret", "8"])
    };

    assert_eq!(&*secret, [7, 8]);
    assert_eq!(parsed.narg(), 0);
    assert_eq!(parsed.nflag(), 1);
}

#[test]
fn bad_list_values_are_errors() {
    let mut numbers = IntList::new();

    let mut cli = Cli::new(config(false));
    flag!(cli, &mut numbers, "n", "Some numbers.").unwrap();

    let error = cli.try_parse_from(["-n", "12", "-n", "twelve"]).unwrap_err();
    assert!(matches!(
        error,
        ParseError::InvalidValue { ref option, source: ValueError::InvalidInt { ref value, .. } }
            if option == "-n" && value == "twelve"
    ));
}

#[test]
fn counters_count_every_appearance() {
    let mut verbosity = Counter::new();

    {
        let mut cli = Cli::new(config(false));
        flag!(cli, &mut verbosity, "v", "More output.").unwrap();
        cli.parse_from(["-vvv", "--", "-v"]);
    }

    assert_eq!(verbosity.count(), 3);
}

#[test]
fn help_cannot_be_redefined() {
    let mut mine = false;

    let mut cli = Cli::new(config(false));
    assert_eq!(
        flag!(cli, &mut mine, "h", "My own help."),
        Err(RegistrationError::Redefined("h".to_owned()))
    );
}

#[test]
fn default_type_mismatch_is_returned() {
    let mut rate = 0.0;

    let mut cli = Cli::new(config(false));
    let error = cli
        .try_flag([FlagArg::from(&mut rate), "rate".into(), 1.into(), "Rate.".into()])
        .unwrap_err();

    assert!(matches!(
        error,
        FlagError::Registration(RegistrationError::TypeMismatch { .. })
    ));
}

#[test]
fn readme_layout() {
    let mut text = String::new();

    let mut cli = Cli::new(Config {
        info: "Does a thing.".to_owned(),
        see_also: vec!["other(1)".to_owned(), "more(1)".to_owned()],
        ..config(false)
    });
    flag!(cli, &mut text, "s", "str", "x", "A string.").unwrap();

    assert_eq!(
        readme(&mut cli),
        "# prog\n\
         \n\
         ## Synopsis\n\
         \n\
         `prog [OPTIONS]`\n\
         \n\
         ## Description\n\
         \n\
         Does a thing.\n\
         \n\
         ## Options\n\
         \n\
         Option | Args | Description\n\
         ------ | ---- | -----------\n\
         `-h`, `--help` |  | Display this help message.\n\
         `-s`, `--str` | `STRING` | A string.\n\
         \n\
         ## See also\n\
         \n\
         other(1)\n\
         more(1)\n"
    );
}

#[test]
fn trailing_true_hides_a_switch() {
    let mut secret = false;

    {
        let mut cli = Cli::new(config(false));
        flag!(cli, &mut secret, "secret", "Hidden switch.", true).unwrap();

        assert!(!usage(&mut cli).contains("secret"));
        cli.parse_from(["--secret"]);
    }

    assert!(secret);
}

#[test]
fn registration_resets_lists_and_counters() {
    let mut verbosity = Counter::new();
    verbosity.inc();
    let mut numbers = IntList::from(vec![9]);

    {
        let mut cli = Cli::new(config(false));
        flag!(cli, &mut verbosity, "v", "More output.").unwrap();
        flag!(cli, &mut numbers, "n", "Some numbers.").unwrap();
        cli.parse_from(["-v", "-n", "1"]);
    }

    assert_eq!(verbosity.count(), 1);
    assert_eq!(&*numbers, [1]);
}
