//! Declares a flag that can't work, to show how a declaration mistake ends
//! the program before any parsing happens.

use std::env;

use flagdoc::{Cli, Config, flag};

fn main() -> anyhow::Result<()> {
    let mut rate = 0.0;
    let mut cli = Cli::new(Config::default());

    match env::args().nth(1).as_deref() {
        Some("construction") => flag!(cli, &mut rate, "rate", 1.0, 2.0, "Two defaults.")?,
        Some("validation") => flag!(cli, &mut rate, 1.0, "A rate with no name.")?,
        _ => anyhow::bail!("expected `construction` or `validation`"),
    }

    cli.parse();
    Ok(())
}
