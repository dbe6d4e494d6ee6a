/*!
The registry of every flag and section a program declared, and the two
documents generated from them: terminal usage text and a Markdown readme.

```text
Usage: prog [OPTIONS]

DESCRIPTION
    What the program does.

OPTIONS
    -h, --help
        Display this help message.

<custom sections>
AUTHORS
REPORTING BUGS
EXIT STATUS
SEE ALSO
```
 */

use std::cmp::Ordering;
use std::io::{self, Write as _};
use std::process;

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;

use crate::config::Config;
use crate::flag::CliFlag;
use crate::section::{Section, Style};
use crate::width::ColumnWidth;
use crate::wrap::wrap;

#[derive(Debug, Clone)]
pub struct Registry {
    config: Config,
    flags: Vec<CliFlag>,
    sections: Vec<Section>,
    widths: ColumnWidth,
}

impl Registry {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            flags: Vec::new(),
            sections: Vec::new(),
            widths: ColumnWidth::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Flags in registration order, or in display order once output has been
    /// written.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> &[CliFlag] {
        &self.flags
    }

    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[inline]
    #[must_use]
    pub fn widths(&self) -> &ColumnWidth {
        &self.widths
    }

    /// Record a validated flag and fold it into the shared column widths.
    /// Hidden flags count towards the widths too.
    pub fn add_flag(&mut self, flag: CliFlag) {
        self.widths.update(&flag, &self.config);
        self.flags.push(flag);
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Put the flags in display order: by long name (or short name, if
    /// there's no long name), ignoring case, then by the other name. Stable,
    /// and a no-op when the flags are already in order.
    pub fn sort(&mut self) {
        if !self
            .flags
            .is_sorted_by(|a, b| compare_flags(a, b) != Ordering::Greater)
        {
            self.flags.sort_by(compare_flags);
        }
    }

    fn visible_flags(&self) -> impl Iterator<Item = &CliFlag> {
        self.flags.iter().filter(|flag| !flag.hidden())
    }

    /// The extra blocks after the options, each omitted when it has nothing
    /// to say.
    fn extras(&self, style: Style) -> Vec<Section> {
        let config = &self.config;
        let title = |terminal: &str, markdown: &str| match style {
            Style::Terminal => terminal.to_owned(),
            Style::Markdown => markdown.to_owned(),
        };

        let mut extras = Vec::new();

        if !config.authors.is_empty() {
            extras.push(Section::new(
                title("AUTHORS", "Authors"),
                config.authors.iter().join_with('\n').to_string(),
            ));
        }

        if !config.bug_email.is_empty() {
            extras.push(Section::new(
                title("REPORTING BUGS", "Reporting bugs"),
                format!(
                    "Email bug reports to the bug-reporting address ({}).",
                    config.bug_email
                ),
            ));
        }

        if !config.exit_status.is_empty() {
            extras.push(Section::new(
                title("EXIT STATUS", "Exit status"),
                config.exit_status.clone(),
            ));
        }

        if !config.see_also.is_empty() {
            extras.push(Section::new(
                title("SEE ALSO", "See also"),
                config.see_also.iter().join_with('\n').to_string(),
            ));
        }

        extras
    }

    /// Write the terminal usage message.
    pub fn write_usage(&mut self, out: &mut (impl io::Write + ?Sized)) -> io::Result<()> {
        self.sort();

        let config = &self.config;
        let tab = " ".repeat(config.tab_width);

        wrap(&format!("Usage: {}", config.banner), config.max_width)
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))?;

        write!(out, "\nDESCRIPTION\n")?;

        let mut body = IndentWriter::new(tab.as_str(), &mut *out);
        wrap(
            &config.info,
            config.max_width.saturating_sub(config.tab_width),
        )
        .iter()
        .try_for_each(|line| writeln!(body, "{line}"))?;
        drop(body);

        write!(out, "\nOPTIONS\n")?;

        self.visible_flags()
            .try_for_each(|flag| flag.render(out, &self.widths, config))?;

        if config.align {
            writeln!(out)?;
        }

        self.sections
            .iter()
            .chain(&self.extras(Style::Terminal))
            .try_for_each(|section| section.render(out, Style::Terminal, config))
    }

    /// Write the Markdown readme.
    pub fn write_readme(&mut self, out: &mut (impl io::Write + ?Sized)) -> io::Result<()> {
        self.sort();

        let config = &self.config;

        writeln!(out, "# {}", config.title)?;

        write!(out, "\n## Synopsis\n\n")?;
        wrap(&config.banner, config.max_width)
            .iter()
            .try_for_each(|line| writeln!(out, "`{line}`"))?;

        write!(out, "\n## Description\n\n")?;
        wrap(&config.info, config.max_width)
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))?;

        write!(out, "\n## Options\n\n")?;
        writeln!(out, "Option | Args | Description")?;
        writeln!(out, "------ | ---- | -----------")?;
        self.visible_flags().try_for_each(|flag| flag.table(out))?;

        self.sections
            .iter()
            .chain(&self.extras(Style::Markdown))
            .try_for_each(|section| section.render(out, Style::Markdown, config))
    }

    /// Print the usage message to stderr and exit with `status`.
    pub fn usage(&mut self, status: i32) -> ! {
        if let Err(error) = self.write_usage(&mut io::stderr().lock()) {
            tracing::warn!(%error, "failed to write usage message");
        }

        process::exit(status)
    }

    /// Print the readme to stdout and exit successfully.
    pub fn readme(&mut self) -> ! {
        let mut stdout = io::stdout().lock();

        if let Err(error) = self.write_readme(&mut stdout).and_then(|()| stdout.flush()) {
            tracing::warn!(%error, "failed to write readme");
        }

        process::exit(0)
    }
}

/// Display order for flags.
fn compare_flags(a: &CliFlag, b: &CliFlag) -> Ordering {
    fn key(flag: &CliFlag) -> (String, String, &str, &str) {
        (
            flag.name().to_lowercase(),
            flag.secondary_name().to_lowercase(),
            flag.secondary_name(),
            flag.name(),
        )
    }

    key(a).cmp(&key(b))
}
