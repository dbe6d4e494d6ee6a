/*!
Free-form documentation blocks that follow the options in help output, such
as EXAMPLES or ENVIRONMENT.
 */

use std::io::{self, Write as _};

use indent_write::io::IndentWriter;

use crate::config::Config;
use crate::wrap::{display_width, wrap};

/// Which document a block is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Help text for a terminal.
    Terminal,

    /// A section of the generated readme.
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    text: String,

    /// When set, each line of `text` is a `key<delimiter>value` pair, and
    /// the values are lined up in a column.
    align_on: Option<String>,
}

impl Section {
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            align_on: None,
        }
    }

    /// A section whose lines are `key<align_on>value` pairs. An empty
    /// delimiter gives a plain section.
    #[must_use]
    pub fn aligned(
        title: impl Into<String>,
        text: impl Into<String>,
        align_on: impl Into<String>,
    ) -> Self {
        let align_on = align_on.into();

        Self {
            title: title.into(),
            text: text.into(),
            align_on: (!align_on.is_empty()).then_some(align_on),
        }
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn render(
        &self,
        out: &mut (impl io::Write + ?Sized),
        style: Style,
        config: &Config,
    ) -> io::Result<()> {
        match (style, &self.align_on) {
            (Style::Markdown, _) => {
                write!(out, "\n## {}\n\n", self.title)?;

                wrap(&self.text, config.max_width)
                    .iter()
                    .try_for_each(|line| writeln!(out, "{line}"))
            }
            (Style::Terminal, None) => {
                writeln!(out, "{}", self.title)?;

                let indent = " ".repeat(config.tab_width);
                {
                    let mut body = IndentWriter::new(&indent, &mut *out);

                    wrap(
                        &self.text,
                        config.max_width.saturating_sub(config.tab_width),
                    )
                    .iter()
                    .try_for_each(|line| writeln!(body, "{line}"))?;
                }

                writeln!(out)
            }
            (Style::Terminal, Some(delimiter)) => {
                writeln!(out, "{}", self.title)?;
                self.render_aligned(out, delimiter, config)?;
                writeln!(out)
            }
        }
    }

    /// Write the body as two columns. The key column is as wide as the widest
    /// key; wrapped value lines stay in the value column.
    fn render_aligned(
        &self,
        out: &mut (impl io::Write + ?Sized),
        delimiter: &str,
        config: &Config,
    ) -> io::Result<()> {
        let tab = config.tab_width;

        let rows: Vec<(&str, &str)> = self
            .text
            .split('\n')
            .map(|line| {
                let line = line.trim();

                match line.split_once(delimiter) {
                    Some((key, value)) => (key.trim(), value),
                    None => (line, ""),
                }
            })
            .collect();

        let key_width = rows
            .iter()
            .map(|&(key, _)| display_width(key))
            .max()
            .unwrap_or(0);

        let value_width = config.max_width.saturating_sub(2 * tab + key_width);

        rows.iter().try_for_each(|&(key, value)| {
            if value.trim().is_empty() {
                return match key.is_empty() {
                    true => writeln!(out),
                    false => writeln!(out, "{:tab$}{key}", ""),
                };
            }

            let padding = key_width.saturating_sub(display_width(key));

            wrap(value, value_width)
                .iter()
                .enumerate()
                .try_for_each(|(i, line)| match i {
                    0 => writeln!(out, "{:tab$}{key}{:padding$}{:tab$}{line}", "", "", ""),
                    _ => writeln!(out, "{:tab$}{:key_width$}{:tab$}{line}", "", "", ""),
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            max_width: 40,
            tab_width: 4,
            ..Config::default()
        }
    }

    fn rendered(section: &Section, style: Style) -> String {
        let mut out = Vec::new();
        section.render(&mut out, style, &config()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_terminal() {
        let section = Section::new("NOTES", "first line\n\nsecond");

        assert_eq!(
            rendered(&section, Style::Terminal),
            "NOTES\n    first line\n\n    second\n\n"
        );
    }

    #[test]
    fn plain_terminal_wraps_inside_indent() {
        let section = Section::new(
            "NOTES",
            "aaaa bbbb cccc dddd eeee ffff gggg hhhh",
        );

        assert_eq!(
            rendered(&section, Style::Terminal),
            "NOTES\n    aaaa bbbb cccc dddd eeee ffff gggg\n    hhhh\n\n"
        );
    }

    #[test]
    fn aligned_values_share_a_column() {
        let section = Section::aligned("KEYS", "a: 1\nbb: 22", ":");
        let text = rendered(&section, Style::Terminal);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "    a     1");
        assert_eq!(lines[2], "    bb    22");
        assert_eq!(lines[1].find('1'), lines[2].find('2'));
    }

    #[test]
    fn aligned_continuation_stays_in_value_column() {
        let section = Section::aligned(
            "KEYS",
            "key = one two three four five six seven",
            "=",
        );

        // value width = 40 - 8 - 3 = 29
        assert_eq!(
            rendered(&section, Style::Terminal),
            "KEYS\n    key    one two three four five six\n           seven\n\n"
        );
    }

    #[test]
    fn aligned_line_without_value() {
        let section = Section::aligned("KEYS", "lonely\nk: v", ":");

        assert_eq!(
            rendered(&section, Style::Terminal),
            "KEYS\n    lonely\n    k         v\n\n"
        );
    }

    #[test]
    fn empty_delimiter_is_plain() {
        assert_eq!(
            Section::aligned("T", "x", ""),
            Section::new("T", "x")
        );
    }

    #[test]
    fn markdown() {
        let section = Section::aligned("Keys", "a: 1\nbb: 22", ":");

        assert_eq!(
            rendered(&section, Style::Markdown),
            "\n## Keys\n\na: 1\nbb: 22\n"
        );
    }
}
