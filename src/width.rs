/*!
Column widths shared by every flag in aligned help output.

Each registered flag is folded in once. The short and long columns only ever
grow, and the description column only ever shrinks, so the final layout
doesn't depend on the order flags were registered in.
 */

use crate::config::Config;
use crate::flag::CliFlag;
use crate::wrap::display_width;

/// Gap between the short and long columns: `", "` or two spaces.
pub const SEPARATOR_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidth {
    /// Widest short column seen so far.
    pub short: usize,

    /// Widest long column seen so far.
    pub long: usize,

    /// Narrowest description column any flag leaves. Starts at
    /// [`usize::MAX`] so that the first flag isn't clamped against zero.
    pub desc: usize,

    /// `short + SEPARATOR_WIDTH + long`.
    pub left: usize,
}

impl Default for ColumnWidth {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnWidth {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            short: 0,
            long: 0,
            desc: usize::MAX,
            left: 0,
        }
    }

    /// Fold one more flag into the layout.
    pub fn update(&mut self, flag: &CliFlag, config: &Config) {
        self.short = self.short.max(short_footprint(flag));
        self.long = self.long.max(long_footprint(flag));
        self.left = self.short + SEPARATOR_WIDTH + self.long;

        let remaining = config
            .max_width
            .saturating_sub(2 * config.tab_width + self.left);
        self.desc = self.desc.min(remaining);

        tracing::trace!(
            flag = %flag.name(),
            short = self.short,
            long = self.long,
            desc = self.desc,
            left = self.left,
            "renegotiated column widths"
        );
    }
}

/// `-s`, plus ` TAG` when there's no long column to carry the tag.
fn short_footprint(flag: &CliFlag) -> usize {
    if flag.short().is_empty() {
        return 0;
    }

    let tag = flag.type_tag();

    match flag.long().is_empty() && !tag.is_empty() {
        true => 2 + 1 + tag.len(),
        false => 2,
    }
}

/// `--long`, plus `=TAG`.
fn long_footprint(flag: &CliFlag) -> usize {
    if flag.long().is_empty() {
        return 0;
    }

    let tag = flag.type_tag();

    match tag.is_empty() {
        true => 2 + display_width(flag.long()),
        false => 2 + display_width(flag.long()) + 1 + tag.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ValueKind;

    fn config() -> Config {
        Config {
            max_width: 80,
            tab_width: 4,
            ..Config::default()
        }
    }

    fn flag(short: &str, long: &str, kind: ValueKind) -> CliFlag {
        CliFlag::new(short, long, "desc", kind, false)
    }

    #[test]
    fn empty_layout_uses_sentinel() {
        let widths = ColumnWidth::new();
        assert_eq!(widths.desc, usize::MAX);
        assert_eq!(widths.left, 0);
    }

    #[test]
    fn tag_goes_on_short_column_without_long() {
        let mut widths = ColumnWidth::new();
        widths.update(&flag("n", "", ValueKind::Int), &config());

        assert_eq!(widths.short, 6);
        assert_eq!(widths.long, 0);
        assert_eq!(widths.left, 8);
        assert_eq!(widths.desc, 64);
    }

    #[test]
    fn tag_goes_on_long_column() {
        let mut widths = ColumnWidth::new();
        widths.update(&flag("s", "str", ValueKind::String), &config());

        assert_eq!(widths.short, 2);
        assert_eq!(widths.long, 12);
        assert_eq!(widths.left, 16);
    }

    #[test]
    fn columns_never_shrink() {
        let mut widths = ColumnWidth::new();
        widths.update(&flag("", "verbose-output", ValueKind::Bool), &config());
        let before = widths;

        widths.update(&flag("q", "", ValueKind::Bool), &config());

        assert_eq!(widths.long, before.long);
        assert_eq!(widths.short, 2);
        assert!(widths.desc <= before.desc);
        assert_eq!(widths.left, widths.short + SEPARATOR_WIDTH + widths.long);
    }

    #[test]
    fn narrow_terminal_saturates() {
        let mut widths = ColumnWidth::new();
        let tiny = Config {
            max_width: 10,
            ..config()
        };

        widths.update(&flag("", "extremely-long-name", ValueKind::String), &tiny);
        assert_eq!(widths.desc, 0);
    }

    #[test]
    fn order_does_not_matter() {
        let flags = [
            flag("a", "alpha", ValueKind::Float),
            flag("n", "", ValueKind::Uint),
            flag("", "gamma-ray", ValueKind::StringList),
        ];

        let mut forward = ColumnWidth::new();
        flags.iter().for_each(|f| forward.update(f, &config()));

        let mut backward = ColumnWidth::new();
        flags.iter().rev().for_each(|f| backward.update(f, &config()));

        assert_eq!(forward, backward);
    }
}
