//! Greedy word wrapping for help text.

use joinery::JoinableIterator;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Width of `text` in terminal columns.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    textwrap::core::display_width(text)
}

/**
Wrap `text` into lines no wider than `width` columns.

Explicit newlines are kept as line breaks, and an empty line between two
newlines comes out as an empty line. Runs of whitespace inside a line collapse
to a single space. Words are never split: a word wider than `width` gets a line
to itself. A trailing newline produces a trailing empty line. Empty text
produces no lines at all.
 */
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let options = Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    text.split('\n')
        .flat_map(|line| {
            let line = line.split_whitespace().join_with(' ').to_string();

            textwrap::wrap(&line, &options)
                .into_iter()
                .map(|wrapped| wrapped.into_owned())
                .collect::<Vec<_>>()
        })
        .collect()
}
