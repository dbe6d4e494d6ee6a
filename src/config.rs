use crate::arguments::{argv0, program_name};

/// Everything about help and readme output that isn't a flag.
///
/// Set these before registering flags: column widths are computed from
/// `max_width` and `tab_width` as each flag is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Heading of the generated readme.
    pub title: String,

    /// The synopsis line, such as `prog [OPTIONS] <FILE>`.
    pub banner: String,

    /// Free-form description, shown under DESCRIPTION.
    pub info: String,

    pub authors: Vec<String>,

    /// Where to send bug reports.
    pub bug_email: String,

    /// Description of the program's exit codes.
    pub exit_status: String,

    /// Related programs or documents, one per entry.
    pub see_also: Vec<String>,

    /// Total width of help text, in columns.
    pub max_width: usize,

    /// Width of one level of indentation.
    pub tab_width: usize,

    /// Line descriptions up in a shared column instead of putting each on its
    /// own indented block.
    pub align: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: program_name(),
            banner: format!("{} [OPTIONS]", argv0()),
            info: String::new(),
            authors: Vec::new(),
            bug_email: String::new(),
            exit_status: String::new(),
            see_also: Vec::new(),
            max_width: 80,
            tab_width: 4,
            align: false,
        }
    }
}
