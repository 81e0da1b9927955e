//! Output formatting: table, JSON, YAML, plain.

use std::io::{self, IsTerminal, Write};

use tabled::{settings::Style, Table, Tabled};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Render a list of items in the chosen format.
///
/// `table` goes through the `Tabled` row type, `json`/`yaml` serialize
/// the original data via serde, and `plain` emits `id_fn` per item, one
/// per line, for scripting.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).expect("serialization should not fail")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(data).expect("serialization should not fail")
        }
        OutputFormat::Yaml => serde_yaml::to_string(data).expect("serialization should not fail"),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end_matches('\n'));
}
