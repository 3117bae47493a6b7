//! Aligned plain-text tables for `--format table`.

const MIN_COLUMN_WIDTH: usize = 4;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Rows of string cells under a header line.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Missing trailing cells render as `-`.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn render(&self, options: TableOptions) -> String {
        let mut widths = self.natural_widths();
        shrink_to_fit(&mut widths, &self.headers, options.max_width);

        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(text, width)| pad(&truncate(text, *width), *width, false))
            .collect::<Vec<_>>()
            .join(GAP);
        let divider = "-".repeat(header.trim_end().chars().count());

        let mut lines = vec![header.trim_end().to_string(), divider];
        for row in &self.rows {
            let line = widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let cell = row.get(index).map_or("-", String::as_str);
                    let text = truncate(cell, *width);
                    let numeric = looks_numeric(&text);
                    let padded = pad(&text, *width, numeric);
                    if options.color {
                        colorize_status(&text, padded)
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join(GAP);
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    fn natural_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                    .max()
                    .unwrap_or(MIN_COLUMN_WIDTH)
            })
            .collect()
    }
}

/// Narrow the widest column one step at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[String], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = widths.len().saturating_sub(1) * GAP.len();

    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | ',' | '$'))
}

/// Wrap a padded cell in an ANSI color chosen by its status word.
fn colorize_status(text: &str, padded: String) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "completed" | "pass" | "ok" | "healthy" | "true" | "replace" => "32",
        "pending" | "processing" | "warning" | "supplement" => "33",
        "failed" | "fail" | "error" | "false" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
