//! Alignment-preserving placeholder substitution.
//!
//! Applies placeholder-to-literal replacement across a buffer. Inside
//! table rows, replacements of a different length than their placeholder
//! borrow from (or add to) the cell's trailing spaces so that the column
//! width between delimiters is unchanged. The downstream table renderer
//! requires aligned delimiters across all rows of a column, so a cell that
//! can't absorb a longer replacement is a fatal error.

use std::path::Path;

use crate::error::PipelineError;
use crate::tag::BuildTag;

/// Fixed documentation site URL substituted for `%docurl%`.
const DOC_URL: &str = "https://www.ixsystems.com/documentation";

/// Column delimiter in textual table rows.
const DELIMITER: char = '|';

/// Build the placeholder table for one document.
///
/// Brand entries are present only when the tag resolves to a brand;
/// `%chapter%` and `%docurl%` are always present. The key set is constant
/// across the run for a given tag; only the chapter value varies.
#[must_use]
pub fn replacement_table(tag: &BuildTag, chapter: usize) -> Vec<(String, String)> {
    let mut table = Vec::with_capacity(5);
    if let Some(brand) = tag.brand() {
        table.push(("%brand%".to_owned(), brand.markup().to_owned()));
        table.push(("%brandplain%".to_owned(), brand.plain().to_owned()));
        table.push(("%brandlower%".to_owned(), brand.lower().to_owned()));
    }
    table.push(("%chapter%".to_owned(), (chapter + 1).to_string()));
    table.push(("%docurl%".to_owned(), DOC_URL.to_owned()));
    table
}

/// Apply all placeholder substitutions for a document.
///
/// # Errors
///
/// Returns [`PipelineError::InsufficientPadding`] when a table cell can't
/// absorb a longer replacement.
pub fn substitute(
    input: &str,
    tag: &BuildTag,
    chapter: usize,
    file: &Path,
) -> Result<String, PipelineError> {
    let mut buffer = input.to_owned();
    for (placeholder, replacement) in replacement_table(tag, chapter) {
        if placeholder.chars().count() == replacement.chars().count() {
            // Same width: a plain global replace keeps every column
            // aligned, so table handling is skipped for this pair.
            buffer = buffer.replace(&placeholder, &replacement);
            continue;
        }
        buffer = substitute_uneven(&buffer, &placeholder, &replacement, file)?;
    }
    Ok(buffer)
}

/// Is this line a table row: optional indent, then `|`...`|`, then
/// optional trailing whitespace?
fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with(DELIMITER) && trimmed.ends_with(DELIMITER)
}

/// Substitute one placeholder whose replacement has a different width.
///
/// Table rows containing the placeholder are rewritten cell by cell to
/// keep their width; a final global replace catches the occurrences
/// outside tables.
fn substitute_uneven(
    buffer: &str,
    placeholder: &str,
    replacement: &str,
    file: &Path,
) -> Result<String, PipelineError> {
    let lines: Vec<&str> = buffer.lines().collect();
    let mut rewritten = Vec::with_capacity(lines.len());
    for line in &lines {
        if is_table_row(line) && line.contains(placeholder) {
            rewritten.push(rewrite_table_row(line, placeholder, replacement, file)?);
        } else {
            rewritten.push((*line).to_owned());
        }
    }
    let mut output = rewritten.join("\n");
    if buffer.ends_with('\n') {
        output.push('\n');
    }
    Ok(output.replace(placeholder, replacement))
}

/// Rewrite one table row, preserving the width of every cell.
fn rewrite_table_row(
    line: &str,
    placeholder: &str,
    replacement: &str,
    file: &Path,
) -> Result<String, PipelineError> {
    let after_indent = line.trim_start();
    let indent = &line[..line.len() - after_indent.len()];
    let row = after_indent.trim_end();
    let trailing = &after_indent[row.len()..];

    // Outer delimiters are the trimmed line's first and last characters;
    // only the interior is split into cells.
    let interior = &row[1..row.len() - 1];

    let placeholder_width = placeholder.chars().count();
    let replacement_width = replacement.chars().count();
    let diff = placeholder_width.abs_diff(replacement_width);

    let mut cells = Vec::new();
    for cell in interior.split(DELIMITER) {
        let occurrences = cell.matches(placeholder).count();
        if occurrences == 0 {
            cells.push(cell.to_owned());
            continue;
        }
        let pad = occurrences * diff;
        if replacement_width > placeholder_width {
            // The cell must yield `pad` trailing spaces and still keep one
            // space before its delimiter.
            let trailing_spaces = cell.chars().rev().take_while(|&c| c == ' ').count();
            if trailing_spaces < pad + 1 {
                return Err(PipelineError::InsufficientPadding {
                    file: file.to_path_buf(),
                    placeholder: placeholder.to_owned(),
                    cell: cell.trim().to_owned(),
                });
            }
            let shortened = &cell[..cell.len() - pad];
            cells.push(shortened.replace(placeholder, replacement));
        } else {
            let mut replaced = cell.replace(placeholder, replacement);
            replaced.push_str(&" ".repeat(pad));
            cells.push(replaced);
        }
    }

    Ok(format!(
        "{indent}{DELIMITER}{}{DELIMITER}{trailing}",
        cells.join("|")
    ))
}
