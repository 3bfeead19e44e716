//! Recursive include expansion.
//!
//! Locates `#include <path>` directive lines and replaces each with the
//! fully transformed content of the referenced file. The referenced file
//! runs through the entire per-file pipeline before splicing, so its own
//! directives resolve against the same build tag and chapter index as the
//! parent. Every spliced line inherits the directive's leading whitespace,
//! which makes nested includes accumulate indentation.

use std::path::Path;

use crate::error::PipelineError;

/// A parsed `#include` directive line.
#[derive(Debug, PartialEq, Eq)]
struct IncludeDirective<'a> {
    /// Leading whitespace of the directive line.
    indent: &'a str,
    /// The referenced file, as written.
    path: &'a str,
}

/// Parse a line as an `#include` directive.
///
/// Returns `None` for ordinary lines. A directive with content after the
/// filename token is a [`PipelineError::MalformedDirective`].
fn parse_include<'a>(line: &'a str, file: &Path) -> Result<Option<IncludeDirective<'a>>, PipelineError> {
    let after_indent = line.trim_start();
    let Some(rest) = after_indent.strip_prefix("#include") else {
        return Ok(None);
    };
    if !rest.starts_with(char::is_whitespace) {
        return Ok(None);
    }
    let rest = rest.trim_start();
    let path = rest.split_whitespace().next().unwrap_or("");
    if path.is_empty() {
        return Ok(None);
    }
    if !rest[path.len()..].trim_start().is_empty() {
        return Err(PipelineError::MalformedDirective {
            file: file.to_path_buf(),
            line: line.trim().to_owned(),
        });
    }
    let indent = &line[..line.len() - after_indent.len()];
    Ok(Some(IncludeDirective { indent, path }))
}

/// Expand every `#include` directive in a buffer.
///
/// `process` runs the referenced file through the full pipeline and
/// returns its finished text; it is also responsible for cycle detection.
/// After this stage the buffer contains no inclusion directives.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedDirective`] for directive lines with
/// trailing content, or whatever `process` fails with.
pub(crate) fn resolve_includes<F>(
    input: &str,
    file: &Path,
    mut process: F,
) -> Result<String, PipelineError>
where
    F: FnMut(&Path) -> Result<String, PipelineError>,
{
    let lines: Vec<&str> = input.lines().collect();
    let mut output: Vec<String> = Vec::with_capacity(lines.len());

    for line in &lines {
        let Some(directive) = parse_include(line, file)? else {
            output.push((*line).to_owned());
            continue;
        };
        let included = process(Path::new(directive.path))?;
        for included_line in included.lines() {
            output.push(format!("{}{included_line}", directive.indent));
        }
    }

    // A buffer that still has lines keeps its final newline; a buffer
    // whose every line was consumed collapses to the empty string.
    let keep_newline = input.ends_with('\n') && !output.is_empty();
    let mut result = output.join("\n");
    if keep_newline {
        result.push('\n');
    }
    Ok(result)
}
