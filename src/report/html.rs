use crate::report::ReportError;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Writes the work item list fragment: a leading newline, then for every
/// entry a newline followed by `\t<li>TFS {id} - {title}</li>\n`.
pub fn render_report<W: Write>(
    writer: &mut W,
    work_items: &BTreeMap<i64, String>,
) -> io::Result<()> {
    writer.write_all(b"\n")?;
    for (id, title) in work_items {
        write!(writer, "\n\t<li>TFS {} - {}</li>\n", id, escape_html(title))?;
    }
    Ok(())
}

/// Renders the report and writes it to `path`, replacing any existing file.
pub fn save_report(path: &Path, work_items: &BTreeMap<i64, String>) -> Result<(), ReportError> {
    let mut buffer = Vec::new();
    render_report(&mut buffer, work_items).map_err(ReportError::Render)?;

    let mut file = File::create(path).map_err(|source| ReportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&buffer)
        .and_then(|_| file.sync_all())
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Escapes text for an HTML text node.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'', '+', '\0']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            '+' => escaped.push_str("&#43;"),
            '\0' => escaped.push('\u{FFFD}'),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
