//=========================================================================
// Note Markup
//
// Escaping and the single supported inline convention: `**bold**`.
//
// Notes:
// Content is escaped first, so markers can never inject markup. An
// unmatched trailing `**` is left as literal text.
//
//=========================================================================

//=== escape_html() =======================================================

/// Escapes text for safe insertion into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

//=== render_content() ====================================================

/// Escapes note content and turns `**text**` spans into `<strong>`.
pub fn render_content(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len() + 16);
    let mut rest = escaped.as_str();

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };

        out.push_str(&rest[..open]);
        out.push_str("<strong>");
        out.push_str(&after_open[..close]);
        out.push_str("</strong>");
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

//=== plain_text() ========================================================

/// Strips bold markers, for hosts that cannot render markup.
pub fn plain_text(text: &str) -> String {
    text.replace("**", "")
}

//=========================================================================
// Unit Tests
//=========================================================================
