use std::io::{self, Write};
use todo_list::{Item, Theme};

pub const EMPTY_MESSAGE: &str = "No todos yet. Add one to get started!";

/// Writes one line per item, or the empty message.
pub fn render_text(items: &[Item], out: &mut impl Write) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "{}", EMPTY_MESSAGE);
    }
    for item in items {
        let mark = if item.is_completed() { 'x' } else { ' ' };
        writeln!(
            out,
            "[{}] {}  {}  ({})",
            mark,
            item.id(),
            item.text(),
            item.created_at()
        )?;
    }
    Ok(())
}

/// Renders the list as the HTML fragment the page displays.
pub fn render_html(items: &[Item], theme: Theme) -> String {
    let mut html = format!("<div class=\"todo-app\" data-theme=\"{}\">\n", theme);
    if items.is_empty() {
        html.push_str(&format!(
            "  <div class=\"empty-message\">{}</div>\n",
            EMPTY_MESSAGE
        ));
    } else {
        html.push_str("  <ul id=\"todoList\">\n");
        for item in items {
            let (class, checked) = if item.is_completed() {
                ("todo-item completed", " checked")
            } else {
                ("todo-item", "")
            };
            html.push_str(&format!(
                r#"    <li class="{class}" data-id="{id}">
      <input type="checkbox" class="todo-checkbox"{checked}>
      <div class="todo-text">{text}</div>
      <button class="delete-btn">Delete</button>
    </li>
"#,
                id = item.id(),
                text = escape_html(item.text()),
            ));
        }
        html.push_str("  </ul>\n");
    }
    html.push_str("</div>\n");
    html
}

/// Escapes text for use as HTML element content or a quoted attribute.
///
/// Quotes are escaped on purpose even though element text only needs `&`,
/// `<` and `>`; the same output is then safe inside attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
