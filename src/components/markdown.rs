use leptos::prelude::*;
use pulldown_cmark::{Options, Parser, html};

/// Renders markdown to an HTML string, with links forced to open in a new
/// tab the way the chat transcript expects.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out.replace(
        "<a href=",
        "<a target=\"_blank\" rel=\"noopener noreferrer\" href=",
    )
}

/// Markdown body of a chat message.
#[component]
pub fn Markdown(text: String) -> impl IntoView {
    let rendered = render_markdown(&text);
    view! { <div class="message-text" inner_html=rendered></div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown("**bold** and `code`");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn links_open_in_new_tab() {
        let html = render_markdown("[site](https://example.com)");
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn newlines_in_normalized_answers_split_paragraphs() {
        let html = render_markdown("line1\n\nline2");
        assert!(html.contains("<p>line1</p>"));
        assert!(html.contains("<p>line2</p>"));
    }
}
