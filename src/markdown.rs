use pulldown_cmark::{html, Options, Parser};

/// Converts markdown to HTML, appending the result onto `w`. Tables,
/// footnotes, strikethrough and task lists are enabled on top of
/// CommonMark.
pub fn to_html(w: &mut String, markdown: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    html::push_html(w, Parser::new_ext(markdown, options));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html() {
        let mut out = String::new();
        to_html(&mut out, "# Hello\n\nSome *text* and ~~old~~.\n");
        assert!(out.contains("<h1>Hello</h1>"));
        assert!(out.contains("<em>text</em>"));
        assert!(out.contains("<del>old</del>"));
    }

    #[test]
    fn test_to_html_empty() {
        let mut out = String::new();
        to_html(&mut out, "");
        assert_eq!(out, "");
    }

    #[test]
    fn test_to_html_table() {
        let mut out = String::new();
        to_html(&mut out, "| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(out.contains("<table>"));
        assert!(out.contains("<td>1</td>"));
    }
}
