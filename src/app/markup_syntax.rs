use egui_code_editor::Syntax;
use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Element names, highlighted as keywords.
const HTML_ELEMENTS: &[&str] = &[
    "a", "article", "aside", "body", "button", "canvas", "div", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "head", "header", "html", "iframe", "img", "input", "label", "li",
    "link", "main", "meta", "nav", "ol", "option", "p", "script", "section", "select", "span",
    "style", "svg", "table", "tbody", "td", "textarea", "th", "thead", "title", "tr", "ul",
    "video", "DOCTYPE",
];

/// Common attributes, highlighted as types.
const HTML_ATTRIBUTES: &[&str] = &[
    "alt", "charset", "class", "content", "crossorigin", "defer", "for", "height", "href", "id",
    "lang", "name", "placeholder", "rel", "role", "src", "type", "value", "width",
];

/// CSS and script vocabulary that shows up inline, highlighted as special.
const INLINE_VOCABULARY: &[&str] = &[
    "addEventListener", "const", "document", "function", "let", "return", "var", "window",
    "display", "flex", "grid", "margin", "padding", "color", "background", "border", "font",
];

static HTML_SYNTAX: Lazy<Syntax> = Lazy::new(|| {
    let keywords: BTreeSet<&'static str> = HTML_ELEMENTS.iter().copied().collect();
    let types: BTreeSet<&'static str> = HTML_ATTRIBUTES.iter().copied().collect();
    let special: BTreeSet<&'static str> = INLINE_VOCABULARY.iter().copied().collect();
    tracing::debug!(keywords = keywords.len(), types = types.len(), special = special.len());

    Syntax::new("HTML")
        .with_comment_multiline(["<!--", "-->"])
        .with_keywords(keywords)
        .with_types(types)
        .with_special(special)
});

/// Syntax highlighter for generated HTML pages, built once.
pub fn html_syntax() -> Syntax {
    HTML_SYNTAX.clone()
}
