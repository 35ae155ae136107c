//! Technology-stack labels offered by the stack selector.

use serde::{Deserialize, Serialize};

/// The technology stack the user wants the generated site built with.
///
/// The label is appended verbatim to the prompt, so `Unselected` renders as an
/// empty string rather than being special-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StackChoice {
    #[default]
    Unselected,
    HtmlCss,
    HtmlTailwind,
    HtmlCssJs,
    HtmlTailwindJs,
}

impl StackChoice {
    /// Options shown in the selector, in display order.
    pub const OPTIONS: [StackChoice; 4] = [
        StackChoice::HtmlCss,
        StackChoice::HtmlTailwind,
        StackChoice::HtmlCssJs,
        StackChoice::HtmlTailwindJs,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StackChoice::Unselected => "",
            StackChoice::HtmlCss => "HTML + CSS",
            StackChoice::HtmlTailwind => "HTML + TailwindCSS",
            StackChoice::HtmlCssJs => "HTML + CSS + JS",
            StackChoice::HtmlTailwindJs => "HTML + TailwindCSS + JS",
        }
    }

    /// Look up an offered option by its label. Unknown labels map to `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.is_empty() {
            return Some(StackChoice::Unselected);
        }
        Self::OPTIONS
            .iter()
            .copied()
            .find(|choice| choice.label() == label)
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, StackChoice::Unselected)
    }
}

impl std::fmt::Display for StackChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
