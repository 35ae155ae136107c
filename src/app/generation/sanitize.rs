//! Cleanup of raw generation replies before they reach the source buffer.

/// Markdown code-fence delimiter wrapped around generated code.
pub const FENCE_MARKER: &str = "```";

/// Language tag left behind once the opening fence is removed.
pub const LANGUAGE_TAG: &str = "html";

/// Strip code fences and the language tag from a raw reply.
///
/// Every fence marker is removed, then only the first `html` substring anywhere
/// in the remaining text. This is a plain substring edit, not a markdown parse:
/// when the reply has no language tag, the first `html` inside the markup itself
/// is the one that goes.
pub fn sanitize_response(raw: &str) -> String {
    raw.replace(FENCE_MARKER, "").replacen(LANGUAGE_TAG, "", 1)
}
