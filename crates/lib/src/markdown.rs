//! MarkdownV2 escaping for plain text passed on the command line.

/// Characters escaped by [`escape_markdown_v2`].
pub const MARKDOWN_V2_SPECIAL: [char; 9] = ['_', '*', '[', ']', '(', ')', '~', '`', '>'];

/// Prefix each MarkdownV2 special character with a backslash.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_each_special_character() {
        assert_eq!(
            escape_markdown_v2("_*[]()~`>"),
            "\\_\\*\\[\\]\\(\\)\\~\\`\\>"
        );
    }

    #[test]
    fn leaves_other_text_alone() {
        assert_eq!(escape_markdown_v2("Build #42 ok! héllo"), "Build #42 ok! héllo");
        assert_eq!(escape_markdown_v2(""), "");
    }

    #[test]
    fn escapes_inside_words() {
        assert_eq!(escape_markdown_v2("snake_case (v2)"), "snake\\_case \\(v2\\)");
    }
}
