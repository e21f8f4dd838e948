/// A comment requested by the input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    /// Shows up in the conversation tab of the pull request
    Simple { text: String },

    /// Attached to a line of a changed file.
    ///
    /// `line_number` is 1-based and refers to the file after the change.
    CodeLine {
        file_path: String,
        line_number: u32,
        text: String,
    },
}

impl Comment {
    pub fn simple(text: impl Into<String>) -> Self {
        Self::Simple { text: text.into() }
    }

    pub fn code_line(file_path: impl Into<String>, line_number: u32, text: impl Into<String>) -> Self {
        Self::CodeLine {
            file_path: file_path.into(),
            line_number,
            text: text.into(),
        }
    }

    /// The comment body as written in the input file
    pub fn text(&self) -> &str {
        match self {
            Self::Simple { text } | Self::CodeLine { text, .. } => text,
        }
    }

    pub fn is_code_line(&self) -> bool {
        matches!(self, Self::CodeLine { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_accessor() {
        assert_eq!(Comment::simple("LGTM").text(), "LGTM");
        assert_eq!(Comment::code_line("a.rs", 3, "nit").text(), "nit");
    }

    #[test]
    fn test_is_code_line() {
        assert!(!Comment::simple("LGTM").is_code_line());
        assert!(Comment::code_line("a.rs", 3, "nit").is_code_line());
    }
}
