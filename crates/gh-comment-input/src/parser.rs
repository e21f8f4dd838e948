use crate::types::Comment;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ROOT_ELEMENT: &str = "comments";
const SIMPLE_ELEMENT: &str = "comment";
const CODE_LINE_ELEMENT: &str = "codelinecomment";
const FILE_PATH_ATTRIBUTE: &str = "filePath";
const LINE_NUMBER_ATTRIBUTE: &str = "lineNumber";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("The passed file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("An error while reading {} has occurred", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute")]
    Attribute(#[from] AttrError),

    #[error("Comment text is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Missing <comments> root element")]
    MissingRoot,

    #[error("Expected <comments> as root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("Unknown element <{0}>, expected <comment> or <codelinecomment>")]
    UnknownElement(String),

    #[error("Element <{element}> is nested inside <{parent}>")]
    NestedElement { parent: String, element: String },

    #[error("<codelinecomment> is missing the {0} attribute")]
    MissingAttribute(&'static str),

    #[error("Invalid lineNumber '{0}', expected a line number starting at 1")]
    InvalidLineNumber(String),

    #[error("Unexpected end of document")]
    UnexpectedEof,
}

/// Read and parse a comments file
pub fn read_comments_file(path: &Path) -> Result<Vec<Comment>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            InputError::FileNotFound(path.to_path_buf())
        } else {
            InputError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let comments = parse_comments(&content)?;
    log::debug!("Read {} comments from {}", comments.len(), path.display());
    Ok(comments)
}

/// Parse a comments document
///
/// # Example
///
/// ```
/// use gh_comment_input::{parse_comments, Comment};
///
/// let xml = r#"<comments>
///   <comment>LGTM</comment>
///   <codelinecomment filePath="src/a.py" lineNumber="2">use sys.exit</codelinecomment>
/// </comments>"#;
///
/// let comments = parse_comments(xml).unwrap();
/// assert_eq!(comments[0], Comment::simple("LGTM"));
/// assert_eq!(comments[1], Comment::code_line("src/a.py", 2, "use sys.exit"));
/// ```
pub fn parse_comments(xml: &str) -> Result<Vec<Comment>, InputError> {
    let mut reader = Reader::from_str(xml);
    let mut comments = Vec::new();
    let mut root_open = false;
    let mut root_seen = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                let name = element_name(&element);
                if !root_seen {
                    expect_root(&name)?;
                    root_seen = true;
                    root_open = true;
                } else if root_open {
                    let text = read_text(&mut reader, &name)?;
                    comments.push(comment_from(&element, &name, text)?);
                } else {
                    return Err(InputError::UnexpectedRoot(name));
                }
            }
            Event::Empty(element) => {
                let name = element_name(&element);
                if !root_seen {
                    expect_root(&name)?;
                    root_seen = true;
                } else if root_open {
                    comments.push(comment_from(&element, &name, String::new())?);
                } else {
                    return Err(InputError::UnexpectedRoot(name));
                }
            }
            Event::End(_) => root_open = false,
            Event::Text(text) => {
                let text = text.unescape()?;
                if !text.trim().is_empty() {
                    log::warn!("Ignoring text outside of a comment: {}", text.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(InputError::MissingRoot);
    }
    if root_open {
        return Err(InputError::UnexpectedEof);
    }

    Ok(comments)
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn expect_root(name: &str) -> Result<(), InputError> {
    if name == ROOT_ELEMENT {
        Ok(())
    } else {
        Err(InputError::UnexpectedRoot(name.to_string()))
    }
}

/// Collect the text content of the element `parent` up to its end tag
fn read_text(reader: &mut Reader<&[u8]>, parent: &str) -> Result<String, InputError> {
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Text(content) => text.push_str(&content.unescape()?),
            Event::CData(content) => text.push_str(std::str::from_utf8(&content)?),
            Event::Start(element) | Event::Empty(element) => {
                return Err(InputError::NestedElement {
                    parent: parent.to_string(),
                    element: element_name(&element),
                });
            }
            Event::End(_) => break,
            Event::Eof => return Err(InputError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}

fn comment_from(element: &BytesStart<'_>, name: &str, text: String) -> Result<Comment, InputError> {
    match name {
        SIMPLE_ELEMENT => Ok(Comment::Simple { text }),
        CODE_LINE_ELEMENT => {
            let file_path = attribute(element, FILE_PATH_ATTRIBUTE)?
                .filter(|path| !path.is_empty())
                .ok_or(InputError::MissingAttribute(FILE_PATH_ATTRIBUTE))?;
            let raw_line = attribute(element, LINE_NUMBER_ATTRIBUTE)?
                .ok_or(InputError::MissingAttribute(LINE_NUMBER_ATTRIBUTE))?;
            let line_number = parse_line_number(&raw_line)?;

            Ok(Comment::CodeLine {
                file_path,
                line_number,
                text,
            })
        }
        other => Err(InputError::UnknownElement(other.to_string())),
    }
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>, InputError> {
    match element.try_get_attribute(key)? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.trim().to_string())),
        None => Ok(None),
    }
}

fn parse_line_number(raw: &str) -> Result<u32, InputError> {
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(InputError::InvalidLineNumber(raw.to_string())),
        Ok(line) => Ok(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_mixed_comments_in_document_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<comments>
    <codelinecomment filePath="src/a.py" lineNumber="2">Prefer sys.exit</codelinecomment>
    <comment>LGTM</comment>
    <codelinecomment filePath="src/b.py" lineNumber="20">
        Unused variable
    </codelinecomment>
</comments>"#;

        let comments = parse_comments(xml).unwrap();

        assert_eq!(
            comments,
            vec![
                Comment::code_line("src/a.py", 2, "Prefer sys.exit"),
                Comment::simple("LGTM"),
                Comment::code_line("src/b.py", 20, "Unused variable"),
            ]
        );
    }

    #[test]
    fn test_parse_unescapes_text_and_attributes() {
        let xml = r#"<comments>
            <codelinecomment filePath="src/a&amp;b.rs" lineNumber="1">a &lt; b</codelinecomment>
        </comments>"#;

        let comments = parse_comments(xml).unwrap();

        assert_eq!(comments, vec![Comment::code_line("src/a&b.rs", 1, "a < b")]);
    }

    #[test]
    fn test_parse_cdata() {
        let xml = "<comments><comment><![CDATA[**bold** <b>html</b>]]></comment></comments>";

        let comments = parse_comments(xml).unwrap();

        assert_eq!(comments, vec![Comment::simple("**bold** <b>html</b>")]);
    }

    #[test]
    fn test_parse_empty_root() {
        assert_eq!(parse_comments("<comments/>").unwrap(), vec![]);
        assert_eq!(parse_comments("<comments>\n</comments>").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_self_closing_comment() {
        let comments = parse_comments("<comments><comment/></comments>").unwrap();
        assert_eq!(comments, vec![Comment::simple("")]);
    }

    #[test]
    fn test_missing_root() {
        assert!(matches!(parse_comments(""), Err(InputError::MissingRoot)));
    }

    #[test]
    fn test_unexpected_root() {
        let result = parse_comments("<reviews><comment>x</comment></reviews>");
        assert!(matches!(result, Err(InputError::UnexpectedRoot(name)) if name == "reviews"));
    }

    #[test]
    fn test_unknown_element() {
        let result = parse_comments("<comments><note>x</note></comments>");
        assert!(matches!(result, Err(InputError::UnknownElement(name)) if name == "note"));
    }

    #[test]
    fn test_nested_element() {
        let result = parse_comments("<comments><comment>a <b>bold</b></comment></comments>");
        assert!(matches!(result, Err(InputError::NestedElement { .. })));
    }

    #[test]
    fn test_missing_file_path() {
        let result = parse_comments(r#"<comments><codelinecomment lineNumber="3">x</codelinecomment></comments>"#);
        assert!(matches!(result, Err(InputError::MissingAttribute("filePath"))));

        let result = parse_comments(
            r#"<comments><codelinecomment filePath="" lineNumber="3">x</codelinecomment></comments>"#,
        );
        assert!(matches!(result, Err(InputError::MissingAttribute("filePath"))));
    }

    #[test]
    fn test_missing_line_number() {
        let result = parse_comments(r#"<comments><codelinecomment filePath="a.rs">x</codelinecomment></comments>"#);
        assert!(matches!(result, Err(InputError::MissingAttribute("lineNumber"))));
    }

    #[test]
    fn test_invalid_line_numbers() {
        for raw in ["zero", "0", "-4", "1.5", ""] {
            let xml = format!(
                r#"<comments><codelinecomment filePath="a.rs" lineNumber="{raw}">x</codelinecomment></comments>"#
            );
            let result = parse_comments(&xml);
            assert!(
                matches!(result, Err(InputError::InvalidLineNumber(ref value)) if value == raw),
                "lineNumber {raw:?} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_malformed_attributes() {
        let unquoted = r#"<comments><codelinecomment filePath=a.py lineNumber="1">x</codelinecomment></comments>"#;
        let err = parse_comments(unquoted).unwrap_err();
        assert!(matches!(err, InputError::Attribute(_)), "{:?}", err);

        let duplicated = r#"<comments><codelinecomment filePath="a.py" filePath="b.py" lineNumber="1">x</codelinecomment></comments>"#;
        let err = parse_comments(duplicated).unwrap_err();
        assert!(matches!(err, InputError::Attribute(_)), "{:?}", err);
    }

    #[test]
    fn test_mismatched_end_tag_is_malformed() {
        let result = parse_comments("<comments><comment>x</codelinecomment></comments>");
        assert!(matches!(result, Err(InputError::Xml(_))));
    }

    #[test]
    fn test_unclosed_document() {
        assert!(parse_comments("<comments><comment>x</comment>").is_err());
        assert!(parse_comments("<comments><comment>x").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.xml");

        let error = read_comments_file(&path).unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("The passed file {} does not exist", path.display())
        );
    }

    #[test]
    fn test_read_comments_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.xml");
        std::fs::write(&path, "<comments><comment>LGTM</comment></comments>").unwrap();

        let comments = read_comments_file(&path).unwrap();

        assert_eq!(comments, vec![Comment::simple("LGTM")]);
    }
}
