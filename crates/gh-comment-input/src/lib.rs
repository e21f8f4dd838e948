//! XML comment file parser
//!
//! Reads the comments a CI job wants to post on a pull request:
//!
//! ```xml
//! <comments>
//!   <comment>LGTM</comment>
//!   <codelinecomment filePath="src/a.py" lineNumber="2">Prefer sys.exit</codelinecomment>
//! </comments>
//! ```
//!
//! `<comment>` becomes [`Comment::Simple`], `<codelinecomment>` becomes
//! [`Comment::CodeLine`]. Records keep document order.

pub mod parser;
pub mod types;

pub use parser::{parse_comments, read_comments_file, InputError};
pub use types::Comment;
