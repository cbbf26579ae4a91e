use std::path::{Path, PathBuf};

use crate::data::IndexError;

/// Describes the input medium tokenizer
pub trait Tokenable<'a> {
    type Type;
    fn tokenize(input: Self::Type) -> Box<dyn Iterator<Item = &'a [u8]> + 'a>;
}

/// Splits raw document bytes on ASCII whitespace.
///
/// Tokens are borrowed from the input and produced lazily. No normalization happens
/// here: `"Search,"` comes out as-is.
pub struct WhitespaceTokenizer {}

impl<'a> Tokenable<'a> for WhitespaceTokenizer {
    type Type = &'a [u8];

    fn tokenize(input: Self::Type) -> Box<dyn Iterator<Item = &'a [u8]> + 'a> {
        Box::new(
            input
                .split(|b: &u8| b.is_ascii_whitespace())
                .filter(|token| !token.is_empty()),
        )
    }
}

/// Somewhere a document's raw bytes come from.
pub trait DocumentSource {
    /// Name recorded in the document registry.
    fn name(&self) -> &str;
    fn read(&self) -> Result<Vec<u8>, IndexError>;
}

/// A document stored in a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> FileSource {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        FileSource { path, name }
    }
}

impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<u8>, IndexError> {
        std::fs::read(&self.path).map_err(|source| IndexError::Unreadable {
            name: self.name.clone(),
            source,
        })
    }
}

/// A document held in memory.
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    body: String,
}

impl TextSource {
    pub fn new<N: Into<String>, B: Into<String>>(name: N, body: B) -> TextSource {
        TextSource {
            name: name.into(),
            body: body.into(),
        }
    }
}

impl DocumentSource for TextSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<u8>, IndexError> {
        Ok(self.body.as_bytes().to_vec())
    }
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&self) -> Result<Vec<u8>, IndexError> {
        (**self).read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<&str> {
        WhitespaceTokenizer::tokenize(input.as_bytes())
            .map(|t| std::str::from_utf8(t).unwrap())
            .collect()
    }

    #[test]
    fn test_tokenize_splits_on_any_whitespace() {
        assert_eq!(
            tokens("  search\tengine\n\nindex,  "),
            vec!["search", "engine", "index,"]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens(" \n\t ").is_empty());
    }

    #[test]
    fn test_text_source_reads_body() {
        let source = TextSource::new("doc0", "hello world");
        assert_eq!(source.name(), "doc0");
        assert_eq!(source.read().unwrap(), b"hello world".to_vec());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let source = FileSource::new("/definitely/not/here.txt");
        match source.read() {
            Err(IndexError::Unreadable { name, .. }) => {
                assert_eq!(name, "/definitely/not/here.txt")
            }
            other => panic!("expected unreadable, got {:?}", other.map(|b| b.len())),
        }
    }
}
