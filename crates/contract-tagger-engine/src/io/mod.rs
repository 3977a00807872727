use std::collections::VecDeque;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use quick_xml::{Reader, events::Event};
use regex::Regex;
use relative_path::RelativePath;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid source directory: {0}")]
    InvalidSourceDir(PathBuf),
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(PathBuf),
    #[error("Invalid include pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Unreadable docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Malformed docx body: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// How a source file is turned into plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Html,
    Docx,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "html" | "htm" => Some(Self::Html),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// Read a source document and return its plain text.
pub fn read_source(path: &Path) -> Result<String, IoError> {
    let kind =
        SourceKind::from_path(path).ok_or_else(|| IoError::UnsupportedExtension(path.into()))?;
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    match kind {
        SourceKind::Text => Ok(fs::read_to_string(path)?),
        SourceKind::Html => Ok(html_to_text(&fs::read_to_string(path)?)),
        SourceKind::Docx => docx_to_text(path),
    }
}

struct HtmlPatterns {
    hidden: Regex,
    comment: Regex,
    breaks: Regex,
    tag: Regex,
}

fn html_patterns() -> &'static HtmlPatterns {
    static PATTERNS: OnceLock<HtmlPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| HtmlPatterns {
        hidden: Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
            .expect("Invalid script/style regex"),
        comment: Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"),
        breaks: Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|tr|h[1-6])\s*>")
            .expect("Invalid line break regex"),
        tag: Regex::new(r"</?[A-Za-z!][^>]*>").expect("Invalid tag regex"),
    })
}

/// Reduces an HTML page to its visible text, one block element per line.
pub fn html_to_text(html: &str) -> String {
    let p = html_patterns();
    let text = p.hidden.replace_all(html, "");
    let text = p.comment.replace_all(&text, "");
    let text = p.breaks.replace_all(&text, "\n");
    let text = p.tag.replace_all(&text, "");
    html_escape::decode_html_entities(&text).into_owned()
}

const DOCX_BODY: &str = "word/document.xml";

/// Extracts the text runs of a Word document, one paragraph per line.
pub fn docx_to_text(path: &Path) -> Result<String, IoError> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY)?.read_to_string(&mut xml)?;
    wordml_to_text(&xml)
}

fn wordml_to_text(xml: &str) -> Result<String, IoError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_text = in_run,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => text.push('\n'),
                // tab stops in paragraph properties are not content
                b"tab" if in_run => text.push('\t'),
                b"br" | b"cr" if in_run => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                text.push_str(&t.unescape().map_err(quick_xml::Error::from)?)
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}

/// Write content below `output_root`, creating parent directories.
pub fn write_output(
    relative_path: &RelativePath,
    output_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(output_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Breadth-first scan for files whose name matches any of `patterns`.
///
/// Entries are visited in name order within each directory. Scanning stops
/// once `limit` files are found.
pub fn scan_sources(
    root: &Path,
    patterns: &[String],
    limit: Option<usize>,
) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidSourceDir(root.to_path_buf()));
    }
    let patterns = patterns
        .iter()
        .map(|p| glob::Pattern::new(p))
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    let mut queue = VecDeque::from([root.to_path_buf()]);

    while let Some(dir) = queue.pop_front() {
        let mut entries = fs::read_dir(&dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();

        for path in entries {
            if path.is_dir() {
                queue.push_back(path);
                continue;
            }
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| patterns.iter().any(|p| p.matches(name)));
            if !matches {
                continue;
            }
            files.push(path);
            if limit.is_some_and(|limit| files.len() >= limit) {
                return Ok(files);
            }
        }
    }

    Ok(files)
}
