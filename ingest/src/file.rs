use crate::docx::docx_text;
use crate::error::{IngestError, Result};
use crate::html::extract_html;
use phrase_core::{Document, Source};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File formats the extractor understands, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    PlainText,
    Html,
}

impl FileKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            "txt" | "text" | "md" | "markdown" => Some(FileKind::PlainText),
            "html" | "htm" => Some(FileKind::Html),
            _ => None,
        }
    }
}

/// Read a file from disk into a document. The title defaults to the file name.
pub fn extract_file(path: &Path, custom_title: Option<&str>) -> Result<Document> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| IngestError::UnsupportedFormat(path.display().to_string()))?;
    let bytes = fs::read(path)?;
    extract_bytes(name, &bytes, custom_title)
}

/// Turn uploaded bytes into a document, dispatching on the extension of `name`.
pub fn extract_bytes(name: &str, bytes: &[u8], custom_title: Option<&str>) -> Result<Document> {
    let kind = FileKind::from_name(name).ok_or_else(|| IngestError::UnsupportedFormat(name.to_string()))?;
    let raw_text = match kind {
        FileKind::Pdf => pdf_text(bytes)?,
        FileKind::Docx => docx_text(bytes)?,
        FileKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        FileKind::Html => extract_html(&String::from_utf8_lossy(bytes))?.text,
    };
    let title = custom_title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(name);
    let doc = Document::from_text(title, raw_text, Source::File);
    if doc.is_empty() {
        return Err(IngestError::NoText(name.to_string()));
    }
    tracing::debug!(name, title = doc.title(), sentences = doc.len(), "extracted file");
    Ok(doc)
}

fn pdf_text(bytes: &[u8]) -> Result<String> {
    let pdf = lopdf::Document::load_mem(bytes).map_err(|e| IngestError::PdfParse(e.to_string()))?;
    let mut pages = Vec::new();
    for page_no in pdf.get_pages().keys() {
        let text = pdf.extract_text(&[*page_no]).map_err(|e| IngestError::PdfParse(e.to_string()))?;
        if !text.trim().is_empty() {
            pages.push(text);
        }
    }
    Ok(pages.join(" "))
}

/// Every supported file under `dir`, recursively, in sorted order.
pub fn discover_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.file_name().and_then(|n| n.to_str()).and_then(FileKind::from_name).is_some())
        .collect();
    files.sort_unstable();
    files
}

/// Split a comma-separated title list; blanks mean "use the file name".
pub fn parse_titles(list: &str) -> Vec<Option<String>> {
    list.split(',')
        .map(|t| t.trim())
        .map(|t| (!t.is_empty()).then(|| t.to_string()))
        .collect()
}
