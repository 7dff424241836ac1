use crate::{CorpusRecord, Document};

/// Documents ingested during one session, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

/// Flattened view of a store: normalized sentences and their metadata,
/// aligned by position.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub sentences: Vec<String>,
    pub records: Vec<CorpusRecord>,
}

impl Corpus {
    pub fn len(&self) -> usize { self.sentences.len() }
    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, doc: Document) { self.documents.push(doc); }

    pub fn extend<I: IntoIterator<Item = Document>>(&mut self, docs: I) { self.documents.extend(docs); }

    pub fn remove(&mut self, index: usize) -> Option<Document> {
        (index < self.documents.len()).then(|| self.documents.remove(index))
    }

    pub fn clear(&mut self) { self.documents.clear(); }

    pub fn len(&self) -> usize { self.documents.len() }
    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
    pub fn get(&self, index: usize) -> Option<&Document> { self.documents.get(index) }
    pub fn iter(&self) -> impl Iterator<Item = &Document> { self.documents.iter() }

    pub fn sentence_count(&self) -> usize { self.documents.iter().map(Document::len).sum() }

    /// Snapshot every sentence of every document, documents in insertion order.
    pub fn corpus(&self) -> Corpus {
        let mut corpus = Corpus::default();
        for doc in &self.documents {
            for (sentence, original) in doc.sentences().iter().zip(doc.original_sentences()) {
                corpus.sentences.push(sentence.clone());
                corpus.records.push(CorpusRecord {
                    title: doc.title().to_string(),
                    original_sentence: original.clone(),
                    source: doc.source().clone(),
                });
            }
        }
        corpus
    }
}

impl FromIterator<Document> for DocumentStore {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self { documents: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Source;

    #[test]
    fn corpus_follows_document_order() {
        let mut store = DocumentStore::new();
        store.push(Document::from_sentences("a", vec!["First one.", "Second one."], Source::File));
        store.push(Document::from_sentences("b", vec!["Third one."], Source::Web { url: "https://b.example".into() }));
        let corpus = store.corpus();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.records[2].title, "b");
        assert_eq!(corpus.records[2].source.url(), Some("https://b.example"));
        assert_eq!(corpus.records[1].original_sentence, "Second one.");
        assert_eq!(corpus.sentences[0], "first one");
    }

    #[test]
    fn removed_documents_leave_the_corpus() {
        let mut store: DocumentStore = vec![
            Document::from_sentences("a", vec!["Alpha."], Source::File),
            Document::from_sentences("b", vec!["Beta."], Source::File),
        ]
        .into_iter()
        .collect();
        assert!(store.remove(0).is_some());
        assert!(store.remove(5).is_none());
        let corpus = store.corpus();
        assert_eq!(corpus.records.len(), 1);
        assert_eq!(corpus.records[0].title, "b");
    }
}
