use super::dataset::ContentSet;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// The three kinds of content a session can be built from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum ContentKind {
    Words,
    Quotes,
    Paragraphs,
}

/// Draws items from the fixed pools without repeating any item until its
/// pool is exhausted. Owns its own used-sets; construct one per app instance
/// and pass it by reference.
#[derive(Debug)]
pub struct Sampler {
    set: ContentSet,
    used_words: HashSet<String>,
    used_quotes: HashSet<String>,
    used_paragraphs: HashSet<String>,
}

impl Sampler {
    pub fn new(set: ContentSet) -> Self {
        Self {
            set,
            used_words: HashSet::new(),
            used_quotes: HashSet::new(),
            used_paragraphs: HashSet::new(),
        }
    }

    fn pool(&self, kind: ContentKind) -> &[String] {
        match kind {
            ContentKind::Words => &self.set.words,
            ContentKind::Quotes => &self.set.quotes,
            ContentKind::Paragraphs => &self.set.paragraphs,
        }
    }

    fn used_mut(&mut self, kind: ContentKind) -> &mut HashSet<String> {
        match kind {
            ContentKind::Words => &mut self.used_words,
            ContentKind::Quotes => &mut self.used_quotes,
            ContentKind::Paragraphs => &mut self.used_paragraphs,
        }
    }

    /// Number of items of `kind` marked used in the current epoch.
    pub fn used_len(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Words => self.used_words.len(),
            ContentKind::Quotes => self.used_quotes.len(),
            ContentKind::Paragraphs => self.used_paragraphs.len(),
        }
    }

    /// Draw `count` items of `kind`, shuffle-and-take. Items are distinct
    /// within the call and never repeat across calls until fewer than
    /// `count` unused items remain; at that point the used-set for the kind
    /// is cleared and the draw restarts against the full pool.
    pub fn sample(&mut self, kind: ContentKind, count: usize) -> Vec<String> {
        let pool = self.pool(kind);
        let used = match kind {
            ContentKind::Words => &self.used_words,
            ContentKind::Quotes => &self.used_quotes,
            ContentKind::Paragraphs => &self.used_paragraphs,
        };

        let mut available: Vec<String> = pool
            .iter()
            .filter(|item| !used.contains(*item))
            .cloned()
            .collect();

        if available.len() < count {
            self.used_mut(kind).clear();
            available = self.pool(kind).to_vec();
        }

        let mut rng = rand::thread_rng();
        available.shuffle(&mut rng);
        available.truncate(count);

        let used = self.used_mut(kind);
        for item in &available {
            used.insert(item.clone());
        }

        available
    }

    /// Single-item draw with the same epoch semantics. `None` only when the
    /// pool itself is empty.
    pub fn sample_one(&mut self, kind: ContentKind) -> Option<String> {
        self.sample(kind, 1).pop()
    }

    /// Forget what has been handed out for one kind. The pool is untouched.
    pub fn reset(&mut self, kind: ContentKind) {
        self.used_mut(kind).clear();
    }

    /// Forget what has been handed out for every kind.
    pub fn reset_all(&mut self) {
        self.used_words.clear();
        self.used_quotes.clear();
        self.used_paragraphs.clear();
    }
}
