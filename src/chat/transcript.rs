use crate::chat::Composer;
use crate::models::{ChatEntry, GenerationResult};

/// Append-only log of committed compositions, oldest first. Entries are
/// never removed or reordered.
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commits the composer's pending state into a new entry. Returns the
    /// entry's index so the caller can forward the committed text to the
    /// generation endpoint and later pair the outcome with this entry.
    /// `None` when the composer had nothing to commit.
    pub fn commit_from(&mut self, composer: &mut Composer) -> Option<usize> {
        let entry = composer.commit()?;
        self.entries.push(entry);
        Some(self.entries.len() - 1)
    }

    /// Attaches the generation outcome to an entry, once. Returns false
    /// when the index is out of range or the entry already holds a result,
    /// so a stale outcome can never overwrite a newer one.
    pub fn attach_result(&mut self, index: usize, result: GenerationResult) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                let attached = entry.set_result(result);
                if !attached {
                    log::warn!("Ignoring second result for transcript entry {}", index);
                }
                attached
            }
            None => {
                log::warn!("No transcript entry at index {}", index);
                false
            }
        }
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
