use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::sync::mpsc;

use crate::models::{ChatEntry, UploadedImage};

/// Completed outcome of one asynchronous attachment read.
enum ReadEvent {
    Loaded(UploadedImage),
    Failed { name: String, error: String },
}

/// In-progress composition: pending text with a caret, plus pending image
/// attachments. Single-owner; completed file reads arrive as messages and
/// are applied serially by the owner, so interleaved reads can neither lose
/// nor duplicate an append.
pub struct Composer {
    text: String,
    cursor: usize,
    images: Vec<UploadedImage>,
    reads_tx: mpsc::UnboundedSender<ReadEvent>,
    reads_rx: mpsc::UnboundedReceiver<ReadEvent>,
    outstanding: usize,
}

impl Composer {
    pub fn new() -> Self {
        let (reads_tx, reads_rx) = mpsc::unbounded_channel();
        Self {
            text: String::new(),
            cursor: 0,
            images: Vec::new(),
            reads_tx,
            reads_rx,
            outstanding: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    /// True when a commit would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.images.is_empty()
    }

    /// Replaces the pending text and moves the caret to its end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Moves the caret, clamped to the text length and snapped down to a
    /// char boundary.
    pub fn set_cursor(&mut self, position: usize) {
        let mut position = position.min(self.text.len());
        while !self.text.is_char_boundary(position) {
            position -= 1;
        }
        self.cursor = position;
    }

    /// Splices `value` at the caret; the caret lands immediately after the
    /// inserted text.
    pub fn insert_at_cursor(&mut self, value: &str) {
        self.text.insert_str(self.cursor, value);
        self.cursor += value.len();
    }

    /// Enter submits, Shift+Enter inserts a newline at the caret. Returns
    /// true when the keystroke requests a commit.
    pub fn handle_enter(&mut self, shift: bool) -> bool {
        if shift {
            self.insert_at_cursor("\n");
            false
        } else {
            true
        }
    }

    /// Starts an asynchronous read for each selected file. Non-image files
    /// and `(name, size)` duplicates are skipped silently. Returns the
    /// number of reads started; results arrive via [`Self::absorb_reads`].
    pub async fn add_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut started = 0;

        for path in paths {
            let path = path.as_ref();

            let mime = match image_mime_type(path) {
                Some(mime) => mime,
                None => {
                    log::debug!("Skipping non-image file: {}", path.display());
                    continue;
                }
            };

            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => {
                    log::debug!("Skipping path without a file name: {}", path.display());
                    continue;
                }
            };

            let size = match tokio::fs::metadata(path).await {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    log::warn!("Could not stat attachment {}: {}", path.display(), e);
                    continue;
                }
            };

            if self.has_image(&name, size) {
                log::debug!("Skipping duplicate attachment: {} ({} bytes)", name, size);
                continue;
            }

            self.spawn_read(path.to_path_buf(), name, size, mime);
            started += 1;
        }

        started
    }

    fn spawn_read(&mut self, path: PathBuf, name: String, size: u64, mime: &'static str) {
        let tx = self.reads_tx.clone();
        self.outstanding += 1;

        tokio::spawn(async move {
            let event = match tokio::fs::read(&path).await {
                Ok(bytes) => ReadEvent::Loaded(UploadedImage {
                    name,
                    size,
                    data_url: to_data_url(mime, &bytes),
                }),
                Err(e) => ReadEvent::Failed {
                    name,
                    error: e.to_string(),
                },
            };
            // The composer may already be gone; the read result is then moot.
            let _ = tx.send(event);
        });
    }

    /// Drains completed reads, appending each image in arrival order. The
    /// `(name, size)` check runs again here because reads interleave.
    /// Returns the number of images appended.
    pub fn absorb_reads(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(event) = self.reads_rx.try_recv() {
            if self.apply_read(event) {
                appended += 1;
            }
        }
        appended
    }

    /// Awaits every outstanding read, then applies them. Deterministic
    /// synchronization point; composition stays usable while reads run.
    pub async fn settle(&mut self) -> usize {
        let mut appended = self.absorb_reads();
        while self.outstanding > 0 {
            match self.reads_rx.recv().await {
                Some(event) => {
                    if self.apply_read(event) {
                        appended += 1;
                    }
                }
                None => break,
            }
        }
        appended
    }

    fn apply_read(&mut self, event: ReadEvent) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);
        match event {
            ReadEvent::Loaded(image) => {
                if self.has_image(&image.name, image.size) {
                    log::debug!(
                        "Dropping duplicate attachment on arrival: {} ({} bytes)",
                        image.name,
                        image.size
                    );
                    false
                } else {
                    self.images.push(image);
                    true
                }
            }
            ReadEvent::Failed { name, error } => {
                log::warn!("Failed to read attachment {}: {}", name, error);
                false
            }
        }
    }

    pub fn has_image(&self, name: &str, size: u64) -> bool {
        self.images.iter().any(|img| img.matches(name, size))
    }

    /// Removes the matching pending attachment; no-op when absent.
    pub fn remove_image(&mut self, name: &str, size: u64) -> bool {
        let before = self.images.len();
        self.images.retain(|img| !img.matches(name, size));
        self.images.len() != before
    }

    /// Freezes the pending slots into a transcript entry and resets the
    /// composer. Returns `None` without touching state when there is
    /// nothing to commit.
    pub fn commit(&mut self) -> Option<ChatEntry> {
        if self.is_empty() {
            return None;
        }
        let entry = ChatEntry::new(
            std::mem::take(&mut self.text),
            std::mem::take(&mut self.images),
        );
        self.cursor = 0;
        entry
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn caret_insertion_repositions_after_inserted_text() {
        let mut composer = Composer::new();
        composer.set_text("a fox");
        composer.set_cursor(1);
        composer.insert_at_cursor(" red");

        assert_eq!(composer.text(), "a red fox");
        assert_eq!(composer.cursor(), 5);

        composer.insert_at_cursor(",");
        assert_eq!(composer.text(), "a red, fox");
    }

    #[test]
    fn cursor_snaps_to_char_boundary() {
        let mut composer = Composer::new();
        composer.set_text("🦊x");
        composer.set_cursor(2); // inside the fox emoji
        assert_eq!(composer.cursor(), 0);

        composer.set_cursor(100);
        assert_eq!(composer.cursor(), composer.text().len());
    }

    #[test]
    fn enter_submits_and_shift_enter_inserts_newline() {
        let mut composer = Composer::new();
        composer.set_text("a fox");

        assert!(!composer.handle_enter(true));
        assert_eq!(composer.text(), "a fox\n");
        assert!(composer.handle_enter(false));
    }

    #[tokio::test]
    async fn reads_encode_files_as_data_urls_in_arrival_order() {
        let dir = TempDir::new().unwrap();
        let png = write_file(&dir, "shape.png", b"ABC");
        let jpg = write_file(&dir, "photo.jpg", b"DEF");

        let mut composer = Composer::new();
        let started = composer.add_files([&png, &jpg]).await;
        assert_eq!(started, 2);

        let appended = composer.settle().await;
        assert_eq!(appended, 2);
        assert_eq!(composer.images().len(), 2);

        let by_name = |name: &str| {
            composer
                .images()
                .iter()
                .find(|img| img.name == name)
                .unwrap()
                .clone()
        };
        assert_eq!(by_name("shape.png").data_url, "data:image/png;base64,QUJD");
        assert_eq!(by_name("photo.jpg").data_url, "data:image/jpeg;base64,REVG");
        assert_eq!(by_name("shape.png").size, 3);
    }

    #[tokio::test]
    async fn duplicate_name_and_size_yields_one_entry() {
        let dir = TempDir::new().unwrap();
        let png = write_file(&dir, "shape.png", b"ABC");

        let mut composer = Composer::new();
        composer.add_files([&png]).await;
        composer.settle().await;
        assert_eq!(composer.images().len(), 1);

        // Second selection of the same file is skipped up front.
        assert_eq!(composer.add_files([&png]).await, 0);
        composer.settle().await;
        assert_eq!(composer.images().len(), 1);
    }

    #[tokio::test]
    async fn interleaved_duplicate_reads_deduplicate_on_arrival() {
        let dir = TempDir::new().unwrap();
        let png = write_file(&dir, "shape.png", b"ABC");

        let mut composer = Composer::new();
        // Select the same file twice before either read lands: the
        // selection-time check cannot see it, so the append-time check must.
        composer.add_files([&png, &png]).await;
        composer.settle().await;

        assert_eq!(composer.images().len(), 1);
    }

    #[tokio::test]
    async fn non_image_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let txt = write_file(&dir, "notes.txt", b"hello");
        let noext = write_file(&dir, "noext", b"hello");

        let mut composer = Composer::new();
        assert_eq!(composer.add_files([&txt, &noext]).await, 0);
        composer.settle().await;
        assert!(composer.images().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_dropped_silently() {
        let dir = TempDir::new().unwrap();
        let ghost = dir.path().join("ghost.png");

        let mut composer = Composer::new();
        assert_eq!(composer.add_files([&ghost]).await, 0);
        composer.settle().await;
        assert!(composer.images().is_empty());
    }

    #[tokio::test]
    async fn remove_image_matches_name_and_size() {
        let dir = TempDir::new().unwrap();
        let png = write_file(&dir, "shape.png", b"ABC");

        let mut composer = Composer::new();
        composer.add_files([&png]).await;
        composer.settle().await;

        assert!(!composer.remove_image("shape.png", 999));
        assert_eq!(composer.images().len(), 1);

        assert!(composer.remove_image("shape.png", 3));
        assert!(composer.images().is_empty());
        assert!(!composer.remove_image("shape.png", 3));
    }

    #[test]
    fn commit_on_empty_state_is_a_noop() {
        let mut composer = Composer::new();
        composer.set_text("   \n ");
        assert!(composer.commit().is_none());
        // Whitespace-only text survives the rejected commit untouched.
        assert_eq!(composer.text(), "   \n ");
    }

    #[tokio::test]
    async fn commit_freezes_entry_and_resets_pending_state() {
        let dir = TempDir::new().unwrap();
        let png = write_file(&dir, "shape.png", b"ABC");

        let mut composer = Composer::new();
        composer.set_text("a fox");
        composer.add_files([&png]).await;
        composer.settle().await;

        let entry = composer.commit().unwrap();
        assert_eq!(entry.text(), "a fox");
        assert_eq!(entry.images().len(), 1);

        assert_eq!(composer.text(), "");
        assert_eq!(composer.cursor(), 0);
        assert!(composer.images().is_empty());

        // The committed data URL is outside the composer's reach now.
        let frozen = entry.images()[0].data_url.clone();
        composer.set_text("another");
        composer.add_files([&png]).await;
        composer.settle().await;
        composer.remove_image("shape.png", 3);
        assert_eq!(entry.images()[0].data_url, frozen);
    }
}
