//! The hand-off between collection and export

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbImage;

use crate::collect::{Collection, DecodedImage};
use crate::error::{Error, Result};
use crate::pdf::{write_images_pdf, ImagePdfOptions};
use crate::selection::Selection;

/// Outcome of a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub path: PathBuf,
    pub page_count: usize,
}

/// Collected images plus where they will be written
///
/// The image sequence never changes after collection; the selection window
/// and the exporter share it read-only.
#[derive(Debug, Clone)]
pub struct Session {
    title: String,
    images: Arc<[DecodedImage]>,
    output_path: PathBuf,
}

impl Session {
    pub fn new(collection: Collection, output_path: impl Into<PathBuf>) -> Self {
        Self {
            title: collection.title,
            images: collection.images.into(),
            output_path: output_path.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn images(&self) -> &[DecodedImage] {
        &self.images
    }

    /// Another handle on the shared image sequence
    pub fn shared_images(&self) -> Arc<[DecodedImage]> {
        Arc::clone(&self.images)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// A selection with every image checked
    pub fn select_all(&self) -> Selection {
        Selection::new(self.images.len())
    }

    /// Write the selected images, in collection order, to the output path
    ///
    /// Nothing is written when the selection is empty.
    pub fn save(&self, selection: &Selection) -> Result<SaveReport> {
        if selection.len() != self.images.len() {
            return Err(Error::General(format!(
                "Selection covers {} images, session has {}",
                selection.len(),
                self.images.len()
            )));
        }

        let chosen: Vec<&RgbImage> = selection
            .pick(&self.images[..])
            .into_iter()
            .map(DecodedImage::bitmap)
            .collect();
        if chosen.is_empty() {
            return Err(Error::EmptySelection);
        }

        let options = ImagePdfOptions {
            title: Some(self.title.clone()),
            ..ImagePdfOptions::new(&self.output_path)
        };
        let page_count = write_images_pdf(&chosen, &options)?;
        tracing::info!("PDF created: {}", self.output_path.display());

        Ok(SaveReport {
            path: self.output_path.clone(),
            page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use url::Url;

    fn collection(sizes: &[(u32, u32)]) -> Collection {
        let images = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| {
                let url = Url::parse(&format!("https://x.test/{}.png", i)).unwrap();
                DecodedImage::new(url, RgbImage::new(w, h))
            })
            .collect();
        Collection {
            title: "Test Page".to_string(),
            images,
            element_count: sizes.len(),
        }
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.pdf");
        let session = Session::new(collection(&[(10, 10), (20, 20)]), &output);

        let mut selection = session.select_all();
        selection.toggle_all();

        let err = session.save(&selection).unwrap_err();
        assert!(matches!(err, Error::EmptySelection));
        assert!(!output.exists());
    }

    #[test]
    fn test_mismatched_selection_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::new(collection(&[(10, 10)]), temp_dir.path().join("out.pdf"));
        assert!(session.save(&Selection::new(3)).is_err());
    }

    #[test]
    fn test_save_reports_pages() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.pdf");
        let session = Session::new(collection(&[(10, 10), (20, 30), (5, 5)]), &output);

        let mut selection = session.select_all();
        selection.toggle(1);

        let report = session.save(&selection).unwrap();
        assert_eq!(report.page_count, 2);
        assert_eq!(report.path, output);
        assert!(output.exists());
    }

    #[test]
    fn test_shared_images_point_at_same_data() {
        let session = Session::new(collection(&[(4, 4)]), "unused.pdf");
        let shared = session.shared_images();
        assert_eq!(shared.len(), 1);
        assert!(std::ptr::eq(shared.as_ptr(), session.images().as_ptr()));
    }
}
