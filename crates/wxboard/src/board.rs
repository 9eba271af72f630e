use slog::{debug, Logger};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tokio::{sync::Mutex, task};

use crate::HtmlPage;

/// The page both refresh loops render into, published to disk after every change.
pub struct Board {
    logger: Logger,
    page: Mutex<HtmlPage>,
    output: Option<PathBuf>,
}

impl Board {
    pub fn new(logger: Logger, page: HtmlPage, output: Option<PathBuf>) -> Self {
        Board {
            logger,
            page: Mutex::new(page),
            output,
        }
    }

    pub async fn update<F>(&self, apply: F) -> Result<(), io::Error>
    where
        F: FnOnce(&mut HtmlPage),
    {
        let mut page = self.page.lock().await;
        apply(&mut page);

        if let Some(path) = self.output.clone() {
            let html = page.to_html();
            // write and rename run as one blocking task, so a cancelled cycle
            // can't leave the staging file behind
            let published = path.clone();
            task::spawn_blocking(move || publish(&path, html))
                .await
                .map_err(io::Error::other)??;
            debug!(self.logger, "page written to {}", published.display());
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> HtmlPage {
        self.page.lock().await.clone()
    }
}

// readers only ever see a complete page
fn publish(path: &Path, html: String) -> Result<(), io::Error> {
    let staging = path.with_extension("html.tmp");
    fs::write(&staging, html)?;
    fs::rename(&staging, path)
}
