//! Writes stage results to `--out-dir`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fakebiz_core::stage::{LANDING_PAGE_FILE_NAME, LandingPage, Logo};

pub const LOGO_FILE_NAME: &str = "logo.png";

pub fn write_logo(dir: &Path, logo: &Logo) -> Result<PathBuf> {
    let png = logo.to_png()?;
    write_file(dir, LOGO_FILE_NAME, &png)
}

pub fn write_landing_page(dir: &Path, page: &LandingPage) -> Result<PathBuf> {
    write_file(dir, LANDING_PAGE_FILE_NAME, page.html.as_bytes())
}

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), size = contents.len(), "Exported file");
    Ok(path)
}
