use std::path::Path;

use image::GenericImageView;

use crate::core::{Company, DocumentError};

/// Decoded logo, ready to be embedded as an image XObject.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    /// 8-bit RGB samples, row by row.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples, present only when the source has transparency.
    pub alpha: Option<Vec<u8>>,
}

impl LogoImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Decode the image at `path`.
pub fn load_logo(path: &Path) -> Result<LogoImage, DocumentError> {
    let img = image::open(path)
        .map_err(|e| DocumentError::Pdf(format!("failed to load logo {}: {e}", path.display())))?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(DocumentError::Pdf(format!(
            "logo {} has no pixels",
            path.display()
        )));
    }

    let alpha = img.color().has_alpha().then(|| {
        img.to_rgba8()
            .pixels()
            .map(|p| p.0[3])
            .collect::<Vec<u8>>()
    });

    Ok(LogoImage {
        width,
        height,
        rgb: img.to_rgb8().into_raw(),
        alpha,
    })
}

/// The issuer's logo, if configured and loadable.
///
/// This is the only place where a logo failure is absorbed: a missing file
/// or undecodable image yields `None` and the document renders without it.
pub fn issuer_logo(issuer: &Company) -> Option<LogoImage> {
    let path = issuer.logo_path.as_deref()?;
    match load_logo(path) {
        Ok(logo) => Some(logo),
        Err(err) => {
            tracing::debug!(%err, "rendering without logo");
            None
        }
    }
}
