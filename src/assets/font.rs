use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::foundation::error::{ReelError, ReelResult};

/// Raw font file bytes plus the face index inside them.
#[derive(Clone, Debug)]
pub struct FontBytes {
    /// Whole font file (may be a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index within `bytes`.
    pub index: u32,
}

/// Read a font file from disk.
pub fn load_font_file(path: &Path) -> ReelResult<FontBytes> {
    use anyhow::Context as _;
    if !path.is_file() {
        return Err(ReelError::not_found(path));
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    Ok(FontBytes {
        bytes: Arc::new(bytes),
        index: 0,
    })
}

/// First sans-serif face the system font database can find.
pub fn system_sans_serif() -> Option<FontBytes> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let id = db.query(&fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..Default::default()
    });
    let id = id.or_else(|| db.faces().next().map(|f| f.id))?;
    db.with_face_data(id, |data, index| FontBytes {
        bytes: Arc::new(data.to_vec()),
        index,
    })
}

/// Caption font: the explicit path when given, otherwise a system sans-serif.
pub fn resolve_caption_font(explicit: Option<&Path>) -> ReelResult<FontBytes> {
    match explicit {
        Some(path) => load_font_file(path),
        None => system_sans_serif().ok_or_else(|| {
            ReelError::validation(
                "captions are enabled but no font was given and no system sans-serif font was found",
            )
        }),
    }
}
