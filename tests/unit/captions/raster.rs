use super::*;
use crate::assets::font::system_sans_serif;
use crate::captions::plan::plan_captions;

fn renderer() -> Option<CaptionRenderer> {
    let Some(font) = system_sans_serif() else {
        eprintln!("skipping: no system sans-serif font");
        return None;
    };
    Some(CaptionRenderer::new(&font).unwrap())
}

#[test]
fn word_sprite_has_ink() {
    let Some(mut r) = renderer() else { return };
    let sprite = r.rasterize_word("Hello", 40.0, [255, 215, 0]).unwrap();
    assert!(sprite.width > 40 && sprite.height > 20);
    assert_eq!(sprite.data.len(), (sprite.width * sprite.height * 4) as usize);
    assert!(sprite.data.chunks_exact(4).any(|px| px[3] > 200));
}

#[test]
fn bad_font_size_is_rejected() {
    let Some(mut r) = renderer() else { return };
    assert!(r.rasterize_word("x", 0.0, [255, 255, 255]).is_err());
}

#[test]
fn layer_draws_bar_and_word_only_inside_the_clip() {
    let Some(mut r) = renderer() else { return };
    let out = Resolution::new(320, 240);
    let style = CaptionStyle::for_resolution(out);
    let words = plan_captions("hello world test", 6.0, &style);
    let layer = CaptionLayer::build(&mut r, words, style.clone(), out, 6.0).unwrap();
    assert_eq!(layer.active_word(3.0).map(|w| w.word.as_str()), Some("world"));

    let base = FrameRGBA::filled(out, [200, 200, 200]);

    let mut drawn = base.clone();
    layer.composite(&mut drawn, 3.0);
    let bar_y = style.center_y.round() as u32;
    // Left edge is bar only: half-dark gray.
    let edge = drawn.rgb_at(0, bar_y);
    assert!(edge[0] < 110 && edge[0] > 90, "{edge:?}");
    assert_ne!(drawn, base);
    // Top of frame untouched.
    assert_eq!(drawn.rgb_at(10, 10), [200, 200, 200]);

    let mut after = base.clone();
    layer.composite(&mut after, 6.0);
    assert_eq!(after, base);
}

/// A face that is not the first one in its file, as found in `.ttc` collections.
fn collection_face() -> Option<FontBytes> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let id = db.faces().find(|f| f.index > 0).map(|f| f.id)?;
    db.with_face_data(id, |data, index| FontBytes {
        bytes: std::sync::Arc::new(data.to_vec()),
        index,
    })
}

#[test]
fn collection_faces_shape_with_the_requested_face() {
    let Some(font) = collection_face() else {
        eprintln!("skipping: no font collection installed");
        return;
    };

    let mut collection = parley::fontique::Collection::new(parley::fontique::CollectionOptions {
        shared: false,
        system_fonts: false,
    });
    let families = collection.register_fonts(
        parley::fontique::Blob::from(font.bytes.as_ref().clone()),
        None,
    );
    let id = pick_family(&families, font.index).unwrap();
    let (_, faces) = families.iter().find(|(f, _)| *f == id).unwrap();
    assert!(faces.iter().any(|f| f.index() == font.index));

    let mut r = CaptionRenderer::new(&font).unwrap();
    assert_eq!(r.family_name(), collection.family_name(id).unwrap());
    let sprite = r.rasterize_word("Hello", 40.0, [255, 255, 255]).unwrap();
    assert!(sprite.data.chunks_exact(4).any(|px| px[3] > 200));
}
