use std::borrow::Cow;

use crate::assets::font::FontBytes;
use crate::captions::plan::{CaptionStyle, WordOverlay};
use crate::effects::composite::{Sprite, fill_rect, over_sprite};
use crate::foundation::core::Resolution;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::frame::FrameRGBA;

/// Text color handed to Parley.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Padding around each rasterized word so antialiased edges are not clipped.
const PAD: f32 = 2.0;

/// Shapes words with Parley and rasterizes them with `vello_cpu`.
pub struct CaptionRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

/// Family containing face `index`, else the first registered family.
fn pick_family(
    families: &[(parley::fontique::FamilyId, Vec<parley::fontique::FontInfo>)],
    index: u32,
) -> Option<parley::fontique::FamilyId> {
    families
        .iter()
        .find(|(_, faces)| faces.iter().any(|f| f.index() == index))
        .or_else(|| families.first())
        .map(|(id, _)| *id)
}

impl CaptionRenderer {
    /// Register `font` and prepare the shaping contexts.
    ///
    /// Shapes with the family holding face `font.index`, so a collection file renders the face
    /// that was asked for.
    pub fn new(font: &FontBytes) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.as_ref().clone()), None);
        let family_id = pick_family(&families, font.index)
            .ok_or_else(|| ReelError::validation("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name the renderer shapes with.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Rasterize `word` at `size_px` into a premultiplied sprite.
    pub fn rasterize_word(&mut self, word: &str, size_px: f32, rgb: [u8; 3]) -> ReelResult<Sprite> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "caption font size must be finite and > 0",
            ));
        }
        let brush = TextBrushRgba8 {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: 255,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, word, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(word);
        layout.break_all_lines(None);

        let width = (layout.width() + 2.0 * PAD).ceil().clamp(1.0, f32::from(u16::MAX));
        let height = (layout.height() + 2.0 * PAD).ceil().clamp(1.0, f32::from(u16::MAX));
        let (w, h) = (width as u16, height as u16);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(PAD),
            f64::from(PAD),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                // Draw with the face Parley shaped, so glyph ids always match.
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(Sprite {
            width: u32::from(w),
            height: u32::from(h),
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

/// Captions for one scene: each word rasterized once, composited per frame.
#[derive(Clone, Debug)]
pub struct CaptionLayer {
    words: Vec<(WordOverlay, Sprite)>,
    style: CaptionStyle,
    output: Resolution,
    duration: f64,
}

impl CaptionLayer {
    /// Rasterize every planned word.
    pub fn build(
        renderer: &mut CaptionRenderer,
        words: Vec<WordOverlay>,
        style: CaptionStyle,
        output: Resolution,
        duration: f64,
    ) -> ReelResult<Self> {
        let words = words
            .into_iter()
            .map(|w| {
                let sprite = renderer.rasterize_word(&w.word, style.font_size, w.color)?;
                Ok((w, sprite))
            })
            .collect::<ReelResult<Vec<_>>>()?;
        Ok(Self {
            words,
            style,
            output,
            duration,
        })
    }

    /// Planned words, in order.
    pub fn words(&self) -> impl Iterator<Item = &WordOverlay> {
        self.words.iter().map(|(w, _)| w)
    }

    /// The word on screen at scene time `t`, if any.
    pub fn active_word(&self, t: f64) -> Option<&WordOverlay> {
        self.words.iter().map(|(w, _)| w).find(|w| w.is_active(t))
    }

    /// Draw the backing bar and the active word over `frame`.
    pub fn composite(&self, frame: &mut FrameRGBA, t: f64) {
        if self.words.is_empty() || t < 0.0 || t >= self.duration {
            return;
        }
        let bar_top = (self.style.center_y - self.style.bar_height / 2.0).round() as i32;
        fill_rect(
            frame,
            0,
            bar_top,
            self.output.width,
            self.style.bar_height.round() as u32,
            self.style.bar_rgb,
            self.style.bar_alpha,
        );

        let Some((word, sprite)) = self.words.iter().find(|(w, _)| w.is_active(t)) else {
            return;
        };
        let opacity = word.opacity_at(t);
        let x = (self.output.width as i32 - sprite.width as i32) / 2;
        let y = (self.style.center_y - sprite.height as f32 / 2.0 + word.settle_offset(t, &self.style))
            .round() as i32;
        over_sprite(frame, sprite, x, y, opacity);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/captions/raster.rs"]
mod tests;
