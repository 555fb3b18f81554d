//! Export renderer.
//!
//! Composites the final artwork into a shape-clipped raster at print
//! resolution. The output must reproduce what the user saw in the editor,
//! not an idealized re-layout: position is scaled by the ratio of export
//! pixels to on-screen cut-area pixels, the same ratio the live preview
//! uses, and scale/rotation are applied verbatim from the settled
//! transform snapshot.

use crate::error::{ExportError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;
use stickerkit_core::{print_pixels, Dimensions, StickerShape, TARGET_PRINT_PPI};
use stickerkit_editor::{CutArea, TransformState};
use tiny_skia::{
    Color, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Transform,
};

/// Supersampling factor for the offscreen render.
pub const SUPERSAMPLE: u32 = 2;

/// Corner radius as a fraction of the short side, rectangles.
const RECT_CORNER_FRAC: f32 = 0.06;
/// Corner radius as a fraction of the side, squares.
const SQUARE_CORNER_FRAC: f32 = 0.1;

/// Control-point distance for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

fn light_backdrop() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

fn dark_backdrop() -> Color {
    Color::from_rgba8(45, 52, 54, 255)
}

/// Everything the renderer needs, captured as one settled snapshot so no
/// component of the transform can tear against another mid-render.
#[derive(Debug)]
pub struct ExportRequest<'a> {
    /// Decoded artwork
    pub artwork: &'a RgbaImage,
    /// Settled transform at export time
    pub transform: TransformState,
    /// Cut shape, drives the clip outline
    pub shape: StickerShape,
    /// Physical cut dimensions
    pub dimensions: Dimensions,
    /// On-screen pixel geometry used during editing
    pub screen_cut_area: CutArea,
    /// Darkness signal from image analysis; picks the contrast backdrop
    pub dark_artwork: bool,
}

/// An encoded export raster.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// PNG-encoded bytes
    pub png: Vec<u8>,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// Pixel footprint of the cut dimensions at print resolution.
pub fn export_footprint_px(dimensions: &Dimensions) -> Result<(u32, u32)> {
    let (w_cm, h_cm) = dimensions
        .footprint_cm()
        .ok_or(ExportError::IncompleteDimensions)?;
    Ok((
        print_pixels(w_cm, TARGET_PRINT_PPI),
        print_pixels(h_cm, TARGET_PRINT_PPI),
    ))
}

/// Renders the export raster: supersampled compositing, shape clip,
/// contrast backdrop, then downsample and PNG-encode.
pub fn render_export(req: &ExportRequest<'_>) -> Result<ExportedImage> {
    let (native_w, native_h) = req.artwork.dimensions();
    if native_w == 0 || native_h == 0 {
        return Err(ExportError::EmptyArtwork {
            width: native_w,
            height: native_h,
        });
    }
    if req.screen_cut_area.width <= 0.0 || req.screen_cut_area.height <= 0.0 {
        return Err(ExportError::EmptyScreenArea {
            width: req.screen_cut_area.width,
            height: req.screen_cut_area.height,
        });
    }

    let (out_w, out_h) = export_footprint_px(&req.dimensions)?;
    let (ss_w, ss_h) = (out_w * SUPERSAMPLE, out_h * SUPERSAMPLE);

    let mut surface = Pixmap::new(ss_w, ss_h).ok_or(ExportError::SurfaceAllocation {
        width: ss_w,
        height: ss_h,
    })?;

    let backdrop = if req.dark_artwork {
        light_backdrop()
    } else {
        dark_backdrop()
    };
    let outline = shape_outline(req.shape, ss_w as f32, ss_h as f32);
    match &outline {
        Some(path) => {
            // Backdrop only inside the cut outline; corners stay transparent
            let mut paint = Paint::default();
            paint.set_color(backdrop);
            surface.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        None => surface.fill(backdrop),
    }

    let mask = outline.as_ref().and_then(|path| {
        let mut mask = Mask::new(ss_w, ss_h)?;
        mask.fill_path(path, FillRule::Winding, true, Transform::identity());
        Some(mask)
    });

    let artwork = artwork_pixmap(req.artwork).ok_or(ExportError::SurfaceAllocation {
        width: native_w,
        height: native_h,
    })?;

    // Same position-scaling ratio the live preview used
    let ratio_x = f64::from(ss_w) / req.screen_cut_area.width;
    let ratio_y = f64::from(ss_h) / req.screen_cut_area.height;
    let center_x = f64::from(ss_w) / 2.0 + req.transform.position.x * ratio_x;
    let center_y = f64::from(ss_h) / 2.0 + req.transform.position.y * ratio_y;
    // Width-fit convention: at scale 1 the artwork spans the cut width
    let draw_scale = req.transform.scale * f64::from(ss_w) / f64::from(native_w);

    let placement = Transform::from_translate(
        -(native_w as f32) / 2.0,
        -(native_h as f32) / 2.0,
    )
    .post_scale(draw_scale as f32, draw_scale as f32)
    .post_rotate(req.transform.rotation as f32)
    .post_translate(center_x as f32, center_y as f32);

    surface.draw_pixmap(
        0,
        0,
        artwork.as_ref(),
        &PixmapPaint::default(),
        placement,
        mask.as_ref(),
    );

    let supersampled = pixmap_to_image(&surface);
    let downsampled = image::imageops::resize(&supersampled, out_w, out_h, FilterType::Triangle);

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(downsampled).write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    tracing::debug!(width = out_w, height = out_h, bytes = png.len(), "export rendered");

    Ok(ExportedImage {
        png,
        width: out_w,
        height: out_h,
    })
}

/// Clip outline for a shape at the given surface size. Diecut stickers cut
/// along the artwork's own alpha and get no outline.
fn shape_outline(shape: StickerShape, w: f32, h: f32) -> Option<Path> {
    match shape {
        StickerShape::Circle => {
            PathBuilder::from_circle(w / 2.0, h / 2.0, w.min(h) / 2.0)
        }
        StickerShape::Rectangle => rounded_rect_path(w, h, w.min(h) * RECT_CORNER_FRAC),
        StickerShape::Square => rounded_rect_path(w, h, w.min(h) * SQUARE_CORNER_FRAC),
        StickerShape::Diecut => None,
    }
}

/// Rounded rectangle spanning (0,0)..(w,h), corners as cubic quarter arcs.
fn rounded_rect_path(w: f32, h: f32, radius: f32) -> Option<Path> {
    let r = radius.min(w / 2.0).min(h / 2.0);
    let k = r * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(w - r, 0.0);
    pb.cubic_to(w - r + k, 0.0, w, r - k, w, r);
    pb.line_to(w, h - r);
    pb.cubic_to(w, h - r + k, w - r + k, h, w - r, h);
    pb.line_to(r, h);
    pb.cubic_to(r - k, h, 0.0, h - r + k, 0.0, h - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

/// Converts the decoded artwork into a premultiplied pixmap for
/// compositing.
fn artwork_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let (w, h) = image.dimensions();
    let mut pixmap = Pixmap::new(w, h)?;
    for (src, dst) in image.pixels().zip(pixmap.pixels_mut()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Converts the composited surface back to straight-alpha RGBA.
fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut image = RgbaImage::new(w, h);
    for (src, dst) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_artwork(w: u32, h: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(pixel))
    }

    fn request<'a>(artwork: &'a RgbaImage, shape: StickerShape, dims: Dimensions) -> ExportRequest<'a> {
        ExportRequest {
            artwork,
            transform: TransformState::identity(),
            shape,
            dimensions: dims,
            screen_cut_area: CutArea::new(200.0, 200.0),
            dark_artwork: false,
        }
    }

    fn decode(exported: &ExportedImage) -> RgbaImage {
        image::load_from_memory(&exported.png).unwrap().to_rgba8()
    }

    #[test]
    fn test_footprint_at_print_resolution() {
        // 8x5 cm at 300 ppi
        let (w, h) = export_footprint_px(&Dimensions::rect(8.0, 5.0)).unwrap();
        assert_eq!((w, h), (945, 591));
        // Circles use the diameter on both axes
        let (w, h) = export_footprint_px(&Dimensions::circle(3.0)).unwrap();
        assert_eq!((w, h), (354, 354));
    }

    #[test]
    fn test_circle_clip_leaves_corners_transparent() {
        let artwork = solid_artwork(20, 20, [255, 0, 0, 255]);
        let req = request(&artwork, StickerShape::Circle, Dimensions::circle(3.0));
        let out = render_export(&req).unwrap();
        assert_eq!((out.width, out.height), (354, 354));

        let img = decode(&out);
        // Outside the circle outline
        assert_eq!(img.get_pixel(1, 1).0[3], 0);
        // Center is fully covered
        assert_eq!(img.get_pixel(177, 177).0[3], 255);
    }

    #[test]
    fn test_backdrop_follows_darkness_signal() {
        // Fully transparent artwork so only the backdrop shows
        let artwork = solid_artwork(10, 10, [0, 0, 0, 0]);
        let dims = Dimensions::rect(4.0, 4.0);

        let mut req = request(&artwork, StickerShape::Square, dims);
        req.dark_artwork = true;
        let img = decode(&render_export(&req).unwrap());
        let center = img.get_pixel(img.width() / 2, img.height() / 2).0;
        assert_eq!(center, [255, 255, 255, 255]);

        req.dark_artwork = false;
        let img = decode(&render_export(&req).unwrap());
        let center = img.get_pixel(img.width() / 2, img.height() / 2).0;
        assert_eq!(center, [45, 52, 54, 255]);
    }

    #[test]
    fn test_diecut_keeps_full_surface() {
        let artwork = solid_artwork(10, 10, [0, 0, 0, 0]);
        let req = request(&artwork, StickerShape::Diecut, Dimensions::rect(4.0, 4.0));
        let img = decode(&render_export(&req).unwrap());
        // No clip outline: the corner carries the backdrop
        assert_eq!(img.get_pixel(0, 0).0, [45, 52, 54, 255]);
    }

    #[test]
    fn test_position_scales_with_export_ratio() {
        // Half-scale artwork moved right by a quarter of the screen cut
        // area must land at the same relative spot in the export.
        let artwork = solid_artwork(4, 4, [0, 255, 0, 255]);
        let dims = Dimensions::rect(4.0, 4.0);
        let mut req = request(&artwork, StickerShape::Diecut, dims);
        req.transform.scale = 0.5;
        req.transform.position = stickerkit_editor::Vec2::new(50.0, 0.0); // quarter of 200

        let out = render_export(&req).unwrap();
        let img = decode(&out);
        let center_y = out.height / 2;
        // Artwork center sits at 3/4 of the output width
        let expected_x = out.width / 2 + out.width / 4;
        assert_eq!(img.get_pixel(expected_x, center_y).0, [0, 255, 0, 255]);
        // Left of the shifted artwork only the backdrop remains
        assert_eq!(img.get_pixel(20, center_y).0, [45, 52, 54, 255]);
    }

    #[test]
    fn test_empty_artwork_rejected() {
        let artwork = RgbaImage::new(0, 0);
        let req = request(&artwork, StickerShape::Circle, Dimensions::circle(3.0));
        assert!(matches!(
            render_export(&req),
            Err(ExportError::EmptyArtwork { .. })
        ));
    }
}
