// Shape crop rules
//
// Each shape is a fixed transparency mask over the standard 16x16 block
// texture. Masks operate on a copy of the source and are idempotent.

use std::path::Path;

use image::{Rgba, RgbaImage, imageops};

use crate::error::DeriveError;

/// Matches the original texture convention: masked pixels are white with
/// zero alpha.
const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Shape of a partial block texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockShape {
    /// Full texture, canvas cropped to 16x16.
    Square,
    /// Bottom half of the texture.
    Slab,
    /// Everything except the top-right quadrant.
    Stair,
    /// Only the bottom row of pixels.
    Carpet,
    /// Only the two bottom rows of pixels.
    Snow,
    /// Only the middle column band (columns 7-8).
    GlassPane,
}

impl BlockShape {
    /// Classify a derived texture name by its suffix convention.
    /// Names without a known suffix are not derivable by shape.
    pub fn for_derived_name(name: &str) -> Option<BlockShape> {
        if name.contains("_slab") {
            Some(BlockShape::Slab)
        } else if name.contains("_stairs") {
            Some(BlockShape::Stair)
        } else if name.contains("_carpet") {
            Some(BlockShape::Carpet)
        } else {
            None
        }
    }
}

/// Crop a texture to a shape, returning a new image.
///
/// Mask rectangles are clamped to the image bounds so oversized sources
/// (vertical animation strips) are handled without panicking.
pub fn crop(img: &RgbaImage, shape: BlockShape) -> RgbaImage {
    if let BlockShape::Square = shape {
        return imageops::crop_imm(img, 0, 0, 16, 16).to_image();
    }
    let mut out = img.clone();
    match shape {
        BlockShape::Square => {}
        BlockShape::Slab => clear_rect(&mut out, 0, 0, 16, 8),
        BlockShape::Stair => clear_rect(&mut out, 8, 0, 16, 8),
        BlockShape::Carpet => clear_rect(&mut out, 0, 0, 16, 15),
        BlockShape::Snow => clear_rect(&mut out, 0, 0, 16, 14),
        BlockShape::GlassPane => {
            clear_rect(&mut out, 0, 0, 7, 16);
            clear_rect(&mut out, 9, 0, 16, 16);
        }
    }
    out
}

/// Read a texture file, crop it, and write the result.
pub fn crop_file(src: &Path, shape: BlockShape, dest: &Path) -> Result<(), DeriveError> {
    let img = image::open(src)
        .map_err(|source| DeriveError::Image {
            path: src.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let out = crop(&img, shape);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    out.save(dest).map_err(|source| DeriveError::Image {
        path: dest.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn clear_rect(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    let x1 = x1.min(img.width());
    let y1 = y1.min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, TRANSPARENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE: Rgba<u8> = Rgba([10, 20, 30, 255]);

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, OPAQUE)
    }

    fn transparent_rows(img: &RgbaImage) -> Vec<u32> {
        (0..img.height())
            .filter(|&y| (0..img.width()).all(|x| img.get_pixel(x, y).0[3] == 0))
            .collect()
    }

    #[test]
    fn square_crops_canvas_to_16() {
        let out = crop(&solid(16, 32), BlockShape::Square);
        assert_eq!((out.width(), out.height()), (16, 16));
        assert!(out.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn slab_clears_top_half() {
        let out = crop(&solid(16, 16), BlockShape::Slab);
        assert_eq!(transparent_rows(&out), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn stair_clears_top_right_quadrant() {
        let out = crop(&solid(16, 16), BlockShape::Stair);
        for y in 0..16 {
            for x in 0..16 {
                let expect_clear = x >= 8 && y < 8;
                assert_eq!(
                    out.get_pixel(x, y).0[3] == 0,
                    expect_clear,
                    "pixel ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn carpet_keeps_only_bottom_row() {
        let out = crop(&solid(16, 16), BlockShape::Carpet);
        assert_eq!(transparent_rows(&out), (0..15).collect::<Vec<_>>());
        assert_eq!(*out.get_pixel(0, 15), OPAQUE);
    }

    #[test]
    fn snow_keeps_only_two_bottom_rows() {
        let out = crop(&solid(16, 16), BlockShape::Snow);
        assert_eq!(transparent_rows(&out), (0..14).collect::<Vec<_>>());
        assert_eq!(*out.get_pixel(0, 14), OPAQUE);
        assert_eq!(*out.get_pixel(0, 15), OPAQUE);
    }

    #[test]
    fn glass_pane_keeps_middle_column_band() {
        let out = crop(&solid(16, 16), BlockShape::GlassPane);
        for y in 0..16 {
            for x in 0..16 {
                let expect_opaque = x == 7 || x == 8;
                assert_eq!(
                    out.get_pixel(x, y).0[3] == 255,
                    expect_opaque,
                    "pixel ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn crop_is_idempotent() {
        for shape in [
            BlockShape::Square,
            BlockShape::Slab,
            BlockShape::Stair,
            BlockShape::Carpet,
            BlockShape::Snow,
            BlockShape::GlassPane,
        ] {
            let once = crop(&solid(16, 16), shape);
            let twice = crop(&once, shape);
            assert_eq!(once, twice, "{shape:?} must be idempotent");
        }
    }

    #[test]
    fn masks_clamp_to_small_images() {
        // A 8x8 source must not panic on any mask.
        for shape in [
            BlockShape::Slab,
            BlockShape::Stair,
            BlockShape::Carpet,
            BlockShape::Snow,
            BlockShape::GlassPane,
        ] {
            let out = crop(&solid(8, 8), shape);
            assert_eq!((out.width(), out.height()), (8, 8));
        }
    }

    #[test]
    fn suffix_classification() {
        assert_eq!(
            BlockShape::for_derived_name("oak_slab"),
            Some(BlockShape::Slab)
        );
        assert_eq!(
            BlockShape::for_derived_name("brick_stairs"),
            Some(BlockShape::Stair)
        );
        assert_eq!(
            BlockShape::for_derived_name("red_carpet"),
            Some(BlockShape::Carpet)
        );
        assert_eq!(BlockShape::for_derived_name("oak_fence"), None);
    }

    #[test]
    fn crop_file_reads_and_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("base.png");
        let dest = dir.path().join("derived.png");
        solid(16, 16).save(&src).unwrap();

        crop_file(&src, BlockShape::Slab, &dest).unwrap();

        let out = image::open(&dest).unwrap().to_rgba8();
        assert_eq!(transparent_rows(&out), (0..8).collect::<Vec<_>>());
    }
}
