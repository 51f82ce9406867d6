//! Sprite references - zero-copy views into the sheet image, plus blitting.

use image::{imageops, imageops::FilterType, Rgba, RgbaImage};

use crate::geometry::SpriteRect;

/// A view of one sprite's pixels within the shared sheet image.
///
/// No pixel data is copied; the view borrows the sheet's image and is valid
/// for as long as that borrow lives. Copy out with [`Sprite::to_image`] if an
/// owned frame is needed.
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    image: &'a RgbaImage,
    rect: SpriteRect,
}

impl<'a> Sprite<'a> {
    pub(crate) fn new(image: &'a RgbaImage, rect: SpriteRect) -> Self {
        Self { image, rect }
    }

    /// The sprite's rectangle in sheet space.
    pub fn rect(&self) -> SpriteRect {
        self.rect
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    /// Pixel at (x, y) relative to the sprite's top-left corner.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(self.rect.x + x, self.rect.y + y)
    }

    /// True iff every pixel of the sprite has full alpha.
    pub fn is_fully_opaque(&self) -> bool {
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                if self.get_pixel(x, y)[3] != 255 {
                    return false;
                }
            }
        }
        true
    }

    /// Copy the sprite out to an owned image.
    pub fn to_image(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.rect.width, self.rect.height);
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                out.put_pixel(x, y, self.get_pixel(x, y));
            }
        }
        out
    }

    /// Owned copy scaled to fit within `width` x `height`, preserving the
    /// sprite's aspect ratio. Nearest-neighbor, so pixel art stays crisp.
    pub fn scaled(&self, width: u32, height: u32) -> RgbaImage {
        let scale_w = width as f64 / self.rect.width as f64;
        let scale_h = height as f64 / self.rect.height as f64;
        let scale = scale_w.min(scale_h);
        let new_w = ((self.rect.width as f64 * scale).round() as u32).max(1);
        let new_h = ((self.rect.height as f64 * scale).round() as u32).max(1);
        imageops::resize(&self.to_image(), new_w, new_h, FilterType::Nearest)
    }

    /// Alpha-composite the sprite onto `canvas` at (x, y).
    ///
    /// Transparent source pixels leave the canvas untouched and partially
    /// transparent pixels blend over it. Placement is clipped at the canvas
    /// edges.
    pub fn blit_over(&self, canvas: &mut RgbaImage, x: u32, y: u32) {
        let canvas_width = canvas.width();
        let canvas_height = canvas.height();

        for sy in 0..self.rect.height {
            let dest_y = y + sy;
            if dest_y >= canvas_height {
                break;
            }
            for sx in 0..self.rect.width {
                let dest_x = x + sx;
                if dest_x >= canvas_width {
                    break;
                }

                let src = self.get_pixel(sx, sy);
                if src[3] == 0 {
                    // Fully transparent, skip
                    continue;
                } else if src[3] == 255 {
                    // Fully opaque, overwrite
                    canvas.put_pixel(dest_x, dest_y, src);
                } else {
                    // Partial transparency, blend
                    let dst = canvas.get_pixel(dest_x, dest_y);
                    let blended = alpha_blend(&src, dst);
                    canvas.put_pixel(dest_x, dest_y, blended);
                }
            }
        }
    }

    /// Overwrite `canvas` with the sprite at (x, y) - no blending.
    ///
    /// Fast path for sprites known to be fully opaque; using it on a sprite
    /// with transparency stamps the transparent pixels over the canvas.
    /// Placement is clipped at the canvas edges.
    pub fn blit_copy(&self, canvas: &mut RgbaImage, x: u32, y: u32) {
        let canvas_width = canvas.width();
        let canvas_height = canvas.height();

        for sy in 0..self.rect.height {
            let dest_y = y + sy;
            if dest_y >= canvas_height {
                break;
            }
            for sx in 0..self.rect.width {
                let dest_x = x + sx;
                if dest_x >= canvas_width {
                    break;
                }
                canvas.put_pixel(dest_x, dest_y, self.get_pixel(sx, sy));
            }
        }
    }
}

/// Alpha blend source over destination.
fn alpha_blend(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let s_f = s as f32 / 255.0;
        let d_f = d as f32 / 255.0;
        let out = (s_f * src_a + d_f * dst_a * (1.0 - src_a)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    #[test]
    fn test_get_pixel_is_rect_relative() {
        let mut image = solid(8, 8, RED);
        image.put_pixel(5, 6, BLUE);

        let sprite = Sprite::new(&image, SpriteRect::new(4, 4, 4, 4));
        assert_eq!(sprite.get_pixel(0, 0), RED);
        assert_eq!(sprite.get_pixel(1, 2), BLUE);
    }

    #[test]
    fn test_is_fully_opaque() {
        let mut image = solid(4, 4, RED);
        let sprite = Sprite::new(&image, SpriteRect::new(0, 0, 2, 2));
        assert!(sprite.is_fully_opaque());

        image.put_pixel(1, 1, Rgba([255, 0, 0, 254]));
        let sprite = Sprite::new(&image, SpriteRect::new(0, 0, 2, 2));
        assert!(!sprite.is_fully_opaque());

        // The leaky pixel is outside this rect.
        let sprite = Sprite::new(&image, SpriteRect::new(2, 2, 2, 2));
        assert!(sprite.is_fully_opaque());
    }

    #[test]
    fn test_to_image_copies_the_rect() {
        let mut image = solid(4, 4, RED);
        image.put_pixel(2, 2, BLUE);

        let copy = Sprite::new(&image, SpriteRect::new(2, 2, 2, 2)).to_image();
        assert_eq!(copy.dimensions(), (2, 2));
        assert_eq!(*copy.get_pixel(0, 0), BLUE);
        assert_eq!(*copy.get_pixel(1, 1), RED);
    }

    #[test]
    fn test_scaled_preserves_aspect() {
        let image = solid(4, 2, RED);
        let sprite = Sprite::new(&image, SpriteRect::new(0, 0, 4, 2));

        // 2:1 sprite into a 8x8 box scales to 8x4.
        let scaled = sprite.scaled(8, 8);
        assert_eq!(scaled.dimensions(), (8, 4));
        assert_eq!(*scaled.get_pixel(7, 3), RED);
    }

    #[test]
    fn test_blit_over_blends_and_skips_transparent() {
        let mut sheet = solid(2, 1, CLEAR);
        sheet.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
        let sprite = Sprite::new(&sheet, SpriteRect::new(0, 0, 2, 1));

        let mut canvas = solid(2, 1, BLUE);
        sprite.blit_over(&mut canvas, 0, 0);

        // Semi-transparent red over blue blends toward red.
        let blended = *canvas.get_pixel(0, 0);
        assert!(blended[0] > 100);
        assert!(blended[2] < 255);
        assert_eq!(blended[3], 255);
        // Fully transparent source pixel leaves the canvas untouched.
        assert_eq!(*canvas.get_pixel(1, 0), BLUE);
    }

    #[test]
    fn test_blit_copy_overwrites_transparent_pixels() {
        let sheet = solid(2, 1, CLEAR);
        let sprite = Sprite::new(&sheet, SpriteRect::new(0, 0, 2, 1));

        let mut canvas = solid(2, 1, BLUE);
        sprite.blit_copy(&mut canvas, 0, 0);
        assert_eq!(*canvas.get_pixel(0, 0), CLEAR);
        assert_eq!(*canvas.get_pixel(1, 0), CLEAR);
    }

    #[test]
    fn test_blit_clips_at_canvas_edges() {
        let sheet = solid(4, 4, RED);
        let sprite = Sprite::new(&sheet, SpriteRect::new(0, 0, 4, 4));

        let mut canvas = solid(4, 4, BLUE);
        sprite.blit_over(&mut canvas, 2, 3);
        assert_eq!(*canvas.get_pixel(1, 3), BLUE);
        assert_eq!(*canvas.get_pixel(2, 3), RED);
        assert_eq!(*canvas.get_pixel(3, 3), RED);
        // Nothing panicked past the edge; pixels above the placement row kept.
        assert_eq!(*canvas.get_pixel(3, 2), BLUE);
    }
}
