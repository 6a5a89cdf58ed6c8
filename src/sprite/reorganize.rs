use image::{RgbaImage, imageops};
use log::debug;

use super::{Frame, Rect, SheetLayout, content_bounds, slice_frames};
use crate::error::ToolError;

/// A reorganized sprite sheet and the crop it was built with
#[derive(Debug, Clone)]
pub struct Reorganized {
    pub crop: Rect,
    pub image: RgbaImage,
}

/// Shared crop rectangle of all frames.
///
/// The union of every frame's content bounds, grown by one pixel on the
/// trailing edges. Empty frames do not contribute.
pub fn crop_rect(frames: &[Frame], transparent_key: [u8; 3]) -> Result<Rect, ToolError> {
    frames
        .iter()
        .filter_map(|frame| {
            let bounds = content_bounds(&frame.image, transparent_key);
            debug!(
                "direction {} frame {}: {:?}",
                frame.direction, frame.index, bounds
            );
            bounds
        })
        .reduce(|acc, bounds| acc.union(&bounds))
        .map(|rect| rect.padded())
        .ok_or(ToolError::NoCropRect)
}

/// Copy the crop region of every frame into a new sheet with frames along x
/// and directions along y.
///
/// Parts of the crop that fall outside a cell stay transparent.
pub fn retile(
    frames: &[Frame],
    crop: Rect,
    layout: &SheetLayout,
) -> Result<RgbaImage, ToolError> {
    let (width, height) = layout.target_size(&crop)?;
    let mut target = RgbaImage::new(width, height);

    let visible = crop.clipped_to(&layout.cell());
    if visible != crop {
        debug!(
            "crop {:?} clipped to {:?} by the {}x{} cell, {} column(s) and {} row(s) left transparent",
            crop,
            visible,
            layout.cell_width,
            layout.cell_height,
            crop.width - visible.width,
            crop.height - visible.height
        );
    }

    for frame in frames {
        let region = imageops::crop_imm(
            &frame.image,
            visible.x,
            visible.y,
            visible.width,
            visible.height,
        )
        .to_image();
        imageops::replace(
            &mut target,
            &region,
            i64::from(frame.index * crop.width),
            i64::from(frame.direction * crop.height),
        );
    }

    Ok(target)
}

/// Crop and retile a whole sheet.
pub fn reorganize(sheet: &RgbaImage, layout: &SheetLayout) -> Result<Reorganized, ToolError> {
    let frames = slice_frames(sheet, layout)?;
    let crop = crop_rect(&frames, layout.transparent_key)?;
    let image = retile(&frames, crop, layout)?;

    Ok(Reorganized { crop, image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImage, Rgba};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn layout() -> SheetLayout {
        SheetLayout::default()
    }

    fn blank_sheet() -> RgbaImage {
        let (w, h) = layout().sheet_size().unwrap();
        RgbaImage::new(w, h)
    }

    /// Put a pixel at cell-local coordinates of a (direction, frame) cell
    fn put(sheet: &mut RgbaImage, direction: u32, frame: u32, x: u32, y: u32, pixel: Rgba<u8>) {
        sheet.put_pixel(direction * 60 + x, frame * 60 + y, pixel);
    }

    #[test]
    fn test_single_pixel_sheet() {
        let mut sheet = blank_sheet();
        put(&mut sheet, 0, 0, 10, 10, RED);

        let result = reorganize(&sheet, &layout()).unwrap();

        assert_eq!(result.crop, Rect::new(10, 10, 2, 2));
        assert_eq!(result.image.dimensions(), (20, 8));
        assert_eq!(result.image.get_pixel(0, 0), &RED);
        assert_eq!(result.image.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_crop_is_union_of_frames() {
        let mut sheet = blank_sheet();
        put(&mut sheet, 0, 3, 20, 5, RED);
        put(&mut sheet, 2, 7, 8, 40, RED);
        put(&mut sheet, 3, 9, 30, 30, RED);

        let frames = slice_frames(&sheet, &layout()).unwrap();
        let crop = crop_rect(&frames, [255, 0, 255]).unwrap();

        // x 8..=30, y 5..=40, plus one pixel of padding
        assert_eq!(crop, Rect::new(8, 5, 24, 37));
    }

    #[test]
    fn test_leading_empty_frames_are_skipped() {
        let mut sheet = blank_sheet();
        put(&mut sheet, 3, 9, 59, 59, RED);

        let frames = slice_frames(&sheet, &layout()).unwrap();
        assert_eq!(
            crop_rect(&frames, [255, 0, 255]).unwrap(),
            Rect::new(59, 59, 2, 2)
        );
    }

    #[test]
    fn test_key_color_is_not_content() {
        let mut sheet = RgbaImage::from_pixel(240, 600, Rgba([255, 0, 255, 255]));
        assert!(matches!(
            reorganize(&sheet, &layout()),
            Err(ToolError::NoCropRect)
        ));

        put(&mut sheet, 1, 1, 0, 0, RED);
        assert_eq!(
            reorganize(&sheet, &layout()).unwrap().crop,
            Rect::new(0, 0, 2, 2)
        );
    }

    #[test]
    fn test_empty_sheet_has_no_crop() {
        assert!(matches!(
            reorganize(&blank_sheet(), &layout()),
            Err(ToolError::NoCropRect)
        ));
    }

    #[test]
    fn test_axes_are_transposed() {
        let mut sheet = blank_sheet();
        let marker = Rgba([1, 2, 3, 255]);
        // frame content spans the same 3x3 box in every cell
        for direction in 0..4 {
            for frame in 0..10 {
                put(&mut sheet, direction, frame, 5, 5, RED);
                put(&mut sheet, direction, frame, 7, 7, RED);
            }
        }
        put(&mut sheet, 2, 6, 6, 6, marker);

        let result = reorganize(&sheet, &layout()).unwrap();

        assert_eq!(result.crop, Rect::new(5, 5, 4, 4));
        assert_eq!(result.image.dimensions(), (40, 16));
        // frame 6 -> column 6, direction 2 -> row 2
        assert_eq!(result.image.get_pixel(6 * 4 + 1, 2 * 4 + 1), &marker);
    }

    #[test]
    fn test_padding_past_cell_edge_is_transparent() {
        let mut sheet = blank_sheet();
        put(&mut sheet, 0, 0, 59, 0, RED);

        let result = reorganize(&sheet, &layout()).unwrap();

        assert_eq!(result.crop, Rect::new(59, 0, 2, 2));
        assert_eq!(result.image.get_pixel(0, 0), &RED);
        assert_eq!(result.image.get_pixel(1, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_retile_clips_crop_to_cell() {
        let frame = Frame {
            direction: 0,
            index: 1,
            image: RgbaImage::from_pixel(4, 4, RED),
        };
        let small = SheetLayout {
            cell_width: 4,
            cell_height: 4,
            directions: 1,
            frames: 2,
            ..layout()
        };

        let target = retile(&[frame], Rect::new(2, 3, 3, 2), &small).unwrap();

        assert_eq!(target.dimensions(), (6, 2));
        // frame 1 starts at column 3; visible part is 2x1
        assert_eq!(target.get_pixel(3, 0), &RED);
        assert_eq!(target.get_pixel(4, 0), &RED);
        assert_eq!(target.get_pixel(5, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(target.get_pixel(3, 1), &Rgba([0, 0, 0, 0]));
        // frame 0 was not supplied
        assert_eq!(target.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_semi_transparent_pixels_copied_exactly() {
        let mut sheet = blank_sheet();
        let ghost = Rgba([10, 20, 30, 40]);
        put(&mut sheet, 1, 0, 0, 0, ghost);

        let result = reorganize(&sheet, &layout()).unwrap();

        // direction 1 -> row 1
        assert_eq!(result.image.get_pixel(0, 2), &ghost);
    }

    #[test]
    fn test_recropping_keeps_content() {
        let mut sheet = blank_sheet();
        put(&mut sheet, 0, 0, 10, 10, RED);
        put(&mut sheet, 3, 9, 20, 15, RED);
        let first = reorganize(&sheet, &layout()).unwrap();

        // lay the cropped cells back out in the source orientation
        let cell = first.crop;
        let small = SheetLayout {
            cell_width: cell.width,
            cell_height: cell.height,
            ..layout()
        };
        let (w, h) = small.sheet_size().unwrap();
        let mut again = RgbaImage::new(w, h);
        for direction in 0..4 {
            for frame in 0..10 {
                let view = imageops::crop_imm(
                    &first.image,
                    frame * cell.width,
                    direction * cell.height,
                    cell.width,
                    cell.height,
                )
                .to_image();
                again
                    .copy_from(&view, direction * cell.width, frame * cell.height)
                    .unwrap();
            }
        }

        let second = reorganize(&again, &small).unwrap();
        assert_eq!(second.crop, Rect::new(0, 0, cell.width, cell.height));
    }
}
