use std::path::Path;

use image::{ImageReader, RgbaImage, imageops};

use super::Rect;
use crate::error::ToolError;

/// Grid geometry of a source sprite sheet.
///
/// Source sheets hold one column per direction and one row per animation
/// frame, every cell being `cell_width` x `cell_height` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    pub directions: u32,
    pub frames: u32,
    /// RGB color treated as empty regardless of alpha
    pub transparent_key: [u8; 3],
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            cell_width: 60,
            cell_height: 60,
            directions: 4,
            frames: 10,
            transparent_key: [255, 0, 255],
        }
    }
}

impl SheetLayout {
    pub fn validate(&self) -> Result<(), ToolError> {
        let fields = [
            ("cell width", self.cell_width),
            ("cell height", self.cell_height),
            ("directions", self.directions),
            ("frames", self.frames),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| *value == 0) {
            return Err(ToolError::InvalidLayout {
                field: *field,
                reason: "must be greater than zero",
            });
        }

        self.sheet_size()?;
        self.frame_count()?;
        Ok(())
    }

    /// Number of cells in the grid
    pub fn frame_count(&self) -> Result<u32, ToolError> {
        checked_mul("frame count", self.directions, self.frames)
    }

    /// Minimum source sheet size
    pub fn sheet_size(&self) -> Result<(u32, u32), ToolError> {
        Ok((
            checked_mul("sheet width", self.directions, self.cell_width)?,
            checked_mul("sheet height", self.frames, self.cell_height)?,
        ))
    }

    /// Output sheet size for a given crop; frames run along x, directions along y
    pub fn target_size(&self, crop: &Rect) -> Result<(u32, u32), ToolError> {
        Ok((
            checked_mul("target width", self.frames, crop.width)?,
            checked_mul("target height", self.directions, crop.height)?,
        ))
    }

    pub fn cell(&self) -> Rect {
        Rect::new(0, 0, self.cell_width, self.cell_height)
    }
}

fn checked_mul(field: &'static str, a: u32, b: u32) -> Result<u32, ToolError> {
    a.checked_mul(b).ok_or(ToolError::InvalidLayout {
        field,
        reason: "overflows the maximum image size",
    })
}

/// One animation frame cut out of a sheet
#[derive(Debug, Clone)]
pub struct Frame {
    pub direction: u32,
    pub index: u32,
    pub image: RgbaImage,
}

/// Load a sprite sheet as RGBA.
pub fn load_sheet(path: &Path) -> Result<RgbaImage, ToolError> {
    let img = ImageReader::open(path)
        .map_err(|e| ToolError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| ToolError::ImageLoad {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|e| ToolError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .into_rgba8();

    Ok(img)
}

/// Cut a sheet into frames, direction-major: all frames of direction 0 first.
///
/// Pixels beyond the configured grid are ignored.
pub fn slice_frames(sheet: &RgbaImage, layout: &SheetLayout) -> Result<Vec<Frame>, ToolError> {
    layout.validate()?;

    let (width, height) = sheet.dimensions();
    let (expected_width, expected_height) = layout.sheet_size()?;
    if width < expected_width || height < expected_height {
        return Err(ToolError::SheetTooSmall {
            width,
            height,
            expected_width,
            expected_height,
        });
    }

    let mut frames = Vec::with_capacity(layout.frame_count()? as usize);
    for direction in 0..layout.directions {
        for index in 0..layout.frames {
            let image = imageops::crop_imm(
                sheet,
                direction * layout.cell_width,
                index * layout.cell_height,
                layout.cell_width,
                layout.cell_height,
            )
            .to_image();

            frames.push(Frame {
                direction,
                index,
                image,
            });
        }
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let layout = SheetLayout::default();
        assert_eq!(layout.sheet_size().unwrap(), (240, 600));
        assert_eq!(layout.target_size(&Rect::new(10, 10, 2, 2)).unwrap(), (20, 8));
        assert_eq!(layout.frame_count().unwrap(), 40);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_zero_layout_rejected() {
        let layout = SheetLayout {
            frames: 0,
            ..SheetLayout::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(ToolError::InvalidLayout {
                field: "frames",
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_layout_rejected() {
        let layout = SheetLayout {
            cell_width: 1 << 31,
            directions: 2,
            ..SheetLayout::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(ToolError::InvalidLayout {
                field: "sheet width",
                ..
            })
        ));

        let sheet = RgbaImage::new(4, 4);
        assert!(matches!(
            slice_frames(&sheet, &layout),
            Err(ToolError::InvalidLayout { .. })
        ));
    }

    #[test]
    fn test_target_size_overflow() {
        let layout = SheetLayout::default();
        let crop = Rect::new(0, 0, u32::MAX / 2, 2);
        assert!(matches!(
            layout.target_size(&crop),
            Err(ToolError::InvalidLayout {
                field: "target width",
                ..
            })
        ));
    }

    #[test]
    fn test_load_missing_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");

        let err = load_sheet(&path).unwrap_err();

        assert!(matches!(err, ToolError::ImageLoad { path: ref p, .. } if *p == path));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn test_load_non_image_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, "not an image").unwrap();

        let err = load_sheet(&path).unwrap_err();

        assert!(matches!(err, ToolError::ImageLoad { path: ref p, .. } if *p == path));
    }

    #[test]
    fn test_load_sheet_as_rgba() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sheet.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([1, 2, 3, 4]));
        img.save(&path).unwrap();

        assert_eq!(load_sheet(&path).unwrap(), img);
    }

    #[test]
    fn test_slice_order() {
        let layout = SheetLayout {
            cell_width: 2,
            cell_height: 3,
            directions: 2,
            frames: 3,
            ..SheetLayout::default()
        };
        let mut sheet = RgbaImage::new(4, 9);
        // mark the top-left pixel of direction 1, frame 2
        sheet.put_pixel(2, 6, Rgba([9, 9, 9, 255]));

        let frames = slice_frames(&sheet, &layout).unwrap();

        assert_eq!(frames.len(), 6);
        assert_eq!((frames[0].direction, frames[0].index), (0, 0));
        assert_eq!((frames[1].direction, frames[1].index), (0, 1));
        assert_eq!((frames[3].direction, frames[3].index), (1, 0));
        assert_eq!(frames[5].image.dimensions(), (2, 3));
        assert_eq!(frames[5].image.get_pixel(0, 0), &Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_slice_rejects_small_sheet() {
        let sheet = RgbaImage::new(240, 599);
        let err = slice_frames(&sheet, &SheetLayout::default()).unwrap_err();
        assert!(matches!(
            err,
            ToolError::SheetTooSmall {
                expected_width: 240,
                expected_height: 600,
                ..
            }
        ));
    }
}
