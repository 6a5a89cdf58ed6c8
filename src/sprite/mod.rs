mod bounds;
mod rect;
mod reorganize;
mod sheet;

pub use bounds::{content_bounds, is_visible};
pub use rect::Rect;
pub use reorganize::{Reorganized, crop_rect, reorganize, retile};
pub use sheet::{Frame, SheetLayout, load_sheet, slice_frames};
