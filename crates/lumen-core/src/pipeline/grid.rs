use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::error::{LumenError, Result};

/// Lay images out column by column, `rows` per column, each scaled to
/// `cell_height` with its aspect ratio kept. Missing cells stay black.
pub fn compose_grid(images: &[RgbImage], cell_height: u32, rows: usize) -> Result<RgbImage> {
    if images.is_empty() || cell_height == 0 || rows == 0 {
        return Err(LumenError::Config(
            "comparison grid needs at least one image, a positive cell height and row count"
                .into(),
        ));
    }

    let cells: Vec<RgbImage> = images
        .iter()
        .map(|img| {
            let (w, h) = img.dimensions();
            let scaled_w = ((w as f64 * cell_height as f64 / h.max(1) as f64).round() as u32).max(1);
            imageops::resize(img, scaled_w, cell_height, FilterType::Triangle)
        })
        .collect();

    let columns: Vec<&[RgbImage]> = cells.chunks(rows).collect();
    let column_widths: Vec<u32> = columns
        .iter()
        .map(|col| col.iter().map(|c| c.width()).max().unwrap_or(0))
        .collect();
    let total_w: u32 = column_widths.iter().sum();
    let total_h = cell_height * rows as u32;

    let mut canvas = RgbImage::new(total_w, total_h);
    let mut x = 0u32;
    for (col, width) in columns.iter().zip(&column_widths) {
        for (row, cell) in col.iter().enumerate() {
            imageops::replace(&mut canvas, cell, x as i64, (row as u32 * cell_height) as i64);
        }
        x += width;
    }
    Ok(canvas)
}
