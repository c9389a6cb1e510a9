use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::images::DecodedImage;

const UPPER_HALF: &str = "▀";
const PLACEHOLDER_LABEL: &str = "no image";

/// Draws a decoded image with half-block cells: each cell carries two
/// vertically stacked pixels (foreground on top, background below).
/// Without an image, a shaded placeholder fills the area.
pub struct Thumbnail<'a> {
    image: Option<&'a DecodedImage>,
    placeholder: Color,
}

impl<'a> Thumbnail<'a> {
    pub fn new(image: Option<&'a DecodedImage>) -> Self {
        Self {
            image,
            placeholder: Color::DarkGray,
        }
    }

    pub fn placeholder_color(mut self, color: Color) -> Self {
        self.placeholder = color;
        self
    }
}

impl Widget for Thumbnail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        match self.image {
            Some(image) => render_image(image, area, buf),
            None => render_placeholder(self.placeholder, area, buf),
        }
    }
}

fn render_image(image: &DecodedImage, area: Rect, buf: &mut Buffer) {
    let pixels = image.resampled(u32::from(area.width), u32::from(area.height) * 2);

    for row in 0..area.height {
        for col in 0..area.width {
            let top = pixels.get_pixel(u32::from(col), u32::from(row) * 2);
            let bottom = pixels.get_pixel(u32::from(col), u32::from(row) * 2 + 1);

            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_symbol(UPPER_HALF)
                    .set_fg(Color::Rgb(top[0], top[1], top[2]))
                    .set_bg(Color::Rgb(bottom[0], bottom[1], bottom[2]));
            }
        }
    }
}

fn render_placeholder(color: Color, area: Rect, buf: &mut Buffer) {
    let style = Style::default().fg(color);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol("░").set_style(style);
            }
        }
    }

    let label_width = PLACEHOLDER_LABEL.len() as u16;
    if area.width >= label_width + 2 {
        let x = area.x + (area.width - label_width) / 2;
        let y = area.y + area.height / 2;
        buf.set_string(x, y, PLACEHOLDER_LABEL, style);
    }
}
