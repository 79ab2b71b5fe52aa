//! Uniform scaling of a content box onto a single page.

/// A4 portrait in PDF points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Where the scaled content lands on the page. `x`/`y` are the lower-left
/// corner in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

/// Scales the content to the page width; if that is taller than the page it
/// scales to the page height instead. The result is centred on both axes and
/// never exceeds the page.
pub fn fit_to_page(content_w: f32, content_h: f32, page_w: f32, page_h: f32) -> Placement {
    if content_w <= 0.0 || content_h <= 0.0 {
        return Placement {
            x: page_w / 2.0,
            y: page_h / 2.0,
            width: 0.0,
            height: 0.0,
            scale: 0.0,
        };
    }

    let mut scale = page_w / content_w;
    if content_h * scale > page_h {
        scale = page_h / content_h;
    }

    let width = content_w * scale;
    let height = content_h * scale;
    Placement {
        x: (page_w - width) / 2.0,
        y: (page_h - height) / 2.0,
        width,
        height,
        scale,
    }
}
