// PDF Export: letter text → one-page A4 PDF.
//
// The letter is laid out on a fixed-width sheet (sheet.rs) using static font
// metrics (font_metrics.rs), then scaled as a single snapshot onto the page
// (fit.rs, pdf.rs). No multi-page pagination.

pub mod fit;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;
pub mod sheet;
