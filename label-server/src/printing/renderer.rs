//! Drop-off label renderer
//!
//! Renders a [`LabelDocument`] into ESC/POS for the label printer, on the
//! fixed 5"x5" layout: shop name banner, phone, date, then the body.

use label_printer::EscPosBuilder;

use crate::labels::{LabelBody, LabelDocument};

/// Drop-off label renderer
pub struct LabelRenderer {
    width: usize,
}

impl LabelRenderer {
    /// Create a renderer for the given paper width in characters
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render a label to ESC/POS bytes (Windows-1252 text)
    pub fn render(&self, doc: &LabelDocument) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, doc);
        self.render_body(&mut b, &doc.body);

        b.bold_off();
        b.feed(3);
        b.cut();

        b.build()
    }

    /// Shop name banner, phone and date
    fn render_header(&self, b: &mut EscPosBuilder, doc: &LabelDocument) {
        b.center();
        b.bold();
        b.double_size();
        b.line_wrap(&doc.header.shop_name, 2);
        b.reset_size();
        b.newline();

        b.left();
        b.line_wrap(&format!("Phone: {}", doc.header.phone), 1);
        b.newline();
        b.line(&format!("Date: {}", doc.header.submitted_at));
        b.newline();
    }

    fn render_body(&self, b: &mut EscPosBuilder, body: &LabelBody) {
        b.double_height();

        match body {
            LabelBody::Vehicle { vehicle, notes } => {
                b.line_wrap(&format!("Vehicle: {}", vehicle), 1);
                b.line_wrap(&format!("Notes: {}", notes), 1);
            }
            LabelBody::Module { index, total } => {
                b.line(&format!("Module: {} of {}", index, total));
            }
            LabelBody::Parts { lines } => {
                b.underline();
                b.line("Parts Drop-off:");
                b.underline_off();
                for line in lines {
                    b.line(&line.to_string());
                }
            }
        }

        b.reset_size();
    }

    /// Plain-text rendition of the same layout, for logs
    pub fn render_text(&self, doc: &LabelDocument) -> String {
        let mut out = String::new();

        for field in doc.fields() {
            if field.name == "Shop" {
                out.push_str(&field.value);
            } else if field.value.contains('\n') {
                out.push_str(field.name);
                out.push(':');
                for line in field.value.lines() {
                    out.push_str("\n  ");
                    out.push_str(line);
                }
            } else {
                out.push_str(field.name);
                out.push_str(": ");
                out.push_str(&field.value);
            }
            out.push('\n');
        }

        out
    }
}

impl Default for LabelRenderer {
    fn default() -> Self {
        Self::new(48)
    }
}
