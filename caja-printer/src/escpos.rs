//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::{convert_to_cp1252, cp1252_width, pad_cp1252};

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers.
/// All text is converted to CP1252 encoding on [`build`](Self::build).
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text (will be CP1252 encoded)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    /// Align text to right
    pub fn right(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x02]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned,
    /// with spaces filling the gap.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = cp1252_width(left);
        let rw = cp1252_width(right);

        if lw + rw >= self.width {
            // Too long, just print with space
            self.text(left);
            self.text(" ");
            self.line(right);
        } else {
            let spaces = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(spaces));
            self.line(right);
        }
        self
    }

    /// Print a three-column table row: description, quantity, amount
    ///
    /// Columns take 50%, 20% and 30% of the paper width. The description
    /// is left-aligned and truncated, the quantity centered, the amount
    /// right-aligned.
    pub fn table_row(&mut self, name: &str, qty: &str, amount: &str) -> &mut Self {
        let name_w = self.width / 2;
        let qty_w = self.width / 5;
        let amount_w = self.width - name_w - qty_w;

        let name_col = pad_cp1252(name, name_w, false);

        // Center the quantity inside its column
        let qw = cp1252_width(qty).min(qty_w);
        let lead = (qty_w - qw) / 2;
        let mut qty_col = String::new();
        qty_col.push_str(&" ".repeat(lead));
        qty_col.push_str(&pad_cp1252(qty, qty_w - lead, false));

        let amount_col = pad_cp1252(amount, amount_w, true);

        self.line(&format!("{}{}{}", name_col, qty_col, amount_col))
    }

    // === Paper Control ===

    /// Full cut with feed — feeds n lines then cuts.
    /// Uses GS V 66 n, which lets the printer manage cutter-to-head distance.
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        // GS V 66 n - Full cut after feeding n lines
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Build ===

    /// Build the final byte buffer with CP1252 encoding
    ///
    /// This converts all UTF-8 text to CP1252 while preserving ESC/POS
    /// commands.
    pub fn build(self) -> Vec<u8> {
        convert_to_cp1252(&self.buf)
    }

    /// Build without CP1252 conversion (for debugging or ASCII-only content)
    pub fn build_raw(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_init() {
        let b = EscPosBuilder::new(32);
        assert_eq!(&b.build_raw()[..2], &[0x1B, 0x40]);
    }

    /// Printable text after the ESC @ init sequence
    fn text_of(b: EscPosBuilder) -> String {
        let out = String::from_utf8(b.build_raw()).unwrap();
        out.strip_prefix("\u{1b}@").unwrap().to_string()
    }

    #[test]
    fn test_line_lr_fills_width() {
        let mut b = EscPosBuilder::new(16);
        b.line_lr("TOTAL", "9.99");
        let expected = format!("TOTAL{}9.99\n", " ".repeat(16 - 5 - 4));
        assert_eq!(text_of(b), expected);
    }

    #[test]
    fn test_table_row_width() {
        let mut b = EscPosBuilder::new(32);
        b.table_row("Yerba Mate", "2", "15.00");
        let out = text_of(b);
        let row = out
            .lines()
            .find(|l| l.contains("Yerba Mate"))
            .expect("row printed");
        assert_eq!(row.len(), 32);
        assert!(row.ends_with("15.00"));
    }

    #[test]
    fn test_table_row_truncates_long_names() {
        let mut b = EscPosBuilder::new(32);
        b.table_row("A very long product description", "1", "1.00");
        let out = text_of(b);
        let row = out.lines().find(|l| l.starts_with("A very")).unwrap();
        assert_eq!(row.len(), 32);
    }

    #[test]
    fn test_cut_feed_bytes() {
        let mut b = EscPosBuilder::new(32);
        b.cut_feed(4);
        let raw = b.build_raw();
        assert_eq!(&raw[raw.len() - 4..], &[0x1D, 0x56, 0x42, 4]);
    }
}
