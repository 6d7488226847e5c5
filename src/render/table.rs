use std::fmt::Write;

use crate::core::field::Field2;

/// Fixed-width text table, one line per row, 1-based headers.
pub fn format_field(field: &Field2, precision: usize) -> String {
    let width = precision + 4;
    let mut out = String::new();
    let _ = write!(out, "{:>4}", "");
    for c in 1..=field.cols() {
        let _ = write!(out, " {c:>width$}");
    }
    out.push('\n');
    for r in 0..field.rows() {
        let _ = write!(out, "{:>4}", r + 1);
        for &v in field.row(r) {
            let _ = write!(out, " {v:>width$.precision$}");
        }
        out.push('\n');
    }
    out
}
