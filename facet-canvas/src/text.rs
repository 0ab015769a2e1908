//! Text case folding
//!
//! The status screen renders labels in capitals. The fold is ASCII-only by
//! contract; anything outside ASCII passes through unchanged and the
//! canvas treats the result as opaque text.

use heapless::String;

/// Uppercase a label into a fixed-capacity string, truncating if needed.
pub fn uppercased<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch.to_ascii_uppercase()).is_err() {
            break;
        }
    }
    out
}
