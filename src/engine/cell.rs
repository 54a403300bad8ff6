//! Cell classifier.
//!
//! Pure predicates over a single symbol. Nothing here looks at the grid, and
//! every function is total: symbols outside the alphabet simply match no
//! category.

use crate::engine::types::Symbol;

/// Category of a symbol. Each symbol has exactly one. The passes dispatch on
/// the categories with behaviour of their own (blank, gates, swinches, port,
/// pivot); the rest only name what a symbol is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Blank,
    Crate,
    Block,
    Ramp,
    DoorLeft,
    DoorRight,
    /// 'A' / 'V'
    Swinch,
    /// 'W' / 'M'
    Winch,
    /// '+' / '-'
    Alu,
    Comparator,
    /// '>' / '<'
    Shift,
    /// ':' / ';'
    Teleport,
    Conveyor,
    Pivot,
    Port,
    /// 'C' / 'F'
    Destroyer,
    /// '~'
    Sink,
    Inert,
}

pub fn classify(c: Symbol) -> Category {
    match c {
        _ if is_blank(c) => Category::Blank,
        _ if is_crate(c) => Category::Crate,
        b'=' => Category::Block,
        b'/' | b'\\' => Category::Ramp,
        b'(' => Category::DoorLeft,
        b')' => Category::DoorRight,
        b'A' | b'V' => Category::Swinch,
        b'W' | b'M' => Category::Winch,
        b'+' | b'-' => Category::Alu,
        b'K' => Category::Comparator,
        b'>' | b'<' => Category::Shift,
        b':' | b';' => Category::Teleport,
        b'.' => Category::Conveyor,
        b'*' => Category::Pivot,
        b'O' => Category::Port,
        b'C' | b'F' => Category::Destroyer,
        b'~' => Category::Sink,
        _ => Category::Inert,
    }
}

/// Space, NUL and every control byte count as empty.
pub fn is_blank(c: Symbol) -> bool {
    c <= b' '
}

pub fn is_crate(c: Symbol) -> bool {
    matches!(c, b'0'..=b'9' | b'a'..=b'f')
}

pub fn is_ramp(c: Symbol) -> bool {
    c == b'/' || c == b'\\'
}

pub fn is_block(c: Symbol) -> bool {
    c == b'='
}

/// Whether a crate or gate can rest on this symbol.
pub fn is_support(c: Symbol) -> bool {
    is_crate(c)
        || matches!(
            c,
            b'=' | b'(' | b')' | b';' | b'/' | b'\\' | b':' | b'*' | b',' | b'>' | b'<'
                | b'O' | b'W' | b'M' | b'A' | b'V' | b'~' | b'.'
        )
}

/// Numeric payload of a crate, `None` for anything else.
pub fn crate_value(c: Symbol) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Crate symbol carrying `value`. Only the low nibble is used.
pub fn value_to_crate(value: u8) -> Symbol {
    match value & 0x0f {
        v @ 0..=9 => b'0' + v,
        v => b'a' + (v - 10),
    }
}

/// Digit weight used by the comparator. Agrees with `crate_value` on crates
/// and extends it to every other byte, so a comparator facing a non-crate
/// still compares against something.
pub fn digit_weight(c: Symbol) -> i32 {
    if c.is_ascii_digit() {
        i32::from(c) - i32::from(b'0')
    } else {
        i32::from(c) - i32::from(b'a') + 10
    }
}
