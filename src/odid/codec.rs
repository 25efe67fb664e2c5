//! Field codec: pure conversions from raw ODID byte spans to typed values.
//!
//! Every function here is total over its input width. Bounds are enforced
//! one level up, by [`SlotReader`](super::reader::SlotReader), which only
//! hands out exact-width arrays.

use heapless::String;

/// Placeholder for byte values outside the identifier alphabet.
pub const ASCII_PLACEHOLDER: char = '_';

/// Identifier alphabet indexed by raw byte value.
///
/// Digits, upper-case letters, `-` and `.` map to themselves; a zero byte
/// (padding) renders as `'0'`; anything else becomes the placeholder.
static ASCII_TABLE: [u8; 256] = build_ascii_table();

const fn build_ascii_table() -> [u8; 256] {
    let mut table = [ASCII_PLACEHOLDER as u8; 256];
    table[0] = b'0';
    table[b'-' as usize] = b'-';
    table[b'.' as usize] = b'.';
    let mut i = b'0';
    while i <= b'9' {
        table[i as usize] = i;
        i += 1;
    }
    let mut i = b'A';
    while i <= b'Z' {
        table[i as usize] = i;
        i += 1;
    }
    table
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

// ── Little-endian assembly ──────────────────────────────────────────────

#[inline]
pub const fn u16_le(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

#[inline]
pub const fn u32_le(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

#[inline]
pub const fn i32_le(bytes: [u8; 4]) -> i32 {
    i32::from_le_bytes(bytes)
}

// ── Scaled values ───────────────────────────────────────────────────────

/// Half-metre resolution with a -1000 m offset. Shared by every altitude
/// and height field in Location/Vector and System messages.
#[inline]
pub fn altitude(raw: u16) -> f32 {
    f32::from(raw) * 0.5 - 1000.0
}

/// Ground speed in m/s. The multiplier flag selects the high range.
#[inline]
pub fn ground_speed(raw: u8, high_range: bool) -> f32 {
    if high_range {
        f32::from(raw) * 0.75 + 63.75
    } else {
        f32::from(raw) * 0.25
    }
}

/// Vertical speed in m/s, positive up.
#[inline]
pub fn vertical_speed(raw: u8) -> f32 {
    f32::from(raw as i8) * 0.5
}

/// Latitude or longitude in degrees.
#[inline]
pub fn coordinate(raw: i32) -> f64 {
    f64::from(raw) / 10_000_000.0
}

/// Track direction in degrees, widened before the east/west segment offset
/// is applied so that out-of-range raw values are reported rather than
/// wrapped.
#[inline]
pub fn track_direction(raw: u8, west_segment: bool) -> u16 {
    let direction = u16::from(raw);
    if west_segment {
        direction + 180
    } else {
        direction
    }
}

// ── Bit fields ──────────────────────────────────────────────────────────

#[inline]
pub const fn high_nibble(byte: u8) -> u8 {
    byte / 16
}

#[inline]
pub const fn low_nibble(byte: u8) -> u8 {
    byte % 16
}

/// Value of bit `n` (0 = least significant).
#[inline]
pub const fn bit(byte: u8, n: u32) -> bool {
    (byte >> n) & 1 == 1
}

// ── Lookup-table strings ────────────────────────────────────────────────

#[inline]
pub fn ascii_char(byte: u8) -> char {
    char::from(ASCII_TABLE[usize::from(byte)])
}

/// Two upper-case hex characters for `byte`.
#[inline]
pub const fn hex_pair(byte: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(byte >> 4) as usize],
        HEX_DIGITS[(byte & 0x0F) as usize],
    ]
}

/// Map each byte through the identifier alphabet. Output is exactly
/// `min(bytes.len(), N)` characters.
pub fn decode_ascii<const N: usize>(bytes: &[u8]) -> String<N> {
    let mut out = String::new();
    for &b in bytes.iter().take(N) {
        // Table output is single-byte ASCII, so capacity is checked by take().
        let _ = out.push(ascii_char(b));
    }
    out
}

/// Render raw bytes as contiguous upper-case hex, two characters per byte.
pub fn decode_hex<const N: usize>(bytes: &[u8]) -> String<N> {
    let mut out = String::new();
    for &b in bytes.iter().take(N / 2) {
        for c in hex_pair(b) {
            let _ = out.push(char::from(c));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_altitude(metres: f32) -> u16 {
        ((metres + 1000.0) * 2.0) as u16
    }

    // ── Scaling ─────────────────────────────────────────────────────

    #[test]
    fn altitude_known_values() {
        assert_eq!(altitude(0), -1000.0);
        assert_eq!(altitude(2000), 0.0);
        assert_eq!(altitude(2001), 0.5);
        assert_eq!(altitude(u16::MAX), 31767.5);
    }

    #[test]
    fn altitude_round_trips_every_raw_value() {
        for raw in 0..=u16::MAX {
            assert_eq!(encode_altitude(altitude(raw)), raw, "raw {raw}");
        }
    }

    #[test]
    fn ground_speed_ranges() {
        assert_eq!(ground_speed(0, false), 0.0);
        assert_eq!(ground_speed(255, false), 63.75);
        assert_eq!(ground_speed(0, true), 63.75);
        assert_eq!(ground_speed(255, true), 255.0);
        assert_eq!(ground_speed(40, false), 10.0);
    }

    #[test]
    fn vertical_speed_is_signed() {
        assert_eq!(vertical_speed(10), 5.0);
        assert_eq!(vertical_speed(0xF6), -5.0);
        assert_eq!(vertical_speed(0x80), -64.0);
        assert_eq!(vertical_speed(0x7F), 63.5);
    }

    #[test]
    fn coordinate_scaling() {
        assert_eq!(coordinate(0), 0.0);
        assert!((coordinate(473_977_420) - 47.397742).abs() < 1e-9);
        assert!((coordinate(-1_223_456_789) + 122.3456789).abs() < 1e-9);
    }

    #[test]
    fn little_endian_assembly() {
        assert_eq!(u16_le([0x34, 0x12]), 0x1234);
        assert_eq!(u32_le([0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
        assert_eq!(i32_le([0xFF, 0xFF, 0xFF, 0xFF]), -1);
        assert_eq!(i32_le([0x00, 0x00, 0x00, 0x80]), i32::MIN);
    }

    #[test]
    fn track_direction_widens() {
        assert_eq!(track_direction(90, false), 90);
        assert_eq!(track_direction(90, true), 270);
        assert_eq!(track_direction(255, true), 435);
    }

    // ── Bit fields ──────────────────────────────────────────────────

    #[test]
    fn nibbles_and_bits() {
        assert_eq!(high_nibble(0xA7), 0x0A);
        assert_eq!(low_nibble(0xA7), 0x07);
        assert!(bit(0b0000_0100, 2));
        assert!(!bit(0b0000_0100, 1));
        assert!(bit(0x80, 7));
    }

    #[test]
    fn bit_matches_division_modulo_extraction() {
        for b in 0..=u8::MAX {
            assert_eq!(bit(b, 2), (b % 8) / 4 == 1);
            assert_eq!(bit(b, 1), (b % 4) / 2 == 1);
            assert_eq!(bit(b, 0), b % 2 == 1);
        }
    }

    // ── Lookup tables ───────────────────────────────────────────────

    #[test]
    fn ascii_table_alphabet() {
        assert_eq!(ascii_char(0), '0');
        assert_eq!(ascii_char(b'-'), '-');
        assert_eq!(ascii_char(b'.'), '.');
        assert_eq!(ascii_char(b'7'), '7');
        assert_eq!(ascii_char(b'Q'), 'Q');
        assert_eq!(ascii_char(b'q'), ASCII_PLACEHOLDER);
        assert_eq!(ascii_char(b' '), ASCII_PLACEHOLDER);
    }

    #[test]
    fn ascii_table_is_total() {
        for b in 0..=u8::MAX {
            let c = ascii_char(b);
            assert!(c.is_ascii_graphic(), "byte {b} mapped to {c:?}");
        }
    }

    #[test]
    fn hex_table_is_total() {
        for b in 0..=u8::MAX {
            let [hi, lo] = hex_pair(b);
            assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
            let text = [hi, lo];
            let parsed = u8::from_str_radix(core::str::from_utf8(&text).unwrap(), 16).unwrap();
            assert_eq!(parsed, b);
        }
    }

    #[test]
    fn decode_ascii_fixed_width() {
        let s: String<20> = decode_ascii(b"ABCDEFGHIJ0123456789");
        assert_eq!(s.as_str(), "ABCDEFGHIJ0123456789");

        let padded: String<8> = decode_ascii(&[b'X', b'1', 0, 0, 0, 0, 0, 0]);
        assert_eq!(padded.as_str(), "X1000000");
    }

    #[test]
    fn decode_hex_uuid() {
        let bytes: [u8; 16] = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD,
            0xEE, 0xFF,
        ];
        let s: String<32> = decode_hex(&bytes);
        assert_eq!(s.as_str(), "00112233445566778899AABBCCDDEEFF");
    }
}
