use core::ops::Range;

use super::error::DecodeError;
use super::layout;

/// Bounds-checked cursor over a raw frame, anchored at the marker.
pub struct PackReader<'a> {
    frame: &'a [u8],
    marker: usize,
}

impl<'a> PackReader<'a> {
    pub fn new(frame: &'a [u8], marker: usize) -> Self {
        Self { frame, marker }
    }

    pub fn message_count(&self) -> Result<u8, DecodeError> {
        let offset = self.marker.saturating_add(layout::MESSAGE_COUNT_OFFSET);
        self.frame
            .get(offset)
            .copied()
            .ok_or(DecodeError::TruncatedHeader {
                needed: offset.saturating_add(1),
                actual: self.frame.len(),
            })
    }

    /// The 25-byte window for slot `index`.
    pub fn slot(&self, index: usize) -> Result<SlotReader<'a>, DecodeError> {
        let start = index
            .checked_mul(layout::SLOT_LEN)
            .and_then(|o| o.checked_add(self.marker))
            .and_then(|o| o.checked_add(layout::FIRST_SLOT_OFFSET));
        let end = start.and_then(|s| s.checked_add(layout::SLOT_LEN));

        let window = match (start, end) {
            (Some(start), Some(end)) => self.frame.get(start..end),
            _ => None,
        };
        window
            .and_then(SlotReader::from_window)
            .ok_or(DecodeError::TruncatedSlot {
                slot: index,
                needed: end.unwrap_or(usize::MAX),
                actual: self.frame.len(),
            })
    }
}

/// A complete message slot: the header byte plus a fixed-size payload, so
/// reads at the layout offsets cannot leave the window.
#[derive(Clone, Copy)]
pub struct SlotReader<'a> {
    header: u8,
    payload: &'a [u8; layout::PAYLOAD_LEN],
}

impl<'a> SlotReader<'a> {
    fn from_window(window: &'a [u8]) -> Option<Self> {
        let (&header, rest) = window.split_first()?;
        let payload = rest.try_into().ok()?;
        Some(Self { header, payload })
    }

    /// Message type / protocol version byte.
    pub fn header(&self) -> u8 {
        self.header
    }

    pub fn payload(&self) -> &'a [u8; layout::PAYLOAD_LEN] {
        self.payload
    }

    pub fn read_u8(&self, offset: usize) -> u8 {
        self.payload.get(offset).copied().unwrap_or_default()
    }

    pub fn read_slice(&self, range: Range<usize>) -> &'a [u8] {
        self.payload.get(range).unwrap_or_default()
    }

    pub fn read_array<const N: usize>(&self, range: Range<usize>) -> [u8; N] {
        self.read_slice(range).try_into().unwrap_or([0; N])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_count_past_end() {
        let frame = [0u8; 10];
        let reader = PackReader::new(&frame, 3);
        assert_eq!(
            reader.message_count(),
            Err(DecodeError::TruncatedHeader {
                needed: 11,
                actual: 10
            })
        );
    }

    #[test]
    fn slot_window_exact_fit() {
        let mut frame = [0u8; 8 + 25];
        frame[8] = 0x42;
        frame[32] = 0x99;
        let reader = PackReader::new(&frame, 0);
        let slot = reader.slot(0).unwrap();
        assert_eq!(slot.header(), 0x42);
        assert_eq!(slot.read_u8(23), 0x99);
        assert!(reader.slot(1).is_err());
    }

    #[test]
    fn slot_one_byte_short() {
        let frame = [0u8; 8 + 24];
        let reader = PackReader::new(&frame, 0);
        assert_eq!(
            reader.slot(0).err(),
            Some(DecodeError::TruncatedSlot {
                slot: 0,
                needed: 33,
                actual: 32
            })
        );
    }

    #[test]
    fn huge_index_does_not_overflow() {
        let frame = [0u8; 64];
        let reader = PackReader::new(&frame, usize::MAX - 4);
        assert!(reader.slot(usize::MAX / 2).is_err());
        assert!(reader.message_count().is_err());
    }

    #[test]
    fn read_array_little_endian_span() {
        let mut frame = [0u8; 8 + 25];
        frame[9 + 4..9 + 8].copy_from_slice(&[1, 2, 3, 4]);
        let reader = PackReader::new(&frame, 0);
        let slot = reader.slot(0).unwrap();
        assert_eq!(slot.read_array::<4>(4..8), [1, 2, 3, 4]);
    }
}
