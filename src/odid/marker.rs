/// Find the lowest offset at which `marker` occurs in `frame`.
///
/// Byte-for-byte comparison only. Returns `None` when the marker is empty,
/// longer than the frame, or absent.
pub fn locate(frame: &[u8], marker: &[u8]) -> Option<usize> {
    if marker.is_empty() || marker.len() > frame.len() {
        return None;
    }
    frame.windows(marker.len()).position(|window| window == marker)
}
