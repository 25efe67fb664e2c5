//! Wire layout of an ODID message pack as it appears inside a captured frame.
//!
//! Offsets in the `*_RANGE` / `*_OFFSET` constants below are relative to the
//! first payload byte of a slot (slot byte 1), not to the slot header.

use core::ops::Range;

/// ASD-STAN OUI followed by the ODID vendor-specific type, as found in a
/// WiFi beacon vendor IE.
pub const WIFI_BEACON_MARKER: &[u8] = &[0xFA, 0x0B, 0xBC, 0x0D];

/// Service-data AD type, 16-bit UUID 0xFFFA (little-endian) and the ODID
/// application code, as found in a BLE advertisement.
pub const BLE_SERVICE_DATA_MARKER: &[u8] = &[0x16, 0xFA, 0xFF, 0x0D];

/// Distance from the marker start to the message count byte.
pub const MESSAGE_COUNT_OFFSET: usize = 7;

/// Distance from the marker start to the first message slot.
pub const FIRST_SLOT_OFFSET: usize = 8;

/// Every message in a pack occupies exactly this many bytes.
pub const SLOT_LEN: usize = 25;

/// Payload bytes following the slot header byte.
pub const PAYLOAD_LEN: usize = SLOT_LEN - 1;

/// ASTM F3411 allows at most 9 messages per pack; leave headroom for
/// vendors that pad the count.
pub const MAX_PACK_MESSAGES: usize = 16;

// ── Basic ID ────────────────────────────────────────────────────────────

pub const BASIC_ID_TYPES_OFFSET: usize = 0;
pub const BASIC_ID_RANGE: Range<usize> = 1..21;
pub const BASIC_ID_UUID_RANGE: Range<usize> = 1..17;
pub const BASIC_ID_SESSION_TYPE_OFFSET: usize = 1;
pub const BASIC_ID_SESSION_CODE_RANGE: Range<usize> = 2..21;

pub const UAS_ID_LEN: usize = 20;
pub const SESSION_CODE_LEN: usize = 19;
/// 16 raw bytes rendered as two hex characters each.
pub const UUID_HEX_LEN: usize = 32;

// ── Location/Vector ─────────────────────────────────────────────────────

pub const LOCATION_FLAGS_OFFSET: usize = 0;
pub const LOCATION_DIRECTION_OFFSET: usize = 1;
pub const LOCATION_SPEED_OFFSET: usize = 2;
pub const LOCATION_VERTICAL_SPEED_OFFSET: usize = 3;
pub const LOCATION_LATITUDE_RANGE: Range<usize> = 4..8;
pub const LOCATION_LONGITUDE_RANGE: Range<usize> = 8..12;
pub const LOCATION_PRESSURE_ALTITUDE_RANGE: Range<usize> = 12..14;
pub const LOCATION_GEODETIC_ALTITUDE_RANGE: Range<usize> = 14..16;
pub const LOCATION_HEIGHT_RANGE: Range<usize> = 16..18;
pub const LOCATION_ACCURACY_OFFSET: usize = 18;
pub const LOCATION_BARO_SPEED_ACCURACY_OFFSET: usize = 19;
pub const LOCATION_TIMESTAMP_RANGE: Range<usize> = 20..22;
pub const LOCATION_TIMESTAMP_ACCURACY_OFFSET: usize = 22;

// ── Self-ID ─────────────────────────────────────────────────────────────

pub const SELF_ID_TYPE_OFFSET: usize = 0;
pub const SELF_ID_DESCRIPTION_RANGE: Range<usize> = 1..24;
pub const SELF_ID_DESCRIPTION_LEN: usize = 23;

// ── System ──────────────────────────────────────────────────────────────

pub const SYSTEM_FLAGS_OFFSET: usize = 0;
pub const SYSTEM_OPERATOR_LATITUDE_RANGE: Range<usize> = 1..5;
pub const SYSTEM_OPERATOR_LONGITUDE_RANGE: Range<usize> = 5..9;
pub const SYSTEM_AREA_COUNT_RANGE: Range<usize> = 9..11;
pub const SYSTEM_AREA_RADIUS_OFFSET: usize = 11;
pub const SYSTEM_AREA_CEILING_RANGE: Range<usize> = 12..14;
pub const SYSTEM_AREA_FLOOR_RANGE: Range<usize> = 14..16;
pub const SYSTEM_CLASSIFICATION_OFFSET: usize = 16;
pub const SYSTEM_OPERATOR_ALTITUDE_RANGE: Range<usize> = 17..19;
pub const SYSTEM_TIMESTAMP_RANGE: Range<usize> = 19..23;

/// Seconds between the Unix epoch and 2019-01-01T00:00:00Z.
pub const ODID_EPOCH_UNIX_SECS: u64 = 1_546_300_800;

// ── Operator ID ─────────────────────────────────────────────────────────

pub const OPERATOR_ID_TYPE_OFFSET: usize = 0;
pub const OPERATOR_ID_RANGE: Range<usize> = 1..21;
pub const OPERATOR_ID_LEN: usize = 20;
