//! Message-pack decoder and the per-type slot decoders.
//!
//! `decode_frame` walks Start → HeaderRead → DecodeSlot* → Done. Any read
//! past the end of the frame stops the walk with a truncation error; slots
//! decoded before that point stay in the result.

use heapless::Vec;

use super::codec::{
    altitude, bit, coordinate, decode_ascii, decode_hex, ground_speed, high_nibble, i32_le,
    low_nibble, track_direction, u16_le, u32_le, vertical_speed,
};
use super::error::DecodeError;
use super::layout::{self, MAX_PACK_MESSAGES};
use super::marker::locate;
use super::message::{
    BasicId, DecodedMessage, HeightType, IdType, LocationVector, MessageFlags, MessageType,
    OperationalStatus, OperatorId, OperatorLocationType, SelfId, SelfIdType, System, UaCategory,
    UaClass, UaType, UasId,
};
use super::reader::{PackReader, SlotReader};

/// How the message type is derived from a slot's header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// `floor((header - 2) / 16)`. Header bytes 0x00 and 0x01 give -1 and
    /// are treated as unsupported.
    OffsetNibble,
    /// `header / 16`: the high nibble is the type, the low nibble the
    /// protocol version.
    HighNibble,
}

impl TypeRule {
    pub const fn message_index(self, header: u8) -> i16 {
        match self {
            TypeRule::OffsetNibble => (header as i16 - 2).div_euclid(16),
            TypeRule::HighNibble => (header / 16) as i16,
        }
    }

    pub const fn message_type(self, header: u8) -> Option<MessageType> {
        MessageType::from_index(self.message_index(header))
    }
}

/// Marker and dispatch settings for one decoder instance.
#[derive(Debug, Clone, Copy)]
pub struct DecoderConfig {
    /// Marker searched for in WiFi frames
    pub wifi_marker: &'static [u8],
    /// Marker searched for in BLE advertisement payloads
    pub ble_marker: &'static [u8],
    pub type_rule: TypeRule,
}

impl DecoderConfig {
    pub const fn new() -> Self {
        Self {
            wifi_marker: layout::WIFI_BEACON_MARKER,
            ble_marker: layout::BLE_SERVICE_DATA_MARKER,
            type_rule: TypeRule::OffsetNibble,
        }
    }

    pub fn decode_wifi(&self, frame: &[u8]) -> DecodeResult {
        decode_frame(frame, self.wifi_marker, self.type_rule)
    }

    pub fn decode_ble(&self, frame: &[u8]) -> DecodeResult {
        decode_frame(frame, self.ble_marker, self.type_rule)
    }

    /// Try the WiFi marker first, then the BLE marker.
    pub fn decode_any(&self, frame: &[u8]) -> DecodeResult {
        let result = self.decode_wifi(frame);
        if result.is_found() {
            result
        } else {
            self.decode_ble(frame)
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of decoding one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    /// Where the marker starts, or `None` if the frame carries no ODID data
    pub marker_offset: Option<usize>,
    pub messages: Vec<DecodedMessage, MAX_PACK_MESSAGES>,
    pub flags: MessageFlags,
    /// Set when decoding stopped early; `messages` holds what came before.
    pub error: Option<DecodeError>,
}

impl DecodeResult {
    pub const fn not_found() -> Self {
        Self {
            marker_offset: None,
            messages: Vec::new(),
            flags: MessageFlags::new(),
            error: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.marker_offset.is_some()
    }

    /// Marker found and every declared slot was read.
    pub fn is_complete(&self) -> bool {
        self.is_found() && self.error.is_none()
    }

    fn push(&mut self, message: DecodedMessage) -> Result<(), DecodeError> {
        let kind = message.kind();
        self.messages
            .push(message)
            .map_err(|_| DecodeError::TooManyMessages {
                capacity: MAX_PACK_MESSAGES,
            })?;
        self.flags.mark(kind);
        Ok(())
    }
}

/// Locate `marker` in `frame` and decode the message pack behind it.
pub fn decode_frame(frame: &[u8], marker: &[u8], rule: TypeRule) -> DecodeResult {
    match locate(frame, marker) {
        Some(offset) => decode_pack_at(frame, offset, rule),
        None => DecodeResult::not_found(),
    }
}

/// Decode the message pack whose marker starts at `offset`. The marker bytes
/// themselves are not checked; callers that already identified the element
/// (the BLE AD walk) use this to skip the search.
pub fn decode_pack_at(frame: &[u8], offset: usize, rule: TypeRule) -> DecodeResult {
    let mut result = DecodeResult::not_found();
    result.marker_offset = Some(offset);

    let reader = PackReader::new(frame, offset);
    if let Err(err) = decode_pack(&reader, rule, &mut result) {
        log::debug!("ODID pack at offset {}: {}", offset, err);
        result.error = Some(err);
    }
    log::debug!(
        "ODID pack at offset {}: {} message(s) decoded",
        offset,
        result.messages.len()
    );
    result
}

fn decode_pack(
    reader: &PackReader<'_>,
    rule: TypeRule,
    result: &mut DecodeResult,
) -> Result<(), DecodeError> {
    let count = reader.message_count()?;

    for index in 0..usize::from(count) {
        let slot = reader.slot(index)?;
        let Some(kind) = rule.message_type(slot.header()) else {
            log::trace!(
                "slot {}: unsupported header 0x{:02X}, skipped",
                index,
                slot.header()
            );
            continue;
        };

        let message = match kind {
            MessageType::BasicId => DecodedMessage::BasicId(decode_basic_id(&slot)),
            MessageType::LocationVector => {
                DecodedMessage::LocationVector(decode_location_vector(&slot))
            }
            MessageType::SelfId => DecodedMessage::SelfId(decode_self_id(&slot)),
            MessageType::System => DecodedMessage::System(decode_system(&slot)),
            MessageType::OperatorId => DecodedMessage::OperatorId(decode_operator_id(&slot)),
            MessageType::Authentication => {
                log::trace!("slot {}: authentication message not decoded", index);
                continue;
            }
        };
        result.push(message)?;
    }

    Ok(())
}

// ── Per-type decoders ───────────────────────────────────────────────────

pub fn decode_basic_id(slot: &SlotReader<'_>) -> BasicId {
    let types = slot.read_u8(layout::BASIC_ID_TYPES_OFFSET);
    let id_type = IdType::from_raw(high_nibble(types));

    let uas_id = match id_type {
        IdType::None => UasId::Null,
        IdType::SerialNumber => {
            UasId::Serial(decode_ascii(slot.read_slice(layout::BASIC_ID_RANGE)))
        }
        IdType::CaaRegistration => {
            UasId::CaaRegistration(decode_ascii(slot.read_slice(layout::BASIC_ID_RANGE)))
        }
        IdType::UtmAssigned => {
            UasId::UtmUuid(decode_hex(slot.read_slice(layout::BASIC_ID_UUID_RANGE)))
        }
        IdType::SpecificSession => UasId::SpecificSession {
            session_type: slot.read_u8(layout::BASIC_ID_SESSION_TYPE_OFFSET),
            code: decode_ascii(slot.read_slice(layout::BASIC_ID_SESSION_CODE_RANGE)),
        },
        IdType::Reserved(_) => UasId::Unavailable,
    };

    BasicId {
        id_type,
        ua_type: UaType::from_raw(low_nibble(types)),
        uas_id,
    }
}

pub fn decode_location_vector(slot: &SlotReader<'_>) -> LocationVector {
    // Bit 2 height type, bit 1 E/W segment, bit 0 speed multiplier.
    let flags = slot.read_u8(layout::LOCATION_FLAGS_OFFSET);
    let ew_direction = bit(flags, 1);
    let speed_multiplier = bit(flags, 0);

    let accuracy = slot.read_u8(layout::LOCATION_ACCURACY_OFFSET);
    let baro_speed = slot.read_u8(layout::LOCATION_BARO_SPEED_ACCURACY_OFFSET);
    let timestamp_accuracy = slot.read_u8(layout::LOCATION_TIMESTAMP_ACCURACY_OFFSET) % 15;

    LocationVector {
        status: OperationalStatus::from_raw(high_nibble(flags)),
        height_type: HeightType::from_flag(bit(flags, 2)),
        ew_direction,
        speed_multiplier,
        track_direction: track_direction(
            slot.read_u8(layout::LOCATION_DIRECTION_OFFSET),
            ew_direction,
        ),
        speed: ground_speed(slot.read_u8(layout::LOCATION_SPEED_OFFSET), speed_multiplier),
        vertical_speed: vertical_speed(slot.read_u8(layout::LOCATION_VERTICAL_SPEED_OFFSET)),
        latitude: coordinate(i32_le(slot.read_array(layout::LOCATION_LATITUDE_RANGE))),
        longitude: coordinate(i32_le(slot.read_array(layout::LOCATION_LONGITUDE_RANGE))),
        pressure_altitude: altitude(u16_le(
            slot.read_array(layout::LOCATION_PRESSURE_ALTITUDE_RANGE),
        )),
        geodetic_altitude: altitude(u16_le(
            slot.read_array(layout::LOCATION_GEODETIC_ALTITUDE_RANGE),
        )),
        height: altitude(u16_le(slot.read_array(layout::LOCATION_HEIGHT_RANGE))),
        horizontal_accuracy: low_nibble(accuracy),
        vertical_accuracy: high_nibble(accuracy),
        baro_accuracy: high_nibble(baro_speed),
        speed_accuracy: low_nibble(baro_speed),
        timestamp: u16_le(slot.read_array(layout::LOCATION_TIMESTAMP_RANGE)),
        timestamp_accuracy: f32::from(timestamp_accuracy) * 0.1,
    }
}

pub fn decode_self_id(slot: &SlotReader<'_>) -> SelfId {
    SelfId {
        description_type: SelfIdType::from_raw(slot.read_u8(layout::SELF_ID_TYPE_OFFSET)),
        description: decode_ascii(slot.read_slice(layout::SELF_ID_DESCRIPTION_RANGE)),
    }
}

pub fn decode_system(slot: &SlotReader<'_>) -> System {
    let classification = slot.read_u8(layout::SYSTEM_CLASSIFICATION_OFFSET);

    System {
        operator_location_type: OperatorLocationType::from_raw(
            slot.read_u8(layout::SYSTEM_FLAGS_OFFSET),
        ),
        operator_latitude: coordinate(i32_le(
            slot.read_array(layout::SYSTEM_OPERATOR_LATITUDE_RANGE),
        )),
        operator_longitude: coordinate(i32_le(
            slot.read_array(layout::SYSTEM_OPERATOR_LONGITUDE_RANGE),
        )),
        area_count: u16_le(slot.read_array(layout::SYSTEM_AREA_COUNT_RANGE)),
        area_radius: u16::from(slot.read_u8(layout::SYSTEM_AREA_RADIUS_OFFSET)) * 10,
        area_ceiling: altitude(u16_le(slot.read_array(layout::SYSTEM_AREA_CEILING_RANGE))),
        area_floor: altitude(u16_le(slot.read_array(layout::SYSTEM_AREA_FLOOR_RANGE))),
        ua_category: UaCategory::from_raw(high_nibble(classification)),
        ua_class: UaClass::from_raw(low_nibble(classification)),
        operator_altitude: altitude(u16_le(
            slot.read_array(layout::SYSTEM_OPERATOR_ALTITUDE_RANGE),
        )),
        timestamp: u32_le(slot.read_array(layout::SYSTEM_TIMESTAMP_RANGE)),
    }
}

pub fn decode_operator_id(slot: &SlotReader<'_>) -> OperatorId {
    OperatorId {
        operator_id_type: slot.read_u8(layout::OPERATOR_ID_TYPE_OFFSET),
        operator_id: decode_ascii(slot.read_slice(layout::OPERATOR_ID_RANGE)),
    }
}
