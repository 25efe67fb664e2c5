//! Typed ODID records produced by the per-type decoders.
//!
//! Enumerated fields only check range membership: raw values outside the
//! ASTM F3411 tables land in a `Reserved(raw)` variant instead of failing.

use core::fmt;

use heapless::String;
use serde::Serialize;

use super::layout::{
    ODID_EPOCH_UNIX_SECS, OPERATOR_ID_LEN, SELF_ID_DESCRIPTION_LEN, SESSION_CODE_LEN, UAS_ID_LEN,
    UUID_HEX_LEN,
};

/// Serial numbers, CAA registrations and operator IDs
pub type IdString = String<UAS_ID_LEN>;

/// UTM-assigned UUID rendered as 32 hex characters
pub type UuidString = String<UUID_HEX_LEN>;

pub type SessionCode = String<SESSION_CODE_LEN>;

pub type DescriptionString = String<SELF_ID_DESCRIPTION_LEN>;

pub type OperatorIdString = String<OPERATOR_ID_LEN>;

/// ODID message kinds that can occupy a pack slot.
///
/// Authentication is recognized so that dispatch stays exhaustive, but it
/// is never decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    BasicId,
    LocationVector,
    Authentication,
    SelfId,
    System,
    OperatorId,
}

impl MessageType {
    /// Map a computed type index to a message kind. Negative and
    /// unassigned indices yield `None`.
    pub const fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(MessageType::BasicId),
            1 => Some(MessageType::LocationVector),
            2 => Some(MessageType::Authentication),
            3 => Some(MessageType::SelfId),
            4 => Some(MessageType::System),
            5 => Some(MessageType::OperatorId),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            MessageType::BasicId => "basic_id",
            MessageType::LocationVector => "location_vector",
            MessageType::Authentication => "authentication",
            MessageType::SelfId => "self_id",
            MessageType::System => "system",
            MessageType::OperatorId => "operator_id",
        }
    }
}

// ── Enumerated fields ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdType {
    None,
    SerialNumber,
    CaaRegistration,
    UtmAssigned,
    SpecificSession,
    Reserved(u8),
}

impl IdType {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => IdType::None,
            1 => IdType::SerialNumber,
            2 => IdType::CaaRegistration,
            3 => IdType::UtmAssigned,
            4 => IdType::SpecificSession,
            other => IdType::Reserved(other),
        }
    }
}

/// Airframe type. The 4-bit field covers all sixteen values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UaType {
    None,
    Aeroplane,
    HelicopterOrMultirotor,
    Gyroplane,
    HybridLift,
    Ornithopter,
    Glider,
    Kite,
    FreeBalloon,
    CaptiveBalloon,
    Airship,
    FreeFallParachute,
    Rocket,
    TetheredPoweredAircraft,
    GroundObstacle,
    Other,
}

impl UaType {
    pub const fn from_raw(raw: u8) -> Self {
        match raw & 0x0F {
            0 => UaType::None,
            1 => UaType::Aeroplane,
            2 => UaType::HelicopterOrMultirotor,
            3 => UaType::Gyroplane,
            4 => UaType::HybridLift,
            5 => UaType::Ornithopter,
            6 => UaType::Glider,
            7 => UaType::Kite,
            8 => UaType::FreeBalloon,
            9 => UaType::CaptiveBalloon,
            10 => UaType::Airship,
            11 => UaType::FreeFallParachute,
            12 => UaType::Rocket,
            13 => UaType::TetheredPoweredAircraft,
            14 => UaType::GroundObstacle,
            _ => UaType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Undeclared,
    Ground,
    Airborne,
    Emergency,
    RemoteIdSystemFailure,
    Reserved(u8),
}

impl OperationalStatus {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => OperationalStatus::Undeclared,
            1 => OperationalStatus::Ground,
            2 => OperationalStatus::Airborne,
            3 => OperationalStatus::Emergency,
            4 => OperationalStatus::RemoteIdSystemFailure,
            other => OperationalStatus::Reserved(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightType {
    AboveTakeoff,
    AboveGroundLevel,
}

impl HeightType {
    pub const fn from_flag(flag: bool) -> Self {
        if flag {
            HeightType::AboveGroundLevel
        } else {
            HeightType::AboveTakeoff
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfIdType {
    Text,
    Emergency,
    ExtendedStatus,
    Reserved(u8),
}

impl SelfIdType {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => SelfIdType::Text,
            1 => SelfIdType::Emergency,
            2 => SelfIdType::ExtendedStatus,
            other => SelfIdType::Reserved(other),
        }
    }
}

/// Source of the operator position in a System message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorLocationType {
    Takeoff,
    LiveGnss,
    Fixed,
}

impl OperatorLocationType {
    /// The decoder reduces the raw field modulo 3, so every input maps.
    pub const fn from_raw(raw: u8) -> Self {
        match raw % 3 {
            0 => OperatorLocationType::Takeoff,
            1 => OperatorLocationType::LiveGnss,
            _ => OperatorLocationType::Fixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UaCategory {
    Undeclared,
    Open,
    Specific,
    Certified,
    Reserved(u8),
}

impl UaCategory {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => UaCategory::Undeclared,
            1 => UaCategory::Open,
            2 => UaCategory::Specific,
            3 => UaCategory::Certified,
            other => UaCategory::Reserved(other),
        }
    }
}

/// EU UA class. `Class0`..`Class6` correspond to raw values 1..7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UaClass {
    Undeclared,
    Class0,
    Class1,
    Class2,
    Class3,
    Class4,
    Class5,
    Class6,
    Reserved(u8),
}

impl UaClass {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => UaClass::Undeclared,
            1 => UaClass::Class0,
            2 => UaClass::Class1,
            3 => UaClass::Class2,
            4 => UaClass::Class3,
            5 => UaClass::Class4,
            6 => UaClass::Class5,
            7 => UaClass::Class6,
            other => UaClass::Reserved(other),
        }
    }
}

// ── Records ─────────────────────────────────────────────────────────────

/// The identifier carried by a Basic ID message, shaped by its ID type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UasId {
    /// No ID declared. Rendered as twenty `'0'` characters.
    Null,
    Serial(IdString),
    CaaRegistration(IdString),
    UtmUuid(UuidString),
    SpecificSession {
        session_type: u8,
        code: SessionCode,
    },
    /// Reserved ID type; the ID bytes have no defined encoding.
    Unavailable,
}

impl fmt::Display for UasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UasId::Null => {
                for _ in 0..UAS_ID_LEN {
                    f.write_str("0")?;
                }
                Ok(())
            }
            UasId::Serial(id) | UasId::CaaRegistration(id) => f.write_str(id),
            UasId::UtmUuid(uuid) => f.write_str(uuid),
            UasId::SpecificSession { session_type, code } => {
                write!(f, "{session_type}:{code}")
            }
            UasId::Unavailable => f.write_str("unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicId {
    pub id_type: IdType,
    pub ua_type: UaType,
    pub uas_id: UasId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationVector {
    pub status: OperationalStatus,
    pub height_type: HeightType,
    /// East/west segment flag: direction is in the 180..360 half.
    pub ew_direction: bool,
    /// Speed multiplier flag: ground speed uses the high range encoding.
    pub speed_multiplier: bool,
    /// Degrees clockwise from true north.
    pub track_direction: u16,
    /// Ground speed, m/s
    pub speed: f32,
    /// m/s, positive up
    pub vertical_speed: f32,
    pub latitude: f64,
    pub longitude: f64,
    /// Metres
    pub pressure_altitude: f32,
    /// Metres
    pub geodetic_altitude: f32,
    /// Metres, reference given by `height_type`
    pub height: f32,
    pub horizontal_accuracy: u8,
    pub vertical_accuracy: u8,
    pub baro_accuracy: u8,
    pub speed_accuracy: u8,
    /// Tenths of a second since the start of the current UTC hour
    pub timestamp: u16,
    /// Seconds
    pub timestamp_accuracy: f32,
}

impl LocationVector {
    /// Seconds since the start of the current UTC hour.
    pub fn seconds_past_hour(&self) -> f32 {
        f32::from(self.timestamp) / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfId {
    pub description_type: SelfIdType,
    pub description: DescriptionString,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct System {
    pub operator_location_type: OperatorLocationType,
    pub operator_latitude: f64,
    pub operator_longitude: f64,
    pub area_count: u16,
    /// Metres
    pub area_radius: u16,
    /// Metres
    pub area_ceiling: f32,
    /// Metres
    pub area_floor: f32,
    pub ua_category: UaCategory,
    pub ua_class: UaClass,
    /// Metres
    pub operator_altitude: f32,
    /// Seconds since 2019-01-01T00:00:00Z
    pub timestamp: u32,
}

impl System {
    pub fn unix_timestamp(&self) -> u64 {
        ODID_EPOCH_UNIX_SECS + u64::from(self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorId {
    pub operator_id_type: u8,
    pub operator_id: OperatorIdString,
}

/// One decoded pack slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecodedMessage {
    BasicId(BasicId),
    LocationVector(LocationVector),
    SelfId(SelfId),
    System(System),
    OperatorId(OperatorId),
}

impl DecodedMessage {
    pub const fn kind(&self) -> MessageType {
        match self {
            DecodedMessage::BasicId(_) => MessageType::BasicId,
            DecodedMessage::LocationVector(_) => MessageType::LocationVector,
            DecodedMessage::SelfId(_) => MessageType::SelfId,
            DecodedMessage::System(_) => MessageType::System,
            DecodedMessage::OperatorId(_) => MessageType::OperatorId,
        }
    }
}

/// Which message kinds were decoded from one pack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageFlags {
    pub basic_id: bool,
    pub location_vector: bool,
    /// Reserved: Authentication messages are never decoded.
    pub authentication: bool,
    pub self_id: bool,
    pub system: bool,
    pub operator_id: bool,
}

impl MessageFlags {
    pub const fn new() -> Self {
        Self {
            basic_id: false,
            location_vector: false,
            authentication: false,
            self_id: false,
            system: false,
            operator_id: false,
        }
    }

    pub fn mark(&mut self, kind: MessageType) {
        match kind {
            MessageType::BasicId => self.basic_id = true,
            MessageType::LocationVector => self.location_vector = true,
            MessageType::SelfId => self.self_id = true,
            MessageType::System => self.system = true,
            MessageType::OperatorId => self.operator_id = true,
            MessageType::Authentication => {}
        }
    }

    pub fn contains(&self, kind: MessageType) -> bool {
        match kind {
            MessageType::BasicId => self.basic_id,
            MessageType::LocationVector => self.location_vector,
            MessageType::Authentication => self.authentication,
            MessageType::SelfId => self.self_id,
            MessageType::System => self.system,
            MessageType::OperatorId => self.operator_id,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.basic_id
            || self.location_vector
            || self.authentication
            || self.self_id
            || self.system
            || self.operator_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_indices() {
        assert_eq!(MessageType::from_index(0), Some(MessageType::BasicId));
        assert_eq!(MessageType::from_index(2), Some(MessageType::Authentication));
        assert_eq!(MessageType::from_index(5), Some(MessageType::OperatorId));
        assert_eq!(MessageType::from_index(-1), None);
        assert_eq!(MessageType::from_index(6), None);
        assert_eq!(MessageType::from_index(15), None);
    }

    #[test]
    fn flags_ignore_authentication() {
        let mut flags = MessageFlags::new();
        flags.mark(MessageType::Authentication);
        assert!(flags.is_empty());
        flags.mark(MessageType::System);
        assert!(flags.contains(MessageType::System));
        assert!(!flags.contains(MessageType::BasicId));
        assert!(!flags.is_empty());
    }

    #[test]
    fn null_uas_id_renders_twenty_zeros() {
        let mut s = String::<32>::new();
        core::fmt::write(&mut s, format_args!("{}", UasId::Null)).unwrap();
        assert_eq!(s.as_str(), "00000000000000000000");
    }

    #[test]
    fn reserved_enum_values_are_kept() {
        assert_eq!(IdType::from_raw(9), IdType::Reserved(9));
        assert_eq!(OperationalStatus::from_raw(7), OperationalStatus::Reserved(7));
        assert_eq!(UaClass::from_raw(8), UaClass::Reserved(8));
        assert_eq!(UaType::from_raw(15), UaType::Other);
    }

    #[test]
    fn system_unix_timestamp() {
        let system = System {
            operator_location_type: OperatorLocationType::Takeoff,
            operator_latitude: 0.0,
            operator_longitude: 0.0,
            area_count: 1,
            area_radius: 0,
            area_ceiling: -1000.0,
            area_floor: -1000.0,
            ua_category: UaCategory::Undeclared,
            ua_class: UaClass::Undeclared,
            operator_altitude: -1000.0,
            timestamp: 86_400,
        };
        assert_eq!(system.unix_timestamp(), 1_546_387_200);
    }
}
