/// Output rendering for decoded sightings.
///
/// NDJSON framing for the companion stream, a hexdump of the raw capture
/// and a per-field report through the `log` facade. Sinks (serial, BLE
/// notifications, a terminal) are the host's concern.

use heapless::String;

use crate::odid::codec::hex_pair;
use crate::odid::message::{BasicId, LocationVector, OperatorId, SelfId, System};
use crate::odid::DecodedMessage;
use crate::protocol::DeviceMessage;
use crate::scanner::RidSighting;

/// Characters per byte in a hexdump ("AB ")
pub const HEXDUMP_CHARS_PER_BYTE: usize = 3;

// ── Serialization helpers ──────────────────────────────────────────────

/// Serialize a DeviceMessage to JSON bytes and write to the output buffer.
/// Returns the number of bytes written including the NDJSON newline, or
/// None if the line did not fit.
pub fn serialize_message(msg: &DeviceMessage, buf: &mut [u8]) -> Option<usize> {
    let len = serde_json_core::to_slice(msg, buf).ok()?;
    *buf.get_mut(len)? = b'\n';
    Some(len + 1)
}

// ── Hexdump ─────────────────────────────────────────────────────────────

/// Render `frame` as upper-case, space-separated hex pairs.
///
/// Returns `false` if `out` filled up before the whole frame was written;
/// what fit is kept.
pub fn format_hexdump<const N: usize>(frame: &[u8], out: &mut String<N>) -> bool {
    for &b in frame {
        if out.len() + HEXDUMP_CHARS_PER_BYTE > N {
            return false;
        }
        let [hi, lo] = hex_pair(b);
        for c in [hi, lo, b' '] {
            let _ = out.push(char::from(c));
        }
    }
    true
}

// ── Field report ────────────────────────────────────────────────────────

/// Log a one-line capture summary followed by one line per decoded message.
pub fn log_sighting(sighting: &RidSighting) {
    let mut mac = crate::protocol::MacString::new();
    crate::filter::format_mac(&sighting.mac, &mut mac);

    match (sighting.channel, sighting.band) {
        (Some(ch), Some(band)) => log::info!(
            "{} ch {:<3} ({:<6}) | {:<4} | {} | {} bytes",
            sighting.transport.as_str(),
            ch,
            band.as_str(),
            sighting.rssi,
            mac,
            sighting.frame_len
        ),
        (Some(ch), None) => log::info!(
            "{} ch {:<3} | {:<4} | {} | {} bytes",
            sighting.transport.as_str(),
            ch,
            sighting.rssi,
            mac,
            sighting.frame_len
        ),
        (None, _) => log::info!(
            "{} | {:<4} | {} | {} bytes",
            sighting.transport.as_str(),
            sighting.rssi,
            mac,
            sighting.frame_len
        ),
    }

    for message in &sighting.result.messages {
        match message {
            DecodedMessage::BasicId(m) => log_basic_id(m),
            DecodedMessage::LocationVector(m) => log_location(m),
            DecodedMessage::SelfId(m) => log_self_id(m),
            DecodedMessage::System(m) => log_system(m),
            DecodedMessage::OperatorId(m) => log_operator_id(m),
        }
    }

    if !sighting.name.is_empty() {
        log::info!("NAME: {}.", sighting.name);
    }

    if let Some(err) = sighting.result.error {
        log::warn!("{}", err);
    }
}

fn log_basic_id(m: &BasicId) {
    log::info!(
        "ID TYPE: {:?}. UA TYPE: {:?}. UAS ID: {}.",
        m.id_type,
        m.ua_type,
        m.uas_id
    );
}

fn log_location(m: &LocationVector) {
    log::info!(
        "STATUS: {:?}. HEIGHT TYPE: {:?}. HEADING: {} deg. SPEED: {} m/s. VERTICAL SPEED: {} m/s.",
        m.status,
        m.height_type,
        m.track_direction,
        m.speed,
        m.vertical_speed
    );
    log::info!(
        "LAT: {}. LON: {}. PRESSURE ALT: {} m. GEO ALT: {} m. HEIGHT: {} m.",
        m.latitude,
        m.longitude,
        m.pressure_altitude,
        m.geodetic_altitude,
        m.height
    );
    log::info!(
        "ACCURACY h/v/baro/speed: {}/{}/{}/{}. TIMESTAMP: {} s past hour (+/- {} s).",
        m.horizontal_accuracy,
        m.vertical_accuracy,
        m.baro_accuracy,
        m.speed_accuracy,
        m.seconds_past_hour(),
        m.timestamp_accuracy
    );
}

fn log_self_id(m: &SelfId) {
    log::info!(
        "SELF ID TYPE: {:?}. SELF ID: {}.",
        m.description_type,
        m.description
    );
}

fn log_system(m: &System) {
    log::info!(
        "OPERATOR LOCATION TYPE: {:?}. OPERATOR LAT: {}. OPERATOR LON: {}. OPERATOR ALT: {} m.",
        m.operator_location_type,
        m.operator_latitude,
        m.operator_longitude,
        m.operator_altitude
    );
    log::info!(
        "AREA COUNT: {}. RADIUS: {} m. CEILING: {} m. FLOOR: {} m. CATEGORY: {:?}. CLASS: {:?}. TIMESTAMP: {} (unix {}).",
        m.area_count,
        m.area_radius,
        m.area_ceiling,
        m.area_floor,
        m.ua_category,
        m.ua_class,
        m.timestamp,
        m.unix_timestamp()
    );
}

fn log_operator_id(m: &OperatorId) {
    log::info!(
        "OPERATOR ID TYPE: {}. OPERATOR ID: {}.",
        m.operator_id_type,
        m.operator_id
    );
}
