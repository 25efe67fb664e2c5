/// JSON event protocol between a RidHound host and companion apps.
///
/// All messages are newline-delimited JSON (NDJSON).
/// Uses `heapless` types for no_std/no-alloc operation.
use heapless::{String, Vec};
use serde::Serialize;

use crate::odid::layout::MAX_PACK_MESSAGES;
use crate::odid::{DecodedMessage, MessageFlags};
use crate::scanner::RidSighting;

/// Maximum length for MAC address strings ("AA:BB:CC:DD:EE:FF")
pub type MacString = String<18>;

/// Maximum length for SSID / device name strings
pub type NameString = String<33>;

/// Decoded messages of one pack, as carried in a sighting
pub type MessageList = Vec<DecodedMessage, MAX_PACK_MESSAGES>;

/// Messages sent from the device to the companion app
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum DeviceMessage<'a> {
    /// Remote ID sighting
    #[serde(rename = "rid")]
    Rid {
        /// "wifi" or "ble"
        transport: &'static str,
        mac: &'a MacString,
        /// SSID or BLE local name, omitted when the capture carried none
        #[serde(skip_serializing_if = "name_is_empty")]
        name: &'a NameString,
        rssi: i8,
        /// WiFi channel, absent for BLE
        #[serde(skip_serializing_if = "Option::is_none")]
        ch: Option<u8>,
        /// WiFi band, absent for BLE
        #[serde(skip_serializing_if = "Option::is_none")]
        band: Option<&'static str>,
        /// Captured frame length in bytes
        len: usize,
        flags: &'a MessageFlags,
        msgs: &'a MessageList,
        /// Why decoding stopped early, if it did
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<&'static str>,
        /// Uptime in milliseconds when captured
        ts: u32,
    },
    /// Device status report
    #[serde(rename = "status")]
    Status {
        scanning: bool,
        /// Uptime in seconds
        uptime: u32,
        /// Sightings reported since boot
        sightings: u32,
        /// Firmware version
        version: &'static str,
    },
}

impl<'a> DeviceMessage<'a> {
    /// Build a `rid` event. `mac` must already be formatted with
    /// [`format_mac`](crate::filter::format_mac).
    pub fn rid(sighting: &'a RidSighting, mac: &'a MacString, ts: u32) -> Self {
        DeviceMessage::Rid {
            transport: sighting.transport.as_str(),
            mac,
            name: &sighting.name,
            rssi: sighting.rssi,
            ch: sighting.channel,
            band: sighting.band.map(|b| b.as_str()),
            len: sighting.frame_len,
            flags: &sighting.result.flags,
            msgs: &sighting.result.messages,
            error: sighting.result.error.map(|e| e.code()),
            ts,
        }
    }
}

fn name_is_empty(name: &&NameString) -> bool {
    name.is_empty()
}

/// Firmware version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound for the fields of a `rid` event other than `msgs`, with a
/// fully escaped name.
pub const RID_ENVELOPE_JSON_LEN: usize = 640;

/// Upper bound for one serialized decoded message plus its separator.
/// Location/Vector is the largest kind, under 450 bytes in practice.
pub const DECODED_MESSAGE_JSON_LEN: usize = 576;

/// Maximum size of a serialized JSON message: a `rid` event carrying a
/// pack filled to `MAX_PACK_MESSAGES`.
pub const MAX_MSG_LEN: usize =
    RID_ENVELOPE_JSON_LEN + MAX_PACK_MESSAGES * DECODED_MESSAGE_JSON_LEN;

/// Buffer type for serialized JSON messages
pub type MsgBuffer = Vec<u8, MAX_MSG_LEN>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::format_mac;
    use crate::odid::layout::WIFI_BEACON_MARKER;
    use crate::odid::{decode_frame, TypeRule};
    use crate::scanner::{Band, Transport};

    fn sighting(headers: &[u8], len: usize) -> RidSighting {
        let mut frame = vec![0u8; len];
        frame[0..4].copy_from_slice(WIFI_BEACON_MARKER);
        frame[7] = headers.len() as u8;
        for (i, &h) in headers.iter().enumerate() {
            let start = 8 + i * 25;
            if start < len {
                frame[start] = h;
            }
        }
        // Basic ID: serial number
        if len > 30 {
            frame[9] = 0x12;
            frame[10..14].copy_from_slice(b"SN01");
        }
        RidSighting {
            transport: Transport::WiFi,
            mac: [0x60, 0x60, 0x1F, 0x00, 0x00, 0x01],
            name: NameString::try_from("RID-BEACON").unwrap(),
            rssi: -48,
            channel: Some(6),
            band: Some(Band::Ghz2_4),
            frame_len: len,
            result: decode_frame(&frame, WIFI_BEACON_MARKER, TypeRule::OffsetNibble),
        }
    }

    fn to_json<'b>(msg: &DeviceMessage, buf: &'b mut [u8]) -> &'b str {
        let len = serde_json_core::to_slice(msg, buf).unwrap();
        core::str::from_utf8(&buf[..len]).unwrap()
    }

    #[test]
    fn serialize_status_message() {
        let msg = DeviceMessage::Status {
            scanning: true,
            uptime: 120,
            sightings: 7,
            version: "0.1.0",
        };
        let mut buf = [0u8; 256];
        let json = to_json(&msg, &mut buf);
        assert!(json.contains(r#""type":"status""#));
        assert!(json.contains(r#""scanning":true"#));
        assert!(json.contains(r#""sightings":7"#));
    }

    #[test]
    fn serialize_basic_id_sighting() {
        let s = sighting(&[0x02], 64);
        let mut mac = MacString::new();
        format_mac(&s.mac, &mut mac);
        let msg = DeviceMessage::rid(&s, &mac, 1000);

        let mut buf = [0u8; MAX_MSG_LEN];
        let json = to_json(&msg, &mut buf);
        assert!(json.contains(r#""type":"rid""#));
        assert!(json.contains(r#""transport":"wifi""#));
        assert!(json.contains(r#""mac":"60:60:1F:00:00:01""#));
        assert!(json.contains(r#""ch":6"#));
        assert!(json.contains(r#""band":"2.4GHz""#));
        assert!(json.contains(r#""name":"RID-BEACON""#));
        assert!(json.contains(r#""basic_id":true"#));
        assert!(json.contains(r#""type":"basic_id""#));
        assert!(json.contains(r#""serial":"SN010000000000000000""#));
        assert!(!json.contains("error"));
    }

    #[test]
    fn serialize_truncated_sighting_reports_error() {
        let s = sighting(&[0x02, 0x12, 0x42], 8 + 25 + 3);
        let mut mac = MacString::new();
        format_mac(&s.mac, &mut mac);
        let msg = DeviceMessage::rid(&s, &mac, 5);

        let mut buf = [0u8; MAX_MSG_LEN];
        let json = to_json(&msg, &mut buf);
        assert!(json.contains(r#""error":"truncated_slot""#));
        assert!(json.contains(r#""location_vector":false"#));
    }

    #[test]
    fn full_pack_fits_message_buffer() {
        let headers = [0x02, 0x12, 0x32, 0x42, 0x52];
        let s = sighting(&headers, 8 + headers.len() * 25);
        assert_eq!(s.result.messages.len(), 5);
        let mut mac = MacString::new();
        format_mac(&s.mac, &mut mac);
        let msg = DeviceMessage::rid(&s, &mac, u32::MAX);

        let mut buf = [0u8; MAX_MSG_LEN];
        let json = to_json(&msg, &mut buf);
        assert!(json.contains(r#""type":"location_vector""#));
        assert!(json.contains(r#""type":"system""#));
        assert!(json.contains(r#""type":"operator_id""#));
    }

    #[test]
    fn ble_sighting_omits_channel() {
        let mut s = sighting(&[0x52], 40);
        s.transport = Transport::Ble;
        s.channel = None;
        s.band = None;
        s.name.clear();
        let mut mac = MacString::new();
        format_mac(&s.mac, &mut mac);
        let msg = DeviceMessage::rid(&s, &mac, 0);

        let mut buf = [0u8; MAX_MSG_LEN];
        let json = to_json(&msg, &mut buf);
        assert!(json.contains(r#""transport":"ble""#));
        assert!(!json.contains(r#""ch""#));
        assert!(!json.contains(r#""band""#));
        assert!(!json.contains(r#""name""#));
    }

    #[test]
    fn version_is_semver() {
        let parts: heapless::Vec<&str, 4> = VERSION.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "VERSION should be semver (major.minor.patch)"
        );
        for part in &parts {
            assert!(part.parse::<u32>().is_ok(), "'{part}' is not a number");
        }
    }
}
