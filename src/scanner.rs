/// Capture adapters for WiFi frames and BLE advertisements.
///
/// WiFi: ieee80211 crate for management frame parsing, raw header fallback
/// for anything it does not model (NAN action frames, data frames).
/// BLE: AD structure walk to find ODID service data (UUID 0xFFFA).
///
/// Both paths hand the raw capture to the ODID decoder and wrap the result
/// with its radio metadata as a [`RidSighting`]. Radio bring-up and the
/// scan loop belong to the host; nothing here blocks or allocates.

use core::ops::Range;

use ieee80211::match_frames;
use ieee80211::mgmt_frame::{BeaconFrame, ProbeRequestFrame, ProbeResponseFrame};

use crate::filter::FilterConfig;
use crate::odid::{decode_pack_at, DecodeResult};
use crate::protocol::NameString;

/// 16-bit service UUID assigned to ASTM Remote ID
pub const ODID_SERVICE_UUID_16: u16 = 0xFFFA;

/// Application code following the UUID in ODID service data
pub const ODID_APP_CODE: u8 = 0x0D;

/// Radio the capture came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    WiFi,
    Ble,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::WiFi => "wifi",
            Transport::Ble => "ble",
        }
    }
}

/// WiFi band a capture was received on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Ghz2_4,
    Ghz5,
    Ghz6,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Ghz2_4 => "2.4GHz",
            Band::Ghz5 => "5GHz",
            Band::Ghz6 => "6GHz",
        }
    }

    /// Band of a centre frequency in MHz, `None` outside the WiFi bands.
    pub fn from_frequency(mhz: u16) -> Option<Self> {
        match mhz {
            2412..=2484 => Some(Band::Ghz2_4),
            5160..=5885 => Some(Band::Ghz5),
            5935..=7115 => Some(Band::Ghz6),
            _ => None,
        }
    }
}

/// Channel number of a centre frequency in MHz.
pub fn channel_from_frequency(mhz: u16) -> Option<u8> {
    let channel = match Band::from_frequency(mhz)? {
        Band::Ghz2_4 if mhz == 2484 => 14,
        Band::Ghz2_4 => (mhz - 2407) / 5,
        Band::Ghz5 => (mhz - 5000) / 5,
        Band::Ghz6 if mhz == 5935 => 2,
        Band::Ghz6 => (mhz - 5950) / 5,
    };
    u8::try_from(channel).ok()
}

/// WiFi frame type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Beacon,
    ProbeRequest,
    ProbeResponse,
    /// Management action frame (WiFi NAN Remote ID)
    Action,
    Data,
    Other,
}

impl FrameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameType::Beacon => "beacon",
            FrameType::ProbeRequest => "probe_req",
            FrameType::ProbeResponse => "probe_resp",
            FrameType::Action => "action",
            FrameType::Data => "data",
            FrameType::Other => "other",
        }
    }
}

/// Header facts of a captured 802.11 frame
#[derive(Debug, Clone)]
pub struct WiFiFrameInfo {
    pub mac: [u8; 6],
    pub ssid: NameString,
    pub rssi: i8,
    pub channel: u8,
    pub frame_type: FrameType,
}

/// Header facts of a BLE advertisement
#[derive(Debug, Clone)]
pub struct BleAdvInfo {
    pub mac: [u8; 6],
    pub name: NameString,
    pub rssi: i8,
    /// Span of the ODID service-data AD structure, from its type byte to
    /// its last data byte
    pub odid_service: Option<Range<usize>>,
}

/// A captured frame that carried ODID data, with its decode result.
#[derive(Debug, Clone)]
pub struct RidSighting {
    pub transport: Transport,
    pub mac: [u8; 6],
    /// SSID or BLE local name; empty when the capture carried none
    pub name: NameString,
    pub rssi: i8,
    /// WiFi channel; `None` for BLE
    pub channel: Option<u8>,
    /// WiFi band; `None` for BLE
    pub band: Option<Band>,
    pub frame_len: usize,
    pub result: DecodeResult,
}

/// Parse a raw 802.11 frame header using the ieee80211 crate.
///
/// Beacons and probes are parsed with SSID extraction. Other frames fall
/// through to a raw header parse that reads the transmitter MAC
/// (Address 2, offset 10).
pub fn parse_wifi_frame(frame: &[u8], rssi: i8, channel: u8) -> Option<WiFiFrameInfo> {
    let result = match_frames! {
        frame,
        beacon = BeaconFrame<'_> => {
            build_wifi_info(
                &beacon.header.transmitter_address.0,
                beacon.body.ssid().unwrap_or(""),
                rssi, channel, FrameType::Beacon,
            )
        }
        probe_req = ProbeRequestFrame<'_> => {
            build_wifi_info(
                &probe_req.header.transmitter_address.0,
                probe_req.body.ssid().unwrap_or(""),
                rssi, channel, FrameType::ProbeRequest,
            )
        }
        probe_resp = ProbeResponseFrame<'_> => {
            build_wifi_info(
                &probe_resp.header.transmitter_address.0,
                probe_resp.body.ssid().unwrap_or(""),
                rssi, channel, FrameType::ProbeResponse,
            )
        }
    };

    match result {
        Ok(info) => Some(info),
        Err(_) => {
            // Minimum 16 bytes: 2 (frame ctrl) + 2 (duration) + 6 (addr1) + 6 (addr2)
            if frame.len() < 16 {
                return None;
            }
            let mac: [u8; 6] = frame[10..16].try_into().ok()?;
            Some(build_wifi_info(&mac, "", rssi, channel, classify_raw(frame[0])))
        }
    }
}

/// Frame type from the first frame-control byte.
fn classify_raw(fc0: u8) -> FrameType {
    match ((fc0 >> 2) & 0x3, fc0 >> 4) {
        (0, 4) => FrameType::ProbeRequest,
        (0, 5) => FrameType::ProbeResponse,
        (0, 8) => FrameType::Beacon,
        (0, 13) => FrameType::Action,
        (2, _) => FrameType::Data,
        _ => FrameType::Other,
    }
}

fn build_wifi_info(
    mac: &[u8; 6],
    ssid: &str,
    rssi: i8,
    channel: u8,
    frame_type: FrameType,
) -> WiFiFrameInfo {
    let mut ssid_str = NameString::new();
    let _ = ssid_str.push_str(ssid);
    WiFiFrameInfo {
        mac: *mac,
        ssid: ssid_str,
        rssi,
        channel,
        frame_type,
    }
}

/// Parse BLE advertisement data (AD structures).
///
/// AD structure format: [length] [type] [data...]
/// Types we care about:
///   0x08/0x09 = Shortened/Complete local name
///   0x16      = Service data, 16-bit UUID (first 2 bytes, little-endian)
pub struct BleAdvParser;

impl BleAdvParser {
    pub fn parse(addr: &[u8; 6], rssi: i8, ad_data: &[u8]) -> BleAdvInfo {
        let mut info = BleAdvInfo {
            mac: *addr,
            name: NameString::new(),
            rssi,
            odid_service: None,
        };

        let mut pos = 0;
        while pos < ad_data.len() {
            let len = ad_data[pos] as usize;
            if len == 0 || pos + 1 + len > ad_data.len() {
                break;
            }

            let ad_type = ad_data[pos + 1];
            let data = &ad_data[pos + 2..pos + 1 + len];

            match ad_type {
                0x08 | 0x09 => {
                    if let Ok(name) = core::str::from_utf8(data) {
                        let _ = info.name.push_str(name);
                    }
                }
                0x16 => {
                    if info.odid_service.is_none()
                        && data.len() >= 3
                        && u16::from_le_bytes([data[0], data[1]]) == ODID_SERVICE_UUID_16
                        && data[2] == ODID_APP_CODE
                    {
                        info.odid_service = Some(pos + 1..pos + 1 + len);
                    }
                }
                _ => {}
            }

            pos += 1 + len;
        }

        info
    }
}

/// Filter, classify and decode one captured 802.11 frame.
///
/// Returns `None` when the capture is filtered out, has no readable header,
/// or does not qualify for reporting under `config`.
pub fn scan_wifi_frame(
    frame: &[u8],
    rssi: i8,
    channel: u8,
    band: Band,
    config: &FilterConfig,
) -> Option<RidSighting> {
    if !config.accept_wifi(rssi) {
        return None;
    }
    let info = parse_wifi_frame(frame, rssi, channel)?;
    let result = config.decoder.decode_wifi(frame);
    if !config.should_report(&result) {
        return None;
    }
    log::debug!(
        "RID {} frame on ch {} ({}) rssi {}",
        info.frame_type.as_str(),
        channel,
        band.as_str(),
        rssi
    );
    Some(RidSighting {
        transport: Transport::WiFi,
        mac: info.mac,
        name: info.ssid,
        rssi,
        channel: Some(channel),
        band: Some(band),
        frame_len: frame.len(),
        result,
    })
}

/// Filter and decode one BLE advertisement payload.
///
/// Decoding starts at the ODID service-data structure found by the AD
/// walk and is bounded by its end, so marker-like bytes in other AD
/// structures are never mistaken for the pack.
pub fn scan_ble_advertisement(
    addr: &[u8; 6],
    rssi: i8,
    ad_data: &[u8],
    config: &FilterConfig,
) -> Option<RidSighting> {
    if !config.accept_ble(rssi) {
        return None;
    }
    let info = BleAdvParser::parse(addr, rssi, ad_data);
    let element = info.odid_service?;
    if !ad_data.get(element.clone())?.starts_with(config.decoder.ble_marker) {
        return None;
    }
    let result = decode_pack_at(
        ad_data.get(..element.end)?,
        element.start,
        config.decoder.type_rule,
    );
    if !config.should_report(&result) {
        return None;
    }
    Some(RidSighting {
        transport: Transport::Ble,
        mac: info.mac,
        name: info.name,
        rssi,
        channel: None,
        band: None,
        frame_len: ad_data.len(),
        result,
    })
}
