/// Capture filter and runtime configuration.
///
/// Decides which captures are worth decoding (radio enabled, signal above
/// threshold) and which decode results are worth reporting. No scoring or
/// tracking; that's the companion app's job.

use crate::odid::{DecodeResult, DecoderConfig};

/// Runtime filter configuration. Allows the host to adjust filtering
/// without rebuilding.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// Minimum RSSI threshold (dBm). Signals weaker than this are ignored.
    pub min_rssi: i8,
    /// Whether WiFi captures are decoded
    pub wifi_enabled: bool,
    /// Whether BLE captures are decoded
    pub ble_enabled: bool,
    /// Report truncated packs as long as at least one message decoded
    pub report_partial: bool,
    pub decoder: DecoderConfig,
}

impl FilterConfig {
    pub const fn new() -> Self {
        Self {
            min_rssi: -90,
            wifi_enabled: true,
            ble_enabled: true,
            report_partial: true,
            decoder: DecoderConfig::new(),
        }
    }

    pub fn accept_wifi(&self, rssi: i8) -> bool {
        self.wifi_enabled && rssi >= self.min_rssi
    }

    pub fn accept_ble(&self, rssi: i8) -> bool {
        self.ble_enabled && rssi >= self.min_rssi
    }

    /// Whether a decode result should be emitted.
    ///
    /// Frames without a marker never are. Complete packs always are, even
    /// if every slot was skipped; the marker alone identifies a Remote ID
    /// broadcaster.
    pub fn should_report(&self, result: &DecodeResult) -> bool {
        if !result.is_found() {
            return false;
        }
        match result.error {
            None => true,
            Some(_) => self.report_partial && !result.messages.is_empty(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a 6-byte MAC address into "AA:BB:CC:DD:EE:FF" string
pub fn format_mac(mac: &[u8; 6], buf: &mut crate::protocol::MacString) {
    use core::fmt::Write;
    let _ = write!(
        buf,
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    );
}
