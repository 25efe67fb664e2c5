//! RidHound library — Open Drone ID Remote ID decoding for captured frames.
//!
//! Turns raw WiFi beacon / NAN frames and BLE advertisement payloads into
//! structured ASTM F3411 records: UAS identity, position and velocity,
//! operator location and IDs. Platform binaries (firmware, Linux daemons)
//! are thin consumers that provide radio access and output sinks.
//!
//! The library is organized in two layers:
//! - **Core**: `odid` — marker search, field codec, message-pack decoder.
//!   Stateless, synchronous, never reads outside the supplied frame.
//! - **Adapters**: `scanner`, `filter`, `protocol`, `comm` — capture
//!   metadata, filtering, NDJSON events, hexdump and log rendering.
//!
//! Everything is `no_std` and allocation-free, testable on any host with
//! `cargo test`.

#![cfg_attr(not(test), no_std)]

pub mod comm;
pub mod filter;
pub mod odid;
pub mod protocol;
pub mod scanner;
