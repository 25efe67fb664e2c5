//! Open Drone ID (ASTM F3411) message-pack decoding.
//!
//! A captured frame is searched for the ODID marker; the byte seven
//! positions later holds the message count and fixed 25-byte slots follow.
//! Each slot is dispatched on its header byte to a per-type decoder.
//!
//! Wire offsets live in `layout`, bounds-checked reads in `reader`, and the
//! byte-to-value conversions in `codec`. Decoding never allocates and never
//! reads outside the supplied frame.
//!
pub mod codec;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod marker;
pub mod message;
pub mod reader;

pub use decoder::{decode_frame, decode_pack_at, DecodeResult, DecoderConfig, TypeRule};
pub use error::DecodeError;
pub use marker::locate;
pub use message::{DecodedMessage, MessageFlags, MessageType};
