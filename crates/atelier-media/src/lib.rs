//! Turns generation results into stored bytes and files.
//!
//! Images come back from the remote as short-lived URLs; this crate fetches
//! them and re-encodes to PNG so history rows hold durable bytes. Audio is
//! written under voice-and-timestamp names, vision uploads under
//! `upload_{uuid}.jpeg`. File writes and history inserts are separate steps
//! and are not atomic.

pub mod errors;
pub mod fetch;
pub mod files;
pub mod raster;

pub use errors::{MediaError, Result};
pub use fetch::materialize_image;
pub use files::{audio_output_path, save_upload, write_audio};
pub use raster::{decode_image, encode_jpeg_base64, encode_png, flatten_alpha};
