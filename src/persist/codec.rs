//! Byte encoding for save records.

use bincode::Options;

use crate::core::GameError;

use super::record::SaveRecord;

/// Upper bound on a save file. A full 15x15 board with a prop in every
/// cell is well under this.
pub const MAX_SAVE_BYTES: u64 = 64 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
        .reject_trailing_bytes()
        .with_limit(MAX_SAVE_BYTES)
}

/// Encode a record as big-endian fixed-width fields.
///
/// A record larger than [`MAX_SAVE_BYTES`] fails with `SaveEncode`.
pub fn encode(record: &SaveRecord) -> Result<Vec<u8>, GameError> {
    options()
        .serialize(record)
        .map_err(|err| GameError::SaveEncode(err.to_string()))
}

/// Decode a record. Truncated data, trailing bytes, an invalid mode flag
/// and out-of-range dimensions are all `LoadFormat` errors.
pub fn decode(bytes: &[u8]) -> Result<SaveRecord, GameError> {
    options()
        .deserialize(bytes)
        .map_err(|err| GameError::LoadFormat(err.to_string()))
}
