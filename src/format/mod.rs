// On-wire stream format.
//
// - `checksum`: CRC-32 over the plaintext
// - `cursor`: bounds-checked byte reader/writer
// - `header`: fixed 14-byte stream header
// - `token`: literal / escaped literal / match tokens

pub mod checksum;
pub mod cursor;
pub mod header;
pub mod token;

pub use header::{FormatError, HEADER_LEN, Header, MAGIC};
pub use token::{CorruptError, Token, TokenReader};
