// Hashing and match finding for the LZ77 encoder.
//
// This module provides:
// - The 3-byte multiplicative prefix hash
// - The hash-chain index (bucket heads + window-sized chain ring)
// - Vector byte comparison with runtime CPU dispatch
// - The hash-chain match finder

pub mod compare;
pub mod config;
pub mod matching;
pub mod prefix;
pub mod table;
