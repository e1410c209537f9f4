//! Text decoding helpers used by the non-PDF fallback path.
mod encoding;

pub use encoding::decode_best_effort;
