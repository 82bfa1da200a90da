pub mod ansi;
pub mod codec;
