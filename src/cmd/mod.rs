/// Decode-and-check command.
pub mod check;
/// Schema inspection command.
pub mod describe;
/// Decoded value pretty-printer.
pub mod print;
