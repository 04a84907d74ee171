//! C ABI surface used by the host bridge

pub mod exports;
