pub mod channel;
pub mod color;
pub mod consts;
pub mod enhance;
pub mod error;
pub mod histogram;
pub mod io;
pub mod pipeline;
