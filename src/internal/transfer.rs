//! 客户端：逐块拉取、落盘、续传与重组。

pub mod impl_traits;
pub mod structs;
pub mod traits;
