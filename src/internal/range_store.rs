//! 断点续传的持久化层：按会话隔离的键值存储，以及其上的类型化记录访问。

pub mod impl_traits;
pub mod structs;
pub mod traits;
