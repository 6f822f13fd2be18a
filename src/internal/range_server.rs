//! 服务端：把根目录下的文件按 `Range` 请求分段返回。
//!
//! [`RangeEndpoint`](structs::RangeEndpoint) 只关心文件与字节区间，不依赖 Web 框架；
//! [`RangeServer`](structs::RangeServer) 负责把它挂到 axum 路由上。

pub mod structs;
