/// 内部实现模块，对外只通过下面的分组导出
mod internal;

#[cfg(test)]
mod tests;

/// 最常用的入口：会话控制器与分段下载服务
pub use internal::range_server::structs::{RangeServer, ServerConfig};
pub use internal::session::structs::{SessionController, SessionStatus};

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}

/// 持久化：存储抽象、sled / 内存实现、会话记录
pub mod store {
    use crate::internal;
    pub use internal::range_store::structs::*;
    pub use internal::range_store::traits::*;
}

/// 服务端：Range 解析、文件端点、axum 路由
pub mod server {
    use crate::internal;
    pub use internal::range_server::structs::*;
}

/// 客户端：分段请求、下载引擎、重组
pub mod transfer {
    use crate::internal;
    pub use internal::transfer::impl_traits::*;
    pub use internal::transfer::structs::*;
    pub use internal::transfer::traits::*;
    pub use internal::transfer::traits::range_client::range_header;
}

/// 会话控制：开始 / 暂停 / 重置与可观察状态
pub mod session {
    use crate::internal;
    pub use internal::session::structs::*;
}
