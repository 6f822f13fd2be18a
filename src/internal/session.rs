//! 会话控制：开始 / 暂停 / 重置，以及对外可观察的进度与状态。

pub mod structs;
