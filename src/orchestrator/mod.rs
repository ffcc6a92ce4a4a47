//! 编排层（Orchestration Layer）
//!
//! ```text
//! batch_processor (处理整个名单)
//!     ↓
//! input (定位 + 读取表格)
//!     ↓
//! services (提取标识 / 抓取论文 / 停顿)
//!     ↓
//! clients (外部数据源)
//! ```
//!
//! 全程单线程顺序执行，只有批处理器持有结果累加器。

pub mod batch_processor;
pub mod output;

pub use batch_processor::{App, RunOutcome, RunSummary};
pub use output::write_output;
