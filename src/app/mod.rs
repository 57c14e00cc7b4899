// ==========================================
// 分切/印刷机生产配置引擎 - 应用层
// ==========================================
// 职责: 编辑会话与共享目录快照
// ==========================================

pub mod session;
pub mod state;

// 重导出
pub use session::{SessionEdition, SessionError, SessionResult};
pub use state::AppState;
