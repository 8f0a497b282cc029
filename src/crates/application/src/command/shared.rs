use crate::error::AppError;

/// 通用令牌生成器接口，任务ID与落盘文件名都通过它取随机十六进制令牌
#[async_trait::async_trait]
pub trait TokenGenerator: Send + Sync {
    /// Generate the next opaque token (lowercase hex, unguessable).
    async fn next_token(&self) -> Result<String, AppError>;
}
