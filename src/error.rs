//! 对调用方公开的错误类型

use thiserror::Error;

/// 诊断接口的返回类型
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// 诊断错误
///
/// 姿势模型不可用、未检测到人体、置信度不足都会回退到问卷分析，不会出现在这里。
/// 只有输入图片本身无法解析时才会返回错误，调用方应提示用户重新拍摄。
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// 图片数据无法解析
    #[error("Invalid image data: {0}")]
    InvalidImage(String),
}
