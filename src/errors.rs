use std::fmt;

#[derive(Debug, Clone)]
pub enum PredictorError {
    ModelNotFound(String),
    ModelFormat(String),
    Inference(String),
    Encoding(String),
    Ranking(String),
    Training(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
}

impl PredictorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PredictorError::ModelNotFound(_) => "E001",
            PredictorError::ModelFormat(_) => "E002",
            PredictorError::Inference(_) => "E003",
            PredictorError::Encoding(_) => "E004",
            PredictorError::Ranking(_) => "E005",
            PredictorError::Training(_) => "E006",
            PredictorError::FileOperation(_) => "E007",
            PredictorError::Serialization(_) => "E008",
            PredictorError::Config(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PredictorError::ModelNotFound(_) => "Model Not Found",
            PredictorError::ModelFormat(_) => "Model Format Error",
            PredictorError::Inference(_) => "Inference Error",
            PredictorError::Encoding(_) => "Feature Encoding Error",
            PredictorError::Ranking(_) => "Ranking Error",
            PredictorError::Training(_) => "Training Error",
            PredictorError::FileOperation(_) => "File Operation Error",
            PredictorError::Serialization(_) => "Serialization Error",
            PredictorError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PredictorError::ModelNotFound(msg)
            | PredictorError::ModelFormat(msg)
            | PredictorError::Inference(msg)
            | PredictorError::Encoding(msg)
            | PredictorError::Ranking(msg)
            | PredictorError::Training(msg)
            | PredictorError::FileOperation(msg)
            | PredictorError::Serialization(msg)
            | PredictorError::Config(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PredictorError {}

// 便捷的构造函数
impl PredictorError {
    pub fn model_not_found<T: Into<String>>(msg: T) -> Self {
        PredictorError::ModelNotFound(msg.into())
    }

    pub fn model_format<T: Into<String>>(msg: T) -> Self {
        PredictorError::ModelFormat(msg.into())
    }

    pub fn inference<T: Into<String>>(msg: T) -> Self {
        PredictorError::Inference(msg.into())
    }

    pub fn encoding<T: Into<String>>(msg: T) -> Self {
        PredictorError::Encoding(msg.into())
    }

    pub fn ranking<T: Into<String>>(msg: T) -> Self {
        PredictorError::Ranking(msg.into())
    }

    pub fn training<T: Into<String>>(msg: T) -> Self {
        PredictorError::Training(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PredictorError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PredictorError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        PredictorError::Config(msg.into())
    }
}

impl From<std::io::Error> for PredictorError {
    fn from(err: std::io::Error) -> Self {
        PredictorError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PredictorError {
    fn from(err: serde_json::Error) -> Self {
        PredictorError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
