use std::fmt;

/// 引擎对调用方暴露的硬错误
///
/// 只有输入本身的问题才会作为错误返回；生成服务失败和解析失败
/// 一律在引擎内部通过兜底生成吸收（见 [`FallbackReason`]）。
#[derive(Debug)]
pub enum QuizError {
    /// 规范化后的笔记字符数不足
    InputTooShort { chars: usize, min: usize },
    /// 规范化后的笔记字符数超出上限
    InputTooLong { chars: usize, max: usize },
    /// 笔记中没有任何满足最小词数的句子
    NoUsableSentences,
    /// 请求的题目类型无法识别
    UnsupportedKind { requested: String },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InputTooShort { chars, min } => {
                write!(f, "笔记内容过短: {} 个字符, 至少需要 {} 个", chars, min)
            }
            QuizError::InputTooLong { chars, max } => {
                write!(f, "笔记内容过长: {} 个字符, 上限为 {} 个", chars, max)
            }
            QuizError::NoUsableSentences => {
                write!(f, "笔记中没有可用于出题的完整句子")
            }
            QuizError::UnsupportedKind { requested } => {
                write!(f, "不支持的题目类型: {}", requested)
            }
        }
    }
}

impl std::error::Error for QuizError {}

/// 生成服务（外部协作方）的调用错误
#[derive(Debug)]
pub enum GenerationError {
    /// 请求超时
    Timeout {
        endpoint: String,
    },
    /// 请求频率限制
    RateLimited {
        endpoint: String,
        retry_after: Option<u64>,
    },
    /// 模型正在加载（服务暂不可用）
    ServiceLoading {
        endpoint: String,
    },
    /// 其他 HTTP 错误响应
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空或缺少生成文本
    EmptyResponse {
        endpoint: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Timeout { endpoint } => {
                write!(f, "生成服务请求超时 ({})", endpoint)
            }
            GenerationError::RateLimited {
                endpoint,
                retry_after,
            } => {
                write!(
                    f,
                    "生成服务请求频率限制 ({}), 建议等待: {:?}秒",
                    endpoint, retry_after
                )
            }
            GenerationError::ServiceLoading { endpoint } => {
                write!(f, "生成服务模型正在加载 ({})", endpoint)
            }
            GenerationError::BadResponse {
                endpoint,
                status,
                message,
            } => {
                write!(
                    f,
                    "生成服务返回错误响应 ({}): status={}, message={:?}",
                    endpoint, status, message
                )
            }
            GenerationError::RequestFailed { endpoint, source } => {
                write!(f, "生成服务请求失败 ({}): {}", endpoint, source)
            }
            GenerationError::EmptyResponse { endpoint } => {
                write!(f, "生成服务返回结果为空 ({})", endpoint)
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 触发兜底生成的原因
///
/// 这两种情况是信息性的，不是致命错误：引擎记录日志后改用兜底生成，
/// 调用方永远不会收到它们。
#[derive(Debug)]
pub enum FallbackReason {
    /// 生成服务调用失败
    GenerationUnavailable(GenerationError),
    /// 生成服务返回了文本，但解析不出任何有效题目
    ParseYieldedNothing,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::GenerationUnavailable(e) => {
                write!(f, "生成服务不可用: {}", e)
            }
            FallbackReason::ParseYieldedNothing => {
                write!(f, "生成文本中解析不出有效题目")
            }
        }
    }
}

/// 题目记录的构造约束违规
#[derive(Debug)]
pub enum RecordError {
    /// 题干为空
    EmptyPrompt,
    /// 选项数量不是 4
    WrongOptionCount { found: usize },
    /// 选项重复
    DuplicateOption { option: String },
    /// 正确答案索引越界
    CorrectIndexOutOfRange { index: usize },
    /// 闪卡答案为空
    EmptyAnswer,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::EmptyPrompt => write!(f, "题干不能为空"),
            RecordError::WrongOptionCount { found } => {
                write!(f, "选项数量必须为 4, 实际为 {}", found)
            }
            RecordError::DuplicateOption { option } => {
                write!(f, "选项重复: {}", option)
            }
            RecordError::CorrectIndexOutOfRange { index } => {
                write!(f, "正确答案索引 {} 超出范围 [0, 3]", index)
            }
            RecordError::EmptyAnswer => write!(f, "闪卡答案不能为空"),
        }
    }
}

impl std::error::Error for RecordError {}

/// 单个生成文本片段被跳过的原因
///
/// 解析器逐片段产生 `Result`，失败的片段记一条 debug 日志后丢弃，
/// 不会中断整体解析。
#[derive(Debug)]
pub enum SegmentError {
    /// 片段行数不足
    TooFewLines { found: usize, expected: usize },
    /// 选项行数量不对
    BadOptionCount { found: usize },
    /// 没有找到答案行
    MissingAnswer,
    /// 字段齐全但违反记录约束
    InvalidRecord(RecordError),
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::TooFewLines { found, expected } => {
                write!(f, "片段行数不足: {} 行, 至少需要 {} 行", found, expected)
            }
            SegmentError::BadOptionCount { found } => {
                write!(f, "选项行数量不对: 找到 {} 个, 需要 4 个", found)
            }
            SegmentError::MissingAnswer => write!(f, "没有找到 A: 答案行"),
            SegmentError::InvalidRecord(e) => write!(f, "记录约束违规: {}", e),
        }
    }
}

impl std::error::Error for SegmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SegmentError::InvalidRecord(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RecordError> for SegmentError {
    fn from(err: RecordError) -> Self {
        SegmentError::InvalidRecord(err)
    }
}

// ========== 便捷构造函数 ==========

impl QuizError {
    /// 创建输入过短错误
    pub fn input_too_short(chars: usize, min: usize) -> Self {
        QuizError::InputTooShort { chars, min }
    }

    /// 创建题目类型不支持错误
    pub fn unsupported_kind(requested: impl Into<String>) -> Self {
        QuizError::UnsupportedKind {
            requested: requested.into(),
        }
    }
}

impl GenerationError {
    /// 创建网络请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        GenerationError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 引擎结果类型
pub type QuizResult<T> = Result<T, QuizError>;
