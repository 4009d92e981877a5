/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 待处理笔记文件（.txt）存放目录
    pub notes_folder: String,
    /// 生成的测验存放目录
    pub quiz_folder: String,
    /// 默认题目类型（"mcq" 或 "flashcard"）
    pub quiz_kind: String,
    /// 每份笔记生成的题目数量
    pub question_count: usize,
    /// 句子切分的最小词数
    pub min_sentence_words: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 生成服务配置 ---
    /// API 密钥，为空表示不使用生成服务，直接兜底生成
    pub hf_api_key: String,
    pub hf_api_base_url: String,
    pub hf_model_name: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_folder: "notes".to_string(),
            quiz_folder: "quizzes".to_string(),
            quiz_kind: "mcq".to_string(),
            question_count: 5,
            min_sentence_words: 4,
            verbose_logging: false,
            hf_api_key: String::new(),
            hf_api_base_url: "https://api-inference.huggingface.co/models".to_string(),
            hf_model_name: "google/flan-t5-base".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            notes_folder: std::env::var("NOTES_FOLDER").unwrap_or(default.notes_folder),
            quiz_folder: std::env::var("QUIZ_FOLDER").unwrap_or(default.quiz_folder),
            quiz_kind: std::env::var("QUIZ_KIND").unwrap_or(default.quiz_kind),
            question_count: std::env::var("QUESTION_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.question_count),
            min_sentence_words: std::env::var("MIN_SENTENCE_WORDS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.min_sentence_words),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            hf_api_key: std::env::var("HF_API_KEY").unwrap_or(default.hf_api_key),
            hf_api_base_url: std::env::var("HF_API_BASE_URL").unwrap_or(default.hf_api_base_url),
            hf_model_name: std::env::var("HF_MODEL_NAME").unwrap_or(default.hf_model_name),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        }
    }
}
