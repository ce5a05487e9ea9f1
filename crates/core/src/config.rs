use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NestError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_parsed<T: FromStr>(profile: &str, key: &str, default: T) -> T {
    match profiled_env_opt(profile, key) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "unrecognised value, using default");
                default
            }
        },
        None => default,
    }
}

// ── Shared enums ──────────────────────────────────────────────

/// How a text fragment is measured when sizing chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Unicode scalar values.
    #[default]
    Characters,
    /// Whitespace-separated words.
    Words,
    /// BPE tokens (cl100k_base).
    Tokens,
}

impl FromStr for LengthUnit {
    type Err = NestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "characters" | "chars" | "character" => Ok(Self::Characters),
            "words" | "word" => Ok(Self::Words),
            "tokens" | "token" => Ok(Self::Tokens),
            other => Err(NestError::Config(format!("unknown length unit: '{other}'"))),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Characters => "characters",
            Self::Words => "words",
            Self::Tokens => "tokens",
        };
        f.write_str(name)
    }
}

/// Which splitting strategy turns raw text into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitterStrategy {
    #[default]
    Recursive,
    Paragraph,
}

impl FromStr for SplitterStrategy {
    type Err = NestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recursive" => Ok(Self::Recursive),
            "paragraph" | "paragraphs" => Ok(Self::Paragraph),
            other => Err(NestError::Config(format!("unknown splitter strategy: '{other}'"))),
        }
    }
}

impl fmt::Display for SplitterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => f.write_str("recursive"),
            Self::Paragraph => f.write_str("paragraph"),
        }
    }
}

/// Similarity metric used for ranking. Higher scores always mean "closer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Cosine,
    #[serde(rename = "dot")]
    DotProduct,
    /// Scored as `1 / (1 + distance)`.
    Euclidean,
}

impl FromStr for Metric {
    type Err = NestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "dot" | "dot_product" | "inner" => Ok(Self::DotProduct),
            "euclidean" | "l2" => Ok(Self::Euclidean),
            other => Err(NestError::Config(format!("unknown similarity metric: '{other}'"))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cosine => "cosine",
            Self::DotProduct => "dot",
            Self::Euclidean => "euclidean",
        };
        f.write_str(name)
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub splitter: SplitterConfig,
    pub embedding: EmbeddingConfig,
    pub openai: OpenAiConfig,
    pub ollama: OllamaConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `NEST_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("NEST_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            splitter: SplitterConfig::from_env_profiled(p),
            embedding: EmbeddingConfig::from_env_profiled(p),
            openai: OpenAiConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            search: SearchConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  splitter:    strategy={}, chunk_size={}, overlap={}, unit={}",
            self.splitter.strategy,
            self.splitter.chunk_size,
            self.splitter.chunk_overlap,
            self.splitter.length_unit
        );
        tracing::info!(
            "  embedding:   provider={}, dimensions={}, batch={}",
            self.embedding.provider,
            self.embedding.dimensions,
            self.embedding.batch_size
        );
        tracing::info!("  openai:      base_url={}", self.openai.base_url);
        tracing::info!("  ollama:      url={}", self.ollama.url);
        tracing::info!("  llm:         provider={}", self.llm.provider);
        tracing::info!("  search:      top_k={}, metric={}", self.search.top_k, self.search.metric);
    }

    /// Return a redacted view safe for display (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "splitter": {
                "strategy": self.splitter.strategy,
                "chunk_size": self.splitter.chunk_size,
                "chunk_overlap": self.splitter.chunk_overlap,
                "separators": self.splitter.separators,
                "length_unit": self.splitter.length_unit,
                "merge_count": self.splitter.merge_count,
            },
            "embedding": {
                "provider": self.embedding.provider,
                "dimensions": self.embedding.dimensions,
                "batch_size": self.embedding.batch_size,
                "cache_capacity": self.embedding.cache_capacity,
            },
            "openai": {
                "base_url": self.openai.base_url,
                "embedding_model": self.openai.embedding_model,
                "chat_model": self.openai.chat_model,
                "configured": self.openai.is_configured(),
            },
            "ollama": {
                "url": self.ollama.url,
                "model": self.ollama.model,
                "embedding_model": self.ollama.embedding_model,
            },
            "llm": { "provider": self.llm.provider, "configured": self.llm.is_configured(&self.openai) },
            "search": { "top_k": self.search.top_k, "metric": self.search.metric },
        })
    }
}

// ── Splitter ──────────────────────────────────────────────────

pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitterConfig {
    pub strategy: SplitterStrategy,
    /// Maximum cost per chunk, measured in `length_unit`.
    pub chunk_size: usize,
    /// Cost carried over between consecutive chunks.
    pub chunk_overlap: usize,
    /// Most- to least-specific; `""` means character-level.
    pub separators: Vec<String>,
    pub length_unit: LengthUnit,
    /// Paragraphs per chunk for the paragraph strategy.
    pub merge_count: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            strategy: SplitterStrategy::Recursive,
            chunk_size: 2_000,
            chunk_overlap: 100,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            length_unit: LengthUnit::Characters,
            merge_count: 8,
        }
    }
}

impl SplitterConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        let separators = match profiled_env_opt(p, "CHUNK_SEPARATORS") {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) if !list.is_empty() => list,
                _ => {
                    tracing::warn!(value = %raw, "CHUNK_SEPARATORS is not a JSON string array, using defaults");
                    defaults.separators.clone()
                }
            },
            None => defaults.separators.clone(),
        };
        Self {
            strategy: profiled_env_parsed(p, "SPLITTER_STRATEGY", defaults.strategy),
            chunk_size: profiled_env_usize(p, "CHUNK_SIZE", defaults.chunk_size),
            chunk_overlap: profiled_env_usize(p, "CHUNK_OVERLAP", defaults.chunk_overlap),
            separators,
            length_unit: profiled_env_parsed(p, "CHUNK_LENGTH_UNIT", defaults.length_unit),
            merge_count: profiled_env_usize(p, "PARAGRAPH_MERGE_COUNT", defaults.merge_count),
        }
    }

    /// Fail fast on settings no splitter can honour.
    pub fn validate(&self) -> Result<(), NestError> {
        if self.chunk_size <= self.chunk_overlap {
            return Err(NestError::InvalidChunkSize {
                chunk_size: self.chunk_size,
                chunk_overlap: self.chunk_overlap,
            });
        }
        if self.strategy == SplitterStrategy::Paragraph && self.merge_count == 0 {
            return Err(NestError::InvalidMergeCount);
        }
        Ok(())
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "openai", "ollama"
    pub provider: String,
    pub dimensions: usize,
    pub batch_size: usize,
    /// LRU capacity; 0 disables caching.
    pub cache_capacity: usize,
}

impl EmbeddingConfig {
    /// Output width of each provider's default embedding model
    /// (`text-embedding-ada-002`, `nomic-embed-text`).
    pub fn default_dimensions(provider: &str) -> usize {
        match provider {
            "ollama" => 768,
            _ => 1536,
        }
    }

    fn from_env_profiled(p: &str) -> Self {
        let provider = profiled_env_or(p, "EMBEDDING_PROVIDER", "openai");
        Self {
            dimensions: profiled_env_usize(p, "EMBEDDING_DIMENSIONS", Self::default_dimensions(&provider)),
            provider,
            batch_size: profiled_env_usize(p, "EMBEDDING_BATCH_SIZE", 64),
            cache_capacity: profiled_env_usize(p, "EMBEDDING_CACHE_CAPACITY", 1024),
        }
    }
}

// ── OpenAI ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub organization: Option<String>,
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
}

impl OpenAiConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            organization: profiled_env_opt(p, "OPENAI_ORGANIZATION"),
            base_url: profiled_env_or(p, "OPENAI_BASE_URL", "https://api.openai.com"),
            embedding_model: profiled_env_or(p, "OPENAI_EMBEDDING_MODEL", "text-embedding-ada-002"),
            chat_model: profiled_env_or(p, "OPENAI_MODEL", "gpt-4"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub embedding_model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            model: profiled_env_or(p, "OLLAMA_MODEL", "llama3.2"),
            embedding_model: profiled_env_or(p, "OLLAMA_EMBEDDING_MODEL", "nomic-embed-text"),
        }
    }
}

// ── LLM ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai", "ollama"
    pub provider: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "openai"),
            temperature: profiled_env_parsed(p, "LLM_TEMPERATURE", 0.0),
            max_tokens: profiled_env_u32(p, "LLM_MAX_TOKENS", 1024),
        }
    }

    pub fn is_configured(&self, openai: &OpenAiConfig) -> bool {
        match self.provider.as_str() {
            "openai" => openai.is_configured(),
            "ollama" => true,
            _ => false,
        }
    }
}

// ── Search ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub top_k: usize,
    pub metric: Metric,
}

impl SearchConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            top_k: profiled_env_usize(p, "SEARCH_TOP_K", 5),
            metric: profiled_env_parsed(p, "SEARCH_METRIC", Metric::Cosine),
        }
    }
}
