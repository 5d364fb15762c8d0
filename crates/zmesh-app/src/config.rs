use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use zmesh_core::options::MeshOptions;
use zmesh_file::convert::DEFAULT_MAX_INPUT_BYTES;
use zmesh_file::{ConvertOptions, OutputMode};

/// 覆盖配置文件位置的环境变量
pub const CONFIG_ENV: &str = "ZMESH_CONFIG";

/// `zmesh` 的全部可配置项，缺省节使用默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub conversion: ConversionConfig,
    pub mesh: MeshOptions,
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 依次尝试 `ZMESH_CONFIG` 与 `config/default.toml`
    ///
    /// 环境变量指向的文件必须存在；默认位置缺失时返回内建默认值。
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }
        let path = Path::new("config").join("default.toml");
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            max_input_bytes: self.conversion.max_input_bytes,
            mesh: self.mesh,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 等级或 `EnvFilter` 指令
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// 面颜色为 ByLayer 时的厚度，未配置时必须在命令行给出
    pub default_thickness: Option<f64>,
    pub mode: OutputMode,
    pub max_input_bytes: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            default_thickness: None,
            mode: OutputMode::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path:?} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件 {path:?} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
