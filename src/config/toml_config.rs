use crate::core::ConfigProvider;
use crate::domain::model::RecordFormat;
use crate::utils::error::{IstError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SUPPORTED_FORMATS: [&str; 2] = ["json", "csv"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub job: Option<JobSection>,
    pub input: InputConfig,
    pub normalize: NormalizeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeConfig {
    pub fields: Vec<String>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub format: Option<String>,
}

impl JobConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IstError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IstError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| IstError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_field_list("normalize.fields", &self.normalize.fields)?;

        match &self.input.format {
            Some(format) => validation::validate_one_of(
                "input.format",
                &format.to_ascii_lowercase(),
                &SUPPORTED_FORMATS,
            )?,
            None => validation::validate_file_extension("input.path", &self.input.path, &SUPPORTED_FORMATS)?,
        }

        if let Some(format) = &self.output.format {
            validation::validate_one_of("output.format", &format.to_ascii_lowercase(), &SUPPORTED_FORMATS)?;
        }

        if let Some(job) = &self.job {
            validation::validate_non_empty_string("job.name", &job.name)?;
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        self.job.as_ref().map(|j| j.name.as_str()).unwrap_or("unnamed")
    }

    pub fn is_strict(&self) -> bool {
        self.normalize.strict.unwrap_or(false)
    }

    /// 明確指定 > 副檔名推斷 > JSON
    pub fn resolved_input_format(&self) -> RecordFormat {
        self.input
            .format
            .as_deref()
            .and_then(RecordFormat::from_name)
            .or_else(|| RecordFormat::from_path(&self.input.path))
            .unwrap_or(RecordFormat::Json)
    }

    /// 明確指定 > 輸出副檔名 > 與輸入相同
    pub fn resolved_output_format(&self) -> RecordFormat {
        self.output
            .format
            .as_deref()
            .and_then(RecordFormat::from_name)
            .or_else(|| RecordFormat::from_path(&self.output.path))
            .unwrap_or_else(|| self.resolved_input_format())
    }
}

/// `trades.csv` -> `trades_ist.csv`, next to the input.
pub fn default_output_path(input: &str, format: RecordFormat) -> String {
    let path = Path::new(input);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let file_name = format!("{}_ist.{}", stem, format.as_str());

    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.join(file_name).to_string_lossy().into_owned(),
        None => file_name,
    }
}

impl ConfigProvider for JobConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn input_format(&self) -> RecordFormat {
        self.resolved_input_format()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_format(&self) -> RecordFormat {
        self.resolved_output_format()
    }

    fn fields(&self) -> &[String] {
        &self.normalize.fields
    }

    fn strict(&self) -> bool {
        self.is_strict()
    }
}

impl Validate for JobConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
