use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    CheckoutLimit, CheckoutLimitError, DEFAULT_LOAN_PERIOD_DAYS, LoanPeriod, LoanPeriodError,
    circulation::CirculationPolicy,
};

/// 環境変数の接頭辞（`LIBRARY_CHECKOUT_LIMIT` など）
pub const ENV_PREFIX: &str = "LIBRARY";

/// 設定ファイルのパスを上書きする環境変数
pub const CONFIG_PATH_ENV: &str = "LIBRARY_CONFIG";

pub const DEFAULT_CONFIG_FILE: &str = "library.toml";

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid checkout_limit: {0}")]
    CheckoutLimit(#[from] CheckoutLimitError),

    #[error("invalid loan_period_days: {0}")]
    LoanPeriod(#[from] LoanPeriodError),
}

/// アプリケーション設定
///
/// 優先順位：環境変数 `LIBRARY_*` > 設定ファイル > 既定値。
/// `checkout_limit` には既定値がなく、未設定なら起動エラーになる。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub checkout_limit: u32,
    #[serde(default = "default_loan_period_days")]
    pub loan_period_days: i64,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    #[serde(default)]
    pub restore_on_start: bool,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_name() -> String {
    "Alexandrea Main Library".to_string()
}

fn default_loan_period_days() -> i64 {
    DEFAULT_LOAN_PERIOD_DAYS
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/library_data.json")
}

fn default_port() -> u16 {
    3000
}

impl AppConfig {
    /// プロセスの環境から設定を読み込む
    ///
    /// 設定ファイルは `LIBRARY_CONFIG` が指すパス、なければ `library.toml`。
    /// ファイルが存在しなくてもエラーにはしない。
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::from_sources(&path, Environment::with_prefix(ENV_PREFIX))
    }

    /// 設定ファイルと環境変数ソースから設定を組み立てる
    pub fn from_sources(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(env.try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.policy()?;
        Ok(config)
    }

    /// 貸出ポリシーを構築する（上限・期間の検証を含む）
    pub fn policy(&self) -> Result<CirculationPolicy, ConfigError> {
        let checkout_limit = CheckoutLimit::try_from(self.checkout_limit)?;
        let loan_period = LoanPeriod::try_from(self.loan_period_days)?;
        Ok(CirculationPolicy::new(checkout_limit, loan_period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn missing_file() -> PathBuf {
        PathBuf::from("does-not-exist/library.toml")
    }

    // TDD: 既定値のテスト
    #[test]
    fn test_defaults_apply_when_only_checkout_limit_is_set() {
        let config =
            AppConfig::from_sources(&missing_file(), env(&[("LIBRARY_CHECKOUT_LIMIT", "3")]))
                .unwrap();

        assert_eq!(config.name, "Alexandrea Main Library");
        assert_eq!(config.checkout_limit, 3);
        assert_eq!(config.loan_period_days, 14);
        assert_eq!(config.snapshot_path, PathBuf::from("data/library_data.json"));
        assert!(!config.restore_on_start);
        assert_eq!(config.port, 3000);
    }

    // TDD: 貸出上限必須のテスト
    #[test]
    fn test_missing_checkout_limit_is_an_error() {
        let result = AppConfig::from_sources(&missing_file(), env(&[]));
        assert!(matches!(result, Err(ConfigError::Source(_))));
    }

    #[test]
    fn test_zero_checkout_limit_is_rejected() {
        let result =
            AppConfig::from_sources(&missing_file(), env(&[("LIBRARY_CHECKOUT_LIMIT", "0")]));
        assert!(matches!(
            result,
            Err(ConfigError::CheckoutLimit(CheckoutLimitError::Zero))
        ));
    }

    #[test]
    fn test_non_positive_loan_period_is_rejected() {
        let result = AppConfig::from_sources(
            &missing_file(),
            env(&[
                ("LIBRARY_CHECKOUT_LIMIT", "3"),
                ("LIBRARY_LOAN_PERIOD_DAYS", "0"),
            ]),
        );
        assert!(matches!(
            result,
            Err(ConfigError::LoanPeriod(LoanPeriodError::NotPositive(0)))
        ));
    }

    #[test]
    fn test_excessive_loan_period_is_rejected() {
        let result = AppConfig::from_sources(
            &missing_file(),
            env(&[
                ("LIBRARY_CHECKOUT_LIMIT", "3"),
                ("LIBRARY_LOAN_PERIOD_DAYS", "100000000"),
            ]),
        );
        assert!(matches!(
            result,
            Err(ConfigError::LoanPeriod(LoanPeriodError::TooLong(100_000_000)))
        ));
    }

    // TDD: 設定ファイルのテスト
    #[test]
    fn test_reads_values_from_toml_file() {
        let file = toml_file(
            r#"
name = "Branch Library"
checkout_limit = 5
loan_period_days = 21
snapshot_path = "/tmp/branch.json"
restore_on_start = true
port = 8080
"#,
        );

        let config = AppConfig::from_sources(file.path(), env(&[])).unwrap();

        assert_eq!(config.name, "Branch Library");
        assert_eq!(config.checkout_limit, 5);
        assert_eq!(config.loan_period_days, 21);
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/branch.json"));
        assert!(config.restore_on_start);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("checkout_limit = 5\nname = \"Branch Library\"\n");

        let config = AppConfig::from_sources(
            file.path(),
            env(&[
                ("LIBRARY_CHECKOUT_LIMIT", "2"),
                ("LIBRARY_NAME", "Override Library"),
            ]),
        )
        .unwrap();

        assert_eq!(config.checkout_limit, 2);
        assert_eq!(config.name, "Override Library");
    }

    // TDD: 貸出ポリシー構築のテスト
    #[test]
    fn test_policy_uses_configured_values() {
        let config = AppConfig::from_sources(
            &missing_file(),
            env(&[
                ("LIBRARY_CHECKOUT_LIMIT", "4"),
                ("LIBRARY_LOAN_PERIOD_DAYS", "7"),
            ]),
        )
        .unwrap();

        let policy = config.policy().unwrap();
        assert_eq!(policy.checkout_limit.value(), 4);
        assert_eq!(policy.loan_period.days(), 7);
    }
}
