use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::canonicalize_isbn;

/// 貸出期間の既定値（日数）
pub const DEFAULT_LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出期間の上限（日数）
pub const MAX_LOAN_PERIOD_DAYS: i64 = 36_500;

/// ISBN - カタログの一意キー
///
/// 常に正規化済み（ハイフン・空白を除去した形）で保持する。
/// どの経路からアクセスしても同じ正規化を通すことで、
/// "978-0-14-044914-3" と "9780140449143" は同じ書籍を指す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    /// 入力文字列を正規化してISBNを作る
    ///
    /// 構文チェックは行わない（`validation::validate_isbn`の責務）。
    pub fn canonical(raw: &str) -> Self {
        Self(canonicalize_isbn(raw))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// 正規化済みの形で保持されているか
    pub fn is_canonical(&self) -> bool {
        canonicalize_isbn(&self.0) == self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 会員ID - 外部から与えられる一意キー
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 貸出上限エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutLimitError {
    /// 0冊では誰も借りられない
    #[error("checkout limit must be at least 1")]
    Zero,
}

/// 会員1人あたりの貸出上限冊数
///
/// 不変条件：1以上。
/// 既定値は持たない。設定で明示的に与える必要がある。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CheckoutLimit(u32);

impl CheckoutLimit {
    pub fn value(&self) -> u32 {
        self.0
    }

    /// 現在の貸出冊数でさらに1冊借りられるか
    pub fn allows(&self, checked_out: usize) -> bool {
        checked_out < self.0 as usize
    }
}

impl TryFrom<u32> for CheckoutLimit {
    type Error = CheckoutLimitError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(CheckoutLimitError::Zero);
        }
        Ok(Self(value))
    }
}

impl From<CheckoutLimit> for u32 {
    fn from(limit: CheckoutLimit) -> Self {
        limit.0
    }
}

/// 貸出期間エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanPeriodError {
    #[error("loan period must be at least 1 day (got {0})")]
    NotPositive(i64),

    #[error("loan period must be at most {MAX_LOAN_PERIOD_DAYS} days (got {0})")]
    TooLong(i64),
}

/// 貸出期間（日数）
///
/// 不変条件：1日以上、`MAX_LOAN_PERIOD_DAYS`以下。返却期限 = 貸出日時 + 貸出期間。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPeriod(i64);

impl LoanPeriod {
    pub fn days(&self) -> i64 {
        self.0
    }

    pub fn duration(&self) -> Duration {
        Duration::days(self.0)
    }
}

impl Default for LoanPeriod {
    fn default() -> Self {
        Self(DEFAULT_LOAN_PERIOD_DAYS)
    }
}

impl TryFrom<i64> for LoanPeriod {
    type Error = LoanPeriodError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 1 {
            return Err(LoanPeriodError::NotPositive(value));
        }
        if value > MAX_LOAN_PERIOD_DAYS {
            return Err(LoanPeriodError::TooLong(value));
        }
        Ok(Self(value))
    }
}
