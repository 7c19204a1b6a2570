use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// コマンド：書籍をカタログに追加する
///
/// 外部の取り込み処理（スクレイパー等）もこの形に正規化して渡す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_year: i32,
    /// 出版年の上限（現在の年）の判定にも使う
    pub added_at: DateTime<Utc>,
}

/// コマンド：会員を登録する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutBook {
    pub member_id: String,
    pub isbn: String,
    pub checked_out_at: DateTime<Utc>,
}

/// コマンド：書籍を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub member_id: String,
    pub isbn: String,
    pub returned_at: DateTime<Utc>,
}

/// クエリ：書籍を検索する
///
/// すべて任意。指定された条件のAND。
/// `status`は未解釈の文字列のまま受け取る（不正値は警告して無視）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBooks {
    pub query: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub status: Option<String>,
}
