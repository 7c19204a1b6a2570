use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Isbn, MemberId, timestamp};

/// 会員エンティティ
///
/// `join_date`は登録時に設定され、以後変更されない。
/// `books_checked_out`の更新は`circulation`の純粋関数経由でのみ行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub join_date: DateTime<Utc>,
    #[serde(default)]
    pub books_checked_out: BTreeSet<Isbn>,
}

impl Member {
    /// 貸出なしの状態で新規作成
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        join_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            join_date,
            books_checked_out: BTreeSet::new(),
        }
    }

    /// 現在の貸出冊数
    pub fn checkout_count(&self) -> usize {
        self.books_checked_out.len()
    }

    pub fn holds(&self, isbn: &Isbn) -> bool {
        self.books_checked_out.contains(isbn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_member_has_no_checkouts() {
        let joined = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let member = Member::new(MemberId::new("m1"), "Ana", "ana@x.com", joined);
        assert_eq!(member.checkout_count(), 0);
        assert_eq!(member.join_date, joined);
        assert!(!member.holds(&Isbn::canonical("9780140449143")));
    }

    #[test]
    fn test_member_deserializes_naive_join_date() {
        let json = r#"{
            "id": "reader123",
            "name": "Alex Reader",
            "email": "alex@example.com",
            "join_date": "2024-05-06T07:08:09.500000",
            "books_checked_out": ["9780812968255"]
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(
            member.join_date,
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap() + chrono::Duration::milliseconds(500)
        );
        assert!(member.holds(&Isbn::canonical("9780812968255")));
    }
}
