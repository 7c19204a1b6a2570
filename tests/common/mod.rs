#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use library_catalog::adapters::mock::{EventSink, SnapshotStore};
use library_catalog::application::catalog::ServiceDependencies;
use library_catalog::domain::circulation::CirculationPolicy;
use library_catalog::domain::commands::*;
use library_catalog::domain::{Catalog, CheckoutLimit, LoanPeriod};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const LIBRARY_NAME: &str = "Alexandrea Main Library";

/// モックアダプターを束ねたテスト用の依存関係
///
/// テストから保存内容や発行イベントを検証できるよう、モックへの参照も保持する。
pub struct TestContext {
    pub deps: ServiceDependencies,
    pub snapshot_store: Arc<SnapshotStore>,
    pub event_sink: Arc<EventSink>,
}

/// 貸出上限を指定してテスト用の依存関係を作成
pub fn setup(checkout_limit: u32) -> TestContext {
    let snapshot_store = Arc::new(SnapshotStore::new());
    let event_sink = Arc::new(EventSink::new());

    let policy = CirculationPolicy::new(
        CheckoutLimit::try_from(checkout_limit).unwrap(),
        LoanPeriod::default(),
    );

    let deps = ServiceDependencies {
        catalog: Arc::new(Mutex::new(Catalog::new(LIBRARY_NAME))),
        policy,
        snapshot_store: snapshot_store.clone(),
        event_sink: event_sink.clone(),
    };

    TestContext {
        deps,
        snapshot_store,
        event_sink,
    }
}

/// テストで使う固定の現在時刻
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

pub fn add_book_cmd(title: &str, author: &str, isbn: &str, year: i32) -> AddBook {
    AddBook {
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        publication_year: year,
        added_at: now(),
    }
}

pub fn register_cmd(id: &str, name: &str, email: &str) -> RegisterMember {
    RegisterMember {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        joined_at: now(),
    }
}

pub fn checkout_cmd(member_id: &str, isbn: &str) -> CheckoutBook {
    CheckoutBook {
        member_id: member_id.to_string(),
        isbn: isbn.to_string(),
        checked_out_at: now(),
    }
}

pub fn return_cmd(member_id: &str, isbn: &str) -> ReturnBook {
    ReturnBook {
        member_id: member_id.to_string(),
        isbn: isbn.to_string(),
        returned_at: now(),
    }
}
