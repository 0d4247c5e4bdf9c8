use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Isbn, MemberId};

/// イベント：書籍が貸し出された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBorrowed {
    pub isbn: Isbn,
    pub member_id: MemberId,
    pub borrowed_at: DateTime<Utc>,
}

/// イベント：書籍が返却された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookReturned {
    pub isbn: Isbn,
    pub member_id: MemberId,
    pub returned_at: DateTime<Utc>,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    BookBorrowed(BookBorrowed),
    BookReturned(BookReturned),
}

impl DomainEvent {
    pub fn isbn(&self) -> &Isbn {
        match self {
            DomainEvent::BookBorrowed(e) => &e.isbn,
            DomainEvent::BookReturned(e) => &e.isbn,
        }
    }

    pub fn member_id(&self) -> &MemberId {
        match self {
            DomainEvent::BookBorrowed(e) => &e.member_id,
            DomainEvent::BookReturned(e) => &e.member_id,
        }
    }
}
