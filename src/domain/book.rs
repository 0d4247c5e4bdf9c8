use serde::{Deserialize, Serialize};
use std::fmt;

use super::Isbn;

/// Book エンティティ - 1冊の蔵書
///
/// 状態は貸出可能（available = true）か貸出中（false）の2つのみ。
/// 状態の整合性（会員側の記録との一致）は貸出サービスが保証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    isbn: Isbn,
    available: bool,
}

impl Book {
    /// 新しい書籍を作成する（貸出可能な状態）
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: Isbn) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn,
            available: true,
        }
    }

    /// 貸出中にする
    ///
    /// 貸出可否のチェックは行わない。呼び出し側（LendingService）が事前に確認すること。
    pub fn mark_borrowed(&mut self) {
        self.available = false;
    }

    /// 貸出可能に戻す
    ///
    /// 誰が借りていたかのチェックは行わない。
    pub fn mark_returned(&mut self) {
        self.available = true;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// 表示用の状態ラベル
    pub fn status_label(&self) -> &'static str {
        if self.available { "Available" } else { "Borrowed" }
    }
}

/// 一覧表示用の1行（タイトル | 著者 | ISBN | 状態）
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.title,
            self.author,
            self.isbn,
            self.status_label()
        )
    }
}
