use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::{Book, Isbn, MemberId};

/// Member エンティティ - 図書館の会員
///
/// 借りている書籍はISBN（書籍への参照キー）のみを保持する。
/// 書籍本体はカタログが所有し、必要な場合はカタログ経由で解決する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    name: String,
    member_id: MemberId,
    borrowed: IndexSet<Isbn>,
}

impl Member {
    /// 新しい会員を作成する（貸出中の書籍なし）
    pub fn new(name: impl Into<String>, member_id: MemberId) -> Self {
        Self {
            name: name.into(),
            member_id,
            borrowed: IndexSet::new(),
        }
    }

    /// 貸出を記録する
    ///
    /// 同じISBNで2回呼ばれても1件のまま（冪等）。
    pub fn record_borrow(&mut self, book: &Book) {
        self.borrowed.insert(book.isbn().clone());
    }

    /// 返却を記録する
    ///
    /// 記録がない場合は何もしない。
    pub fn record_return(&mut self, book: &Book) {
        self.borrowed.shift_remove(book.isbn());
    }

    /// このISBNの書籍を借りているか
    pub fn has_borrowed(&self, isbn: &Isbn) -> bool {
        self.borrowed.contains(isbn)
    }

    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    /// 借りている書籍のISBN一覧（スナップショット、貸出順）
    pub fn borrowed_list(&self) -> Vec<Isbn> {
        self.borrowed.iter().cloned().collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }
}
