use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{Book, Isbn, Member, MemberId};

use super::errors::{CatalogError, EntityKind, Result};

/// カタログ - 書籍と会員を所有する集約ストア
///
/// ビジネスルール：
/// - ISBN / 会員IDはカタログ内で一意
/// - 重複登録は拒否する（上書きしない）
/// - 一覧は登録順で返す
///
/// 書籍と会員の状態を同時に変更するのは LendingService のみ。
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: IndexMap<Isbn, Book>,
    members: IndexMap<MemberId, Member>,
}

/// 表示・出力用のカタログのスナップショット
#[derive(Debug, Serialize)]
pub struct CatalogSnapshot<'a> {
    pub books: Vec<&'a Book>,
    pub members: Vec<&'a Member>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書籍を登録する
    ///
    /// # エラー
    /// 同じISBNが登録済みの場合は`CatalogError::DuplicateKey`を返し、何も変更しない
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        if self.books.contains_key(book.isbn()) {
            tracing::warn!(isbn = %book.isbn(), "rejected duplicate book");
            return Err(CatalogError::DuplicateKey {
                kind: EntityKind::Book,
                key: book.isbn().to_string(),
            });
        }

        tracing::debug!(isbn = %book.isbn(), title = book.title(), "book registered");
        self.books.insert(book.isbn().clone(), book);
        Ok(())
    }

    /// 会員を登録する
    ///
    /// # エラー
    /// 同じ会員IDが登録済みの場合は`CatalogError::DuplicateKey`を返し、何も変更しない
    pub fn add_member(&mut self, member: Member) -> Result<()> {
        if self.members.contains_key(member.member_id()) {
            tracing::warn!(member_id = %member.member_id(), "rejected duplicate member");
            return Err(CatalogError::DuplicateKey {
                kind: EntityKind::Member,
                key: member.member_id().to_string(),
            });
        }

        tracing::debug!(member_id = %member.member_id(), name = member.name(), "member registered");
        self.members.insert(member.member_id().clone(), member);
        Ok(())
    }

    pub fn find_book(&self, isbn: &Isbn) -> Option<&Book> {
        self.books.get(isbn)
    }

    pub fn find_member(&self, member_id: &MemberId) -> Option<&Member> {
        self.members.get(member_id)
    }

    /// 全書籍（登録順）
    pub fn all_books(&self) -> impl Iterator<Item = &Book> + '_ {
        self.books.values()
    }

    /// 全会員（登録順）
    pub fn all_members(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.values()
    }

    /// 貸出可能な書籍（登録順を保ったフィルタ）
    pub fn available_books(&self) -> impl Iterator<Item = &Book> + '_ {
        self.books.values().filter(|book| book.is_available())
    }

    /// 会員が借りている書籍をカタログ経由で解決する
    ///
    /// 会員が存在しない場合は`None`。
    pub fn borrowed_books(&self, member_id: &MemberId) -> Option<Vec<&Book>> {
        let member = self.members.get(member_id)?;
        Some(
            member
                .borrowed_list()
                .iter()
                .filter_map(|isbn| self.books.get(isbn))
                .collect(),
        )
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn available_count(&self) -> usize {
        self.available_books().count()
    }

    pub fn snapshot(&self) -> CatalogSnapshot<'_> {
        CatalogSnapshot {
            books: self.all_books().collect(),
            members: self.all_members().collect(),
        }
    }

    /// 貸出・返却のために会員と書籍を同時に可変参照で取り出す
    ///
    /// 書籍と会員は別々のマップに保持されているため、両方を同時に借用できる。
    pub(crate) fn lending_pair_mut(
        &mut self,
        member_id: &MemberId,
        isbn: &Isbn,
    ) -> (Option<&mut Member>, Option<&mut Book>) {
        (self.members.get_mut(member_id), self.books.get_mut(isbn))
    }
}
