use chrono::Utc;

use crate::adapters::memory::LendingJournal as InMemoryLendingJournal;
use crate::application::catalog::Catalog;
use crate::domain::{BookBorrowed, BookReturned, DomainEvent, Isbn, MemberId};
use crate::ports::LendingJournal;

use super::errors::{LendingError, Result};

/// 貸出サービス
///
/// 書籍と会員の両方を変更する唯一のコンポーネント。
/// 書籍ごとの状態は「貸出可能」と「貸出中（会員）」の2つだけ。
///
/// 不変条件：
/// - 書籍が貸出中 ⇔ ちょうど1人の会員の貸出記録にそのISBNがある
/// - 書籍側と会員側の更新は常に対で行い、片方だけを残さない
///
/// カタログは呼び出し側が所有し、操作ごとに渡す。
#[derive(Debug)]
pub struct LendingService {
    journal: Box<dyn LendingJournal>,
}

impl LendingService {
    pub fn new(journal: Box<dyn LendingJournal>) -> Self {
        Self { journal }
    }

    /// 書籍を貸し出す
    ///
    /// チェック順：
    /// 1. 会員の存在確認（MemberNotFound）
    /// 2. 書籍の存在確認（BookNotFound）
    /// 3. 書籍が貸出可能か（BookAlreadyBorrowed）
    ///
    /// すべて通過した場合のみ、書籍を貸出中にして会員に記録する。
    pub fn borrow_book(
        &mut self,
        catalog: &mut Catalog,
        member_id: &MemberId,
        isbn: &Isbn,
    ) -> Result<()> {
        let (member, book) = catalog.lending_pair_mut(member_id, isbn);
        let member = member.ok_or_else(|| LendingError::MemberNotFound(member_id.clone()));
        let outcome = member.and_then(|member| {
            let book = book.ok_or_else(|| LendingError::BookNotFound(isbn.clone()))?;
            if !book.is_available() {
                return Err(LendingError::BookAlreadyBorrowed(isbn.clone()));
            }

            book.mark_borrowed();
            member.record_borrow(book);
            Ok(())
        });

        if let Err(e) = &outcome {
            tracing::warn!(%member_id, %isbn, error = %e, "borrow rejected");
            return outcome;
        }

        self.journal.record(DomainEvent::BookBorrowed(BookBorrowed {
            isbn: isbn.clone(),
            member_id: member_id.clone(),
            borrowed_at: Utc::now(),
        }));
        tracing::debug!(%member_id, %isbn, "book borrowed");

        Ok(())
    }

    /// 書籍を返却する
    ///
    /// チェック順：
    /// 1. 会員の存在確認（MemberNotFound）
    /// 2. 書籍の存在確認（BookNotFound）
    /// 3. この会員の貸出記録にISBNがあるか（NotBorrowedByMember）
    ///
    /// 3は書籍の状態ではなく会員自身の記録で判定する。
    pub fn return_book(
        &mut self,
        catalog: &mut Catalog,
        member_id: &MemberId,
        isbn: &Isbn,
    ) -> Result<()> {
        let (member, book) = catalog.lending_pair_mut(member_id, isbn);
        let member = member.ok_or_else(|| LendingError::MemberNotFound(member_id.clone()));
        let outcome = member.and_then(|member| {
            let book = book.ok_or_else(|| LendingError::BookNotFound(isbn.clone()))?;
            if !member.has_borrowed(isbn) {
                return Err(LendingError::NotBorrowedByMember {
                    member_id: member_id.clone(),
                    isbn: isbn.clone(),
                });
            }

            book.mark_returned();
            member.record_return(book);
            Ok(())
        });

        if let Err(e) = &outcome {
            tracing::warn!(%member_id, %isbn, error = %e, "return rejected");
            return outcome;
        }

        self.journal.record(DomainEvent::BookReturned(BookReturned {
            isbn: isbn.clone(),
            member_id: member_id.clone(),
            returned_at: Utc::now(),
        }));
        tracing::debug!(%member_id, %isbn, "book returned");

        Ok(())
    }

    /// 成功した貸出・返却の履歴（発生順）
    pub fn history(&self) -> Vec<DomainEvent> {
        self.journal.events()
    }
}

impl Default for LendingService {
    fn default() -> Self {
        Self::new(Box::new(InMemoryLendingJournal::new()))
    }
}
