use thiserror::Error;

use crate::domain::{Isbn, MemberId};

/// 貸出・返却のエラー
///
/// いずれも回復可能。エラー時は書籍・会員の状態を一切変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// 会員が存在しない
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// 書籍が存在しない
    #[error("Book not found: {0}")]
    BookNotFound(Isbn),

    /// 書籍は既に貸出中
    #[error("Book is already borrowed: {0}")]
    BookAlreadyBorrowed(Isbn),

    /// この会員はこの書籍を借りていない
    #[error("Book {isbn} was not borrowed by member {member_id}")]
    NotBorrowedByMember { member_id: MemberId, isbn: Isbn },
}

/// 貸出サービスの Result型
pub type Result<T> = std::result::Result<T, LendingError>;
