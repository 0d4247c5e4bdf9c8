use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::catalog::{self, Catalog};
use crate::domain::{Book, DomainEvent, Isbn, Member, MemberId};

use super::errors::Result;
use super::lending_service::LendingService;

/// カタログと貸出サービスの組
#[derive(Debug, Default)]
struct LibraryState {
    catalog: Catalog,
    lending: LendingService,
}

/// 複数スレッドから共有するためのラッパー
///
/// 1回の貸出・返却・登録ごとにロックを1回だけ取得するため、
/// 書籍側だけが更新された途中の状態は他の呼び出し側から見えない。
/// 単一スレッドで使う場合は Catalog と LendingService を直接使えばよい。
#[derive(Debug, Clone, Default)]
pub struct SharedLibrary {
    state: Arc<Mutex<LibraryState>>,
}

impl SharedLibrary {
    pub fn new(catalog: Catalog, lending: LendingService) -> Self {
        Self {
            state: Arc::new(Mutex::new(LibraryState { catalog, lending })),
        }
    }

    // ロック中に行うのは失敗しないセッターの組のみ。poison 後も状態は整合している
    fn lock(&self) -> MutexGuard<'_, LibraryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_book(&self, book: Book) -> catalog::Result<()> {
        self.lock().catalog.add_book(book)
    }

    pub fn add_member(&self, member: Member) -> catalog::Result<()> {
        self.lock().catalog.add_member(member)
    }

    pub fn borrow_book(&self, member_id: &MemberId, isbn: &Isbn) -> Result<()> {
        let mut guard = self.lock();
        let LibraryState { catalog, lending } = &mut *guard;
        lending.borrow_book(catalog, member_id, isbn)
    }

    pub fn return_book(&self, member_id: &MemberId, isbn: &Isbn) -> Result<()> {
        let mut guard = self.lock();
        let LibraryState { catalog, lending } = &mut *guard;
        lending.return_book(catalog, member_id, isbn)
    }

    /// ロックを保持したままカタログを参照する
    pub fn read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&self.lock().catalog)
    }

    pub fn history(&self) -> Vec<DomainEvent> {
        self.lock().lending.history()
    }
}
