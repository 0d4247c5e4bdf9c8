use std::fmt;
use thiserror::Error;

/// 重複したキーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Member,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => f.write_str("book"),
            EntityKind::Member => f.write_str("member"),
        }
    }
}

/// カタログ登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// 同じキー（ISBN / 会員ID）が既に登録されている
    ///
    /// 登録は拒否され、既存のエントリは変更されない。
    #[error("{kind} with key '{key}' already exists")]
    DuplicateKey { kind: EntityKind, key: String },
}

/// カタログ操作の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
