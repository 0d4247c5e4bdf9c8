use crate::domain::events::DomainEvent;
use std::fmt;

/// 貸出ジャーナルポート
///
/// 貸出・返却のドメインイベントを発生順に記録する。
/// 記録は追記のみで、変更・削除はしない。
/// 永続化は行わない（プロセスの生存期間中のみ保持する）。
pub trait LendingJournal: fmt::Debug + Send {
    /// イベントを追記する
    ///
    /// 状態遷移が完了した後にのみ呼ばれる。失敗しない。
    fn record(&mut self, event: DomainEvent);

    /// 記録されたすべてのイベント（発生順のスナップショット）
    fn events(&self) -> Vec<DomainEvent>;
}
