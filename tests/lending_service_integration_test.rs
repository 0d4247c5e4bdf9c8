use assert_matches::assert_matches;
use library_catalog::application::catalog::{Catalog, CatalogError, EntityKind};
use library_catalog::application::lending::{LendingError, LendingService};
use library_catalog::domain::*;

// ============================================================================
// テスト用ヘルパー
// ============================================================================

/// サンプルデータ（書籍4冊、会員3人）を登録したカタログ
fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (title, author, isbn) in [
        ("The Great Gatsby", "F.S. Fitzgerald", "001"),
        ("1984", "George Orwell", "002"),
        ("To Kill a Mockingbird", "Harper Lee", "003"),
        ("Pride and Prejudice", "Jane Austen", "004"),
    ] {
        catalog
            .add_book(Book::new(title, author, Isbn::new(isbn)))
            .unwrap();
    }
    for (name, member_id) in [
        ("Alice Johnson", "M001"),
        ("Bob Smith", "M002"),
        ("Carol Davis", "M003"),
    ] {
        catalog
            .add_member(Member::new(name, MemberId::new(member_id)))
            .unwrap();
    }
    catalog
}

/// 書籍と会員の相互の不変条件を検証する
///
/// - 貸出中の書籍は、ちょうど1人の会員の記録にある
/// - 貸出可能な書籍は、誰の記録にもない
fn assert_lending_invariant(catalog: &Catalog) {
    for book in catalog.all_books() {
        let holders = catalog
            .all_members()
            .filter(|m| m.has_borrowed(book.isbn()))
            .count();
        if book.is_available() {
            assert_eq!(holders, 0, "available book {} has a holder", book.isbn());
        } else {
            assert_eq!(holders, 1, "borrowed book {} has {} holders", book.isbn(), holders);
        }
    }
}

fn assert_available_is_filter(catalog: &Catalog) {
    let available: Vec<&Book> = catalog.available_books().collect();
    let filtered: Vec<&Book> = catalog.all_books().filter(|b| b.is_available()).collect();
    assert_eq!(available, filtered);
}

// ============================================================================
// 統合テスト：カタログ登録
// ============================================================================

#[test]
fn test_registered_book_is_found_and_duplicate_is_rejected() {
    // Arrange
    let mut catalog = Catalog::new();
    let book = Book::new("1984", "Orwell", Isbn::new("002"));

    // Act
    catalog.add_book(book.clone()).unwrap();
    let duplicate = catalog.add_book(Book::new("Animal Farm", "Orwell", Isbn::new("002")));

    // Assert
    assert_eq!(catalog.find_book(&Isbn::new("002")), Some(&book));
    assert_matches!(
        duplicate,
        Err(CatalogError::DuplicateKey { kind: EntityKind::Book, ref key }) if key == "002"
    );
    assert_eq!(catalog.book_count(), 1);
}

#[test]
fn test_duplicate_member_keeps_existing_borrow_records() {
    let mut catalog = sample_catalog();
    let mut lending = LendingService::default();
    lending
        .borrow_book(&mut catalog, &MemberId::new("M001"), &Isbn::new("001"))
        .unwrap();

    let result = catalog.add_member(Member::new("New Alice", MemberId::new("M001")));

    assert_matches!(result, Err(CatalogError::DuplicateKey { kind: EntityKind::Member, .. }));
    let alice = catalog.find_member(&MemberId::new("M001")).unwrap();
    assert_eq!(alice.name(), "Alice Johnson");
    assert_eq!(alice.borrowed_count(), 1);
}

// ============================================================================
// 統合テスト：貸出・返却シナリオ
// ============================================================================

#[test]
fn test_borrow_wrong_member_return_then_correct_return() {
    // Arrange
    let mut catalog = Catalog::new();
    catalog
        .add_book(Book::new("1984", "Orwell", Isbn::new("002")))
        .unwrap();
    catalog
        .add_member(Member::new("Alice", MemberId::new("M001")))
        .unwrap();
    let mut lending = LendingService::default();
    let isbn = Isbn::new("002");
    let alice = MemberId::new("M001");

    // Act & Assert: 貸出
    lending.borrow_book(&mut catalog, &alice, &isbn).unwrap();
    assert!(!catalog.find_book(&isbn).unwrap().is_available());
    assert_eq!(catalog.find_member(&alice).unwrap().borrowed_count(), 1);

    // Act & Assert: 別の会員による返却は拒否される
    // M002 が未登録の間は会員の存在確認で先に失敗する
    let result = lending.return_book(&mut catalog, &MemberId::new("M002"), &isbn);
    assert_matches!(result, Err(LendingError::MemberNotFound(_)));

    catalog
        .add_member(Member::new("Bob", MemberId::new("M002")))
        .unwrap();
    let result = lending.return_book(&mut catalog, &MemberId::new("M002"), &isbn);
    assert_matches!(result, Err(LendingError::NotBorrowedByMember { .. }));
    assert!(!catalog.find_book(&isbn).unwrap().is_available());

    // Act & Assert: 本人による返却
    lending.return_book(&mut catalog, &alice, &isbn).unwrap();
    assert!(catalog.find_book(&isbn).unwrap().is_available());
    assert_eq!(catalog.find_member(&alice).unwrap().borrowed_count(), 0);
    assert_lending_invariant(&catalog);
}

#[test]
fn test_unknown_member_leaves_book_untouched() {
    let mut catalog = sample_catalog();
    let mut lending = LendingService::default();
    let before = catalog.find_book(&Isbn::new("001")).cloned();

    let result = lending.borrow_book(&mut catalog, &MemberId::new("M999"), &Isbn::new("001"));

    assert_eq!(
        result.unwrap_err(),
        LendingError::MemberNotFound(MemberId::new("M999"))
    );
    assert_eq!(catalog.find_book(&Isbn::new("001")).cloned(), before);
    assert!(lending.history().is_empty());
}

#[test]
fn test_borrowed_books_resolve_through_catalog() {
    let mut catalog = sample_catalog();
    let mut lending = LendingService::default();
    let bob = MemberId::new("M002");

    lending.borrow_book(&mut catalog, &bob, &Isbn::new("004")).unwrap();
    lending.borrow_book(&mut catalog, &bob, &Isbn::new("001")).unwrap();

    let titles: Vec<&str> = catalog
        .borrowed_books(&bob)
        .unwrap()
        .into_iter()
        .map(|b| b.title())
        .collect();
    assert_eq!(titles, vec!["Pride and Prejudice", "The Great Gatsby"]);
    assert_eq!(catalog.borrowed_books(&MemberId::new("M003")), Some(vec![]));
}

// 任意の操作列の後でも不変条件と availableBooks の定義が保たれる
#[test]
fn test_invariants_hold_across_operation_sequence() {
    let mut catalog = sample_catalog();
    let mut lending = LendingService::default();

    let operations = [
        ("borrow", "M001", "001"),
        ("borrow", "M002", "001"),
        ("borrow", "M002", "002"),
        ("return", "M001", "002"),
        ("borrow", "M003", "003"),
        ("return", "M001", "001"),
        ("borrow", "M002", "001"),
        ("return", "M999", "001"),
        ("borrow", "M001", "999"),
        ("return", "M003", "003"),
        ("borrow", "M003", "004"),
    ];

    let mut succeeded = 0;
    for (action, member_id, isbn) in operations {
        let member_id = MemberId::new(member_id);
        let isbn = Isbn::new(isbn);
        let result = match action {
            "borrow" => lending.borrow_book(&mut catalog, &member_id, &isbn),
            _ => lending.return_book(&mut catalog, &member_id, &isbn),
        };
        if result.is_ok() {
            succeeded += 1;
        }

        assert_lending_invariant(&catalog);
        assert_available_is_filter(&catalog);
    }

    assert_eq!(succeeded, 7);
    assert_eq!(lending.history().len(), succeeded);
    let available: Vec<&str> = catalog
        .available_books()
        .map(|b| b.isbn().as_str())
        .collect();
    assert_eq!(available, vec!["003"]);
}

#[test]
fn test_history_records_transitions_in_order() {
    let mut catalog = sample_catalog();
    let mut lending = LendingService::default();
    let carol = MemberId::new("M003");
    let isbn = Isbn::new("003");

    lending.borrow_book(&mut catalog, &carol, &isbn).unwrap();
    lending.return_book(&mut catalog, &carol, &isbn).unwrap();

    let history = lending.history();
    assert_eq!(history.len(), 2);
    assert_matches!(&history[0], DomainEvent::BookBorrowed(e) if e.member_id == carol);
    assert_matches!(&history[1], DomainEvent::BookReturned(e) if e.isbn == isbn);
    assert!(history.iter().all(|e| e.isbn() == &isbn && e.member_id() == &carol));
}
