use library_catalog::{
    application::{
        catalog::{self, Catalog},
        lending::LendingService,
    },
    config::{AppConfig, OutputFormat},
    domain::{Book, Isbn, Member, MemberId},
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 起動時に登録するサンプルデータ
fn seed_sample_data(catalog: &mut Catalog) -> catalog::Result<()> {
    catalog.add_book(Book::new("The Great Gatsby", "F.S. Fitzgerald", Isbn::new("001")))?;
    catalog.add_book(Book::new("1984", "George Orwell", Isbn::new("002")))?;
    catalog.add_book(Book::new("To Kill a Mockingbird", "Harper Lee", Isbn::new("003")))?;
    catalog.add_book(Book::new("Pride and Prejudice", "Jane Austen", Isbn::new("004")))?;

    catalog.add_member(Member::new("Alice Johnson", MemberId::new("M001")))?;
    catalog.add_member(Member::new("Bob Smith", MemberId::new("M002")))?;
    catalog.add_member(Member::new("Carol Davis", MemberId::new("M003")))?;

    Ok(())
}

/// コマンドライン引数の操作を順に実行する
///
/// 形式: `borrow <member_id> <isbn>` / `return <member_id> <isbn>` の繰り返し。
/// 個々の操作の失敗は報告して次に進む。
fn apply_operations(
    catalog: &mut Catalog,
    lending: &mut LendingService,
    args: &[String],
) -> Result<(), BoxError> {
    for op in args.chunks(3) {
        let [action, member_id, isbn] = op else {
            return Err(format!("incomplete operation: {}", op.join(" ")).into());
        };
        let member_id = MemberId::new(member_id.as_str());
        let isbn = Isbn::new(isbn.as_str());

        let result = match action.as_str() {
            "borrow" => lending.borrow_book(catalog, &member_id, &isbn),
            "return" => lending.return_book(catalog, &member_id, &isbn),
            other => return Err(format!("unknown operation: {}", other).into()),
        };

        match result {
            Ok(()) => println!("{} {} {}: ok", action, member_id, isbn),
            Err(e) => println!("{} {} {}: {}", action, member_id, isbn, e),
        }
    }

    Ok(())
}

fn report(catalog: &Catalog, output: OutputFormat) -> Result<(), BoxError> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog.snapshot())?);
        }
        OutputFormat::Summary => {
            for book in catalog.all_books() {
                println!("{}", book);
            }
            println!(
                "Total Books: {} (available: {})",
                catalog.book_count(),
                catalog.available_count()
            );
            for member in catalog.all_members() {
                println!(
                    "{} | {} | {}",
                    member.name(),
                    member.member_id(),
                    member.borrowed_count()
                );
            }
            println!("Total Members: {}", catalog.member_count());
        }
    }

    Ok(())
}

fn run(config: AppConfig, args: &[String]) -> Result<(), BoxError> {
    let mut catalog = Catalog::new();
    let mut lending = LendingService::default();

    if config.seed_sample_data {
        seed_sample_data(&mut catalog)?;
        tracing::info!(
            books = catalog.book_count(),
            members = catalog.member_count(),
            "sample data seeded"
        );
    }

    apply_operations(&mut catalog, &mut lending, args)?;
    tracing::info!(transitions = lending.history().len(), "operations applied");

    report(&catalog, config.output)
}

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
