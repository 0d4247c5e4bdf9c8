pub mod lending_journal;

pub use lending_journal::*;
