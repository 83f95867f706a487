#![forbid(unsafe_code)]

/// `embed_migrations!` is not re-run by cargo when only SQL files change,
/// so the migration directory is registered explicitly.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
