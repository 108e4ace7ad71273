//! Prints an Argon2id hash for `owner.password_hash`.
//!
//! Usage: `hash-password <password>`

use std::process::ExitCode;

use pushkind_portfolio::services::auth::hash_password;

fn main() -> ExitCode {
    let Some(password) = std::env::args().nth(1) else {
        eprintln!("usage: hash-password <password>");
        return ExitCode::FAILURE;
    };

    match hash_password(&password) {
        Ok(hash) => {
            println!("{hash}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to hash password: {e}");
            ExitCode::FAILURE
        }
    }
}
