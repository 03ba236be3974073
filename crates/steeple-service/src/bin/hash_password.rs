//! Prints an Argon2 hash for seeding `adminUsers` documents by hand.
//!
//! Usage: `hash_password <password>`, or pipe the password on stdin.

use std::io::BufRead;

use steeple_service::auth::password::{check_strength, hash_password};

fn read_password() -> std::io::Result<String> {
    if let Some(password) = std::env::args().nth(1) {
        return Ok(password);
    }
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() {
    let password = match read_password() {
        Ok(password) => password,
        Err(err) => {
            eprintln!("Failed to read password: {err}");
            std::process::exit(1);
        }
    };

    match check_strength(&password).and_then(|()| hash_password(&password)) {
        Ok(hash) => {
            println!("{hash}");
        }
        Err(err) => {
            eprintln!("Failed to hash password: {err}");
            std::process::exit(1);
        }
    }
}
