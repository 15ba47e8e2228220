use std::io;
use std::io::Write;
use rpassword::read_password;

use crate::error::catalog::CatalogError;

pub fn input_password(prompt: &str) -> Result<String, CatalogError> {
    print!("{}", prompt);
    io::stdout().flush()?; // prompt has no trailing newline
    Ok(read_password()?)
}

pub fn input_password_trim(prompt: &str) -> Result<String, CatalogError> {
    Ok(input_password(prompt)?.trim().to_string())
}
