use crate::accounts::AccountSpec;
use crate::keys::KeyPair;
use std::fs;

// Prints each account's public key for manual upload, then the remote URL
// form that routes through the host alias.
pub fn print_keys(entries: &[(AccountSpec, KeyPair)]) -> Result<(), String> {
    for (account, pair) in entries {
        let public_key = fs::read_to_string(&pair.public_key_path).map_err(|e| {
            format!(
                "Unable to read public key {}: {}",
                pair.public_key_path.display(),
                e
            )
        })?;

        println!();
        println!("Account {} ({})", account.name, account.hostname);
        println!("Add this public key to your {} account:", account.hostname);
        println!("{}", public_key.trim_end());
    }

    if !entries.is_empty() {
        println!();
        println!("To reach a repository through one of these identities:");
        for (account, _) in entries {
            println!("  git@{}:username/repository.git", account.name);
        }
    }

    Ok(())
}
