use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    Unreadable(String),
    Malformed(String),
    EmptyField { account: String, field: &'static str },
    InvalidField { account: String, field: &'static str },
    DuplicateName(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Unreadable(cause) => {
                write!(f, "Unable to read the accounts file: {}", cause)
            }
            ConfigError::Malformed(cause) => {
                write!(f, "Malformed accounts file: {}", cause)
            }
            ConfigError::EmptyField { account, field } => {
                write!(f, "Account {} has an empty '{}' field", account, field)
            }
            ConfigError::InvalidField { account, field } => {
                write!(f, "Account {} has an unusable '{}' field", account, field)
            }
            ConfigError::DuplicateName(name) => {
                write!(f, "Account name '{}' appears more than once", name)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccountSpec {
    pub name: String,
    pub email: String,
    pub hostname: String,
}

#[derive(Deserialize)]
struct AccountsFileFormat {
    accounts: Vec<AccountEntryFormat>,
}

#[derive(Deserialize)]
struct AccountEntryFormat {
    name: String,
    email: String,
    hostname: String,
}

pub fn load_accounts(path: &Path) -> Result<Vec<AccountSpec>, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))?;
    parse_accounts(&text)
}

pub fn parse_accounts(text: &str) -> Result<Vec<AccountSpec>, ConfigError> {
    let parsed: AccountsFileFormat =
        serde_yaml::from_str(text).map_err(|e| ConfigError::Malformed(format!("{}", e)))?;

    let mut specs: Vec<AccountSpec> = Vec::new();
    for (idx, entry) in parsed.accounts.into_iter().enumerate() {
        let label = if entry.name.is_empty() {
            format!("entry {}", idx + 1)
        } else {
            format!("'{}'", entry.name)
        };

        check_not_empty(&label, "name", &entry.name)?;
        check_not_empty(&label, "email", &entry.email)?;
        check_not_empty(&label, "hostname", &entry.hostname)?;

        // the name doubles as a Host alias and a key file name
        if !name_is_safe(&entry.name) {
            return Err(ConfigError::InvalidField {
                account: label,
                field: "name",
            });
        }
        if !value_is_plain(&entry.email) {
            return Err(ConfigError::InvalidField {
                account: label,
                field: "email",
            });
        }
        if !value_is_plain(&entry.hostname) {
            return Err(ConfigError::InvalidField {
                account: label,
                field: "hostname",
            });
        }

        if specs.iter().any(|s| s.name == entry.name) {
            return Err(ConfigError::DuplicateName(entry.name));
        }

        specs.push(AccountSpec {
            name: entry.name,
            email: entry.email,
            hostname: entry.hostname,
        });
    }

    Ok(specs)
}

fn check_not_empty(
    account: &str,
    field: &'static str,
    value: &str,
) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyField {
            account: account.to_string(),
            field,
        });
    }
    Ok(())
}

fn name_is_safe(name: &str) -> bool {
    if name == "." || name == ".." || name.starts_with('#') {
        return false;
    }
    value_is_plain(name) && !name.contains('/')
}

fn value_is_plain(value: &str) -> bool {
    !value.chars().any(|c| c.is_whitespace() || c.is_control())
}
