use crate::accounts::AccountSpec;
use crate::keys::KeyPair;
use std::fmt;
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(test)]
mod tests;

#[derive(Debug)]
pub enum ConfigWriteError {
    Read(String),
    Write(String),
}

impl fmt::Display for ConfigWriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigWriteError::Read(cause) => {
                write!(f, "Unable to read the ssh config: {}", cause)
            }
            ConfigWriteError::Write(cause) => {
                write!(f, "Unable to write the ssh config: {}", cause)
            }
        }
    }
}

pub fn render_stanza(account: &AccountSpec, pair: &KeyPair) -> String {
    format!(
        "Host {}\n  HostName {}\n  User git\n  IdentityFile {}\n  IdentitiesOnly yes\n",
        account.name,
        account.hostname,
        pair.private_key_path.display()
    )
}

/// Merges freshly rendered stanzas into an existing ssh config. Stanzas whose
/// alias belongs to one of the accounts are replaced in place; accounts
/// without a stanza are appended in account order; everything else is kept
/// byte for byte.
pub fn merge_config(existing: &str, entries: &[(AccountSpec, KeyPair)]) -> String {
    let lines: Vec<&str> = existing.split_inclusive('\n').collect();

    let mut starts = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if host_aliases(line).is_some() {
            starts.push(idx);
        }
    }

    let mut out = String::new();
    let mut placed = vec![false; entries.len()];

    let preamble_end = starts.first().copied().unwrap_or(lines.len());
    for line in &lines[..preamble_end] {
        out.push_str(line);
    }

    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(lines.len());
        let aliases = host_aliases(lines[start]).unwrap_or_default();

        let owner = entries
            .iter()
            .position(|(account, _)| aliases.iter().any(|alias| *alias == account.name));

        match owner {
            Some(i) if !placed[i] => {
                // replace the stanza core; trailing blanks and comments
                // belong to whatever comes next
                let mut core_end = end;
                while core_end > start + 1 && is_filler(lines[core_end - 1]) {
                    core_end -= 1;
                }
                let (account, pair) = &entries[i];
                out.push_str(&render_stanza(account, pair));
                for line in &lines[core_end..end] {
                    out.push_str(line);
                }
                placed[i] = true;
            }
            _ => {
                for line in &lines[start..end] {
                    out.push_str(line);
                }
            }
        }
    }

    for (i, (account, pair)) in entries.iter().enumerate() {
        if !placed[i] {
            push_appended(&mut out, &render_stanza(account, pair));
        }
    }

    out
}

pub fn update(
    config_path: &Path,
    entries: &[(AccountSpec, KeyPair)],
) -> Result<(), ConfigWriteError> {
    let existing = match fs::read_to_string(config_path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ConfigWriteError::Read(format!(
                "{}: {}",
                config_path.display(),
                e
            )))
        }
    };

    let merged = merge_config(&existing, entries);
    if merged == existing {
        return Ok(());
    }

    let dir = config_path.parent().ok_or_else(|| {
        ConfigWriteError::Write(format!("{} has no parent directory", config_path.display()))
    })?;

    // stage the merged text next to the target so the rename stays on one
    // filesystem, then swap it in
    let mut tmp =
        NamedTempFile::new_in(dir).map_err(|e| ConfigWriteError::Write(format!("{}", e)))?;
    tmp.write_all(merged.as_bytes())
        .map_err(|e| ConfigWriteError::Write(format!("{}", e)))?;
    tmp.persist(config_path)
        .map_err(|e| ConfigWriteError::Write(format!("{}", e)))?;

    fs::set_permissions(config_path, fs::Permissions::from_mode(0o600))
        .map_err(|e| ConfigWriteError::Write(format!("{}", e)))
}

// A Host line opens a stanza. Both `Host alias` and `Host=alias` forms
// appear in the wild, and the keyword is case-insensitive.
fn host_aliases(line: &str) -> Option<Vec<&str>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let split_at = trimmed.find(|c: char| c == '=' || c.is_whitespace())?;
    let (key, rest) = trimmed.split_at(split_at);
    if !key.eq_ignore_ascii_case("host") {
        return None;
    }

    let value = rest.trim_start_matches(|c: char| c == '=' || c.is_whitespace());
    Some(value.split_whitespace().collect())
}

fn is_filler(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn push_appended(out: &mut String, stanza: &str) {
    if !out.is_empty() {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
    }
    out.push_str(stanza);
}
