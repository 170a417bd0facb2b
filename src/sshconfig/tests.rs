use super::*;
use crate::keys::key_pair_paths;

fn entry(name: &str, hostname: &str) -> (AccountSpec, KeyPair) {
    let account = AccountSpec {
        name: name.to_string(),
        email: format!("{}@example.com", name),
        hostname: hostname.to_string(),
    };
    let pair = key_pair_paths(Path::new("/home/me/.ssh/sshsmith"), name);
    (account, pair)
}

#[test]
fn renders_the_expected_stanza() {
    let (account, pair) = entry("personal", "github.com");
    assert_eq!(
        render_stanza(&account, &pair),
        "Host personal\n\
         \x20 HostName github.com\n\
         \x20 User git\n\
         \x20 IdentityFile /home/me/.ssh/sshsmith/personal\n\
         \x20 IdentitiesOnly yes\n"
    );
}

#[test]
fn merge_into_empty_config_appends_in_account_order() {
    let entries = vec![entry("personal", "github.com"), entry("work", "gitlab.com")];
    let merged = merge_config("", &entries);
    let expected = format!(
        "{}\n{}",
        render_stanza(&entries[0].0, &entries[0].1),
        render_stanza(&entries[1].0, &entries[1].1)
    );
    assert_eq!(merged, expected);
}

#[test]
fn merge_with_no_entries_returns_the_input_unchanged() {
    let existing = "# notes\nHost other\n  HostName example.org";
    assert_eq!(merge_config(existing, &[]), existing);
}

#[test]
fn unrelated_stanzas_and_comments_survive_byte_for_byte() {
    let existing = "# my config\n\n\
                    Host other\n\
                    \x20   HostName example.org\n\
                    \x20   User me\n\n\
                    Host personal\n\
                    \x20 HostName old.example.com\n\
                    \x20 User git\n\
                    \x20 IdentityFile /old/path\n\
                    \x20 IdentitiesOnly yes\n";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    let expected = format!(
        "# my config\n\n\
         Host other\n\
         \x20   HostName example.org\n\
         \x20   User me\n\n{}",
        render_stanza(&entries[0].0, &entries[0].1)
    );
    assert_eq!(merged, expected);
}

#[test]
fn owned_stanza_is_replaced_in_place() {
    let existing = "Host personal\n  HostName old\n\nHost other\n  HostName keep.me\n";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    let expected = format!(
        "{}\nHost other\n  HostName keep.me\n",
        render_stanza(&entries[0].0, &entries[0].1)
    );
    assert_eq!(merged, expected);
}

#[test]
fn missing_accounts_are_appended_after_existing_content() {
    let existing = "Host work\n  HostName old\n";
    let entries = vec![entry("personal", "github.com"), entry("work", "gitlab.com")];

    let merged = merge_config(existing, &entries);
    let expected = format!(
        "{}\n{}",
        render_stanza(&entries[1].0, &entries[1].1),
        render_stanza(&entries[0].0, &entries[0].1)
    );
    assert_eq!(merged, expected);
}

#[test]
fn comment_ahead_of_the_next_stanza_is_preserved() {
    let existing = "Host personal\n  HostName old\n\n# work machines\nHost other\n  HostName o\n";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    let expected = format!(
        "{}\n# work machines\nHost other\n  HostName o\n",
        render_stanza(&entries[0].0, &entries[0].1)
    );
    assert_eq!(merged, expected);
}

#[test]
fn merge_is_idempotent() {
    let existing = "# preamble\n\nHost other\n  HostName example.org\n\nHost personal\n  HostName old\n";
    let entries = vec![
        entry("personal", "github.com"),
        entry("work", "gitlab.com"),
        entry("backup", "bitbucket.org"),
    ];

    let once = merge_config(existing, &entries);
    let twice = merge_config(&once, &entries);
    assert_eq!(once, twice);
}

#[test]
fn lowercase_and_equals_forms_open_a_stanza() {
    let existing = "host personal\n  hostname=old.example.com\n";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    assert_eq!(merged, render_stanza(&entries[0].0, &entries[0].1));
}

#[test]
fn wildcard_stanzas_are_never_owned() {
    let existing = "Host *\n  ServerAliveInterval 60\n";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    let expected = format!(
        "Host *\n  ServerAliveInterval 60\n\n{}",
        render_stanza(&entries[0].0, &entries[0].1)
    );
    assert_eq!(merged, expected);
}

#[test]
fn multi_alias_host_line_with_an_owned_name_is_replaced() {
    let existing = "Host personal home\n  HostName old\n";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    assert_eq!(merged, render_stanza(&entries[0].0, &entries[0].1));
}

#[test]
fn owned_stanza_without_trailing_newline_is_replaced() {
    let existing = "Host personal\n  HostName old";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    assert_eq!(merged, render_stanza(&entries[0].0, &entries[0].1));
}

#[test]
fn only_the_first_duplicate_stanza_is_replaced() {
    let existing = "Host personal\n  HostName a\n\nHost personal\n  HostName b\n";
    let entries = vec![entry("personal", "github.com")];

    let merged = merge_config(existing, &entries);
    let expected = format!(
        "{}\nHost personal\n  HostName b\n",
        render_stanza(&entries[0].0, &entries[0].1)
    );
    assert_eq!(merged, expected);
}

#[test]
fn update_writes_the_file_with_restricted_permissions() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config");
    let entries = vec![entry("personal", "github.com")];

    update(&config_path, &entries).unwrap();

    let written = fs::read_to_string(&config_path).unwrap();
    assert_eq!(written, render_stanza(&entries[0].0, &entries[0].1));
    let mode = fs::metadata(&config_path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn update_merges_with_the_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config");
    fs::write(&config_path, "Host other\n  HostName example.org\n").unwrap();
    let entries = vec![entry("personal", "github.com")];

    update(&config_path, &entries).unwrap();

    let written = fs::read_to_string(&config_path).unwrap();
    let expected = format!(
        "Host other\n  HostName example.org\n\n{}",
        render_stanza(&entries[0].0, &entries[0].1)
    );
    assert_eq!(written, expected);

    // a second run has nothing left to change
    update(&config_path, &entries).unwrap();
    assert_eq!(fs::read_to_string(&config_path).unwrap(), written);
}
