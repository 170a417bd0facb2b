use clap::{crate_description, crate_version, App, Arg};
use std::path::PathBuf;

use crate::{
    accounts::{self, AccountSpec},
    constants,
    keys::{self, KeyPair, ProvisionedKey},
    paths::Paths,
    report, sshconfig, util,
};

const CONFIG_ARG_NAME: &'static str = "CONFIG";

pub fn run() {
    let matches = App::new(constants::APP_NAME)
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::with_name(CONFIG_ARG_NAME)
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("accounts file to read instead of ./config.yaml"),
        )
        .get_matches();

    let accounts_path = PathBuf::from(
        matches
            .value_of(CONFIG_ARG_NAME)
            .unwrap_or(constants::DEFAULT_ACCOUNTS_FILE),
    );

    let specs = match accounts::load_accounts(&accounts_path) {
        Ok(specs) => specs,
        Err(e) => util::exit(&format!("{}", e), 1),
    };

    let paths = match Paths::resolve() {
        Some(paths) => paths,
        None => util::exit("Unable to locate the home directory", 1),
    };
    if let Err(e) = paths.init() {
        util::exit(
            &format!("Unable to prepare {}: {}", paths.ssh_dir.display(), e),
            1,
        );
    }

    let provisioned = provision_all(&specs, &paths);

    let entries: Vec<(AccountSpec, KeyPair)> = specs
        .into_iter()
        .zip(provisioned.iter().map(|key| key.pair.clone()))
        .collect();

    if let Err(e) = sshconfig::update(&paths.ssh_config_file, &entries) {
        keys::remove_created(&provisioned);
        util::exit(&format!("{}", e), 1);
    }
    println!("Updated {}", paths.ssh_config_file.display());

    if let Err(e) = report::print_keys(&entries) {
        util::exit(&e, 1);
    }
}

// Keys are provisioned strictly in account order; a failure removes every
// pair created earlier in the same run before aborting.
fn provision_all(specs: &[AccountSpec], paths: &Paths) -> Vec<ProvisionedKey> {
    let mut provisioned = Vec::new();
    for account in specs {
        println!("Processing account {}...", account.name);
        match keys::provision(account, &paths.keys_dir) {
            Ok(key) => {
                if key.created {
                    println!(
                        "Generated a {}-bit RSA key pair for {}",
                        constants::RSA_KEY_BITS,
                        account.name
                    );
                } else {
                    println!("Key pair for {} already exists", account.name);
                }
                provisioned.push(key);
            }
            Err(e) => {
                keys::remove_created(&provisioned);
                util::exit(&format!("{}", e), 1);
            }
        }
    }
    provisioned
}
