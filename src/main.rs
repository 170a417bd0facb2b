mod accounts;
mod commands;
mod constants;
mod keys;
mod paths;
mod report;
mod sshconfig;
mod util;

fn main() {
    commands::run();
}
