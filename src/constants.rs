// list of program constants
pub const APP_NAME: &'static str = "sshsmith";
pub const SSH_DIR_NAME: &'static str = ".ssh";
pub const KEY_DIR_NAME: &'static str = "sshsmith";
pub const SSH_CONFIG_FILE_NAME: &'static str = "config";
pub const DEFAULT_ACCOUNTS_FILE: &'static str = "config.yaml";

pub const RSA_KEY_BITS: usize = 4096;
