use crate::constants;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub struct Paths {
    pub ssh_dir: PathBuf,
    pub keys_dir: PathBuf,
    pub ssh_config_file: PathBuf,
}

impl Paths {
    pub fn resolve() -> Option<Paths> {
        let home_dir = dirs::home_dir()?;
        Some(Paths::under(home_dir.join(constants::SSH_DIR_NAME)))
    }

    pub fn under(ssh_dir: PathBuf) -> Paths {
        let keys_dir = ssh_dir.join(constants::KEY_DIR_NAME);
        let ssh_config_file = ssh_dir.join(constants::SSH_CONFIG_FILE_NAME);
        Paths {
            ssh_dir,
            keys_dir,
            ssh_config_file,
        }
    }

    pub fn init(&self) -> io::Result<()> {
        init_private_dir(&self.ssh_dir)?;
        init_private_dir(&self.keys_dir)
    }
}

fn init_private_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
    }
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
}
