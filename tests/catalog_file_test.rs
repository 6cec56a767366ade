// Loading a catalog from a TOML file

use std::io::Write;

use hardshell::catalog::{load_defs_from_file, CatalogStore};

#[test]
fn test_catalog_loads_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[options]]
id = "ssh"
label = "SSH service"
prompt = "harden sshd"

[[options.children]]
id = "ssh-root"
label = "Disable root login"
prompt = "set PermitRootLogin no"

[[options]]
id = "kernel"
label = "Kernel"
prompt = "sysctl hardening"
requires_reboot = true
"#
    )
    .unwrap();

    let defs = load_defs_from_file(file.path()).unwrap();
    let store = CatalogStore::from_defs(&defs).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(store.parent_of("ssh-root"), Some("ssh"));
    assert!(store.requires_reboot("kernel"));
    assert!(!store.requires_reboot("ssh-root"));
}

#[test]
fn test_malformed_catalog_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "options = \"not a table\"").unwrap();
    assert!(load_defs_from_file(file.path()).is_err());
}

#[test]
fn test_missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(load_defs_from_file(&path).is_err());
}
