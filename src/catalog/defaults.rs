// Built-in hardening catalog
//
// The default option tree shipped with the binary. A custom catalog can be
// loaded from a file instead; see `load_defs_from_file`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

use super::store::CatalogStore;
use super::types::OptionDef;

static DEFAULT_DEFS: Lazy<Vec<OptionDef>> = Lazy::new(build_default_defs);

/// A fresh store built from the built-in definitions. Each call returns an
/// independent store so one session's prompt refinements never leak into
/// another.
pub fn default_catalog() -> CatalogStore {
    CatalogStore::from_defs(&DEFAULT_DEFS)
        .expect("built-in catalog definitions must have unique ids")
}

/// Load authoring defs from a TOML catalog file.
pub fn load_defs_from_file(path: &Path) -> Result<Vec<OptionDef>> {
    #[derive(serde::Deserialize)]
    struct CatalogFile {
        options: Vec<OptionDef>,
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    let file: CatalogFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
    Ok(file.options)
}

fn build_default_defs() -> Vec<OptionDef> {
    vec![
        OptionDef::new("ssh", "SSH service")
            .with_description("Harden the OpenSSH daemon configuration")
            .with_children(vec![
                OptionDef::new("ssh-root", "Disable root login")
                    .with_description("Refuse direct root logins over SSH")
                    .with_prompt(
                        "Set PermitRootLogin no in /etc/ssh/sshd_config, keeping any existing \
                         Match blocks intact, and reload sshd only if the config validates with \
                         sshd -t.",
                    ),
                OptionDef::new("ssh-keys", "Key-only authentication")
                    .with_description("Disable password authentication in favour of keys")
                    .with_prompt(
                        "Disable PasswordAuthentication and ChallengeResponseAuthentication in \
                         sshd_config. Refuse to apply the change when no authorized_keys file \
                         exists for any non-root user, so the host cannot be locked out.",
                    ),
                OptionDef::new("ssh-limits", "Connection limits")
                    .with_description("Rate-limit and time-out SSH sessions")
                    .with_prompt(
                        "Set MaxAuthTries 3, LoginGraceTime 30, ClientAliveInterval 300 and \
                         ClientAliveCountMax 2 in sshd_config.",
                    ),
            ]),
        OptionDef::new("network", "Network")
            .with_description("Firewall and network stack hardening")
            .with_children(vec![
                OptionDef::new("firewall", "Firewall")
                    .with_description("Default-deny inbound firewall")
                    .with_children(vec![
                        OptionDef::new("fw-ufw", "Enable ufw")
                            .with_description("Default-deny incoming policy with SSH allowed")
                            .with_prompt(
                                "Install and enable ufw with default deny incoming, default \
                                 allow outgoing, and an allow rule for OpenSSH. Skip every step \
                                 that is already in the desired state.",
                            ),
                        OptionDef::new("fw-logging", "Firewall logging")
                            .with_description("Log dropped packets at a low rate")
                            .with_prompt("Enable ufw logging at the 'low' level."),
                    ]),
                OptionDef::new("net-sysctl", "Network sysctls")
                    .with_description("Kernel network parameters")
                    .with_prompt(
                        "Write a sysctl drop-in under /etc/sysctl.d that disables ICMP \
                         redirects and source routing, enables reverse path filtering and TCP \
                         SYN cookies, then apply it with sysctl --system.",
                    ),
            ]),
        OptionDef::new("kernel", "Kernel and boot")
            .with_description("Kernel-level mitigations; most need a restart to take effect")
            .with_reboot(true)
            .with_children(vec![
                OptionDef::new("kernel-modules", "Blacklist rare modules")
                    .with_description("Disable uncommon filesystem and protocol modules")
                    .with_prompt(
                        "Blacklist cramfs, freevxfs, udf, dccp and sctp kernel modules via a \
                         modprobe.d drop-in with install directives pointing at /bin/false.",
                    ),
                OptionDef::new("kernel-aslr", "Address space randomization")
                    .with_description("Full ASLR and restricted kernel pointers")
                    .with_prompt(
                        "Ensure kernel.randomize_va_space=2 and kernel.kptr_restrict=2 via a \
                         sysctl drop-in.",
                    ),
            ]),
        OptionDef::new("auditing", "Auditing and logging")
            .with_description("Track privileged activity on the host")
            .with_children(vec![
                OptionDef::new("auditd", "Audit daemon")
                    .with_description("Install auditd with baseline rules")
                    .with_prompt(
                        "Install auditd, enable the service, and add rules that watch \
                         /etc/passwd, /etc/shadow, /etc/sudoers and all sudoers.d files for \
                         writes. Load the rules with augenrules --load.",
                    ),
                OptionDef::new("journald", "Persistent journal")
                    .with_description("Keep systemd journal across reboots")
                    .with_prompt(
                        "Configure systemd-journald with Storage=persistent and a 500M size \
                         cap, then restart the journal service.",
                    ),
            ]),
        OptionDef::new("accounts", "Accounts and access")
            .with_description("Local account policy")
            .with_children(vec![
                OptionDef::new("pw-policy", "Password policy")
                    .with_description("Minimum length and complexity via pwquality")
                    .with_prompt(
                        "Install libpam-pwquality and set minlen=14 with at least one each of \
                         upper, lower, digit and other classes in /etc/security/pwquality.conf.",
                    ),
                OptionDef::new("umask", "Restrictive umask")
                    .with_description("Default umask 027 for login shells")
                    .with_prompt(
                        "Set a default umask of 027 in /etc/login.defs and /etc/profile.d \
                         without duplicating existing entries.",
                    ),
            ]),
        OptionDef::new("updates", "Automatic updates")
            .with_description("Unattended security patches")
            .with_prompt(
                "Install unattended-upgrades and enable the security origin only, with \
                 automatic removal of unused dependencies.",
            ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_builds() {
        let catalog = default_catalog();
        assert!(catalog.len() > 10);
        assert!(catalog.contains("ssh-root"));
        assert!(catalog.contains("fw-ufw"));
    }

    #[test]
    fn test_default_catalog_has_three_level_nesting() {
        let catalog = default_catalog();
        // network -> firewall -> fw-ufw
        assert_eq!(catalog.parent_of("fw-ufw"), Some("firewall"));
        assert_eq!(catalog.parent_of("firewall"), Some("network"));
        assert_eq!(catalog.parent_of("network"), None);
    }

    #[test]
    fn test_kernel_subtree_inherits_reboot_flag() {
        let catalog = default_catalog();
        assert!(catalog.requires_reboot("kernel-aslr"));
        assert!(!catalog.requires_reboot("ssh-root"));
    }

    #[test]
    fn test_each_call_returns_independent_store() {
        let mut first = default_catalog();
        let second = default_catalog();
        first.apply_refinements(&[crate::catalog::PromptRefinement {
            id: "umask".into(),
            new_prompt: "changed".into(),
        }]);
        assert_ne!(second.get("umask").unwrap().prompt, "changed");
    }
}
