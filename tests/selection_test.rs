// Selection propagation over the built-in catalog

use hardshell::catalog::default_catalog;
use hardshell::selection::SelectionState;

#[test]
fn test_leaf_toggle_updates_ancestors_per_and_rule() {
    let catalog = default_catalog();
    let mut state = SelectionState::new(&catalog);

    // Select the ssh children one by one; "ssh" turns on only with the last.
    state.toggle(&catalog, "ssh-root").unwrap();
    state.toggle(&catalog, "ssh-keys").unwrap();
    assert!(!state.is_selected("ssh"));

    state.toggle(&catalog, "ssh-limits").unwrap();
    assert!(state.is_selected("ssh"));

    // Breaking the AND cascades the ancestor back to false.
    state.toggle(&catalog, "ssh-keys").unwrap();
    assert!(!state.is_selected("ssh"));
    assert!(state.is_selected("ssh-root"));
}

#[test]
fn test_parent_toggle_cascades_through_three_levels() {
    let catalog = default_catalog();
    let mut state = SelectionState::new(&catalog);

    state.toggle(&catalog, "network").unwrap();
    for id in ["network", "firewall", "fw-ufw", "fw-logging", "net-sysctl"] {
        assert!(state.is_selected(id), "{id} should cascade on");
    }

    state.toggle(&catalog, "network").unwrap();
    for id in ["network", "firewall", "fw-ufw", "fw-logging", "net-sysctl"] {
        assert!(!state.is_selected(id), "{id} should cascade off");
    }
}

#[test]
fn test_mid_level_toggle_recomputes_upward_only_to_consistency() {
    let catalog = default_catalog();
    let mut state = SelectionState::new(&catalog);

    // Selecting the firewall subtree does not select its network parent
    // while net-sysctl stays off.
    state.toggle(&catalog, "firewall").unwrap();
    assert!(state.is_selected("fw-ufw"));
    assert!(state.is_selected("fw-logging"));
    assert!(!state.is_selected("network"));

    state.toggle(&catalog, "net-sysctl").unwrap();
    assert!(state.is_selected("network"));
}

#[test]
fn test_tri_state_invariant_holds_after_arbitrary_sequences() {
    let catalog = default_catalog();
    let mut state = SelectionState::new(&catalog);
    let sequence = [
        "ssh", "fw-ufw", "kernel", "ssh-keys", "network", "auditd", "kernel-aslr", "ssh",
        "net-sysctl", "updates",
    ];

    for id in sequence {
        state.toggle(&catalog, id).unwrap();
        for interior in catalog.ids_in_order() {
            let node = catalog.get(interior).unwrap();
            if !node.has_children() {
                continue;
            }
            let all_children = node.children.iter().all(|c| state.is_selected(c));
            assert_eq!(
                state.is_selected(interior),
                all_children,
                "invariant broken at {interior} after toggling {id}"
            );
        }
    }
}

#[test]
fn test_selected_ids_follow_catalog_order() {
    let catalog = default_catalog();
    let mut state = SelectionState::new(&catalog);
    // Toggle in reverse of catalog order; output order must not care.
    state.toggle(&catalog, "updates").unwrap();
    state.toggle(&catalog, "kernel-modules").unwrap();
    state.toggle(&catalog, "ssh-root").unwrap();

    let ids = state.selected_ids(&catalog);
    assert_eq!(ids, vec!["ssh-root", "kernel-modules", "updates"]);
}
