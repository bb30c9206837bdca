use vibegraph::core::{resolve_targets, Device, VibeFrame, VibeTarget};

fn devices(names: &[&str]) -> Vec<Device> {
    names.iter().map(|name| Device::new(*name)).collect()
}

#[test]
fn test_override_fills_unlisted_devices() {
    let known = devices(&["A", "B"]);
    let mut frame = VibeFrame::override_all(1_000.0, 0.9);
    frame.targets = vec![VibeTarget::new("A", 0.5)];

    let resolved = resolve_targets(&frame, &known);
    assert_eq!(resolved, vec![Some(0.5), Some(0.9)]);
}

#[test]
fn test_exclusive_leaves_unlisted_devices_unresolved() {
    let known = devices(&["A", "B"]);
    let frame = VibeFrame::exclusive(1_000.0, vec![VibeTarget::new("A", 0.5)]);

    let resolved = resolve_targets(&frame, &known);
    assert_eq!(resolved, vec![Some(0.5), None]);
}

#[test]
fn test_duplicate_targets_last_write_wins() {
    let known = devices(&["A"]);
    let frame = VibeFrame::exclusive(
        1_000.0,
        vec![VibeTarget::new("A", 0.2), VibeTarget::new("A", 0.8)],
    );

    assert_eq!(resolve_targets(&frame, &known), vec![Some(0.8)]);
}

#[test]
fn test_unknown_device_targets_are_dropped() {
    let known = devices(&["A"]);
    let frame = VibeFrame::exclusive(1_000.0, vec![VibeTarget::new("ghost", 0.6)]);

    assert_eq!(resolve_targets(&frame, &known), vec![None]);
}

#[test]
fn test_no_known_devices_resolves_nothing() {
    let frame = VibeFrame::override_all(1_000.0, 0.9);
    assert!(resolve_targets(&frame, &[]).is_empty());
}
