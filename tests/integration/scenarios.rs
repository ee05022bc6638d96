//! End-to-end migration of each kind of candidate
//!
//! Every scenario replaces `OldManip` with `NewManip`.

use reforge_engine::{HandlerRegistry, MigrationQueue, MigrationReport, Migrator};
use reforge_foundation::{ComponentTag, ObjectId, Value};
use reforge_storage::{Component, Handle, Workspace};

fn old_manip() -> Component {
    Component::new("OldManip")
        .with("manipulationType", Value::enumeration("OneHanded"))
        .with("oneHandRotationModeNear", Value::enumeration("FaceUser"))
        .with("smoothingActive", true)
        .with("smoothingAmountOneHandManip", 0.2)
}

fn migrate(ws: &mut Workspace, queue: &MigrationQueue, dry_run: bool) -> MigrationReport {
    Migrator::new(HandlerRegistry::builtin()).migrate(ws, queue, &ComponentTag::new("OldManip"), dry_run)
}

// =============================================================================
// Instance
// =============================================================================

#[test]
fn instance_is_migrated_in_place() {
    let mut ws = Workspace::new();
    let door = ws.spawn("door");
    ws.attach(door, Component::new("Transform")).unwrap();
    ws.attach(door, old_manip()).unwrap();

    let mut queue = MigrationQueue::new();
    assert_eq!(queue.enqueue(&ws, &Handle::Instance(door)), 1);
    let report = migrate(&mut ws, &queue, false);

    assert!(!report.has_failures());
    let obj = ws.instance(door).unwrap();
    assert!(!obj.has("OldManip"));
    assert!(obj.has("Transform"));

    let new = obj.component("NewManip").unwrap();
    assert_eq!(
        new.field("manipulationType"),
        Some(&Value::from(vec![Value::enumeration("OneHanded")]))
    );
    assert_eq!(new.field("oneHandRotationModeNear"), Some(&Value::enumeration("FaceUser")));
    assert_eq!(new.field("smoothingNear"), Some(&Value::Bool(true)));
    assert_eq!(new.field("scaleLerpTime"), Some(&Value::Float(0.2)));
}

// =============================================================================
// Template
// =============================================================================

#[test]
fn template_reload_shows_replacement() {
    let mut ws = Workspace::new();
    let door = ws.spawn("door");
    ws.attach(door, old_manip()).unwrap();
    ws.save_as_template(door, "props/door.tpl").unwrap();

    let mut queue = MigrationQueue::new();
    queue.enqueue(&ws, &Handle::template("props/door.tpl"));
    let report = migrate(&mut ws, &queue, false);

    assert_eq!(report.summary().migrated, 1);
    assert!(!ws.has_staged("props/door.tpl"));

    let reloaded = ws.load_template("props/door.tpl").unwrap();
    assert!(reloaded.has("NewManip"));
    assert!(!reloaded.has("OldManip"));
    assert_eq!(reloaded.name, "door");

    // The instance the template was made from is a separate object.
    assert!(ws.instance(door).unwrap().has("OldManip"));
}

#[test]
fn template_and_its_source_instance_together() {
    let mut ws = Workspace::new();
    let door = ws.spawn("door");
    ws.attach(door, old_manip()).unwrap();
    ws.save_as_template(door, "props/door.tpl").unwrap();

    let mut queue = MigrationQueue::new();
    queue.enqueue(&ws, &Handle::Instance(door));
    queue.enqueue(&ws, &Handle::template("props/door.tpl"));
    let report = migrate(&mut ws, &queue, false);

    assert_eq!(report.summary().migrated, 2);
    assert!(ws.instance(door).unwrap().has("NewManip"));
    assert!(ws.load_template("props/door.tpl").unwrap().has("NewManip"));
}

// =============================================================================
// Aggregate
// =============================================================================

#[test]
fn aggregate_migrates_only_matching_root() {
    let mut ws = Workspace::new();
    let floor = ws.spawn("floor");
    ws.attach(floor, Component::new("Renderer").with("mesh", "plane")).unwrap();
    let door = ws.spawn("door");
    ws.attach(door, old_manip()).unwrap();
    ws.attach(door, Component::new("Renderer").with("mesh", "door")).unwrap();
    let lamp = ws.spawn("lamp");
    ws.attach(lamp, Component::new("Light").with("intensity", 0.8)).unwrap();
    ws.save_aggregate("rooms/hall.agg", &[floor, door, lamp]).unwrap();
    let before = ws.open_aggregate("rooms/hall.agg").unwrap();

    let mut queue = MigrationQueue::new();
    assert_eq!(queue.enqueue(&ws, &Handle::aggregate("rooms/hall.agg")), 3);
    let report = migrate(&mut ws, &queue, false);

    let outcomes: Vec<_> = report.objects().iter().map(|o| o.outcome.label()).collect();
    assert_eq!(outcomes, vec!["unchanged", "migrated", "unchanged"]);

    let after = ws.open_aggregate("rooms/hall.agg").unwrap();
    assert_eq!(after.len(), 3);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);

    let migrated = &after[1];
    assert_eq!(migrated.id, ObjectId::new(1, 1));
    assert!(migrated.has("NewManip"));
    assert!(!migrated.has("OldManip"));
    assert_eq!(
        migrated.component("Renderer"),
        before[1].component("Renderer")
    );
}

#[test]
fn aggregate_root_handle_migrates_one_root() {
    let mut ws = Workspace::new();
    let ids: Vec<_> = (0..3).map(|i| ws.spawn(format!("panel{i}"))).collect();
    for id in &ids {
        ws.attach(*id, old_manip()).unwrap();
    }
    ws.save_aggregate("panels.agg", &ids).unwrap();

    let mut queue = MigrationQueue::new();
    queue.enqueue(
        &ws,
        &Handle::AggregateRoot {
            path: "panels.agg".into(),
            root: ObjectId::new(2, 1),
        },
    );
    migrate(&mut ws, &queue, false);

    let roots = ws.open_aggregate("panels.agg").unwrap();
    let migrated: Vec<_> = roots.iter().map(|r| r.has("NewManip")).collect();
    assert_eq!(migrated, vec![false, false, true]);
}

#[test]
fn aggregate_with_repeated_root_leaves_no_legacy_component() {
    let mut ws = Workspace::new();
    let panel = ws.spawn("panel");
    ws.attach(panel, old_manip()).unwrap();
    ws.save_aggregate("dup.agg", &[panel, panel]).unwrap();

    let mut queue = MigrationQueue::new();
    assert_eq!(queue.enqueue(&ws, &Handle::aggregate("dup.agg")), 1);
    let report = migrate(&mut ws, &queue, false);
    assert!(!report.has_failures());

    let roots = ws.open_aggregate("dup.agg").unwrap();
    assert_eq!(roots.len(), 1);
    assert!(roots.iter().all(|r| r.has("NewManip") && !r.has("OldManip")));
}

// =============================================================================
// Failure Isolation
// =============================================================================

#[test]
fn persistence_failure_leaves_document_unchanged() {
    let mut ws = Workspace::new();
    let door = ws.spawn("door");
    ws.attach(door, old_manip()).unwrap();
    ws.save_as_template(door, "props/door.tpl").unwrap();
    let lamp = ws.spawn("lamp");
    ws.attach(lamp, old_manip()).unwrap();

    let mut queue = MigrationQueue::new();
    queue.enqueue(&ws, &Handle::template("props/door.tpl"));
    queue.enqueue(&ws, &Handle::Instance(lamp));
    ws.backend_mut().set_read_only(true);

    let report = migrate(&mut ws, &queue, false);

    let (key, err) = report.failures().next().unwrap();
    assert_eq!(key.origin.path(), Some("props/door.tpl"));
    assert!(err.is_persistence());
    assert!(!ws.has_staged("props/door.tpl"));
    assert!(ws.load_template("props/door.tpl").unwrap().has("OldManip"));

    // Instances need no document write, so the run carries on.
    assert!(ws.instance(lamp).unwrap().has("NewManip"));
    assert_eq!(report.summary().migrated, 1);
}

#[test]
fn unresolved_candidates_never_reach_the_report() {
    let mut ws = Workspace::new();
    let door = ws.spawn("door");
    ws.attach(door, old_manip()).unwrap();
    ws.destroy(door).unwrap();

    let mut queue = MigrationQueue::new();
    queue.enqueue(&ws, &Handle::Instance(door));
    queue.enqueue(&ws, &Handle::template("missing.tpl"));
    let report = migrate(&mut ws, &queue, false);

    assert!(queue.is_empty());
    assert!(report.objects().is_empty());
}
