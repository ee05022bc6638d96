//! Dry runs never modify the store
//!
//! Property tests over randomly populated workspaces.

use proptest::prelude::*;
use reforge_engine::{HandlerRegistry, MigrationConfig, MigrationQueue, Migrator};
use reforge_foundation::{ComponentTag, Value};
use reforge_storage::{Component, Document, DocumentBackend, Handle, Object, Workspace};

/// What a generated object carries.
#[derive(Clone, Copy, Debug)]
struct Shape {
    manip: bool,
    bounds: bool,
    smoothing: f64,
}

fn shape() -> impl Strategy<Value = Shape> {
    (any::<bool>(), any::<bool>(), -0.5f64..1.5).prop_map(|(manip, bounds, smoothing)| Shape {
        manip,
        bounds,
        smoothing,
    })
}

fn build(shapes: &[Shape]) -> (Workspace, MigrationQueue) {
    let mut ws = Workspace::new();
    let ids: Vec<_> = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let id = ws.spawn(format!("object{i}"));
            ws.attach(id, Component::new("Transform")).unwrap();
            if shape.manip {
                ws.attach(
                    id,
                    Component::new("OldManip").with("smoothingAmountOneHandManip", shape.smoothing),
                )
                .unwrap();
            }
            if shape.bounds {
                ws.attach(
                    id,
                    Component::new("OldBounds").with("activation", Value::enumeration("ActivateOnStart")),
                )
                .unwrap();
            }
            id
        })
        .collect();

    ws.save_as_template(ids[0], "first.tpl").unwrap();
    ws.save_aggregate("all.agg", &ids).unwrap();

    let mut queue = MigrationQueue::new();
    for id in &ids {
        queue.enqueue(&ws, &Handle::Instance(*id));
    }
    queue.enqueue(&ws, &Handle::template("first.tpl"));
    queue.enqueue(&ws, &Handle::aggregate("all.agg"));
    (ws, queue)
}

fn snapshot(ws: &Workspace) -> (Vec<Object>, Vec<Option<Document>>) {
    let instances = ws.instances().cloned().collect();
    let documents = ["first.tpl", "all.agg"]
        .iter()
        .map(|path| ws.backend().read(path).unwrap())
        .collect();
    (instances, documents)
}

proptest! {
    #[test]
    fn dry_run_never_mutates(shapes in prop::collection::vec(shape(), 1..12)) {
        let (mut ws, queue) = build(&shapes);
        let before = snapshot(&ws);

        let mut migrator = Migrator::new(HandlerRegistry::builtin())
            .with_config(MigrationConfig::unattended());
        let report = migrator.migrate_all(&mut ws, &queue, true);

        prop_assert!(report.dry_run);
        prop_assert_eq!(report.objects().len(), queue.len());
        prop_assert_eq!(report.summary().migrated, 0);
        prop_assert!(snapshot(&ws) == before);
        prop_assert!(!ws.has_staged("first.tpl"));
        prop_assert!(!ws.has_staged("all.agg"));
    }

    #[test]
    fn dry_run_predicts_real_run(shapes in prop::collection::vec(shape(), 1..12)) {
        let tag = ComponentTag::new("OldManip");
        let (mut ws, queue) = build(&shapes);
        let mut migrator = Migrator::new(HandlerRegistry::builtin());

        let planned = migrator.migrate(&mut ws, &queue, &tag, true);
        let applied = migrator.migrate(&mut ws, &queue, &tag, false);

        let planned = planned.summary();
        let applied = applied.summary();
        prop_assert_eq!(planned.planned, applied.migrated);
        prop_assert_eq!(planned.failed, applied.failed);
        prop_assert_eq!(planned.unchanged, applied.unchanged);
    }
}
