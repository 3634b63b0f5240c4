//! History discipline tests: exact undo inversion over arbitrary command
//! sequences, redo reproduction, and linear-history semantics.

use breakscreen_core::{Point, Rect, Size, WidgetId};
use breakscreen_designer::widget::{BoxWidget, WidgetData, WidgetProperties};
use breakscreen_designer::{factory, Alignment, Designer};

use proptest::prelude::*;

/// Comparable widget-collection state: ids, geometry, z-indices, group
/// membership, and interactivity.
type StateSnapshot = Vec<(WidgetId, Point, Size, i32, Option<WidgetId>, bool)>;

fn snapshot(designer: &Designer) -> StateSnapshot {
    let mut state: StateSnapshot = designer
        .canvas
        .widgets()
        .map(|w| {
            (
                w.id.clone(),
                w.position,
                w.size,
                w.z_index,
                w.group_id.clone(),
                w.interactive,
            )
        })
        .collect();
    state.sort_by(|a, b| a.0.cmp(&b.0));
    state
}

fn seed_box(id: &str, x: f64, y: f64, z: i32) -> WidgetData {
    WidgetData {
        id: id.to_string(),
        position: Point::new(x, y),
        size: Size::new(80.0, 40.0),
        z_index: z,
        properties: WidgetProperties::Box(BoxWidget::default()),
    }
}

fn seeded_designer() -> Designer {
    let mut designer = Designer::headless();
    designer.load_layout(&[
        seed_box("widget-seed-a", 10.0, 10.0, 1),
        seed_box("widget-seed-b", 150.0, 40.0, 2),
        seed_box("widget-seed-c", 320.0, 80.0, 3),
    ]);
    designer
}

/// One scripted editing step, driven by a fuzz byte.
fn apply_op(designer: &mut Designer, op: u8) {
    match op % 10 {
        0 => {
            let x = f64::from(op) * 7.0 % 300.0;
            let y = f64::from(op) * 11.0 % 200.0;
            designer
                .add_widget(factory::box_widget(Rect::new(x, y, 60.0, 40.0)))
                .unwrap();
        }
        1 => designer.select_all(),
        2 => {
            let ids = designer.canvas.ids_z_order();
            if !ids.is_empty() {
                let id = ids[op as usize % ids.len()].clone();
                designer.select_widget(&id, op % 3 == 0);
            }
        }
        3 => designer.delete_selected_widgets().unwrap(),
        4 => {
            designer.group_selection().unwrap();
        }
        5 => designer.ungroup_selection().unwrap(),
        6 => designer.bring_selection_to_front().unwrap(),
        7 => designer.align_widgets(Alignment::Left).unwrap(),
        8 => {
            if let Some(id) = designer.canvas.ids_z_order().last().cloned() {
                let center = designer.canvas.widget_rect(&id, false).unwrap().center();
                designer.pointer_down(center, false);
                let target = Point::new(
                    center.x + f64::from(op % 17),
                    center.y + f64::from(op % 5),
                );
                designer.pointer_move(target);
                designer.pointer_up(target).unwrap();
            }
        }
        _ => {
            designer.copy_selection();
            designer.paste_from_clipboard().unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// N commands then N undos restore the initial collection exactly;
    /// redoing everything reproduces the final state; undoing again
    /// still lands on the initial state.
    #[test]
    fn prop_undo_all_restores_initial_state(ops in proptest::collection::vec(any::<u8>(), 1..24)) {
        let mut designer = seeded_designer();
        let initial = snapshot(&designer);

        for op in &ops {
            apply_op(&mut designer, *op);
        }
        let final_state = snapshot(&designer);

        while designer.can_undo() {
            prop_assert!(designer.undo().unwrap());
        }
        prop_assert_eq!(snapshot(&designer), initial.clone());

        while designer.can_redo() {
            prop_assert!(designer.redo().unwrap());
        }
        prop_assert_eq!(snapshot(&designer), final_state);

        while designer.can_undo() {
            prop_assert!(designer.undo().unwrap());
        }
        prop_assert_eq!(snapshot(&designer), initial);
    }
}

#[test]
fn test_new_command_after_undo_discards_redo() {
    let mut designer = seeded_designer();

    designer
        .add_widget(factory::box_widget(Rect::new(0.0, 0.0, 40.0, 40.0)))
        .unwrap();
    designer.undo().unwrap();
    assert!(designer.can_redo());

    designer
        .add_widget(factory::box_widget(Rect::new(50.0, 50.0, 40.0, 40.0)))
        .unwrap();
    assert!(!designer.can_redo());
}

#[test]
fn test_undo_depth_capped_at_fifty() {
    let mut designer = Designer::headless();
    for i in 0..60 {
        designer
            .add_widget(factory::box_widget(Rect::new(
                f64::from(i) * 5.0,
                0.0,
                40.0,
                40.0,
            )))
            .unwrap();
    }
    assert_eq!(designer.widget_count(), 60);

    let mut undone = 0;
    while designer.undo().unwrap() {
        undone += 1;
    }
    // The ten oldest entries were silently dropped.
    assert_eq!(undone, 50);
    assert_eq!(designer.widget_count(), 10);
}

#[test]
fn test_history_events_published() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut designer = Designer::headless();
    let seen: Rc<RefCell<Vec<(bool, bool)>>> = Rc::new(RefCell::new(Vec::new()));
    let seen2 = Rc::clone(&seen);
    designer.events().subscribe(
        breakscreen_core::EventFilter::Categories(vec![breakscreen_core::EventCategory::History]),
        move |event| {
            if let breakscreen_core::DesignerEvent::HistoryChanged {
                can_undo, can_redo, ..
            } = event
            {
                seen2.borrow_mut().push((*can_undo, *can_redo));
            }
        },
    );

    designer
        .add_widget(factory::box_widget(Rect::new(0.0, 0.0, 40.0, 40.0)))
        .unwrap();
    designer.undo().unwrap();
    designer.redo().unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.as_slice(), &[(true, false), (false, true), (true, false)]);
}
