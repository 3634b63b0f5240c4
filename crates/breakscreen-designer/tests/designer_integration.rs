//! Designer editing-API integration tests.

use breakscreen_core::{Point, Rect};
use breakscreen_designer::{factory, Alignment, Designer, DistributeAxis, SizeDimension};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .try_init();
}

fn add_box(designer: &mut Designer, rect: Rect) -> String {
    designer.add_widget(factory::box_widget(rect)).unwrap()
}

#[test]
fn test_add_move_undo_redo_workflow() {
    init_tracing();
    let mut designer = Designer::headless();

    let a = add_box(&mut designer, Rect::new(10.0, 10.0, 100.0, 50.0));
    let b = add_box(&mut designer, Rect::new(200.0, 10.0, 100.0, 50.0));
    assert_eq!(designer.widget_count(), 2);
    // The most recently added widget is selected.
    assert_eq!(designer.selected_ids(), vec![b.clone()]);

    // Drag b by (30, 20): many move ticks, one history entry.
    designer.pointer_down(Point::new(250.0, 35.0), false);
    designer.pointer_move(Point::new(260.0, 40.0));
    designer.pointer_move(Point::new(280.0, 55.0));
    designer.pointer_up(Point::new(280.0, 55.0)).unwrap();

    assert_eq!(
        designer.widget_data(&b).unwrap().position,
        Point::new(230.0, 30.0)
    );
    assert_eq!(designer.undo_description().as_deref(), Some("Move Widget"));

    designer.undo().unwrap();
    assert_eq!(
        designer.widget_data(&b).unwrap().position,
        Point::new(200.0, 10.0)
    );

    designer.redo().unwrap();
    assert_eq!(
        designer.widget_data(&b).unwrap().position,
        Point::new(230.0, 30.0)
    );

    while designer.can_undo() {
        designer.undo().unwrap();
    }
    assert_eq!(designer.widget_count(), 0);
    assert!(designer.widget_data(&a).is_none());
}

#[test]
fn test_cancel_gesture_restores_and_records_nothing() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(10.0, 10.0, 100.0, 50.0));
    let depth_before_undo_entries = designer.can_undo();
    assert!(depth_before_undo_entries);

    designer.pointer_down(Point::new(60.0, 35.0), false);
    designer.pointer_move(Point::new(160.0, 135.0));
    assert_eq!(
        designer.widget_data(&a).unwrap().position,
        Point::new(110.0, 110.0)
    );

    designer.cancel_gesture();
    assert_eq!(
        designer.widget_data(&a).unwrap().position,
        Point::new(10.0, 10.0)
    );
    // Only the add is in history.
    assert_eq!(designer.undo_description().as_deref(), Some("Add box Widget"));
    assert!(!designer.gesture_active());
}

#[test]
fn test_align_anchors_on_reference_widget() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(10.0, 10.0, 100.0, 50.0));
    let b = add_box(&mut designer, Rect::new(200.0, 50.0, 80.0, 40.0));
    let c = add_box(&mut designer, Rect::new(400.0, 90.0, 60.0, 30.0));

    designer.select_widget(&a, false);
    designer.select_widget(&b, true);
    designer.select_widget(&c, true);
    assert_eq!(designer.reference_widget(), Some(a.clone()));

    designer.align_widgets(Alignment::Left).unwrap();
    assert_eq!(designer.widget_data(&b).unwrap().position.x, 10.0);
    assert_eq!(designer.widget_data(&c).unwrap().position.x, 10.0);
    // The reference widget never moves.
    assert_eq!(designer.widget_data(&a).unwrap().position.x, 10.0);
    // Vertical positions are untouched by a horizontal alignment.
    assert_eq!(designer.widget_data(&b).unwrap().position.y, 50.0);

    designer.undo().unwrap();
    assert_eq!(designer.widget_data(&b).unwrap().position.x, 200.0);
    assert_eq!(designer.widget_data(&c).unwrap().position.x, 400.0);
}

#[test]
fn test_align_single_widget_is_noop() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(10.0, 10.0, 100.0, 50.0));
    designer.select_widget(&a, false);

    designer.align_widgets(Alignment::Right).unwrap();
    assert_eq!(designer.widget_data(&a).unwrap().position.x, 10.0);
    assert_eq!(designer.undo_description().as_deref(), Some("Add box Widget"));
}

#[test]
fn test_distribute_horizontal_equal_gaps() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = add_box(&mut designer, Rect::new(60.0, 10.0, 50.0, 50.0));
    let c = add_box(&mut designer, Rect::new(300.0, 20.0, 50.0, 50.0));

    designer.select_widget(&a, false);
    designer.select_widget(&b, true);
    designer.select_widget(&c, true);
    designer
        .distribute_widgets(DistributeAxis::Horizontal)
        .unwrap();

    // Span 350, extents 150, two gaps of 100 each.
    assert_eq!(designer.widget_data(&a).unwrap().position.x, 0.0);
    assert_eq!(designer.widget_data(&b).unwrap().position.x, 150.0);
    assert_eq!(designer.widget_data(&c).unwrap().position.x, 300.0);

    designer.undo().unwrap();
    assert_eq!(designer.widget_data(&b).unwrap().position.x, 60.0);
}

#[test]
fn test_distribute_needs_three() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = add_box(&mut designer, Rect::new(200.0, 0.0, 50.0, 50.0));

    designer.select_widget(&a, false);
    designer.select_widget(&b, true);
    designer
        .distribute_widgets(DistributeAxis::Horizontal)
        .unwrap();

    // No movement, no history entry beyond the adds.
    assert_eq!(designer.widget_data(&b).unwrap().position.x, 200.0);
    assert_eq!(designer.undo_description().as_deref(), Some("Add box Widget"));
}

#[test]
fn test_make_same_size_from_reference() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(0.0, 0.0, 100.0, 50.0));
    let b = add_box(&mut designer, Rect::new(200.0, 0.0, 30.0, 40.0));

    designer.select_widget(&a, false);
    designer.select_widget(&b, true);

    designer.make_same_size(SizeDimension::Width).unwrap();
    let size = designer.widget_data(&b).unwrap().size;
    assert_eq!((size.width, size.height), (100.0, 40.0));

    designer.make_same_size(SizeDimension::Both).unwrap();
    let size = designer.widget_data(&b).unwrap().size;
    assert_eq!((size.width, size.height), (100.0, 50.0));

    designer.undo().unwrap();
    designer.undo().unwrap();
    let size = designer.widget_data(&b).unwrap().size;
    assert_eq!((size.width, size.height), (30.0, 40.0));
}

#[test]
fn test_qr_resize_stays_square() {
    let mut designer = Designer::headless();
    let qr = designer
        .add_widget(factory::qr_widget(Point::new(10.0, 10.0), 50.0, ""))
        .unwrap();

    designer.set_widget_size(&qr, breakscreen_core::Size::new(80.0, 30.0));
    let size = designer.widget_data(&qr).unwrap().size;
    assert_eq!((size.width, size.height), (80.0, 80.0));

    designer.set_widget_size(&qr, breakscreen_core::Size::new(3.0, 7.0));
    let size = designer.widget_data(&qr).unwrap().size;
    assert_eq!((size.width, size.height), (10.0, 10.0));
}

#[test]
fn test_bring_selection_to_front_keeps_relative_order() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = add_box(&mut designer, Rect::new(10.0, 0.0, 50.0, 50.0));
    let c = add_box(&mut designer, Rect::new(20.0, 0.0, 50.0, 50.0));

    designer.select_widget(&a, false);
    designer.select_widget(&b, true);
    designer.bring_selection_to_front().unwrap();

    let order = designer.canvas.ids_z_order();
    assert_eq!(order, vec![c.clone(), a.clone(), b.clone()]);

    designer.undo().unwrap();
    assert_eq!(designer.canvas.ids_z_order(), vec![a, b, c]);
}

#[test]
fn test_resize_gesture_single_history_entry() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(10.0, 10.0, 100.0, 50.0));

    assert!(designer.begin_resize(
        &a,
        breakscreen_designer::ResizeHandle::BottomRight,
        Point::new(110.0, 60.0)
    ));
    designer.pointer_move(Point::new(130.0, 80.0));
    designer.pointer_move(Point::new(150.0, 90.0));
    designer.pointer_up(Point::new(150.0, 90.0)).unwrap();

    let data = designer.widget_data(&a).unwrap();
    assert_eq!((data.size.width, data.size.height), (140.0, 80.0));
    assert_eq!(designer.undo_description().as_deref(), Some("Resize Widget"));

    designer.undo().unwrap();
    let data = designer.widget_data(&a).unwrap();
    assert_eq!((data.size.width, data.size.height), (100.0, 50.0));
    assert_eq!(data.position, Point::new(10.0, 10.0));
}

#[test]
fn test_duplicate_id_add_is_noop() {
    let mut designer = Designer::headless();
    let data = factory::box_widget(Rect::new(0.0, 0.0, 50.0, 50.0));

    assert!(designer.add_widget_with_id(data.clone()).unwrap());
    assert!(!designer.add_widget_with_id(data).unwrap());
    assert_eq!(designer.widget_count(), 1);
}

#[test]
fn test_select_all_and_deselect_all() {
    let mut designer = Designer::headless();
    let a = add_box(&mut designer, Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = add_box(&mut designer, Rect::new(100.0, 0.0, 50.0, 50.0));

    designer.select_all();
    assert_eq!(designer.selected_ids().len(), 2);
    // Topmost widget is the reference after select-all.
    assert_eq!(designer.reference_widget(), Some(b.clone()));

    designer.deselect_all();
    assert!(designer.selected_ids().is_empty());
    let _ = a;
}
