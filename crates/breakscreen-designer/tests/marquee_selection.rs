//! Marquee (rubber-band) selection integration tests.

use breakscreen_core::{Point, Rect};
use breakscreen_designer::{factory, Designer};

fn designer_with_two_boxes() -> (Designer, String, String) {
    let mut designer = Designer::headless();
    let a = designer
        .add_widget(factory::box_widget(Rect::new(10.0, 10.0, 100.0, 50.0)))
        .unwrap();
    let b = designer
        .add_widget(factory::box_widget(Rect::new(300.0, 300.0, 50.0, 50.0)))
        .unwrap();
    designer.deselect_all();
    (designer, a, b)
}

#[test]
fn test_exact_bounding_box_selects_only_that_widget() {
    let (mut designer, a, b) = designer_with_two_boxes();

    designer
        .canvas
        .select_widgets_in_rect(Rect::new(10.0, 10.0, 100.0, 50.0), false);

    assert_eq!(designer.selected_ids(), vec![a]);
    assert!(!designer.canvas.is_selected(&b));
}

#[test]
fn test_boundary_touch_counts_as_intersecting() {
    let (mut designer, a, _b) = designer_with_two_boxes();

    // A rect that only touches a's right edge (x = 110).
    designer
        .canvas
        .select_widgets_in_rect(Rect::new(110.0, 10.0, 40.0, 40.0), false);
    assert_eq!(designer.selected_ids(), vec![a]);
}

#[test]
fn test_marquee_gesture_on_empty_canvas_area() {
    let (mut designer, a, b) = designer_with_two_boxes();

    // Drag from empty space across both widgets.
    designer.pointer_down(Point::new(5.0, 5.0), false);
    designer.pointer_move(Point::new(200.0, 200.0));
    designer.pointer_move(Point::new(360.0, 360.0));
    designer.pointer_up(Point::new(360.0, 360.0)).unwrap();

    let selected = designer.selected_ids();
    assert_eq!(selected.len(), 2);
    assert!(selected.contains(&a));
    assert!(selected.contains(&b));
    // No history entry for a selection gesture.
    assert_eq!(designer.undo_description().as_deref(), Some("Add box Widget"));
}

#[test]
fn test_marquee_additive_extends_selection() {
    let (mut designer, a, b) = designer_with_two_boxes();
    designer.select_widget(&a, false);

    // Additive marquee over b only.
    designer.pointer_down(Point::new(290.0, 290.0), true);
    designer.pointer_move(Point::new(360.0, 360.0));
    designer.pointer_up(Point::new(360.0, 360.0)).unwrap();

    // a keeps reference status, b joins.
    assert_eq!(designer.selected_ids(), vec![a, b]);
}

#[test]
fn test_click_on_empty_space_clears_selection() {
    let (mut designer, a, _b) = designer_with_two_boxes();
    designer.select_widget(&a, false);
    assert_eq!(designer.selected_ids().len(), 1);

    designer.pointer_down(Point::new(500.0, 5.0), false);
    designer.pointer_up(Point::new(500.0, 5.0)).unwrap();
    assert!(designer.selected_ids().is_empty());
}

#[test]
fn test_grouped_children_not_marquee_selectable() {
    let mut designer = Designer::headless();
    let a = designer
        .add_widget(factory::box_widget(Rect::new(10.0, 10.0, 100.0, 50.0)))
        .unwrap();
    let b = designer
        .add_widget(factory::box_widget(Rect::new(120.0, 10.0, 100.0, 50.0)))
        .unwrap();
    designer.select_widget(&a, false);
    designer.select_widget(&b, true);
    let gid = designer.group_selection().unwrap().unwrap();

    designer.deselect_all();
    designer
        .canvas
        .select_widgets_in_rect(Rect::new(0.0, 0.0, 400.0, 400.0), false);

    // Only the group shell is selected, never its children.
    assert_eq!(designer.selected_ids(), vec![gid]);
}
