//! Designer orchestrator: owns the canvas and wires the public editing
//! API to commands.
//!
//! All mutating operations that should be undoable route exclusively
//! through the command manager. The direct mutation methods
//! (`set_widget_position`, `set_widget_size`) are building blocks used by
//! commands and by live drag feedback; calling them from the outside
//! bypasses undo history, a documented, deliberate escape hatch.

use breakscreen_core::{
    EventBus, Point, Rect, Result, Shared, Size, WidgetId,
};

use crate::canvas::Canvas;
use crate::clipboard::Clipboard;
use crate::command_manager::CommandManager;
use crate::commands::{
    Alignment, ChangeZOrder, CompositeCommand, CreateWidget, DeleteWidgets, DesignerCommand,
    DistributeAxis, DistributeWidgets, GroupWidgets, MakeSameSize, SizeDimension, UngroupWidgets,
    WidgetMove, WidgetSizeChange, ZIndexChange,
};
use crate::factory;
use crate::interaction::Gesture;
use crate::render_port::{HeadlessPort, RenderPort};
use crate::widget::WidgetData;

pub struct Designer {
    pub canvas: Canvas,
    command_manager: CommandManager,
    clipboard: Shared<Clipboard>,
    events: EventBus,
    pub(crate) gesture: Gesture,
}

impl Designer {
    /// Creates a designer over the given render port. The clipboard is an
    /// explicit dependency so hosts can share one across designers.
    pub fn new(port: Box<dyn RenderPort>, clipboard: Shared<Clipboard>, events: EventBus) -> Self {
        Self {
            canvas: Canvas::new(port, events.clone()),
            command_manager: CommandManager::new(events.clone()),
            clipboard,
            events,
            gesture: Gesture::Idle,
        }
    }

    /// A designer with its own headless port, clipboard, and bus. The
    /// standard entry point for tests and non-browser hosts.
    pub fn headless() -> Self {
        Self::new(
            Box::new(HeadlessPort::new()),
            breakscreen_core::shared(Clipboard::new()),
            EventBus::new(),
        )
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn clipboard(&self) -> &Shared<Clipboard> {
        &self.clipboard
    }

    // ------------------------------------------------------------------
    // Widget lifecycle
    // ------------------------------------------------------------------

    /// Adds a widget on top of everything else and selects it. A colliding
    /// id in the record is replaced with a fresh one.
    pub fn add_widget(&mut self, mut data: WidgetData) -> Result<WidgetId> {
        if self.canvas.contains_widget(&data.id) {
            tracing::debug!(widget_id = %data.id, "id already live, regenerating");
            data.id = factory::generate_widget_id();
        }
        data.z_index = self.canvas.next_z();
        let id = data.id.clone();
        self.execute(DesignerCommand::CreateWidget(CreateWidget {
            data,
            select_on_create: true,
        }))?;
        Ok(id)
    }

    /// Adds a widget under its exact record, keeping id and z-index. An id
    /// collision logs a warning and is a no-op; the existing widget is
    /// never overwritten. Returns whether the widget was added.
    pub fn add_widget_with_id(&mut self, data: WidgetData) -> Result<bool> {
        if self.canvas.contains_widget(&data.id) {
            tracing::warn!(widget_id = %data.id, "duplicate widget id, ignoring add");
            return Ok(false);
        }
        self.execute(DesignerCommand::CreateWidget(CreateWidget {
            data,
            select_on_create: false,
        }))?;
        Ok(true)
    }

    /// Deletes a widget (and, for a group, its transitive children).
    pub fn remove_widget(&mut self, id: &str) -> Result<()> {
        if !self.canvas.contains_widget(id) {
            tracing::warn!(widget_id = id, "remove of unknown widget, ignored");
            return Ok(());
        }
        let ids = self.expand_with_children(&[id.to_string()]);
        self.execute(DesignerCommand::DeleteWidgets(DeleteWidgets {
            ids,
            snapshots: Vec::new(),
        }))
    }

    pub fn widget_data(&self, id: &str) -> Option<WidgetData> {
        self.canvas.widget_data(id)
    }

    pub fn widget_count(&self) -> usize {
        self.canvas.widget_count()
    }

    /// Direct position mutation. Bypasses undo history; used internally
    /// by commands and live drag feedback.
    pub fn set_widget_position(&mut self, id: &str, position: Point) -> bool {
        self.canvas.set_widget_position(id, position)
    }

    /// Direct size mutation. Bypasses undo history.
    pub fn set_widget_size(&mut self, id: &str, size: Size) -> bool {
        self.canvas.set_widget_size(id, size)
    }

    // ------------------------------------------------------------------
    // Z-order
    // ------------------------------------------------------------------

    /// Raises one widget above everything else, via the monotonic z
    /// counter. Grouped children cannot be re-ordered independently; their
    /// group shell must stay on top.
    pub fn bring_to_front(&mut self, id: &str) -> Result<()> {
        let Some(widget) = self.canvas.widget(id) else {
            tracing::warn!(widget_id = id, "bring-to-front of unknown widget, ignored");
            return Ok(());
        };
        if widget.group_id.is_some() {
            tracing::warn!(widget_id = id, "bring-to-front of grouped widget, ignored");
            return Ok(());
        }
        let from = widget.z_index;
        let to = self.canvas.next_z();
        self.execute(DesignerCommand::ChangeZOrder(ChangeZOrder {
            changes: vec![ZIndexChange {
                id: id.to_string(),
                from,
                to,
            }],
        }))
    }

    /// Raises the whole selection, preserving its internal stacking
    /// order.
    pub fn bring_selection_to_front(&mut self) -> Result<()> {
        let mut selected: Vec<(WidgetId, i32)> = self
            .canvas
            .selected_ids()
            .into_iter()
            .filter_map(|id| self.canvas.widget(&id).map(|w| (id.clone(), w.z_index)))
            .collect();
        if selected.is_empty() {
            tracing::warn!("bring-to-front with empty selection, nothing to do");
            return Ok(());
        }
        selected.sort_by_key(|(_, z)| *z);

        let changes: Vec<ZIndexChange> = selected
            .into_iter()
            .map(|(id, from)| {
                let to = self.canvas.next_z();
                ZIndexChange { id, from, to }
            })
            .collect();
        self.execute(DesignerCommand::ChangeZOrder(ChangeZOrder { changes }))
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_widget(&mut self, id: &str, add_to_selection: bool) {
        self.canvas.select_widget(id, add_to_selection);
    }

    pub fn deselect_widget(&mut self, id: &str) {
        self.canvas.deselect_widget(id);
    }

    pub fn toggle_widget_selection(&mut self, id: &str) {
        self.canvas.toggle_widget_selection(id);
    }

    pub fn select_all(&mut self) {
        self.canvas.select_all();
    }

    pub fn deselect_all(&mut self) {
        self.canvas.clear_selection();
    }

    pub fn selected_ids(&self) -> Vec<WidgetId> {
        self.canvas.selected_ids()
    }

    /// The anchor for align and make-same-size: the first-selected widget.
    pub fn reference_widget(&self) -> Option<WidgetId> {
        self.canvas.reference_widget()
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copies the selection (groups expanded to their children) to the
    /// clipboard. Returns how many records were captured.
    pub fn copy_selection(&mut self) -> usize {
        let items = self.selection_snapshot();
        let count = items.len();
        if count == 0 {
            tracing::warn!("copy with empty selection, clipboard unchanged");
            return 0;
        }
        self.clipboard.borrow_mut().copy(&items);
        count
    }

    /// Copies the selection, then deletes it.
    pub fn cut_selection(&mut self) -> Result<usize> {
        let count = self.copy_selection();
        if count > 0 {
            self.delete_selected_widgets()?;
        }
        Ok(count)
    }

    /// Pastes clipboard contents, assigning fresh z-indices on top of the
    /// live collection, and selects the pasted widgets. Returns the new
    /// ids.
    pub fn paste_from_clipboard(&mut self) -> Result<Vec<WidgetId>> {
        let mut items = self.clipboard.borrow_mut().paste();
        if items.is_empty() {
            return Ok(Vec::new());
        }
        // Children carry lower z than their group shell, so z-ascending
        // insert order guarantees children exist when the group mounts.
        items.sort_by_key(|d| d.z_index);
        for item in &mut items {
            item.z_index = self.canvas.next_z();
        }

        let ids: Vec<WidgetId> = items.iter().map(|d| d.id.clone()).collect();
        let commands = items
            .into_iter()
            .map(|data| {
                DesignerCommand::CreateWidget(CreateWidget {
                    data,
                    select_on_create: false,
                })
            })
            .collect();
        self.execute(DesignerCommand::Composite(CompositeCommand {
            commands,
            name: "Paste Widgets".to_string(),
        }))?;
        self.canvas.select_exact(&ids);
        Ok(ids)
    }

    /// Deletes the selection, groups expanded to their children.
    pub fn delete_selected_widgets(&mut self) -> Result<()> {
        let ids = self.expand_with_children(&self.canvas.selected_ids());
        if ids.is_empty() {
            tracing::warn!("delete with empty selection, nothing to do");
            return Ok(());
        }
        self.execute(DesignerCommand::DeleteWidgets(DeleteWidgets {
            ids,
            snapshots: Vec::new(),
        }))
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> Result<bool> {
        self.command_manager.undo(&mut self.canvas)
    }

    pub fn redo(&mut self) -> Result<bool> {
        self.command_manager.redo(&mut self.canvas)
    }

    pub fn can_undo(&self) -> bool {
        self.command_manager.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.command_manager.can_redo()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.command_manager.undo_description()
    }

    pub fn redo_description(&self) -> Option<String> {
        self.command_manager.redo_description()
    }

    pub fn clear_history(&mut self) {
        self.command_manager.clear();
    }

    // ------------------------------------------------------------------
    // Align / distribute / same-size
    // ------------------------------------------------------------------

    /// Aligns the selection to the reference widget's edge or center.
    /// Fewer than two selected widgets is a warned no-op.
    pub fn align_widgets(&mut self, alignment: Alignment) -> Result<()> {
        let ids = self.canvas.selected_ids();
        if ids.len() < 2 {
            tracing::warn!("align needs at least two widgets, ignored");
            return Ok(());
        }
        let Some(reference) = self.canvas.widget_rect(&ids[0], false) else {
            return Ok(());
        };

        let mut moves = Vec::new();
        for id in &ids[1..] {
            let Some(rect) = self.canvas.widget_rect(id, false) else {
                continue;
            };
            let to = match alignment {
                Alignment::Left => Point::new(reference.x, rect.y),
                Alignment::Right => Point::new(reference.right() - rect.width, rect.y),
                Alignment::CenterHorizontal => {
                    Point::new(reference.center().x - rect.width / 2.0, rect.y)
                }
                Alignment::Top => Point::new(rect.x, reference.y),
                Alignment::Bottom => Point::new(rect.x, reference.bottom() - rect.height),
                Alignment::CenterVertical => {
                    Point::new(rect.x, reference.center().y - rect.height / 2.0)
                }
            };
            if to != rect.position() {
                moves.push(WidgetMove {
                    id: id.clone(),
                    from: rect.position(),
                    to,
                });
            }
        }
        if moves.is_empty() {
            tracing::debug!("alignment is a no-op, nothing recorded");
            return Ok(());
        }
        self.execute(DesignerCommand::AlignWidgets(crate::commands::AlignWidgets {
            alignment,
            moves,
            prior_children: Vec::new(),
        }))
    }

    /// Distributes the selection with equal gaps along an axis. The
    /// outermost widgets stay anchored; fewer than three selected widgets
    /// is a warned no-op.
    pub fn distribute_widgets(&mut self, axis: DistributeAxis) -> Result<()> {
        let ids = self.canvas.selected_ids();
        if ids.len() < 3 {
            tracing::warn!("distribute needs at least three widgets, ignored");
            return Ok(());
        }

        let mut rects: Vec<(WidgetId, Rect)> = ids
            .iter()
            .filter_map(|id| self.canvas.widget_rect(id, false).map(|r| (id.clone(), r)))
            .collect();
        if rects.len() < 3 {
            return Ok(());
        }

        match axis {
            DistributeAxis::Horizontal => rects.sort_by(|a, b| a.1.x.total_cmp(&b.1.x)),
            DistributeAxis::Vertical => rects.sort_by(|a, b| a.1.y.total_cmp(&b.1.y)),
        }

        let (span, extents): (f64, f64) = match axis {
            DistributeAxis::Horizontal => (
                rects.last().map(|(_, r)| r.right()).unwrap_or(0.0) - rects[0].1.x,
                rects.iter().map(|(_, r)| r.width).sum(),
            ),
            DistributeAxis::Vertical => (
                rects.last().map(|(_, r)| r.bottom()).unwrap_or(0.0) - rects[0].1.y,
                rects.iter().map(|(_, r)| r.height).sum(),
            ),
        };
        let gap = (span - extents) / (rects.len() as f64 - 1.0);

        let mut moves = Vec::new();
        let mut cursor = match axis {
            DistributeAxis::Horizontal => rects[0].1.x,
            DistributeAxis::Vertical => rects[0].1.y,
        };
        for (id, rect) in &rects {
            let to = match axis {
                DistributeAxis::Horizontal => Point::new(cursor, rect.y),
                DistributeAxis::Vertical => Point::new(rect.x, cursor),
            };
            cursor += match axis {
                DistributeAxis::Horizontal => rect.width + gap,
                DistributeAxis::Vertical => rect.height + gap,
            };
            if to != rect.position() {
                moves.push(WidgetMove {
                    id: id.clone(),
                    from: rect.position(),
                    to,
                });
            }
        }
        if moves.is_empty() {
            return Ok(());
        }
        self.execute(DesignerCommand::DistributeWidgets(DistributeWidgets {
            axis,
            moves,
            prior_children: Vec::new(),
        }))
    }

    /// Resizes the selection to the reference widget's extent in the
    /// chosen dimension(s). Fewer than two selected widgets is a warned
    /// no-op.
    pub fn make_same_size(&mut self, dimension: SizeDimension) -> Result<()> {
        let ids = self.canvas.selected_ids();
        if ids.len() < 2 {
            tracing::warn!("make-same-size needs at least two widgets, ignored");
            return Ok(());
        }
        let Some(reference) = self.canvas.widget_rect(&ids[0], false) else {
            return Ok(());
        };

        let mut resizes = Vec::new();
        for id in &ids[1..] {
            let Some(rect) = self.canvas.widget_rect(id, false) else {
                continue;
            };
            let to = match dimension {
                SizeDimension::Width => Size::new(reference.width, rect.height),
                SizeDimension::Height => Size::new(rect.width, reference.height),
                SizeDimension::Both => reference.size(),
            };
            if to != rect.size() {
                resizes.push(WidgetSizeChange {
                    id: id.clone(),
                    from: rect.size(),
                    to,
                });
            }
        }
        if resizes.is_empty() {
            return Ok(());
        }
        self.execute(DesignerCommand::MakeSameSize(MakeSameSize {
            dimension,
            resizes,
            prior_children: Vec::new(),
        }))
    }

    // ------------------------------------------------------------------
    // Grouping
    // ------------------------------------------------------------------

    pub fn can_group(&self) -> bool {
        self.canvas.selected_count() >= 2
    }

    pub fn can_ungroup(&self) -> bool {
        self.canvas
            .selected_ids()
            .iter()
            .any(|id| self.canvas.widget(id).map(|w| w.is_group()).unwrap_or(false))
    }

    /// Groups the selection into a new group widget, which becomes the
    /// selection. Fewer than two selected widgets is a warned no-op.
    pub fn group_selection(&mut self) -> Result<Option<WidgetId>> {
        let ids = self.canvas.selected_ids();
        if ids.len() < 2 {
            tracing::warn!("grouping needs at least two widgets, ignored");
            return Ok(None);
        }
        let prior_z: Vec<(WidgetId, i32)> = ids
            .iter()
            .filter_map(|id| self.canvas.widget(id).map(|w| (id.clone(), w.z_index)))
            .collect();
        let group_id = factory::generate_widget_id();
        self.execute(DesignerCommand::GroupWidgets(GroupWidgets {
            group_id: group_id.clone(),
            child_ids: ids.clone(),
            prior_z,
            prior_selection: ids,
        }))?;
        Ok(Some(group_id))
    }

    /// Dissolves every selected group, selecting the freed children. No
    /// selected group is a warned no-op.
    pub fn ungroup_selection(&mut self) -> Result<()> {
        let group_ids: Vec<WidgetId> = self
            .canvas
            .selected_ids()
            .into_iter()
            .filter(|id| self.canvas.widget(id).map(|w| w.is_group()).unwrap_or(false))
            .collect();
        if group_ids.is_empty() {
            tracing::warn!("ungroup with no selected group, ignored");
            return Ok(());
        }
        self.execute(DesignerCommand::UngroupWidgets(UngroupWidgets {
            group_ids,
            snapshots: Vec::new(),
        }))
    }

    // ------------------------------------------------------------------
    // Preview mode
    // ------------------------------------------------------------------

    pub fn set_preview_mode(&mut self, preview: bool) {
        self.canvas.set_preview_mode(preview);
    }

    pub fn preview_mode(&self) -> bool {
        self.canvas.preview_mode()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    pub(crate) fn execute(&mut self, command: DesignerCommand) -> Result<()> {
        self.command_manager.execute(command, &mut self.canvas)
    }

    /// Expands a set of ids with the transitive children of any groups in
    /// it, returned in z-ascending order.
    fn expand_with_children(&self, ids: &[WidgetId]) -> Vec<WidgetId> {
        let mut wanted: Vec<WidgetId> = Vec::new();
        let mut queue: Vec<WidgetId> = ids.to_vec();
        while let Some(id) = queue.pop() {
            if wanted.contains(&id) {
                continue;
            }
            if let Some(widget) = self.canvas.widget(&id) {
                if let Some(group) = widget.as_group() {
                    queue.extend(group.child_ids().iter().cloned());
                }
                wanted.push(id);
            }
        }
        self.canvas
            .ids_z_order()
            .into_iter()
            .filter(|id| wanted.contains(id))
            .collect()
    }

    /// Selection as records, groups expanded, in z-ascending order.
    fn selection_snapshot(&self) -> Vec<WidgetData> {
        self.expand_with_children(&self.canvas.selected_ids())
            .into_iter()
            .filter_map(|id| self.canvas.widget_data(&id))
            .collect()
    }
}
