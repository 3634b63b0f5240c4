//! Command objects: every undoable mutation of the widget collection.
//!
//! A command captures enough prior state (absolute old/new positions,
//! sizes, z-indices, widget snapshots) to fully reverse its effect.
//! `apply` replays the same forward transition every time it is called,
//! so redo is just apply again; `undo` restores the exact prior state.
//! Values are absolute, never deltas, so applying after the drag
//! interaction has already moved widgets live is exact. Side effects are
//! confined to the canvas passed in.

use breakscreen_core::constants::GROUP_Z_MARGIN_PER_WIDGET;
use breakscreen_core::{DesignerError, Point, Result, Size, WidgetId};

use crate::canvas::{Canvas, ChildGeometry};
use crate::factory;
use crate::widget::{WidgetData, WidgetProperties};

/// Alignment targets, anchored on the reference widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

impl Alignment {
    pub fn label(&self) -> &'static str {
        match self {
            Alignment::Left => "Align Left",
            Alignment::CenterHorizontal => "Align Centers Horizontally",
            Alignment::Right => "Align Right",
            Alignment::Top => "Align Top",
            Alignment::CenterVertical => "Align Centers Vertically",
            Alignment::Bottom => "Align Bottom",
        }
    }
}

/// Axis for equal-gap distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributeAxis {
    Horizontal,
    Vertical,
}

/// Which dimensions make-same-size copies from the reference widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeDimension {
    Width,
    Height,
    Both,
}

/// One widget's absolute position change.
#[derive(Debug, Clone)]
pub struct WidgetMove {
    pub id: WidgetId,
    pub from: Point,
    pub to: Point,
}

/// One widget's absolute size change.
#[derive(Debug, Clone)]
pub struct WidgetSizeChange {
    pub id: WidgetId,
    pub from: Size,
    pub to: Size,
}

/// One widget's z-index change.
#[derive(Debug, Clone)]
pub struct ZIndexChange {
    pub id: WidgetId,
    pub from: i32,
    pub to: i32,
}

/// Snapshot of a removed widget, including the runtime flags a plain
/// `WidgetData` does not carry.
#[derive(Debug, Clone)]
pub struct DeletedWidget {
    pub data: WidgetData,
    pub group_id: Option<WidgetId>,
    pub interactive: bool,
}

#[derive(Debug, Clone)]
pub struct CreateWidget {
    pub data: WidgetData,
    pub select_on_create: bool,
}

#[derive(Debug, Clone)]
pub struct DeleteWidgets {
    pub ids: Vec<WidgetId>,
    /// Filled at apply time, consumed by undo.
    pub snapshots: Vec<DeletedWidget>,
}

#[derive(Debug, Clone)]
pub struct MoveWidgets {
    pub moves: Vec<WidgetMove>,
    /// Filled at apply time, consumed by undo.
    pub prior_children: Vec<ChildGeometry>,
}

#[derive(Debug, Clone)]
pub struct ResizeWidget {
    pub id: WidgetId,
    pub from_position: Point,
    pub from_size: Size,
    pub to_position: Point,
    pub to_size: Size,
    /// Filled at apply time, consumed by undo.
    pub prior_children: Vec<ChildGeometry>,
}

#[derive(Debug, Clone)]
pub struct AlignWidgets {
    pub alignment: Alignment,
    pub moves: Vec<WidgetMove>,
    /// Filled at apply time, consumed by undo.
    pub prior_children: Vec<ChildGeometry>,
}

#[derive(Debug, Clone)]
pub struct DistributeWidgets {
    pub axis: DistributeAxis,
    pub moves: Vec<WidgetMove>,
    /// Filled at apply time, consumed by undo.
    pub prior_children: Vec<ChildGeometry>,
}

#[derive(Debug, Clone)]
pub struct MakeSameSize {
    pub dimension: SizeDimension,
    pub resizes: Vec<WidgetSizeChange>,
    /// Filled at apply time, consumed by undo.
    pub prior_children: Vec<ChildGeometry>,
}

#[derive(Debug, Clone)]
pub struct GroupWidgets {
    pub group_id: WidgetId,
    pub child_ids: Vec<WidgetId>,
    /// Child z-indices snapshotted at construction, restored on undo.
    pub prior_z: Vec<(WidgetId, i32)>,
    /// Selection snapshotted at construction, restored on undo.
    pub prior_selection: Vec<WidgetId>,
}

#[derive(Debug, Clone)]
pub struct UngroupWidgets {
    pub group_ids: Vec<WidgetId>,
    /// Full group records snapshotted at apply time, recreated on undo.
    pub snapshots: Vec<WidgetData>,
}

#[derive(Debug, Clone)]
pub struct ChangeZOrder {
    pub changes: Vec<ZIndexChange>,
}

#[derive(Debug, Clone)]
pub struct CompositeCommand {
    pub commands: Vec<DesignerCommand>,
    pub name: String,
}

/// Every undoable mutation, as a closed variant set.
#[derive(Debug, Clone)]
pub enum DesignerCommand {
    CreateWidget(CreateWidget),
    DeleteWidgets(DeleteWidgets),
    MoveWidgets(MoveWidgets),
    ResizeWidget(ResizeWidget),
    AlignWidgets(AlignWidgets),
    DistributeWidgets(DistributeWidgets),
    MakeSameSize(MakeSameSize),
    GroupWidgets(GroupWidgets),
    UngroupWidgets(UngroupWidgets),
    ChangeZOrder(ChangeZOrder),
    Composite(CompositeCommand),
}

impl DesignerCommand {
    /// Applies the forward transition. Calling it again after `undo`
    /// replays the identical transition (redo).
    pub fn apply(&mut self, canvas: &mut Canvas) -> Result<()> {
        match self {
            DesignerCommand::CreateWidget(cmd) => {
                canvas.insert_widget(factory::create_widget(cmd.data.clone()))?;
                if let WidgetProperties::Group(group) = &cmd.data.properties {
                    for child_id in group.child_ids() {
                        if canvas.contains_widget(child_id) {
                            canvas.set_member_of(child_id, Some(cmd.data.id.clone()));
                        }
                    }
                }
                if cmd.select_on_create {
                    canvas.select_exact(std::slice::from_ref(&cmd.data.id));
                }
                Ok(())
            }
            DesignerCommand::DeleteWidgets(cmd) => {
                cmd.snapshots.clear();
                for id in &cmd.ids {
                    match canvas.remove_widget(id) {
                        Some(widget) => cmd.snapshots.push(DeletedWidget {
                            data: widget.data(),
                            group_id: widget.group_id.clone(),
                            interactive: widget.interactive,
                        }),
                        None => {
                            tracing::warn!(widget_id = %id, "delete target already gone")
                        }
                    }
                }
                Ok(())
            }
            DesignerCommand::MoveWidgets(cmd) => {
                // Pre-filled by gesture commands (widgets already sit at
                // `to` when the gesture ends); captured here otherwise.
                if cmd.prior_children.is_empty() {
                    cmd.prior_children =
                        canvas.group_descendant_geometry(cmd.moves.iter().map(|m| &m.id));
                }
                for m in &cmd.moves {
                    canvas.set_widget_position(&m.id, m.to);
                }
                Ok(())
            }
            DesignerCommand::ResizeWidget(cmd) => {
                if cmd.prior_children.is_empty() {
                    cmd.prior_children =
                        canvas.group_descendant_geometry(std::iter::once(&cmd.id));
                }
                canvas.set_widget_position(&cmd.id, cmd.to_position);
                canvas.set_widget_size(&cmd.id, cmd.to_size);
                Ok(())
            }
            DesignerCommand::AlignWidgets(cmd) => {
                if cmd.prior_children.is_empty() {
                    cmd.prior_children =
                        canvas.group_descendant_geometry(cmd.moves.iter().map(|m| &m.id));
                }
                for m in &cmd.moves {
                    canvas.set_widget_position(&m.id, m.to);
                }
                Ok(())
            }
            DesignerCommand::DistributeWidgets(cmd) => {
                if cmd.prior_children.is_empty() {
                    cmd.prior_children =
                        canvas.group_descendant_geometry(cmd.moves.iter().map(|m| &m.id));
                }
                for m in &cmd.moves {
                    canvas.set_widget_position(&m.id, m.to);
                }
                Ok(())
            }
            DesignerCommand::MakeSameSize(cmd) => {
                if cmd.prior_children.is_empty() {
                    cmd.prior_children =
                        canvas.group_descendant_geometry(cmd.resizes.iter().map(|r| &r.id));
                }
                for r in &cmd.resizes {
                    canvas.set_widget_size(&r.id, r.to);
                }
                Ok(())
            }
            DesignerCommand::GroupWidgets(cmd) => {
                // Recompute the bounding rect from *current* positions so
                // moves between construction and execution are honored.
                let rects: Vec<_> = cmd
                    .child_ids
                    .iter()
                    .filter_map(|id| canvas.widget_rect(id, false))
                    .collect();
                if rects.len() < 2 {
                    return Err(DesignerError::CommandFailed {
                        description: format!("Group {} Widgets", cmd.child_ids.len()),
                        reason: "fewer than two group members remain".to_string(),
                    });
                }
                let max_child_z = cmd
                    .child_ids
                    .iter()
                    .filter_map(|id| canvas.widget(id).map(|w| w.z_index))
                    .max()
                    .unwrap_or(0);
                let z = max_child_z + cmd.child_ids.len() as i32 * GROUP_Z_MARGIN_PER_WIDGET;

                let data = factory::group_widget(
                    cmd.group_id.clone(),
                    cmd.child_ids.clone(),
                    &rects,
                    z,
                );
                canvas.insert_widget(factory::create_widget(data))?;
                for child_id in &cmd.child_ids {
                    canvas.set_member_of(child_id, Some(cmd.group_id.clone()));
                }
                canvas.select_exact(std::slice::from_ref(&cmd.group_id));
                Ok(())
            }
            DesignerCommand::UngroupWidgets(cmd) => {
                cmd.snapshots.clear();
                let mut freed: Vec<WidgetId> = Vec::new();
                for group_id in &cmd.group_ids {
                    let Some(data) = canvas.widget_data(group_id) else {
                        tracing::warn!(group = %group_id, "ungroup target already gone");
                        continue;
                    };
                    let WidgetProperties::Group(group) = &data.properties else {
                        tracing::warn!(widget_id = %group_id, "ungroup target is not a group");
                        continue;
                    };
                    let child_ids: Vec<WidgetId> = group.child_ids().to_vec();
                    cmd.snapshots.push(data.clone());
                    canvas.remove_widget(group_id);
                    for child_id in &child_ids {
                        if canvas.set_member_of(child_id, None) {
                            freed.push(child_id.clone());
                        }
                    }
                }
                canvas.select_exact(&freed);
                Ok(())
            }
            DesignerCommand::ChangeZOrder(cmd) => {
                for change in &cmd.changes {
                    canvas.set_widget_z_index(&change.id, change.to);
                }
                Ok(())
            }
            DesignerCommand::Composite(cmd) => {
                for sub in &mut cmd.commands {
                    sub.apply(canvas)?;
                }
                Ok(())
            }
        }
    }

    /// Restores the exact state prior to `apply`.
    pub fn undo(&mut self, canvas: &mut Canvas) -> Result<()> {
        match self {
            DesignerCommand::CreateWidget(cmd) => {
                if let WidgetProperties::Group(group) = &cmd.data.properties {
                    for child_id in group.child_ids() {
                        if canvas.contains_widget(child_id) {
                            canvas.set_member_of(child_id, None);
                        }
                    }
                }
                if canvas.remove_widget(&cmd.data.id).is_none() {
                    tracing::warn!(widget_id = %cmd.data.id, "created widget already gone");
                }
                Ok(())
            }
            DesignerCommand::DeleteWidgets(cmd) => {
                for snapshot in cmd.snapshots.drain(..) {
                    let mut widget = factory::create_widget(snapshot.data);
                    widget.group_id = snapshot.group_id;
                    widget.interactive = snapshot.interactive;
                    canvas.insert_widget(widget)?;
                }
                Ok(())
            }
            DesignerCommand::MoveWidgets(cmd) => {
                for m in cmd.moves.iter().rev() {
                    canvas.set_widget_position(&m.id, m.from);
                }
                canvas.restore_geometry(&cmd.prior_children);
                Ok(())
            }
            DesignerCommand::ResizeWidget(cmd) => {
                canvas.set_widget_size(&cmd.id, cmd.from_size);
                canvas.set_widget_position(&cmd.id, cmd.from_position);
                canvas.restore_geometry(&cmd.prior_children);
                Ok(())
            }
            DesignerCommand::AlignWidgets(cmd) => {
                for m in cmd.moves.iter().rev() {
                    canvas.set_widget_position(&m.id, m.from);
                }
                canvas.restore_geometry(&cmd.prior_children);
                Ok(())
            }
            DesignerCommand::DistributeWidgets(cmd) => {
                for m in cmd.moves.iter().rev() {
                    canvas.set_widget_position(&m.id, m.from);
                }
                canvas.restore_geometry(&cmd.prior_children);
                Ok(())
            }
            DesignerCommand::MakeSameSize(cmd) => {
                for r in cmd.resizes.iter().rev() {
                    canvas.set_widget_size(&r.id, r.from);
                }
                canvas.restore_geometry(&cmd.prior_children);
                Ok(())
            }
            DesignerCommand::GroupWidgets(cmd) => {
                for child_id in &cmd.child_ids {
                    canvas.set_member_of(child_id, None);
                }
                if canvas.remove_widget(&cmd.group_id).is_none() {
                    tracing::warn!(group = %cmd.group_id, "group widget already gone");
                }
                for (id, z) in &cmd.prior_z {
                    canvas.set_widget_z_index(id, *z);
                }
                canvas.select_exact(&cmd.prior_selection);
                Ok(())
            }
            DesignerCommand::UngroupWidgets(cmd) => {
                for data in &cmd.snapshots {
                    let child_ids: Vec<WidgetId> = match &data.properties {
                        WidgetProperties::Group(group) => group.child_ids().to_vec(),
                        _ => Vec::new(),
                    };
                    canvas.insert_widget(factory::create_widget(data.clone()))?;
                    for child_id in &child_ids {
                        canvas.set_member_of(child_id, Some(data.id.clone()));
                    }
                }
                canvas.select_exact(&cmd.group_ids);
                Ok(())
            }
            DesignerCommand::ChangeZOrder(cmd) => {
                for change in cmd.changes.iter().rev() {
                    canvas.set_widget_z_index(&change.id, change.from);
                }
                Ok(())
            }
            DesignerCommand::Composite(cmd) => {
                for sub in cmd.commands.iter_mut().rev() {
                    sub.undo(canvas)?;
                }
                Ok(())
            }
        }
    }

    /// Human-readable label for undo/redo menu text.
    pub fn description(&self) -> String {
        match self {
            DesignerCommand::CreateWidget(cmd) => {
                format!("Add {} Widget", cmd.data.kind().as_str())
            }
            DesignerCommand::DeleteWidgets(cmd) => {
                if cmd.ids.len() == 1 {
                    "Delete Widget".to_string()
                } else {
                    format!("Delete {} Widgets", cmd.ids.len())
                }
            }
            DesignerCommand::MoveWidgets(cmd) => {
                if cmd.moves.len() == 1 {
                    "Move Widget".to_string()
                } else {
                    format!("Move {} Widgets", cmd.moves.len())
                }
            }
            DesignerCommand::ResizeWidget(_) => "Resize Widget".to_string(),
            DesignerCommand::AlignWidgets(cmd) => cmd.alignment.label().to_string(),
            DesignerCommand::DistributeWidgets(cmd) => match cmd.axis {
                DistributeAxis::Horizontal => "Distribute Horizontally".to_string(),
                DistributeAxis::Vertical => "Distribute Vertically".to_string(),
            },
            DesignerCommand::MakeSameSize(cmd) => match cmd.dimension {
                SizeDimension::Width => "Make Same Width".to_string(),
                SizeDimension::Height => "Make Same Height".to_string(),
                SizeDimension::Both => "Make Same Size".to_string(),
            },
            DesignerCommand::GroupWidgets(cmd) => {
                format!("Group {} Widgets", cmd.child_ids.len())
            }
            DesignerCommand::UngroupWidgets(cmd) => {
                if cmd.group_ids.len() == 1 {
                    "Ungroup Widgets".to_string()
                } else {
                    format!("Ungroup {} Groups", cmd.group_ids.len())
                }
            }
            DesignerCommand::ChangeZOrder(_) => "Bring to Front".to_string(),
            DesignerCommand::Composite(cmd) => cmd.name.clone(),
        }
    }
}
