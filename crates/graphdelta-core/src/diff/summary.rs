//! Human-readable summary renderer for object graph diffs.

use crate::diff::model::{Change, Diff, ElementChange, EntryChange};
use crate::metamodel::Value;

/// Render a Markdown summary of a [`Diff`] for review workflows.
///
/// Informational only; the structured diff stays the source of truth.
pub fn render_human_summary(diff: &Diff) -> String {
    let mut out = String::new();

    out.push_str("## Object Graph Diff\n\n");
    out.push_str(&format!("**Changes**: {}\n\n", diff.changes().len()));

    if !diff.has_changes() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    let new_objects: Vec<String> = diff
        .changes()
        .iter()
        .filter_map(|c| match c {
            Change::NewObject { global_id } => Some(format!("`{}`", global_id)),
            _ => None,
        })
        .collect();
    if !new_objects.is_empty() {
        out.push_str(&format!(
            "- **New objects** ({}): {}\n",
            new_objects.len(),
            new_objects.join(", ")
        ));
    }

    let removed: Vec<String> = diff
        .changes()
        .iter()
        .filter_map(|c| match c {
            Change::ObjectRemoved { global_id } => Some(format!("`{}`", global_id)),
            _ => None,
        })
        .collect();
    if !removed.is_empty() {
        out.push_str(&format!(
            "- **Removed objects** ({}): {}\n",
            removed.len(),
            removed.join(", ")
        ));
    }

    // Property changes, grouped under the object they belong to
    let mut current: Option<String> = None;
    for change in diff.changes() {
        let Some(line) = property_line(change) else {
            continue;
        };
        let owner = change.global_id().value();
        if current.as_deref() != Some(owner.as_str()) {
            out.push_str(&format!("\n### `{}`\n\n", owner));
            current = Some(owner);
        }
        out.push_str(&line);
    }

    out
}

fn property_line(change: &Change) -> Option<String> {
    let line = match change {
        Change::NewObject { .. } | Change::ObjectRemoved { .. } => return None,
        Change::ValueChange {
            property,
            left,
            right,
            ..
        } => format!("- `{}`: {} -> {}\n", property, show(left), show(right)),
        Change::ReferenceChange {
            property,
            left,
            right,
            ..
        } => format!(
            "- `{}`: {} -> {}\n",
            property,
            left.as_ref().map(|id| format!("`{}`", id)).unwrap_or_else(|| "_none_".to_string()),
            right.as_ref().map(|id| format!("`{}`", id)).unwrap_or_else(|| "_none_".to_string()),
        ),
        Change::ListChange {
            property, changes, ..
        } => {
            let parts: Vec<String> = changes
                .iter()
                .map(|c| match c {
                    ElementChange::ValueAdded { index, value } => {
                        format!("+{}{}", at(*index), show(value))
                    }
                    ElementChange::ValueRemoved { index, value } => {
                        format!("-{}{}", at(*index), show(value))
                    }
                    ElementChange::ElementValueChange { index, left, right } => {
                        format!("[{}] {} -> {}", index, show(left), show(right))
                    }
                })
                .collect();
            format!("- `{}` (list): {}\n", property, parts.join("; "))
        }
        Change::SetChange {
            property,
            added,
            removed,
            ..
        } => format!(
            "- `{}` (set): added {}, removed {}\n",
            property,
            added.len(),
            removed.len()
        ),
        Change::MapChange {
            property, changes, ..
        } => {
            let parts: Vec<String> = changes
                .iter()
                .map(|c| match c {
                    EntryChange::EntryAdded { key, value } => format!("+{}={}", key, show(value)),
                    EntryChange::EntryRemoved { key, value } => format!("-{}={}", key, show(value)),
                    EntryChange::EntryValueChange { key, left, right } => {
                        format!("{}: {} -> {}", key, show(left), show(right))
                    }
                })
                .collect();
            format!("- `{}` (map): {}\n", property, parts.join("; "))
        }
    };
    Some(line)
}

fn at(index: Option<usize>) -> String {
    index.map(|i| format!("[{}] ", i)).unwrap_or_default()
}

fn show(value: &Value) -> String {
    match value {
        Value::Null => "_null_".to_string(),
        other => format!("`{}`", other),
    }
}
