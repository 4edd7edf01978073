use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::CommentBinding;
use crate::Cursor;
use crate::Decl;
use crate::DeclKind;
use crate::DirectiveSyntax;
use crate::GeneratedBlock;
use crate::NodeId;
use crate::NodeIds;
use crate::locate_bound;

/// What happened to the declaration sequence for one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
	/// A new block was inserted right after the type declaration.
	Inserted { index: usize },
	/// The bound block at `index` was overwritten in place. Other blocks
	/// bound to the same type were removed.
	Replaced {
		index: usize,
		changed: bool,
		removed_duplicates: usize,
	},
}

impl Mutation {
	/// Whether the declaration sequence differs from before.
	pub fn is_change(&self) -> bool {
		match *self {
			Self::Inserted { .. } => true,
			Self::Replaced {
				changed,
				removed_duplicates,
				..
			} => changed || removed_duplicates > 0,
		}
	}
}

/// Everything the replace and insert paths touch besides the cursor.
pub struct Mutator<'a, B: CommentBinding> {
	pub binding: &'a mut B,
	pub ids: &'a mut NodeIds,
	/// Comment storage after the last declaration, which inherits floating
	/// comments when the last declaration is removed.
	pub trailing: &'a mut B::Decs,
	pub syntax: &'a DirectiveSyntax,
}

impl<B: CommentBinding> Mutator<'_, B> {
	/// Put `generated` into the sequence for `type_name`: over the first
	/// bound block if there is one, otherwise directly after the cursor.
	pub fn add_or_replace(
		&mut self,
		cursor: &mut Cursor<'_, B::Decs>,
		type_name: &str,
		generated: GeneratedBlock,
	) -> Mutation {
		let GeneratedBlock { block, marker } = generated;
		let mut decl = Decl {
			id: self.ids.next_id(),
			kind: DeclKind::Const(block),
			decs: B::Decs::default(),
			blank_before: true,
		};

		let bound = locate_bound(cursor.siblings(), &*self.binding, self.syntax, type_name);
		let Some((&first, duplicates)) = bound.split_first() else {
			self.binding.bind_fresh(&mut decl, marker);
			cursor.insert_after(decl);
			debug!(type_name, "inserted generated block");
			return Mutation::Inserted {
				index: cursor.index() + 1,
			};
		};

		if !duplicates.is_empty() {
			warn!(
				type_name,
				count = duplicates.len(),
				"removing extra blocks generated for the same type"
			);
		}
		// Back to front so `first` and the remaining indexes stay valid.
		for &index in duplicates.iter().rev() {
			self.remove(cursor, index);
		}

		let old = &cursor.siblings()[first];
		let changed = !same_specs(&old.kind, &decl.kind);
		decl.blank_before = old.blank_before;
		self.binding.rebind(old, &mut decl, marker);
		let old = cursor.replace_sibling(first, decl);
		debug!(type_name, old = %old.id, changed, "replaced generated block");

		Mutation::Replaced {
			index: first,
			changed,
			removed_duplicates: duplicates.len(),
		}
	}

	fn remove(&mut self, cursor: &mut Cursor<'_, B::Decs>, index: usize) {
		let removed = cursor.remove_sibling(index);
		match cursor.sibling_mut(index) {
			Some(heir) => {
				let heir_id = heir.id;
				self.binding.unbind(&removed, heir_id, &mut heir.decs);
			}
			None => self.binding.unbind(&removed, NodeId::FILE, self.trailing),
		}
	}
}

/// Parsed and synthesized blocks differ in `source`; compare their members.
fn same_specs(left: &DeclKind, right: &DeclKind) -> bool {
	match (left, right) {
		(DeclKind::Const(left), DeclKind::Const(right)) => left.specs == right.specs,
		_ => false,
	}
}
