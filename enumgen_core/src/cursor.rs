use std::ops::ControlFlow;

use crate::Decl;

/// A position inside a declaration sequence during [`apply`]. Besides the
/// current node it exposes the whole sequence so siblings can be inspected,
/// replaced, or removed without losing the walk's place.
pub struct Cursor<'a, D> {
	decls: &'a mut Vec<Decl<D>>,
	index: usize,
	/// Nodes inserted after the current one that the walk must step over.
	skip: usize,
}

impl<'a, D> Cursor<'a, D> {
	pub fn new(decls: &'a mut Vec<Decl<D>>, index: usize) -> Self {
		Self {
			decls,
			index,
			skip: 0,
		}
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn node(&self) -> &Decl<D> {
		&self.decls[self.index]
	}

	pub fn node_mut(&mut self) -> &mut Decl<D> {
		&mut self.decls[self.index]
	}

	/// The sequence containing the current node.
	pub fn siblings(&self) -> &[Decl<D>] {
		self.decls.as_slice()
	}

	pub fn sibling_mut(&mut self, index: usize) -> Option<&mut Decl<D>> {
		self.decls.get_mut(index)
	}

	/// Replace the current node, returning the old one.
	pub fn replace(&mut self, decl: Decl<D>) -> Decl<D> {
		std::mem::replace(&mut self.decls[self.index], decl)
	}

	/// Replace the sibling at `index` in place, returning the old one.
	pub fn replace_sibling(&mut self, index: usize, decl: Decl<D>) -> Decl<D> {
		std::mem::replace(&mut self.decls[index], decl)
	}

	/// Insert `decl` directly after the current node. The walk does not visit
	/// it.
	pub fn insert_after(&mut self, decl: Decl<D>) {
		self.skip += 1;
		self.decls.insert(self.index + 1, decl);
	}

	/// Remove the sibling at `index`. Removing the current node is not
	/// allowed.
	pub fn remove_sibling(&mut self, index: usize) -> Decl<D> {
		debug_assert_ne!(index, self.index, "cannot remove the node under the cursor");
		let removed = self.decls.remove(index);
		if index < self.index {
			self.index -= 1;
		} else if index <= self.index + self.skip {
			self.skip -= 1;
		}
		removed
	}
}

/// Walk `decls` in order, calling `visit` with a cursor on every node. The
/// visitor may mutate the sequence through the cursor; nodes it inserts after
/// the current one are stepped over.
pub fn apply<D>(
	decls: &mut Vec<Decl<D>>,
	mut visit: impl FnMut(&mut Cursor<'_, D>) -> ControlFlow<()>,
) {
	let mut index = 0;

	while index < decls.len() {
		let mut cursor = Cursor::new(decls, index);
		let flow = visit(&mut cursor);
		index = cursor.index + cursor.skip + 1;

		if flow.is_break() {
			break;
		}
	}
}
