use std::collections::HashMap;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::Decl;
use crate::Directive;
use crate::DirectiveSyntax;
use crate::NodeId;

/// One entry of a node's leading comment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
	/// A complete comment including its marker, e.g. `// text` or `/* text */`.
	Comment(String),
	/// One or more empty lines.
	Blank,
}

/// Leading comments owned directly by a node, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Decorations(pub Vec<Decoration>);

impl Decorations {
	pub fn comment(text: impl Into<String>) -> Self {
		Self(vec![Decoration::Comment(text.into())])
	}

	/// Comment texts without blank markers.
	pub fn comments(&self) -> impl Iterator<Item = &str> {
		self.0.iter().filter_map(|decoration| {
			match decoration {
				Decoration::Comment(text) => Some(text.as_str()),
				Decoration::Blank => None,
			}
		})
	}

	/// Everything up to and including the last blank marker. These comments
	/// float above the node rather than documenting it.
	pub fn floating(&self) -> &[Decoration] {
		let end = self
			.0
			.iter()
			.rposition(|decoration| *decoration == Decoration::Blank)
			.map_or(0, |index| index + 1);
		&self.0[..end]
	}

	/// Split into comment groups at blank markers.
	pub fn to_groups(&self) -> Vec<CommentGroup> {
		let mut groups = Vec::new();
		let mut list = Vec::new();

		for decoration in &self.0 {
			match decoration {
				Decoration::Comment(text) => list.push(text.clone()),
				Decoration::Blank => {
					if !list.is_empty() {
						groups.push(CommentGroup {
							list: std::mem::take(&mut list),
							attached: false,
						});
					}
				}
			}
		}

		if !list.is_empty() {
			groups.push(CommentGroup {
				list,
				attached: true,
			});
		}

		groups
	}

	/// The inverse of [`Decorations::to_groups`].
	pub fn from_groups(groups: &[CommentGroup]) -> Self {
		let mut decorations = Vec::new();
		for group in groups {
			decorations.extend(group.list.iter().cloned().map(Decoration::Comment));
			if !group.attached {
				decorations.push(Decoration::Blank);
			}
		}
		Self(decorations)
	}
}

/// A run of adjacent comments. `attached` groups sit directly above their
/// node with no blank line in between and act as its doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
	pub list: Vec<String>,
	pub attached: bool,
}

/// Comment groups stored out of band, keyed by the node they precede.
/// Groups after the last declaration are keyed by [`NodeId::FILE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct CommentMap(pub HashMap<NodeId, Vec<CommentGroup>>);

impl CommentMap {
	/// All groups bound to `id` in file order.
	pub fn groups(&self, id: NodeId) -> &[CommentGroup] {
		self.0.get(&id).map_or(&[], Vec::as_slice)
	}

	/// The doc comment of `id`: its last group, when attached.
	pub fn doc(&self, id: NodeId) -> Option<&CommentGroup> {
		self.groups(id).last().filter(|group| group.attached)
	}

	/// Total number of comments across all nodes.
	pub fn comment_count(&self) -> usize {
		self.0
			.values()
			.flatten()
			.map(|group| group.list.len())
			.sum()
	}
}

/// Associates nodes with their comments and keeps that association intact
/// when nodes are created, replaced, or removed.
pub trait CommentBinding {
	/// Per-node comment storage carried inside the tree.
	type Decs: Default + Clone + std::fmt::Debug;

	/// The leading comments of the node with `id` and storage `decs`.
	fn leading(&self, id: NodeId, decs: &Self::Decs) -> Decorations;

	/// The directive attached to `decl`, if any.
	fn directive(&self, decl: &Decl<Self::Decs>, syntax: &DirectiveSyntax) -> Option<Directive>;

	/// Give a newly inserted node `marker` as its only comment.
	fn bind_fresh(&mut self, decl: &mut Decl<Self::Decs>, marker: String);

	/// Move the comments of `old` onto its replacement `new`. Comments floating
	/// above `old` survive; its doc comment is replaced by `marker`.
	fn rebind(&mut self, old: &Decl<Self::Decs>, new: &mut Decl<Self::Decs>, marker: String);

	/// Drop the bindings of a removed node. Its floating comments move to the
	/// front of the comments of `heir`, the node that now follows it.
	fn unbind(&mut self, old: &Decl<Self::Decs>, heir_id: NodeId, heir: &mut Self::Decs);
}

impl CommentBinding for CommentMap {
	type Decs = ();

	fn leading(&self, id: NodeId, _decs: &()) -> Decorations {
		Decorations::from_groups(self.groups(id))
	}

	fn directive(&self, decl: &Decl<()>, syntax: &DirectiveSyntax) -> Option<Directive> {
		let doc = self.doc(decl.id)?;
		syntax.parse_lines(doc.list.iter().map(String::as_str))
	}

	fn bind_fresh(&mut self, decl: &mut Decl<()>, marker: String) {
		self.0.insert(
			decl.id,
			vec![CommentGroup {
				list: vec![marker],
				attached: true,
			}],
		);
	}

	fn rebind(&mut self, old: &Decl<()>, new: &mut Decl<()>, marker: String) {
		let mut groups: Vec<CommentGroup> = self
			.0
			.remove(&old.id)
			.unwrap_or_default()
			.into_iter()
			.filter(|group| !group.attached)
			.collect();
		groups.push(CommentGroup {
			list: vec![marker],
			attached: true,
		});
		self.0.insert(new.id, groups);
	}

	fn unbind(&mut self, old: &Decl<()>, heir_id: NodeId, _heir: &mut ()) {
		let mut floating: Vec<CommentGroup> = self
			.0
			.remove(&old.id)
			.unwrap_or_default()
			.into_iter()
			.filter(|group| !group.attached)
			.collect();
		if floating.is_empty() {
			return;
		}

		let heir_groups = self.0.entry(heir_id).or_default();
		floating.append(heir_groups);
		*heir_groups = floating;
	}
}

/// The inline representation: every node owns its [`Decorations`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Decorated;

impl CommentBinding for Decorated {
	type Decs = Decorations;

	fn leading(&self, _id: NodeId, decs: &Decorations) -> Decorations {
		decs.clone()
	}

	fn directive(&self, decl: &Decl<Decorations>, syntax: &DirectiveSyntax) -> Option<Directive> {
		syntax.parse_decorations(&decl.decs)
	}

	fn bind_fresh(&mut self, decl: &mut Decl<Decorations>, marker: String) {
		decl.decs = Decorations::comment(marker);
	}

	fn rebind(&mut self, old: &Decl<Decorations>, new: &mut Decl<Decorations>, marker: String) {
		let mut decs = old.decs.floating().to_vec();
		decs.push(Decoration::Comment(marker));
		new.decs = Decorations(decs);
	}

	fn unbind(&mut self, old: &Decl<Decorations>, _heir_id: NodeId, heir: &mut Decorations) {
		let floating = old.decs.floating();
		if floating.is_empty() {
			return;
		}
		let mut decs = floating.to_vec();
		decs.append(&mut heir.0);
		heir.0 = decs;
	}
}
