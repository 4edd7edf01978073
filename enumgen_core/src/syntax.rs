use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

/// Identity of a node within a single [`File`]. Identities are never reused,
/// so a replaced node's id can be dropped from side tables without touching
/// the node that took its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
	/// The id reserved for the file itself. Comments after the last
	/// declaration are bound to it.
	pub const FILE: Self = Self(0);
}

impl Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Allocates fresh [`NodeId`]s for one file.
#[derive(Debug, Clone)]
pub struct NodeIds {
	next: u32,
}

impl Default for NodeIds {
	fn default() -> Self {
		Self { next: 1 }
	}
}

impl NodeIds {
	pub fn next_id(&mut self) -> NodeId {
		let id = NodeId(self.next);
		self.next += 1;
		id
	}
}

/// A parsed source file. `D` is the per-node comment storage of the comment
/// representation in use: `()` when comments live in a
/// [`CommentMap`](crate::CommentMap), [`Decorations`](crate::Decorations)
/// when every node carries its own.
#[derive(Debug, Clone)]
pub struct File<D> {
	pub id: NodeId,
	/// Top-level declarations in source order. The order is observable
	/// output.
	pub decls: Vec<Decl<D>>,
	/// Comment storage for anything after the last declaration.
	pub trailing: D,
	/// Whether an empty line separates the trailing comments from the last
	/// declaration.
	pub trailing_blank_before: bool,
	pub ids: NodeIds,
}

impl<D: Default> Default for File<D> {
	fn default() -> Self {
		Self {
			id: NodeId::FILE,
			decls: Vec::new(),
			trailing: D::default(),
			trailing_blank_before: true,
			ids: NodeIds::default(),
		}
	}
}

impl<D> File<D> {
	/// Append a declaration with a freshly allocated id, separated from the
	/// previous one by an empty line.
	pub fn push(&mut self, kind: DeclKind, decs: D) -> NodeId {
		let id = self.ids.next_id();
		self.decls.push(Decl {
			id,
			kind,
			decs,
			blank_before: true,
		});
		id
	}

	/// Index of the declaration with the given id.
	pub fn position(&self, id: NodeId) -> Option<usize> {
		self.decls.iter().position(|decl| decl.id == id)
	}

	pub fn get(&self, id: NodeId) -> Option<&Decl<D>> {
		self.decls.iter().find(|decl| decl.id == id)
	}

	/// Every constant block in file order.
	pub fn const_blocks(&self) -> impl Iterator<Item = (&Decl<D>, &ConstDecl)> {
		self.decls.iter().filter_map(|decl| {
			match &decl.kind {
				DeclKind::Const(block) => Some((decl, block)),
				_ => None,
			}
		})
	}
}

/// A top-level declaration together with its comment storage.
#[derive(Debug, Clone)]
pub struct Decl<D> {
	pub id: NodeId,
	pub kind: DeclKind,
	pub decs: D,
	/// Whether an empty line separates this node (and its leading comments)
	/// from the previous declaration.
	pub blank_before: bool,
}

impl<D> Decl<D> {
	pub fn as_type(&self) -> Option<&TypeDecl> {
		match &self.kind {
			DeclKind::Type(decl) => Some(decl),
			_ => None,
		}
	}

	pub fn as_const(&self) -> Option<&ConstDecl> {
		match &self.kind {
			DeclKind::Const(decl) => Some(decl),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeclKind {
	/// `type Name string`, `type ( ... )`.
	Type(TypeDecl),
	/// `const ( ... )`, `const Name = value`.
	Const(ConstDecl),
	/// Anything else (`package`, `import`, `var`, `func`), kept verbatim.
	Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
	/// Whether the declaration used the parenthesized `type ( ... )` form.
	pub grouped: bool,
	pub specs: Vec<TypeSpec>,
	/// The declaration exactly as it appeared in the source.
	pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
	pub name: String,
	/// Raw text of the type parameter list including brackets, e.g. `[T any]`.
	pub type_params: Option<String>,
	/// `type Name = Other`.
	pub alias: bool,
	pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
	/// A single identifier such as `string` or `Other`.
	Ident(String),
	/// Any other type expression, as written.
	Composite(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstDecl {
	pub grouped: bool,
	pub specs: Vec<ConstSpec>,
	/// The declaration as it appeared in the source. `None` for synthesized
	/// blocks, which are printed from their specs.
	pub source: Option<String>,
}

impl ConstDecl {
	/// The `Name Type = value` members of this block in order.
	pub fn members(&self) -> impl Iterator<Item = &MemberSpec> {
		self.specs.iter().filter_map(|spec| {
			match spec {
				ConstSpec::Member(member) => Some(member),
				ConstSpec::Verbatim(_) => None,
			}
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstSpec {
	Member(MemberSpec),
	/// A spec that is not of the `Name Type = "literal"` shape, as written.
	Verbatim(String),
}

/// One typed constant: `Name Type = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
	pub name: String,
	pub ty: String,
	/// The quoted string literal, e.g. `"b\"ar"`.
	pub value: String,
}

impl Display for MemberSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {} = {}", self.name, self.ty, self.value)
	}
}
