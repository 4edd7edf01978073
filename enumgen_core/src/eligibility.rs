use crate::TypeDecl;
use crate::TypeExpr;

/// The primitive string type a synthesized type must be based on.
pub const STRING_TYPE: &str = "string";

/// The single name a type declaration introduces, and whether it can carry
/// generated variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
	pub name: &'a str,
	pub eligible: bool,
}

/// Classify a type declaration. Returns `None` when the declaration does not
/// introduce exactly one name.
pub fn classify(decl: &TypeDecl) -> Option<Candidate<'_>> {
	let [spec] = decl.specs.as_slice() else {
		return None;
	};

	let eligible = spec.type_params.is_none()
		&& !spec.alias
		&& matches!(&spec.ty, TypeExpr::Ident(ident) if ident == STRING_TYPE);

	Some(Candidate {
		name: &spec.name,
		eligible,
	})
}

/// The name of a `type Name string` declaration; `None` for anything else.
pub fn string_based_type(decl: &TypeDecl) -> Option<&str> {
	classify(decl)
		.filter(|candidate| candidate.eligible)
		.map(|candidate| candidate.name)
}
