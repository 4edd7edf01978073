use crate::CommentBinding;
use crate::Decl;
use crate::DeclKind;
use crate::DirectiveSyntax;

/// Indexes of every constant block in `decls` whose leading directive binds
/// it to `type_name`, in file order. The first entry is the block a pass
/// replaces; an empty result means a new block is inserted.
pub fn locate_bound<B: CommentBinding>(
	decls: &[Decl<B::Decs>],
	binding: &B,
	syntax: &DirectiveSyntax,
	type_name: &str,
) -> Vec<usize> {
	decls
		.iter()
		.enumerate()
		.filter(|(_, decl)| matches!(decl.kind, DeclKind::Const(_)))
		.filter(|(_, decl)| {
			binding
				.directive(decl, syntax)
				.is_some_and(|directive| directive.is_generated_for(type_name))
		})
		.map(|(index, _)| index)
		.collect()
}

/// The first block bound to `type_name`.
pub fn find_bound<B: CommentBinding>(
	decls: &[Decl<B::Decs>],
	binding: &B,
	syntax: &DirectiveSyntax,
	type_name: &str,
) -> Option<usize> {
	locate_bound(decls, binding, syntax, type_name)
		.first()
		.copied()
}
