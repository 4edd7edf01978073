use crate::CommentBinding;
use crate::CommentMap;
use crate::ConstDecl;
use crate::ConstSpec;
use crate::Decl;
use crate::DeclKind;
use crate::Decorated;
use crate::Decoration;
use crate::Decorations;
use crate::File;
use crate::NodeId;

/// Print a file whose nodes carry their own comments.
pub fn render_decorated(file: &File<Decorations>) -> String {
	render(file, &Decorated)
}

/// Print a file whose comments live in `comments`.
pub fn render_with_map(file: &File<()>, comments: &CommentMap) -> String {
	render(file, comments)
}

/// Print `file` back to source text, asking `binding` for the comments in
/// front of every node.
pub fn render<B: CommentBinding>(file: &File<B::Decs>, binding: &B) -> String {
	let mut output = String::new();

	for (index, decl) in file.decls.iter().enumerate() {
		if index > 0 && decl.blank_before {
			output.push('\n');
		}
		write_decorations(&mut output, &binding.leading(decl.id, &decl.decs));
		write_decl(&mut output, decl);
		output.push('\n');
	}

	let mut trailing = binding.leading(NodeId::FILE, &file.trailing);
	while trailing.last() == Some(&Decoration::Blank) {
		trailing.pop();
	}
	if !trailing.is_empty() {
		if !file.decls.is_empty() && file.trailing_blank_before {
			output.push('\n');
		}
		write_decorations(&mut output, &trailing);
	}

	output
}

fn write_decorations(output: &mut String, decorations: &Decorations) {
	for decoration in decorations.iter() {
		if let Decoration::Comment(text) = decoration {
			output.push_str(text);
		}
		output.push('\n');
	}
}

fn write_decl<D>(output: &mut String, decl: &Decl<D>) {
	match &decl.kind {
		DeclKind::Type(type_decl) => output.push_str(&type_decl.source),
		DeclKind::Const(ConstDecl {
			source: Some(source),
			..
		})
		| DeclKind::Other(source) => output.push_str(source),
		DeclKind::Const(block) => write_const(output, block),
	}
}

fn write_const(output: &mut String, block: &ConstDecl) {
	if let (false, [spec]) = (block.grouped, block.specs.as_slice()) {
		output.push_str("const ");
		write_spec(output, spec);
		return;
	}

	output.push_str("const (\n");
	for spec in &block.specs {
		output.push('\t');
		write_spec(output, spec);
		output.push('\n');
	}
	output.push(')');
}

fn write_spec(output: &mut String, spec: &ConstSpec) {
	match spec {
		ConstSpec::Member(member) => output.push_str(&member.to_string()),
		ConstSpec::Verbatim(text) => output.push_str(text),
	}
}
